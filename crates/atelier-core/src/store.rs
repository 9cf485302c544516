//! Capability contracts the core requires from its collaborators.
//!
//! The core never touches storage or the network directly. Catalog reads and
//! writes go through [`CatalogStore`]; the outbound enquiry relay goes
//! through [`EnquiryNotifier`]. Implementations live outside this crate
//! (Postgres in `atelier-db`, the webhook relay in the server), which keeps
//! every pure component here testable against plain in-memory values.

use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::{
    NewProduct, NewReview, NewVariantOption, Product, ProductUpdate, Review, VariantKind,
    VariantOption,
};
use crate::enquiry::{Enquiry, EnquiryDraft, EnquiryStatus};
use crate::error::DomainResult;

/// The external catalog store.
///
/// Every operation is a single atomic call; a failure leaves no partial
/// write behind. Read-after-write consistency is the implementation's
/// responsibility (an admin edit is visible to the next catalog fetch).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns the full catalog, each product with its reviews and option
    /// lists nested.
    async fn list_products(&self) -> DomainResult<Vec<Product>>;

    /// Returns one product with nested collections, or `NotFound`.
    async fn get_product(&self, id: Uuid) -> DomainResult<Product>;

    /// Creates a product and returns it.
    async fn create_product(&self, new: NewProduct) -> DomainResult<Product>;

    /// Applies a sparse update and returns the updated product, or
    /// `NotFound`.
    async fn update_product(&self, id: Uuid, update: ProductUpdate) -> DomainResult<Product>;

    /// Deletes a product and, with it, its options and reviews. `NotFound`
    /// when the id does not exist.
    async fn delete_product(&self, id: Uuid) -> DomainResult<()>;

    /// Attaches an option to an existing product, or `NotFound` when the
    /// product does not exist.
    async fn add_variant_option(
        &self,
        product_id: Uuid,
        kind: VariantKind,
        option: NewVariantOption,
    ) -> DomainResult<VariantOption>;

    /// Removes one option by kind and id, or `NotFound`.
    async fn remove_variant_option(&self, kind: VariantKind, id: Uuid) -> DomainResult<()>;

    /// Stores a visitor review on a product, or `NotFound` when the product
    /// does not exist.
    async fn create_review(&self, product_id: Uuid, review: NewReview) -> DomainResult<Review>;

    /// Persists a validated enquiry draft with initial status `pending`.
    async fn create_enquiry(&self, draft: EnquiryDraft) -> DomainResult<Enquiry>;

    /// Returns all enquiries, newest first.
    async fn list_enquiries(&self) -> DomainResult<Vec<Enquiry>>;

    /// Returns one enquiry, or `NotFound`.
    async fn get_enquiry(&self, id: Uuid) -> DomainResult<Enquiry>;

    /// Moves an enquiry to `status`, enforcing the transition table.
    /// `NotFound` when the id does not exist, `InvalidTransition` when the
    /// current status does not permit the change.
    async fn update_enquiry_status(&self, id: Uuid, status: EnquiryStatus)
        -> DomainResult<Enquiry>;
}

/// The fire-and-forget notification channel for submitted enquiries.
///
/// One attempt, no retry; a failure surfaces as `DomainError::Channel` and
/// the caller tells the visitor to try again later.
#[async_trait]
pub trait EnquiryNotifier: Send + Sync {
    async fn notify(&self, draft: &EnquiryDraft) -> DomainResult<()>;
}
