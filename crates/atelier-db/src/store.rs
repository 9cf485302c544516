//! Postgres implementation of the core's [`CatalogStore`] contract.
//!
//! Products are stored relationally and assembled into the nested domain
//! shape here: one query per table family, then grouped by `product_id`.

use std::collections::HashMap;

use async_trait::async_trait;
use atelier_core::{
    enquiry, CatalogStore, DomainError, DomainResult, Enquiry, EnquiryDraft, EnquiryStatus,
    NewProduct, NewReview, NewVariantOption, Product, ProductColor, ProductFabric, ProductSize,
    ProductUpdate, Review, VariantKind, VariantOption,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{enquiries, products, reviews, variants, DbError};

/// A [`CatalogStore`] backed by a Postgres pool.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn assemble_product(&self, row: products::ProductRow) -> DomainResult<Product> {
        let fabrics = variants::list_fabrics_for_product(&self.pool, row.id)
            .await
            .map_err(map_db_error)?;
        let colors = variants::list_colors_for_product(&self.pool, row.id)
            .await
            .map_err(map_db_error)?;
        let sizes = variants::list_sizes_for_product(&self.pool, row.id)
            .await
            .map_err(map_db_error)?;
        let product_reviews = reviews::list_reviews_for_product(&self.pool, row.id)
            .await
            .map_err(map_db_error)?;

        Ok(product_from_parts(
            row,
            fabrics.into_iter().map(fabric_from_row).collect(),
            colors.into_iter().map(color_from_row).collect(),
            sizes.into_iter().map(size_from_row).collect(),
            product_reviews.into_iter().map(review_from_row).collect(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Row -> domain mapping
// ---------------------------------------------------------------------------

fn map_db_error(error: DbError) -> DomainError {
    match error {
        DbError::NotFound => DomainError::NotFound,
        other => DomainError::store(other.to_string()),
    }
}

fn fabric_from_row(row: variants::FabricRow) -> ProductFabric {
    ProductFabric {
        id: row.id,
        name: row.name,
        image: row.image,
    }
}

fn color_from_row(row: variants::ColorRow) -> ProductColor {
    ProductColor {
        id: row.id,
        name: row.name,
        code: row.code,
    }
}

fn size_from_row(row: variants::SizeRow) -> ProductSize {
    ProductSize {
        id: row.id,
        name: row.name,
    }
}

fn review_from_row(row: reviews::ReviewRow) -> Review {
    Review {
        id: row.id,
        author: row.author,
        comment: row.comment,
        rating: row.rating,
        created_at: row.created_at,
    }
}

fn product_from_parts(
    row: products::ProductRow,
    fabrics: Vec<ProductFabric>,
    colors: Vec<ProductColor>,
    sizes: Vec<ProductSize>,
    product_reviews: Vec<Review>,
) -> Product {
    Product {
        id: row.id,
        name: row.name,
        description: row.description,
        price: row.price,
        category: row.category,
        stock: row.stock,
        images: row.images,
        is_special: row.is_special,
        special_price: row.special_price,
        is_featured: row.is_featured,
        fabrics,
        colors,
        sizes,
        reviews: product_reviews,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn enquiry_from_row(row: enquiries::EnquiryRow) -> DomainResult<Enquiry> {
    let status: EnquiryStatus = row.status.parse().map_err(|_| {
        DomainError::store(format!(
            "enquiry {} has unknown status '{}'",
            row.id, row.status
        ))
    })?;

    Ok(Enquiry {
        id: row.id,
        product_id: row.product_id,
        product_name: row.product_name,
        customer_name: row.customer_name,
        customer_email: row.customer_email,
        customer_phone: row.customer_phone,
        message: row.message,
        fabric: row.fabric,
        color: row.color,
        status,
        created_at: row.created_at,
    })
}

/// Groups child rows by their `product_id`.
fn bucket_by_product<R, T>(
    rows: Vec<R>,
    key: impl Fn(&R) -> Uuid,
    map: impl Fn(R) -> T,
) -> HashMap<Uuid, Vec<T>> {
    let mut buckets: HashMap<Uuid, Vec<T>> = HashMap::new();
    for row in rows {
        buckets.entry(key(&row)).or_default().push(map(row));
    }
    buckets
}

// ---------------------------------------------------------------------------
// Contract implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_products(&self) -> DomainResult<Vec<Product>> {
        let product_rows = products::list_products(&self.pool)
            .await
            .map_err(map_db_error)?;
        let fabric_rows = variants::list_fabrics(&self.pool).await.map_err(map_db_error)?;
        let color_rows = variants::list_colors(&self.pool).await.map_err(map_db_error)?;
        let size_rows = variants::list_sizes(&self.pool).await.map_err(map_db_error)?;
        let review_rows = reviews::list_reviews(&self.pool).await.map_err(map_db_error)?;

        let mut fabrics = bucket_by_product(fabric_rows, |r| r.product_id, fabric_from_row);
        let mut colors = bucket_by_product(color_rows, |r| r.product_id, color_from_row);
        let mut sizes = bucket_by_product(size_rows, |r| r.product_id, size_from_row);
        let mut review_map = bucket_by_product(review_rows, |r| r.product_id, review_from_row);

        Ok(product_rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                product_from_parts(
                    row,
                    fabrics.remove(&id).unwrap_or_default(),
                    colors.remove(&id).unwrap_or_default(),
                    sizes.remove(&id).unwrap_or_default(),
                    review_map.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn get_product(&self, id: Uuid) -> DomainResult<Product> {
        let row = products::get_product(&self.pool, id)
            .await
            .map_err(map_db_error)?;
        self.assemble_product(row).await
    }

    async fn create_product(&self, new: NewProduct) -> DomainResult<Product> {
        let row = products::insert_product(&self.pool, &new)
            .await
            .map_err(map_db_error)?;
        // A fresh product has no options or reviews yet; skip the child queries.
        Ok(product_from_parts(row, vec![], vec![], vec![], vec![]))
    }

    async fn update_product(&self, id: Uuid, update: ProductUpdate) -> DomainResult<Product> {
        let row = products::update_product(&self.pool, id, &update)
            .await
            .map_err(map_db_error)?;
        self.assemble_product(row).await
    }

    async fn delete_product(&self, id: Uuid) -> DomainResult<()> {
        products::delete_product(&self.pool, id)
            .await
            .map_err(map_db_error)
    }

    async fn add_variant_option(
        &self,
        product_id: Uuid,
        kind: VariantKind,
        option: NewVariantOption,
    ) -> DomainResult<VariantOption> {
        // Resolve the product first so a missing owner surfaces as NotFound
        // rather than a foreign-key error.
        products::get_product(&self.pool, product_id)
            .await
            .map_err(map_db_error)?;

        match kind {
            VariantKind::Fabric => {
                let row = variants::insert_fabric(
                    &self.pool,
                    product_id,
                    &option.name,
                    option.image.as_deref(),
                )
                .await
                .map_err(map_db_error)?;
                Ok(VariantOption::Fabric(fabric_from_row(row)))
            }
            VariantKind::Color => {
                let code = option
                    .code
                    .as_deref()
                    .ok_or_else(|| DomainError::validation("code is required for colors"))?;
                let row = variants::insert_color(&self.pool, product_id, &option.name, code)
                    .await
                    .map_err(map_db_error)?;
                Ok(VariantOption::Color(color_from_row(row)))
            }
            VariantKind::Size => {
                let row = variants::insert_size(&self.pool, product_id, &option.name)
                    .await
                    .map_err(map_db_error)?;
                Ok(VariantOption::Size(size_from_row(row)))
            }
        }
    }

    async fn remove_variant_option(&self, kind: VariantKind, id: Uuid) -> DomainResult<()> {
        let result = match kind {
            VariantKind::Fabric => variants::delete_fabric(&self.pool, id).await,
            VariantKind::Color => variants::delete_color(&self.pool, id).await,
            VariantKind::Size => variants::delete_size(&self.pool, id).await,
        };
        result.map_err(map_db_error)
    }

    async fn create_review(&self, product_id: Uuid, review: NewReview) -> DomainResult<Review> {
        products::get_product(&self.pool, product_id)
            .await
            .map_err(map_db_error)?;

        let row = reviews::insert_review(
            &self.pool,
            product_id,
            &review.author,
            review.comment.as_deref(),
            review.rating,
        )
        .await
        .map_err(map_db_error)?;

        Ok(review_from_row(row))
    }

    async fn create_enquiry(&self, draft: EnquiryDraft) -> DomainResult<Enquiry> {
        let row = enquiries::insert_enquiry(&self.pool, &draft)
            .await
            .map_err(map_db_error)?;
        enquiry_from_row(row)
    }

    async fn list_enquiries(&self) -> DomainResult<Vec<Enquiry>> {
        let rows = enquiries::list_enquiries(&self.pool)
            .await
            .map_err(map_db_error)?;
        rows.into_iter().map(enquiry_from_row).collect()
    }

    async fn get_enquiry(&self, id: Uuid) -> DomainResult<Enquiry> {
        let row = enquiries::get_enquiry(&self.pool, id)
            .await
            .map_err(map_db_error)?;
        enquiry_from_row(row)
    }

    async fn update_enquiry_status(
        &self,
        id: Uuid,
        status: EnquiryStatus,
    ) -> DomainResult<Enquiry> {
        let current = self.get_enquiry(id).await?;
        enquiry::check_transition(current.status, status)?;

        // The guarded UPDATE re-checks the status, so a concurrent admin
        // action loses cleanly instead of double-applying.
        enquiries::update_enquiry_status(&self.pool, id, current.status.as_str(), status.as_str())
            .await
            .map_err(|e| match e {
                DbError::InvalidEnquiryTransition { .. } => DomainError::InvalidTransition {
                    from: current.status,
                    to: status,
                },
                other => map_db_error(other),
            })?;

        self.get_enquiry(id).await
    }
}
