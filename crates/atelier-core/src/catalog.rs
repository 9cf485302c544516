//! Catalog data model: products, their configurable options, and reviews.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::pricing;

static COLOR_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color code regex"));

/// A catalog product with its nested option lists and reviews.
///
/// Browsing never mutates a product; the admin surface is the only writer.
/// `special_price`, when set, is strictly less than `price` (enforced at
/// write time by [`pricing::validate_special_price`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub stock: i32,
    /// Ordered image URLs; the first one is the card image.
    pub images: Vec<String>,
    pub is_special: bool,
    pub special_price: Option<Decimal>,
    pub is_featured: bool,
    pub fabrics: Vec<ProductFabric>,
    pub colors: Vec<ProductColor>,
    pub sizes: Vec<ProductSize>,
    pub reviews: Vec<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fabric option configured on a product. Deleted with its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFabric {
    pub id: Uuid,
    pub name: String,
    /// Swatch image URL, if one was uploaded.
    pub image: Option<String>,
}

/// A color option configured on a product. `code` is a `#RRGGBB` hex value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

/// A size option configured on a product. Informational only; sizes never
/// gate an enquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSize {
    pub id: Uuid,
    pub name: String,
}

/// A visitor review. Never updated or deleted; there is no moderation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub author: String,
    pub comment: Option<String>,
    /// Integer stars, 1..=5.
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

/// The kind of configurable option attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Fabric,
    Color,
    Size,
}

impl VariantKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VariantKind::Fabric => "fabric",
            VariantKind::Color => "color",
            VariantKind::Size => "size",
        }
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fabric" => Ok(VariantKind::Fabric),
            "color" => Ok(VariantKind::Color),
            "size" => Ok(VariantKind::Size),
            other => Err(DomainError::validation(format!(
                "kind must be 'fabric', 'color', or 'size', got '{other}'"
            ))),
        }
    }
}

/// A newly created option of any kind, as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VariantOption {
    Fabric(ProductFabric),
    Color(ProductColor),
    Size(ProductSize),
}

// ---------------------------------------------------------------------------
// Write-side inputs
// ---------------------------------------------------------------------------

/// Fields for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub stock: i32,
    pub images: Vec<String>,
    pub is_special: bool,
    pub special_price: Option<Decimal>,
    pub is_featured: bool,
}

/// Sparse product update.
///
/// `Option<Option<T>>` on nullable columns distinguishes "not in request"
/// (outer `None`, keep current) from "explicitly cleared" (`Some(None)`).
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub stock: Option<i32>,
    pub images: Option<Vec<String>>,
    pub is_special: Option<bool>,
    pub special_price: Option<Option<Decimal>>,
    pub is_featured: Option<bool>,
}

/// Fields for attaching an option to a product. `image` is only meaningful
/// for fabrics, `code` only for colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVariantOption {
    pub name: String,
    pub image: Option<String>,
    pub code: Option<String>,
}

/// Fields for a visitor-submitted review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub author: String,
    pub comment: Option<String>,
    pub rating: i16,
}

// ---------------------------------------------------------------------------
// Write-time validation
// ---------------------------------------------------------------------------

/// Validates fields for product creation.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] naming the offending field.
pub fn validate_new_product(new: &NewProduct) -> DomainResult<()> {
    if new.name.trim().is_empty() {
        return Err(DomainError::validation("name must not be empty"));
    }
    if new.category.trim().is_empty() {
        return Err(DomainError::validation("category must not be empty"));
    }
    if new.stock < 0 {
        return Err(DomainError::validation("stock must not be negative"));
    }
    pricing::validate_special_price(new.price, new.special_price)
}

/// Validates a sparse update against the current product state.
///
/// The price invariant is checked on the values the update would leave in
/// place, so setting `price` below an existing `special_price` is rejected
/// the same way as raising `special_price` above `price`.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] naming the offending field.
pub fn validate_product_update(current: &Product, update: &ProductUpdate) -> DomainResult<()> {
    if let Some(ref name) = update.name {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
    }
    if let Some(ref category) = update.category {
        if category.trim().is_empty() {
            return Err(DomainError::validation("category must not be empty"));
        }
    }
    if let Some(stock) = update.stock {
        if stock < 0 {
            return Err(DomainError::validation("stock must not be negative"));
        }
    }

    let price = update.price.unwrap_or(current.price);
    let special_price = match update.special_price {
        Some(value) => value,
        None => current.special_price,
    };
    pricing::validate_special_price(price, special_price)
}

/// Validates an option before it is attached to a product.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] naming the offending field.
pub fn validate_variant_option(kind: VariantKind, option: &NewVariantOption) -> DomainResult<()> {
    if option.name.trim().is_empty() {
        return Err(DomainError::validation("name must not be empty"));
    }
    if kind == VariantKind::Color {
        match option.code.as_deref() {
            Some(code) if COLOR_CODE_RE.is_match(code) => {}
            Some(code) => {
                return Err(DomainError::validation(format!(
                    "code must match #RRGGBB, got '{code}'"
                )));
            }
            None => return Err(DomainError::validation("code is required for colors")),
        }
    }
    Ok(())
}

/// Validates a visitor review.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] naming the offending field.
pub fn validate_new_review(review: &NewReview) -> DomainResult<()> {
    if review.author.trim().is_empty() {
        return Err(DomainError::validation("author must not be empty"));
    }
    if !(1..=5).contains(&review.rating) {
        return Err(DomainError::validation(format!(
            "rating must be between 1 and 5, got {}",
            review.rating
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Linen Armchair".to_string(),
            description: None,
            price: dec!(499.00),
            category: "Chairs".to_string(),
            stock: 3,
            images: vec![],
            is_special: false,
            special_price: None,
            is_featured: false,
        }
    }

    fn product(category: &str, is_special: bool) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Linen Armchair".to_string(),
            description: None,
            price: dec!(499.00),
            category: category.to_string(),
            stock: 3,
            images: vec![],
            is_special,
            special_price: None,
            is_featured: false,
            fabrics: vec![],
            colors: vec![],
            sizes: vec![],
            reviews: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn new_product_accepts_valid_fields() {
        assert!(validate_new_product(&new_product()).is_ok());
    }

    #[test]
    fn new_product_rejects_empty_name() {
        let mut new = new_product();
        new.name = "   ".to_string();
        let err = validate_new_product(&new).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("name")));
    }

    #[test]
    fn new_product_rejects_empty_category() {
        let mut new = new_product();
        new.category = String::new();
        let err = validate_new_product(&new).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("category")));
    }

    #[test]
    fn new_product_rejects_negative_stock() {
        let mut new = new_product();
        new.stock = -1;
        let err = validate_new_product(&new).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("stock")));
    }

    #[test]
    fn new_product_rejects_special_price_equal_to_price() {
        let mut new = new_product();
        new.special_price = Some(new.price);
        assert!(validate_new_product(&new).is_err());
    }

    #[test]
    fn update_rejects_price_dropped_below_existing_special_price() {
        let mut current = product("Chairs", true);
        current.special_price = Some(dec!(400.00));
        let update = ProductUpdate {
            price: Some(dec!(350.00)),
            ..ProductUpdate::default()
        };
        assert!(validate_product_update(&current, &update).is_err());
    }

    #[test]
    fn update_accepts_clearing_special_price() {
        let mut current = product("Chairs", true);
        current.special_price = Some(dec!(400.00));
        let update = ProductUpdate {
            price: Some(dec!(350.00)),
            special_price: Some(None),
            ..ProductUpdate::default()
        };
        assert!(validate_product_update(&current, &update).is_ok());
    }

    #[test]
    fn variant_kind_round_trips_through_str() {
        for kind in [VariantKind::Fabric, VariantKind::Color, VariantKind::Size] {
            assert_eq!(kind.as_str().parse::<VariantKind>().unwrap(), kind);
        }
        assert!("sofa".parse::<VariantKind>().is_err());
    }

    #[test]
    fn color_option_requires_well_formed_code() {
        let option = NewVariantOption {
            name: "Walnut".to_string(),
            image: None,
            code: Some("#8B5A2B".to_string()),
        };
        assert!(validate_variant_option(VariantKind::Color, &option).is_ok());

        let bad = NewVariantOption {
            code: Some("8B5A2B".to_string()),
            ..option.clone()
        };
        assert!(validate_variant_option(VariantKind::Color, &bad).is_err());

        let missing = NewVariantOption {
            code: None,
            ..option
        };
        assert!(validate_variant_option(VariantKind::Color, &missing).is_err());
    }

    #[test]
    fn size_option_needs_only_a_name() {
        let option = NewVariantOption {
            name: "Three-seater".to_string(),
            image: None,
            code: None,
        };
        assert!(validate_variant_option(VariantKind::Size, &option).is_ok());
    }

    #[test]
    fn review_rejects_out_of_range_rating() {
        for rating in [0, 6, -1] {
            let review = NewReview {
                author: "Jo".to_string(),
                comment: None,
                rating,
            };
            assert!(validate_new_review(&review).is_err());
        }
    }

    #[test]
    fn serde_roundtrip_product() {
        let mut p = product("Sofas", true);
        p.special_price = Some(dec!(399.00));
        p.colors.push(ProductColor {
            id: Uuid::new_v4(),
            name: "Walnut".to_string(),
            code: "#8B5A2B".to_string(),
        });
        let json = serde_json::to_string(&p).expect("serialization failed");
        let decoded: Product = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded.id, p.id);
        assert_eq!(decoded.price, p.price);
        assert_eq!(decoded.special_price, p.special_price);
        assert_eq!(decoded.colors.len(), 1);
        assert_eq!(decoded.colors[0].code, "#8B5A2B");
    }

    #[test]
    fn review_accepts_boundary_ratings() {
        for rating in [1, 5] {
            let review = NewReview {
                author: "Jo".to_string(),
                comment: Some("Solid build.".to_string()),
                rating,
            };
            assert!(validate_new_review(&review).is_ok());
        }
    }
}
