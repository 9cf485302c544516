//! Option-selection state for a single enquiry in progress.
//!
//! Fabrics and colors gate submission when the product configures them;
//! sizes are informational and never block. A [`Selection`] lives only for
//! one enquiry attempt and is folded into the enquiry record on submit.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// The visitor's chosen option names for an enquiry in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub fabric: Option<String>,
    pub color: Option<String>,
}

/// Why a submission is currently blocked, if it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionBlock {
    None,
    NeedsFabric,
    NeedsColor,
    NeedsBoth,
}

/// True iff the product has one or more configured fabrics.
#[must_use]
pub fn fabric_required(product: &Product) -> bool {
    !product.fabrics.is_empty()
}

/// True iff the product has one or more configured colors.
#[must_use]
pub fn color_required(product: &Product) -> bool {
    !product.colors.is_empty()
}

/// True iff every required option kind has a selection.
#[must_use]
pub fn can_enquire(product: &Product, selection: &Selection) -> bool {
    (!fabric_required(product) || selection.fabric.is_some())
        && (!color_required(product) || selection.color.is_some())
}

/// Derives the guidance state for the enquiry form. Purely a function of the
/// product's option lists and the current selection.
#[must_use]
pub fn explain_block(product: &Product, selection: &Selection) -> SelectionBlock {
    let fabric_missing = fabric_required(product) && selection.fabric.is_none();
    let color_missing = color_required(product) && selection.color.is_none();
    match (fabric_missing, color_missing) {
        (false, false) => SelectionBlock::None,
        (true, false) => SelectionBlock::NeedsFabric,
        (false, true) => SelectionBlock::NeedsColor,
        (true, true) => SelectionBlock::NeedsBoth,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::catalog::{ProductColor, ProductFabric};

    use super::*;

    fn fabric(name: &str) -> ProductFabric {
        ProductFabric {
            id: Uuid::new_v4(),
            name: name.to_string(),
            image: None,
        }
    }

    fn color(name: &str, code: &str) -> ProductColor {
        ProductColor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    fn product(fabrics: Vec<ProductFabric>, colors: Vec<ProductColor>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Modular Sofa".to_string(),
            description: None,
            price: dec!(1299.00),
            category: "Sofas".to_string(),
            stock: 2,
            images: vec![],
            is_special: false,
            special_price: None,
            is_featured: false,
            fabrics,
            colors,
            sizes: vec![],
            reviews: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn select(fabric: Option<&str>, color: Option<&str>) -> Selection {
        Selection {
            fabric: fabric.map(ToOwned::to_owned),
            color: color.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn product_without_options_requires_nothing() {
        let p = product(vec![], vec![]);
        assert!(!fabric_required(&p));
        assert!(!color_required(&p));
        assert!(can_enquire(&p, &Selection::default()));
        assert_eq!(explain_block(&p, &Selection::default()), SelectionBlock::None);
    }

    #[test]
    fn fabrics_without_colors_require_only_a_fabric() {
        let p = product(vec![fabric("Linen"), fabric("Velvet")], vec![]);

        assert!(!can_enquire(&p, &select(None, None)));
        assert!(can_enquire(&p, &select(Some("Linen"), None)));
        // A color selection neither helps nor hurts on a colorless product.
        assert!(!can_enquire(&p, &select(None, Some("Walnut"))));
        assert!(can_enquire(&p, &select(Some("Linen"), Some("Walnut"))));
    }

    #[test]
    fn both_kinds_configured_require_both_selections() {
        let p = product(vec![fabric("Linen")], vec![color("Walnut", "#8B5A2B")]);

        assert!(!can_enquire(&p, &select(None, None)));
        assert!(!can_enquire(&p, &select(Some("Linen"), None)));
        assert!(!can_enquire(&p, &select(None, Some("Walnut"))));
        assert!(can_enquire(&p, &select(Some("Linen"), Some("Walnut"))));
    }

    #[test]
    fn explain_block_names_the_missing_kind() {
        let both = product(vec![fabric("Linen")], vec![color("Walnut", "#8B5A2B")]);
        assert_eq!(explain_block(&both, &select(None, None)), SelectionBlock::NeedsBoth);
        assert_eq!(
            explain_block(&both, &select(Some("Linen"), None)),
            SelectionBlock::NeedsColor
        );
        assert_eq!(
            explain_block(&both, &select(None, Some("Walnut"))),
            SelectionBlock::NeedsFabric
        );
        assert_eq!(
            explain_block(&both, &select(Some("Linen"), Some("Walnut"))),
            SelectionBlock::None
        );
    }
}
