//! Pure catalog filtering over a fetched snapshot.
//!
//! Categories are discovered from the live product set rather than a managed
//! taxonomy, so the filter controls always reflect exactly what is on sale.

use std::collections::HashSet;

use crate::catalog::Product;

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Returns the products whose category equals `category` exactly
/// (case-sensitive). The sentinel [`ALL_CATEGORIES`] passes the input
/// through unchanged, in the same order. Unknown categories yield an empty
/// result, never an error.
#[must_use]
pub fn by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    if category == ALL_CATEGORIES {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.category == category).collect()
}

/// Returns the products flagged special, regardless of category.
#[must_use]
pub fn sale_only(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_special).collect()
}

/// Returns the products flagged for the featured shelf on the home page.
#[must_use]
pub fn featured_only(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_featured).collect()
}

/// Returns the distinct category names with [`ALL_CATEGORIES`] always first.
///
/// Beyond "All", order is first-occurrence order over the input, not
/// alphabetical — matching what the filter buttons have always shown.
#[must_use]
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if seen.insert(product.category.as_str()) {
            categories.push(product.category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;

    fn product(name: &str, category: &str, is_special: bool, is_featured: bool) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price: dec!(250.00),
            category: category.to_string(),
            stock: 1,
            images: vec![],
            is_special,
            special_price: None,
            is_featured,
            fabrics: vec![],
            colors: vec![],
            sizes: vec![],
            reviews: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("Field Sofa", "Sofas", true, true),
            product("Dune Chair", "Chairs", false, false),
            product("Ridge Sofa", "Sofas", false, false),
            product("Slat Bench", "Benches", true, false),
            product("Arc Lamp", "Lighting", false, false),
        ]
    }

    #[test]
    fn by_category_matches_exactly() {
        let products = catalog();
        let sofas = by_category(&products, "Sofas");
        assert_eq!(sofas.len(), 2);
        assert!(sofas.iter().all(|p| p.category == "Sofas"));
    }

    #[test]
    fn by_category_is_case_sensitive() {
        let products = catalog();
        assert!(by_category(&products, "sofas").is_empty());
    }

    #[test]
    fn all_sentinel_passes_input_through_in_order() {
        let products = catalog();
        let all = by_category(&products, ALL_CATEGORIES);
        assert_eq!(all.len(), products.len());
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Field Sofa", "Dune Chair", "Ridge Sofa", "Slat Bench", "Arc Lamp"]
        );
    }

    #[test]
    fn unknown_category_yields_empty_result() {
        let products = catalog();
        assert!(by_category(&products, "Rugs").is_empty());
        assert!(by_category(&[], "Sofas").is_empty());
    }

    #[test]
    fn sale_only_picks_special_products_across_categories() {
        let products = catalog();
        let sale = sale_only(&products);
        assert_eq!(sale.len(), 2);
        let names: Vec<&str> = sale.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Field Sofa", "Slat Bench"]);
    }

    #[test]
    fn featured_only_picks_the_featured_shelf() {
        let products = catalog();
        let featured = featured_only(&products);
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].name, "Field Sofa");
    }

    #[test]
    fn distinct_categories_keep_first_occurrence_order() {
        let products = catalog();
        assert_eq!(
            distinct_categories(&products),
            vec!["All", "Sofas", "Chairs", "Benches", "Lighting"]
        );
    }

    #[test]
    fn distinct_categories_of_empty_catalog_is_just_all() {
        assert_eq!(distinct_categories(&[]), vec!["All"]);
    }
}
