//! Effective-price and discount derivation, plus the write-time special-price
//! check used by the admin surface.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::Product;
use crate::error::{DomainError, DomainResult};

/// Returns the price actually shown for `product`: the special price when the
/// product is flagged special and a special price is set, else the base price.
#[must_use]
pub fn effective_price(product: &Product) -> Decimal {
    match product.special_price {
        Some(special) if product.is_special => special,
        _ => product.price,
    }
}

/// Returns the integer discount percentage in `[0, 100]`.
///
/// Zero unless the product is flagged special with a special price set;
/// otherwise `round(100 × (1 − special / price))`, with conventional
/// midpoint-away-from-zero rounding.
#[must_use]
pub fn discount_percent(product: &Product) -> u8 {
    let Some(special) = product.special_price else {
        return 0;
    };
    if !product.is_special || product.price <= Decimal::ZERO {
        return 0;
    }

    let fraction = Decimal::ONE - special / product.price;
    let percent = (fraction * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    percent.to_u8().unwrap_or(0).min(100)
}

/// The write-time invariant: a set special price must be strictly less than
/// the (positive) base price. Exposed as a reusable check so every admin
/// write path rejects the same inputs, not just the UI.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] naming the offending field.
pub fn validate_special_price(price: Decimal, special_price: Option<Decimal>) -> DomainResult<()> {
    if price <= Decimal::ZERO {
        return Err(DomainError::validation("price must be positive"));
    }
    if let Some(special) = special_price {
        if special <= Decimal::ZERO {
            return Err(DomainError::validation("special_price must be positive"));
        }
        if special >= price {
            return Err(DomainError::validation(
                "special_price must be strictly less than price",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;

    fn product(price: Decimal, is_special: bool, special_price: Option<Decimal>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Oak Sideboard".to_string(),
            description: None,
            price,
            category: "Storage".to_string(),
            stock: 1,
            images: vec![],
            is_special,
            special_price,
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
    fn non_special_product_keeps_base_price() {
        let p = product(dec!(100), false, None);
        assert_eq!(effective_price(&p), dec!(100));
        assert_eq!(discount_percent(&p), 0);
    }

    #[test]
    fn special_flag_without_special_price_keeps_base_price() {
        let p = product(dec!(100), true, None);
        assert_eq!(effective_price(&p), dec!(100));
        assert_eq!(discount_percent(&p), 0);
    }

    #[test]
    fn special_price_is_ignored_when_flag_is_off() {
        let p = product(dec!(100), false, Some(dec!(80)));
        assert_eq!(effective_price(&p), dec!(100));
        assert_eq!(discount_percent(&p), 0);
    }

    #[test]
    fn special_product_uses_special_price_and_discount() {
        let p = product(dec!(100), true, Some(dec!(80)));
        assert_eq!(effective_price(&p), dec!(80));
        assert_eq!(discount_percent(&p), 20);
    }

    #[test]
    fn discount_rounds_to_nearest_integer() {
        // 1 - 66.5/100 = 33.5% -> 34
        let p = product(dec!(100), true, Some(dec!(66.50)));
        assert_eq!(discount_percent(&p), 34);
        // 1 - 2/3 = 33.33..% -> 33
        let p = product(dec!(3), true, Some(dec!(2)));
        assert_eq!(discount_percent(&p), 33);
    }

    #[test]
    fn special_price_equal_to_price_is_rejected() {
        let err = validate_special_price(dec!(100), Some(dec!(100))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("special_price")));
    }

    #[test]
    fn special_price_above_price_is_rejected() {
        assert!(validate_special_price(dec!(100), Some(dec!(120))).is_err());
    }

    #[test]
    fn special_price_below_price_is_accepted() {
        assert!(validate_special_price(dec!(100), Some(dec!(99.99))).is_ok());
        assert!(validate_special_price(dec!(100), None).is_ok());
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        assert!(validate_special_price(dec!(0), None).is_err());
        assert!(validate_special_price(dec!(100), Some(dec!(0))).is_err());
    }
}
