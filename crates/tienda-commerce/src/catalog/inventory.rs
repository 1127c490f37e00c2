//! Stock and expiry checks run before a product goes into the cart.

use crate::catalog::Product;
use crate::error::CommerceError;
use chrono::NaiveDate;

/// Check that `product` can be sold in `quantity` units on `today`.
///
/// Stock must exceed the requested quantity; a product is sellable up to
/// and including its expiry date.
pub fn validate_for_sale(
    product: &Product,
    quantity: i64,
    today: NaiveDate,
) -> Result<(), CommerceError> {
    if product.stock <= quantity {
        return Err(CommerceError::InsufficientStock {
            code: product.code.to_string(),
            name: product.name.clone(),
            requested: quantity,
            available: product.stock,
        });
    }

    if product.is_expired_on(today) {
        return Err(CommerceError::ProductExpired {
            code: product.code.to_string(),
            name: product.name.clone(),
            days: product.days_expired(today),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money, TaxRate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn product(stock: i64, expires_on: NaiveDate) -> Product {
        Product::from_net_price(
            "A1",
            "Queso",
            Money::new(1_000, Currency::ARS),
            TaxRate::IVA,
            stock,
            expires_on,
        )
    }

    #[test]
    fn test_sellable_product_passes() {
        let p = product(10, today());
        assert!(validate_for_sale(&p, 9, today()).is_ok());
    }

    #[test]
    fn test_stock_equal_to_quantity_is_rejected() {
        let p = product(5, today());
        match validate_for_sale(&p, 5, today()) {
            Err(CommerceError::InsufficientStock {
                requested,
                available,
                ..
            }) => {
                assert_eq!(requested, 5);
                assert_eq!(available, 5);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_expired_yesterday_reports_one_day() {
        let yesterday = today().pred_opt().unwrap();
        let p = product(10, yesterday);
        match validate_for_sale(&p, 1, today()) {
            Err(CommerceError::ProductExpired { days, .. }) => assert_eq!(days, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_stock_checked_before_expiry() {
        let p = product(0, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert!(matches!(
            validate_for_sale(&p, 1, today()),
            Err(CommerceError::InsufficientStock { .. })
        ));
    }
}
