//! Order receipts produced when a cart is finalized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine, CartTotals};
use crate::checkout::ShippingInfo;
use crate::error::CommerceError;
use crate::ids::OrderNumber;

/// A finalized order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingInfo>,
    pub totals: CartTotals,
}

impl Order {
    /// Build the order for `cart` without touching it.
    pub fn place(cart: &Cart, placed_at: DateTime<Utc>) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        Ok(Self {
            number: OrderNumber::from_timestamp(placed_at),
            placed_at,
            lines: cart.lines.clone(),
            shipping: cart.shipping.clone(),
            totals: cart.totals()?,
        })
    }

    /// Total units ordered.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

impl Cart {
    /// Finalize the cart: produce the order and empty the cart.
    pub fn checkout(&mut self, placed_at: DateTime<Utc>) -> Result<Order, CommerceError> {
        let order = Order::place(self, placed_at)?;
        tracing::info!(order = %order.number, lines = order.lines.len(), "order placed");
        self.clear();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::{Currency, Money, TaxRate};
    use chrono::{NaiveDate, TimeZone};

    fn placed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_cart_cannot_be_checked_out() {
        let mut cart = Cart::new();
        assert!(matches!(cart.checkout(placed_at()), Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_checkout_clears_cart_and_keeps_totals() {
        let mut cart = Cart::new();
        let product = Product::from_net_price(
            "A1",
            "Yerba",
            Money::new(10_000, Currency::ARS),
            TaxRate::IVA,
            50,
            NaiveDate::from_ymd_opt(2036, 1, 1).unwrap(),
        );
        cart.add(product, 3).unwrap();
        let expected = cart.totals().unwrap();

        let order = cart.checkout(placed_at()).unwrap();

        assert_eq!(order.totals, expected);
        assert_eq!(order.item_count(), 3);
        assert!(order.shipping.is_none());
        assert_eq!(order.number.as_str(), "PED-20261018-120000");
        assert!(cart.is_empty());
    }
}
