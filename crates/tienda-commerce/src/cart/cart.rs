//! Cart and cart line types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cart::CartTotals;
use crate::catalog::Product;
use crate::checkout::ShippingInfo;
use crate::error::CommerceError;
use crate::ids::{LineId, ProductCode};
use crate::money::{self, Currency, Money};

/// Maximum quantity allowed per line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart: ordered lines plus optional shipping info.
///
/// Serialized as `{ "productos": [...], "envio": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Lines in insertion order.
    #[serde(rename = "productos", default)]
    pub lines: Vec<CartLine>,
    /// Delivery details, when the order is to be shipped.
    #[serde(rename = "envio", default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingInfo>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currency of the cart's lines.
    pub fn currency(&self) -> Currency {
        self.lines
            .first()
            .map(|l| l.product.sale_price.currency)
            .unwrap_or_default()
    }

    /// Tag every stored price with `currency`.
    ///
    /// Persisted carts keep bare numbers, so a loaded cart has to be told
    /// which currency its prices are in.
    pub fn set_currency(&mut self, currency: Currency) {
        for line in &mut self.lines {
            line.product.net_price = line.product.net_price.in_currency(currency);
            line.product.sale_price = line.product.sale_price.in_currency(currency);
            line.total = line.total.in_currency(currency);
        }
    }

    /// Add `quantity` units of `product`.
    ///
    /// A product already in the cart gets its quantity increased instead of
    /// a second line. All lines share one currency.
    pub fn add(&mut self, product: Product, quantity: i64) -> Result<LineId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !self.is_empty() && product.sale_price.currency != self.currency() {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency().code().to_string(),
                got: product.sale_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.code == product.code) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            check_limit(new_quantity)?;

            existing.quantity = new_quantity;
            existing.update_total()?;
            tracing::debug!(line = %existing.id, code = %existing.product.code, quantity = new_quantity, "cart line increased");
            return Ok(existing.id);
        }

        check_limit(quantity)?;

        let line = CartLine::new(self.next_line_id(), product, quantity)?;
        let id = line.id;
        tracing::debug!(line = %id, code = %line.product.code, quantity, "cart line added");
        self.lines.push(line);
        Ok(id)
    }

    /// Set the quantity of a line. Zero removes the line.
    pub fn edit(&mut self, id: LineId, quantity: i64) -> Result<(), CommerceError> {
        if quantity < 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity == 0 {
            return if self.remove(id) {
                Ok(())
            } else {
                Err(CommerceError::LineNotFound(id.0))
            };
        }
        check_limit(quantity)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(CommerceError::LineNotFound(id.0))?;
        line.quantity = quantity;
        line.update_total()?;
        tracing::debug!(line = %id, quantity, "cart line edited");
        Ok(())
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, id: LineId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        let removed = self.lines.len() < len_before;
        if removed {
            tracing::debug!(line = %id, "cart line removed");
        }
        removed
    }

    /// Empty the cart, shipping info included.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.shipping = None;
        tracing::debug!("cart cleared");
    }

    /// Attach shipping info after checking its delivery date.
    pub fn set_shipping(
        &mut self,
        info: ShippingInfo,
        today: NaiveDate,
        min_days: i64,
    ) -> Result<(), CommerceError> {
        info.validate_delivery_date(today, min_days)?;
        self.shipping = Some(info);
        Ok(())
    }

    /// Drop shipping info. Returns whether there was any.
    pub fn clear_shipping(&mut self) -> bool {
        self.shipping.take().is_some()
    }

    pub fn line(&self, id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn line_by_code(&self, code: &ProductCode) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Net, IVA and gross totals.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        CartTotals::from_lines(&self.lines, self.currency())
    }

    fn next_line_id(&self) -> LineId {
        LineId(self.lines.iter().map(|l| l.id.0).max().unwrap_or(0) + 1)
    }
}

fn check_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

/// One product with quantity in the cart.
///
/// The product record is stored flattened next to `id`, `cantidad` and
/// `total`, matching the persisted cart format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: LineId,
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    /// Sale price times quantity, rounded to whole units.
    #[serde(with = "money::decimal")]
    pub total: Money,
}

impl CartLine {
    pub fn new(id: LineId, product: Product, quantity: i64) -> Result<Self, CommerceError> {
        let total = line_total(&product, quantity)?;
        Ok(Self {
            id,
            product,
            quantity,
            total,
        })
    }

    /// Recompute the total after a quantity change.
    pub fn update_total(&mut self) -> Result<(), CommerceError> {
        self.total = line_total(&self.product, self.quantity)?;
        Ok(())
    }

    /// Net price times quantity, unrounded.
    pub fn net_total(&self) -> Result<Money, CommerceError> {
        self.product
            .net_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

fn line_total(product: &Product, quantity: i64) -> Result<Money, CommerceError> {
    Ok(product
        .sale_price
        .try_multiply(quantity)
        .ok_or(CommerceError::Overflow)?
        .round_to_unit())
}
