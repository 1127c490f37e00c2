//! Product type.

use crate::ids::ProductCode;
use crate::money::{self, Money, TaxRate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Field names on the wire follow the record shape the pricing source and
/// the persisted cart share (`codigo`, `nombre`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product code or barcode.
    #[serde(rename = "codigo")]
    pub code: ProductCode,
    /// Product name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Price before tax.
    #[serde(rename = "precioNeto", with = "money::decimal")]
    pub net_price: Money,
    /// Price with tax, as charged.
    #[serde(rename = "precioVenta", with = "money::decimal")]
    pub sale_price: Money,
    /// Units in stock.
    #[serde(rename = "existencia")]
    pub stock: i64,
    /// Last day the product may be sold.
    #[serde(rename = "vencimiento")]
    pub expires_on: NaiveDate,
}

impl Product {
    /// Create a product from its net price; the sale price adds `rate`.
    pub fn from_net_price(
        code: impl Into<ProductCode>,
        name: impl Into<String>,
        net_price: Money,
        rate: TaxRate,
        stock: i64,
        expires_on: NaiveDate,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            net_price,
            sale_price: net_price.with_tax(rate),
            stock,
            expires_on,
        }
    }

    /// Create a product from the price charged; the net price removes `rate`.
    pub fn from_sale_price(
        code: impl Into<ProductCode>,
        name: impl Into<String>,
        sale_price: Money,
        rate: TaxRate,
        stock: i64,
        expires_on: NaiveDate,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            net_price: sale_price.without_tax(rate),
            sale_price,
            stock,
            expires_on,
        }
    }

    /// Whether the product is past its expiry date on `today`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        today > self.expires_on
    }

    /// Days elapsed since expiry (zero or negative when still valid).
    pub fn days_expired(&self, today: NaiveDate) -> i64 {
        (today - self.expires_on).num_days()
    }

    /// Check if the name or code contains `needle` (case-insensitive).
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.code.as_str().to_lowercase().contains(&needle)
            || self.name.to_lowercase().contains(&needle)
    }
}
