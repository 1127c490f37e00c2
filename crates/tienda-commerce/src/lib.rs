//! Point-of-sale domain types and logic for Tienda.
//!
//! - **Catalog**: products, stock/expiry checks, product sources
//! - **Cart**: lines, quantities, net/IVA/gross totals
//! - **Checkout**: shipping details, delivery date rule, order receipts
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tienda_commerce::prelude::*;
//!
//! let expires = NaiveDate::from_ymd_opt(2036, 1, 1).unwrap();
//! let product = Product::from_net_price(
//!     "7790360966841",
//!     "Yerba mate 1kg",
//!     Money::new(100_000, Currency::ARS),
//!     TaxRate::IVA,
//!     10,
//!     expires,
//! );
//!
//! let mut cart = Cart::new();
//! cart.add(product, 2).unwrap();
//!
//! let totals = cart.totals().unwrap();
//! assert_eq!(totals.total.display(), "$2420.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::{LineId, OrderNumber, ProductCode};
pub use money::{Currency, Money, TaxRate};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{LineId, OrderNumber, ProductCode};
    pub use crate::money::{Currency, Money, TaxRate};

    // Catalog
    pub use crate::catalog::{validate_for_sale, Catalog, Product, ProductSource, StaticCatalog};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartTotals, MAX_QUANTITY_PER_ITEM};

    // Checkout
    pub use crate::checkout::{Order, ShippingInfo, MIN_DELIVERY_DAYS};
}
