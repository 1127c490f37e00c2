//! Shopping cart module.
//!
//! Contains the cart, its lines and totals.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine, MAX_QUANTITY_PER_ITEM};
pub use pricing::CartTotals;
