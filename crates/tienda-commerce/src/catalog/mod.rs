//! Product catalog module.
//!
//! Contains the product type, sale checks, product sources and the
//! in-memory catalog.

mod inventory;
mod memory;
mod product;
mod source;

pub use inventory::validate_for_sale;
pub use memory::StaticCatalog;
pub use product::Product;
pub use source::{Catalog, ProductSource, MIN_SEARCH_LEN};
