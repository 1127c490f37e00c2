//! Typed key-value persistence for Tienda.
//!
//! A [`KeyValueStore`] moves raw bytes; [`Cache`] adds JSON on top and
//! [`CartStore`] keeps the cart under a fixed key.
//!
//! | Backend | Target | Use |
//! |---------|--------|-----|
//! | [`FileStore`] | native | one `<key>.json` file per key |
//! | `SpinStore` | `wasm32` | Spin key-value store |
//! | [`MemoryStore`] | any | tests and throwaway sessions |
//!
//! # Example
//!
//! ```rust,ignore
//! use tienda_store::{CartStore, FileStore};
//!
//! let carts = CartStore::new(FileStore::new(".tienda"));
//! let mut cart = carts.load()?;
//! cart.add(product, 2)?;
//! carts.save(&cart)?;
//! ```

mod cart;
mod error;
mod file;
mod kv;
mod memory;

pub use cart::{CartStore, DEFAULT_CART_KEY};
pub use error::StoreError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

#[cfg(target_arch = "wasm32")]
pub use kv::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CartStore, FileStore, KeyValueStore, MemoryStore, StoreError};
}
