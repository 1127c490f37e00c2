//! Persistence of the single shopping cart.

use tienda_commerce::cart::Cart;
use tienda_commerce::Currency;

use crate::{Cache, KeyValueStore, StoreError};

/// Storage key of the cart blob.
pub const DEFAULT_CART_KEY: &str = "carrito";

/// Loads and saves the cart as one JSON blob under a fixed key.
///
/// # Example
///
/// ```rust
/// use tienda_store::{CartStore, MemoryStore};
///
/// let carts = CartStore::new(MemoryStore::new());
/// let cart = carts.load().unwrap();
/// assert!(cart.is_empty());
/// ```
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    currency: Currency,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CART_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
            currency: Currency::default(),
        }
    }

    /// Currency the stored prices are in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// The saved cart, or an empty one if nothing was saved yet.
    pub fn load(&self) -> Result<Cart, StoreError> {
        let mut cart = self.cache.get::<Cart>(&self.key)?.unwrap_or_default();
        cart.set_currency(self.currency);
        tracing::debug!(key = %self.key, lines = cart.lines.len(), "loaded cart");
        Ok(cart)
    }

    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.cache.set(&self.key, cart)?;
        tracing::debug!(key = %self.key, lines = cart.lines.len(), "saved cart");
        Ok(())
    }

    /// Replace the saved cart with an empty one.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.save(&Cart::default())
    }

    /// Load the cart, apply `f` and save the result if `f` succeeds.
    ///
    /// A failing `f` leaves the stored cart untouched.
    pub fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Cart) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut cart = self.load()?;
        let value = f(&mut cart)?;
        self.save(&cart)?;
        Ok(value)
    }
}
