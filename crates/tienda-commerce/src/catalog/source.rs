//! Product sources and the catalog service on top of them.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::catalog::{validate_for_sale, Product};
use crate::error::CommerceError;
use crate::ids::ProductCode;

/// Minimum number of characters for a free-text search.
pub const MIN_SEARCH_LEN: usize = 3;

/// Somewhere products come from: an in-memory list or a remote pricing API.
#[async_trait(?Send)]
pub trait ProductSource {
    /// Free-text search by code or name.
    async fn search(&self, filter: &str) -> Result<Vec<Product>, CommerceError>;

    /// Find a product by exact code.
    ///
    /// The default searches by the code and keeps the first exact match.
    async fn find(&self, code: &ProductCode) -> Result<Option<Product>, CommerceError> {
        let results = self.search(code.as_str()).await?;
        Ok(results.into_iter().find(|p| &p.code == code))
    }
}

/// Product lookups and sale checks over a [`ProductSource`].
pub struct Catalog<S> {
    source: S,
}

impl<S: ProductSource> Catalog<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Search products; needs at least [`MIN_SEARCH_LEN`] non-blank characters.
    pub async fn search(&self, text: &str) -> Result<Vec<Product>, CommerceError> {
        let text = text.trim();
        if text.chars().count() < MIN_SEARCH_LEN {
            return Err(CommerceError::ValidationError(format!(
                "search needs at least {} characters",
                MIN_SEARCH_LEN
            )));
        }
        let results = self.source.search(text).await?;
        tracing::debug!(filter = text, results = results.len(), "catalog search");
        Ok(results)
    }

    /// Look up a product by code.
    pub async fn lookup(&self, code: &ProductCode) -> Result<Product, CommerceError> {
        self.source
            .find(code)
            .await?
            .ok_or_else(|| CommerceError::ProductNotFound(code.to_string()))
    }

    /// Look up a product and check it can be sold in `quantity` units today.
    pub async fn validate(
        &self,
        code: &ProductCode,
        quantity: i64,
        today: NaiveDate,
    ) -> Result<Product, CommerceError> {
        let product = self.lookup(code).await?;
        validate_for_sale(&product, quantity, today)?;
        Ok(product)
    }
}

#[async_trait(?Send)]
impl<T: ProductSource + ?Sized> ProductSource for Box<T> {
    async fn search(&self, filter: &str) -> Result<Vec<Product>, CommerceError> {
        (**self).search(filter).await
    }

    async fn find(&self, code: &ProductCode) -> Result<Option<Product>, CommerceError> {
        (**self).find(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::money::{Currency, Money, TaxRate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn catalog() -> Catalog<StaticCatalog> {
        let expires = NaiveDate::from_ymd_opt(2036, 1, 1).unwrap();
        Catalog::new(StaticCatalog::new(vec![
            Product::from_net_price(
                "A1",
                "Yerba mate",
                Money::new(100_000, Currency::ARS),
                TaxRate::IVA,
                10,
                expires,
            ),
            Product::from_net_price(
                "A2",
                "Mate cocido",
                Money::new(50_000, Currency::ARS),
                TaxRate::IVA,
                0,
                expires,
            ),
        ]))
    }

    #[tokio::test]
    async fn test_lookup_missing_code_is_not_found() {
        let err = catalog().lookup(&ProductCode::new("ZZ")).await.unwrap_err();
        assert!(matches!(err, CommerceError::ProductNotFound(ref c) if c == "ZZ"));
        assert_eq!(err.to_string(), "Product ZZ not found");
    }

    #[tokio::test]
    async fn test_search_requires_three_characters() {
        let err = catalog().search("  ma ").await.unwrap_err();
        assert!(matches!(err, CommerceError::ValidationError(_)));

        let results = catalog().search("mate").await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_validate_rejects_out_of_stock() {
        let err = catalog()
            .validate(&ProductCode::new("A2"), 1, today())
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::InsufficientStock { .. }));

        let ok = catalog()
            .validate(&ProductCode::new("A1"), 2, today())
            .await
            .unwrap();
        assert_eq!(ok.name, "Yerba mate");
    }

    struct SearchOnly(Vec<Product>);

    #[async_trait(?Send)]
    impl ProductSource for SearchOnly {
        async fn search(&self, _filter: &str) -> Result<Vec<Product>, CommerceError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_default_find_takes_first_exact_match() {
        let all = catalog().source.products().to_vec();
        let source = SearchOnly(all);
        let found = source.find(&ProductCode::new("A2")).await.unwrap();
        assert_eq!(found.unwrap().name, "Mate cocido");
        assert!(source.find(&ProductCode::new("A")).await.unwrap().is_none());
    }
}
