//! Hard-coded in-memory catalog.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::catalog::{Product, ProductSource};
use crate::error::CommerceError;
use crate::ids::ProductCode;
use crate::money::{Currency, Money, TaxRate};

/// A fixed product list searched linearly.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in demo assortment, priced from net with `rate` applied.
    pub fn demo(currency: Currency, rate: TaxRate) -> Self {
        let far = NaiveDate::from_ymd_opt(2036, 1, 1).unwrap_or_default();
        let past = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap_or_default();
        let items: [(&str, &str, i64, i64, NaiveDate); 8] = [
            ("7790360966841", "Yerba mate 1kg", 2_480_00, 40, far),
            ("7790070410139", "Leche entera 1l", 1_150_00, 120, far),
            ("7790580327019", "Dulce de leche 400g", 1_890_00, 25, far),
            ("7790387010022", "Galletitas de agua 300g", 990_00, 60, far),
            ("7791293008702", "Aceite de girasol 900ml", 2_150_00, 3, far),
            ("7790040133488", "Arroz largo fino 1kg", 1_320_00, 80, far),
            ("7790742036506", "Yogur bebible frutilla 1l", 1_640_00, 15, past),
            ("7790895000997", "Cafe molido 250g", 3_560_00, 0, far),
        ];
        Self::new(
            items
                .into_iter()
                .map(|(code, name, net_cents, stock, expires_on)| {
                    Product::from_net_price(
                        code,
                        name,
                        Money::new(net_cents, currency),
                        rate,
                        stock,
                        expires_on,
                    )
                })
                .collect(),
        )
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[async_trait(?Send)]
impl ProductSource for StaticCatalog {
    async fn search(&self, filter: &str) -> Result<Vec<Product>, CommerceError> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.matches(filter))
            .cloned()
            .collect())
    }

    async fn find(&self, code: &ProductCode) -> Result<Option<Product>, CommerceError> {
        Ok(self.products.iter().find(|p| &p.code == code).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_catalog_lookup() {
        let catalog = StaticCatalog::demo(Currency::ARS, TaxRate::IVA);
        let yerba = catalog
            .find(&ProductCode::new("7790360966841"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(yerba.name, "Yerba mate 1kg");
        assert_eq!(yerba.sale_price.amount_cents, 3_000_80);
    }

    #[tokio::test]
    async fn test_search_by_name_fragment() {
        let catalog = StaticCatalog::demo(Currency::ARS, TaxRate::IVA);
        let results = catalog.search("leche").await.unwrap();
        let names: Vec<_> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Leche entera 1l", "Dulce de leche 400g"]);
    }

    #[tokio::test]
    async fn test_find_requires_exact_code() {
        let catalog = StaticCatalog::demo(Currency::ARS, TaxRate::IVA);
        assert!(catalog.find(&ProductCode::new("779036")).await.unwrap().is_none());
    }
}
