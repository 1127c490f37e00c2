//! Product source backed by the public "Precios Claros" pricing API.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use tienda_commerce::catalog::{Product, ProductSource};
use tienda_commerce::{CommerceError, Currency, Money, ProductCode, TaxRate};

use crate::{FetchClient, Request};

/// Base URL of the pricing API.
pub const DEFAULT_API_URL: &str = "https://d3e6htiiul5ek9.cloudfront.net/prod";

/// Branches whose prices are queried.
pub const DEFAULT_BRANCHES: &[&str] = &[
    "2011-1-23", "22-1-31", "22-1-3", "2011-1-70", "22-1-17", "19-1-00812", "2008-1-643",
    "2011-1-289", "22-1-20", "2003-1-7550", "12-1-97", "19-1-03296", "22-1-18", "12-1-99",
    "22-1-6", "23-1-6260", "22-1-16", "22-1-24", "19-1-00973", "22-1-1", "10-1-268", "10-1-33",
    "23-1-6262", "10-1-32", "19-1-00983", "2003-2-10080", "2011-1-83", "2003-1-7290",
    "2011-1-115", "12-1-95",
];

/// Maximum results per query.
pub const DEFAULT_LIMIT: u32 = 50;

/// Settings for [`PriceApiSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceApiConfig {
    pub base_url: String,
    pub branches: Vec<String>,
    pub limit: u32,
    pub currency: Currency,
    /// Rate used to derive net prices from the API's final prices.
    pub tax_rate: TaxRate,
    /// The API has no expiry data; every product gets this date.
    pub expires_on: NaiveDate,
}

impl Default for PriceApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            branches: DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect(),
            limit: DEFAULT_LIMIT,
            currency: Currency::ARS,
            tax_rate: TaxRate::IVA,
            expires_on: NaiveDate::from_ymd_opt(2036, 1, 1).unwrap_or(NaiveDate::MAX),
        }
    }
}

/// Remote product source.
///
/// Barcodes go to the single-product endpoint, anything else to the
/// free-text search endpoint.
pub struct PriceApiSource {
    client: FetchClient,
    config: PriceApiConfig,
}

impl PriceApiSource {
    /// Create a source on the target's default transport.
    pub fn new(config: PriceApiConfig) -> Self {
        Self::with_client(FetchClient::new(), config)
    }

    pub fn with_client(client: FetchClient, config: PriceApiConfig) -> Self {
        let client = client
            .with_base_url(config.base_url.clone())
            .with_default_header("Accept", "application/json");
        Self { client, config }
    }

    pub fn config(&self) -> &PriceApiConfig {
        &self.config
    }

    /// Build the query for `filter`.
    pub fn search_request(&self, filter: &str) -> Request {
        let filter = filter.trim();
        let request = if ProductCode::new(filter).is_barcode() {
            self.client.get("producto").query("id_producto", filter)
        } else {
            self.client.get("productos").query("string", filter)
        };
        request
            .query("array_sucursales", self.config.branches.join(","))
            .query("limit", self.config.limit.to_string())
    }

    fn to_product(&self, record: ApiProduct) -> Option<Product> {
        let Some(price) = record.precio_min.as_ref().and_then(ApiNumber::as_f64) else {
            tracing::debug!(code = %record.id, "skipping product without price");
            return None;
        };
        Some(Product::from_sale_price(
            record.id,
            record.nombre,
            Money::from_decimal(price, self.config.currency),
            self.config.tax_rate,
            record.cant_sucursales_disponible,
            self.config.expires_on,
        ))
    }
}

#[async_trait(?Send)]
impl ProductSource for PriceApiSource {
    async fn search(&self, filter: &str) -> Result<Vec<Product>, CommerceError> {
        let request = self.search_request(filter);
        let envelope: Envelope = self.client.get_json(&request).await.map_err(|e| {
            tracing::warn!(error = %e, "pricing service call failed");
            CommerceError::from(e)
        })?;

        let products: Vec<Product> = envelope
            .into_records()
            .into_iter()
            .filter_map(|r| self.to_product(r))
            .collect();
        tracing::debug!(filter, results = products.len(), "pricing service search");
        Ok(products)
    }
}

/// Response body: a single `producto` or a `productos` list.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    producto: Option<OneOrMany>,
    #[serde(default)]
    productos: Option<OneOrMany>,
}

impl Envelope {
    fn into_records(self) -> Vec<ApiProduct> {
        match self.producto.or(self.productos) {
            Some(OneOrMany::Many(records)) => records,
            Some(OneOrMany::One(record)) => vec![record],
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ApiProduct>),
    One(ApiProduct),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiProduct {
    id: String,
    nombre: String,
    #[serde(default)]
    precio_min: Option<ApiNumber>,
    #[serde(default)]
    cant_sucursales_disponible: i64,
}

/// Prices arrive as numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiNumber {
    Number(f64),
    Text(String),
}

impl ApiNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            ApiNumber::Number(n) => Some(*n),
            ApiNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}
