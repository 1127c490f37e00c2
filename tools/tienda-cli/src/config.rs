//! CLI configuration.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use tienda_commerce::checkout::MIN_DELIVERY_DAYS;
use tienda_commerce::{Currency, TaxRate};
use tienda_data::{PriceApiConfig, DEFAULT_API_URL, DEFAULT_BRANCHES, DEFAULT_LIMIT};
use tienda_store::DEFAULT_CART_KEY;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["tienda.toml", ".tienda.toml", "tienda.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TiendaConfig {
    /// Where the cart is kept.
    #[serde(default)]
    pub store: StoreConfig,

    /// Where products come from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Currency and tax.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Delivery rules.
    #[serde(default)]
    pub shipping: ShippingConfig,
}

impl TiendaConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.pricing.currency)
            .ok_or_else(|| anyhow!("Unknown currency: {}", self.pricing.currency))
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::new(self.pricing.tax_rate_bp)
    }

    /// Settings for the remote pricing source.
    pub fn price_api(&self) -> Result<PriceApiConfig> {
        Ok(PriceApiConfig {
            base_url: self.catalog.api_url.clone(),
            branches: self.catalog.branches.clone(),
            limit: self.catalog.limit,
            currency: self.currency()?,
            tax_rate: self.tax_rate(),
            ..PriceApiConfig::default()
        })
    }

    /// Problems that make the config unusable, then ones worth a warning.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.store.dir.trim().is_empty() {
            errors.push("store.dir is required".to_string());
        }
        if self.store.key.trim().is_empty() {
            errors.push("store.key is required".to_string());
        }
        if Currency::from_code(&self.pricing.currency).is_none() {
            errors.push(format!("pricing.currency '{}' is not supported", self.pricing.currency));
        }
        if self.pricing.tax_rate_bp > 10_000 {
            errors.push("pricing.tax_rate_bp must be 0-10000".to_string());
        }
        if self.shipping.min_delivery_days < 0 {
            errors.push("shipping.min_delivery_days cannot be negative".to_string());
        }

        if self.catalog.source == CatalogSource::Api {
            if !self.catalog.api_url.starts_with("http://")
                && !self.catalog.api_url.starts_with("https://")
            {
                errors.push("catalog.api_url must be an http(s) URL".to_string());
            }
            if self.catalog.branches.is_empty() {
                warnings.push("catalog.branches is empty; the API may return no prices".to_string());
            }
            if self.catalog.limit == 0 {
                errors.push("catalog.limit must be at least 1".to_string());
            }
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Cart storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `<key>.json` (relative to the working directory).
    #[serde(default = "default_store_dir")]
    pub dir: String,

    /// Storage key of the cart.
    #[serde(default = "default_store_key")]
    pub key: String,
}

fn default_store_dir() -> String {
    ".tienda".to_string()
}

fn default_store_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            key: default_store_key(),
        }
    }
}

/// Product source selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Built-in demo products.
    #[default]
    Static,
    /// Remote pricing API.
    Api,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Static => write!(f, "static"),
            CatalogSource::Api => write!(f, "api"),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Branch ids queried for prices.
    #[serde(default = "default_branches")]
    pub branches: Vec<String>,

    /// Maximum results per search.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_branches() -> Vec<String> {
    DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::default(),
            api_url: default_api_url(),
            branches: default_branches(),
            limit: default_limit(),
        }
    }
}

/// Pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Tax rate in basis points (2100 = 21%).
    #[serde(default = "default_tax_rate_bp")]
    pub tax_rate_bp: u32,
}

fn default_currency() -> String {
    Currency::ARS.code().to_string()
}

fn default_tax_rate_bp() -> u32 {
    TaxRate::IVA.basis_points
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            tax_rate_bp: default_tax_rate_bp(),
        }
    }
}

/// Shipping configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// Earliest delivery, in days from today.
    #[serde(default = "default_min_delivery_days")]
    pub min_delivery_days: i64,
}

fn default_min_delivery_days() -> i64 {
    MIN_DELIVERY_DAYS
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            min_delivery_days: default_min_delivery_days(),
        }
    }
}

/// Generate a default tienda.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Tienda point-of-sale configuration

[store]
# Cart file: <dir>/<key>.json
dir = "{dir}"
key = "{key}"

[catalog]
# "static" uses the built-in products, "api" the remote pricing service
source = "static"
api_url = "{api_url}"
limit = {limit}
# branches = ["2011-1-23", "22-1-31"]

[pricing]
currency = "ARS"
tax_rate_bp = 2100

[shipping]
min_delivery_days = {min_days}
"#,
        dir = default_store_dir(),
        key = DEFAULT_CART_KEY,
        api_url = DEFAULT_API_URL,
        limit = DEFAULT_LIMIT,
        min_days = MIN_DELIVERY_DAYS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: TiendaConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, TiendaConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: TiendaConfig = toml::from_str(
            r#"
[catalog]
source = "api"
branches = ["1-1-1"]

[shipping]
min_delivery_days = 7
"#,
        )
        .unwrap();

        assert_eq!(config.catalog.source, CatalogSource::Api);
        assert_eq!(config.catalog.branches, vec!["1-1-1".to_string()]);
        assert_eq!(config.catalog.limit, 50);
        assert_eq!(config.shipping.min_delivery_days, 7);
        assert_eq!(config.store.key, "carrito");
        assert_eq!(config.tax_rate(), TaxRate::IVA);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tienda.json");
        let mut config = TiendaConfig::default();
        config.pricing.currency = "USD".to_string();

        config.save(&path).unwrap();
        let loaded = TiendaConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.currency().unwrap(), Currency::USD);
    }

    #[test]
    fn test_check_reports_errors() {
        let mut config = TiendaConfig::default();
        assert!(config.check().0.is_empty());

        config.pricing.currency = "XYZ".to_string();
        config.shipping.min_delivery_days = -1;
        let (errors, _) = config.check();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_check_accepts_api_source() {
        let mut config = TiendaConfig::default();
        config.catalog.source = CatalogSource::Api;
        assert_eq!(config.check(), (Vec::new(), Vec::new()));

        config.catalog.branches.clear();
        let (errors, warnings) = config.check();
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
