//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::NaiveDate;

use tienda_commerce::catalog::{Catalog, ProductSource, StaticCatalog};
use tienda_data::PriceApiSource;
use tienda_store::{CartStore, FileStore};

use crate::config::{CatalogSource, TiendaConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: TiendaConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Local calendar date used by stock, expiry and delivery rules.
    pub today: NaiveDate,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (TiendaConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (TiendaConfig::load(&path)?, Some(path)),
                None => (TiendaConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            today: chrono::Local::now().date_naive(),
        })
    }

    /// Directory holding the cart file.
    pub fn store_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.store.dir)
    }

    /// The persisted cart, priced in the configured currency.
    pub fn cart_store(&self) -> Result<CartStore<FileStore>> {
        Ok(
            CartStore::with_key(FileStore::new(self.store_dir()), self.config.store.key.clone())
                .with_currency(self.config.currency()?),
        )
    }

    /// The configured product catalog.
    pub fn catalog(&self) -> Result<Catalog<Box<dyn ProductSource>>> {
        let source: Box<dyn ProductSource> = match self.config.catalog.source {
            CatalogSource::Static => Box::new(StaticCatalog::demo(
                self.config.currency()?,
                self.config.tax_rate(),
            )),
            CatalogSource::Api => Box::new(PriceApiSource::new(self.config.price_api()?)),
        };
        Ok(Catalog::new(source))
    }

    pub fn min_delivery_days(&self) -> i64 {
        self.config.shipping.min_delivery_days
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or one of its parents.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_config(&nested), None);

        std::fs::write(root.path().join("tienda.toml"), "").unwrap();
        assert_eq!(find_config(&nested), Some(root.path().join("tienda.toml")));
    }

    #[test]
    fn test_cart_store_uses_configured_currency() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TiendaConfig::default();
        config.pricing.currency = "USD".to_string();
        let ctx = Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
            today: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        };

        let store = ctx.cart_store().unwrap();
        let product = StaticCatalog::demo(tienda_commerce::Currency::USD, ctx.config.tax_rate())
            .products()[0]
            .clone();
        store
            .update(|cart| -> Result<(), tienda_commerce::CommerceError> {
                cart.add(product, 1)?;
                Ok(())
            })
            .unwrap();

        let cart = ctx.cart_store().unwrap().load().unwrap();
        assert_eq!(cart.currency(), tienda_commerce::Currency::USD);
        assert!(dir.path().join(".tienda").join("carrito.json").is_file());
    }

    #[test]
    fn test_nearest_config_wins() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("tienda.toml"), "").unwrap();
        std::fs::write(nested.join(".tienda.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join(".tienda.toml")));
    }
}
