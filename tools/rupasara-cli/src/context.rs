//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use rupasara_cache::Cache;
use rupasara_commerce::catalog::CatalogIndex;
use rupasara_commerce::checkout::{HttpIntake, OrderPipeline};
use rupasara_commerce::currency::{CurrencyService, HttpRateSource};
use rupasara_data::FetchClient;

use crate::config::StorefrontConfig;
use crate::output::Output;

/// Name of the preferences file inside the state directory.
const PREFERENCES_FILE: &str = "preferences.json";

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration, with environment overrides applied.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = if let Some(path) = config_path {
            StorefrontConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };
        config.apply_env();

        Ok(Self {
            config,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<StorefrontConfig> {
        let config_names = ["rupasara.toml", ".rupasara.toml", "rupasara.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    match StorefrontConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
                        Err(e) => tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "skipping config file"
                        ),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Directory holding client-local state.
    pub fn state_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.state_dir)
    }

    /// The persisted preference store.
    pub fn preferences(&self) -> Result<Cache> {
        let path = self.state_dir().join(PREFERENCES_FILE);
        Cache::open(&path)
            .with_context(|| format!("Failed to open preferences at {}", path.display()))
    }

    /// The built-in catalog.
    pub fn catalog(&self) -> Result<CatalogIndex> {
        CatalogIndex::builtin().context("Failed to load the built-in catalog")
    }

    /// Currency service restored from the stored preference.
    pub fn currency_service(&self) -> Result<CurrencyService> {
        Ok(CurrencyService::new(self.preferences()?))
    }

    /// HTTP client with the configured timeout.
    pub fn http_client(&self) -> Result<FetchClient> {
        let timeout = Duration::from_secs(self.config.rates.timeout_secs.max(1));
        FetchClient::with_timeout(timeout).context("Failed to build HTTP client")
    }

    /// Rate source for the configured endpoint.
    pub fn rate_source(&self) -> Result<Arc<HttpRateSource>> {
        Ok(Arc::new(HttpRateSource::new(
            self.http_client()?,
            self.config.rates.url.clone(),
        )))
    }

    /// Order pipeline for the configured intake, unconfigured if there is none.
    pub fn order_pipeline(&self) -> Result<OrderPipeline> {
        match self.config.intake.endpoint() {
            Some(url) => Ok(OrderPipeline::new(Arc::new(HttpIntake::new(
                self.http_client()?,
                url,
            )))),
            None => Ok(OrderPipeline::unconfigured()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path) -> Context {
        Context {
            config: StorefrontConfig::default(),
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_state_dir_is_relative_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        assert_eq!(ctx.state_dir(), dir.path().join(".rupasara"));
    }

    #[test]
    fn test_currency_preference_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        ctx.currency_service()
            .unwrap()
            .set_currency(rupasara_commerce::Currency::EUR);

        let restored = ctx.currency_service().unwrap();
        assert_eq!(restored.currency(), rupasara_commerce::Currency::EUR);
        assert!(dir.path().join(".rupasara").join(PREFERENCES_FILE).exists());
    }

    #[test]
    fn test_pipeline_follows_intake_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(dir.path());
        assert!(!ctx.order_pipeline().unwrap().is_configured());

        ctx.config.intake.url = Some("https://intake.example/hook".into());
        assert!(ctx.order_pipeline().unwrap().is_configured());
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rupasara.toml"),
            "[messaging]\nwhatsapp_number = \"910000000000\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Context::find_config(&nested).unwrap();
        assert_eq!(config.messaging.whatsapp_number, "910000000000");
    }
}
