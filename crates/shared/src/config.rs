//! Application configuration management.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::money::DEFAULT_CURRENCY_PRECISION;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Global accounting switches that change how reports read the ledger.
    #[serde(default)]
    pub accounts: AccountsSettings,
    /// Currency display configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Accounting settings read once per report run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct AccountsSettings {
    /// Treat opening-flagged ledger entries like any other entry.
    #[serde(default)]
    pub ignore_is_opening_check_for_reporting: bool,
    /// Never read period-closing snapshots; always replay the raw ledger.
    #[serde(default)]
    pub ignore_account_closing_balance: bool,
}

/// Currency configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Decimal places for currencies without an override.
    #[serde(default = "default_precision")]
    pub default_precision: u32,
    /// Per-currency decimal places, keyed by ISO 4217 code.
    #[serde(default)]
    pub precision: BTreeMap<String, u32>,
}

fn default_precision() -> u32 {
    DEFAULT_CURRENCY_PRECISION
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_precision: default_precision(),
            precision: BTreeMap::new(),
        }
    }
}

impl CurrencyConfig {
    /// Returns the configured decimal places for a currency.
    #[must_use]
    pub fn precision_for(&self, currency: &str) -> u32 {
        self.precision
            .get(&currency.to_uppercase())
            .copied()
            .unwrap_or(self.default_precision)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "ledgerbal=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERBAL").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
