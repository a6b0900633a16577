//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Tax form selection.
    #[serde(default)]
    pub tax: TaxConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Which tax form version drives the field calculator.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// Form code, e.g. `"200"`.
    #[serde(default = "default_form_code")]
    pub form_code: String,
    /// Form version number, e.g. `"6"`.
    #[serde(default = "default_version_number")]
    pub version_number: String,
}

fn default_form_code() -> String {
    "200".to_string()
}

fn default_version_number() -> String {
    "6".to_string()
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            form_code: default_form_code(),
            version_number: default_version_number(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "contab=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default.toml`,
    /// `config/{RUN_MODE}.toml`, then `CONTAB__SECTION__KEY` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CONTAB").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("CONTAB__DATABASE__URL", Some("postgres://localhost/contab_test")),
                ("CONTAB__TAX__FORM_CODE", Some("210")),
                ("RUN_MODE", Some("test")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/contab_test");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.min_connections, 1);
                assert_eq!(config.tax.form_code, "210");
                assert_eq!(config.tax.version_number, "6");
                assert_eq!(config.logging.filter, "contab=info");
                assert!(!config.logging.json);
            },
        );
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        temp_env::with_vars(
            [
                ("CONTAB__DATABASE__URL", None::<&str>),
                ("RUN_MODE", Some("test")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }

    #[test]
    fn test_tax_defaults() {
        let tax = TaxConfig::default();
        assert_eq!(tax.form_code, "200");
        assert_eq!(tax.version_number, "6");
    }
}
