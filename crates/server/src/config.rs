use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Environment variable naming the configuration file (without extension is fine).
pub const CONFIG_PATH_ENV: &str = "OSM_OAUTH_FIXTURE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration build error: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Simulated account metadata shared by every profile the fixture answers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AccountConfig {
    /// RFC 3339 timestamp reported as `account_created`.
    #[serde(default = "default_account_created")]
    pub account_created: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            account_created: default_account_created(),
            description: String::new(),
            languages: default_languages(),
        }
    }
}

/// An identity registered at startup, before any handshake happens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SeedIdentity {
    pub id: String,
    pub display_name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Opaque secret returned alongside every token. Nothing verifies it.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub seed_identities: Vec<SeedIdentity>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            token_secret: default_token_secret(),
            account: AccountConfig::default(),
            seed_identities: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_addr.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "listen_addr {:?} is not a socket address: {e}",
                self.listen_addr
            ))
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;

        OffsetDateTime::parse(&self.account.account_created, &Rfc3339).map_err(|e| {
            ConfigError::Validation(format!(
                "account.account_created must be an RFC 3339 timestamp: {e}"
            ))
        })?;

        if let Some(seed) = self.seed_identities.iter().find(|s| s.id.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "seed identity {:?} has an empty id",
                seed.display_name
            )));
        }

        Ok(())
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:9000".to_string()
}

fn default_token_secret() -> String {
    "fixture-secret".to_string()
}

fn default_account_created() -> String {
    "2020-03-26T22:24:52Z".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en-US".to_string(), "en".to_string()]
}

/// Load configuration from an optional YAML file plus environment overrides.
///
/// Environment variables use the `FIXTURE` prefix and `__` as separator,
/// e.g. `FIXTURE__LISTEN_ADDR=127.0.0.1:9001`.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment, File};
    let cfg = Config::builder()
        .add_source(File::from(path.as_ref()).required(false))
        .add_source(Environment::default().prefix("FIXTURE").separator("__"))
        .build()?;

    let app: AppConfig = cfg.try_deserialize()?;
    app.validate()?;
    Ok(app)
}

/// Load configuration from `config.yaml`, or the file named by [`CONFIG_PATH_ENV`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.yaml".to_string());
    load_config_from(path)
}

/// Convenience helper for binaries wanting panic-on-error behaviour.
pub fn load_config_or_panic() -> AppConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => panic!("Failed to load configuration: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 9000);
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let config = AppConfig {
            listen_addr: "localhost".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_bad_account_created() {
        let config = AppConfig {
            account: AccountConfig {
                account_created: "yesterday".into(),
                ..AccountConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_seed_without_id() {
        let config = AppConfig {
            seed_identities: vec![SeedIdentity {
                id: String::new(),
                display_name: "john".into(),
            }],
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
