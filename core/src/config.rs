//! Client configuration.
//!
//! Values come from an optional `house-client.toml`, then `HOUSE_API_*`
//! environment variables (a `.env` file is read first). Every field has a
//! default, so an empty environment yields a working local setup.

use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::RequestContext;

pub const DEFAULT_CONFIG_FILE: &str = "house-client";
pub const ENV_PREFIX: &str = "HOUSE_API";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

impl ClientConfig {
    /// Load from `.env`, `house-client.toml` and the environment.
    pub fn load() -> Result<Self, ApiError> {
        dotenv::dotenv().ok();
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from the named config file (extension optional, file optional)
    /// overlaid with the environment.
    pub fn load_from(path: &str) -> Result<Self, ApiError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, ApiError> {
        let config: ClientConfig = settings.try_deserialize()?;
        if config.timeout_secs == 0 {
            return Err(ApiError::Config("timeout_secs must be positive".to_string()));
        }
        tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "loaded client config");
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn context(&self) -> RequestContext {
        match &self.token {
            Some(token) => RequestContext::with_token(token.clone()),
            None => RequestContext::anonymous(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use super::*;
    use config::FileFormat;

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 3] = ["HOUSE_API_BASE_URL", "HOUSE_API_TIMEOUT_SECS", "HOUSE_API_TOKEN"];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    fn from_toml(toml: &str) -> Result<ClientConfig, ApiError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        ClientConfig::from_settings(settings)
    }

    #[test]
    fn empty_source_uses_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.context(), RequestContext::anonymous());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = from_toml(
            r#"
            base_url = "https://houses.example.com/prod-api"
            timeout_secs = 5
            token = "alice"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://houses.example.com/prod-api");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.context().token(), Some("alice"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = from_toml("timeout_secs = 0").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn wrong_type_is_config_error() {
        let err = from_toml(r#"timeout_secs = "soon""#).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn environment_fills_in_when_file_is_missing() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clear_env();
        std::env::set_var("HOUSE_API_BASE_URL", "http://houses.internal:9000");
        std::env::set_var("HOUSE_API_TIMEOUT_SECS", "5");
        std::env::set_var("HOUSE_API_TOKEN", "12345");

        let loaded = ClientConfig::load_from("does-not-exist");
        clear_env();

        assert_eq!(
            loaded.unwrap(),
            ClientConfig {
                base_url: "http://houses.internal:9000".to_string(),
                timeout_secs: 5,
                token: Some("12345".to_string()),
            }
        );
    }

    #[test]
    fn environment_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "base_url = \"https://houses.example.com\"\ntimeout_secs = 7\ntoken = \"from-file\""
        )
        .unwrap();
        std::env::set_var("HOUSE_API_TOKEN", "from-env");

        let loaded = ClientConfig::load_from(file.path().to_str().unwrap());
        clear_env();

        let config = loaded.unwrap();
        assert_eq!(config.base_url, "https://houses.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(7));
        assert_eq!(config.context().token(), Some("from-env"));
    }
}
