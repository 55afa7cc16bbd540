use crate::error::ConfigError;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use url::Url;

pub const ENV_SERVICE_URL: &str = "NEWSFEED_SERVICE_URL";
pub const ENV_API_KEY: &str = "NEWSFEED_API_KEY";
pub const ENV_BEARER_TOKEN: &str = "NEWSFEED_BEARER_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "NEWSFEED_TIMEOUT_SECS";

/// Connection settings for the hosted article service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// REST root, e.g. `https://project.example.co/rest/v1`.
    pub base_url: String,
    /// Sent as the `apikey` header.
    pub api_key: String,
    /// Sent as `Authorization: Bearer ...`; falls back to `api_key`.
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// No client-side timeout when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            bearer_token: None,
            request_timeout_secs: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = required_var(ENV_SERVICE_URL)?;
        let api_key = required_var(ENV_API_KEY)?;

        let mut config = Self::new(base_url, api_key);
        if let Ok(token) = env::var(ENV_BEARER_TOKEN) {
            config.bearer_token = Some(token);
        }
        if let Ok(raw) = env::var(ENV_TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                field: ENV_TIMEOUT_SECS.to_string(),
                value: raw.clone(),
            })?;
            config.request_timeout_secs = Some(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_key".to_string(),
            });
        }

        self.parsed_base_url()?;

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Base URL with a trailing slash, ready for `Url::join`.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            field: "base_url".to_string(),
            value: self.base_url.clone(),
        };

        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }
        Ok(url)
    }

    pub fn bearer_token(&self) -> &str {
        self.bearer_token.as_deref().unwrap_or(&self.api_key)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn required_var(var_name: &str) -> Result<String, ConfigError> {
    env::var(var_name).map_err(|_| ConfigError::MissingEnvironmentVariable {
        var_name: var_name.to_string(),
    })
}
