//! # SDK Configuration
//!
//! Storefront connection settings. Read from `config/checkout.toml` when
//! present, then overridden by environment variables.

use checkout_core::{CheckoutError, CheckoutResult};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Log output format for the CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(CheckoutError::Configuration(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}

/// Checkout SDK configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Storefront origin, e.g. `https://store.example.com`
    pub storefront_url: String,

    /// Default request timeout in seconds (none if unset)
    pub request_timeout_secs: Option<u64>,

    pub log_format: LogFormat,
}

impl SdkConfig {
    /// Config file locations, relative to the working directory
    const CONFIG_PATHS: [&'static str; 3] = [
        "config/checkout.toml",
        "../config/checkout.toml",
        "../../config/checkout.toml",
    ];

    /// Load `config/checkout.toml` if it exists, then apply env overrides.
    ///
    /// Required (in the file or the environment):
    /// - `CHECKOUT_STOREFRONT_URL`
    ///
    /// Optional env vars:
    /// - `CHECKOUT_REQUEST_TIMEOUT_SECS`
    /// - `CHECKOUT_LOG_FORMAT` (`pretty` or `json`)
    pub fn load() -> CheckoutResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::load_from(Self::config_file(), |name| env::var(name).ok())
    }

    /// First config file found, searching upwards from the working directory
    pub fn config_file() -> Option<&'static str> {
        Self::CONFIG_PATHS
            .into_iter()
            .find(|path| Path::new(path).is_file())
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> CheckoutResult<Self> {
        toml::from_str(content)
            .map_err(|e| CheckoutError::Configuration(format!("Invalid checkout config: {}", e)))
    }

    fn load_from(
        path: Option<&str>,
        var: impl Fn(&str) -> Option<String>,
    ) -> CheckoutResult<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    CheckoutError::Configuration(format!("Failed to read {}: {}", path, e))
                })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };

        config.apply_vars(var)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> CheckoutResult<()> {
        if let Some(url) = var("CHECKOUT_STOREFRONT_URL") {
            self.storefront_url = url;
        }

        if let Some(secs) = var("CHECKOUT_REQUEST_TIMEOUT_SECS") {
            let secs = secs.parse().map_err(|_| {
                CheckoutError::Configuration(format!(
                    "CHECKOUT_REQUEST_TIMEOUT_SECS must be a number of seconds, got {}",
                    secs
                ))
            })?;
            self.request_timeout_secs = Some(secs);
        }

        if let Some(format) = var("CHECKOUT_LOG_FORMAT") {
            self.log_format = format.parse()?;
        }

        Ok(())
    }

    /// Check the storefront URL
    pub fn validate(&self) -> CheckoutResult<()> {
        if self.storefront_url.is_empty() {
            return Err(CheckoutError::Configuration(
                "CHECKOUT_STOREFRONT_URL not set".to_string(),
            ));
        }

        if !self.storefront_url.starts_with("http://") && !self.storefront_url.starts_with("https://")
        {
            return Err(CheckoutError::Configuration(format!(
                "Storefront URL must start with http:// or https://, got {}",
                self.storefront_url
            )));
        }

        if self.storefront_url.starts_with("http://") {
            warn!("Storefront URL is not using HTTPS");
        }

        Ok(())
    }

    /// Default request timeout
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Builder: set the storefront URL
    pub fn with_storefront_url(mut self, url: impl Into<String>) -> Self {
        self.storefront_url = url.into();
        self
    }
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            storefront_url: String::new(),
            request_timeout_secs: None,
            log_format: LogFormat::Pretty,
        }
    }
}
