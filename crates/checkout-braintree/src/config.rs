//! # Braintree Configuration
//!
//! Where the Braintree web SDK is served from and which version to load.
//! Defaults match the version the SDK is tested against; both can be
//! overridden from the environment.

use checkout_core::{CheckoutError, ScriptSource};
use serde::Deserialize;
use std::env;

/// Default CDN host for the Braintree web SDK
pub const DEFAULT_CDN_HOST: &str = "js.braintreegateway.com";

/// Default Braintree web SDK version
pub const DEFAULT_SDK_VERSION: &str = "3.15.0";

/// Global namespace the Braintree scripts attach to
pub const DEFAULT_NAMESPACE: &str = "braintree";

/// A Braintree web SDK module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BraintreeLibrary {
    /// `braintree.client`, required by every other module
    Client,
    /// `braintree.threeDSecure`
    ThreeDSecure,
    /// `braintree.dataCollector` (device data for fraud checks)
    DataCollector,
}

impl BraintreeLibrary {
    pub const ALL: [BraintreeLibrary; 3] = [
        BraintreeLibrary::Client,
        BraintreeLibrary::ThreeDSecure,
        BraintreeLibrary::DataCollector,
    ];

    /// Look up a module by its CDN file name (`client`, `three-d-secure`...)
    pub fn from_module_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|library| library.module_name() == name)
    }

    /// File name of the module on the CDN (without `.min.js`)
    pub fn module_name(&self) -> &'static str {
        match self {
            BraintreeLibrary::Client => "client",
            BraintreeLibrary::ThreeDSecure => "three-d-secure",
            BraintreeLibrary::DataCollector => "data-collector",
        }
    }

    /// Property the module attaches under the `braintree` namespace
    pub fn export_name(&self) -> &'static str {
        match self {
            BraintreeLibrary::Client => "client",
            BraintreeLibrary::ThreeDSecure => "threeDSecure",
            BraintreeLibrary::DataCollector => "dataCollector",
        }
    }
}

/// Braintree web SDK configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BraintreeConfig {
    /// CDN host (no scheme, URLs are protocol-relative)
    pub cdn_host: String,

    /// Web SDK version, e.g. `3.15.0`
    pub sdk_version: String,

    /// Global namespace the scripts attach to
    pub namespace: String,
}

impl BraintreeConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `BRAINTREE_CDN_HOST`
    /// - `BRAINTREE_SDK_VERSION`
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mut config = Self::default();

        if let Ok(host) = env::var("BRAINTREE_CDN_HOST") {
            config.cdn_host = host;
        }
        if let Ok(version) = env::var("BRAINTREE_SDK_VERSION") {
            config.sdk_version = version;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check host and version formats
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.cdn_host.is_empty() || self.cdn_host.contains("://") {
            return Err(CheckoutError::Configuration(
                "BRAINTREE_CDN_HOST must be a bare host name".to_string(),
            ));
        }

        let is_semver = self.sdk_version.split('.').count() == 3
            && self
                .sdk_version
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
        if !is_semver {
            return Err(CheckoutError::Configuration(format!(
                "BRAINTREE_SDK_VERSION must look like 3.15.0, got {}",
                self.sdk_version
            )));
        }

        Ok(())
    }

    /// Builder: pin a different SDK version
    pub fn with_sdk_version(mut self, version: impl Into<String>) -> Self {
        self.sdk_version = version.into();
        self
    }

    /// Builder: serve from a different host (for testing/mirrors)
    pub fn with_cdn_host(mut self, host: impl Into<String>) -> Self {
        self.cdn_host = host.into();
        self
    }

    /// Versioned, protocol-relative URL of a module
    pub fn script_url(&self, library: BraintreeLibrary) -> String {
        format!(
            "//{}/web/{}/js/{}.min.js",
            self.cdn_host,
            self.sdk_version,
            library.module_name()
        )
    }

    /// Script URL plus export location of a module
    pub fn source(&self, library: BraintreeLibrary) -> ScriptSource {
        ScriptSource::new(
            self.script_url(library),
            self.namespace.clone(),
            library.export_name(),
        )
    }
}

impl Default for BraintreeConfig {
    fn default() -> Self {
        Self {
            cdn_host: DEFAULT_CDN_HOST.to_string(),
            sdk_version: DEFAULT_SDK_VERSION.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}
