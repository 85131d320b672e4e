//! # Braintree Script Loader
//!
//! Loads the Braintree web SDK modules into the host page, once each.

use crate::config::{BraintreeConfig, BraintreeLibrary};
use checkout_core::{
    CheckoutError, ExternalScriptLoader, HostWindow, LoadFailure, LoadState, ScriptLoader,
};
use std::rc::Rc;
use tracing::debug;

/// Braintree module loader
///
/// Each module is fetched at most once per loader; concurrent callers share
/// the in-flight fetch and every caller gets the same handle back.
pub struct BraintreeScriptLoader<W: HostWindow> {
    loader: ExternalScriptLoader<BraintreeLibrary, W>,
    config: BraintreeConfig,
}

impl<W: HostWindow + 'static> BraintreeScriptLoader<W> {
    /// Create a loader for the default SDK version
    pub fn new(script_loader: Rc<dyn ScriptLoader>, window: Rc<W>) -> Self {
        Self {
            loader: ExternalScriptLoader::new(script_loader, window),
            config: BraintreeConfig::default(),
        }
    }

    /// Create a loader with explicit configuration, rejecting hosts with a
    /// scheme and versions that are not `x.y.z`
    pub fn with_config(
        script_loader: Rc<dyn ScriptLoader>,
        window: Rc<W>,
        config: BraintreeConfig,
    ) -> Result<Self, CheckoutError> {
        config.validate()?;

        Ok(Self {
            loader: ExternalScriptLoader::new(script_loader, window),
            config,
        })
    }

    pub fn config(&self) -> &BraintreeConfig {
        &self.config
    }

    /// Load `braintree.client`
    pub async fn load_client(&self) -> Result<W::Export, LoadFailure> {
        self.load(BraintreeLibrary::Client).await
    }

    /// Load `braintree.threeDSecure`
    pub async fn load_3ds(&self) -> Result<W::Export, LoadFailure> {
        self.load(BraintreeLibrary::ThreeDSecure).await
    }

    /// Load `braintree.dataCollector`
    pub async fn load_data_collector(&self) -> Result<W::Export, LoadFailure> {
        self.load(BraintreeLibrary::DataCollector).await
    }

    /// Load any Braintree module
    pub async fn load(&self, library: BraintreeLibrary) -> Result<W::Export, LoadFailure> {
        debug!(
            "Requesting Braintree {} ({:?})",
            library.module_name(),
            self.loader.state(library)
        );
        self.loader.load(library, self.config.source(library)).await
    }

    /// Load state of a module
    pub fn state(&self, library: BraintreeLibrary) -> LoadState {
        self.loader.state(library)
    }
}
