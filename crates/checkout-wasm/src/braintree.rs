//! # Braintree Loader Bindings
//!
//! JavaScript-facing wrapper around [`BraintreeScriptLoader`]. Each method
//! returns a `Promise` resolving to the Braintree module factory.

use crate::dom::{BrowserWindow, DomScriptLoader};
use checkout_braintree::{BraintreeConfig, BraintreeLibrary, BraintreeScriptLoader};
use checkout_core::LoadState;
use js_sys::Promise;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

#[wasm_bindgen]
pub struct BraintreeLoader {
    inner: Rc<BraintreeScriptLoader<BrowserWindow>>,
}

#[wasm_bindgen]
impl BraintreeLoader {
    /// Loader for the default Braintree web SDK version
    #[wasm_bindgen(constructor)]
    pub fn new() -> BraintreeLoader {
        Self::wrap(BraintreeScriptLoader::new(
            Rc::new(DomScriptLoader),
            Rc::new(BrowserWindow),
        ))
    }

    /// Loader pinned to another SDK version, e.g. `"3.97.2"`
    #[wasm_bindgen(js_name = withVersion)]
    pub fn with_version(version: &str) -> Result<BraintreeLoader, JsValue> {
        let config = BraintreeConfig::default().with_sdk_version(version);
        let inner =
            BraintreeScriptLoader::with_config(Rc::new(DomScriptLoader), Rc::new(BrowserWindow), config)
                .map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))?;
        Ok(Self::wrap(inner))
    }

    /// Resolves to `braintree.client`
    #[wasm_bindgen(js_name = loadClient)]
    pub fn load_client(&self) -> Promise {
        self.load(BraintreeLibrary::Client)
    }

    /// Resolves to `braintree.threeDSecure`
    #[wasm_bindgen(js_name = load3DS)]
    pub fn load_3ds(&self) -> Promise {
        self.load(BraintreeLibrary::ThreeDSecure)
    }

    /// Resolves to `braintree.dataCollector`
    #[wasm_bindgen(js_name = loadDataCollector)]
    pub fn load_data_collector(&self) -> Promise {
        self.load(BraintreeLibrary::DataCollector)
    }

    /// `"unrequested"`, `"loading"` or `"loaded"` for a module file name
    #[wasm_bindgen(js_name = moduleState)]
    pub fn module_state(&self, module: &str) -> Result<String, JsValue> {
        let library = BraintreeLibrary::from_module_name(module).ok_or_else(|| {
            JsValue::from(js_sys::Error::new(&format!(
                "Unknown Braintree module: {}",
                module
            )))
        })?;

        let state = match self.inner.state(library) {
            LoadState::Unrequested => "unrequested",
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
        };
        Ok(state.to_string())
    }
}

impl BraintreeLoader {
    fn wrap(inner: BraintreeScriptLoader<BrowserWindow>) -> Self {
        Self {
            inner: Rc::new(inner),
        }
    }

    fn load(&self, library: BraintreeLibrary) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            inner
                .load(library)
                .await
                .map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))
        })
    }
}

impl Default for BraintreeLoader {
    fn default() -> Self {
        Self::new()
    }
}
