//! # DOM Script Loading
//!
//! Browser implementations of the script loading capabilities:
//! `DomScriptLoader` injects `<script>` elements, `BrowserWindow` reads the
//! exports they attach to `globalThis`.

use async_trait::async_trait;
use checkout_core::{HostWindow, LoadFailure, ScriptLoader};
use js_sys::{Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlScriptElement;

/// Loads scripts by appending an async `<script>` element to `<body>` and
/// waiting for its `load` or `error` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomScriptLoader;

impl DomScriptLoader {
    fn create_script(url: &str) -> Result<(HtmlScriptElement, Promise), LoadFailure> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| LoadFailure::script(url, "no document available"))?;

        let script: HtmlScriptElement = document
            .create_element("script")
            .map_err(|err| LoadFailure::script(url, describe(&err)))?
            .dyn_into()
            .map_err(|_| LoadFailure::script(url, "created element is not a script"))?;

        script.set_async(true);
        script.set_src(url);

        let promise = Promise::new(&mut |resolve, reject| {
            script.set_onload(Some(&resolve));
            script.set_onerror(Some(&reject));
        });

        let body = document
            .body()
            .ok_or_else(|| LoadFailure::script(url, "document has no body"))?;
        body.append_child(&script)
            .map_err(|err| LoadFailure::script(url, describe(&err)))?;

        Ok((script, promise))
    }
}

#[async_trait(?Send)]
impl ScriptLoader for DomScriptLoader {
    async fn load_script(&self, url: &str) -> Result<(), LoadFailure> {
        let (script, promise) = Self::create_script(url)?;

        let result = JsFuture::from(promise).await;

        // Handlers are no longer needed once the script settled
        script.set_onload(None);
        script.set_onerror(None);

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                // A retry appends a fresh element
                script.remove();
                Err(LoadFailure::script(url, describe(&err)))
            }
        }
    }
}

/// The browser global object (`globalThis`)
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserWindow;

impl HostWindow for BrowserWindow {
    type Export = JsValue;

    fn export(&self, namespace: &str, name: &str) -> Option<JsValue> {
        let namespace = present(Reflect::get(&js_sys::global(), &JsValue::from_str(namespace)).ok()?)?;
        present(Reflect::get(&namespace, &JsValue::from_str(name)).ok()?)
    }
}

fn present(value: JsValue) -> Option<JsValue> {
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// Human-readable message for a rejected script load
fn describe(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    "script failed to load".to_string()
}
