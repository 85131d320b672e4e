//! # checkout-wasm
//!
//! WebAssembly bindings for checkout-sdk-rs.
//!
//! This crate provides:
//! - `DomScriptLoader`: script loading through `<script>` elements
//! - `BrowserWindow`: export lookup on `globalThis`
//! - `BraintreeLoader`: Braintree web SDK loading for JavaScript callers
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { BraintreeLoader } from 'checkout-wasm';
//!
//! await init();
//!
//! const loader = new BraintreeLoader();
//! const [client, threeDSecure] = await Promise.all([
//!   loader.loadClient(),
//!   loader.load3DS(),
//! ]);
//!
//! const instance = await client.create({ authorization: clientToken });
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

pub mod braintree;
pub mod dom;

pub use braintree::BraintreeLoader;
pub use dom::{BrowserWindow, DomScriptLoader};

use wasm_bindgen::prelude::*;

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
