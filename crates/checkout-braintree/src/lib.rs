//! # checkout-braintree
//!
//! Braintree web SDK loading for checkout-sdk-rs.
//!
//! The Braintree payment and 3-D Secure strategies need three scripts from
//! Braintree's CDN:
//!
//! 1. **client**: `braintree.client`, the factory every other module builds on
//! 2. **three-d-secure**: `braintree.threeDSecure`, card authentication
//! 3. **data-collector**: `braintree.dataCollector`, device data for fraud checks
//!
//! `BraintreeScriptLoader` fetches each at most once and hands every caller
//! the same export handle.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_braintree::BraintreeScriptLoader;
//!
//! // In the browser, `checkout-wasm` provides the DOM loader and window
//! let loader = BraintreeScriptLoader::new(Rc::new(DomScriptLoader), Rc::new(BrowserWindow));
//!
//! let client_creator = loader.load_client().await?;
//! let three_d_secure = loader.load_3ds().await?;
//! ```

pub mod config;
pub mod script_loader;

// Re-exports
pub use config::{BraintreeConfig, BraintreeLibrary, DEFAULT_CDN_HOST, DEFAULT_SDK_VERSION};
pub use script_loader::BraintreeScriptLoader;
