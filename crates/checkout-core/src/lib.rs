//! # checkout-core
//!
//! Core types and traits for the checkout SDK.
//!
//! This crate provides:
//! - `FreezeProxy` and `Freeze` for handing out deeply immutable results
//! - `ScriptCache` / `ExternalScriptLoader` for loading third-party scripts once
//! - `Checkout`, `Consignment` and `Address` domain types
//! - `RequestSender`, `CheckoutStore` and `ShippingStrategy` capabilities
//! - `CheckoutError` and `LoadFailure` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutStore, FrozenCheckoutStoreSelector};
//!
//! // Dispatch a thunk and read the frozen result
//! let selectors = store.dispatch(action_creator.load_checkout(id, options)).await?;
//! let checkout = selectors.state().checkout(); // Option<Frozen<Checkout>>
//!
//! // Load a third-party library at most once
//! let client = script_loader.load(Library::Client, source).await?;
//! ```

pub mod address;
pub mod checkout;
pub mod consignment;
pub mod error;
pub mod freeze;
pub mod request;
pub mod script;
pub mod store;
pub mod strategy;

// Re-exports for convenience
pub use address::{Address, CustomField};
pub use checkout::{Cart, CartCurrency, Checkout, Customer, LineItem, LineItemMap};
pub use consignment::{
    Consignment, ConsignmentCreateRequest, ConsignmentLineItem, ConsignmentUpdateRequest,
    ShippingOption,
};
pub use error::{CheckoutError, CheckoutResult, LoadFailure};
pub use freeze::{create_freeze_proxy, DeepFrozen, Freeze, FreezeProxy, Frozen, FrozenValue};
pub use request::{
    CheckoutParams, HttpRequestOptions, Method, RequestOptions, RequestSender, Response,
};
pub use script::{
    ExternalScriptLoader, HostWindow, LoadState, ScriptCache, ScriptLoader, ScriptSource,
};
pub use store::{
    ActionStream, CheckoutAction, CheckoutSelectors, CheckoutState, CheckoutStore,
    CheckoutStoreSelector, ErrorSelector, FrozenCheckoutStoreSelector, FrozenErrorSelector,
    FrozenStatusSelector, StatusSelector, ThunkAction,
};
pub use strategy::{SharedShippingStrategy, ShippingStrategy, ShippingStrategyRegistry};
