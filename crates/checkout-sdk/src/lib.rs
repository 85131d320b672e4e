//! # checkout-sdk
//!
//! Storefront checkout client for checkout-sdk-rs.
//!
//! This crate provides:
//! - `HttpRequestSender`: `reqwest` transport for the storefront API
//! - Request senders for checkouts and consignments
//! - Action creators that turn requests into store actions
//! - `DefaultCheckoutStore` and `DefaultShippingStrategy`
//! - `CheckoutService`, the facade tying them together
//!
//! ## Endpoints used
//!
//! | Method | Path | Used by |
//! |--------|------|---------|
//! | GET | `/api/storefront/checkout/{id}` | `load_checkout` |
//! | POST | `/api/storefront/checkouts/{id}/consignments` | `update_shipping_address` (first address) |
//! | PUT | `/api/storefront/checkouts/{id}/consignments/{consignmentId}` | `update_shipping_address`, `select_shipping_option` |
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_sdk::{CheckoutService, SdkConfig};
//! use checkout_core::{FrozenCheckoutStoreSelector, RequestOptions};
//!
//! let service = CheckoutService::from_config(&SdkConfig::load()?)?;
//! let selectors = service.load_checkout("b20deef4", RequestOptions::default()).await?;
//! println!("{:?}", selectors.state().checkout());
//! ```

pub mod checkout_action_creator;
pub mod checkout_request_sender;
pub mod config;
pub mod consignment_action_creator;
pub mod consignment_request_sender;
pub mod http;
pub mod service;
pub mod shipping;
pub mod store;

#[cfg(test)]
mod testing;

pub use checkout_action_creator::CheckoutActionCreator;
pub use checkout_request_sender::CheckoutRequestSender;
pub use config::{LogFormat, SdkConfig};
pub use consignment_action_creator::ConsignmentActionCreator;
pub use consignment_request_sender::ConsignmentRequestSender;
pub use http::HttpRequestSender;
pub use service::CheckoutService;
pub use shipping::DefaultShippingStrategy;
pub use store::DefaultCheckoutStore;
