//! # checkout-cli
//!
//! Loads a checkout from a storefront and prints it as JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export CHECKOUT_STOREFRONT_URL=https://store.example.com
//! export CHECKOUT_REQUEST_TIMEOUT_SECS=10
//!
//! # Load a checkout, optionally embedding extra resources
//! checkout-cli b20deef4-2fc4-4d6c-9a8c-0a5e0b3c2f41 consignments.availableShippingOptions
//! ```

use anyhow::Context;
use checkout_core::{CheckoutParams, FrozenCheckoutStoreSelector, RequestOptions};
use checkout_sdk::{CheckoutService, LogFormat, SdkConfig};
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = SdkConfig::load().context("Failed to load checkout configuration")?;

    // Initialize logging (stderr, stdout carries the checkout JSON)
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }

    if let Some(path) = SdkConfig::config_file() {
        info!("Loaded checkout config from {}", path);
    }
    if config.storefront_url.starts_with("http://") {
        warn!("Storefront URL is not using HTTPS");
    }

    let mut args = std::env::args().skip(1);
    let checkout_id = args
        .next()
        .context("Usage: checkout-cli <checkout-id> [include...]")?;
    let include: Vec<String> = args.collect();

    info!("Storefront: {}", config.storefront_url);

    let service = CheckoutService::from_config(&config)?;
    let options = RequestOptions {
        params: CheckoutParams { include },
        timeout: config.request_timeout(),
    };

    let selectors = match service.load_checkout(&checkout_id, options).await {
        Ok(selectors) => selectors,
        Err(err) => {
            error!(retryable = err.is_retryable(), "Failed to load checkout: {}", err);
            return Err(err.into());
        }
    };

    let checkout = selectors
        .state()
        .checkout()
        .context("Storefront returned no checkout")?;
    info!(
        "Loaded checkout {} ({} line items)",
        checkout.id,
        checkout.cart.line_items.len()
    );

    println!("{}", serde_json::to_string_pretty(&checkout)?);

    Ok(())
}
