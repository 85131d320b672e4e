//! # Shipping Strategy Trait
//!
//! Strategy pattern for shipping address and option updates.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ShippingStrategy (trait)                  │
//! │  ├── update_address()                                       │
//! │  ├── select_option()                                        │
//! │  ├── initialize() / deinitialize()                          │
//! │  └── strategy_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┼─────────────────┐
//!          │                 │                 │
//!  ┌───────┴───────┐ ┌───────┴───────┐ ┌───────┴───────┐
//!  │    Default    │ │  Wallet-based │ │   Pickup in   │
//!  │   Strategy    │ │   (future)    │ │ store (future)│
//!  └───────────────┘ └───────────────┘ └───────────────┘
//! ```
//!
//! Strategies are `?Send`: the SDK runs on a single cooperative thread (the
//! browser event loop or a current-thread runtime).

use crate::address::Address;
use crate::error::{CheckoutError, CheckoutResult};
use crate::request::RequestOptions;
use crate::store::CheckoutSelectors;
use async_trait::async_trait;
use std::collections::HashMap;
use std::rc::Rc;

/// Core trait for shipping strategy implementations.
#[async_trait(?Send)]
pub trait ShippingStrategy {
    /// Set the shipping address of the checkout.
    ///
    /// # Returns
    /// Selectors over the state after the update.
    async fn update_address(
        &self,
        address: Address,
        options: RequestOptions,
    ) -> CheckoutResult<CheckoutSelectors>;

    /// Choose one of the quoted shipping options.
    async fn select_option(
        &self,
        option_id: &str,
        options: RequestOptions,
    ) -> CheckoutResult<CheckoutSelectors>;

    /// Prepare the strategy (load provider scripts, render widgets...).
    async fn initialize(&self) -> CheckoutResult<()> {
        Ok(())
    }

    /// Release anything acquired by `initialize`.
    async fn deinitialize(&self) -> CheckoutResult<()> {
        Ok(())
    }

    /// Name the strategy is registered under (e.g. `"default"`)
    fn strategy_name(&self) -> &'static str;
}

/// Shared handle to a shipping strategy (dynamic dispatch)
pub type SharedShippingStrategy = Rc<dyn ShippingStrategy>;

/// Registry of shipping strategies keyed by method ID
#[derive(Clone)]
pub struct ShippingStrategyRegistry {
    strategies: HashMap<String, SharedShippingStrategy>,
    default_strategy: String,
}

impl ShippingStrategyRegistry {
    /// Create a new registry with a default strategy name
    pub fn new(default_strategy: impl Into<String>) -> Self {
        Self {
            strategies: HashMap::new(),
            default_strategy: default_strategy.into(),
        }
    }

    /// Register a strategy under its own name
    pub fn register(&mut self, strategy: SharedShippingStrategy) {
        let name = strategy.strategy_name().to_string();
        self.strategies.insert(name, strategy);
    }

    /// Register with builder pattern
    pub fn with_strategy(mut self, strategy: SharedShippingStrategy) -> Self {
        self.register(strategy);
        self
    }

    /// Get the default strategy
    pub fn default_strategy(&self) -> Option<&SharedShippingStrategy> {
        self.strategies.get(&self.default_strategy)
    }

    /// Get a strategy by method ID
    pub fn get(&self, method_id: &str) -> Option<&SharedShippingStrategy> {
        self.strategies.get(method_id)
    }

    /// Get the strategy for `method_id`, falling back to the default
    pub fn get_or_default(&self, method_id: Option<&str>) -> CheckoutResult<&SharedShippingStrategy> {
        let strategy = match method_id {
            Some(id) => self.get(id).or_else(|| self.default_strategy()),
            None => self.default_strategy(),
        };

        strategy.ok_or_else(|| CheckoutError::StrategyNotFound {
            name: method_id.unwrap_or(&self.default_strategy).to_string(),
        })
    }

    /// List registered strategy names
    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(|s| s.as_str()).collect()
    }

    pub fn contains(&self, method_id: &str) -> bool {
        self.strategies.contains_key(method_id)
    }
}

impl Default for ShippingStrategyRegistry {
    fn default() -> Self {
        Self::new("default")
    }
}
