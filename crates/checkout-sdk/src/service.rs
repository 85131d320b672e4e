//! # Checkout Service
//!
//! Facade over the store, action creators and shipping strategies.
//!
//! ```text
//! CheckoutService
//!   ├── load_checkout() ─────────► CheckoutActionCreator ──► store.dispatch
//!   ├── update_shipping_address() ─┐
//!   └── select_shipping_option() ──┴► ShippingStrategyRegistry[method] ──► store.dispatch
//! ```
//!
//! Every call resolves with the store's selectors after the update.

use crate::checkout_action_creator::CheckoutActionCreator;
use crate::checkout_request_sender::CheckoutRequestSender;
use crate::config::SdkConfig;
use crate::consignment_action_creator::ConsignmentActionCreator;
use crate::consignment_request_sender::ConsignmentRequestSender;
use crate::http::HttpRequestSender;
use crate::shipping::DefaultShippingStrategy;
use crate::store::DefaultCheckoutStore;
use checkout_core::{
    Address, CheckoutParams, CheckoutResult, CheckoutSelectors, CheckoutStore, RequestOptions,
    RequestSender, SharedShippingStrategy, ShippingStrategyRegistry,
};
use std::rc::Rc;
use tracing::{debug, info, instrument};

pub struct CheckoutService {
    store: Rc<dyn CheckoutStore>,
    checkout_action_creator: CheckoutActionCreator,
    shipping_strategies: ShippingStrategyRegistry,
}

impl CheckoutService {
    /// Wire the service with the default shipping strategy registered
    pub fn new(store: Rc<dyn CheckoutStore>, request_sender: Rc<dyn RequestSender>) -> Self {
        let checkout_action_creator = CheckoutActionCreator::new(Rc::new(
            CheckoutRequestSender::new(Rc::clone(&request_sender)),
        ));
        let consignment_action_creator = Rc::new(ConsignmentActionCreator::new(Rc::new(
            ConsignmentRequestSender::new(request_sender),
        )));

        let shipping_strategies = ShippingStrategyRegistry::new(DefaultShippingStrategy::NAME)
            .with_strategy(Rc::new(DefaultShippingStrategy::new(
                Rc::clone(&store),
                consignment_action_creator,
            )));

        Self {
            store,
            checkout_action_creator,
            shipping_strategies,
        }
    }

    /// Service talking to the configured storefront over HTTP
    pub fn from_config(config: &SdkConfig) -> CheckoutResult<Self> {
        let request_sender = HttpRequestSender::from_config(config)?;
        info!("Checkout service using storefront {}", request_sender.base_url());

        Ok(Self::new(
            Rc::new(DefaultCheckoutStore::new()),
            Rc::new(request_sender),
        ))
    }

    /// Register an additional shipping strategy (e.g. a wallet provider)
    pub fn register_shipping_strategy(&mut self, strategy: SharedShippingStrategy) {
        debug!("Registering shipping strategy {}", strategy.strategy_name());
        self.shipping_strategies.register(strategy);
    }

    pub fn shipping_strategies(&self) -> &ShippingStrategyRegistry {
        &self.shipping_strategies
    }

    /// Current selectors, without any request
    pub fn get_state(&self) -> CheckoutSelectors {
        self.store.selectors()
    }

    #[instrument(skip(self, options))]
    pub async fn load_checkout(
        &self,
        id: &str,
        options: RequestOptions<CheckoutParams>,
    ) -> CheckoutResult<CheckoutSelectors> {
        self.store
            .dispatch(self.checkout_action_creator.load_checkout(id, options))
            .await
    }

    /// Prepare the shipping strategy for `method_id`
    pub async fn initialize_shipping(&self, method_id: Option<&str>) -> CheckoutResult<CheckoutSelectors> {
        self.shipping_strategies
            .get_or_default(method_id)?
            .initialize()
            .await?;
        Ok(self.get_state())
    }

    /// Release the shipping strategy for `method_id`
    pub async fn deinitialize_shipping(
        &self,
        method_id: Option<&str>,
    ) -> CheckoutResult<CheckoutSelectors> {
        self.shipping_strategies
            .get_or_default(method_id)?
            .deinitialize()
            .await?;
        Ok(self.get_state())
    }

    #[instrument(skip(self, address, options))]
    pub async fn update_shipping_address(
        &self,
        address: Address,
        method_id: Option<&str>,
        options: RequestOptions,
    ) -> CheckoutResult<CheckoutSelectors> {
        let strategy = Rc::clone(self.shipping_strategies.get_or_default(method_id)?);
        strategy.update_address(address, options).await
    }

    #[instrument(skip(self, options))]
    pub async fn select_shipping_option(
        &self,
        option_id: &str,
        method_id: Option<&str>,
        options: RequestOptions,
    ) -> CheckoutResult<CheckoutSelectors> {
        let strategy = Rc::clone(self.shipping_strategies.get_or_default(method_id)?);
        strategy.select_option(option_id, options).await
    }
}
