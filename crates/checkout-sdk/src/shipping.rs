//! # Default Shipping Strategy
//!
//! Single-address shipping through the storefront consignment API.

use crate::consignment_action_creator::ConsignmentActionCreator;
use async_trait::async_trait;
use checkout_core::{
    Address, CheckoutResult, CheckoutSelectors, CheckoutStore, RequestOptions, ShippingStrategy,
};
use std::rc::Rc;
use tracing::{info, instrument};

pub struct DefaultShippingStrategy {
    store: Rc<dyn CheckoutStore>,
    consignment_action_creator: Rc<ConsignmentActionCreator>,
}

impl DefaultShippingStrategy {
    pub const NAME: &'static str = "default";

    pub fn new(
        store: Rc<dyn CheckoutStore>,
        consignment_action_creator: Rc<ConsignmentActionCreator>,
    ) -> Self {
        Self {
            store,
            consignment_action_creator,
        }
    }
}

#[async_trait(?Send)]
impl ShippingStrategy for DefaultShippingStrategy {
    #[instrument(skip_all, fields(strategy = "default"))]
    async fn update_address(
        &self,
        address: Address,
        options: RequestOptions,
    ) -> CheckoutResult<CheckoutSelectors> {
        let selectors = self
            .store
            .dispatch(self.consignment_action_creator.update_address(address, options))
            .await?;

        info!("Shipping address updated");
        Ok(selectors)
    }

    #[instrument(skip(self, options), fields(strategy = "default"))]
    async fn select_option(
        &self,
        option_id: &str,
        options: RequestOptions,
    ) -> CheckoutResult<CheckoutSelectors> {
        let selectors = self
            .store
            .dispatch(
                self.consignment_action_creator
                    .select_shipping_option(option_id, options),
            )
            .await?;

        info!("Shipping option selected");
        Ok(selectors)
    }

    fn strategy_name(&self) -> &'static str {
        Self::NAME
    }
}
