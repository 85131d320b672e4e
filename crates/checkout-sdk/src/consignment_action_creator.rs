//! # Consignment Action Creator
//!
//! Thunks that set the shipping address and shipping option of a
//! single-address checkout. Both work against the first consignment.
//!
//! ```text
//! update_address ──► no consignment? ──yes──► POST consignments (all physical items)
//!                           │
//!                           no
//!                           ▼
//!                    PUT consignments/{first}
//! ```

use crate::consignment_request_sender::ConsignmentRequestSender;
use async_stream::stream;
use checkout_core::{
    Address, CheckoutAction, CheckoutError, ConsignmentCreateRequest, ConsignmentLineItem,
    ConsignmentUpdateRequest, FrozenCheckoutStoreSelector, RequestOptions, ThunkAction,
};
use futures::StreamExt;
use std::rc::Rc;
use tracing::debug;

pub struct ConsignmentActionCreator {
    consignment_request_sender: Rc<ConsignmentRequestSender>,
}

impl ConsignmentActionCreator {
    pub fn new(consignment_request_sender: Rc<ConsignmentRequestSender>) -> Self {
        Self {
            consignment_request_sender,
        }
    }

    /// Ship every physical item to `address`.
    ///
    /// Creates the consignment if the checkout has none, otherwise moves the
    /// first consignment. Emits only `CreateConsignmentsFailed` (with
    /// `MissingData`) if no checkout is loaded.
    pub fn update_address(&self, address: Address, options: RequestOptions) -> ThunkAction {
        let sender = Rc::clone(&self.consignment_request_sender);

        ThunkAction::new("updateAddress", move |selectors| {
            stream! {
                let checkout = selectors.state().checkout();
                let checkout = match checkout {
                    Some(checkout) => checkout,
                    None => {
                        yield CheckoutAction::CreateConsignmentsFailed(CheckoutError::missing("checkout"));
                        return;
                    }
                };

                let line_items: Vec<ConsignmentLineItem> = checkout
                    .physical_items()
                    .iter()
                    .map(ConsignmentLineItem::from)
                    .collect();

                match checkout.primary_consignment().map(|c| c.id.clone()) {
                    None => {
                        debug!("Creating consignment for {} items", line_items.len());
                        yield CheckoutAction::CreateConsignmentsRequested;

                        let request = ConsignmentCreateRequest {
                            shipping_address: address,
                            line_items,
                        };
                        match sender.create_consignments(&checkout.id, &[request], options).await {
                            Ok(response) => yield CheckoutAction::CreateConsignmentsSucceeded(response.body),
                            Err(err) => yield CheckoutAction::CreateConsignmentsFailed(err),
                        }
                    }
                    Some(consignment_id) => {
                        debug!("Updating address of consignment {}", consignment_id);
                        yield CheckoutAction::UpdateConsignmentRequested;

                        let request = ConsignmentUpdateRequest::address(consignment_id, address, line_items);
                        match sender.update_consignment(&checkout.id, &request, options).await {
                            Ok(response) => yield CheckoutAction::UpdateConsignmentSucceeded(response.body),
                            Err(err) => yield CheckoutAction::UpdateConsignmentFailed(err),
                        }
                    }
                }
            }
            .boxed_local()
        })
    }

    /// Choose shipping option `option_id` for the first consignment.
    ///
    /// Emits only `UpdateShippingOptionFailed` (with `MissingData`) if there
    /// is no consignment yet.
    pub fn select_shipping_option(&self, option_id: &str, options: RequestOptions) -> ThunkAction {
        let sender = Rc::clone(&self.consignment_request_sender);
        let option_id = option_id.to_string();

        ThunkAction::new("selectShippingOption", move |selectors| {
            stream! {
                let target = selectors.state().checkout().and_then(|checkout| {
                    checkout
                        .primary_consignment()
                        .map(|consignment| (checkout.id.clone(), consignment.id.clone()))
                });
                let (checkout_id, consignment_id) = match target {
                    Some(target) => target,
                    None => {
                        yield CheckoutAction::UpdateShippingOptionFailed(CheckoutError::missing("consignment"));
                        return;
                    }
                };

                yield CheckoutAction::UpdateShippingOptionRequested;

                let request = ConsignmentUpdateRequest::shipping_option(consignment_id, option_id);
                match sender.update_consignment(&checkout_id, &request, options).await {
                    Ok(response) => yield CheckoutAction::UpdateShippingOptionSucceeded(response.body),
                    Err(err) => yield CheckoutAction::UpdateShippingOptionFailed(err),
                }
            }
            .boxed_local()
        })
    }
}
