//! # Checkout Action Creator
//!
//! Thunks that load checkouts into the store.

use crate::checkout_request_sender::CheckoutRequestSender;
use async_stream::stream;
use checkout_core::{CheckoutAction, CheckoutParams, RequestOptions, ThunkAction};
use futures::StreamExt;
use std::rc::Rc;

pub struct CheckoutActionCreator {
    checkout_request_sender: Rc<CheckoutRequestSender>,
}

impl CheckoutActionCreator {
    pub fn new(checkout_request_sender: Rc<CheckoutRequestSender>) -> Self {
        Self {
            checkout_request_sender,
        }
    }

    /// Emits `LoadCheckoutRequested`, then `LoadCheckoutSucceeded` with the
    /// fetched checkout or `LoadCheckoutFailed`.
    pub fn load_checkout(&self, id: &str, options: RequestOptions<CheckoutParams>) -> ThunkAction {
        let sender = Rc::clone(&self.checkout_request_sender);
        let id = id.to_string();

        ThunkAction::new("loadCheckout", move |_| {
            stream! {
                yield CheckoutAction::LoadCheckoutRequested;

                match sender.load_checkout(&id, options).await {
                    Ok(response) => yield CheckoutAction::LoadCheckoutSucceeded(response.body),
                    Err(err) => yield CheckoutAction::LoadCheckoutFailed(err),
                }
            }
            .boxed_local()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{checkout_json, RecordingRequestSender};
    use checkout_core::{CheckoutError, CheckoutSelectors};

    fn creator(sender: Rc<RecordingRequestSender>) -> CheckoutActionCreator {
        CheckoutActionCreator::new(Rc::new(CheckoutRequestSender::new(sender)))
    }

    #[tokio::test]
    async fn test_load_checkout_emits_requested_then_succeeded() {
        let sender = Rc::new(RecordingRequestSender::with_body(checkout_json("abc")));

        let actions: Vec<_> = creator(sender)
            .load_checkout("abc", RequestOptions::default())
            .run(CheckoutSelectors::default())
            .collect()
            .await;

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], CheckoutAction::LoadCheckoutRequested);
        assert!(matches!(
            &actions[1],
            CheckoutAction::LoadCheckoutSucceeded(checkout) if checkout.id == "abc"
        ));
    }

    #[tokio::test]
    async fn test_load_checkout_emits_failed() {
        let sender = Rc::new(RecordingRequestSender::with_body(checkout_json("abc")));
        let err = CheckoutError::RequestFailed {
            status: 404,
            message: "Not found".into(),
        };
        sender.push_response(Err(err.clone()));

        let actions: Vec<_> = creator(sender)
            .load_checkout("abc", RequestOptions::default())
            .run(CheckoutSelectors::default())
            .collect()
            .await;

        assert_eq!(
            actions,
            vec![
                CheckoutAction::LoadCheckoutRequested,
                CheckoutAction::LoadCheckoutFailed(err)
            ]
        );
    }
}
