//! # Consignment Request Sender
//!
//! Creates and updates shipping consignments through the storefront API.
//! Both calls answer with the whole checkout.

use checkout_core::{
    Checkout, CheckoutResult, ConsignmentCreateRequest, ConsignmentUpdateRequest,
    HttpRequestOptions, RequestOptions, RequestSender, Response,
};
use std::rc::Rc;
use tracing::{debug, instrument};

/// Resources embedded in consignment responses
const CONSIGNMENT_INCLUDES: [&str; 4] = [
    "cart.lineItems.physicalItems.options",
    "cart.lineItems.digitalItems.options",
    "customer",
    "consignments.availableShippingOptions",
];

pub struct ConsignmentRequestSender {
    request_sender: Rc<dyn RequestSender>,
}

impl ConsignmentRequestSender {
    pub fn new(request_sender: Rc<dyn RequestSender>) -> Self {
        Self { request_sender }
    }

    fn request_options(body: serde_json::Value, options: &RequestOptions) -> HttpRequestOptions {
        HttpRequestOptions::new()
            .with_param("include", CONSIGNMENT_INCLUDES.join(","))
            .with_body(body)
            .with_timeout(options.timeout)
    }

    /// `POST /api/storefront/checkouts/{checkout_id}/consignments`
    #[instrument(skip(self, consignments, options), fields(count = consignments.len()))]
    pub async fn create_consignments(
        &self,
        checkout_id: &str,
        consignments: &[ConsignmentCreateRequest],
        options: RequestOptions,
    ) -> CheckoutResult<Response<Checkout>> {
        let url = format!("/api/storefront/checkouts/{}/consignments", checkout_id);
        let body = serde_json::to_value(consignments)?;

        debug!("Creating consignments for checkout {}", checkout_id);

        self.request_sender
            .post(&url, Self::request_options(body, &options))
            .await?
            .json()
    }

    /// `PUT /api/storefront/checkouts/{checkout_id}/consignments/{consignment.id}`
    #[instrument(skip(self, consignment, options), fields(consignment_id = %consignment.id))]
    pub async fn update_consignment(
        &self,
        checkout_id: &str,
        consignment: &ConsignmentUpdateRequest,
        options: RequestOptions,
    ) -> CheckoutResult<Response<Checkout>> {
        let url = format!(
            "/api/storefront/checkouts/{}/consignments/{}",
            checkout_id, consignment.id
        );
        let body = serde_json::to_value(consignment)?;

        debug!("Updating consignment {}", consignment.id);

        self.request_sender
            .put(&url, Self::request_options(body, &options))
            .await?
            .json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{checkout_json, RecordingRequestSender};
    use checkout_core::{Address, ConsignmentLineItem, Method};
    use serde_json::json;
    use std::time::Duration;

    fn address() -> Address {
        Address::new("12 Main St", "Austin", "78701", "US")
    }

    #[tokio::test]
    async fn test_create_consignments() {
        let sender = Rc::new(RecordingRequestSender::with_body(checkout_json("abc")));
        let consignments = ConsignmentRequestSender::new(sender.clone());
        let request = ConsignmentCreateRequest {
            shipping_address: address(),
            line_items: vec![ConsignmentLineItem {
                item_id: "item-1".into(),
                quantity: 2,
            }],
        };

        let response = consignments
            .create_consignments("abc", &[request], RequestOptions::with_timeout(Duration::from_secs(1)))
            .await
            .unwrap();

        assert_eq!(response.body.id, "abc");
        let recorded = sender.last_request().unwrap();
        assert_eq!(recorded.method, Method::Post);
        assert_eq!(recorded.url, "/api/storefront/checkouts/abc/consignments");
        assert_eq!(
            recorded.options.params.get("include").map(String::as_str),
            Some("cart.lineItems.physicalItems.options,cart.lineItems.digitalItems.options,customer,consignments.availableShippingOptions")
        );
        assert_eq!(recorded.options.timeout, Some(Duration::from_secs(1)));

        let body = recorded.options.body.unwrap();
        assert_eq!(body[0]["lineItems"], json!([{ "itemId": "item-1", "quantity": 2 }]));
        assert_eq!(body[0]["shippingAddress"]["city"], "Austin");
    }

    #[tokio::test]
    async fn test_update_consignment_shipping_option() {
        let sender = Rc::new(RecordingRequestSender::with_body(checkout_json("abc")));
        let consignments = ConsignmentRequestSender::new(sender.clone());

        consignments
            .update_consignment(
                "abc",
                &ConsignmentUpdateRequest::shipping_option("con-1", "opt-2"),
                RequestOptions::default(),
            )
            .await
            .unwrap();

        let recorded = sender.last_request().unwrap();
        assert_eq!(recorded.method, Method::Put);
        assert_eq!(recorded.url, "/api/storefront/checkouts/abc/consignments/con-1");
        assert_eq!(recorded.options.body, Some(json!({ "shippingOptionId": "opt-2" })));
        assert_eq!(recorded.options.timeout, None);
    }
}
