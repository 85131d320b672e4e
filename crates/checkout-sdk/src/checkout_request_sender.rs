//! # Checkout Request Sender
//!
//! Fetches checkouts from the storefront API.

use checkout_core::{
    Checkout, CheckoutParams, CheckoutResult, HttpRequestOptions, RequestOptions, RequestSender,
    Response,
};
use std::rc::Rc;
use tracing::{debug, instrument};

/// Resources always embedded in a checkout response
const DEFAULT_INCLUDES: [&str; 1] = ["customer"];

pub struct CheckoutRequestSender {
    request_sender: Rc<dyn RequestSender>,
}

impl CheckoutRequestSender {
    pub fn new(request_sender: Rc<dyn RequestSender>) -> Self {
        Self { request_sender }
    }

    /// `GET /api/storefront/checkout/{id}`
    ///
    /// `include` is `customer` followed by the caller's includes, comma
    /// separated. The caller's timeout is passed through unchanged.
    #[instrument(skip(self, options))]
    pub async fn load_checkout(
        &self,
        id: &str,
        options: RequestOptions<CheckoutParams>,
    ) -> CheckoutResult<Response<Checkout>> {
        let url = format!("/api/storefront/checkout/{}", id);
        let include = DEFAULT_INCLUDES
            .iter()
            .map(|s| s.to_string())
            .chain(options.params.include)
            .collect::<Vec<_>>()
            .join(",");

        debug!("Loading checkout with include={}", include);

        let response = self
            .request_sender
            .get(
                &url,
                HttpRequestOptions::new()
                    .with_param("include", include)
                    .with_timeout(options.timeout),
            )
            .await?;

        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{checkout_json, RecordingRequestSender};
    use checkout_core::Method;
    use std::time::Duration;

    #[tokio::test]
    async fn test_load_checkout_default_include() {
        let sender = Rc::new(RecordingRequestSender::with_body(checkout_json("abc")));
        let checkouts = CheckoutRequestSender::new(sender.clone());

        let response = checkouts
            .load_checkout("abc", RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(response.body.id, "abc");
        let request = sender.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "/api/storefront/checkout/abc");
        assert_eq!(
            request.options,
            HttpRequestOptions::new().with_param("include", "customer")
        );
    }

    #[tokio::test]
    async fn test_load_checkout_with_includes_and_timeout() {
        let sender = Rc::new(RecordingRequestSender::with_body(checkout_json("abc")));
        let checkouts = CheckoutRequestSender::new(sender.clone());
        let options = RequestOptions {
            params: CheckoutParams {
                include: vec![
                    "cart.lineItems.physicalItems.options".into(),
                    "consignments.availableShippingOptions".into(),
                ],
            },
            timeout: Some(Duration::from_secs(3)),
        };

        checkouts.load_checkout("abc", options).await.unwrap();

        let request = sender.last_request().unwrap();
        assert_eq!(
            request.options.params.get("include").map(String::as_str),
            Some("customer,cart.lineItems.physicalItems.options,consignments.availableShippingOptions")
        );
        assert_eq!(request.options.timeout, Some(Duration::from_secs(3)));
    }
}
