//! Test doubles shared by the unit tests in this crate

use async_trait::async_trait;
use checkout_core::{
    CheckoutResult, HttpRequestOptions, Method, RequestSender, Response,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub options: HttpRequestOptions,
}

/// Request sender that records every call and replays canned responses
pub struct RecordingRequestSender {
    requests: RefCell<Vec<RecordedRequest>>,
    responses: RefCell<VecDeque<CheckoutResult<Value>>>,
    fallback: Value,
}

impl RecordingRequestSender {
    /// Answer every request with `body`
    pub fn with_body(body: Value) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            responses: RefCell::new(VecDeque::new()),
            fallback: body,
        }
    }

    /// Queue a response for the next request
    pub fn push_response(&self, response: CheckoutResult<Value>) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl RequestSender for RecordingRequestSender {
    async fn send(
        &self,
        method: Method,
        url: &str,
        options: HttpRequestOptions,
    ) -> CheckoutResult<Response<Value>> {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            url: url.to_string(),
            options,
        });

        let next = self.responses.borrow_mut().pop_front();
        let body = match next {
            Some(response) => response?,
            None => self.fallback.clone(),
        };

        Ok(Response {
            body,
            status: 200,
            headers: BTreeMap::new(),
        })
    }
}

/// Checkout with one physical item and no consignments
pub fn checkout_json(id: &str) -> Value {
    json!({
        "id": id,
        "cart": {
            "id": id,
            "currency": { "code": "USD" },
            "lineItems": {
                "physicalItems": [
                    { "id": "item-1", "productId": 101, "name": "Mug", "quantity": 2, "salePrice": 12.5 }
                ],
                "digitalItems": []
            }
        },
        "customer": { "id": 0, "email": "", "isGuest": true },
        "consignments": [],
        "grandTotal": 25.0
    })
}

/// Same checkout shipped to Austin with two quoted options
pub fn checkout_with_consignment_json(id: &str, selected: Option<&str>) -> Value {
    let mut checkout = checkout_json(id);
    let options = json!([
        { "id": "opt-1", "type": "shipping_flatrate", "description": "Flat Rate", "cost": 5.0 },
        { "id": "opt-2", "type": "shipping_upsexpress", "description": "Express", "cost": 15.0 }
    ]);
    let selected = selected.and_then(|id| {
        options
            .as_array()
            .and_then(|all| all.iter().find(|o| o["id"] == id).cloned())
    });

    checkout["consignments"] = json!([{
        "id": "con-1",
        "shippingAddress": {
            "address1": "12 Main St",
            "city": "Austin",
            "postalCode": "78701",
            "countryCode": "US"
        },
        "lineItemIds": ["item-1"],
        "availableShippingOptions": options,
        "selectedShippingOption": selected
    }]);
    checkout
}
