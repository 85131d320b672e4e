//! End-to-end checkout flow against a mock storefront

use checkout_core::{
    Address, CheckoutError, CheckoutParams, FrozenCheckoutStoreSelector, FrozenErrorSelector,
    FrozenStatusSelector, RequestOptions,
};
use checkout_sdk::{CheckoutService, SdkConfig};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHECKOUT_ID: &str = "b20deef4-2fc4-4d6c-9a8c-0a5e0b3c2f41";

fn checkout(consignments: Value) -> Value {
    json!({
        "id": CHECKOUT_ID,
        "cart": {
            "id": CHECKOUT_ID,
            "currency": { "code": "USD", "name": "US Dollar", "symbol": "$", "decimalPlaces": 2 },
            "lineItems": {
                "physicalItems": [
                    { "id": "666", "productId": 103, "name": "Canvas Laundry Cart", "quantity": 1, "salePrice": 200 },
                    { "id": "667", "productId": 104, "name": "Utility Caddy", "quantity": 3, "salePrice": 20 }
                ]
            },
            "baseAmount": 260,
            "cartAmount": 260
        },
        "customer": { "id": 0, "isGuest": true },
        "consignments": consignments,
        "subtotal": 260,
        "grandTotal": 260,
        "createdTime": "2026-10-16T09:30:00+00:00"
    })
}

fn consignment(selected: Option<Value>) -> Value {
    json!([{
        "id": "55c96cda6f04c",
        "shippingAddress": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "address1": "12 Main St",
            "city": "Austin",
            "stateOrProvinceCode": "TX",
            "postalCode": "78701",
            "countryCode": "US"
        },
        "lineItemIds": ["666", "667"],
        "availableShippingOptions": [
            { "id": "0:61d4bb52", "type": "shipping_flatrate", "description": "Flat Rate", "cost": 8 },
            { "id": "0:3a7c3f12", "type": "shipping_upsexpress", "description": "UPS Express", "cost": 24, "isRecommended": true }
        ],
        "selectedShippingOption": selected
    }])
}

fn service(server: &MockServer) -> CheckoutService {
    let config = SdkConfig::default().with_storefront_url(server.uri());
    CheckoutService::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_load_checkout_with_includes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/storefront/checkout/{}", CHECKOUT_ID)))
        .and(query_param(
            "include",
            "customer,cart.lineItems.physicalItems.options",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(checkout(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let service = service(&server);
    let options = RequestOptions {
        params: CheckoutParams {
            include: vec!["cart.lineItems.physicalItems.options".into()],
        },
        timeout: Some(Duration::from_secs(5)),
    };

    let selectors = service.load_checkout(CHECKOUT_ID, options).await.unwrap();

    let state = selectors.state();
    let checkout = state.checkout().unwrap();
    assert_eq!(checkout.cart.line_items.len(), 2);
    assert_eq!(checkout.grand_total, 260.0);
    assert!(checkout.created_time.is_some());
    assert!(state.consignments().is_empty());
    assert!(!state.is_loading_checkout());
}

#[tokio::test]
async fn test_shipping_flow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/storefront/checkout/{}", CHECKOUT_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(checkout(json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/storefront/checkouts/{}/consignments", CHECKOUT_ID)))
        .and(body_partial_json(json!([{
            "lineItems": [
                { "itemId": "666", "quantity": 1 },
                { "itemId": "667", "quantity": 3 }
            ]
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(checkout(consignment(None))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!(
            "/api/storefront/checkouts/{}/consignments/55c96cda6f04c",
            CHECKOUT_ID
        )))
        .and(body_partial_json(json!({ "shippingOptionId": "0:3a7c3f12" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(checkout(consignment(Some(
            json!({ "id": "0:3a7c3f12", "type": "shipping_upsexpress", "description": "UPS Express", "cost": 24 }),
        )))))
        .expect(1)
        .mount(&server)
        .await;

    let service = service(&server);
    service
        .load_checkout(CHECKOUT_ID, RequestOptions::default())
        .await
        .unwrap();

    let address = Address::new("12 Main St", "Austin", "78701", "US")
        .with_name("Ada", "Lovelace")
        .with_state_code("TX");
    let shipped = service
        .update_shipping_address(address.clone(), None, RequestOptions::default())
        .await
        .unwrap();

    assert!(shipped.state().shipping_address().unwrap().is_same_location(&address));
    let options = shipped.state().shipping_options();
    assert_eq!(options.len(), 2);
    assert!(options[1].is_recommended);

    let selected = service
        .select_shipping_option("0:3a7c3f12", None, RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(
        selected.state().selected_shipping_option().unwrap().description,
        "UPS Express"
    );
    // The earlier snapshot still shows no selection
    assert!(shipped.state().selected_shipping_option().is_none());
}

#[tokio::test]
async fn test_failed_load_is_recorded_in_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let service = service(&server);
    let err = service
        .load_checkout(CHECKOUT_ID, RequestOptions::default())
        .await
        .unwrap_err();

    let expected = CheckoutError::RequestFailed {
        status: 503,
        message: "upstream unavailable".into(),
    };
    assert_eq!(err, expected);
    assert!(err.is_retryable());

    let state = service.get_state();
    assert_eq!(state.state().load_checkout_error().as_deref(), Some(&expected));
    assert!(state.state().checkout().is_none());
}
