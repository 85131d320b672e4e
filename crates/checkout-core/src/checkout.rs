//! # Checkout Types
//!
//! Checkout, cart and customer representations returned by
//! `/api/storefront/checkout/{id}`.

use crate::address::Address;
use crate::consignment::Consignment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A checkout in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    /// Checkout ID (same as the cart ID)
    pub id: String,

    /// Cart being checked out
    pub cart: Cart,

    /// Customer (present when `include=customer`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,

    /// Billing address, once entered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,

    /// Shipping consignments
    #[serde(default)]
    pub consignments: Vec<Consignment>,

    #[serde(default)]
    pub shipping_cost_total: f64,

    #[serde(default)]
    pub tax_total: f64,

    #[serde(default)]
    pub subtotal: f64,

    #[serde(default)]
    pub grand_total: f64,

    /// Order ID once the checkout has been submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
}

impl Checkout {
    /// Physical items that need shipping
    pub fn physical_items(&self) -> &[LineItem] {
        &self.cart.line_items.physical_items
    }

    /// The first consignment, which single-address shipping works against
    pub fn primary_consignment(&self) -> Option<&Consignment> {
        self.consignments.first()
    }

    /// True if any item needs shipping
    pub fn requires_shipping(&self) -> bool {
        !self.cart.line_items.physical_items.is_empty()
    }
}

/// The cart attached to a checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,

    /// Cart currency
    #[serde(default)]
    pub currency: CartCurrency,

    /// Customer email, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub line_items: LineItemMap,

    #[serde(default)]
    pub base_amount: f64,

    #[serde(default)]
    pub cart_amount: f64,
}

/// Currency descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCurrency {
    /// ISO 4217 code
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u8,
}

fn default_decimal_places() -> u8 {
    2
}

impl Default for CartCurrency {
    fn default() -> Self {
        Self {
            code: "USD".to_string(),
            name: "US Dollar".to_string(),
            symbol: "$".to_string(),
            decimal_places: 2,
        }
    }
}

/// Cart line items grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemMap {
    pub physical_items: Vec<LineItem>,
    pub digital_items: Vec<LineItem>,
}

impl LineItemMap {
    pub fn len(&self) -> usize {
        self.physical_items.len() + self.digital_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A line item in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,

    pub product_id: u64,

    #[serde(default)]
    pub variant_id: Option<u64>,

    pub name: String,

    #[serde(default)]
    pub sku: String,

    pub quantity: u32,

    #[serde(default)]
    pub sale_price: f64,

    #[serde(default)]
    pub extended_sale_price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The shopper attached to a checkout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    /// 0 for guest shoppers
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_guest: bool,
}

crate::frozen_record!(Checkout, Cart, CartCurrency, LineItemMap, LineItem, Customer);
