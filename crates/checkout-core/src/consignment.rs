//! # Consignment Types
//!
//! A consignment groups line items shipped to one address with one shipping
//! option. Single-address checkouts have at most one consignment.

use crate::address::Address;
use crate::checkout::LineItem;
use serde::{Deserialize, Serialize};

/// A shipment of line items to an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consignment {
    pub id: String,

    pub shipping_address: Address,

    /// IDs of the line items in this consignment
    #[serde(default)]
    pub line_item_ids: Vec<String>,

    /// Shipping options quoted for the address
    #[serde(default)]
    pub available_shipping_options: Vec<ShippingOption>,

    /// Option chosen by the shopper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_shipping_option: Option<ShippingOption>,

    #[serde(default)]
    pub shipping_cost: f64,

    #[serde(default)]
    pub handling_cost: f64,
}

impl Consignment {
    /// Look up a quoted shipping option
    pub fn shipping_option(&self, option_id: &str) -> Option<&ShippingOption> {
        self.available_shipping_options
            .iter()
            .find(|option| option.id == option_id)
    }
}

/// A quoted shipping method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    pub id: String,

    #[serde(default, rename = "type")]
    pub option_type: String,

    pub description: String,

    #[serde(default)]
    pub image_url: String,

    pub cost: f64,

    #[serde(default)]
    pub transit_time: String,

    #[serde(default)]
    pub is_recommended: bool,
}

/// Line item reference in a consignment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsignmentLineItem {
    pub item_id: String,
    pub quantity: u32,
}

impl From<&LineItem> for ConsignmentLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            item_id: item.id.clone(),
            quantity: item.quantity,
        }
    }
}

/// Body of `POST /checkouts/{id}/consignments`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsignmentCreateRequest {
    pub shipping_address: Address,
    pub line_items: Vec<ConsignmentLineItem>,
}

/// Body of `PUT /checkouts/{id}/consignments/{consignmentId}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsignmentUpdateRequest {
    /// Consignment being updated (not serialized, it goes in the URL)
    #[serde(skip)]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<ConsignmentLineItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_option_id: Option<String>,
}

impl ConsignmentUpdateRequest {
    /// Move consignment `id` to a new address
    pub fn address(
        id: impl Into<String>,
        address: Address,
        line_items: Vec<ConsignmentLineItem>,
    ) -> Self {
        Self {
            id: id.into(),
            shipping_address: Some(address),
            line_items: Some(line_items),
            shipping_option_id: None,
        }
    }

    /// Choose a shipping option for consignment `id`
    pub fn shipping_option(id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shipping_address: None,
            line_items: None,
            shipping_option_id: Some(option_id.into()),
        }
    }
}

crate::frozen_record!(Consignment, ShippingOption, ConsignmentLineItem);
