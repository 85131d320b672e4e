//! # Address Types
//!
//! Shipping and billing addresses as exchanged with the storefront API.

use serde::{Deserialize, Serialize};

/// A postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Server-assigned ID (absent for new addresses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address1: String,
    pub address2: String,
    pub city: String,

    /// Full state or province name
    pub state_or_province: String,

    /// State or province code (e.g. "CA")
    pub state_or_province_code: String,

    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,

    pub postal_code: String,
    pub phone: String,

    /// Merchant-defined form fields
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
}

impl Address {
    /// Create an address with the fields required for shipping quotes
    pub fn new(
        address1: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            address1: address1.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            country_code: country_code.into(),
            ..Self::default()
        }
    }

    /// Builder: set recipient name
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Builder: set state/province code
    pub fn with_state_code(mut self, code: impl Into<String>) -> Self {
        self.state_or_province_code = code.into();
        self
    }

    /// Same location, ignoring server ID and custom fields
    pub fn is_same_location(&self, other: &Address) -> bool {
        self.address1 == other.address1
            && self.address2 == other.address2
            && self.city == other.city
            && self.postal_code == other.postal_code
            && self.country_code == other.country_code
            && self.state_or_province_code == other.state_or_province_code
    }
}

/// Custom form field attached to an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub field_id: String,
    pub field_value: serde_json::Value,
}

crate::frozen_record!(Address, CustomField);
