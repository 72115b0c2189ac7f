use serde::{Deserialize, Serialize};

use crate::codec::wrapped_list;
use crate::utils::serde_helpers::element_text;

crate::closed_enum! {
    pub enum AddressType("address type") {
        PoBox => "POBOX",
        Street => "STREET",
        Delivery => "DELIVERY",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    #[serde(
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address_type: Option<AddressType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention_to: Option<String>,
}

wrapped_list! {
    pub struct Addresses(Address) as "Address";
}
