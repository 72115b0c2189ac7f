use serde::{Deserialize, Serialize};

use crate::codec::wrapped_list;
use crate::utils::serde_helpers::element_text;

crate::closed_enum! {
    pub enum PhoneType("phone type") {
        Default => "DEFAULT",
        Ddi => "DDI",
        Mobile => "MOBILE",
        Fax => "FAX",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Phone {
    #[serde(
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_type: Option<PhoneType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_area_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_country_code: Option<String>,
}

wrapped_list! {
    pub struct Phones(Phone) as "Phone";
}
