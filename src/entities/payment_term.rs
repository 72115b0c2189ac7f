use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::element_text;

crate::closed_enum! {
    /// How the `Day` of a payment term is counted.
    pub enum PaymentTerm("payment term") {
        /// N days after the bill date
        DaysAfterBillDate => "DAYSAFTERBILLDATE",
        /// N days after the end of the bill month
        DaysAfterBillMonth => "DAYSAFTERBILLMONTH",
        /// Day N of the current month
        OfCurrentMonth => "OFCURRENTMONTH",
        /// Day N of the following month
        OfFollowingMonth => "OFFOLLOWINGMONTH",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactPaymentTerm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(
        rename = "Type",
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub term_type: Option<PaymentTerm>,
}

/// Default payment terms of a contact, for bills and for sales invoices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactPaymentTerms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bills: Option<ContactPaymentTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<ContactPaymentTerm>,
}
