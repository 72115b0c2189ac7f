use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::wrapped_list;

crate::closed_enum! {
    /// Whether line amounts include tax.
    pub enum LineAmountType("line amount type") {
        Exclusive => "Exclusive",
        Inclusive => "Inclusive",
        NoTax => "NoTax",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackingSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    #[serde(rename = "TrackingCategoryID", default, skip_serializing_if = "Option::is_none")]
    pub tracking_category_id: Option<Uuid>,
}

wrapped_list! {
    pub struct Tracking(TrackingSummary) as "TrackingCategory";
}

/// A single line on a bank transaction or invoice.
///
/// ```xml
/// <LineItem>
///   <Description>Monthly account fee</Description>
///   <UnitAmount>15</UnitAmount>
///   <TaxType>NONE</TaxType>
///   <TaxAmount>0.00</TaxAmount>
///   <LineAmount>15.00</LineAmount>
///   <AccountCode>404</AccountCode>
///   <Quantity>1.0000</Quantity>
///   <LineItemID>52208ff9-528a-4985-a9ad-b2b1d4210e38</LineItemID>
/// </LineItem>
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(rename = "LineItemID", default, skip_serializing_if = "Option::is_none")]
    pub line_item_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_amount: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_amount: Option<Decimal>,
    /// Percentage discount, invoices only
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Tracking::is_empty")]
    pub tracking: Tracking,
}

wrapped_list! {
    pub struct LineItems(LineItem) as "LineItem";
}
