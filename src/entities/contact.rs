use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Client,
    codec::{collection, wrapped_list},
    endpoints::Endpoint,
    entities::{
        ValidationErrors, ValidationStatus,
        address::Addresses,
        branding_theme::BrandingTheme,
        payment_term::ContactPaymentTerms,
        phone::Phones,
        validated,
    },
    error::Result,
    pagination::Page,
    utils::{date_format::xero_datetime_format_option, serde_helpers::element_text},
};

crate::closed_enum! {
    pub enum ContactStatus("contact status") {
        Active => "ACTIVE",
        Archived => "ARCHIVED",
        GdprRequest => "GDPRREQUEST",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactPerson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_in_emails: Option<bool>,
}

wrapped_list! {
    pub struct ContactPersons(ContactPerson) as "ContactPerson";
}

/// Default tracking option applied to a contact's sales or purchases.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactTrackingCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_option_name: Option<String>,
}

wrapped_list! {
    pub struct SalesTrackingCategories(ContactTrackingCategory) as "SalesTrackingCategory";
}

wrapped_list! {
    pub struct PurchasesTrackingCategories(ContactTrackingCategory) as "PurchasesTrackingCategory";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactGroup {
    #[serde(rename = "ContactGroupID", default, skip_serializing_if = "Option::is_none")]
    pub contact_group_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

wrapped_list! {
    pub struct ContactGroups(ContactGroup) as "ContactGroup";
}

/// Bank details used when paying this contact in a batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactBatchPayments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactBalance {
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub outstanding: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub overdue: Option<Decimal>,
}

/// Outstanding and overdue amounts for sales invoices (receivable) and bills
/// (payable). Read-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactBalances {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_receivable: Option<ContactBalance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_payable: Option<ContactBalance>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    #[serde(rename = "@status", default, skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<ValidationStatus>,
    #[serde(default, skip_serializing_if = "ValidationErrors::is_empty")]
    pub validation_errors: ValidationErrors,

    #[serde(rename = "ContactID", default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_status: Option<ContactStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skype_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "ContactPersons::is_empty")]
    pub contact_persons: ContactPersons,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_receivable_tax_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_payable_tax_type: Option<String>,
    #[serde(default, skip_serializing_if = "Addresses::is_empty")]
    pub addresses: Addresses,
    #[serde(default, skip_serializing_if = "Phones::is_empty")]
    pub phones: Phones,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_supplier: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_customer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,
    #[serde(
        rename = "UpdatedDateUTC",
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date_utc: Option<OffsetDateTime>,

    // The remaining fields are only returned when fetching a single contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xero_network_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_default_account_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchases_default_account_code: Option<String>,
    #[serde(default, skip_serializing_if = "SalesTrackingCategories::is_empty")]
    pub sales_tracking_categories: SalesTrackingCategories,
    #[serde(default, skip_serializing_if = "PurchasesTrackingCategories::is_empty")]
    pub purchases_tracking_categories: PurchasesTrackingCategories,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<ContactPaymentTerms>,
    #[serde(default, skip_serializing_if = "ContactGroups::is_empty")]
    pub contact_groups: ContactGroups,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding_theme: Option<BrandingTheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_payments: Option<ContactBatchPayments>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balances: Option<ContactBalances>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_attachments: Option<bool>,
}

validated!(Contact);

collection! {
    pub struct Contacts(Contact) as "Contacts" / "Contact";
}

/// Retrieve the first page of contacts.
#[instrument(skip(client))]
pub async fn list(client: &Client) -> Result<Page<'_, Client, Contacts>> {
    client.paginate(Endpoint::Contacts).await
}

/// Retrieve a single contact by it's `contact_id`.
#[instrument(skip(client))]
pub async fn get(client: &Client, contact_id: Uuid) -> Result<Contact> {
    client
        .fetch_one::<Contacts>(Endpoint::Contacts, &contact_id.to_string(), "contact")
        .await
}

#[instrument(skip(client, contacts))]
pub async fn create(client: &Client, contacts: &Contacts) -> Result<Vec<Contact>> {
    Ok(client.create(Endpoint::Contacts, contacts).await?.into_items())
}

#[instrument(skip(client, contacts))]
pub async fn create_update(client: &Client, contacts: &Contacts) -> Result<Vec<Contact>> {
    Ok(client
        .create_update(Endpoint::Contacts, contacts)
        .await?
        .into_items())
}
