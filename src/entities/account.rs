use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Client,
    codec::collection,
    endpoints::Endpoint,
    entities::{ValidationErrors, ValidationStatus, validated},
    error::Result,
    utils::{
        date_format::xero_datetime_format_option,
        serde_helpers::{element_text, empty_string_as_none},
    },
};

crate::closed_enum! {
    /// Account class types (read-only)
    pub enum AccountClass("account class") {
        Asset => "ASSET",
        Equity => "EQUITY",
        Expense => "EXPENSE",
        Liability => "LIABILITY",
        Revenue => "REVENUE",
    }
}

crate::closed_enum! {
    /// Account types in Xero
    pub enum AccountType("account type") {
        Bank => "BANK",
        Current => "CURRENT",
        CurrentLiability => "CURRLIAB",
        Depreciation => "DEPRECIATN",
        DirectCosts => "DIRECTCOSTS",
        Equity => "EQUITY",
        Expense => "EXPENSE",
        Fixed => "FIXED",
        Inventory => "INVENTORY",
        Liability => "LIABILITY",
        NonCurrent => "NONCURRENT",
        OtherIncome => "OTHERINCOME",
        Overheads => "OVERHEADS",
        Prepayment => "PREPAYMENT",
        Revenue => "REVENUE",
        Sales => "SALES",
        TermLiability => "TERMLIAB",
        PaygLiability => "PAYGLIABILITY",
        SuperannuationExpense => "SUPERANNUATIONEXPENSE",
        SuperannuationLiability => "SUPERANNUATIONLIABILITY",
        WagesExpense => "WAGESEXPENSE",
        WagesPayableLiability => "WAGESPAYABLELIABILITY",
    }
}

crate::closed_enum! {
    /// Account status codes
    pub enum AccountStatus("account status") {
        Active => "ACTIVE",
        Archived => "ARCHIVED",
    }
}

crate::closed_enum! {
    /// Bank account types
    pub enum BankAccountType("bank account type") {
        Bank => "BANK",
        CreditCard => "CREDITCARD",
        PayPal => "PAYPAL",
    }
}

/// Represents an account in the chart of accounts
///
/// ```xml
/// <Account>
///   <AccountID>297c2dc5-cc47-4afd-8ec8-74990b8761e9</AccountID>
///   <Code>200</Code>
///   <Name>BNZ Cheque Account</Name>
///   <Type>BANK</Type>
///   <BankAccountNumber>3809087654321500</BankAccountNumber>
///   <BankAccountType>BANK</BankAccountType>
///   <CurrencyCode>NZD</CurrencyCode>
///   <TaxType>NONE</TaxType>
///   <EnablePaymentsToAccount>false</EnablePaymentsToAccount>
/// </Account>
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    #[serde(rename = "@status", default, skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<ValidationStatus>,

    #[serde(default, skip_serializing_if = "ValidationErrors::is_empty")]
    pub validation_errors: ValidationErrors,

    /// Customer defined alpha numeric account code (max 10 chars)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Name of the account (max 150 chars)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        rename = "Type",
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_type: Option<AccountType>,

    /// Bank account number (for BANK type accounts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,

    #[serde(
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<AccountStatus>,

    /// Description of the account (max 4000 chars)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Bank account type. Non-bank accounts carry an empty element, read as `None`.
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub bank_account_type: Option<BankAccountType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,

    /// Tax type from TaxRates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,

    /// Whether payments can be applied to this account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_payments_to_account: Option<bool>,

    /// Whether account is available for expense claims
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_in_expense_claims: Option<bool>,

    #[serde(rename = "AccountID", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,

    /// Account class (read-only)
    #[serde(
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub class: Option<AccountClass>,

    /// System account type (read-only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_account: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_code_name: Option<String>,

    #[serde(
        rename = "UpdatedDateUTC",
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date_utc: Option<OffsetDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_attachments: Option<bool>,
}

validated!(Account);

collection! {
    pub struct Accounts(Account) as "Accounts" / "Account";
}

/// Retrieve the full chart of accounts.
#[instrument(skip(client))]
pub async fn list(client: &Client) -> Result<Vec<Account>> {
    client.fetch_all::<Accounts>(Endpoint::Accounts).await
}

/// Retrieve a single account by its `account_id`.
#[instrument(skip(client))]
pub async fn get(client: &Client, account_id: Uuid) -> Result<Account> {
    client
        .fetch_one::<Accounts>(Endpoint::Accounts, &account_id.to_string(), "account")
        .await
}

/// Create new accounts (`PUT`).
#[instrument(skip(client, accounts))]
pub async fn create(client: &Client, accounts: &Accounts) -> Result<Vec<Account>> {
    Ok(client.create(Endpoint::Accounts, accounts).await?.into_items())
}

/// Create or update accounts (`POST`).
#[instrument(skip(client, accounts))]
pub async fn create_update(client: &Client, accounts: &Accounts) -> Result<Vec<Account>> {
    Ok(client
        .create_update(Endpoint::Accounts, accounts)
        .await?
        .into_items())
}
