use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Client,
    codec::collection,
    endpoints::Endpoint,
    entities::{
        ValidationErrors, ValidationStatus,
        contact::Contact,
        line_item::{LineAmountType, LineItems},
        validated,
    },
    error::Result,
    pagination::Page,
    utils::{date_format::xero_datetime_format_option, serde_helpers::element_text},
};

crate::closed_enum! {
    pub enum BankTransactionStatus("bank transaction status") {
        Authorised => "AUTHORISED",
        Deleted => "DELETED",
    }
}

crate::closed_enum! {
    pub enum BankTransactionType("bank transaction type") {
        Receive => "RECEIVE",
        ReceiveOverpayment => "RECEIVE-OVERPAYMENT",
        ReceivePrepayment => "RECEIVE-PREPAYMENT",
        Spend => "SPEND",
        SpendOverpayment => "SPEND-OVERPAYMENT",
        SpendPrepayment => "SPEND-PREPAYMENT",
        /// Created by Xero for the receiving side of a bank transfer
        ReceiveTransfer => "RECEIVE-TRANSFER",
        /// Created by Xero for the sending side of a bank transfer
        SpendTransfer => "SPEND-TRANSFER",
    }
}

/// Reference to a bank account in the chart of accounts.
///
/// ```xml
/// <BankAccount>
///   <AccountID>297c2dc5-cc47-4afd-8ec8-74990b8761e9</AccountID>
///   <Code>BANK</Code>
/// </BankAccount>
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BankAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "AccountID", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BankTransaction {
    #[serde(rename = "@status", default, skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<ValidationStatus>,
    #[serde(default, skip_serializing_if = "ValidationErrors::is_empty")]
    pub validation_errors: ValidationErrors,

    #[serde(
        rename = "Type",
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<BankTransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "LineItems::is_empty")]
    pub line_items: LineItems,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reconciled: Option<bool>,
    #[serde(
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency_rate: Option<Decimal>,
    #[serde(rename = "Url", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<BankTransactionStatus>,
    #[serde(
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_amount_types: Option<LineAmountType>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_total: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_tax: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<Decimal>,
    #[serde(rename = "BankTransactionID", default, skip_serializing_if = "Option::is_none")]
    pub bank_transaction_id: Option<Uuid>,
    #[serde(rename = "PrepaymentID", default, skip_serializing_if = "Option::is_none")]
    pub prepayment_id: Option<Uuid>,
    #[serde(rename = "OverpaymentID", default, skip_serializing_if = "Option::is_none")]
    pub overpayment_id: Option<Uuid>,
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

validated!(BankTransaction);

collection! {
    pub struct BankTransactions(BankTransaction) as "BankTransactions" / "BankTransaction";
}

/// Retrieve the first page of bank transactions.
#[instrument(skip(client))]
pub async fn list(client: &Client) -> Result<Page<'_, Client, BankTransactions>> {
    client.paginate(Endpoint::BankTransactions).await
}

#[instrument(skip(client))]
pub async fn get(client: &Client, bank_transaction_id: Uuid) -> Result<BankTransaction> {
    client
        .fetch_one::<BankTransactions>(
            Endpoint::BankTransactions,
            &bank_transaction_id.to_string(),
            "bank transaction",
        )
        .await
}

#[instrument(skip(client, transactions))]
pub async fn create(
    client: &Client,
    transactions: &BankTransactions,
) -> Result<Vec<BankTransaction>> {
    Ok(client
        .create(Endpoint::BankTransactions, transactions)
        .await?
        .into_items())
}

#[instrument(skip(client, transactions))]
pub async fn create_update(
    client: &Client,
    transactions: &BankTransactions,
) -> Result<Vec<BankTransaction>> {
    Ok(client
        .create_update(Endpoint::BankTransactions, transactions)
        .await?
        .into_items())
}
