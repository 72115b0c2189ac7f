use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Client,
    codec::collection,
    endpoints::Endpoint,
    entities::{ValidationErrors, ValidationStatus, bank_transaction::BankAccount, validated},
    error::Result,
    utils::date_format::xero_datetime_format_option,
};

/// A transfer of money between two bank accounts.
///
/// ```xml
/// <BankTransfer>
///   <BankTransferID>d79f3e07-5f11-45e4-9d1a-30be536d0e13</BankTransferID>
///   <CreatedDateUTC>2014-02-25T19:27:15</CreatedDateUTC>
///   <Date>2014-02-26T00:00:00</Date>
///   <FromBankAccount>
///     <AccountID>ac993f75-035b-433c-82e0-7b7a2d40802c</AccountID>
///     <Name>Business Bank Account</Name>
///   </FromBankAccount>
///   <ToBankAccount>
///     <AccountID>ebd06280-af70-4bed-97c6-7451a454ad85</AccountID>
///     <Name>Business Savings Account</Name>
///   </ToBankAccount>
///   <Amount>20.00</Amount>
/// </BankTransfer>
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BankTransfer {
    #[serde(rename = "@status", default, skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<ValidationStatus>,
    #[serde(default, skip_serializing_if = "ValidationErrors::is_empty")]
    pub validation_errors: ValidationErrors,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_bank_account: Option<BankAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_bank_account: Option<BankAccount>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<OffsetDateTime>,

    // Read-only
    #[serde(rename = "BankTransferID", default, skip_serializing_if = "Option::is_none")]
    pub bank_transfer_id: Option<Uuid>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency_rate: Option<Decimal>,
    #[serde(
        rename = "FromBankTransactionID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub from_bank_transaction_id: Option<Uuid>,
    #[serde(
        rename = "ToBankTransactionID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub to_bank_transaction_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_attachments: Option<bool>,
    #[serde(
        rename = "CreatedDateUTC",
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date_utc: Option<OffsetDateTime>,
}

validated!(BankTransfer);

collection! {
    pub struct BankTransfers(BankTransfer) as "BankTransfers" / "BankTransfer";
}

#[instrument(skip(client))]
pub async fn list(client: &Client) -> Result<Vec<BankTransfer>> {
    client.fetch_all::<BankTransfers>(Endpoint::BankTransfers).await
}

#[instrument(skip(client))]
pub async fn get(client: &Client, bank_transfer_id: Uuid) -> Result<BankTransfer> {
    client
        .fetch_one::<BankTransfers>(
            Endpoint::BankTransfers,
            &bank_transfer_id.to_string(),
            "bank transfer",
        )
        .await
}

/// Create bank transfers (`PUT`). Transfers cannot be updated.
#[instrument(skip(client, transfers))]
pub async fn create(client: &Client, transfers: &BankTransfers) -> Result<Vec<BankTransfer>> {
    Ok(client
        .create(Endpoint::BankTransfers, transfers)
        .await?
        .into_items())
}
