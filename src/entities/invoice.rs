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
    pub enum InvoiceType("invoice type") {
        /// A bill, accounts payable
        AccountsPayable => "ACCPAY",
        /// A sales invoice, accounts receivable
        AccountsReceivable => "ACCREC",
    }
}

crate::closed_enum! {
    pub enum InvoiceStatus("invoice status") {
        Draft => "DRAFT",
        Submitted => "SUBMITTED",
        Deleted => "DELETED",
        Authorised => "AUTHORISED",
        Paid => "PAID",
        Voided => "VOIDED",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
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
    pub invoice_type: Option<InvoiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<OffsetDateTime>,
    #[serde(
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<InvoiceStatus>,
    #[serde(
        default,
        deserialize_with = "element_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_amount_types: Option<LineAmountType>,
    #[serde(default, skip_serializing_if = "LineItems::is_empty")]
    pub line_items: LineItems,
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
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_discount: Option<Decimal>,
    #[serde(
        rename = "UpdatedDateUTC",
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date_utc: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency_rate: Option<Decimal>,
    #[serde(rename = "InvoiceID", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "BrandingThemeID", default, skip_serializing_if = "Option::is_none")]
    pub branding_theme_id: Option<Uuid>,
    #[serde(rename = "Url", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_to_contact: Option<bool>,
    #[serde(
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_payment_date: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub planned_payment_date: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_attachments: Option<bool>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_due: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_paid: Option<Decimal>,
    #[serde(
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub fully_paid_on_date: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_credited: Option<Decimal>,
}

validated!(Invoice);

collection! {
    pub struct Invoices(Invoice) as "Invoices" / "Invoice";
}

/// Retrieve the first page of invoices.
#[instrument(skip(client))]
pub async fn list(client: &Client) -> Result<Page<'_, Client, Invoices>> {
    client.paginate(Endpoint::Invoices).await
}

/// Retrieve a single invoice by its `invoice_id`.
#[instrument(skip(client))]
pub async fn get(client: &Client, invoice_id: Uuid) -> Result<Invoice> {
    client
        .fetch_one::<Invoices>(Endpoint::Invoices, &invoice_id.to_string(), "invoice")
        .await
}

#[instrument(skip(client, invoices))]
pub async fn create(client: &Client, invoices: &Invoices) -> Result<Vec<Invoice>> {
    Ok(client.create(Endpoint::Invoices, invoices).await?.into_items())
}

#[instrument(skip(client, invoices))]
pub async fn create_update(client: &Client, invoices: &Invoices) -> Result<Vec<Invoice>> {
    Ok(client
        .create_update(Endpoint::Invoices, invoices)
        .await?
        .into_items())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use super::*;
    use crate::codec::{Encode, decode};
    use crate::entities::line_item::LineItem;

    #[test]
    fn decodes_sales_invoice() {
        let body = b"<Invoice>
  <Type>ACCREC</Type>
  <Contact><Name>ABC Limited</Name></Contact>
  <Date>2009-08-30T00:00:00</Date>
  <DueDate>2009-09-20T00:00:00</DueDate>
  <Status>AUTHORISED</Status>
  <LineAmountTypes>Exclusive</LineAmountTypes>
  <LineItems>
    <LineItem>
      <Description>Consulting services</Description>
      <Quantity>20.0000</Quantity>
      <UnitAmount>100.00</UnitAmount>
      <AccountCode>200</AccountCode>
      <DiscountRate>10</DiscountRate>
    </LineItem>
  </LineItems>
  <SubTotal>1800.00</SubTotal>
  <TotalTax>225.00</TotalTax>
  <Total>2025.00</Total>
  <CurrencyCode>NZD</CurrencyCode>
  <InvoiceID>243216c5-369e-4056-ac67-05388f86dc81</InvoiceID>
  <InvoiceNumber>OIT00546</InvoiceNumber>
  <AmountDue>2025.00</AmountDue>
  <AmountPaid>0.00</AmountPaid>
  <SentToContact>true</SentToContact>
</Invoice>";

        let invoice: Invoice = decode(body).unwrap();
        assert_eq!(invoice.invoice_type, Some(InvoiceType::AccountsReceivable));
        assert_eq!(invoice.status, Some(InvoiceStatus::Authorised));
        assert_eq!(invoice.due_date, Some(datetime!(2009-09-20 00:00:00 UTC)));
        assert_eq!(invoice.total, Some(dec!(2025.00)));
        assert_eq!(invoice.amount_paid, Some(dec!(0.00)));
        assert_eq!(invoice.sent_to_contact, Some(true));
        assert_eq!(invoice.line_items.items[0].discount_rate, Some(dec!(10)));
        assert_eq!(invoice.invoice_number.as_deref(), Some("OIT00546"));
    }

    #[test]
    fn unknown_status_fails_the_record() {
        let err = decode::<Invoice>(b"<Invoice><Status>OVERDUE</Status></Invoice>").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidData(_)), "{err:?}");
    }

    #[test]
    fn encodes_draft_bill() {
        let invoices = Invoices::from(vec![Invoice {
            invoice_type: Some(InvoiceType::AccountsPayable),
            status: Some(InvoiceStatus::Draft),
            line_items: LineItems::from(vec![LineItem {
                description: Some("Paper".to_string()),
                quantity: Some(dec!(2)),
                ..Default::default()
            }]),
            ..Default::default()
        }]);

        assert_eq!(
            invoices.encode().unwrap(),
            "<Invoices><Invoice><Type>ACCPAY</Type><Status>DRAFT</Status>\
<LineItems><LineItem><Description>Paper</Description><Quantity>2</Quantity></LineItem></LineItems>\
</Invoice></Invoices>"
        );
    }
}
