//! # xero-xml
//!
//! A typed Rust client for the Xero accounting API, speaking its XML dialect.
//!
//! ```ignore
//! use xero_xml::{BearerToken, Client, Page};
//!
//! let client = Client::new(BearerToken::new(access_token).with_tenant(tenant_id))?;
//!
//! for account in client.accounts().list().await? {
//!     println!("{} {:?}", account.code.unwrap_or_default(), account.account_type);
//! }
//!
//! let mut page = client.invoices().list().await?;
//! while let Page::Records { next, records } = page {
//!     println!("{} invoices", records.len());
//!     page = next.next().await?;
//! }
//! ```
//!
//! Requests are authorized by an [`Authorizer`]. [`BearerToken`] covers the
//! OAuth 2 flows; any closure `Fn(&mut reqwest::Request) -> Result<(), _>`
//! works for custom signing schemes.
//!
//! ## Sentry Integration
//!
//! Errors include async span traces that capture the call stack at the point
//! of error creation. Enable the `sentry` feature for breadcrumb support:
//!
//! ```toml
//! [dependencies]
//! xero-xml = { version = "0.1", features = ["sentry"] }
//! ```
//!
//! Span traces are captured when the subscriber has an `ErrorLayer`:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())
//!     .with(sentry::integrations::tracing::layer())
//!     .init();
//!
//! if let Err(e) = client.contacts().list().await {
//!     if let Some(trace) = e.span_trace() {
//!         eprintln!("Span trace:\n{}", trace);
//!     }
//!     sentry::capture_error(&e);
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod codec;

pub mod authorizer;
pub mod capability;
pub mod client;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod oauth;
pub mod pagination;
pub mod pem;
pub mod utils;

#[cfg(feature = "sentry")]
pub mod sentry_integration;

pub use authorizer::{AuthorizationError, Authorizer, NoAuthorization};
pub use capability::{Getter, Poster, Putter};
pub use client::{Client, ClientBuilder};
pub use codec::{Encode, UnsupportedValue};
pub use endpoints::Endpoint;
pub use entities::{
    Collection, Response, Validated, ValidationError, ValidationErrors, ValidationResult,
    ValidationStatus,
};
pub use error::{ApiException, Error, Result};
pub use oauth::{BearerToken, KeyPair};
pub use pagination::{Page, PageIterator};
pub use pem::{PemError, PrivateKey};

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;

pub use entities::account::{
    Account, AccountClass, AccountStatus, AccountType, Accounts, BankAccountType,
};
pub use entities::bank_transaction::{BankTransaction, BankTransactions};
pub use entities::bank_transfer::{BankTransfer, BankTransfers};
pub use entities::contact::{Contact, Contacts};
pub use entities::invoice::{Invoice, Invoices};
