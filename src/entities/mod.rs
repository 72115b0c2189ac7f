use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::codec::wrapped_list;
use crate::utils::date_format::parse_xero_datetime;

pub mod account;
pub mod address;
pub mod bank_transaction;
pub mod bank_transfer;
pub mod branding_theme;
pub mod contact;
pub mod invoice;
pub mod line_item;
pub mod payment_term;
pub mod phone;

/// A list of records as it appears inside the response envelope and as the
/// body of PUT/POST requests, e.g. `<Accounts><Account/>...</Accounts>`.
pub trait Collection: DeserializeOwned + Default {
    /// Name of the wrapping element.
    const ELEMENT: &'static str;

    type Item;

    fn items(&self) -> &[Self::Item];

    fn into_items(self) -> Vec<Self::Item>;
}

/// The `<Response>` envelope wrapping every API reply.
///
/// ```xml
/// <Response xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
///   <Id>a9c6d0b2-4b7e-4cc2-9b2c-4b3e5f0e3c11</Id>
///   <Status>OK</Status>
///   <ProviderName>Example</ProviderName>
///   <DateTimeUTC>2017-09-14T10:38:48.0637053Z</DateTimeUTC>
///   <Accounts>
///     <Account>...</Account>
///   </Accounts>
/// </Response>
/// ```
///
/// A missing or empty payload element decodes to an empty collection.
#[derive(Clone, Debug, Default)]
pub struct Response<C> {
    pub id: String,
    pub status: String,
    pub provider_name: String,
    pub date_time_utc: Option<OffsetDateTime>,
    pub collection: C,
}

impl<C: Collection> Response<C> {
    #[must_use]
    pub fn items(&self) -> &[C::Item] {
        self.collection.items()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.items().is_empty()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<C::Item> {
        self.collection.into_items()
    }
}

const RESPONSE_FIELDS: &[&str] = &["Id", "Status", "ProviderName", "DateTimeUTC"];

// The payload element name is only known through `C::ELEMENT`, so the
// envelope is visited by hand instead of derived.
impl<'de, C: Collection> Deserialize<'de> for Response<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ResponseVisitor<C>(PhantomData<fn() -> C>);

        impl<'de, C: Collection> Visitor<'de> for ResponseVisitor<C> {
            type Value = Response<C>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a <Response> envelope holding <{}>", C::ELEMENT)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut response = Response::<C>::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "Id" => response.id = map.next_value()?,
                        "Status" => response.status = map.next_value()?,
                        "ProviderName" => response.provider_name = map.next_value()?,
                        "DateTimeUTC" => {
                            let raw: String = map.next_value()?;
                            if !raw.trim().is_empty() {
                                response.date_time_utc =
                                    Some(parse_xero_datetime(&raw).map_err(de::Error::custom)?);
                            }
                        }
                        element if element == C::ELEMENT => {
                            response.collection = map.next_value()?;
                        }
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(response)
            }
        }

        deserializer.deserialize_struct("Response", RESPONSE_FIELDS, ResponseVisitor(PhantomData))
    }
}

crate::closed_enum! {
    /// Per-record outcome of a PUT/POST, carried in the `status` attribute.
    pub enum ValidationStatus("validation status") {
        Ok => "OK",
        Error => "ERROR",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValidationError {
    pub message: String,
}

wrapped_list! {
    /// `<ValidationErrors>` attached to a record rejected by the API.
    pub struct ValidationErrors(ValidationError) as "ValidationError";
}

/// Outcome of server-side validation for one submitted record. Records built
/// locally, or fetched with GET, carry an empty result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub status: Option<ValidationStatus>,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Whether the record was rejected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.status == Some(ValidationStatus::Error) || !self.errors.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }
}

/// Records that come back from PUT/POST with a validation outcome.
pub trait Validated {
    fn validation(&self) -> ValidationResult;
}

/// Implements [`Validated`] for records holding `validation_status` and
/// `validation_errors` fields.
macro_rules! validated {
    ($($record:ty),+ $(,)?) => {
        $(
            impl $crate::entities::Validated for $record {
                fn validation(&self) -> $crate::entities::ValidationResult {
                    $crate::entities::ValidationResult {
                        status: self.validation_status,
                        errors: self.validation_errors.items.clone(),
                    }
                }
            }
        )+
    };
}

pub(crate) use validated;
