use std::fmt;

use miette::Diagnostic;
use oauth2::{HttpClientError, RequestTokenError, basic::BasicErrorResponse};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing_error::SpanTrace;

use crate::entities::{ValidationError, ValidationErrors};
use crate::pem::PemError;

/// Error body returned by the API with a `400 Bad Request`.
///
/// ```xml
/// <ApiException>
///   <ErrorNumber>10</ErrorNumber>
///   <Type>ValidationException</Type>
///   <Message>A validation exception occurred</Message>
///   <Elements>
///     <DataContractBase xsi:type="Invoice">
///       <ValidationErrors>
///         <ValidationError>
///           <Message>Email address must be valid.</Message>
///         </ValidationError>
///       </ValidationErrors>
///     </DataContractBase>
///   </Elements>
/// </ApiException>
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiException {
    pub error_number: u32,
    #[serde(rename = "Type", default)]
    pub type_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    elements: Elements,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Elements {
    #[serde(rename = "DataContractBase", default)]
    items: Vec<ValidationExceptionElement>,
}

impl ApiException {
    /// The per-record validation failures, in submission order.
    #[must_use]
    pub fn elements(&self) -> &[ValidationExceptionElement] {
        &self.elements.items
    }
}

impl fmt::Display for ApiException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Xero API Exception: [{}] {}",
            self.error_number, self.message
        )
    }
}

/// Validation errors for one submitted record, tagged with the record's type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationExceptionElement {
    /// Entity type named by the `xsi:type` attribute, e.g. `Invoice`.
    #[serde(rename = "@type", alias = "@xsi:type", default)]
    pub type_name: String,
    #[serde(rename = "ValidationErrors", default)]
    validation_errors: ValidationErrors,
}

impl ValidationExceptionElement {
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors.items
    }
}

/// Errors that can occur when interacting with the Xero API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("error making request: {source}")]
    #[diagnostic(
        code(xero_xml::request_error),
        help("Check your network connection and Xero API availability")
    )]
    Request {
        #[source]
        source: reqwest::Error,
        span_trace: SpanTrace,
    },

    #[error("request authorization failed: {0}")]
    #[diagnostic(
        code(xero_xml::authorization),
        help("The request was not sent; check the credentials used by the authorizer")
    )]
    Authorization(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid url: {0}")]
    #[diagnostic(
        code(xero_xml::invalid_url),
        help("Check that the API base URL and endpoint are correctly formatted")
    )]
    InvalidUrl(#[from] url::ParseError),

    #[error("malformed XML: {0}")]
    #[diagnostic(
        code(xero_xml::xml_syntax),
        help("The API returned a body that is not well-formed XML")
    )]
    Xml(#[source] quick_xml::DeError),

    #[error("invalid data: {0}")]
    #[diagnostic(
        code(xero_xml::invalid_data),
        help("The XML was well-formed but contained a value this client does not accept")
    )]
    InvalidData(String),

    #[error("error encoding request body: {0}")]
    #[diagnostic(code(xero_xml::encode_error))]
    Encode(#[source] quick_xml::SeError),

    /// A `400 Bad Request` carrying a structured exception body, such as a
    /// `ValidationException`.
    #[error("{0}")]
    #[diagnostic(
        code(xero_xml::api_exception),
        help("Review the validation errors returned by the Xero API")
    )]
    Api(ApiException),

    /// Any other non-200 response. The body is kept verbatim since it is not
    /// guaranteed to be XML.
    #[error(
        "{}: {} ({method}: {path}) {}",
        .status.as_u16(),
        .status.canonical_reason().unwrap_or("Unknown"),
        String::from_utf8_lossy(.body)
    )]
    #[diagnostic(code(xero_xml::http_status))]
    Http {
        status: StatusCode,
        method: Method,
        path: String,
        body: Vec<u8>,
        span_trace: SpanTrace,
    },

    #[error("{entity} {identifier} not found")]
    #[diagnostic(
        code(xero_xml::not_found),
        help("Verify that the {entity} exists and that you have permission to access it")
    )]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("oauth2 error: {0}")]
    #[diagnostic(
        code(xero_xml::oauth2_error),
        help("Verify your OAuth2 configuration and credentials")
    )]
    OAuth2(#[from] RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>),

    #[error(transparent)]
    #[diagnostic(code(xero_xml::pem))]
    Pem(#[from] PemError),
}

impl Error {
    /// The span trace captured where the error was raised, if any.
    #[must_use]
    pub fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            Self::Request { span_trace, .. } | Self::Http { span_trace, .. } => Some(span_trace),
            _ => None,
        }
    }

    /// The HTTP status behind the error, if the server answered.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Api(_) => Some(StatusCode::BAD_REQUEST),
            Self::Request { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The structured exception of a `400` response.
    #[must_use]
    pub fn api_exception(&self) -> Option<&ApiException> {
        match self {
            Self::Api(exception) => Some(exception),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Request {
            source,
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(e: quick_xml::DeError) -> Self {
        match e {
            quick_xml::DeError::Custom(message) => Self::InvalidData(message),
            e => Self::Xml(e),
        }
    }
}

/// Type alias for results from this crate.
pub type Result<O> = std::result::Result<O, Error>;
