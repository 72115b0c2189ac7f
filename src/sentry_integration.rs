//! Sentry integration for xero-xml errors.
//!
//! This module is only available when the `sentry` feature is enabled.
//!
//! ```toml
//! [dependencies]
//! xero-xml = { version = "0.1", features = ["sentry"] }
//! ```
//!
//! Span traces are only captured when the subscriber has an `ErrorLayer`:
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
//! ```

use std::collections::BTreeMap;

use sentry_core::{Breadcrumb, protocol::Value};

use crate::error::Error;

const BODY_PREVIEW_LIMIT: usize = 500;

/// Convert an xero-xml Error into a Sentry breadcrumb.
impl<'a> From<&'a Error> for Breadcrumb {
    fn from(error: &'a Error) -> Self {
        let mut data = BTreeMap::new();
        let category = match error {
            Error::Request { .. } => "http.request",
            Error::Authorization(_) | Error::OAuth2(_) | Error::Pem(_) => "auth",
            Error::InvalidUrl(_) => "xero.config",
            Error::Xml(_) | Error::InvalidData(_) | Error::Encode(_) => "xero.codec",
            Error::Api(exception) => {
                data.insert(
                    "error_number".to_string(),
                    Value::from(exception.error_number),
                );
                data.insert(
                    "error_type".to_string(),
                    Value::from(exception.type_name.clone()),
                );
                "xero.api"
            }
            Error::Http {
                status,
                method,
                path,
                ..
            } => {
                data.insert("status_code".to_string(), Value::from(status.as_u16()));
                data.insert("method".to_string(), Value::from(method.to_string()));
                data.insert("path".to_string(), Value::from(path.clone()));
                "http.response"
            }
            Error::NotFound { entity, identifier } => {
                data.insert("entity".to_string(), Value::from(*entity));
                data.insert("identifier".to_string(), Value::from(identifier.clone()));
                "xero.lookup"
            }
        };

        Breadcrumb {
            ty: "error".to_string(),
            category: Some(category.to_string()),
            message: Some(error.to_string()),
            data,
            level: sentry_core::Level::Error,
            ..Default::default()
        }
    }
}

/// Convert an xero-xml Error into Sentry context data.
///
/// ```ignore
/// use sentry::configure_scope;
/// use xero_xml::sentry_integration::error_to_sentry_context;
///
/// if let Err(e) = client.accounts().list().await {
///     configure_scope(|scope| {
///         for (key, value) in error_to_sentry_context(&e) {
///             scope.set_extra(&key, value);
///         }
///     });
/// }
/// ```
pub fn error_to_sentry_context(error: &Error) -> BTreeMap<String, Value> {
    let mut context = BTreeMap::new();

    if let Some(span_trace) = error.span_trace() {
        context.insert(
            "xero.span_trace".to_string(),
            Value::from(format!("{span_trace}")),
        );
    }

    if let Some(status) = error.status_code() {
        context.insert("xero.status_code".to_string(), Value::from(status.as_u16()));
    }

    if let Error::Http { body, .. } = error {
        let body = String::from_utf8_lossy(body);
        let preview: String = body.chars().take(BODY_PREVIEW_LIMIT).collect();
        context.insert("xero.response_body".to_string(), Value::from(preview));
    }

    if let Some(exception) = error.api_exception() {
        context.insert(
            "xero.error_number".to_string(),
            Value::from(exception.error_number),
        );
        context.insert(
            "xero.message".to_string(),
            Value::from(exception.message.clone()),
        );
        let messages: Vec<Value> = exception
            .elements()
            .iter()
            .flat_map(|element| element.validation_errors())
            .map(|e| Value::from(e.message.clone()))
            .collect();
        if !messages.is_empty() {
            context.insert("xero.validation_errors".to_string(), Value::Array(messages));
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use tracing_error::SpanTrace;

    use super::*;

    #[test]
    fn http_error_breadcrumb_records_request() {
        let error = Error::Http {
            status: StatusCode::SERVICE_UNAVAILABLE,
            method: Method::GET,
            path: "/api.xro/2.0/Accounts".to_string(),
            body: b"offline".to_vec(),
            span_trace: SpanTrace::capture(),
        };

        let breadcrumb = Breadcrumb::from(&error);
        assert_eq!(breadcrumb.category.as_deref(), Some("http.response"));
        assert_eq!(breadcrumb.data["status_code"], Value::from(503));
        assert_eq!(breadcrumb.data["method"], Value::from("GET"));

        let context = error_to_sentry_context(&error);
        assert_eq!(context["xero.response_body"], Value::from("offline"));
    }

    #[test]
    fn not_found_breadcrumb_names_the_record() {
        let error = Error::NotFound {
            entity: "account",
            identifier: "297c2dc5-cc47-4afd-8ec8-74990b8761e9".to_string(),
        };
        let breadcrumb = Breadcrumb::from(&error);
        assert_eq!(breadcrumb.category.as_deref(), Some("xero.lookup"));
        assert_eq!(breadcrumb.data["entity"], Value::from("account"));
    }
}
