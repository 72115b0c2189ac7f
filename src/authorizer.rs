//! The request authorization hook.
//!
//! The client never builds credentials itself. Every outgoing request is handed
//! to an [`Authorizer`] after its method, URL and headers are set and before a
//! body is attached. The authorizer may add headers (or rewrite the request)
//! and may refuse, in which case nothing is sent.

use std::error::Error as StdError;

use reqwest::Request;

/// Failure reported by an [`Authorizer`]. Opaque to the client.
pub type AuthorizationError = Box<dyn StdError + Send + Sync>;

pub trait Authorizer: Send + Sync {
    fn authorize_request(&self, request: &mut Request) -> Result<(), AuthorizationError>;
}

impl<F> Authorizer for F
where
    F: Fn(&mut Request) -> Result<(), AuthorizationError> + Send + Sync,
{
    fn authorize_request(&self, request: &mut Request) -> Result<(), AuthorizationError> {
        self(request)
    }
}

/// Sends requests unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAuthorization;

impl Authorizer for NoAuthorization {
    fn authorize_request(&self, _request: &mut Request) -> Result<(), AuthorizationError> {
        Ok(())
    }
}
