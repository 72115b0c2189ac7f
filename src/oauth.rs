use oauth2::{AccessToken, Scope, TokenResponse, TokenUrl, basic::BasicClient};
use reqwest::{
    Request,
    header::{AUTHORIZATION, HeaderValue},
};
use uuid::Uuid;

use crate::authorizer::{AuthorizationError, Authorizer};
use crate::error::Result;

const XERO_TOKEN_URL: &str = "https://identity.xero.com/connect/token";
const TENANT_HEADER: &str = "Xero-tenant-id";

/// Stores the OAuth 2 client ID and client secret.
#[derive(Debug, Clone)]
pub struct KeyPair(
    pub(crate) oauth2::ClientId,
    pub(crate) Option<oauth2::ClientSecret>,
);

impl KeyPair {
    /// Creates a new `KeyPair` from the provided `client_id` and `client_secret` strings.
    #[must_use]
    pub fn new(client_id: String, client_secret: Option<String>) -> Self {
        Self(
            oauth2::ClientId::new(client_id),
            client_secret.map(oauth2::ClientSecret::new),
        )
    }

    /// Reads `XERO_CLIENT_ID` and the optional `XERO_CLIENT_SECRET`.
    /// Returns `None` when `XERO_CLIENT_ID` is not set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("XERO_CLIENT_ID").ok()?;
        Some(Self::new(client_id, std::env::var("XERO_CLIENT_SECRET").ok()))
    }
}

/// Authorizes requests with an OAuth 2 bearer token, scoped to a tenant when
/// one is set.
#[derive(Debug, Clone)]
pub struct BearerToken {
    access_token: AccessToken,
    tenant_id: Option<Uuid>,
}

impl BearerToken {
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken::new(access_token.into()),
            tenant_id: None,
        }
    }

    /// Sends `Xero-tenant-id` with every request.
    #[must_use]
    pub fn with_tenant(mut self, tenant_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    #[must_use]
    pub fn tenant_id(&self) -> Option<Uuid> {
        self.tenant_id
    }

    /// Obtains a token from the Xero identity service through the client
    /// credentials grant.
    pub async fn from_client_credentials(key_pair: KeyPair, scopes: &[&str]) -> Result<Self> {
        Self::from_client_credentials_at(XERO_TOKEN_URL, key_pair, scopes).await
    }

    /// Like [`BearerToken::from_client_credentials`] against another token
    /// endpoint.
    #[instrument(skip(key_pair, scopes))]
    pub async fn from_client_credentials_at(
        token_url: &str,
        key_pair: KeyPair,
        scopes: &[&str],
    ) -> Result<Self> {
        let mut client =
            BasicClient::new(key_pair.0).set_token_uri(TokenUrl::new(token_url.to_string())?);
        if let Some(secret) = key_pair.1 {
            client = client.set_client_secret(secret);
        }

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let token = client
            .exchange_client_credentials()
            .add_scopes(scopes.iter().map(|scope| Scope::new((*scope).to_string())))
            .request_async(&http_client)
            .await?;

        debug!(expires_in = ?token.expires_in(), "obtained access token");
        Ok(Self {
            access_token: token.access_token().clone(),
            tenant_id: None,
        })
    }
}

impl Authorizer for BearerToken {
    fn authorize_request(
        &self,
        request: &mut Request,
    ) -> std::result::Result<(), AuthorizationError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.access_token.secret()))?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);

        if let Some(tenant_id) = self.tenant_id {
            request
                .headers_mut()
                .insert(TENANT_HEADER, HeaderValue::from_str(&tenant_id.to_string())?);
        }
        Ok(())
    }
}
