use std::fmt;
use std::sync::Arc;

use reqwest::{
    Method, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing_error::SpanTrace;
use url::Url;
use uuid::Uuid;

use crate::authorizer::{Authorizer, NoAuthorization};
use crate::capability::{Getter, Poster, Putter};
use crate::codec::{self, Encode};
use crate::endpoints::{self, BASE_URL, Endpoint, set_query_param};
use crate::entities::{
    Collection, Response,
    account::{self, Account, Accounts},
    bank_transaction::{self, BankTransaction, BankTransactions},
    bank_transfer::{self, BankTransfer, BankTransfers},
    branding_theme::{self, BrandingTheme},
    contact::{self, Contact, Contacts},
    invoice::{self, Invoice, Invoices},
};
use crate::error::{ApiException, Error, Result};
use crate::pagination::{Page, PageIterator};

const APPLICATION_XML: &str = "application/xml";
const SUMMARIZE_ERRORS: &str = "SummarizeErrors";

/// This is the client that is used for interacting with the Xero API. Every
/// request goes through the same pipeline: URL, `Accept` header,
/// authorization, body, send, status classification, decode.
///
/// Cloning is cheap; clones share the connection pool and the authorizer.
#[derive(Clone)]
pub struct Client {
    authorizer: Arc<dyn Authorizer>,
    http: reqwest::Client,
    base: Url,
}

/// Configures a [`Client`].
pub struct ClientBuilder {
    base_url: String,
    http_client: Option<reqwest::Client>,
    authorizer: Arc<dyn Authorizer>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            http_client: None,
            authorizer: Arc::new(NoAuthorization),
        }
    }
}

impl ClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// API root, `https://api.xero.com/api.xro/2.0/` by default.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Transport to send requests with. Timeouts and proxies are configured
    /// on it.
    #[must_use]
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    #[must_use]
    pub fn authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Arc::new(authorizer);
        self
    }

    pub fn build(self) -> Result<Client> {
        Ok(Client {
            authorizer: self.authorizer,
            http: self.http_client.unwrap_or_default(),
            base: Url::parse(&self.base_url)?,
        })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// A client for the public API authorized by `authorizer`.
    pub fn new(authorizer: impl Authorizer + 'static) -> Result<Self> {
        Self::builder().authorizer(authorizer).build()
    }

    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds `<base>/<endpoint>/<extra>...`.
    pub fn url(&self, endpoint: &Endpoint, extra: &[&str]) -> Result<Url> {
        let path = endpoint.path();
        let mut segments = Vec::with_capacity(extra.len() + 1);
        segments.push(path.as_str());
        segments.extend_from_slice(extra);
        endpoints::join(&self.base, &segments)
    }

    /// Authorizes and sends one request, returning the response once it has
    /// passed [`Client::check_response`].
    #[instrument(skip(self, url, body), fields(url = %url))]
    async fn send(
        &self,
        method: Method,
        mut url: Url,
        body: Option<String>,
    ) -> Result<reqwest::Response> {
        if method == Method::POST || method == Method::PUT {
            set_query_param(&mut url, SUMMARIZE_ERRORS, "false");
        }

        let mut request = reqwest::Request::new(method.clone(), url);
        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static(APPLICATION_XML));

        self.authorizer
            .authorize_request(&mut request)
            .map_err(Error::Authorization)?;

        if let Some(body) = body {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_XML));
            *request.body_mut() = Some(body.into());
        }

        trace!(%method, url = %request.url(), "making request");
        let response = self.http.execute(request).await?;
        Self::check_response(&method, response).await
    }

    /// Classifies a response by status.
    ///
    /// * `200` is returned untouched, its body unread.
    /// * `400` carries an [`ApiException`] and becomes [`Error::Api`].
    /// * Anything else becomes [`Error::Http`] with the raw body.
    #[instrument(skip(response), fields(status = %response.status()))]
    pub async fn check_response(
        method: &Method,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        debug!(url = %response.url(), "received response");
        if status == StatusCode::OK {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.bytes().await?.to_vec();

        if status == StatusCode::BAD_REQUEST {
            let exception: ApiException = quick_xml::de::from_reader(body.as_slice())
                .map_err(|e| {
                    error!(error = %e, "failed to decode API exception");
                    Error::Xml(e)
                })?;
            warn!(
                error_number = exception.error_number,
                message = %exception.message,
                "request rejected"
            );
            return Err(Error::Api(exception));
        }

        error!(%status, %method, %path, "unexpected status code");
        Err(Error::Http {
            status,
            method: method.clone(),
            path,
            body,
            span_trace: SpanTrace::capture(),
        })
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> Result<R> {
        let response = self.send(method, url, body).await?;
        let bytes = response.bytes().await?;
        trace!(len = bytes.len(), "decoding response body");
        codec::decode(&bytes).inspect_err(|e| error!(error = %e, "failed to decode response"))
    }

    /// `GET` an arbitrary URL, returning the checked response.
    pub async fn get_response(&self, url: &str) -> Result<reqwest::Response> {
        let url = Url::parse(url)?;
        self.send(Method::GET, url, None).await
    }

    /// `POST` an arbitrary URL, returning the checked response.
    pub async fn post_response<P>(&self, url: &str, payload: &P) -> Result<reqwest::Response>
    where
        P: Encode + ?Sized,
    {
        let url = Url::parse(url)?;
        let body = payload.encode()?;
        self.send(Method::POST, url, Some(body)).await
    }

    /// `PUT` an arbitrary URL, returning the checked response.
    pub async fn put_response<P>(&self, url: &str, payload: &P) -> Result<reqwest::Response>
    where
        P: Encode + ?Sized,
    {
        let url = Url::parse(url)?;
        let body = payload.encode()?;
        self.send(Method::PUT, url, Some(body)).await
    }

    /// Every record of an unpaginated collection.
    pub async fn fetch_all<C: Collection>(&self, endpoint: Endpoint) -> Result<Vec<C::Item>> {
        let url = self.url(&endpoint, &[])?;
        let response: Response<C> = self.get(url).await?;
        Ok(response.into_items())
    }

    /// The first record at `<endpoint>/<identifier>`.
    pub async fn fetch_one<C: Collection>(
        &self,
        endpoint: Endpoint,
        identifier: &str,
        entity: &'static str,
    ) -> Result<C::Item> {
        let url = self.url(&endpoint, &[identifier])?;
        let response: Response<C> = self.get(url).await?;
        response
            .into_items()
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                entity,
                identifier: identifier.to_string(),
            })
    }

    /// The first page of a paginated collection.
    pub async fn paginate<C: Collection>(&self, endpoint: Endpoint) -> Result<Page<'_, Self, C>> {
        let root = self.url(&endpoint, &[])?;
        PageIterator::new(self, root).next().await
    }

    /// Creates records (`PUT`).
    pub async fn create<C>(&self, endpoint: Endpoint, payload: &C) -> Result<Response<C>>
    where
        C: Collection + Serialize + Sync,
    {
        let url = self.url(&endpoint, &[])?;
        self.put(url, payload).await
    }

    /// Creates or updates records (`POST`).
    pub async fn create_update<C>(&self, endpoint: Endpoint, payload: &C) -> Result<Response<C>>
    where
        C: Collection + Serialize + Sync,
    {
        let url = self.url(&endpoint, &[])?;
        self.post(url, payload).await
    }

    /// Access the accounts API
    #[must_use]
    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi { client: self }
    }

    /// Access the contacts API
    #[must_use]
    pub fn contacts(&self) -> ContactsApi<'_> {
        ContactsApi { client: self }
    }

    /// Access the bank transactions API
    #[must_use]
    pub fn bank_transactions(&self) -> BankTransactionsApi<'_> {
        BankTransactionsApi { client: self }
    }

    /// Access the bank transfers API
    #[must_use]
    pub fn bank_transfers(&self) -> BankTransfersApi<'_> {
        BankTransfersApi { client: self }
    }

    /// Access the invoices API
    #[must_use]
    pub fn invoices(&self) -> InvoicesApi<'_> {
        InvoicesApi { client: self }
    }

    /// Access the branding themes API
    #[must_use]
    pub fn branding_themes(&self) -> BrandingThemesApi<'_> {
        BrandingThemesApi { client: self }
    }
}

impl Getter for Client {
    #[instrument(skip(self))]
    async fn get<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        self.fetch(Method::GET, url, None).await
    }
}

impl Poster for Client {
    #[instrument(skip(self, payload))]
    async fn post<R, P>(&self, url: Url, payload: &P) -> Result<R>
    where
        R: DeserializeOwned,
        P: Encode + Sync + ?Sized,
    {
        let body = payload.encode()?;
        self.fetch(Method::POST, url, Some(body)).await
    }
}

impl Putter for Client {
    #[instrument(skip(self, payload))]
    async fn put<R, P>(&self, url: Url, payload: &P) -> Result<R>
    where
        R: DeserializeOwned,
        P: Encode + Sync + ?Sized,
    {
        let body = payload.encode()?;
        self.fetch(Method::PUT, url, Some(body)).await
    }
}

/// API handle for accounts
pub struct AccountsApi<'a> {
    client: &'a Client,
}

impl AccountsApi<'_> {
    /// Retrieve the chart of accounts
    pub async fn list(&self) -> Result<Vec<Account>> {
        account::list(self.client).await
    }

    pub async fn get(&self, account_id: Uuid) -> Result<Account> {
        account::get(self.client, account_id).await
    }

    pub async fn create(&self, accounts: &Accounts) -> Result<Vec<Account>> {
        account::create(self.client, accounts).await
    }

    pub async fn create_update(&self, accounts: &Accounts) -> Result<Vec<Account>> {
        account::create_update(self.client, accounts).await
    }
}

/// API handle for contacts
pub struct ContactsApi<'a> {
    client: &'a Client,
}

impl<'a> ContactsApi<'a> {
    /// Retrieve the first page of contacts
    pub async fn list(&self) -> Result<Page<'a, Client, Contacts>> {
        contact::list(self.client).await
    }

    pub async fn get(&self, contact_id: Uuid) -> Result<Contact> {
        contact::get(self.client, contact_id).await
    }

    pub async fn create(&self, contacts: &Contacts) -> Result<Vec<Contact>> {
        contact::create(self.client, contacts).await
    }

    pub async fn create_update(&self, contacts: &Contacts) -> Result<Vec<Contact>> {
        contact::create_update(self.client, contacts).await
    }
}

/// API handle for bank transactions
pub struct BankTransactionsApi<'a> {
    client: &'a Client,
}

impl<'a> BankTransactionsApi<'a> {
    /// Retrieve the first page of bank transactions
    pub async fn list(&self) -> Result<Page<'a, Client, BankTransactions>> {
        bank_transaction::list(self.client).await
    }

    pub async fn get(&self, bank_transaction_id: Uuid) -> Result<BankTransaction> {
        bank_transaction::get(self.client, bank_transaction_id).await
    }

    pub async fn create(&self, transactions: &BankTransactions) -> Result<Vec<BankTransaction>> {
        bank_transaction::create(self.client, transactions).await
    }

    pub async fn create_update(
        &self,
        transactions: &BankTransactions,
    ) -> Result<Vec<BankTransaction>> {
        bank_transaction::create_update(self.client, transactions).await
    }
}

/// API handle for bank transfers
pub struct BankTransfersApi<'a> {
    client: &'a Client,
}

impl BankTransfersApi<'_> {
    pub async fn list(&self) -> Result<Vec<BankTransfer>> {
        bank_transfer::list(self.client).await
    }

    pub async fn get(&self, bank_transfer_id: Uuid) -> Result<BankTransfer> {
        bank_transfer::get(self.client, bank_transfer_id).await
    }

    pub async fn create(&self, transfers: &BankTransfers) -> Result<Vec<BankTransfer>> {
        bank_transfer::create(self.client, transfers).await
    }
}

/// API handle for invoices
pub struct InvoicesApi<'a> {
    client: &'a Client,
}

impl<'a> InvoicesApi<'a> {
    /// Retrieve the first page of invoices
    pub async fn list(&self) -> Result<Page<'a, Client, Invoices>> {
        invoice::list(self.client).await
    }

    pub async fn get(&self, invoice_id: Uuid) -> Result<Invoice> {
        invoice::get(self.client, invoice_id).await
    }

    pub async fn create(&self, invoices: &Invoices) -> Result<Vec<Invoice>> {
        invoice::create(self.client, invoices).await
    }

    pub async fn create_update(&self, invoices: &Invoices) -> Result<Vec<Invoice>> {
        invoice::create_update(self.client, invoices).await
    }
}

/// API handle for branding themes
pub struct BrandingThemesApi<'a> {
    client: &'a Client,
}

impl BrandingThemesApi<'_> {
    pub async fn list(&self) -> Result<Vec<BrandingTheme>> {
        branding_theme::list(self.client).await
    }
}
