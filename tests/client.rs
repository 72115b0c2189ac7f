
use miette::Result;
use reqwest::{Method, Request, StatusCode, header::HeaderValue};
use rust_decimal_macros::dec;
use uuid::uuid;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xero_xml::authorizer::AuthorizationError;
use xero_xml::entities::account::{Account, AccountType, Accounts};
use xero_xml::entities::bank_transfer::BankTransfer;
use xero_xml::entities::contact::{Contact, Contacts};
use xero_xml::{BearerToken, Client, Error, NoAuthorization, Page};

use test_utils::{do_setup, envelope, mock_client};

const ACCOUNT_XML: &str = "<Accounts><Account>\
    <AccountID>297c2dc5-cc47-4afd-8ec8-74990b8761e9</AccountID>\
    <Code>200</Code>\
    <Name>Sales</Name>\
    <Type>REVENUE</Type>\
    <Status>ACTIVE</Status>\
    </Account></Accounts>";

fn xml(status: u16, body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("Content-Type", "application/xml")
        .set_body_string(body.into())
}

fn new_account() -> Accounts {
    Accounts::from(vec![Account {
        code: Some("201".to_string()),
        name: Some("Consulting".to_string()),
        account_type: Some(AccountType::Revenue),
        ..Default::default()
    }])
}

#[tokio::test]
async fn get_sends_accept_header_and_authorization() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;
    let tenant = uuid!("70784a63-d24b-46a9-a4db-0e70a274b056");

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Accounts"))
        .and(header("Accept", "application/xml"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Xero-tenant-id", "70784a63-d24b-46a9-a4db-0e70a274b056"))
        .respond_with(xml(200, envelope(ACCOUNT_XML)))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server, BearerToken::new("test-token").with_tenant(tenant));
    let accounts = client.accounts().list().await?;

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name.as_deref(), Some("Sales"));
    assert_eq!(accounts[0].account_type, Some(AccountType::Revenue));
    Ok(())
}

#[tokio::test]
async fn get_never_sets_summarize_errors() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Accounts"))
        .respond_with(xml(200, envelope(ACCOUNT_XML)))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    client.accounts().list().await?;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0]
            .url
            .query_pairs()
            .all(|(key, _)| key != "SummarizeErrors"),
        "{}",
        requests[0].url
    );
    Ok(())
}

#[tokio::test]
async fn put_disables_error_summaries_and_sends_xml_body() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api.xro/2.0/Accounts"))
        .and(query_param("SummarizeErrors", "false"))
        .and(header("Accept", "application/xml"))
        .and(header("Content-Type", "application/xml"))
        .and(body_string_contains("<Accounts><Account>"))
        .and(body_string_contains("<Code>201</Code>"))
        .and(body_string_contains("<Type>REVENUE</Type>"))
        .respond_with(xml(200, envelope(ACCOUNT_XML)))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let created = client.accounts().create(&new_account()).await?;
    assert_eq!(created.len(), 1);
    Ok(())
}

#[tokio::test]
async fn post_overwrites_existing_summarize_errors() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api.xro/2.0/Contacts"))
        .respond_with(xml(200, envelope("<Contacts/>")))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let contacts = Contacts::from(vec![Contact {
        name: Some("ABC Limited".to_string()),
        ..Default::default()
    }]);
    let url = format!(
        "{}/api.xro/2.0/Contacts?SummarizeErrors=true&where=Name%3D%22ABC%22",
        server.uri()
    );
    client.post_response(&url, &contacts).await?;

    let requests = server.received_requests().await.unwrap();
    let pairs: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let summaries: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == "SummarizeErrors")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(summaries, ["false"]);
    assert!(pairs.contains(&("where".to_string(), "Name=\"ABC\"".to_string())));
    Ok(())
}

#[tokio::test]
async fn refused_authorization_sends_nothing() {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(xml(200, envelope(ACCOUNT_XML)))
        .expect(0)
        .mount(&server)
        .await;

    let refuse = |_: &mut Request| -> std::result::Result<(), AuthorizationError> {
        Err("token expired".into())
    };
    let client = mock_client(&server, refuse);

    let err = client.accounts().list().await.unwrap_err();
    match err {
        Error::Authorization(source) => assert_eq!(source.to_string(), "token expired"),
        other => panic!("expected an authorization error, got {other:?}"),
    }
}

#[tokio::test]
async fn authorizer_runs_before_the_body_is_attached() {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(header("X-Signed", "PUT"))
        .respond_with(xml(200, envelope(ACCOUNT_XML)))
        .expect(1)
        .mount(&server)
        .await;

    let sign = |request: &mut Request| -> std::result::Result<(), AuthorizationError> {
        assert!(request.body().is_none());
        let method = HeaderValue::from_str(request.method().as_str())?;
        request.headers_mut().insert("X-Signed", method);
        Ok(())
    };
    let client = mock_client(&server, sign);
    client.accounts().create(&new_account()).await.unwrap();
}

#[tokio::test]
async fn ok_response_body_is_left_untouched() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;
    let body = "<Response><Anything>goes</Anything></Response>";

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Organisation"))
        .respond_with(xml(200, body))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let response = client
        .get_response(&format!("{}/api.xro/2.0/Organisation", server.uri()))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), body);
    Ok(())
}

#[tokio::test]
async fn bad_request_becomes_api_exception() {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api.xro/2.0/Contacts"))
        .respond_with(xml(
            400,
            r#"<ApiException xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <ErrorNumber>10</ErrorNumber>
  <Type>ValidationException</Type>
  <Message>A validation exception occurred</Message>
  <Elements>
    <DataContractBase xsi:type="Contact">
      <ValidationErrors>
        <ValidationError>
          <Message>The contact name ABC Limited is already assigned to another contact.</Message>
        </ValidationError>
      </ValidationErrors>
    </DataContractBase>
  </Elements>
</ApiException>"#,
        ))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let contacts = Contacts::from(vec![Contact {
        name: Some("ABC Limited".to_string()),
        ..Default::default()
    }]);
    let err = client.contacts().create_update(&contacts).await.unwrap_err();

    assert_eq!(err.status_code(), Some(StatusCode::BAD_REQUEST));
    let exception = err.api_exception().expect("an API exception");
    assert_eq!(exception.error_number, 10);
    assert_eq!(exception.type_name, "ValidationException");
    assert_eq!(exception.elements()[0].type_name, "Contact");
    assert_eq!(
        exception.elements()[0].validation_errors()[0].message,
        "The contact name ABC Limited is already assigned to another contact."
    );
}

#[tokio::test]
async fn bad_request_without_xml_is_a_decode_error() {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let err = client.accounts().list().await.unwrap_err();
    assert!(matches!(err, Error::Xml(_)), "{err:?}");
}

#[tokio::test]
async fn other_statuses_keep_method_path_and_body() {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Accounts"))
        .respond_with(ResponseTemplate::new(503).set_body_string("offline"))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let err = client.accounts().list().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "503: Service Unavailable (GET: /api.xro/2.0/Accounts) offline"
    );
    match err {
        Error::Http {
            status,
            method,
            body,
            ..
        } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(method, Method::GET);
            assert_eq!(body, b"offline");
        }
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_is_not_an_api_exception() {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("AuthenticationUnsuccessful"))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let err = client.accounts().list().await.unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::UNAUTHORIZED));
    assert!(err.api_exception().is_none());
}

#[tokio::test]
async fn malformed_ok_body_is_a_decode_error() {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(xml(200, "<Response><Accounts><Account>"))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let err = client.accounts().list().await.unwrap_err();
    assert!(matches!(err, Error::Xml(_)), "{err:?}");
}

#[tokio::test]
async fn unknown_enum_member_is_invalid_data() {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(xml(
            200,
            envelope("<Accounts><Account><Type>SAVINGS</Type></Account></Accounts>"),
        ))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let err = client.accounts().list().await.unwrap_err();
    match err {
        Error::InvalidData(message) => {
            assert!(message.contains("unsupported account type: SAVINGS"), "{message}");
        }
        other => panic!("expected invalid data, got {other:?}"),
    }
}

#[tokio::test]
async fn get_by_id_reports_missing_records() {
    do_setup();
    let server = MockServer::start().await;
    let id = uuid!("297c2dc5-cc47-4afd-8ec8-74990b8761e9");

    Mock::given(method("GET"))
        .and(path(format!("/api.xro/2.0/Accounts/{id}")))
        .respond_with(xml(200, envelope("<Accounts/>")))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let err = client.accounts().get(id).await.unwrap_err();
    match err {
        Error::NotFound { entity, identifier } => {
            assert_eq!(entity, "account");
            assert_eq!(identifier, id.to_string());
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn get_by_id_returns_the_first_record() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;
    let id = uuid!("297c2dc5-cc47-4afd-8ec8-74990b8761e9");

    Mock::given(method("GET"))
        .and(path(format!("/api.xro/2.0/Accounts/{id}")))
        .respond_with(xml(200, envelope(ACCOUNT_XML)))
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let account = client.accounts().get(id).await?;
    assert_eq!(account.account_id, Some(id));
    Ok(())
}

#[tokio::test]
async fn bank_transfers_are_listed_from_their_own_collection() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/BankTransfers"))
        .respond_with(xml(
            200,
            envelope(
                "<BankTransfers><BankTransfer>\
                 <BankTransferID>6221c8b2-5b4b-4d3a-8ff1-4d7d9bc1e6f5</BankTransferID>\
                 <Date>2014-02-26T00:00:00</Date>\
                 <Amount>20.00</Amount>\
                 </BankTransfer></BankTransfers>",
            ),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let transfers: Vec<BankTransfer> = client.bank_transfers().list().await?;
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].amount, Some(dec!(20.00)));
    Ok(())
}

#[tokio::test]
async fn paginated_list_starts_on_page_one() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Contacts"))
        .and(query_param("page", "1"))
        .respond_with(xml(
            200,
            envelope("<Contacts><Contact><Name>ABC Limited</Name></Contact></Contacts>"),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Contacts"))
        .and(query_param("page", "2"))
        .respond_with(xml(200, envelope("<Contacts/>")))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server, NoAuthorization);
    let mut names = Vec::new();
    let mut page = client.contacts().list().await?;
    while let Page::Records { next, records } = page {
        names.extend(records.into_iter().filter_map(|contact| contact.name));
        page = next.next().await?;
    }
    assert_eq!(names, ["ABC Limited"]);
    Ok(())
}

#[test]
fn default_client_targets_the_public_api() {
    let client = Client::new(NoAuthorization).unwrap();
    assert_eq!(
        client.base_url().as_str(),
        "https://api.xero.com/api.xro/2.0/"
    );
}
