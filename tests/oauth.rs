
use miette::Result;
use oauth2::{RequestTokenError, basic::BasicErrorResponseType};
use reqwest::Method;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xero_xml::{Authorizer, BearerToken, Error, KeyPair};

use test_utils::do_setup;

fn key_pair() -> KeyPair {
    KeyPair::new("client-id".to_string(), Some("client-secret".to_string()))
}

#[tokio::test]
async fn client_credentials_exchange_yields_a_bearer_token() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .and(header_exists("authorization"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("scope=accounting.transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"access_token":"issued-token","token_type":"Bearer","expires_in":1800}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let token = BearerToken::from_client_credentials_at(
        &format!("{}/connect/token", server.uri()),
        key_pair(),
        &["accounting.transactions"],
    )
    .await?;
    assert_eq!(token.tenant_id(), None);

    let mut request = reqwest::Request::new(
        Method::GET,
        "https://api.xero.com/api.xro/2.0/Accounts".parse().unwrap(),
    );
    token.authorize_request(&mut request).unwrap();
    assert_eq!(request.headers()["authorization"], "Bearer issued-token");
    Ok(())
}

#[tokio::test]
async fn rejected_credentials_surface_as_oauth2_errors() {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_raw(r#"{"error":"invalid_client"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = BearerToken::from_client_credentials_at(
        &format!("{}/connect/token", server.uri()),
        key_pair(),
        &[],
    )
    .await
    .unwrap_err();

    match err {
        Error::OAuth2(RequestTokenError::ServerResponse(response)) => {
            assert_eq!(*response.error(), BasicErrorResponseType::InvalidClient);
        }
        other => panic!("expected an OAuth2 server response, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_token_url_is_rejected() {
    let err = BearerToken::from_client_credentials_at("not a url", key_pair(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)), "{err:?}");
}
