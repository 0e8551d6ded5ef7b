use std::net::TcpListener;
use std::time::Duration;

use httpmock::Method::POST;
use url::Url;

use creditsafe_rs::{CreditsafeError, TransportOptions};

use crate::common::{self, SOAP_PATH, fixture};

/// An address nothing is listening on.
fn closed_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{port}{SOAP_PATH}")).unwrap()
}

#[tokio::test]
async fn refused_connection_is_an_http_error() {
    let client = common::client_with_options(TransportOptions::new().endpoint(closed_endpoint()));

    let err = client.find_company(Some("GB"), Some("1")).await.unwrap_err();
    assert!(err.is_http(), "got {err:?}");
    match err {
        CreditsafeError::Http(message) => assert!(!message.is_empty()),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn timeout_is_an_http_error() {
    let server = common::setup_server();
    let _mock = server.mock(|when, then| {
        when.method(POST).path(SOAP_PATH);
        then.status(200)
            .delay(Duration::from_millis(500))
            .body(fixture("find_companies", "ok", "xml"));
    });

    let client = common::client_with_options(
        TransportOptions::new()
            .endpoint(common::endpoint(&server))
            .timeout(Duration::from_millis(50)),
    );

    let err = client.find_company(Some("GB"), Some("1")).await.unwrap_err();
    assert!(matches!(err, CreditsafeError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn transport_survives_a_failed_call() {
    let server = common::setup_server();
    let client = common::client_for(&server);

    let failing = server.mock(|when, then| {
        when.method(POST).path(SOAP_PATH);
        then.status(502);
    });
    let err = client.find_company(Some("GB"), Some("1")).await.unwrap_err();
    assert!(matches!(err, CreditsafeError::Api { .. }), "got {err:?}");
    failing.assert();
    assert!(client.transport_ready());
}
