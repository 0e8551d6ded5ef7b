#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::{fs, path::Path};

use creditsafe_rs::soap::CallFuture;
use creditsafe_rs::{
    CreditsafeClient, Credentials, Operation, RequestParams, SoapResponse, SoapTransport,
    TransportError, TransportOptions,
};
use httpmock::{Method::POST, Mock, MockServer};
use url::Url;

pub const SOAP_PATH: &str = "/GlobalData/1.3/MainServiceBasic.svc";
pub const USERNAME: &str = "user";
pub const PASSWORD: &str = "s3cr3t-pw";
/// base64("user:s3cr3t-pw")
pub const BASIC_AUTH: &str = "Basic dXNlcjpzM2NyM3QtcHc=";
pub const FIND_COMPANIES_ACTION: &str =
    "http://www.creditsafe.com/globaldata/operations/CompanyDataAccessService/FindCompanies";
pub const REPORT_ACTION: &str = "http://www.creditsafe.com/globaldata/operations/CompanyDataAccessService/RetrieveCompanyOnlineReport";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, case: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, case, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn credentials() -> Credentials {
    Credentials::new(USERNAME, PASSWORD)
}

pub fn endpoint(server: &MockServer) -> Url {
    Url::parse(&server.url(SOAP_PATH)).unwrap()
}

/// A test-environment client whose HTTP transport points at `server`.
pub fn client_for(server: &MockServer) -> CreditsafeClient {
    client_with_options(TransportOptions::new().endpoint(endpoint(server)))
}

pub fn client_with_options(options: TransportOptions) -> CreditsafeClient {
    CreditsafeClient::builder("test", credentials())
        .transport_options(options)
        .build()
        .unwrap()
}

pub fn mock_soap<'a>(server: &'a MockServer, action: &'a str, status: u16, body: String) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST)
            .path(SOAP_PATH)
            .header("soapaction", action)
            .header("authorization", BASIC_AUTH);
        then.status(status)
            .header("content-type", "text/xml; charset=utf-8")
            .body(body);
    })
}

type Reply = Box<dyn Fn() -> Result<SoapResponse, TransportError> + Send + Sync>;

/// A transport that records every call and answers from a closure.
pub struct StubTransport {
    reply: Reply,
    calls: Arc<Mutex<Vec<(Operation, RequestParams)>>>,
}

impl StubTransport {
    pub fn replying(xml: String) -> Self {
        Self {
            reply: Box::new(move || Ok(SoapResponse::from_xml(&xml).unwrap())),
            calls: Arc::default(),
        }
    }

    pub fn failing(err: impl Fn() -> TransportError + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(move || Err(err())),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<(Operation, RequestParams)>>> {
        Arc::clone(&self.calls)
    }
}

impl SoapTransport for StubTransport {
    fn call<'a>(&'a self, operation: Operation, params: RequestParams) -> CallFuture<'a> {
        self.calls.lock().unwrap().push((operation, params));
        let reply = (self.reply)();
        Box::pin(async move { reply })
    }
}

pub fn stub_client(transport: StubTransport) -> CreditsafeClient {
    CreditsafeClient::builder("test", credentials())
        .transport(transport)
        .build()
        .unwrap()
}

#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_tracing() {}
