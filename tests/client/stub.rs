use creditsafe_rs::{CreditsafeError, Operation, RequestValue};
use serde_json::json;

use crate::common::{StubTransport, fixture, stub_client};

const MINIMAL_FIND: &str = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <FindCompaniesResponse>
      <FindCompaniesResult>
        <Companies><Company>ACME</Company></Companies>
      </FindCompaniesResult>
    </FindCompaniesResponse>
  </s:Body>
</s:Envelope>"#;

#[tokio::test]
async fn find_company_yields_exactly_the_innermost_value() {
    let stub = StubTransport::replying(MINIMAL_FIND.to_string());
    let calls = stub.calls();
    let client = stub_client(stub);

    let company = client
        .find_company(Some("GB"), Some("12345678"))
        .await
        .unwrap();
    assert_eq!(company, json!("ACME"));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (operation, params) = &calls[0];
    assert_eq!(*operation, Operation::FindCompanies);
    assert_eq!(
        params.nested("oper:countries").unwrap().text("oper:CountryCode"),
        Some("GB")
    );
    assert_eq!(
        params
            .nested("oper:searchCriteria")
            .unwrap()
            .text("dat:RegistrationNumber"),
        Some("12345678")
    );
}

#[tokio::test]
async fn company_report_sends_one_call_with_report_params() {
    let stub = StubTransport::replying(fixture("company_report", "ok", "xml"));
    let calls = stub.calls();
    let client = stub_client(stub);

    client.company_report(987_654, None).await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (operation, params) = &calls[0];
    assert_eq!(*operation, Operation::RetrieveCompanyOnlineReport);
    assert_eq!(params.text("oper:companyId"), Some("987654"));
    assert_eq!(params.text("oper:reportType"), Some("Full"));
    assert_eq!(params.get("oper:language"), Some(&RequestValue::from("EN")));
}

#[tokio::test]
async fn supplied_transport_is_ready_immediately() {
    let client = stub_client(StubTransport::replying(MINIMAL_FIND.to_string()));
    assert!(client.transport_ready());
}

#[tokio::test]
async fn missing_result_list_is_a_missing_key_error() {
    let client = stub_client(StubTransport::replying(fixture("find_companies", "empty", "xml")));

    let err = client.find_company(Some("GB"), Some("0")).await.unwrap_err();
    match err {
        CreditsafeError::MissingKey(path) => assert_eq!(
            path,
            "find_companies_response/find_companies_result/companies"
        ),
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

#[tokio::test]
async fn report_against_a_search_response_fails_at_the_first_step() {
    let client = stub_client(StubTransport::replying(MINIMAL_FIND.to_string()));

    let err = client.company_report("X", None).await.unwrap_err();
    match err {
        CreditsafeError::MissingKey(path) => {
            assert_eq!(path, "retrieve_company_online_report_response")
        }
        other => panic!("expected MissingKey, got {other:?}"),
    }
}
