use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yahoo_fundamentals_api::{Client, Error};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

async fn mount_crumb(server: &MockServer, crumb: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/test/getcrumb"))
        .respond_with(ResponseTemplate::new(200).set_body_string(crumb))
        .mount(server)
        .await;
}

#[tokio::test]
async fn get_fundamentals_success() {
    let mock_server = MockServer::start().await;
    mount_crumb(&mock_server, "crumb-123").await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .and(query_param("crumb", "crumb-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("quote_summary_tcs.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let f = client.get_fundamentals("TCS.NS").await.unwrap();

    assert_eq!(f.symbol, "TCS.NS");
    assert_eq!(f.revenue, Some(2_408_930_021_376));
    assert_eq!(f.market_cap, Some(14_852_117_970_944));
    assert_eq!(f.sector.as_deref(), Some("Technology"));
}

#[tokio::test]
async fn crumb_is_fetched_once_per_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/test/getcrumb"))
        .respond_with(ResponseTemplate::new(200).set_body_string("crumb-xyz"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("quote_summary_tcs.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    assert!(client.get_fundamentals("TCS.NS").await.is_ok());
    assert!(client.get_fundamentals("TCS.NS").await.is_ok());
}

#[tokio::test]
async fn unknown_symbol_returns_api_error() {
    let mock_server = MockServer::start().await;
    mount_crumb(&mock_server, "c").await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/BADSYM.NS"))
        .respond_with(ResponseTemplate::new(404).set_body_string(load_fixture("quote_summary_not_found.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_fundamentals("BADSYM.NS").await.unwrap_err();
    match err {
        Error::Api { code, description } => {
            assert_eq!(code, "Not Found");
            assert!(description.contains("BADSYM.NS"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_result_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_crumb(&mock_server, "c").await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/EMPTY.NS"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"quoteSummary":{"result":[],"error":null}}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_fundamentals("EMPTY.NS").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(ref s) if s == "EMPTY.NS"));
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let mock_server = MockServer::start().await;
    mount_crumb(&mock_server, "c").await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_fundamentals("TCS.NS").await.unwrap_err();
    assert!(matches!(err, Error::RateLimited));
}

#[tokio::test]
async fn server_error_returns_http_status() {
    let mock_server = MockServer::start().await;
    mount_crumb(&mock_server, "c").await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_fundamentals("TCS.NS").await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount_crumb(&mock_server, "c").await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_fundamentals("TCS.NS").await.unwrap_err();
    assert!(matches!(err, Error::ParseFailed(_)));
}

#[tokio::test]
async fn missing_crumb_fails_before_data_request() {
    let mock_server = MockServer::start().await;
    mount_crumb(&mock_server, "").await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("quote_summary_tcs.json")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_fundamentals("TCS.NS").await.unwrap_err();
    assert!(matches!(err, Error::MissingCrumb));
}

#[tokio::test]
async fn unauthorized_drops_cached_crumb() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/test/getcrumb"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stale"))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"finance":{"error":{"code":"Unauthorized"}}}"#))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let first = client.get_fundamentals("TCS.NS").await.unwrap_err();
    assert!(matches!(first, Error::HttpStatus { status: 401, .. }));
    let second = client.get_fundamentals("TCS.NS").await.unwrap_err();
    assert!(matches!(second, Error::HttpStatus { status: 401, .. }));
}
