use yahoo_fundamentals_api::types::QuoteSummaryEnvelope;

fn load_fixture(name: &str) -> QuoteSummaryEnvelope {
    let body = std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap();
    serde_json::from_str(&body).unwrap()
}

#[test]
fn full_profile_extracts_all_fields() {
    let envelope = load_fixture("quote_summary_tcs.json");
    let results = envelope.quote_summary.result.unwrap();
    let result = &results[0];
    let f = result.fundamentals("TCS.NS");

    assert_eq!(f.symbol, "TCS.NS");
    assert_eq!(f.revenue, Some(2_408_930_021_376));
    assert_eq!(f.market_cap, Some(14_852_117_970_944));
    assert_eq!(f.industry.as_deref(), Some("Information Technology Services"));
    assert_eq!(f.sector.as_deref(), Some("Technology"));
}

#[test]
fn partial_profile_leaves_missing_fields_null() {
    let envelope = load_fixture("quote_summary_partial.json");
    let results = envelope.quote_summary.result.unwrap();
    let result = &results[0];
    let f = result.fundamentals("SMALLCO.BO");

    assert_eq!(f.revenue, None);
    assert_eq!(f.market_cap, Some(812_345_678));
    assert_eq!(f.industry, None);
    assert_eq!(f.sector, None);
}

#[test]
fn error_envelope_has_no_result() {
    let envelope = load_fixture("quote_summary_not_found.json");
    assert!(envelope.quote_summary.result.is_none());
    let err = envelope.quote_summary.error.unwrap();
    assert_eq!(err.code, "Not Found");
    assert!(err.description.contains("BADSYM.NS"));
}
