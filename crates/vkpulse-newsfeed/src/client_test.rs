use chrono::NaiveDate;
use serde_json::json;

use super::*;

fn test_client(base_url: &str) -> NewsfeedClient {
    NewsfeedClient::with_base_url("test-token", 30, "vkpulse-test", base_url)
        .expect("client construction should not fail")
}

fn october() -> FetchWindow {
    FetchWindow {
        start: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2023, 10, 30).unwrap(),
    }
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[test]
fn build_url_appends_method_and_parameters() {
    let client = test_client("https://api.vk.com/method");
    let url = client.build_url("space", october());
    assert_eq!(
        url.as_str(),
        "https://api.vk.com/method/newsfeed.search?q=space&count=200&access_token=test-token\
         &start_time=1696118400&end_time=1698710399&v=5.131"
    );
}

#[test]
fn build_url_with_trailing_slash_is_identical() {
    let a = test_client("https://api.vk.com/method").build_url("space", october());
    let b = test_client("https://api.vk.com/method/").build_url("space", october());
    assert_eq!(a, b);
}

#[test]
fn build_url_decodes_pre_encoded_query() {
    let client = test_client("https://api.vk.com/method");
    let encoded = client.build_url("%23советскиеКосмонавты", october());
    let plain = client.build_url("#советскиеКосмонавты", october());
    assert_eq!(encoded, plain);
    assert_eq!(
        query_value(&encoded, "q").as_deref(),
        Some("#советскиеКосмонавты")
    );
}

#[test]
fn build_url_decodes_encoded_space() {
    let client = test_client("https://api.vk.com/method");
    let url = client.build_url("советское%20прошлое", october());
    assert_eq!(query_value(&url, "q").as_deref(), Some("советское прошлое"));
}

#[test]
fn build_url_respects_overrides() {
    let client = test_client("https://api.vk.com/method")
        .with_api_version("5.199")
        .with_page_size(50);
    let url = client.build_url("space", october());
    assert_eq!(query_value(&url, "v").as_deref(), Some("5.199"));
    assert_eq!(query_value(&url, "count").as_deref(), Some("50"));
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = NewsfeedClient::with_base_url("t", 30, "ua", "not a url");
    assert!(matches!(result, Err(NewsfeedError::InvalidBaseUrl { .. })));
}

#[test]
fn parse_envelope_extracts_items() {
    let body = json!({
        "response": {
            "items": [
                {"id": 1, "owner_id": -1, "date": 1_696_118_400, "text": "a"},
                {"id": 2, "owner_id": -1, "date": 1_696_118_500, "text": "b"}
            ],
            "count": 2
        }
    });
    let page = NewsfeedClient::parse_envelope("q", october(), body).unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.skipped, 0);
    assert_eq!(page.items[1].text, "b");
}

#[test]
fn parse_envelope_skips_malformed_items() {
    let body = json!({
        "response": {
            "items": [
                {"id": 1, "owner_id": -1, "date": 1_696_118_400},
                {"id": "not-a-number", "owner_id": -1, "date": 0},
                {"owner_id": -1}
            ]
        }
    });
    let page = NewsfeedClient::parse_envelope("q", october(), body).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.skipped, 2);
}

#[test]
fn parse_envelope_surfaces_api_error_unchanged() {
    let error = json!({
        "error_code": 6,
        "error_msg": "Too many requests per second",
        "request_params": [{"key": "method", "value": "newsfeed.search"}]
    });
    let body = json!({ "error": error.clone() });

    let err = NewsfeedClient::parse_envelope("space", october(), body).unwrap_err();
    match err {
        NewsfeedError::Api {
            query,
            window,
            detail,
        } => {
            assert_eq!(query, "space");
            assert_eq!(window, october());
            assert_eq!(detail.error_code, Some(6));
            assert_eq!(detail.raw, error);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn parse_envelope_without_response_or_error() {
    let err = NewsfeedClient::parse_envelope("q", october(), json!({"ok": true})).unwrap_err();
    assert!(matches!(err, NewsfeedError::UnexpectedResponse { .. }));
}

#[test]
fn parse_envelope_response_without_items() {
    let err =
        NewsfeedClient::parse_envelope("q", october(), json!({"response": {"count": 0}}))
            .unwrap_err();
    assert!(matches!(err, NewsfeedError::UnexpectedResponse { .. }));
}
