// Tests for the reqwest PostNL client against a local fake of the Benelux endpoint

use address_check::{AddressProvider, AddressQuery, PostNlClient};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
struct SeenRequest {
    query: Vec<(String, String)>,
    api_key: Option<String>,
    accept: Option<String>,
}

#[derive(Clone)]
struct FakePostNl {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn benelux(
    State(fake): State<FakePostNl>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);

    fake.seen.lock().unwrap().push(SeenRequest {
        query: params.clone(),
        api_key: header("apikey"),
        accept: header("accept"),
    });

    let lookup: HashMap<_, _> = params.into_iter().collect();
    match lookup.get("postalCode").map(String::as_str) {
        Some("0000XX") => (
            StatusCode::SERVICE_UNAVAILABLE,
            "<html>maintenance</html>",
        )
            .into_response(),
        Some("1111AA") => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "errors": [{ "code": "INVALID_POSTCODE" }] })),
        )
            .into_response(),
        _ => axum::Json(json!([{
            "cityName": "AMSTERDAM",
            "houseNumber": 1,
            "mailabilityScore": 100,
            "postalCode": "1012JS",
            "resultPercentage": 100,
            "streetName": "Dam"
        }]))
        .into_response(),
    }
}

async fn start_fake_postnl() -> (String, FakePostNl) {
    let fake = FakePostNl {
        seen: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/v2/address/benelux", get(benelux))
        .with_state(fake.clone());

    let port = portpicker::pick_unused_port().expect("No free port available");
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{}/v2", port), fake)
}

fn query(postal_code: &str) -> AddressQuery {
    AddressQuery {
        country_iso: "NL".to_string(),
        postal_code: postal_code.to_string(),
        house_number: "1".to_string(),
        city_name: None,
        street_name: Some("Dam".to_string()),
        house_number_addition: None,
    }
}

#[tokio::test]
async fn test_lookup_sends_query_and_headers() {
    let (base_url, fake) = start_fake_postnl().await;
    let client = PostNlClient::new(&base_url, "test-api-key").unwrap();

    let response = client.lookup(&query("1012JS")).await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.body.unwrap()[0]["streetName"], "Dam");

    let seen = fake.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].query,
        vec![
            ("countryIso".to_string(), "NL".to_string()),
            ("postalCode".to_string(), "1012JS".to_string()),
            ("houseNumber".to_string(), "1".to_string()),
            ("streetName".to_string(), "Dam".to_string()),
        ]
    );
    assert_eq!(seen[0].api_key.as_deref(), Some("test-api-key"));
    assert_eq!(seen[0].accept.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_lookup_keeps_error_body() {
    let (base_url, _fake) = start_fake_postnl().await;
    let client = PostNlClient::new(&base_url, "test-api-key").unwrap();

    let response = client.lookup(&query("1111AA")).await.unwrap();

    assert_eq!(response.status, 400);
    assert!(!response.is_success());
    assert_eq!(
        response.body,
        Some(json!({ "errors": [{ "code": "INVALID_POSTCODE" }] }))
    );
}

#[tokio::test]
async fn test_lookup_non_json_body() {
    let (base_url, _fake) = start_fake_postnl().await;
    let client = PostNlClient::new(&format!("{}/", base_url), "test-api-key").unwrap();

    let response = client.lookup(&query("0000XX")).await.unwrap();

    assert_eq!(response.status, 503);
    assert_eq!(response.body, None);
}

#[tokio::test]
async fn test_lookup_unreachable_host() {
    let port = portpicker::pick_unused_port().expect("No free port available");
    let client = PostNlClient::new(&format!("http://127.0.0.1:{}/v2", port), "test-api-key").unwrap();

    assert!(client.lookup(&query("1012JS")).await.is_err());
}

#[test]
fn test_endpoint_joins_base_url() {
    let client = PostNlClient::new("https://api-sandbox.postnl.nl/v2/", "key").unwrap();
    assert_eq!(client.endpoint(), "https://api-sandbox.postnl.nl/v2/address/benelux");
}

#[test]
fn test_rejects_unusable_api_key() {
    assert!(PostNlClient::new("https://api-sandbox.postnl.nl/v2", "bad\nkey").is_err());
}
