mod common;

use common::{PARIS_LAT, PARIS_LON, http, mount_place};
use serde_json::json;
use sunset_dashboard::{
    data::geocode::{GeocodeClient, GeocodeProvider},
    error::GeocodeError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, method, path, query_param},
};

fn open_meteo(server: &MockServer) -> GeocodeClient {
    GeocodeClient::new(
        http(),
        GeocodeProvider::OpenMeteo,
        format!("{}/v1/search", server.uri()),
    )
}

#[tokio::test]
async fn open_meteo_match_resolves_to_coordinate() {
    let server = MockServer::start().await;
    mount_place(&server, "Paris", PARIS_LAT, PARIS_LON).await;

    let coordinate = open_meteo(&server).resolve("  Paris ").await.expect("resolve");
    assert_eq!(coordinate.latitude(), PARIS_LAT);
    assert_eq!(coordinate.longitude(), PARIS_LON);
}

#[tokio::test]
async fn exact_name_beats_larger_partial_match() {
    let server = MockServer::start().await;
    let body = json!({
        "results": [
            { "name": "Paris Township", "latitude": 40.0, "longitude": -80.0, "population": 9_000_000 },
            { "name": "Paris", "latitude": PARIS_LAT, "longitude": PARIS_LON, "population": 2_138_551 }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let coordinate = open_meteo(&server).resolve("Paris").await.expect("resolve");
    assert_eq!(coordinate.latitude(), PARIS_LAT);
}

#[tokio::test]
async fn no_results_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.4 })))
        .mount(&server)
        .await;

    let err = open_meteo(&server).resolve("Atlantis").await.unwrap_err();
    assert_eq!(err, GeocodeError::NotFound("Atlantis".to_string()));
}

#[tokio::test]
async fn server_error_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = open_meteo(&server).resolve("Paris").await.unwrap_err();
    match err {
        GeocodeError::Transport(message) => assert!(message.contains("500"), "{message}"),
        other => panic!("expected transport failure, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_query_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = open_meteo(&server).resolve("   ").await.unwrap_err();
    assert_eq!(err, GeocodeError::EmptyQuery);
}

#[tokio::test]
async fn geocode_xyz_puts_query_in_path_and_sends_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Paris"))
        .and(query_param("json", "1"))
        .and(query_param("auth", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latt": "48.85717",
            "longt": "2.34140",
            "standard": { "city": "Paris", "countryname": "France" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeocodeClient::new(http(), GeocodeProvider::GeocodeXyz, server.uri())
        .with_api_key(Some("secret-key".to_string()));
    let coordinate = client.resolve("Paris").await.expect("resolve");
    assert_eq!(coordinate.latitude(), 48.85717);
    assert_eq!(coordinate.longitude(), 2.3414);
}

#[tokio::test]
async fn geocode_xyz_unknown_place_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Qwzxv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": "018", "description": "Your request produced no suggestions." },
            "success": false
        })))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(http(), GeocodeProvider::GeocodeXyz, server.uri());
    let err = client.resolve("Qwzxv").await.unwrap_err();
    assert_eq!(err, GeocodeError::NotFound("Qwzxv".to_string()));
}
