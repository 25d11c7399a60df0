//! Integration tests for the resource client core.
//!
//! These tests run real HTTP requests against a local mock server and verify
//! request signing, query assembly, response normalization and transport
//! failure handling.

use battlenet_api::clients::signing::authorization_header;
use battlenet_api::clients::ResourceClient;
use battlenet_api::{BattlenetConfig, ClientOptions, ConfigError, Credentials, Region};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Creates a configuration whose API URLs point at the mock server.
fn create_config(server: &MockServer, public_key: &str, private_key: &str) -> BattlenetConfig {
    BattlenetConfig::builder()
        .api_key(public_key, private_key)
        .api_url_template(format!("{}/{{region}}/api/", server.uri()))
        .build()
        .unwrap()
}

fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

// ============================================================================
// Signing
// ============================================================================

#[tokio::test]
async fn test_signed_request_carries_date_and_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/us/api/wow/data/character/races"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"races": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_config(&server, "pub", "priv");
    let mut client = ResourceClient::new(&config).unwrap();
    let url = format!("{}wow/data/character/races", client.api_url());
    client.set_api_url(url.clone());

    let response = client.request().await;
    assert!(response.transport_failure().is_none());
    assert_eq!(response.response(), &json!({"races": []}));

    let request = single_request(&server).await;
    let date = header(&request, "date").expect("Date header");
    let authorization = header(&request, "authorization").expect("Authorization header");

    assert!(authorization.starts_with("BNET pub:"));
    assert_eq!(
        authorization,
        authorization_header(&Credentials::new("pub", "priv"), date, &url)
    );
    assert!(chrono::DateTime::parse_from_rfc2822(date).is_ok());
}

#[tokio::test]
async fn test_signature_covers_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let config = create_config(&server, "pub", "priv");
    let mut client = ResourceClient::new(&config).unwrap();
    client.set_query_param("locale", "en_US").unwrap();
    let url = client.request_url();

    client.request().await;

    let request = single_request(&server).await;
    let date = header(&request, "date").unwrap();
    assert_eq!(
        header(&request, "authorization").unwrap(),
        authorization_header(client.api_keys(), date, &url)
    );
}

#[tokio::test]
async fn test_missing_key_sends_anonymous_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    for (public_key, private_key) in [("pub", ""), ("", "priv")] {
        let config = create_config(&server, public_key, private_key);
        let mut client = ResourceClient::new(&config).unwrap();
        client.request().await;
    }

    for request in server.received_requests().await.unwrap() {
        assert!(header(&request, "authorization").is_none());
        assert!(header(&request, "date").is_none());
    }
}

#[tokio::test]
async fn test_user_agent_identifies_the_library() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = BattlenetConfig::builder()
        .api_url_template(format!("{}/{{region}}/api/", server.uri()))
        .user_agent_prefix("GuildSite/2.0")
        .build()
        .unwrap();
    let mut client = ResourceClient::new(&config).unwrap();
    client.request().await;

    let request = single_request(&server).await;
    let user_agent = header(&request, "user-agent").unwrap();
    assert!(user_agent.starts_with("GuildSite/2.0 | Battle.net API Library v"));
    assert!(user_agent.ends_with("| Rust"));
}

// ============================================================================
// Query assembly
// ============================================================================

#[tokio::test]
async fn test_list_params_expand_to_repeated_pairs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/us/api/wow/realm/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"realms": []})))
        .mount(&server)
        .await;

    let config = create_config(&server, "", "");
    let mut client = ResourceClient::new(&config).unwrap();
    let url = format!("{}wow/realm/status", client.api_url());
    client.set_api_url(url);
    client
        .set_query_param("realm", vec!["Lightbringer", "Aman'Thul"])
        .unwrap();

    client.request().await;

    let request = single_request(&server).await;
    assert_eq!(
        request.url.query(),
        Some("realm=Lightbringer&realm=Aman%27Thul")
    );
}

#[tokio::test]
async fn test_reset_drops_query_between_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let config = create_config(&server, "", "");
    let mut client = ResourceClient::new(&config).unwrap();
    client.set_query_param("fields", "items").unwrap();
    client.request().await;

    client.reset();
    client.request().await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("fields=items"));
    assert_eq!(requests[1].url.query(), None);
}

// ============================================================================
// Responses
// ============================================================================

#[tokio::test]
async fn test_non_json_body_is_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_string("Service Unavailable")
                .insert_header("x-maintenance", "true"),
        )
        .mount(&server)
        .await;

    let config = create_config(&server, "", "");
    let mut client = ResourceClient::new(&config).unwrap();
    let response = client.request().await;

    assert_eq!(response.status(), Some(503));
    assert_eq!(response.raw(), "Service Unavailable");
    assert_eq!(response.response(), &json!(["Service Unavailable"]));
    assert_eq!(response.header("X-Maintenance"), Some("true"));
    assert!(response.transport_failure().is_none());
}

#[tokio::test]
async fn test_malformed_json_decodes_to_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"realms\": [", "application/json"))
        .mount(&server)
        .await;

    let config = create_config(&server, "", "");
    let mut client = ResourceClient::new(&config).unwrap();
    let response = client.request().await;

    assert!(response.response().is_null());
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/us/api/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/us/api/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/us/api/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"moved": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_config(&server, "", "");
    let mut client = ResourceClient::new(&config).unwrap();
    let url = format!("{}old", client.api_url());
    client.set_api_url(url);

    let response = client.request().await;
    assert_eq!(response.response(), &json!({"moved": true}));
    assert!(response.metadata().url.ends_with("/us/api/new"));
}

#[tokio::test]
async fn test_transport_failure_becomes_response_payload() {
    let config = BattlenetConfig::builder()
        .api_url_template("http://127.0.0.1:1/{region}/api/")
        .build()
        .unwrap();
    let mut client = ResourceClient::new(&config).unwrap();

    let response = client.request().await;

    let failure = response.transport_failure().expect("transport failure");
    assert_eq!(failure.url, "http://127.0.0.1:1/us/api/");
    assert!(!response.raw().is_empty());
    assert_eq!(failure.message, response.raw());
    assert_eq!(response.response(), &json!([response.raw()]));
    assert_eq!(response.status(), None);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_region_override_selects_host() {
    let config = BattlenetConfig::default();

    for region in Region::ALL {
        let options = ClientOptions::new().region(region.as_str().to_uppercase());
        let client = ResourceClient::with_options(&config, &options).unwrap();
        assert_eq!(client.region(), region);
        assert_eq!(
            client.api_url(),
            format!("http://{}.battle.net/api/", region.as_str())
        );
    }
}

#[test]
fn test_invalid_region_is_rejected_everywhere() {
    let from_builder = BattlenetConfig::builder().region("xx").build();
    assert_eq!(
        from_builder.unwrap_err(),
        ConfigError::InvalidRegion {
            region: "xx".to_string()
        }
    );

    let config = BattlenetConfig::default();
    let from_options = ResourceClient::with_options(&config, &ClientOptions::new().region("xx"));
    assert!(from_options.is_err());

    let mut client = ResourceClient::new(&config).unwrap();
    let error = client.set_region("xx").unwrap_err();
    assert!(error.to_string().contains("'xx'"));
}
