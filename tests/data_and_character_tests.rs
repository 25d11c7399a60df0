//! Integration tests for the static data and character resources.

use battlenet_api::wow::{CharacterApi, CharacterField, DataApi};
use battlenet_api::{ApiError, BattlenetConfig, ClientOptions, Resource};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_config(server: &MockServer) -> BattlenetConfig {
    BattlenetConfig::builder()
        .api_key("pub", "priv")
        .api_url_template(format!("{}/{{region}}/api/", server.uri()))
        .build()
        .unwrap()
}

// ============================================================================
// DataApi
// ============================================================================

#[tokio::test]
async fn test_each_lookup_hits_its_own_path_once() {
    let server = MockServer::start().await;
    for (route, body) in [
        ("/eu/api/wow/data/character/classes", json!({"classes": [{"id": 1, "name": "Warrior"}]})),
        ("/eu/api/wow/data/character/races", json!({"races": [{"id": 1, "name": "Human"}]})),
        ("/eu/api/wow/data/guild/perks", json!({"perks": []})),
        ("/eu/api/wow/data/guild/rewards", json!({"rewards": []})),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = create_config(&server);
    let mut data = DataApi::new(&config, &ClientOptions::new().region("eu")).unwrap();

    for _ in 0..2 {
        let classes = data.classes().await.unwrap();
        assert_eq!(classes["classes"][0]["name"], "Warrior");

        let races = data.races().await.unwrap();
        assert_eq!(races["races"][0]["name"], "Human");

        assert_eq!(data.guild_perks().await.unwrap(), json!({"perks": []}));
        assert_eq!(data.guild_rewards().await.unwrap(), json!({"rewards": []}));
    }

    let engine = data.client().cache_engine();
    for key in [
        "DataApi.classes",
        "DataApi.races",
        "DataApi.guild_perks",
        "DataApi.guild_rewards",
    ] {
        assert!(engine.has(key), "missing {key}");
    }
}

#[tokio::test]
async fn test_items_are_memoized_per_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/us/api/wow/data/item/49623"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 49623, "name": "Shadowmourne"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/us/api/wow/data/item/19019"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 19019, "name": "Thunderfury, Blessed Blade of the Windseeker"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut data = DataApi::new(&create_config(&server), &ClientOptions::new()).unwrap();

    assert_eq!(data.item(49623).await.unwrap()["name"], "Shadowmourne");
    assert_eq!(data.item(19019).await.unwrap()["id"], 19019);
    assert_eq!(data.item(49623).await.unwrap()["id"], 49623);

    assert!(data.client().cache_engine().has("DataApi.item-49623"));
    assert!(data.client().cache_engine().has("DataApi.item-19019"));
}

#[tokio::test]
async fn test_failed_lookup_is_retried() {
    let config = BattlenetConfig::builder()
        .api_url_template("http://127.0.0.1:1/{region}/api/")
        .build()
        .unwrap();
    let mut data = DataApi::new(&config, &ClientOptions::new()).unwrap();

    let error = data.races().await.unwrap_err();
    assert!(matches!(error, ApiError::Transport(_)));
    assert!(!data.client().cache_engine().has("DataApi.races"));
}

// ============================================================================
// CharacterApi
// ============================================================================

#[tokio::test]
async fn test_profile_requests_fields_once_per_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/us/api/wow/character/Moon%20Guard/Gwyn"))
        .and(query_param("fields", "items,stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Gwyn",
            "realm": "Moon Guard",
            "items": {"averageItemLevel": 397},
            "stats": {"health": 150_000}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/us/api/wow/character/Moon%20Guard/Gwyn"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "Gwyn", "realm": "Moon Guard"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut character =
        CharacterApi::new(&create_config(&server), &ClientOptions::new(), "Moon Guard", "Gwyn")
            .unwrap();

    let gear = character
        .profile(&[CharacterField::Stats, CharacterField::Items])
        .await
        .unwrap();
    assert_eq!(gear["items"]["averageItemLevel"], 397);

    let again = character
        .profile(&[CharacterField::Items, CharacterField::Stats])
        .await
        .unwrap();
    assert_eq!(again, gear);

    let basic = character.profile(&[]).await.unwrap();
    assert_eq!(basic, json!({"name": "Gwyn", "realm": "Moon Guard"}));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].url.query(), None);
}
