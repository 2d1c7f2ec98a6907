use std::path::Path;

use rarebirds_wiki::WikiClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_config(output_path: &Path, image_limit: usize) -> AppConfig {
    AppConfig {
        ebird_api_key: "test-key".to_string(),
        ebird_base_url: String::new(),
        wiki_base_url: String::new(),
        region_code: "US-NY".to_string(),
        region_name: "New York".to_string(),
        days_back: 7,
        output_path: output_path.to_path_buf(),
        image_limit,
        image_delay_ms: 0,
        request_timeout_secs: 5,
        image_timeout_secs: 5,
        user_agent: "rarebirds-test".to_string(),
        log_level: "warn".to_string(),
    }
}

fn ebird_client(server: &MockServer) -> EbirdClient {
    EbirdClient::with_base_url("test-key", 5, "rarebirds-test", &server.uri())
        .expect("client construction should not fail")
}

fn wiki_client(server: &MockServer) -> WikiClient {
    WikiClient::with_base_url(5, "rarebirds-test", &format!("{}/w/api.php", server.uri()))
        .expect("client construction should not fail")
}

fn raw(species: &str, name: &str, sub_id: &str, date: &str) -> serde_json::Value {
    serde_json::json!({
        "speciesCode": species,
        "comName": name,
        "sciName": format!("{name} latin"),
        "locName": "Montauk Point",
        "obsDt": date,
        "howMany": 1,
        "lat": 41.07,
        "lng": -71.86,
        "subId": sub_id,
        "userDisplayName": "Robin"
    })
}

async fn mount_ebird(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/data/obs/US-NY/recent/notable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_wiki_thumbnail(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "pages": { "1": {
                "title": "Some bird",
                "thumbnail": { "source": "https://upload.wikimedia.org/bird.jpg" }
            } } }
        })))
        .mount(server)
        .await;
}

fn read_output(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("snapshot should exist");
    serde_json::from_str(&text).expect("snapshot should be valid JSON")
}

#[tokio::test]
async fn duplicate_checklist_entries_collapse_to_one_observation() {
    let ebird = MockServer::start().await;
    let wiki = MockServer::start().await;
    mount_ebird(
        &ebird,
        serde_json::json!([
            raw("kinrai4", "King Rail", "S1", "2026-10-18 06:00"),
            raw("kinrai4", "King Rail", "S1", "2026-10-18 06:00"),
        ]),
    )
    .await;
    mount_wiki_thumbnail(&wiki).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("data").join("birds.json");
    let summary = run_pipeline(&test_config(&out, 30), &ebird_client(&ebird), &wiki_client(&wiki))
        .await
        .unwrap();

    assert_eq!(summary.raw_observations, 2);
    assert_eq!(summary.total_species, 1);
    assert_eq!(summary.total_observations, 1);

    let value = read_output(&out);
    assert_eq!(value["totalSpecies"], 1);
    assert_eq!(value["totalObservations"], 1);
    assert_eq!(value["species"][0]["totalObservations"], 1);
    assert_eq!(value["species"][0]["observations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rarest_species_comes_first_in_snapshot() {
    let ebird = MockServer::start().await;
    let wiki = MockServer::start().await;
    mount_ebird(
        &ebird,
        serde_json::json!([
            raw("aaa", "Species A", "S1", "2026-10-12 07:00"),
            raw("aaa", "Species A", "S2", "2026-10-14 07:00"),
            raw("bbb", "Species B", "S3", "2026-10-13 07:00"),
            raw("aaa", "Species A", "S4", "2026-10-13 07:00"),
        ]),
    )
    .await;
    mount_wiki_thumbnail(&wiki).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("birds.json");
    run_pipeline(&test_config(&out, 30), &ebird_client(&ebird), &wiki_client(&wiki))
        .await
        .unwrap();

    let value = read_output(&out);
    let species = value["species"].as_array().unwrap();
    assert_eq!(species[0]["speciesCode"], "bbb");
    assert_eq!(species[0]["rarityRank"], 1);
    assert_eq!(species[1]["speciesCode"], "aaa");
    assert_eq!(species[1]["rarityRank"], 2);
    assert_eq!(species[1]["totalObservations"], 3);

    let dates: Vec<&str> = species[1]["observations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["obsDt"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2026-10-14 07:00", "2026-10-13 07:00", "2026-10-12 07:00"]);

    assert_eq!(value["region"], "New York");
    assert_eq!(value["regionCode"], "US-NY");
    assert_eq!(value["daysBack"], 7);
    let stamp = value["lastUpdated"].as_str().unwrap();
    assert!(stamp.ends_with('Z'), "timestamp should be UTC with Z: {stamp}");
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
}

#[tokio::test]
async fn missing_thumbnail_yields_null_image_and_run_completes() {
    let ebird = MockServer::start().await;
    let wiki = MockServer::start().await;
    mount_ebird(
        &ebird,
        serde_json::json!([raw("mallar3", "Mallard", "S1", "2026-10-18")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "pages": { "-1": { "title": "Mallard", "missing": "" } } }
        })))
        .expect(2)
        .mount(&wiki)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("birds.json");
    let summary = run_pipeline(&test_config(&out, 30), &ebird_client(&ebird), &wiki_client(&wiki))
        .await
        .unwrap();

    assert_eq!(summary.images_found, 0);
    let value = read_output(&out);
    let species = &value["species"][0];
    assert!(species.get("imageUrl").is_some(), "imageUrl key should be present");
    assert_eq!(species["imageUrl"], serde_json::Value::Null);
}

#[tokio::test]
async fn groups_beyond_limit_have_no_image_field() {
    let ebird = MockServer::start().await;
    let wiki = MockServer::start().await;
    mount_ebird(
        &ebird,
        serde_json::json!([
            raw("aaa", "Alder Flycatcher", "S1", "2026-10-10"),
            raw("bbb", "Bell's Vireo", "S2", "2026-10-10"),
            raw("ccc", "Cave Swallow", "S3", "2026-10-10"),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "pages": { "1": {
                "thumbnail": { "source": "https://upload.wikimedia.org/bird.jpg" }
            } } }
        })))
        .expect(2)
        .mount(&wiki)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("birds.json");
    let summary = run_pipeline(&test_config(&out, 2), &ebird_client(&ebird), &wiki_client(&wiki))
        .await
        .unwrap();

    assert_eq!(summary.images_found, 2);
    let value = read_output(&out);
    let species = value["species"].as_array().unwrap();
    assert_eq!(species[0]["imageUrl"], "https://upload.wikimedia.org/bird.jpg");
    assert_eq!(species[1]["imageUrl"], "https://upload.wikimedia.org/bird.jpg");
    assert!(species[2].get("imageUrl").is_none());
}

#[tokio::test]
async fn fetch_failure_writes_nothing() {
    let ebird = MockServer::start().await;
    let wiki = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&ebird)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&wiki)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("data").join("birds.json");
    let err = run_pipeline(&test_config(&out, 30), &ebird_client(&ebird), &wiki_client(&wiki))
        .await
        .unwrap_err();

    assert!(
        err.to_string().contains("failed to fetch notable observations for US-NY"),
        "unexpected error: {err:#}"
    );
    assert!(!out.exists());
    assert!(!out.parent().unwrap().exists());
}

#[tokio::test]
async fn empty_response_writes_empty_snapshot() {
    let ebird = MockServer::start().await;
    let wiki = MockServer::start().await;
    mount_ebird(&ebird, serde_json::json!([])).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("birds.json");
    let summary = run_pipeline(&test_config(&out, 30), &ebird_client(&ebird), &wiki_client(&wiki))
        .await
        .unwrap();

    assert_eq!(summary.total_species, 0);
    let value = read_output(&out);
    assert_eq!(value["totalSpecies"], 0);
    assert_eq!(value["totalObservations"], 0);
    assert_eq!(value["species"], serde_json::json!([]));
}
