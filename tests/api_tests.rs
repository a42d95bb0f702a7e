use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use recommendify_api::api::{create_router, AppState};
use recommendify_api::services::{features::FeatureWeights, Catalog, CatalogLookup, Recommender};

const CATALOG_CSV: &str = "\
artist_name,track_name,track_id,popularity,year,genre,danceability,energy,key,loudness,mode,speechiness,acousticness,instrumentalness,liveness,valence,tempo
Jason Mraz,I Won't Give Up,t1,68,2012,acoustic,0.483,0.303,4,-10.058,1,0.0429,0.694,0.0,0.115,0.139,133.406
Joshua Hyslop,Do Not Let Me Go,t2,57,2012,acoustic,0.409,0.234,3,-13.711,1,0.0323,0.338,0.00005,0.0895,0.145,139.832
Daft Punk,Get Lucky,t3,80,2013,dance,0.794,0.811,6,-8.966,0,0.038,0.0426,0.0,0.101,0.862,116.047
Avicii,Wake Me Up,t4,79,2013,dance,0.532,0.783,2,-5.697,1,0.0523,0.0038,0.0012,0.161,0.643,124.08
Arctic Monkeys,Do I Wanna Know?,t5,84,2013,rock,0.548,0.532,5,-7.596,1,0.0323,0.186,0.000263,0.217,0.405,85.03
Bon Iver,Holocene,t6,62,2011,folk,0.374,0.175,1,-14.956,1,0.0338,0.888,0.0136,0.113,0.148,147.969
";

fn create_test_server() -> TestServer {
    let catalog = Arc::new(Catalog::from_reader(CATALOG_CSV.as_bytes()).unwrap());
    let recommender = Arc::new(Recommender::new(catalog.clone(), FeatureWeights::default()));
    let lookup = Arc::new(CatalogLookup::new(catalog));
    let app = create_router(AppState::new(recommender, lookup));
    TestServer::new(app).unwrap()
}

fn playlist_track() -> Value {
    json!({
        "track_id": "t1",
        "track_name": "I Won't Give Up",
        "artist_name": "Jason Mraz",
        "popularity": 68,
        "genre": "acoustic",
        "danceability": 0.483,
        "energy": 0.303,
        "key": 4,
        "loudness": -10.058,
        "mode": 1,
        "speechiness": 0.0429,
        "acousticness": 0.694,
        "instrumentalness": 0.0,
        "liveness": 0.115,
        "valence": 0.139,
        "tempo": 133.406
    })
}

fn similarities(body: &Value) -> Vec<f64> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["similarity"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommendations_default_heap() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "tracks": [playlist_track()] }))
        .await;

    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json();
    assert_eq!(body["sort_method"], "heap");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 5);
    assert!(recommendations.iter().all(|r| r["track_id"] != "t1"));

    // Same genre and the closest audio profile
    assert_eq!(recommendations[0]["track_id"], "t2");
    assert_eq!(recommendations[0]["name"], "Do Not Let Me Go");
    assert_eq!(recommendations[0]["artist"], "Joshua Hyslop");

    let scores = similarities(&body);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| (-1.0..=1.0).contains(s)));
}

#[tokio::test]
async fn test_recommendations_merge_matches_heap() {
    let server = create_test_server();

    let heap: Value = server
        .post("/api/v1/recommendations")
        .json(&json!({ "tracks": [playlist_track()], "sort_method": "heap", "limit": 3 }))
        .await
        .json();
    let merge: Value = server
        .post("/api/v1/recommendations")
        .json(&json!({ "tracks": [playlist_track()], "sort_method": "merge", "limit": 3 }))
        .await
        .json();

    assert_eq!(merge["sort_method"], "merge");
    assert_eq!(similarities(&heap).len(), 3);
    assert_eq!(similarities(&heap), similarities(&merge));
}

#[tokio::test]
async fn test_limit_larger_than_candidates() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "tracks": [playlist_track()], "limit": 50 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_huge_limit_returns_all_candidates() {
    let server = create_test_server();

    for method in ["heap", "merge"] {
        let response = server
            .post("/api/v1/recommendations")
            .json(&json!({
                "tracks": [playlist_track()],
                "sort_method": method,
                "limit": 1_099_511_627_776_u64
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);
    }
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f1c1a5e-7a4e-4c8b-9d7f-1f0a2b3c4d5e";

    let response = server
        .post("/api/v1/recommendations")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .json(&json!({ "tracks": [playlist_track()] }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.headers()["x-request-id"], id);
}

#[tokio::test]
async fn test_unknown_sort_method_rejected() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "tracks": [playlist_track()], "sort_method": "bubble" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("bubble"));
}

#[tokio::test]
async fn test_empty_playlist_rejected() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "tracks": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_field_rejected() {
    let server = create_test_server();

    let mut track = playlist_track();
    track.as_object_mut().unwrap().remove("energy");

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "tracks": [track] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("energy"));
}

#[tokio::test]
async fn test_untitled_playlist_rejected() {
    let server = create_test_server();

    let mut track = playlist_track();
    track.as_object_mut().unwrap().remove("track_name");

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "tracks": [track] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
