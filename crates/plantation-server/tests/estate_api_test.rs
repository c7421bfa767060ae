//! Estate API integration tests against a running server.
//!
//! Run with: cargo test --test estate_api_test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

fn base_url() -> String {
    std::env::var("PLANTATION_TEST_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Create an estate, plant trees, then read stats and a drone plan.
#[tokio::test]
#[ignore]
async fn test_estate_lifecycle() {
    let client = Client::new();
    let base = base_url();

    let resp = client
        .post(format!("{}/estate", base))
        .json(&json!({ "width": 10, "length": 10 }))
        .send()
        .await
        .expect("Failed to create estate");
    assert_eq!(resp.status().as_u16(), 201, "Should create estate");
    let estate: Value = resp.json().await.unwrap();
    let estate_id = estate["id"].as_str().unwrap().to_string();

    for (x, y, height) in [(1, 1, 10), (2, 1, 20), (3, 1, 5), (4, 1, 15)] {
        let resp = client
            .post(format!("{}/estate/{}/tree", base, estate_id))
            .json(&json!({ "x": x, "y": y, "height": height }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201, "Should plant tree at ({}, {})", x, y);
    }

    let stats: Value = client
        .get(format!("{}/estate/{}/stats", base, estate_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats, json!({ "count": 4, "max": 20, "min": 5, "median": 12 }));

    let plan: Value = client
        .get(format!("{}/estate/{}/drone-plan", base, estate_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    // 100 plots at 10m, vertical 10 + 10 + 15 + 10 + 15
    assert_eq!(plan, json!({ "distance": 1060 }));
}

/// Malformed parameters are rejected before touching storage.
#[tokio::test]
#[ignore]
async fn test_bad_parameters() {
    let client = Client::new();
    let base = base_url();

    let resp = client
        .get(format!("{}/estate/not-a-uuid/drone-plan", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid estate ID format");

    let resp = client
        .get(format!(
            "{}/estate/00000000-0000-0000-0000-000000000000/drone-plan?max_distance=abc",
            base
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid max_distance value");
}
