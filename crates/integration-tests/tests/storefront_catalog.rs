//! Listing, filtering and detail over HTTP.

#![allow(clippy::indexing_slicing)]

use reqwest::StatusCode;
use sweet_creations_integration_tests::TestContext;

fn ids(body: &serde_json::Value) -> Vec<&str> {
    body["stores"]
        .as_array()
        .map(|stores| stores.iter().filter_map(|s| s["id"].as_str()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::spawn().await;
    let response = ctx
        .client
        .get(ctx.url("/health/ready"))
        .send()
        .await
        .expect("send request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_listing_keeps_catalog_order() {
    let ctx = TestContext::spawn().await;
    let (status, body) = ctx.get_json("/api/stores").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&body),
        vec!["dulce-aroma", "pan-de-la-abuela", "le-petit-gateau", "cafe-central"]
    );
}

#[tokio::test]
async fn test_category_and_query_combine() {
    let ctx = TestContext::spawn().await;

    let (_, body) = ctx.get_json("/api/stores?category=2").await;
    assert_eq!(ids(&body), vec!["pan-de-la-abuela"]);

    let (_, body) = ctx.get_json("/api/stores?category=1&q=bono").await;
    assert_eq!(ids(&body), vec!["pan-de-la-abuela"]);

    let (_, body) = ctx.get_json("/api/stores?category=4&q=bono").await;
    assert_eq!(body["total"], 0);

    let (_, body) = ctx.get_json("/api/stores?q=PASTELER%C3%8DA").await;
    assert_eq!(ids(&body), vec!["le-petit-gateau", "cafe-central"]);
}

#[tokio::test]
async fn test_categories_and_detail() {
    let ctx = TestContext::spawn().await;

    let (_, body) = ctx.get_json("/api/categories").await;
    assert_eq!(body.as_array().map(Vec::len), Some(5));

    let (status, body) = ctx.get_json("/api/stores/pan-de-la-abuela").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deliveryFeeLabel"], "Gratis");
    assert_eq!(body["menu"][0]["items"][1]["id"], "almojabana");

    let (status, _) = ctx.get_json("/api/stores/no-existe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
