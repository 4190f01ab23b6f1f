//! Firestore REST client against a local stand-in server.
//!
//! The stand-in serves two pages of store documents (one of them
//! malformed), single-document reads, `runQuery` and writes, which is the
//! subset of the REST surface the catalog uses.

#![allow(clippy::indexing_slicing)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use secrecy::SecretString;
use serde_json::{Value, json};

use sweet_creations_core::{StoreId, StoreKind};
use sweet_creations_integration_tests::serve;
use sweet_creations_storefront::catalog::{
    CatalogError, CatalogFixture, CatalogRepository, CatalogWriter, FirestoreCatalog,
};
use sweet_creations_storefront::config::FirestoreConfig;

const API_KEY: &str = "AIzaSyB3x9QmK2nL5pR7tV0wZ4cE6gJ8hU1yD";
const ROOT: &str = "/v1/projects/demo/databases/catalog-db/documents";

#[derive(Clone, Default)]
struct Stand {
    written: Arc<Mutex<Vec<(String, String, Value)>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    queries: Arc<Mutex<Vec<Value>>>,
}

fn store_doc(id: &str, fields: Value) -> Value {
    json!({
        "name": format!("projects/demo/databases/catalog-db/documents/stores/{id}"),
        "fields": fields,
    })
}

fn dulce_aroma() -> Value {
    store_doc(
        "dulce-aroma",
        json!({
            "name": { "stringValue": "Dulce Aroma" },
            "description": { "stringValue": "Tortas y cupcakes" },
            "category": { "stringValue": "repostería" },
            "rating": { "doubleValue": 4.8 },
            "deliveryFee": { "integerValue": "3000" },
            "isOpen": { "booleanValue": true },
            "specialties": { "arrayValue": { "values": [{ "stringValue": "Tortas" }] } }
        }),
    )
}

fn pan_rico() -> Value {
    store_doc(
        "pan-rico",
        json!({
            "name": { "stringValue": "Pan Rico" },
            "category": { "stringValue": "panadería" },
            "rating": { "doubleValue": 4.2 },
            "isOpen": { "booleanValue": false }
        }),
    )
}

fn check_key(params: &HashMap<String, String>) -> Result<(), StatusCode> {
    if params.get("key").map(String::as_str) == Some(API_KEY) {
        Ok(())
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

async fn list(
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    check_key(&params)?;
    match (collection.as_str(), params.get("pageToken").map(String::as_str)) {
        ("stores", None) => Ok(Json(json!({
            "documents": [dulce_aroma()],
            "nextPageToken": "page-2"
        }))),
        ("stores", Some("page-2")) => Ok(Json(json!({
            "documents": [
                store_doc("broken", json!({ "category": { "stringValue": "heladería" } })),
                pan_rico()
            ]
        }))),
        ("storeCategories", None) => Ok(Json(json!({
            "documents": [{
                "name": "projects/demo/databases/catalog-db/documents/storeCategories/1",
                "fields": { "name": { "stringValue": "Todas" }, "icon": { "stringValue": "🏪" } }
            }]
        }))),
        _ => Ok(Json(json!({}))),
    }
}

async fn document(
    Path((collection, id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    check_key(&params)?;
    match (collection.as_str(), id.as_str()) {
        ("stores", "dulce-aroma") => Ok(Json(dulce_aroma())),
        ("stores", "broken") => Ok(Json(store_doc("broken", json!({})))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn write(
    State(stand): State<Stand>,
    Path((collection, id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    check_key(&params)?;
    stand
        .written
        .lock()
        .expect("lock")
        .push((collection, id.clone(), body.clone()));
    Ok(Json(body))
}

async fn remove(
    State(stand): State<Stand>,
    Path((_, id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    check_key(&params)?;
    stand.deleted.lock().expect("lock").push(id);
    Ok(Json(json!({})))
}

async fn run_query(
    State(stand): State<Stand>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    check_key(&params)?;
    stand.queries.lock().expect("lock").push(body);
    Ok(Json(json!([
        { "document": dulce_aroma(), "readTime": "2025-01-01T00:00:00Z" },
        { "readTime": "2025-01-01T00:00:00Z" }
    ])))
}

async fn start(api_key: &str) -> (FirestoreCatalog, Stand) {
    let stand = Stand::default();
    let app = Router::new()
        .route(&format!("{ROOT}:runQuery"), post(run_query))
        .route(&format!("{ROOT}/{{collection}}"), get(list))
        .route(
            &format!("{ROOT}/{{collection}}/{{id}}"),
            get(document).patch(write).delete(remove),
        )
        .with_state(stand.clone());
    let addr = serve(app).await;

    let config = FirestoreConfig {
        project_id: "demo".to_string(),
        database: "catalog-db".to_string(),
        base_url: format!("http://{addr}"),
        api_key: SecretString::from(api_key.to_string()),
        stores_collection: "stores".to_string(),
        categories_collection: "storeCategories".to_string(),
    };
    (FirestoreCatalog::new(&config), stand)
}

#[tokio::test]
async fn test_list_stores_follows_pages_and_skips_malformed() {
    let (catalog, _) = start(API_KEY).await;
    let stores = catalog.list_stores().await.expect("list stores");
    let ids: Vec<_> = stores.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["dulce-aroma", "pan-rico"]);
    assert_eq!(stores[0].delivery_fee_label(), "$ 3.000");
}

#[tokio::test]
async fn test_list_categories() {
    let (catalog, _) = start(API_KEY).await;
    let categories = catalog.list_categories().await.expect("list categories");
    assert_eq!(categories.len(), 1);
    assert!(categories[0].id.is_all());
}

#[tokio::test]
async fn test_find_store_by_id() {
    let (catalog, _) = start(API_KEY).await;

    let store = catalog
        .find_store_by_id(&StoreId::new("dulce-aroma"))
        .await
        .expect("find store");
    assert_eq!(store.map(|s| s.category), Some(StoreKind::Reposteria));

    let missing = catalog
        .find_store_by_id(&StoreId::new("nope"))
        .await
        .expect("find store");
    assert!(missing.is_none());

    let broken = catalog.find_store_by_id(&StoreId::new("broken")).await;
    assert!(matches!(broken, Err(CatalogError::Document(_))));
}

#[tokio::test]
async fn test_category_query_shape() {
    let (catalog, stand) = start(API_KEY).await;
    let stores = catalog
        .list_stores_by_category(StoreKind::Reposteria)
        .await
        .expect("query stores");
    assert_eq!(stores.len(), 1);

    let queries = stand.queries.lock().expect("lock");
    let query = &queries[0]["structuredQuery"];
    assert_eq!(query["from"][0]["collectionId"], "stores");
    assert_eq!(query["where"]["fieldFilter"]["field"]["fieldPath"], "category");
    assert_eq!(query["where"]["fieldFilter"]["value"]["stringValue"], "repostería");
    assert_eq!(query["orderBy"][0]["direction"], "DESCENDING");
}

#[tokio::test]
async fn test_search_uses_full_snapshot() {
    let (catalog, _) = start(API_KEY).await;
    let stores = catalog.search_stores_by_term("TORTAS").await.expect("search");
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].id.as_str(), "dulce-aroma");
}

#[tokio::test]
async fn test_rejected_key_is_status_error() {
    let (catalog, _) = start("AIzaSyQ7wX2mN9pL4kR8tV3zB6cF1gH5jU0yE").await;
    let err = catalog.list_stores().await.expect_err("forbidden");
    assert!(matches!(err, CatalogError::Status { status: 403, .. }));
}

#[tokio::test]
async fn test_writes_encode_typed_fields() {
    let (catalog, stand) = start(API_KEY).await;
    let fixture = CatalogFixture::parse(
        r#"
categories:
  - { id: "3", name: Repostería, icon: "🧁" }
stores:
  - id: dulce-aroma
    name: Dulce Aroma
    category: repostería
    rating: 4.8
    minimumOrder: 15000
"#,
    )
    .expect("parse fixture");

    catalog
        .put_category(&fixture.categories[0])
        .await
        .expect("put category");
    catalog.put_store(&fixture.stores[0]).await.expect("put store");
    catalog
        .delete_store(&StoreId::new("pan-rico"))
        .await
        .expect("delete store");

    let written = stand.written.lock().expect("lock");
    let (collection, id, body) = &written[1];
    assert_eq!(collection, "stores");
    assert_eq!(id, "dulce-aroma");
    assert_eq!(body["fields"]["category"]["stringValue"], "repostería");
    assert_eq!(body["fields"]["minimumOrder"]["doubleValue"], 15000.0);
    assert!(body["fields"].get("id").is_none());
    assert_eq!(written[0].0, "storeCategories");

    assert_eq!(*stand.deleted.lock().expect("lock"), vec!["pan-rico".to_string()]);
}
