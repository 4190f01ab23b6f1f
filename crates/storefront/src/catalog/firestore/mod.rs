//! Cloud Firestore catalog over the REST API.
//!
//! Every call is a single request/response against
//! `{base}/v1/projects/{project}/databases/{database}/documents`. There is
//! no caching, retry or custom timeout; failures surface as
//! [`CatalogError`] and the caller keeps whatever it showed before.

pub mod value;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use sweet_creations_core::{Store, StoreCategory, StoreId, StoreKind};

use super::documents::{decode_all, decode_category, decode_store, encode_fields};
use super::{CatalogError, CatalogRepository, CatalogWriter, matches_search_term};
use crate::config::FirestoreConfig;
use value::{Document, Value};

/// Documents requested per list page.
const PAGE_SIZE: u32 = 300;

/// Characters of an error body kept in logs and errors.
const ERROR_BODY_LIMIT: usize = 500;

/// Firestore-backed catalog.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct FirestoreCatalog {
    inner: Arc<FirestoreCatalogInner>,
}

struct FirestoreCatalogInner {
    client: reqwest::Client,
    documents_url: String,
    api_key: SecretString,
    stores_collection: String,
    categories_collection: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryResponse {
    document: Option<Document>,
}

impl FirestoreCatalog {
    /// Create a new Firestore catalog client.
    #[must_use]
    pub fn new(config: &FirestoreConfig) -> Self {
        Self {
            inner: Arc::new(FirestoreCatalogInner {
                client: reqwest::Client::new(),
                documents_url: config.documents_url(),
                api_key: config.api_key.clone(),
                stores_collection: config.stores_collection.clone(),
                categories_collection: config.categories_collection.clone(),
            }),
        }
    }

    fn key(&self) -> [(&'static str, &str); 1] {
        [("key", self.inner.api_key.expose_secret())]
    }

    /// Fetch every document of a collection, following page tokens.
    #[instrument(skip(self))]
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, CatalogError> {
        let url = format!("{}/{collection}", self.inner.documents_url);
        let page_size = PAGE_SIZE.to_string();
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .inner
                .client
                .get(&url)
                .query(&self.key())
                .query(&[("pageSize", page_size.as_str())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = check_status(request.send().await?).await?;
            let page: ListDocumentsResponse = parse_json(response).await?;
            documents.extend(page.documents);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = documents.len(), "Fetched collection");
        Ok(documents)
    }

    /// Fetch a single document. A 404 means absent.
    #[instrument(skip(self))]
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, CatalogError> {
        let url = format!("{}/{collection}/{}", self.inner.documents_url, encode_segment(id));
        let response = self.inner.client.get(&url).query(&self.key()).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check_status(response).await?;
        Ok(Some(parse_json(response).await?))
    }

    /// Run a structured query against the stores collection.
    #[instrument(skip(self, filter))]
    async fn query_stores(
        &self,
        label: &str,
        filter: serde_json::Value,
    ) -> Result<Vec<Store>, CatalogError> {
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.inner.stores_collection }],
                "where": filter,
                "orderBy": [{
                    "field": { "fieldPath": "rating" },
                    "direction": "DESCENDING"
                }]
            }
        });

        let url = format!("{}:runQuery", self.inner.documents_url);
        let response = self
            .inner
            .client
            .post(&url)
            .query(&self.key())
            .json(&body)
            .send()
            .await?;
        let rows: Vec<RunQueryResponse> = parse_json(check_status(response).await?).await?;

        let documents: Vec<Document> = rows.into_iter().filter_map(|row| row.document).collect();
        debug!(count = documents.len(), "Query returned documents");
        Ok(decode_all(&documents, decode_store))
    }

    /// Create or replace a document.
    async fn patch_document(
        &self,
        collection: &str,
        id: &str,
        fields: BTreeMap<String, Value>,
    ) -> Result<(), CatalogError> {
        let url = format!("{}/{collection}/{}", self.inner.documents_url, encode_segment(id));
        let response = self
            .inner
            .client
            .patch(&url)
            .query(&self.key())
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for FirestoreCatalog {
    async fn list_stores(&self) -> Result<Vec<Store>, CatalogError> {
        let documents = self.list_documents(&self.inner.stores_collection).await?;
        Ok(decode_all(&documents, decode_store))
    }

    async fn list_categories(&self) -> Result<Vec<StoreCategory>, CatalogError> {
        let documents = self
            .list_documents(&self.inner.categories_collection)
            .await?;
        Ok(decode_all(&documents, decode_category))
    }

    async fn find_store_by_id(&self, id: &StoreId) -> Result<Option<Store>, CatalogError> {
        let Some(document) = self
            .get_document(&self.inner.stores_collection, id.as_str())
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(decode_store(&document)?))
    }

    async fn list_stores_by_category(&self, kind: StoreKind) -> Result<Vec<Store>, CatalogError> {
        let filter = field_equals("category", json!({ "stringValue": kind.as_str() }));
        self.query_stores("by_category", filter).await
    }

    async fn search_stores_by_term(&self, term: &str) -> Result<Vec<Store>, CatalogError> {
        // Firestore has no full-text search; filter the full snapshot.
        let term = term.to_lowercase();
        let stores = self.list_stores().await?;
        Ok(stores
            .into_iter()
            .filter(|store| matches_search_term(store, &term))
            .collect())
    }

    async fn list_open_stores(&self) -> Result<Vec<Store>, CatalogError> {
        self.query_stores("open", field_equals("isOpen", json!({ "booleanValue": true })))
            .await
    }
}

#[async_trait]
impl CatalogWriter for FirestoreCatalog {
    #[instrument(skip(self, store), fields(store_id = %store.id))]
    async fn put_store(&self, store: &Store) -> Result<(), CatalogError> {
        let fields = encode_fields(store)?;
        self.patch_document(&self.inner.stores_collection, store.id.as_str(), fields)
            .await
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn put_category(&self, category: &StoreCategory) -> Result<(), CatalogError> {
        let fields = encode_fields(category)?;
        self.patch_document(
            &self.inner.categories_collection,
            category.id.as_str(),
            fields,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_store(&self, id: &StoreId) -> Result<(), CatalogError> {
        let url = format!(
            "{}/{}/{}",
            self.inner.documents_url,
            self.inner.stores_collection,
            encode_segment(id.as_str())
        );
        let response = self.inner.client.delete(&url).query(&self.key()).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Build a `fieldFilter` with the `EQUAL` operator.
fn field_equals(field: &str, value: serde_json::Value) -> serde_json::Value {
    json!({
        "fieldFilter": {
            "field": { "fieldPath": field },
            "op": "EQUAL",
            "value": value
        }
    })
}

/// Percent-encode a document ID for use as a path segment.
fn encode_segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Turn non-success responses into `CatalogError::Status`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    tracing::error!(
        status = %status,
        body = %message,
        "Firestore returned non-success status"
    );
    Err(CatalogError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Read the body as text first for better error diagnostics.
async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, CatalogError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %text.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
            "Failed to parse Firestore response"
        );
        CatalogError::Parse(e)
    })
}
