//! Schema validation at the repository boundary.
//!
//! Raw documents are coerced into [`Store`] / [`StoreCategory`]: the
//! document ID always wins over any `id` field in the body, optional
//! descriptive fields take their defaults, and records that still fail are
//! rejected with a [`DocumentError`].

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use sweet_creations_core::{Store, StoreCategory, StoreValidationError};

use super::firestore::value::{Document, Value, fields_from_json};

/// A document that could not be turned into a catalog record.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Fields missing or of the wrong type.
    #[error("document {id} does not match the expected schema: {source}")]
    Schema {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Fields present but violating a catalog invariant.
    #[error("document {id} failed validation: {source}")]
    Invalid {
        id: String,
        #[source]
        source: StoreValidationError,
    },
}

impl DocumentError {
    /// ID of the offending document.
    #[must_use]
    pub fn document_id(&self) -> &str {
        match self {
            Self::Schema { id, .. } | Self::Invalid { id, .. } => id,
        }
    }
}

/// Decode and validate a store document.
///
/// # Errors
///
/// Returns `DocumentError` if the fields do not form a valid store.
pub fn decode_store(doc: &Document) -> Result<Store, DocumentError> {
    let store: Store = decode_record(doc)?;
    store.validate().map_err(|source| DocumentError::Invalid {
        id: doc.id().to_string(),
        source,
    })?;
    Ok(store)
}

/// Decode a category document.
///
/// # Errors
///
/// Returns `DocumentError` if required fields are missing.
pub fn decode_category(doc: &Document) -> Result<StoreCategory, DocumentError> {
    decode_record(doc)
}

fn decode_record<T: DeserializeOwned>(doc: &Document) -> Result<T, DocumentError> {
    let mut body = doc.to_json();
    body.insert(
        "id".to_string(),
        serde_json::Value::String(doc.id().to_string()),
    );
    serde_json::from_value(serde_json::Value::Object(body)).map_err(|source| {
        DocumentError::Schema {
            id: doc.id().to_string(),
            source,
        }
    })
}

/// Decode every document, skipping and logging the ones that fail.
pub fn decode_all<T>(
    docs: &[Document],
    decode: impl Fn(&Document) -> Result<T, DocumentError>,
) -> Vec<T> {
    docs.iter()
        .filter_map(|doc| match decode(doc) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    document_id = %e.document_id(),
                    error = %e,
                    "Skipping malformed catalog document"
                );
                None
            }
        })
        .collect()
}

/// Encode a record's fields for writing. The `id` field is dropped; it lives
/// in the document name.
///
/// # Errors
///
/// Returns `serde_json::Error` if the record does not serialize to an object.
pub fn encode_fields<T: serde::Serialize>(
    record: &T,
) -> Result<std::collections::BTreeMap<String, Value>, serde_json::Error> {
    match serde_json::to_value(record)? {
        serde_json::Value::Object(mut map) => {
            map.remove("id");
            Ok(fields_from_json(&map))
        }
        _ => Err(serde::ser::Error::custom("record must serialize to an object")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use sweet_creations_core::StoreKind;

    fn doc(id: &str, fields: serde_json::Value) -> Document {
        let serde_json::Value::Object(map) = fields else {
            panic!("fields must be an object");
        };
        Document {
            name: format!("projects/p/databases/(default)/documents/stores/{id}"),
            fields: fields_from_json(&map),
            create_time: None,
            update_time: None,
        }
    }

    #[test]
    fn test_decode_store_uses_document_id() {
        let store = decode_store(&doc(
            "pan-rico",
            json!({
                "id": "something-else",
                "name": "Pan Rico",
                "category": "panadería",
                "deliveryFee": 0,
                "rating": 4,
                "specialties": ["Pan de bono"]
            }),
        ))
        .unwrap();

        assert_eq!(store.id.as_str(), "pan-rico");
        assert_eq!(store.category, StoreKind::Panaderia);
        assert!((store.rating - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_store_rejects_unknown_category() {
        let err = decode_store(&doc(
            "x",
            json!({ "name": "Heladería", "category": "heladería" }),
        ))
        .unwrap_err();
        assert!(matches!(err, DocumentError::Schema { .. }));
        assert_eq!(err.document_id(), "x");
    }

    #[test]
    fn test_decode_store_rejects_invalid_rating() {
        let err = decode_store(&doc(
            "x",
            json!({ "name": "X", "category": "cafetería", "rating": 9.5 }),
        ))
        .unwrap_err();
        assert!(matches!(err, DocumentError::Invalid { .. }));
    }

    #[test]
    fn test_decode_all_skips_malformed() {
        let docs = vec![
            doc("a", json!({ "name": "A", "category": "panadería" })),
            doc("b", json!({ "category": "panadería" })),
            doc("c", json!({ "name": "C", "category": "cafetería" })),
        ];
        let stores = decode_all(&docs, decode_store);
        let ids: Vec<_> = stores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_decode_category() {
        let category = decode_category(&doc(
            "2",
            json!({ "name": "Repostería", "icon": "🧁" }),
        ))
        .unwrap();
        assert_eq!(category.id.as_str(), "2");
        assert_eq!(category.name, "Repostería");
    }

    #[test]
    fn test_encode_fields_round_trip() {
        let store = decode_store(&doc(
            "dulce-aroma",
            json!({
                "name": "Dulce Aroma",
                "category": "repostería",
                "deliveryFee": 3000,
                "minimumOrder": 15000,
                "menu": [{
                    "id": "tortas",
                    "name": "Tortas",
                    "items": [{ "id": "t1", "name": "Torta", "price": 8500, "isAvailable": true }]
                }]
            }),
        ))
        .unwrap();

        let fields = encode_fields(&store).unwrap();
        assert!(!fields.contains_key("id"));
        assert_eq!(fields.get("deliveryFee"), Some(&Value::DoubleValue(3000.0)));

        let decoded = decode_store(&Document {
            name: "stores/dulce-aroma".to_string(),
            fields,
            create_time: None,
            update_time: None,
        })
        .unwrap();
        assert_eq!(decoded, store);
        assert_eq!(decoded.minimum_order, Some(Decimal::from(15_000)));
    }
}
