//! Firestore REST typed values.
//!
//! Documents arrive as `{"fields": {"name": {"stringValue": "..."}}}`. These
//! types mirror that wire shape and convert to and from plain JSON so records
//! can be deserialized with the catalog's regular `serde` types.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single typed Firestore value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64, transported as a decimal string.
    IntegerValue(#[serde(with = "int64")] i64),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(GeoPoint),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name ending in `/{collection}/{id}`.
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    /// The document ID (last segment of the resource name).
    #[must_use]
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// Fields as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        fields_to_json(&self.fields)
    }
}

impl Value {
    /// Convert to plain JSON.
    ///
    /// Timestamps, bytes and references become strings; non-finite doubles
    /// become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Self::NullValue(()) => Json::Null,
            Self::BooleanValue(b) => Json::Bool(*b),
            Self::IntegerValue(i) => Json::from(*i),
            Self::DoubleValue(d) => {
                serde_json::Number::from_f64(*d).map_or(Json::Null, Json::Number)
            }
            Self::TimestampValue(s)
            | Self::StringValue(s)
            | Self::BytesValue(s)
            | Self::ReferenceValue(s) => Json::String(s.clone()),
            Self::GeoPointValue(point) => serde_json::json!({
                "latitude": point.latitude,
                "longitude": point.longitude,
            }),
            Self::ArrayValue(array) => {
                Json::Array(array.values.iter().map(Self::to_json).collect())
            }
            Self::MapValue(map) => Json::Object(fields_to_json(&map.fields)),
        }
    }

    /// Convert plain JSON to a typed value.
    ///
    /// Integral numbers that fit in `i64` become `integerValue`, every other
    /// number becomes `doubleValue`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Self::NullValue(()),
            Json::Bool(b) => Self::BooleanValue(*b),
            Json::Number(n) => n.as_i64().map_or_else(
                || Self::DoubleValue(n.as_f64().unwrap_or_default()),
                Self::IntegerValue,
            ),
            Json::String(s) => Self::StringValue(s.clone()),
            Json::Array(items) => Self::ArrayValue(ArrayValue {
                values: items.iter().map(Self::from_json).collect(),
            }),
            Json::Object(map) => Self::MapValue(MapValue {
                fields: fields_from_json(map),
            }),
        }
    }
}

/// Convert a typed field map to a JSON object.
#[must_use]
pub fn fields_to_json(
    fields: &BTreeMap<String, Value>,
) -> serde_json::Map<String, serde_json::Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect()
}

/// Convert a JSON object to a typed field map.
#[must_use]
pub fn fields_from_json(
    map: &serde_json::Map<String, serde_json::Value>,
) -> BTreeMap<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), Value::from_json(value)))
        .collect()
}

/// int64 values are strings on the wire but some emulators send numbers.
mod int64 {
    use super::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // signature required by serde `with`
    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Repr::Number(n) => Ok(n),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_document_fields() {
        let doc: Document = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/stores/dulce-aroma",
            "fields": {
                "name": { "stringValue": "Dulce Aroma" },
                "rating": { "doubleValue": 4.8 },
                "totalReviews": { "integerValue": "127" },
                "isOpen": { "booleanValue": true },
                "address": { "nullValue": null },
                "specialties": { "arrayValue": { "values": [
                    { "stringValue": "Tortas" },
                    { "stringValue": "Cupcakes" }
                ] } },
                "openingHours": { "mapValue": { "fields": {
                    "lunes": { "stringValue": "7:00 - 19:00" }
                } } },
                "menu": { "arrayValue": {} }
            },
            "createTime": "2025-01-10T12:00:00Z",
            "updateTime": "2025-02-01T08:30:00Z"
        }))
        .unwrap();

        assert_eq!(doc.id(), "dulce-aroma");
        assert_eq!(
            serde_json::Value::Object(doc.to_json()),
            json!({
                "name": "Dulce Aroma",
                "rating": 4.8,
                "totalReviews": 127,
                "isOpen": true,
                "address": null,
                "specialties": ["Tortas", "Cupcakes"],
                "openingHours": { "lunes": "7:00 - 19:00" },
                "menu": []
            })
        );
    }

    #[test]
    fn test_integer_value_accepts_number() {
        let value: Value = serde_json::from_value(json!({ "integerValue": 42 })).unwrap();
        assert_eq!(value, Value::IntegerValue(42));
    }

    #[test]
    fn test_integer_value_serializes_as_string() {
        let json = serde_json::to_value(Value::IntegerValue(15_000)).unwrap();
        assert_eq!(json, json!({ "integerValue": "15000" }));
    }

    #[test]
    fn test_from_json_picks_number_kinds() {
        assert_eq!(Value::from_json(&json!(3000)), Value::IntegerValue(3000));
        assert_eq!(Value::from_json(&json!(4.5)), Value::DoubleValue(4.5));
        assert_eq!(Value::from_json(&json!(5000.0)), Value::DoubleValue(5000.0));
    }

    #[test]
    fn test_from_json_nested() {
        let value = Value::from_json(&json!({
            "items": [{ "id": "pan", "isAvailable": true }]
        }));
        let wire = serde_json::to_value(&value).unwrap();
        assert_eq!(
            wire,
            json!({ "mapValue": { "fields": {
                "items": { "arrayValue": { "values": [
                    { "mapValue": { "fields": {
                        "id": { "stringValue": "pan" },
                        "isAvailable": { "booleanValue": true }
                    } } }
                ] } }
            } } })
        );
    }

    #[test]
    fn test_geo_point_and_timestamp_to_json() {
        let point = Value::GeoPointValue(GeoPoint {
            latitude: 4.6,
            longitude: -74.08,
        });
        assert_eq!(point.to_json(), json!({ "latitude": 4.6, "longitude": -74.08 }));

        let ts = Value::TimestampValue("2025-01-10T12:00:00Z".to_string());
        assert_eq!(ts.to_json(), json!("2025-01-10T12:00:00Z"));
    }
}
