use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{split_document, Fields};

pub const COLLECTION: &str = "services";

/// Fields exposed by the single-record catalog lookup.
pub const SUMMARY_FIELDS: [&str; 4] = ["title", "price", "service_id", "img"];

/// Catalog entry as stored; read-only from this service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl ServiceRecord {
    pub fn from_document(doc: Document) -> Self {
        let (id, fields) = split_document(doc);
        Self { id: id.unwrap_or_default(), fields }
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }
}

/// Reduced view returned by `GET /services/:id`. Absent fields are omitted rather
/// than rendered as null.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<Value>,
}

impl ServiceSummary {
    /// Store-side projection; `_id` is excluded explicitly since MongoDB includes it by default.
    pub fn projection() -> Document {
        doc! { "_id": 0, "title": 1, "price": 1, "service_id": 1, "img": 1 }
    }

    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            title: fields.get("title").cloned(),
            price: fields.get("price").cloned(),
            service_id: fields.get("service_id").cloned(),
            img: fields.get("img").cloned(),
        }
    }

    pub fn from_document(doc: Document) -> Self {
        let (_, fields) = split_document(doc);
        Self::from_fields(&fields)
    }
}
