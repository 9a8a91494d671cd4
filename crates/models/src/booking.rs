use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{split_document, Fields};

pub const COLLECTION: &str = "booking";
pub const EMAIL_FIELD: &str = "email";
pub const STATUS_FIELD: &str = "status";

/// Stored booking. Only `_id` is typed; `email` and `status` are read through accessors
/// so that documents with unexpected shapes still round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl BookingRecord {
    pub fn from_document(doc: Document) -> Self {
        let (id, fields) = split_document(doc);
        Self { id: id.unwrap_or_default(), fields }
    }

    pub fn email(&self) -> Option<&str> {
        self.fields.get(EMAIL_FIELD).and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.fields.get(STATUS_FIELD).and_then(Value::as_str)
    }
}

/// Client-submitted booking payload, inserted verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewBooking(pub Fields);

impl NewBooking {
    pub fn email(&self) -> Option<&str> {
        self.0.get(EMAIL_FIELD).and_then(Value::as_str)
    }
}

/// Body of `PATCH /booking/:id`. `status` is stored as sent, whatever its JSON type;
/// a missing status is written as null.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Value,
}
