//! Conversions between stored BSON documents and the JSON shapes served over HTTP.

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::Value;

use crate::errors::ModelError;

/// Schema-free field map of a document.
pub type Fields = serde_json::Map<String, Value>;

pub const ID_FIELD: &str = "_id";

/// Parse a 24-hex identity as supplied in a path segment.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, ModelError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| ModelError::InvalidId(raw.to_string()))
}

/// Render a stored `_id` the way clients address it: hex for ObjectIds, the plain
/// value for string ids, extended JSON text for anything else.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

/// Split a stored document into its identity and its remaining fields.
pub fn split_document(mut doc: Document) -> (Option<String>, Fields) {
    let id = doc.remove(ID_FIELD).map(|b| id_to_string(&b));
    let fields = doc
        .into_iter()
        .map(|(k, v)| (k, v.into_relaxed_extjson()))
        .collect::<Fields>();
    (id, fields)
}

/// Build an insertable document from client fields, verbatim. A client `_id` is kept;
/// without one the store assigns an ObjectId.
pub fn fields_to_document(fields: &Fields) -> Result<Document, ModelError> {
    let mut doc = Document::new();
    for (k, v) in fields {
        doc.insert(k.clone(), value_to_bson(v)?);
    }
    Ok(doc)
}

/// Convert a single JSON value for use inside a filter or update.
pub fn value_to_bson(v: &Value) -> Result<Bson, ModelError> {
    mongodb::bson::to_bson(v).map_err(|e| ModelError::Conversion(e.to_string()))
}
