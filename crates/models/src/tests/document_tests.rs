use mongodb::bson::{doc, oid::ObjectId, Bson};
use serde_json::json;

use crate::document::{fields_to_document, id_to_string, parse_object_id, split_document, Fields};
use crate::errors::ModelError;

#[test]
fn parse_object_id_accepts_hex_and_rejects_garbage() {
    let oid = ObjectId::new();
    assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
    assert!(matches!(parse_object_id("not-an-id"), Err(ModelError::InvalidId(_))));
    assert!(matches!(parse_object_id(""), Err(ModelError::InvalidId(_))));
}

#[test]
fn id_to_string_renders_object_ids_as_hex() {
    let oid = ObjectId::new();
    assert_eq!(id_to_string(&Bson::ObjectId(oid)), oid.to_hex());
    assert_eq!(id_to_string(&Bson::String("legacy-1".into())), "legacy-1");
    assert_eq!(id_to_string(&Bson::Int32(7)), "7");
}

#[test]
fn split_document_extracts_identity_and_keeps_other_fields() {
    let oid = ObjectId::new();
    let doc = doc! { "_id": oid, "email": "a@example.com", "seats": 2_i32, "extras": { "helmet": true } };
    let (id, fields) = split_document(doc);
    assert_eq!(id, Some(oid.to_hex()));
    assert!(!fields.contains_key("_id"));
    assert_eq!(fields["email"], json!("a@example.com"));
    assert_eq!(fields["seats"], json!(2));
    assert_eq!(fields["extras"], json!({ "helmet": true }));
}

#[test]
fn fields_to_document_keeps_client_identity() {
    let mut fields = Fields::new();
    fields.insert("_id".into(), json!("client-chosen"));
    fields.insert("email".into(), json!("a@example.com"));
    fields.insert("price".into(), json!(12.5));
    let doc = fields_to_document(&fields).unwrap();
    assert_eq!(doc.get_str("_id").unwrap(), "client-chosen");
    assert_eq!(doc.get_str("email").unwrap(), "a@example.com");
    assert_eq!(doc.get_f64("price").unwrap(), 12.5);
}
