use mongodb::bson::{doc, oid::ObjectId};
use serde_json::json;

use crate::ack::{DeleteAck, InsertAck, UpdateAck};
use crate::booking::{BookingRecord, NewBooking, StatusUpdate};
use crate::catalog::{ServiceRecord, ServiceSummary, SUMMARY_FIELDS};

#[test]
fn service_record_serializes_with_underscore_id() {
    let oid = ObjectId::new();
    let rec = ServiceRecord::from_document(doc! { "_id": oid, "title": "Mountain bike", "price": 30_i32 });
    assert_eq!(rec.title(), Some("Mountain bike"));
    let v = serde_json::to_value(&rec).unwrap();
    assert_eq!(v, json!({ "_id": oid.to_hex(), "title": "Mountain bike", "price": 30 }));
}

#[test]
fn summary_keeps_only_the_four_allowed_fields() {
    let doc = doc! {
        "_id": ObjectId::new(),
        "title": "City bike",
        "price": "25.00",
        "service_id": "03",
        "img": "https://img.example.com/city.png",
        "description": "long text",
        "facility": ["lock", "basket"],
    };
    let summary = ServiceSummary::from_document(doc);
    let v = serde_json::to_value(&summary).unwrap();
    let obj = v.as_object().unwrap();
    assert_eq!(obj.len(), 4);
    for key in SUMMARY_FIELDS {
        assert!(obj.contains_key(key), "missing {key}");
    }
}

#[test]
fn summary_omits_absent_fields() {
    let summary = ServiceSummary::from_document(doc! { "title": "Tandem" });
    assert_eq!(serde_json::to_value(&summary).unwrap(), json!({ "title": "Tandem" }));
}

#[test]
fn summary_projection_excludes_identity() {
    let p = ServiceSummary::projection();
    assert_eq!(p.get_i32("_id").unwrap(), 0);
    for key in SUMMARY_FIELDS {
        assert_eq!(p.get_i32(key).unwrap(), 1);
    }
}

#[test]
fn booking_accessors_read_email_and_status() {
    let rec = BookingRecord::from_document(doc! { "_id": ObjectId::new(), "email": "a@example.com", "status": "pending" });
    assert_eq!(rec.email(), Some("a@example.com"));
    assert_eq!(rec.status(), Some("pending"));
    let rec = BookingRecord::from_document(doc! { "_id": ObjectId::new(), "email": 42_i32 });
    assert_eq!(rec.email(), None);
    assert_eq!(rec.status(), None);
}

#[test]
fn new_booking_is_a_transparent_object() {
    let nb: NewBooking = serde_json::from_value(json!({ "email": "a@example.com", "date": "2026-10-20" })).unwrap();
    assert_eq!(nb.email(), Some("a@example.com"));
    assert!(serde_json::from_value::<NewBooking>(json!([1, 2])).is_err());
}

#[test]
fn status_update_tolerates_missing_status() {
    let u: StatusUpdate = serde_json::from_value(json!({})).unwrap();
    assert_eq!(u.status, serde_json::Value::Null);
    let u: StatusUpdate = serde_json::from_value(json!({ "status": "confirmed", "email": "ignored" })).unwrap();
    assert_eq!(u.status, json!("confirmed"));
}

#[test]
fn status_update_accepts_any_json_type() {
    for status in [json!(2), json!(true), json!({ "step": "paid" }), json!(["a", "b"])] {
        let u: StatusUpdate = serde_json::from_value(json!({ "status": status.clone() })).unwrap();
        assert_eq!(u.status, status);
    }
}

#[test]
fn acks_use_camel_case_keys() {
    assert_eq!(
        serde_json::to_value(InsertAck::new("abc")).unwrap(),
        json!({ "acknowledged": true, "insertedId": "abc" })
    );
    assert_eq!(
        serde_json::to_value(UpdateAck::new(1, 1)).unwrap(),
        json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 1, "upsertedCount": 0, "upsertedId": null })
    );
    assert_eq!(
        serde_json::to_value(DeleteAck::new(0)).unwrap(),
        json!({ "acknowledged": true, "deletedCount": 0 })
    );
}
