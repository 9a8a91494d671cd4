#![cfg(test)]
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use serde_json::json;

use models::Fields;

use crate::catalog::repository::mock::MockCatalogRepository;

fn object(v: serde_json::Value) -> Fields {
    v.as_object().cloned().unwrap_or_default()
}

/// Catalog document with fields beyond the public projection.
pub fn service_fields(title: &str, price: i64, service_id: &str) -> Fields {
    object(json!({
        "title": title,
        "price": price,
        "service_id": service_id,
        "img": format!("https://img.example.com/{service_id}.png"),
        "description": format!("{title} for a day"),
        "facility": [{ "name": "Helmet", "details": "included" }],
    }))
}

/// Booking payload as the frontend submits it.
pub fn booking_payload(email: &str, service: &str) -> Fields {
    object(json!({
        "customerName": "Rider",
        "email": email,
        "service": service,
        "date": "2026-10-20",
        "price": 30,
        "status": "pending",
    }))
}

/// Mock catalog seeded with three services; ids in insertion order.
pub fn sample_catalog() -> (Arc<MockCatalogRepository>, Vec<ObjectId>) {
    let repo = Arc::new(MockCatalogRepository::default());
    let ids = vec![
        repo.insert(service_fields("Mountain bike", 30, "01")),
        repo.insert(service_fields("City bike", 20, "02")),
        repo.insert(service_fields("Tandem", 45, "03")),
    ];
    (repo, ids)
}
