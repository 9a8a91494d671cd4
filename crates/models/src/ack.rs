//! Write acknowledgments, serialized in the camelCase shape clients parse
//! (`insertedId`, `modifiedCount`, ...).

use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::{Deserialize, Serialize};

use crate::document::id_to_string;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertAck {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self { acknowledged: true, inserted_id: inserted_id.into() }
    }
}

impl From<InsertOneResult> for InsertAck {
    fn from(r: InsertOneResult) -> Self { Self::new(id_to_string(&r.inserted_id)) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self { acknowledged: true, matched_count, modified_count, upserted_count: 0, upserted_id: None }
    }
}

impl From<UpdateResult> for UpdateAck {
    fn from(r: UpdateResult) -> Self {
        let upserted_id = r.upserted_id.as_ref().map(id_to_string);
        Self {
            acknowledged: true,
            matched_count: r.matched_count,
            modified_count: r.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self { Self { acknowledged: true, deleted_count } }
}

impl From<DeleteResult> for DeleteAck {
    fn from(r: DeleteResult) -> Self { Self::new(r.deleted_count) }
}
