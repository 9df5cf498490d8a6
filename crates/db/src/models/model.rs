//! Trained model entity: tracks one async training job through its
//! lifecycle, keyed by the provider's request id.

use photoforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `models` table.
///
/// `tensor_path` and `thumbnail` stay NULL until the training webhook
/// completes the job; a model is usable for generation only once
/// `tensor_path` is set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Model {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub subject_type: String,
    pub age: i32,
    pub ethnicity: String,
    pub eye_color: String,
    pub bald: bool,
    pub zip_url: String,
    pub fal_request_id: String,
    pub training_status: String,
    pub tensor_path: Option<String>,
    pub thumbnail: Option<String>,
    pub is_open: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a model row at training submission time.
#[derive(Debug)]
pub struct CreateModel {
    pub user_id: DbId,
    pub name: String,
    pub subject_type: String,
    pub age: i32,
    pub ethnicity: String,
    pub eye_color: String,
    pub bald: bool,
    pub zip_url: String,
    pub fal_request_id: String,
}

/// Status projection for polling clients.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub thumbnail: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Model> for ModelStatus {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            status: model.training_status.clone(),
            thumbnail: model.thumbnail.clone(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
