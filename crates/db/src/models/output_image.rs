//! Output image entity: one async generation job per prompt.

use photoforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `output_images` table.
///
/// `image_url` is empty until the image webhook fires. On provider failure
/// the row is marked Failed but keeps whatever partial url was delivered.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OutputImage {
    pub id: DbId,
    pub user_id: DbId,
    pub model_id: DbId,
    pub prompt: String,
    pub fal_request_id: String,
    pub status: String,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an output image row at submission time.
#[derive(Debug)]
pub struct CreateOutputImage {
    pub user_id: DbId,
    pub model_id: DbId,
    pub prompt: String,
    pub fal_request_id: String,
}
