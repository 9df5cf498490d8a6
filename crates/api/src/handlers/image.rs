//! Handler for listing a user's generated images.

use axum::extract::{Query, State};
use axum::Json;
use photoforge_core::error::CoreError;
use photoforge_core::types::DbId;
use photoforge_db::models::output_image::OutputImage;
use photoforge_db::repositories::OutputImageRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for image listings.
const DEFAULT_LIMIT: i64 = 100;

/// Query parameters for `GET /image/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkImageQuery {
    /// Optional comma-separated image ids to restrict to.
    pub ids: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/image/bulk
///
/// The user's images, newest first, excluding failed generations.
pub async fn bulk_images(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BulkImageQuery>,
) -> AppResult<Json<DataResponse<Vec<OutputImage>>>> {
    let ids: Vec<DbId> = match query.ids.as_deref() {
        None | Some("") => Vec::new(),
        Some(raw) => raw
            .split(',')
            .map(|part| {
                part.trim().parse::<DbId>().map_err(|_| {
                    AppError::Core(CoreError::Validation(format!("Invalid image id: {part}")))
                })
            })
            .collect::<Result<_, _>>()?,
    };

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, DEFAULT_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let images =
        OutputImageRepo::list_for_user(&state.pool, user.user_id, &ids, limit, offset).await?;

    Ok(Json(DataResponse { data: images }))
}
