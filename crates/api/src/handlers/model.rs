//! Handlers for model listing and training-status polling.

use axum::extract::{Path, State};
use axum::Json;
use photoforge_core::error::CoreError;
use photoforge_core::types::DbId;
use photoforge_db::models::model::{Model, ModelStatus};
use photoforge_db::repositories::ModelRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/models
///
/// Models owned by the caller plus community (open) models.
pub async fn list_models(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Model>>>> {
    let models = ModelRepo::list_visible(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: models }))
}

/// GET /api/v1/model/status/{id}
///
/// Training status projection for polling clients. Owner-scoped: other
/// users' models read as not found rather than forbidden.
pub async fn model_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ModelStatus>>> {
    let model = ModelRepo::find_by_id(&state.pool, model_id)
        .await?
        .filter(|model| model.user_id == user.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Model",
            id: model_id,
        }))?;

    Ok(Json(DataResponse {
        data: ModelStatus::from(&model),
    }))
}
