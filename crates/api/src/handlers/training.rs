//! Handler for training submission (`POST /ai/training`).

use axum::extract::State;
use axum::Json;
use photoforge_core::training::validate_training_params;
use photoforge_core::types::DbId;
use photoforge_db::models::model::CreateModel;
use photoforge_db::repositories::ModelRepo;
use photoforge_db::retry::with_retry;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /ai/training`.
#[derive(Debug, Deserialize)]
pub struct TrainingRequest {
    pub name: String,
    pub subject_type: String,
    pub age: i32,
    pub ethnicity: String,
    pub eye_color: String,
    pub bald: bool,
    pub zip_url: String,
}

/// Response body: the id of the created training job.
#[derive(Debug, Serialize)]
pub struct TrainingResponse {
    pub model_id: DbId,
}

/// POST /api/v1/ai/training
///
/// Validates parameters, submits the archive to the provider, and records
/// the job keyed by the provider's request id. Training is billed on
/// completion (by the training webhook), not here.
pub async fn train(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<TrainingRequest>,
) -> AppResult<Json<DataResponse<TrainingResponse>>> {
    validate_training_params(
        &input.subject_type,
        &input.ethnicity,
        &input.eye_color,
        input.age,
    )
    .map_err(AppError::Core)?;

    if input.name.is_empty() || input.zip_url.is_empty() {
        return Err(AppError::BadRequest(
            "name and zip_url must not be empty".into(),
        ));
    }

    let submission = state.fal.submit_training(&input.zip_url, &input.name).await?;

    let create = CreateModel {
        user_id: user.user_id,
        name: input.name,
        subject_type: input.subject_type,
        age: input.age,
        ethnicity: input.ethnicity,
        eye_color: input.eye_color,
        bald: input.bald,
        zip_url: input.zip_url,
        fal_request_id: submission.request_id.clone(),
    };

    // The provider call already happened: only this local record write sits
    // in the retry scope. If it still fails the training request is
    // orphaned at the provider and must be reconciled by hand.
    let model = with_retry(|| ModelRepo::create(&state.pool, &create))
        .await
        .map_err(|err| {
            tracing::error!(
                request_id = %submission.request_id,
                error = %err,
                "Failed to record training job; provider request is orphaned"
            );
            err
        })?;

    Ok(Json(DataResponse {
        data: TrainingResponse { model_id: model.id },
    }))
}
