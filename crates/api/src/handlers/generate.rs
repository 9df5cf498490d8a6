//! Handler for single-image generation (`POST /ai/generate`).

use axum::extract::State;
use axum::Json;
use photoforge_core::credits::IMAGE_GEN_CREDITS;
use photoforge_core::error::CoreError;
use photoforge_core::types::DbId;
use photoforge_db::models::model::Model;
use photoforge_db::models::output_image::CreateOutputImage;
use photoforge_db::repositories::{CreditRepo, ModelRepo, OutputImageRepo};
use photoforge_db::retry::with_retry;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /ai/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub model_id: DbId,
    pub prompt: String,
}

/// Response body: the id of the created generation job.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub image_id: DbId,
}

/// POST /api/v1/ai/generate
///
/// One credit is reserved up front with an atomic conditional debit, so the
/// request is rejected before any external call when the balance is short
/// and concurrent requests can never overdraw. The provider call comes
/// after; a failed submission forfeits the reserved credit (logged, no
/// automatic refund).
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Json<DataResponse<GenerateResponse>>> {
    if input.prompt.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "prompt must not be empty".into(),
        )));
    }

    let model = ModelRepo::find_by_id(&state.pool, input.model_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Model",
            id: input.model_id,
        }))?;
    let tensor_path = require_tensor(&model)?;

    reserve_credits(&state, user.user_id, IMAGE_GEN_CREDITS).await?;

    let submission = state
        .fal
        .submit_generation(&input.prompt, tensor_path)
        .await
        .map_err(|err| {
            tracing::error!(
                model_id = model.id,
                error = %err,
                "Generation submission failed after credits were reserved"
            );
            err
        })?;

    let create = CreateOutputImage {
        user_id: user.user_id,
        model_id: model.id,
        prompt: input.prompt,
        fal_request_id: submission.request_id.clone(),
    };
    let image = with_retry(|| OutputImageRepo::create(&state.pool, &create))
        .await
        .map_err(|err| {
            tracing::error!(
                request_id = %submission.request_id,
                error = %err,
                "Failed to record generation job; provider request is orphaned"
            );
            err
        })?;

    Ok(Json(DataResponse {
        data: GenerateResponse { image_id: image.id },
    }))
}

/// The model's weights reference, or a validation failure if training has
/// not completed.
pub(crate) fn require_tensor(model: &Model) -> Result<&str, AppError> {
    model
        .tensor_path
        .as_deref()
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Model has not finished training".into(),
            ))
        })
}

/// Atomically debit `cost` from the user's balance, reporting the current
/// balance in the rejection when funds are short.
pub(crate) async fn reserve_credits(
    state: &AppState,
    user_id: DbId,
    cost: i64,
) -> Result<(), AppError> {
    let debited = with_retry(|| CreditRepo::try_debit(&state.pool, user_id, cost)).await?;
    if !debited {
        let available = CreditRepo::balance(&state.pool, user_id).await?;
        return Err(AppError::Core(CoreError::InsufficientCredits {
            required: cost,
            available,
        }));
    }
    Ok(())
}
