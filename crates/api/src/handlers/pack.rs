//! Handlers for prompt packs: listing and pack generation.

use axum::extract::State;
use axum::Json;
use futures::future::try_join_all;
use photoforge_core::credits::pack_generation_cost;
use photoforge_core::error::CoreError;
use photoforge_core::types::DbId;
use photoforge_db::models::output_image::CreateOutputImage;
use photoforge_db::models::pack::Pack;
use photoforge_db::repositories::{ModelRepo, OutputImageRepo, PackRepo};
use photoforge_db::retry::with_retry;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::generate::{require_tensor, reserve_credits};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /pack/generate`.
#[derive(Debug, Deserialize)]
pub struct PackGenerateRequest {
    pub pack_id: DbId,
    pub model_id: DbId,
}

/// Response body: one job id per pack prompt, in prompt order.
#[derive(Debug, Serialize)]
pub struct PackGenerateResponse {
    pub images: Vec<DbId>,
}

/// POST /api/v1/pack/generate
///
/// Fans out one generation per pack prompt. The full pack cost is reserved
/// as a single ledger mutation before any submission; prompts are then
/// submitted concurrently and the job rows bulk-created in submission
/// order, so row k is keyed by the request id of prompt k. An upstream
/// failure before the bulk insert leaves zero rows -- partial creation
/// would silently mis-pair prompts and request ids.
pub async fn generate_pack(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<PackGenerateRequest>,
) -> AppResult<Json<DataResponse<PackGenerateResponse>>> {
    let prompts = PackRepo::prompts(&state.pool, input.pack_id).await?;
    if prompts.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Pack has no prompts".into(),
        )));
    }

    let model = ModelRepo::find_by_id(&state.pool, input.model_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Model",
            id: input.model_id,
        }))?;
    let tensor_path = require_tensor(&model)?;

    let cost = pack_generation_cost(prompts.len());
    reserve_credits(&state, user.user_id, cost).await?;

    let submissions = try_join_all(
        prompts
            .iter()
            .map(|p| state.fal.submit_generation(&p.prompt, tensor_path)),
    )
    .await
    .map_err(|err| {
        tracing::error!(
            pack_id = input.pack_id,
            error = %err,
            "Pack submission failed after credits were reserved"
        );
        err
    })?;

    let inputs: Vec<CreateOutputImage> = prompts
        .into_iter()
        .zip(submissions)
        .map(|(prompt, submission)| CreateOutputImage {
            user_id: user.user_id,
            model_id: model.id,
            prompt: prompt.prompt,
            fal_request_id: submission.request_id,
        })
        .collect();

    let images = with_retry(|| OutputImageRepo::create_many(&state.pool, &inputs)).await?;

    Ok(Json(DataResponse {
        data: PackGenerateResponse {
            images: images.iter().map(|image| image.id).collect(),
        },
    }))
}

/// GET /api/v1/pack/bulk
///
/// List all packs. Public: packs are browsable before signing in.
pub async fn list_packs(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Pack>>>> {
    let packs = PackRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: packs }))
}
