//! Handlers for provider webhooks.
//!
//! Webhooks are delivered at-most-once in the happy path but must tolerate
//! redelivery: a callback for a job already in a terminal status is a
//! successful no-op, applied before any provider call or ledger mutation.
//! Unknown request ids are a 404; the provider owns webhook retry policy.

use axum::extract::State;
use axum::Json;
use photoforge_core::credits::TRAIN_MODEL_CREDITS;
use photoforge_core::error::CoreError;
use photoforge_db::models::status::JobStatus;
use photoforge_db::repositories::{ModelRepo, OutputImageRepo, TrainingCompletion};
use photoforge_fal::webhook::{ImageWebhookPayload, TrainWebhookPayload};

use crate::error::{AppError, AppResult};
use crate::response::WebhookAck;
use crate::state::AppState;

/// POST /api/v1/fal-ai/webhook/train
///
/// Completes a training job: fetches the trained weights from the queue,
/// renders a preview thumbnail, then -- in one database transaction --
/// debits the training cost and marks the job Generated. Training is
/// billed here, on completion, so a job that never finishes never charges.
/// Insufficient credits leave the job Pending (a terminal failure for this
/// delivery; a later redelivery after a top-up can still complete it).
pub async fn train_webhook(
    State(state): State<AppState>,
    Json(payload): Json<TrainWebhookPayload>,
) -> AppResult<Json<WebhookAck>> {
    let model = ModelRepo::find_by_request_id(&state.pool, &payload.request_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(request_id = %payload.request_id, "Training webhook for unknown request");
            AppError::Core(CoreError::RequestNotFound {
                entity: "Model",
                request_id: payload.request_id.clone(),
            })
        })?;

    let status = JobStatus::parse(&model.training_status).unwrap_or(JobStatus::Pending);
    if status.is_terminal() {
        tracing::info!(
            request_id = %payload.request_id,
            status = %model.training_status,
            "Training webhook redelivered for settled job"
        );
        return Ok(Json(WebhookAck {
            message: "Already processed",
        }));
    }

    if payload.is_error() {
        ModelRepo::mark_failed(&state.pool, &payload.request_id).await?;
        return Ok(Json(WebhookAck {
            message: "Training failure recorded",
        }));
    }

    // The callback body is not trusted for the tensor location; fetch the
    // result from the queue by request id.
    let result = state.fal.fetch_training_result(&payload.request_id).await?;
    let tensor_path = result.diffusers_lora_file.url;

    let thumbnail = state.fal.generate_preview(&tensor_path).await?;

    match ModelRepo::complete_training(
        &state.pool,
        model.id,
        model.user_id,
        &tensor_path,
        &thumbnail,
        TRAIN_MODEL_CREDITS,
    )
    .await?
    {
        TrainingCompletion::Completed(_) => Ok(Json(WebhookAck {
            message: "Webhook processed",
        })),
        TrainingCompletion::InsufficientCredits { available } => {
            tracing::warn!(
                request_id = %payload.request_id,
                user_id = model.user_id,
                available,
                "Training finished but balance does not cover the cost"
            );
            Err(AppError::Core(CoreError::InsufficientCredits {
                required: TRAIN_MODEL_CREDITS,
                available,
            }))
        }
    }
}

/// POST /api/v1/fal-ai/webhook/image
///
/// Terminal update for a generation job. Failures keep any partial image
/// url the provider delivered; credits were debited at submission and are
/// not refunded.
pub async fn image_webhook(
    State(state): State<AppState>,
    Json(payload): Json<ImageWebhookPayload>,
) -> AppResult<Json<WebhookAck>> {
    let image = OutputImageRepo::find_by_request_id(&state.pool, &payload.request_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(request_id = %payload.request_id, "Image webhook for unknown request");
            AppError::Core(CoreError::RequestNotFound {
                entity: "OutputImage",
                request_id: payload.request_id.clone(),
            })
        })?;

    let status = JobStatus::parse(&image.status).unwrap_or(JobStatus::Pending);
    if status.is_terminal() {
        tracing::info!(
            request_id = %payload.request_id,
            status = %image.status,
            "Image webhook redelivered for settled job"
        );
        return Ok(Json(WebhookAck {
            message: "Already processed",
        }));
    }

    if payload.is_error() {
        OutputImageRepo::mark_failed(&state.pool, &payload.request_id, payload.first_image_url())
            .await?;
        return Ok(Json(WebhookAck {
            message: "Generation failure recorded",
        }));
    }

    let image_url = payload.first_image_url().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Webhook payload has no image url".into(),
        ))
    })?;

    OutputImageRepo::mark_generated(&state.pool, &payload.request_id, image_url).await?;

    Ok(Json(WebhookAck {
        message: "Webhook received",
    }))
}
