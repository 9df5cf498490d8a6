//! Route definitions for provider webhook callbacks.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/fal-ai/webhook`. Public: the provider does not
/// authenticate callbacks; handlers are idempotent and keyed by
/// provider-issued request ids.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/train", post(webhooks::train_webhook))
        .route("/image", post(webhooks::image_webhook))
}
