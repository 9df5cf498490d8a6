//! Route definitions for the `/ai` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::{generate, training};
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /training  -> submit training job
/// POST /generate  -> submit single generation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/training", post(training::train))
        .route("/generate", post(generate::generate))
}
