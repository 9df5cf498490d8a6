//! Route definitions for model listing and status polling.

use axum::routing::get;
use axum::Router;

use crate::handlers::model;
use crate::state::AppState;

/// Routes merged at the API root.
///
/// ```text
/// GET /models             -> list visible models
/// GET /model/status/{id}  -> training status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/models", get(model::list_models))
        .route("/model/status/{id}", get(model::model_status))
}
