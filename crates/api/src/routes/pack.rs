//! Route definitions for the `/pack` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pack;
use crate::state::AppState;

/// Routes mounted at `/pack`.
///
/// ```text
/// POST /generate  -> generate every prompt in a pack
/// GET  /bulk      -> list packs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(pack::generate_pack))
        .route("/bulk", get(pack::list_packs))
}
