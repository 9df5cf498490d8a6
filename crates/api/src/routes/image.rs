//! Route definitions for the `/image` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::image;
use crate::state::AppState;

/// Routes mounted at `/image`.
pub fn router() -> Router<AppState> {
    Router::new().route("/bulk", get(image::bulk_images))
}
