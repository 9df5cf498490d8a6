//! Route definitions for the `/payment` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payment`.
///
/// ```text
/// POST /create           -> create a provider order
/// POST /razorpay/verify  -> verify signature + settle
/// GET  /credits          -> current balance
/// GET  /subscription     -> current plan
/// GET  /transactions     -> payment history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(payment::create_order))
        .route("/razorpay/verify", post(payment::verify))
        .route("/credits", get(payment::credits))
        .route("/subscription", get(payment::subscription))
        .route("/transactions", get(payment::transactions))
}
