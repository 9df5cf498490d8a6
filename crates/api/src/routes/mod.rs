pub mod ai;
pub mod auth;
pub mod health;
pub mod image;
pub mod model;
pub mod pack;
pub mod payment;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                 register (public)
/// /auth/signin                 login (public)
///
/// /ai/training                 submit a training job
/// /ai/generate                 submit a single generation
///
/// /pack/generate               generate a whole pack
/// /pack/bulk                   list packs (public)
///
/// /image/bulk                  list the caller's images
///
/// /models                      list visible models
/// /model/status/{id}           training status
///
/// /payment/create              create a provider order
/// /payment/razorpay/verify     verify + settle
/// /payment/credits             current balance
/// /payment/subscription        current plan
/// /payment/transactions        payment history
///
/// /fal-ai/webhook/train        provider callback (public)
/// /fal-ai/webhook/image        provider callback (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/ai", ai::router())
        .nest("/pack", pack::router())
        .nest("/image", image::router())
        .merge(model::router())
        .nest("/payment", payment::router())
        .nest("/fal-ai/webhook", webhooks::router())
}
