use std::sync::Arc;

use photoforge_fal::FalClient;
use photoforge_payments::RazorpayClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: photoforge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// AI training/inference provider client.
    pub fal: Arc<FalClient>,
    /// Payment provider client.
    pub razorpay: Arc<RazorpayClient>,
}
