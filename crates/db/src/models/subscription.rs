//! Confirmed plan purchases. Append-only; rows are never updated.

use photoforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `subscriptions` table, created only as a side effect of
/// successful payment verification.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub user_id: DbId,
    pub plan: String,
    pub payment_id: String,
    pub order_id: String,
    pub created_at: Timestamp,
}

/// Projection returned by the current-plan lookup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubscriptionSummary {
    pub plan: String,
    pub created_at: Timestamp,
}
