//! Payment attempt log, one row per provider order.

use photoforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `transactions` table.
///
/// `payment_id` stays NULL until verification confirms the payment; `status`
/// is the sole source of truth for whether an order has been settled.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub user_id: DbId,
    /// Amount in minor currency units, copied from the plan price at order
    /// creation.
    pub amount: i64,
    pub currency: String,
    pub payment_id: Option<String>,
    pub order_id: String,
    pub plan: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a new payment attempt.
#[derive(Debug)]
pub struct CreateTransaction {
    pub user_id: DbId,
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
    pub plan: String,
}
