//! Credit ledger entry: one row per user holding the spendable balance.

use photoforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `user_credits` table.
///
/// `amount` never goes negative: the schema carries a CHECK constraint and
/// every debit is a conditional update that fails closed on insufficient
/// funds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserCredit {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
