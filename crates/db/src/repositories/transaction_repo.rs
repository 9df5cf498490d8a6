//! Repository for the `transactions` payment log.

use photoforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::TxStatus;
use crate::models::transaction::{CreateTransaction, Transaction};

const COLUMNS: &str = "id, user_id, amount, currency, payment_id, order_id, plan, status, \
                       created_at, updated_at";

/// Operations on payment attempt records.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Record a new payment attempt with status PENDING.
    ///
    /// Must complete before the order descriptor is handed to the caller;
    /// verification refuses orders it has no PENDING record for.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions (user_id, amount, currency, order_id, plan, status)
             VALUES ($1, $2, $3, $4, $5, 'PENDING')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(&input.order_id)
            .bind(&input.plan)
            .fetch_one(pool)
            .await
    }

    /// The unique PENDING record for (order, user), if any.
    pub async fn find_pending(
        pool: &PgPool,
        order_id: &str,
        user_id: DbId,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE order_id = $1 AND user_id = $2 AND status = 'PENDING'"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(order_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Settle a PENDING record exactly once, recording the provider payment
    /// id and the verification outcome.
    ///
    /// The `status = 'PENDING'` guard in the WHERE clause makes replays
    /// no-ops at the SQL level: returns `None` if the record was already
    /// settled (or does not exist).
    pub async fn settle(
        pool: &PgPool,
        id: DbId,
        payment_id: &str,
        outcome: TxStatus,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!(
            "UPDATE transactions
             SET status = $2, payment_id = $3, updated_at = NOW()
             WHERE id = $1 AND status = 'PENDING'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .bind(outcome.as_str())
            .bind(payment_id)
            .fetch_optional(pool)
            .await
    }

    /// All payment attempts for a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
