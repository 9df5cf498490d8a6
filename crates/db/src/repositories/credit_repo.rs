//! Repository for the `user_credits` ledger.
//!
//! Debits are a single conditional update (`WHERE amount >= cost`) so two
//! concurrent spenders can never drive a balance negative; zero rows
//! affected means insufficient funds. Credits upsert the ledger row so the
//! first grant creates it lazily.

use photoforge_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::credit::UserCredit;

const COLUMNS: &str = "id, user_id, amount, created_at, updated_at";

/// Ledger operations for user credits.
pub struct CreditRepo;

impl CreditRepo {
    /// Current balance; users without a ledger row have balance 0.
    pub async fn balance(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let amount: Option<i64> =
            sqlx::query_scalar("SELECT amount FROM user_credits WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(amount.unwrap_or(0))
    }

    /// Full ledger row, if the user has one.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserCredit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_credits WHERE user_id = $1");
        sqlx::query_as::<_, UserCredit>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Increment the balance, creating the ledger row if absent. Returns
    /// the new balance.
    ///
    /// Callers must invoke this at most once per confirmed external event
    /// (payment success, training completion); the ledger itself cannot
    /// tell a legitimate grant from a double-application.
    pub async fn credit(pool: &PgPool, user_id: DbId, amount: i64) -> Result<i64, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::credit_tx(&mut conn, user_id, amount).await
    }

    /// Transaction-scoped variant of [`CreditRepo::credit`] for callers that
    /// need the grant to commit or roll back with other writes.
    pub async fn credit_tx(
        conn: &mut PgConnection,
        user_id: DbId,
        amount: i64,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO user_credits (user_id, amount)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE
                SET amount = user_credits.amount + EXCLUDED.amount,
                    updated_at = NOW()
             RETURNING amount",
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(conn)
        .await
    }

    /// Atomically debit `cost` if the balance covers it.
    ///
    /// Returns `false` without mutating anything when funds are
    /// insufficient (including when no ledger row exists).
    pub async fn try_debit(pool: &PgPool, user_id: DbId, cost: i64) -> Result<bool, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::try_debit_tx(&mut conn, user_id, cost).await
    }

    /// Transaction-scoped variant of [`CreditRepo::try_debit`].
    pub async fn try_debit_tx(
        conn: &mut PgConnection,
        user_id: DbId,
        cost: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_credits
             SET amount = amount - $2, updated_at = NOW()
             WHERE user_id = $1 AND amount >= $2",
        )
        .bind(user_id)
        .bind(cost)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
