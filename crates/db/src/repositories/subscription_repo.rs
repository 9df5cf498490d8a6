//! Repository for the `subscriptions` purchase history.

use photoforge_core::plan::Plan;
use photoforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::{Subscription, SubscriptionSummary};
use crate::repositories::CreditRepo;

const COLUMNS: &str = "id, user_id, plan, payment_id, order_id, created_at";

/// Operations on confirmed plan purchases.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Record a confirmed purchase and grant the plan's credits in a single
    /// database transaction.
    ///
    /// Either both the subscription row and the ledger increment commit, or
    /// neither does. Returns the created subscription and the resulting
    /// balance.
    pub async fn create_with_credits(
        pool: &PgPool,
        user_id: DbId,
        plan: Plan,
        payment_id: &str,
        order_id: &str,
    ) -> Result<(Subscription, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO subscriptions (user_id, plan, payment_id, order_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(plan.as_str())
            .bind(payment_id)
            .bind(order_id)
            .fetch_one(&mut *tx)
            .await?;

        let balance = CreditRepo::credit_tx(&mut *tx, user_id, plan.credit_grant()).await?;

        tx.commit().await?;
        Ok((subscription, balance))
    }

    /// Most recent purchase for a user ("current plan"), if any.
    pub async fn current_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<SubscriptionSummary>, sqlx::Error> {
        sqlx::query_as::<_, SubscriptionSummary>(
            "SELECT plan, created_at FROM subscriptions
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
