//! Integration tests for payment settlement: exactly-once transaction
//! updates and the atomic subscription + credit grant.

use photoforge_core::plan::Plan;
use photoforge_db::models::status::TxStatus;
use photoforge_db::models::transaction::CreateTransaction;
use photoforge_db::models::user::CreateUser;
use photoforge_db::repositories::{CreditRepo, SubscriptionRepo, TransactionRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            name: "Test User".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_pending_tx(pool: &PgPool, user_id: i64, order_id: &str) -> i64 {
    TransactionRepo::create(
        pool,
        &CreateTransaction {
            user_id,
            amount: Plan::Basic.price(),
            currency: "INR".to_string(),
            order_id: order_id.to_string(),
            plan: "basic".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test]
async fn test_new_transaction_is_pending_with_plan_price(pool: PgPool) {
    let user_id = seed_user(&pool, "pending@test.com").await;
    seed_pending_tx(&pool, user_id, "order_1").await;

    let tx = TransactionRepo::find_pending(&pool, "order_1", user_id)
        .await
        .unwrap()
        .expect("pending record should exist");
    assert_eq!(tx.status, "PENDING");
    assert_eq!(tx.amount, 3999);
    assert!(tx.payment_id.is_none());
}

#[sqlx::test]
async fn test_settle_transitions_exactly_once(pool: PgPool) {
    let user_id = seed_user(&pool, "once@test.com").await;
    let tx_id = seed_pending_tx(&pool, user_id, "order_2").await;

    let settled = TransactionRepo::settle(&pool, tx_id, "pay_1", TxStatus::Success)
        .await
        .unwrap()
        .expect("first settle should apply");
    assert_eq!(settled.status, "SUCCESS");
    assert_eq!(settled.payment_id.as_deref(), Some("pay_1"));

    // A second settle attempt is a no-op: the PENDING guard fails.
    let replay = TransactionRepo::settle(&pool, tx_id, "pay_1", TxStatus::Success)
        .await
        .unwrap();
    assert!(replay.is_none());

    // The record is no longer findable as pending.
    assert!(TransactionRepo::find_pending(&pool, "order_2", user_id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn test_failed_settlement_never_reverts(pool: PgPool) {
    let user_id = seed_user(&pool, "failed@test.com").await;
    let tx_id = seed_pending_tx(&pool, user_id, "order_3").await;

    TransactionRepo::settle(&pool, tx_id, "pay_2", TxStatus::Failed)
        .await
        .unwrap()
        .expect("settle should apply");

    let replay = TransactionRepo::settle(&pool, tx_id, "pay_2", TxStatus::Success)
        .await
        .unwrap();
    assert!(replay.is_none(), "FAILED must not transition to SUCCESS");
}

#[sqlx::test]
async fn test_subscription_and_credits_settle_together(pool: PgPool) {
    let user_id = seed_user(&pool, "atomic@test.com").await;

    let (subscription, balance) =
        SubscriptionRepo::create_with_credits(&pool, user_id, Plan::Basic, "pay_3", "order_4")
            .await
            .unwrap();

    assert_eq!(subscription.plan, "basic");
    assert_eq!(subscription.order_id, "order_4");
    assert_eq!(balance, 999);
    assert_eq!(CreditRepo::balance(&pool, user_id).await.unwrap(), 999);

    let current = SubscriptionRepo::current_for_user(&pool, user_id)
        .await
        .unwrap()
        .expect("current plan should exist");
    assert_eq!(current.plan, "basic");
}

#[sqlx::test]
async fn test_settlement_rolls_back_as_a_unit(pool: PgPool) {
    let user_id = seed_user(&pool, "rollback@test.com").await;

    // A nonexistent user violates the subscriptions FK, so the insert
    // fails; the credit grant half must not survive on its own.
    let missing_user = user_id + 1000;
    let result =
        SubscriptionRepo::create_with_credits(&pool, missing_user, Plan::Basic, "pay_4", "order_5")
            .await;
    assert!(result.is_err());

    assert_eq!(CreditRepo::balance(&pool, missing_user).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_renewals_append_history(pool: PgPool) {
    let user_id = seed_user(&pool, "renewal@test.com").await;

    SubscriptionRepo::create_with_credits(&pool, user_id, Plan::Basic, "pay_5", "order_6")
        .await
        .unwrap();
    let (_, balance) =
        SubscriptionRepo::create_with_credits(&pool, user_id, Plan::Premium, "pay_6", "order_7")
            .await
            .unwrap();

    assert_eq!(balance, 999 + 1999);

    let current = SubscriptionRepo::current_for_user(&pool, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.plan, "premium", "most recent purchase wins");
}
