//! Integration tests for the credit ledger: lazy creation, grants, and the
//! conditional debit that keeps balances non-negative under races.

use photoforge_db::models::user::CreateUser;
use photoforge_db::repositories::{CreditRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            name: "Test User".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");
    user.id
}

#[sqlx::test]
async fn test_balance_defaults_to_zero(pool: PgPool) {
    let user_id = seed_user(&pool, "zero@test.com").await;

    let balance = CreditRepo::balance(&pool, user_id).await.unwrap();
    assert_eq!(balance, 0);
    assert!(CreditRepo::find_by_user(&pool, user_id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn test_credit_creates_ledger_row_lazily(pool: PgPool) {
    let user_id = seed_user(&pool, "lazy@test.com").await;

    let balance = CreditRepo::credit(&pool, user_id, 999).await.unwrap();
    assert_eq!(balance, 999);

    let entry = CreditRepo::find_by_user(&pool, user_id)
        .await
        .unwrap()
        .expect("ledger row should exist after first grant");
    assert_eq!(entry.amount, 999);
}

#[sqlx::test]
async fn test_credit_increments_existing_balance(pool: PgPool) {
    let user_id = seed_user(&pool, "increment@test.com").await;

    CreditRepo::credit(&pool, user_id, 100).await.unwrap();
    let balance = CreditRepo::credit(&pool, user_id, 50).await.unwrap();
    assert_eq!(balance, 150);
}

#[sqlx::test]
async fn test_debit_succeeds_when_covered(pool: PgPool) {
    let user_id = seed_user(&pool, "debit@test.com").await;
    CreditRepo::credit(&pool, user_id, 20).await.unwrap();

    assert!(CreditRepo::try_debit(&pool, user_id, 20).await.unwrap());
    assert_eq!(CreditRepo::balance(&pool, user_id).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_debit_fails_closed_when_short(pool: PgPool) {
    let user_id = seed_user(&pool, "short@test.com").await;
    CreditRepo::credit(&pool, user_id, 5).await.unwrap();

    assert!(!CreditRepo::try_debit(&pool, user_id, 6).await.unwrap());
    // Nothing was mutated by the failed debit.
    assert_eq!(CreditRepo::balance(&pool, user_id).await.unwrap(), 5);
}

#[sqlx::test]
async fn test_debit_without_ledger_row_is_insufficient(pool: PgPool) {
    let user_id = seed_user(&pool, "norow@test.com").await;

    assert!(!CreditRepo::try_debit(&pool, user_id, 1).await.unwrap());
}

#[sqlx::test]
async fn test_sequential_debits_cannot_overdraw(pool: PgPool) {
    let user_id = seed_user(&pool, "overdraw@test.com").await;
    CreditRepo::credit(&pool, user_id, 3).await.unwrap();

    // Four unit debits against a balance of 3: exactly three succeed no
    // matter the interleaving, and the balance lands on 0, never below.
    let mut succeeded = 0;
    for _ in 0..4 {
        if CreditRepo::try_debit(&pool, user_id, 1).await.unwrap() {
            succeeded += 1;
        }
    }
    assert_eq!(succeeded, 3);
    assert_eq!(CreditRepo::balance(&pool, user_id).await.unwrap(), 0);
}
