//! Handlers for the `/payment` resource: order creation, verification and
//! settlement, and the credit/subscription/transaction queries.

use axum::extract::State;
use axum::Json;
use photoforge_core::error::CoreError;
use photoforge_core::plan::{Plan, PLAN_CURRENCY};
use photoforge_core::types::Timestamp;
use photoforge_db::models::status::TxStatus;
use photoforge_db::models::subscription::{Subscription, SubscriptionSummary};
use photoforge_db::models::transaction::{CreateTransaction, Transaction};
use photoforge_db::repositories::{CreditRepo, SubscriptionRepo, TransactionRepo};
use photoforge_db::retry::with_retry;
use photoforge_payments::client::OrderNotes;
use photoforge_payments::verify_signature;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Display name embedded in order descriptors for the checkout UI.
const CHECKOUT_NAME: &str = "photoforge";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /payment/create`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub plan: String,
    pub method: String,
}

/// Order descriptor handed to the client for checkout completion.
#[derive(Debug, Serialize)]
pub struct OrderDescriptor {
    pub key: String,
    pub amount: i64,
    pub currency: String,
    pub name: &'static str,
    pub description: String,
    pub order_id: String,
}

/// Request body for `POST /payment/razorpay/verify`, matching the field
/// names the provider's checkout hands back to the client.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
    pub plan: String,
}

/// Response body for successful verification and settlement.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub credits: i64,
    pub subscription: Subscription,
}

/// Response body for `GET /payment/credits`.
#[derive(Debug, Serialize)]
pub struct CreditsResponse {
    pub credits: i64,
    pub last_updated: Option<Timestamp>,
}

/// Response body for `GET /payment/subscription`.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub subscription: Option<SubscriptionSummary>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/payment/create
///
/// Create a provider order for a plan purchase. The PENDING transaction
/// record is written before the descriptor is returned; verification
/// refuses orders it has no record for.
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<Json<DataResponse<OrderDescriptor>>> {
    let plan = Plan::parse(&input.plan).map_err(AppError::Core)?;

    if input.method != "razorpay" {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unsupported payment method: {}",
            input.method
        ))));
    }

    let notes = OrderNotes {
        user_id: user.user_id,
        plan: plan.as_str().to_string(),
    };
    let order = state
        .razorpay
        .create_order(plan.price(), PLAN_CURRENCY, &notes)
        .await?;

    // The external order exists from here on. Only the local record write
    // is retried; if it still fails the order is orphaned at the provider
    // and the purchase must be retried from scratch.
    let create = CreateTransaction {
        user_id: user.user_id,
        amount: plan.price(),
        currency: PLAN_CURRENCY.to_string(),
        order_id: order.id.clone(),
        plan: plan.as_str().to_string(),
    };
    with_retry(|| TransactionRepo::create(&state.pool, &create))
        .await
        .map_err(|err| {
            tracing::error!(
                order_id = %order.id,
                user_id = user.user_id,
                error = %err,
                "Failed to record transaction; provider order is orphaned"
            );
            err
        })?;

    Ok(Json(DataResponse {
        data: OrderDescriptor {
            key: state.razorpay.key_id().to_string(),
            amount: order.amount,
            currency: order.currency,
            name: CHECKOUT_NAME,
            description: format!("{} plan - {} credits", plan, plan.credit_grant()),
            order_id: order.id,
        },
    }))
}

/// POST /api/v1/payment/razorpay/verify
///
/// Verify a checkout signature and settle the order exactly once. An
/// invalid signature is an expected rejection (400), never a fault: the
/// matching transaction is marked FAILED and nothing else is touched. On a
/// valid signature the transaction is marked SUCCESS and, atomically, a
/// subscription row is created and the plan's credits granted.
pub async fn verify(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<VerifyResponse>> {
    let plan = Plan::parse(&input.plan).map_err(AppError::Core)?;

    // 1. Recompute the signature over order_id|payment_id.
    let signature_valid = verify_signature(
        state.razorpay.key_secret(),
        &input.razorpay_order_id,
        &input.razorpay_payment_id,
        &input.razorpay_signature,
    );

    // 2. On a valid signature, fetch the order from the provider for
    //    authoritative amount/currency. Client figures are never trusted.
    if signature_valid {
        let order = state.razorpay.fetch_order(&input.razorpay_order_id).await?;
        tracing::info!(
            order_id = %order.id,
            amount = order.amount,
            currency = %order.currency,
            user_id = user.user_id,
            "Verified order with provider"
        );
        if order.amount != plan.price() {
            tracing::warn!(
                order_id = %order.id,
                order_amount = order.amount,
                plan_price = plan.price(),
                "Provider order amount does not match plan price"
            );
        }
    }

    // 3. Locate the unique PENDING transaction for (order, user). Absence
    //    means the order is unknown or already settled -- a replay guard.
    let pending = TransactionRepo::find_pending(&state.pool, &input.razorpay_order_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NoPendingTransaction))?;

    // 4. Settle the record exactly once. A concurrent verification may get
    //    here first, in which case this is a replay after all.
    let outcome = if signature_valid {
        TxStatus::Success
    } else {
        TxStatus::Failed
    };
    settle_transaction(&state, pending.id, &input.razorpay_payment_id, outcome)
        .await?
        .ok_or(AppError::Core(CoreError::NoPendingTransaction))?;

    if !signature_valid {
        tracing::warn!(
            order_id = %input.razorpay_order_id,
            user_id = user.user_id,
            "Rejected payment with invalid signature"
        );
        return Err(AppError::BadRequest("Invalid payment signature".into()));
    }

    // 5. Subscription row + credit grant commit or roll back together.
    let (subscription, credits) = with_retry(|| {
        SubscriptionRepo::create_with_credits(
            &state.pool,
            user.user_id,
            plan,
            &input.razorpay_payment_id,
            &input.razorpay_order_id,
        )
    })
    .await?;

    Ok(Json(VerifyResponse {
        success: true,
        credits,
        subscription,
    }))
}

/// GET /api/v1/payment/credits
pub async fn credits(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<CreditsResponse>> {
    let ledger = CreditRepo::find_by_user(&state.pool, user.user_id).await?;
    Ok(Json(CreditsResponse {
        credits: ledger.as_ref().map_or(0, |entry| entry.amount),
        last_updated: ledger.map(|entry| entry.updated_at),
    }))
}

/// GET /api/v1/payment/subscription
pub async fn subscription(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<SubscriptionResponse>> {
    let subscription = SubscriptionRepo::current_for_user(&state.pool, user.user_id).await?;
    Ok(Json(SubscriptionResponse { subscription }))
}

/// GET /api/v1/payment/transactions
pub async fn transactions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Transaction>>>> {
    let transactions = TransactionRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: transactions }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Settle a PENDING transaction with bounded retry around the single
/// conditional update.
async fn settle_transaction(
    state: &AppState,
    id: photoforge_core::types::DbId,
    payment_id: &str,
    outcome: TxStatus,
) -> Result<Option<Transaction>, AppError> {
    let settled =
        with_retry(|| TransactionRepo::settle(&state.pool, id, payment_id, outcome)).await?;
    Ok(settled)
}
