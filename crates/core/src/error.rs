use crate::types::DbId;

/// Domain error taxonomy.
///
/// Everything a handler can fail with at the domain level, independent of
/// HTTP. The api crate maps each variant to a status code and response body.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// An async job keyed by a provider request id could not be located.
    #[error("No {entity} found for provider request {request_id}")]
    RequestNotFound {
        entity: &'static str,
        request_id: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown plan: {0}")]
    InvalidPlan(String),

    /// A billable operation was attempted with too small a balance.
    /// Checked before any external call is made.
    #[error("Insufficient credits: need {required}, have {available}")]
    InsufficientCredits { required: i64, available: i64 },

    /// No PENDING transaction matches the order being verified. Guards
    /// settlement against replays of already-settled or unknown orders.
    #[error("No pending transaction found for this order")]
    NoPendingTransaction,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
