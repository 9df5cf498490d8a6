//! Client for the Razorpay payment provider.
//!
//! Two responsibilities: creating/fetching orders over the REST API, and
//! verifying the HMAC-SHA256 signature the provider hands back to clients
//! after checkout. Settlement logic (transaction records, subscriptions,
//! credits) lives in the api crate on top of this.

pub mod client;
pub mod signature;

pub use client::{OrderResponse, RazorpayClient, RazorpayConfig, RazorpayError};
pub use signature::verify_signature;
