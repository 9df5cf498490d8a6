//! Client for the fal.ai training/inference provider.
//!
//! Training and generation are asynchronous: a submission returns a
//! `request_id` immediately and the provider calls back on a webhook when
//! the job reaches a terminal state. This crate owns the HTTP client and
//! the wire types for both directions; it persists nothing.

pub mod client;
pub mod config;
pub mod webhook;

pub use client::{FalClient, FalError, QueueSubmitResponse, TrainingResult};
pub use config::FalConfig;
