//! HTTP request handlers, grouped by resource.

pub mod auth;
pub mod generate;
pub mod image;
pub mod model;
pub mod pack;
pub mod payment;
pub mod training;
pub mod webhooks;
