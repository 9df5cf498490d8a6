//! Domain layer shared by every photoforge crate.
//!
//! Pure types and rules only: plans, credit costs, training-parameter
//! enumerations, and the domain error taxonomy. No I/O lives here.

pub mod credits;
pub mod error;
pub mod plan;
pub mod training;
pub mod types;
