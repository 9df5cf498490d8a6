//! Purchase plans.
//!
//! A plan is a fixed (price, credit grant) pair. Prices are in minor
//! currency units and are the single source of truth for order creation --
//! client-supplied amounts are never trusted.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Currency used for all plan purchases.
pub const PLAN_CURRENCY: &str = "INR";

/// The fixed set of purchasable plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Premium,
}

impl Plan {
    /// Price in minor currency units.
    pub fn price(self) -> i64 {
        match self {
            Plan::Basic => 3999,
            Plan::Premium => 7999,
        }
    }

    /// Credits granted when a purchase of this plan settles.
    pub fn credit_grant(self) -> i64 {
        match self {
            Plan::Basic => 999,
            Plan::Premium => 1999,
        }
    }

    /// Stable lowercase identifier, as stored in the database and sent to
    /// the payment provider in order notes.
    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Premium => "premium",
        }
    }

    /// Parse a plan identifier. Unknown identifiers are an
    /// [`CoreError::InvalidPlan`] validation failure, not a fault.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            other => Err(CoreError::InvalidPlan(other.to_string())),
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
