//! Prompt packs: read-only reference data consumed by pack generation.

use photoforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `packs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pack {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub created_at: Timestamp,
}

/// Row from the `pack_prompts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackPrompt {
    pub id: DbId,
    pub pack_id: DbId,
    pub prompt: String,
}
