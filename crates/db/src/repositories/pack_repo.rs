//! Repository for prompt packs. Read-only: packs are seeded out of band.

use photoforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::pack::{Pack, PackPrompt};

/// Read operations for packs and their prompts.
pub struct PackRepo;

impl PackRepo {
    /// List all packs, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Pack>, sqlx::Error> {
        sqlx::query_as::<_, Pack>(
            "SELECT id, name, description, thumbnail, created_at FROM packs ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// All prompts for a pack, in insertion order.
    ///
    /// Insertion order is load-bearing for pack generation: submission
    /// order and job-creation order must match exactly.
    pub async fn prompts(pool: &PgPool, pack_id: DbId) -> Result<Vec<PackPrompt>, sqlx::Error> {
        sqlx::query_as::<_, PackPrompt>(
            "SELECT id, pack_id, prompt FROM pack_prompts WHERE pack_id = $1 ORDER BY id",
        )
        .bind(pack_id)
        .fetch_all(pool)
        .await
    }
}
