//! Repository for the `output_images` table (generation jobs).

use photoforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::output_image::{CreateOutputImage, OutputImage};

const COLUMNS: &str = "id, user_id, model_id, prompt, fal_request_id, status, image_url, \
                       created_at, updated_at";

/// Operations on image generation jobs.
pub struct OutputImageRepo;

impl OutputImageRepo {
    /// Create a generation job row with status Pending and an empty url.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOutputImage,
    ) -> Result<OutputImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO output_images (user_id, model_id, prompt, fal_request_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OutputImage>(&query)
            .bind(input.user_id)
            .bind(input.model_id)
            .bind(&input.prompt)
            .bind(&input.fal_request_id)
            .fetch_one(pool)
            .await
    }

    /// Bulk-create jobs for a pack generation inside one transaction.
    ///
    /// Rows are inserted in slice order so each prompt stays paired with
    /// the provider request id produced by its own submission. Any failure
    /// rolls the whole batch back: partial creation would silently
    /// mis-attribute webhook results.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateOutputImage],
    ) -> Result<Vec<OutputImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO output_images (user_id, model_id, prompt, fal_request_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );

        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let image = sqlx::query_as::<_, OutputImage>(&query)
                .bind(input.user_id)
                .bind(input.model_id)
                .bind(&input.prompt)
                .bind(&input.fal_request_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(image);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find a generation job by the provider's request id.
    pub async fn find_by_request_id(
        pool: &PgPool,
        request_id: &str,
    ) -> Result<Option<OutputImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM output_images WHERE fal_request_id = $1");
        sqlx::query_as::<_, OutputImage>(&query)
            .bind(request_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a pending job Generated and store the delivered image url.
    /// Returns `None` when the job was already terminal.
    pub async fn mark_generated(
        pool: &PgPool,
        request_id: &str,
        image_url: &str,
    ) -> Result<Option<OutputImage>, sqlx::Error> {
        let query = format!(
            "UPDATE output_images
             SET status = 'Generated', image_url = $2, updated_at = NOW()
             WHERE fal_request_id = $1 AND status = 'Pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OutputImage>(&query)
            .bind(request_id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Mark a pending job Failed, keeping any partial image url the
    /// provider delivered. Returns `None` when the job was already
    /// terminal. Credits are not refunded.
    pub async fn mark_failed(
        pool: &PgPool,
        request_id: &str,
        image_url: Option<&str>,
    ) -> Result<Option<OutputImage>, sqlx::Error> {
        let query = format!(
            "UPDATE output_images
             SET status = 'Failed', image_url = COALESCE($2, image_url), updated_at = NOW()
             WHERE fal_request_id = $1 AND status = 'Pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OutputImage>(&query)
            .bind(request_id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// A user's images, newest first, excluding Failed jobs. Optionally
    /// restricted to specific ids; paginated.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OutputImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM output_images
             WHERE user_id = $1
               AND status <> 'Failed'
               AND (cardinality($2::bigint[]) = 0 OR id = ANY($2))
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, OutputImage>(&query)
            .bind(user_id)
            .bind(ids)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
