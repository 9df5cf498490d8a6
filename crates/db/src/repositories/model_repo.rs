//! Repository for the `models` table (training jobs).

use photoforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::model::{CreateModel, Model};

const COLUMNS: &str = "id, user_id, name, subject_type, age, ethnicity, eye_color, bald, \
                       zip_url, fal_request_id, training_status, tensor_path, thumbnail, \
                       is_open, created_at, updated_at";

/// Outcome of attempting to finish a training job.
#[derive(Debug)]
pub enum TrainingCompletion {
    /// Job marked Generated and the training cost debited.
    Completed(Model),
    /// Balance did not cover the training cost; nothing was mutated and the
    /// job stays Pending.
    InsufficientCredits { available: i64 },
}

/// Operations on model training jobs.
pub struct ModelRepo;

impl ModelRepo {
    /// Create a training job row with status Pending.
    pub async fn create(pool: &PgPool, input: &CreateModel) -> Result<Model, sqlx::Error> {
        let query = format!(
            "INSERT INTO models (user_id, name, subject_type, age, ethnicity, eye_color, \
                                 bald, zip_url, fal_request_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Model>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.subject_type)
            .bind(input.age)
            .bind(&input.ethnicity)
            .bind(&input.eye_color)
            .bind(input.bald)
            .bind(&input.zip_url)
            .bind(&input.fal_request_id)
            .fetch_one(pool)
            .await
    }

    /// Find a model by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Model>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM models WHERE id = $1");
        sqlx::query_as::<_, Model>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a model by the provider's request id.
    pub async fn find_by_request_id(
        pool: &PgPool,
        request_id: &str,
    ) -> Result<Option<Model>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM models WHERE fal_request_id = $1");
        sqlx::query_as::<_, Model>(&query)
            .bind(request_id)
            .fetch_optional(pool)
            .await
    }

    /// Models visible to a user: their own plus community models.
    pub async fn list_visible(pool: &PgPool, user_id: DbId) -> Result<Vec<Model>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM models
             WHERE user_id = $1 OR is_open = TRUE
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Model>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Finish a training job: debit the training cost and mark the job
    /// Generated (storing weights and thumbnail) in one database
    /// transaction.
    ///
    /// Training is billed on completion, so the debit is conditional: if
    /// the balance does not cover `cost`, the whole transaction rolls back
    /// and the job stays Pending. The `training_status = 'Pending'` guard
    /// keeps webhook redeliveries from re-applying either effect.
    pub async fn complete_training(
        pool: &PgPool,
        model_id: DbId,
        user_id: DbId,
        tensor_path: &str,
        thumbnail: &str,
        cost: i64,
    ) -> Result<TrainingCompletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let debited =
            crate::repositories::CreditRepo::try_debit_tx(&mut *tx, user_id, cost).await?;
        if !debited {
            tx.rollback().await?;
            let available = crate::repositories::CreditRepo::balance(pool, user_id).await?;
            return Ok(TrainingCompletion::InsufficientCredits { available });
        }

        let query = format!(
            "UPDATE models
             SET training_status = 'Generated', tensor_path = $2, thumbnail = $3,
                 updated_at = NOW()
             WHERE id = $1 AND training_status = 'Pending'
             RETURNING {COLUMNS}"
        );
        let model = sqlx::query_as::<_, Model>(&query)
            .bind(model_id)
            .bind(tensor_path)
            .bind(thumbnail)
            .fetch_optional(&mut *tx)
            .await?;

        match model {
            Some(model) => {
                tx.commit().await?;
                Ok(TrainingCompletion::Completed(model))
            }
            // Lost a race with another delivery of the same webhook; the
            // debit rolls back with the transaction.
            None => {
                tx.rollback().await?;
                Err(sqlx::Error::RowNotFound)
            }
        }
    }

    /// Mark a pending training job Failed. Returns the updated row, or
    /// `None` if the job was already terminal.
    pub async fn mark_failed(
        pool: &PgPool,
        request_id: &str,
    ) -> Result<Option<Model>, sqlx::Error> {
        let query = format!(
            "UPDATE models
             SET training_status = 'Failed', updated_at = NOW()
             WHERE fal_request_id = $1 AND training_status = 'Pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Model>(&query)
            .bind(request_id)
            .fetch_optional(pool)
            .await
    }
}
