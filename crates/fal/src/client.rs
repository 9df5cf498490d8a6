//! HTTP client for the fal.ai queue and sync endpoints.

use serde::Deserialize;

use crate::config::FalConfig;

/// Queue endpoint for LoRA training jobs.
const TRAIN_MODEL_PATH: &str = "fal-ai/flux-lora-fast-training";

/// Endpoint for LoRA-conditioned image generation.
const GENERATE_MODEL_PATH: &str = "fal-ai/flux-lora";

/// Prompt used for the post-training preview render.
const PREVIEW_PROMPT: &str = "portrait photo, studio lighting, head and shoulders";

/// HTTP client for the fal.ai provider.
pub struct FalClient {
    client: reqwest::Client,
    config: FalConfig,
}

/// Response returned by the queue API after accepting a submission.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueSubmitResponse {
    /// Provider-assigned identifier; every job row is keyed by this.
    pub request_id: String,
    /// URL the final result can be fetched from.
    pub response_url: String,
}

/// Completed training result fetched from the queue.
#[derive(Debug, Deserialize)]
pub struct TrainingResult {
    pub diffusers_lora_file: FileRef,
}

/// A file reference in a provider response.
#[derive(Debug, Deserialize)]
pub struct FileRef {
    pub url: String,
}

/// Response of a synchronous generation call.
#[derive(Debug, Deserialize)]
struct SyncGenerateResponse {
    #[serde(default)]
    images: Vec<FileRef>,
}

/// Errors from the fal.ai API layer.
#[derive(Debug, thiserror::Error)]
pub enum FalError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("fal.ai API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response was missing an expected field.
    #[error("fal.ai response missing field: {0}")]
    MissingField(&'static str),
}

impl FalClient {
    /// Create a new client.
    pub fn new(config: FalConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (connection
    /// pooling across providers).
    pub fn with_client(client: reqwest::Client, config: FalConfig) -> Self {
        Self { client, config }
    }

    /// Submit a training job: an archive of subject photos plus a trigger
    /// word. Returns immediately with the queue's request id; the result
    /// arrives later on the training webhook.
    pub async fn submit_training(
        &self,
        zip_url: &str,
        trigger_word: &str,
    ) -> Result<QueueSubmitResponse, FalError> {
        let webhook = format!(
            "{}/api/v1/fal-ai/webhook/train",
            self.config.webhook_base_url
        );
        let body = serde_json::json!({
            "images_data_url": zip_url,
            "trigger_word": trigger_word,
        });

        let response = self
            .client
            .post(format!("{}/{}", self.config.queue_url, TRAIN_MODEL_PATH))
            .query(&[("fal_webhook", webhook.as_str())])
            .header("Authorization", format!("Key {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Submit a generation job for one prompt against trained weights.
    /// Returns immediately; the image arrives on the image webhook.
    pub async fn submit_generation(
        &self,
        prompt: &str,
        tensor_path: &str,
    ) -> Result<QueueSubmitResponse, FalError> {
        let webhook = format!(
            "{}/api/v1/fal-ai/webhook/image",
            self.config.webhook_base_url
        );
        let body = serde_json::json!({
            "prompt": prompt,
            "loras": [{ "path": tensor_path, "scale": 1.0 }],
        });

        let response = self
            .client
            .post(format!("{}/{}", self.config.queue_url, GENERATE_MODEL_PATH))
            .query(&[("fal_webhook", webhook.as_str())])
            .header("Authorization", format!("Key {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the result of a completed training job from the queue.
    pub async fn fetch_training_result(
        &self,
        request_id: &str,
    ) -> Result<TrainingResult, FalError> {
        let response = self
            .client
            .get(format!(
                "{}/{}/requests/{}",
                self.config.queue_url, TRAIN_MODEL_PATH, request_id
            ))
            .header("Authorization", format!("Key {}", self.config.api_key))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Render a preview image synchronously against freshly trained
    /// weights. Returns the image URL.
    pub async fn generate_preview(&self, tensor_path: &str) -> Result<String, FalError> {
        let body = serde_json::json!({
            "prompt": PREVIEW_PROMPT,
            "loras": [{ "path": tensor_path, "scale": 1.0 }],
        });

        let response = self
            .client
            .post(format!("{}/{}", self.config.sync_url, GENERATE_MODEL_PATH))
            .header("Authorization", format!("Key {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        let result: SyncGenerateResponse = Self::parse_response(response).await?;
        result
            .images
            .into_iter()
            .next()
            .map(|image| image.url)
            .ok_or(FalError::MissingField("images[0].url"))
    }

    /// Deserialize a 2xx response body, or surface the status and raw body
    /// as an [`FalError::Api`].
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FalError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FalError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
