//! Minimal Razorpay client built on reqwest.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configuration for the Razorpay client.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// Public key id, also embedded in order descriptors for the client SDK.
    pub key_id: String,
    /// Secret key: HTTP basic-auth password and HMAC signing secret.
    pub key_secret: String,
    /// API base URL.
    pub api_url: String,
}

impl RazorpayConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                      |
    /// |-----------------------|----------|------------------------------|
    /// | `RAZORPAY_KEY_ID`     | **yes**  | --                           |
    /// | `RAZORPAY_KEY_SECRET` | **yes**  | --                           |
    /// | `RAZORPAY_API_URL`    | no       | `https://api.razorpay.com/v1`|
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing.
    pub fn from_env() -> Self {
        let key_id = std::env::var("RAZORPAY_KEY_ID").expect("RAZORPAY_KEY_ID must be set");
        let key_secret =
            std::env::var("RAZORPAY_KEY_SECRET").expect("RAZORPAY_KEY_SECRET must be set");
        let api_url = std::env::var("RAZORPAY_API_URL")
            .unwrap_or_else(|_| "https://api.razorpay.com/v1".into());

        Self {
            key_id,
            key_secret,
            api_url,
        }
    }
}

/// An order as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Metadata attached to an order linking it back to (user, plan).
#[derive(Debug, Serialize)]
pub struct OrderNotes {
    pub user_id: i64,
    pub plan: String,
}

/// Errors from the Razorpay API layer.
#[derive(Debug, thiserror::Error)]
pub enum RazorpayError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Razorpay API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the Razorpay orders API.
pub struct RazorpayClient {
    client: reqwest::Client,
    config: RazorpayConfig,
}

impl RazorpayClient {
    /// Create a new client.
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: RazorpayConfig) -> Self {
        Self { client, config }
    }

    /// The public key id, for inclusion in order descriptors.
    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }

    /// The signing secret, for signature verification.
    pub fn key_secret(&self) -> &str {
        &self.config.key_secret
    }

    /// Create an order for `amount` minor units of `currency`, tagged with
    /// notes linking it to the purchasing user and plan. A random receipt
    /// id is attached for provider-side idempotency.
    pub async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        notes: &OrderNotes,
    ) -> Result<OrderResponse, RazorpayError> {
        let receipt = format!("rcpt_{}", Uuid::new_v4().simple());
        let body = serde_json::json!({
            "amount": amount,
            "currency": currency,
            "receipt": receipt,
            "notes": notes,
        });

        let response = self
            .client
            .post(format!("{}/orders", self.config.api_url))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch an order directly from the provider. Used during verification
    /// to obtain authoritative amount/currency instead of trusting the
    /// client.
    pub async fn fetch_order(&self, order_id: &str) -> Result<OrderResponse, RazorpayError> {
        let response = self
            .client
            .get(format!("{}/orders/{}", self.config.api_url, order_id))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Deserialize a 2xx response body, or surface the status and raw body
    /// as an [`RazorpayError::Api`].
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RazorpayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RazorpayError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
