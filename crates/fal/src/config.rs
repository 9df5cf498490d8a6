/// Configuration for the fal.ai client.
#[derive(Debug, Clone)]
pub struct FalConfig {
    /// API key sent as `Authorization: Key <key>`.
    pub api_key: String,
    /// Base URL of the asynchronous queue API.
    pub queue_url: String,
    /// Base URL of the synchronous inference API (preview renders).
    pub sync_url: String,
    /// Public base URL of this service, used to build webhook callbacks.
    pub webhook_base_url: String,
}

impl FalConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                 |
    /// |--------------------|----------|-------------------------|
    /// | `FAL_API_KEY`      | **yes**  | --                      |
    /// | `FAL_QUEUE_URL`    | no       | `https://queue.fal.run` |
    /// | `FAL_SYNC_URL`     | no       | `https://fal.run`       |
    /// | `WEBHOOK_BASE_URL` | **yes**  | --                      |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing, which is the desired
    /// behaviour -- we want misconfiguration to fail at startup.
    pub fn from_env() -> Self {
        let api_key = std::env::var("FAL_API_KEY").expect("FAL_API_KEY must be set");
        let queue_url =
            std::env::var("FAL_QUEUE_URL").unwrap_or_else(|_| "https://queue.fal.run".into());
        let sync_url = std::env::var("FAL_SYNC_URL").unwrap_or_else(|_| "https://fal.run".into());
        let webhook_base_url =
            std::env::var("WEBHOOK_BASE_URL").expect("WEBHOOK_BASE_URL must be set");

        Self {
            api_key,
            queue_url,
            sync_url,
            webhook_base_url,
        }
    }
}
