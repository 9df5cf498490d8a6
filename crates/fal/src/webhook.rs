//! Webhook payloads delivered by the provider.

use serde::Deserialize;

/// Payload of the training webhook.
///
/// The provider only guarantees `request_id`; the tensor location is
/// fetched from the queue rather than trusted from the callback body.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainWebhookPayload {
    pub request_id: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl TrainWebhookPayload {
    /// Whether the provider reported the training job as failed.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("ERROR")
    }
}

/// Payload of the image webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageWebhookPayload {
    pub request_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payload: Option<ImagePayload>,
}

/// Inner payload carrying generated images.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePayload {
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// One generated image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

impl ImageWebhookPayload {
    /// Whether the provider reported the generation as failed.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("ERROR")
    }

    /// The delivered image URL, if any. Error payloads may still carry a
    /// partial image, which is recorded alongside the Failed status.
    pub fn first_image_url(&self) -> Option<&str> {
        self.payload
            .as_ref()
            .and_then(|p| p.images.first())
            .map(|image| image.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_payload_success() {
        let json = r#"{
            "request_id": "req-123",
            "status": "OK",
            "payload": { "images": [{ "url": "https://cdn.example/img.png" }] }
        }"#;
        let payload: ImageWebhookPayload = serde_json::from_str(json).unwrap();
        assert!(!payload.is_error());
        assert_eq!(
            payload.first_image_url(),
            Some("https://cdn.example/img.png")
        );
    }

    #[test]
    fn test_image_payload_error_without_images() {
        let json = r#"{ "request_id": "req-456", "status": "ERROR" }"#;
        let payload: ImageWebhookPayload = serde_json::from_str(json).unwrap();
        assert!(payload.is_error());
        assert_eq!(payload.first_image_url(), None);
    }

    #[test]
    fn test_train_payload_minimal() {
        let json = r#"{ "request_id": "req-789" }"#;
        let payload: TrainWebhookPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.request_id, "req-789");
        assert!(!payload.is_error());
    }
}
