use reqwest::{multipart, Client};
use std::time::Duration;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::{image_processor, security, snippet};

use super::response::{parse_upload_response, UploadedImage};

const ACTION_VALUE: &str = "upload";
const SOURCE_FILENAME: &str = "image.jpg";
const SOURCE_MIME: &str = "image/jpeg";

/// Client for the image hosting API. One `upload` call is one POST; there is
/// no retry and no shared state beyond the pooled HTTP connections, so the
/// client is cheap to clone a reference to and safe to share across tasks.
/// Dropping the future returned by `upload` aborts the in-flight request.
pub struct HostClient {
    client: Client,
    config: Config,
    api_key: String,
}

impl HostClient {
    pub fn new(config: Config, api_key: String) -> AppResult<Self> {
        security::InputValidator::validate_api_key(&api_key)?;
        security::InputValidator::validate_endpoint(&config.endpoint)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Upload one image payload and return the hosted URLs.
    ///
    /// Payloads above the configured threshold are downscaled first; if that
    /// fails the original bytes are sent unchanged. The `source` part is
    /// always attached regardless of payload size.
    pub async fn upload(&self, payload: Vec<u8>) -> AppResult<UploadedImage> {
        security::InputValidator::validate_payload(&payload)?;

        let request_id = uuid::Uuid::new_v4();
        log::info!(
            "[{}] Uploading payload of {} bytes to {}",
            request_id,
            payload.len(),
            self.config.endpoint
        );

        let body = image_processor::prepare_payload(
            payload,
            self.config.resize_threshold_bytes,
            self.config.target_width,
            self.config.jpeg_quality,
        );

        let form = self.build_form(body)?;
        let response = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        log::debug!(
            "[{}] Service response (first 300 chars): {}",
            request_id,
            snippet(&response_text, 300)
        );

        if !status.is_success() {
            log::error!(
                "[{}] Upload rejected with status {}",
                request_id,
                status
            );
            return Err(AppError::upload_failed(status.as_u16(), &response_text));
        }

        let uploaded = parse_upload_response(&response_text)?;
        log::info!("[{}] Upload complete: {}", request_id, uploaded.viewer_url);

        Ok(uploaded)
    }

    /// Field order matters to some multipart consumers: key, action, source.
    fn build_form(&self, image_bytes: Vec<u8>) -> AppResult<multipart::Form> {
        let part = multipart::Part::bytes(image_bytes)
            .file_name(SOURCE_FILENAME)
            .mime_str(SOURCE_MIME)?;

        Ok(multipart::Form::new()
            .text("key", self.api_key.clone())
            .text("action", ACTION_VALUE)
            .part("source", part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    #[test]
    fn test_new_rejects_invalid_api_key() {
        let result = HostClient::new(test_config(), "nope".to_string());
        match result {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "api_key"),
            other => panic!("expected Validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let config = Config {
            endpoint: "not a url".to_string(),
            ..Config::default()
        };
        let result = HostClient::new(config, "6d207e02198a847aa98d0a2a901485a5".to_string());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_payload() {
        let client =
            HostClient::new(test_config(), "6d207e02198a847aa98d0a2a901485a5".to_string()).unwrap();

        match client.upload(Vec::new()).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "payload"),
            other => panic!("expected Validation error, got {:?}", other.map(|_| ())),
        }
    }
}
