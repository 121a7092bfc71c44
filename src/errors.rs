use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image decode failed: {reason}")]
    Decode { reason: String },

    #[error("Image resize failed: {reason}")]
    Resize { reason: String },

    #[error("Unexpected response shape: {reason}")]
    ResponseShape { reason: String },

    #[error("Upload failed with status {status}: {body}")]
    UploadFailed { status: u16, body: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No API key configured. Set FREEIMAGE_API_KEY or add api_key to the config file.")]
    MissingApiKey,
}

/// Custom result type
pub type AppResult<T> = Result<T, AppError>;

/// Upload error helpers
impl AppError {
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    pub fn resize(reason: impl Into<String>) -> Self {
        Self::Resize {
            reason: reason.into(),
        }
    }

    pub fn response_shape(reason: impl Into<String>) -> Self {
        Self::ResponseShape {
            reason: reason.into(),
        }
    }

    pub fn upload_failed(status: u16, body: &str) -> Self {
        Self::UploadFailed {
            status,
            body: crate::snippet(body, 300).to_string(),
        }
    }

    /// True for failures of the network round trip itself, as opposed to
    /// failures decoding the payload or the service reply.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Io(_))
    }
}
