use serde::Deserialize;

use crate::errors::{AppError, AppResult};

/// Top-level JSON reply from the hosting service.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub status_txt: Option<String>,
    pub image: Option<HostedImage>,
}

/// The `image` object of a successful reply. Only `url_viewer` is required;
/// the service returns more fields than the client consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct HostedImage {
    pub url_viewer: Option<String>,
    pub url: Option<String>,
    pub display_url: Option<String>,
}

/// Typed result of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Human-facing viewer page for the uploaded image.
    pub viewer_url: String,
    /// Direct link to the image file, when the service returns one.
    pub direct_url: Option<String>,
    pub display_url: Option<String>,
}

pub fn parse_upload_response(body: &str) -> AppResult<UploadedImage> {
    let parsed: UploadResponse = serde_json::from_str(body)
        .map_err(|e| AppError::response_shape(format!("response is not valid JSON: {}", e)))?;

    if let Some(status_txt) = &parsed.status_txt {
        log::debug!(
            "Service status: {} ({})",
            status_txt,
            parsed.status_code.unwrap_or_default()
        );
    }

    let image = parsed
        .image
        .ok_or_else(|| AppError::response_shape("response has no image object"))?;

    let viewer_url = image
        .url_viewer
        .ok_or_else(|| AppError::response_shape("image object has no url_viewer field"))?;

    Ok(UploadedImage {
        viewer_url,
        direct_url: image.url,
        display_url: image.display_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let body = r#"{"image":{"url_viewer":"https://x/y.jpg"}}"#;

        let uploaded = parse_upload_response(body).unwrap();
        assert_eq!(uploaded.viewer_url, "https://x/y.jpg");
        assert_eq!(uploaded.direct_url, None);
    }

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "status_code": 200,
            "status_txt": "OK",
            "image": {
                "url_viewer": "https://freeimage.host/i/abc",
                "url": "https://iili.io/abc.jpg",
                "display_url": "https://iili.io/abc.md.jpg"
            }
        }"#;

        let uploaded = parse_upload_response(body).unwrap();
        assert_eq!(uploaded.viewer_url, "https://freeimage.host/i/abc");
        assert_eq!(uploaded.direct_url.as_deref(), Some("https://iili.io/abc.jpg"));
        assert_eq!(
            uploaded.display_url.as_deref(),
            Some("https://iili.io/abc.md.jpg")
        );
    }

    #[test]
    fn test_parse_rejects_non_json() {
        match parse_upload_response("<html>oops</html>") {
            Err(AppError::ResponseShape { .. }) => {}
            other => panic!("expected ResponseShape error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_missing_image_object() {
        match parse_upload_response(r#"{"status_code": 200}"#) {
            Err(AppError::ResponseShape { .. }) => {}
            other => panic!("expected ResponseShape error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_missing_url_viewer() {
        match parse_upload_response(r#"{"image":{"url":"https://iili.io/abc.jpg"}}"#) {
            Err(AppError::ResponseShape { .. }) => {}
            other => panic!("expected ResponseShape error, got {:?}", other),
        }
    }
}
