use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::errors::{AppError, AppResult};

/// Decode `payload`, scale it to exactly `target_width` (aspect ratio
/// preserved, height rounded), and re-encode as JPEG.
pub fn downscale_to_width(payload: &[u8], target_width: u32, quality: u8) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(payload).map_err(|e| AppError::decode(e.to_string()))?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(AppError::decode("image has zero dimensions"));
    }

    let scale = target_width as f64 / width as f64;
    let target_height = ((height as f64 * scale).round() as u32).max(1);

    log::debug!(
        "Resizing image from {}x{} to {}x{}",
        width,
        height,
        target_width,
        target_height
    );

    let resized = img.resize_exact(target_width, target_height, FilterType::Lanczos3);

    // JPEG has no alpha channel
    let rgb = image::DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut output), quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| AppError::resize(e.to_string()))?;

    Ok(output)
}

/// Downscale oversized payloads before upload. Payloads at or below
/// `threshold_bytes` pass through untouched; a decode or re-encode failure
/// falls back to the original bytes rather than blocking the upload.
pub fn prepare_payload(
    payload: Vec<u8>,
    threshold_bytes: u64,
    target_width: u32,
    quality: u8,
) -> Vec<u8> {
    if payload.len() as u64 <= threshold_bytes {
        log::debug!(
            "Payload is {} bytes (threshold {}), skipping downscale",
            payload.len(),
            threshold_bytes
        );
        return payload;
    }

    match downscale_to_width(&payload, target_width, quality) {
        Ok(resized) => {
            log::info!(
                "Downscaled payload from {} to {} bytes (width {})",
                payload.len(),
                resized.len(),
                target_width
            );
            resized
        }
        Err(e) => {
            log::warn!("Downscale failed ({}), uploading original bytes", e);
            payload
        }
    }
}
