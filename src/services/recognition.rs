//! Floor-plan recognition service — edge pipeline plus remote OCR.
//!
//! DESIGN
//! ======
//! The edge-detection pipeline runs in-process (see the `canvas` crate); text
//! extraction is delegated to an external OCR service over HTTP. The OCR
//! client is optional — when `OCR_SERVICE_URL` is unset the recognize
//! endpoint still returns processed line work, just without measurements.

use std::time::Duration;

use canvas::plan::Measurement;
use canvas::recognition::{self, FitTransform, OcrWord};
use image::DynamicImage;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_OCR_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OCR_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image encode failed: {0}")]
    Encode(image::ImageError),
    #[error("OCR request failed: {0}")]
    Ocr(#[from] reqwest::Error),
}

/// Typed OCR client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl OcrConfig {
    /// Build config from environment variables. `None` when the service is
    /// not configured; startup treats that as OCR disabled, not an error.
    ///
    /// - `OCR_SERVICE_URL` (required)
    /// - `OCR_REQUEST_TIMEOUT_SECS`: default 30
    /// - `OCR_CONNECT_TIMEOUT_SECS`: default 5
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("OCR_SERVICE_URL").ok()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return None;
        }
        Some(Self {
            base_url,
            request_timeout_secs: env_parse_u64("OCR_REQUEST_TIMEOUT_SECS", DEFAULT_OCR_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: env_parse_u64("OCR_CONNECT_TIMEOUT_SECS", DEFAULT_OCR_CONNECT_TIMEOUT_SECS),
        })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    #[serde(default)]
    words: Vec<OcrWord>,
}

/// HTTP client for the external OCR service.
pub struct OcrClient {
    http: reqwest::Client,
    base_url: String,
}

impl OcrClient {
    /// Build a client from config.
    ///
    /// # Errors
    ///
    /// Returns a reqwest error if the underlying client cannot be built.
    pub fn new(config: &OcrConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    /// Send PNG bytes to the OCR service and return recognised words.
    ///
    /// # Errors
    ///
    /// Returns a reqwest error on transport or status failure.
    pub async fn recognize_words(&self, png_bytes: Vec<u8>) -> Result<Vec<OcrWord>, reqwest::Error> {
        let response = self
            .http
            .post(format!("{}/ocr", self.base_url))
            .header(reqwest::header::CONTENT_TYPE, "image/png")
            .body(png_bytes)
            .send()
            .await?
            .error_for_status()?;
        let parsed: OcrResponse = response.json().await?;
        Ok(parsed.words)
    }
}

/// Output of a full recognize pass.
pub struct RecognizeOutput {
    /// Processed line work, PNG-encoded.
    pub png: Vec<u8>,
    /// Measurement labels found by OCR, in canvas coordinates.
    pub measurements: Vec<Measurement>,
}

/// Run the full recognition pass: edge pipeline, PNG encode, optional OCR.
///
/// OCR failure is non-fatal; the processed image is still returned and the
/// failure is logged.
///
/// # Errors
///
/// Returns an error if the filename is unsupported, or the image cannot be
/// decoded or re-encoded.
pub async fn recognize(
    ocr: Option<&OcrClient>,
    filename: &str,
    bytes: &[u8],
    canvas_width: f64,
    canvas_height: f64,
) -> Result<RecognizeOutput, RecognizeError> {
    if !recognition::supported_image(filename) {
        return Err(RecognizeError::UnsupportedFile(filename.to_string()));
    }

    let source = image::load_from_memory(bytes)?;
    let (width, height) = (source.width(), source.height());
    let processed = recognition::process_with_fallback(&source);
    let png = encode_png(&DynamicImage::ImageLuma8(processed))?;

    let fit = FitTransform::fit(f64::from(width), f64::from(height), canvas_width, canvas_height);
    let measurements = match ocr {
        Some(client) => {
            // OCR reads the uploaded plan itself; the inverted line work
            // carries no legible measurement text.
            let source_png = encode_png(&source)?;
            match client.recognize_words(source_png).await {
                Ok(words) => recognition::extract_measurements(&words, &fit),
                Err(e) => {
                    warn!(error = %e, "OCR request failed; returning line work only");
                    Vec::new()
                }
            }
        }
        None => Vec::new(),
    };

    Ok(RecognizeOutput { png, measurements })
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, RecognizeError> {
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).map_err(RecognizeError::Encode)?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "recognition_test.rs"]
mod tests;
