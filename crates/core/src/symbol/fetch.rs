//! Logo inlining
//!
//! SVG decoding never touches the network, so logo images are embedded as
//! base64 data URIs before the symbol is rendered.

use crate::error::{CoreError, Result};
use crate::symbol::LogoOverlay;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const FETCH_TIMEOUT_SECS: u64 = 15;

/// Build a `data:<mime>;base64,...` URI
pub fn image_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Guess an image MIME type from a path or URL extension (PNG if unknown)
fn mime_from_path(path: &str) -> &'static str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let ext = path.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "image/png",
    }
}

/// Resolves logo references into self-contained data URIs
pub struct LogoFetcher {
    client: Client,
}

impl LogoFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Return `overlay` with its image embedded
    ///
    /// Data URIs pass through, `http(s)` URLs are downloaded, anything else
    /// is read as a local file.
    ///
    /// # Errors
    /// - `LogoFetch` on network failure or a non-success HTTP status
    /// - `Io` if a local file cannot be read
    pub async fn inline(&self, overlay: LogoOverlay) -> Result<LogoOverlay> {
        let href = overlay.href.trim();

        if href.starts_with("data:") {
            return Ok(overlay);
        }

        let data_uri = if href.starts_with("http://") || href.starts_with("https://") {
            self.fetch_remote(href).await?
        } else {
            let bytes = tokio::fs::read(href).await?;
            image_data_uri(mime_from_path(href), &bytes)
        };

        Ok(LogoOverlay::new(data_uri))
    }

    async fn fetch_remote(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::LogoFetch(format!("{} returned {}", url, status)));
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_string())
            .filter(|value| value.starts_with("image/"))
            .unwrap_or_else(|| mime_from_path(url).to_string());

        let bytes = response.bytes().await?;
        debug!("Fetched logo {} ({} bytes, {})", url, bytes.len(), mime);

        Ok(image_data_uri(&mime, &bytes))
    }
}
