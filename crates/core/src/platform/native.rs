//! Native platform: in-memory symbol slot, files written to a directory

use crate::error::{CoreError, Result};
use crate::export::DecodedImage;
use crate::platform::Platform;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Suffixed names tried before giving up on a taken file name
const MAX_NAME_ATTEMPTS: usize = 1000;

/// `name.png` for attempt 0, `name_<n>.png` afterwards
fn candidate_name(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rfind('.') {
        Some(dot) => format!("{}_{}{}", &file_name[..dot], attempt, &file_name[dot..]),
        None => format!("{}_{}", file_name, attempt),
    }
}

/// Platform backed by the local filesystem
pub struct NativePlatform {
    out_dir: PathBuf,
    symbol: Mutex<Option<String>>,
}

impl NativePlatform {
    /// Create platform saving into `out_dir`
    ///
    /// The directory is created lazily on first save.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            symbol: Mutex::new(None),
        }
    }

    /// Output directory
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[async_trait]
impl Platform for NativePlatform {
    async fn set_vector_image(&self, markup: Option<String>) {
        *self.symbol.lock().await = markup;
    }

    async fn serialize_vector_image(&self) -> Option<String> {
        self.symbol.lock().await.clone()
    }

    async fn decode_image(&self, data_uri: &str) -> Result<DecodedImage> {
        let uri = data_uri.to_string();
        // SVG parsing is CPU-bound, keep it off the async workers
        tokio::task::spawn_blocking(move || DecodedImage::from_data_uri(&uri)).await?
    }

    async fn save_bytes_as_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.out_dir).await?;

        // Never overwrite: a taken name gets a numeric suffix
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.out_dir.join(candidate_name(file_name, attempt));
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            file.write_all(&bytes).await?;
            file.flush().await?;
            debug!("Wrote {} bytes to {}", bytes.len(), path.display());
            return Ok(path);
        }

        Err(CoreError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free file name for {} in {}", file_name, self.out_dir.display()),
        )))
    }
}
