//! Platform I/O abstraction trait

use crate::error::{CoreError, Result};
use crate::export::DecodedImage;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Platform capabilities the exporter depends on
///
/// The symbol renderer mounts its SVG output through [`Platform::set_vector_image`];
/// the exporter reads it back, decodes it, and hands the PNG bytes to
/// [`Platform::save_bytes_as_file`].
#[async_trait]
pub trait Platform: Send + Sync {
    /// Replace (or clear) the currently rendered symbol
    async fn set_vector_image(&self, markup: Option<String>);

    /// Serialize the currently rendered symbol to SVG markup
    ///
    /// Returns `None` if no symbol has been rendered yet.
    async fn serialize_vector_image(&self) -> Option<String>;

    /// Decode an SVG data URI into a drawable image
    async fn decode_image(&self, data_uri: &str) -> Result<DecodedImage>;

    /// Persist exported bytes under `file_name`, returning where they went
    async fn save_bytes_as_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf>;
}

/// File captured by [`MockPlatform`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Mock platform for testing
///
/// Keeps the symbol and saved files in memory. Decoding is real unless
/// [`MockPlatform::fail_decode`] is set.
#[derive(Default)]
pub struct MockPlatform {
    symbol: Mutex<Option<String>>,
    saved: Mutex<Vec<SavedFile>>,
    fail_decode: bool,
}

impl MockPlatform {
    /// Create mock with no rendered symbol
    pub fn new() -> Self {
        Self::default()
    }

    /// Create mock with a pre-rendered symbol
    pub fn with_symbol(markup: impl Into<String>) -> Self {
        Self {
            symbol: Mutex::new(Some(markup.into())),
            ..Default::default()
        }
    }

    /// Make every decode fail
    pub fn fail_decode(mut self) -> Self {
        self.fail_decode = true;
        self
    }

    /// Files saved so far
    pub async fn saved(&self) -> Vec<SavedFile> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn set_vector_image(&self, markup: Option<String>) {
        *self.symbol.lock().await = markup;
    }

    async fn serialize_vector_image(&self) -> Option<String> {
        self.symbol.lock().await.clone()
    }

    async fn decode_image(&self, data_uri: &str) -> Result<DecodedImage> {
        if self.fail_decode {
            return Err(CoreError::ImageDecode("mock decode failure".into()));
        }
        DecodedImage::from_data_uri(data_uri)
    }

    async fn save_bytes_as_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf> {
        self.saved.lock().await.push(SavedFile {
            name: file_name.to_string(),
            bytes,
        });
        Ok(PathBuf::from(file_name))
    }
}
