//! Error types for quickqr-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid export config: {0}")]
    InvalidConfig(String),

    #[error("QR code generation error: {0}")]
    QrGenerationError(String),

    #[error("Logo fetch failed: {0}")]
    LogoFetch(String),

    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    #[error("Cannot allocate {size}x{size} raster surface")]
    SurfaceAllocation { size: u32 },

    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CoreError>;

impl From<qrcode::types::QrError> for CoreError {
    fn from(err: qrcode::types::QrError) -> Self {
        CoreError::QrGenerationError(err.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::LogoFetch(err.to_string())
    }
}

impl From<tokio::task::JoinError> for CoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        CoreError::Task(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidColor("#12".to_string());
        assert_eq!(err.to_string(), "Invalid color: #12");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
    }

    #[test]
    fn test_surface_allocation_error() {
        let err = CoreError::SurfaceAllocation { size: 2048 };
        assert_eq!(err.to_string(), "Cannot allocate 2048x2048 raster surface");
    }

    #[test]
    fn test_qr_error_conversion() {
        let err: CoreError = qrcode::types::QrError::DataTooLong.into();
        assert!(matches!(err, CoreError::QrGenerationError(_)));
    }
}
