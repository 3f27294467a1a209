//! QuickQR Core - payload encoding and raster export for QR codes
//!
//! This crate provides:
//! - Payload encoding (URL/text, WiFi descriptors)
//! - Symbol rendering to SVG (level H, optional centre logo)
//! - Platform I/O abstraction trait
//! - Raster export to fixed-size PNG
//! - Error types

pub mod error;
pub mod export;
pub mod platform;
pub mod studio;
pub mod symbol;
pub mod types;

// Re-export common types
pub use error::{CoreError, Result};
pub use export::{ExportArtifact, ExportConfig, ExportRequest, RasterExporter};
pub use platform::{MockPlatform, NativePlatform, Platform};
pub use studio::QrStudio;
pub use symbol::{
    render_symbol, render_terminal, resolve_logo, LogoFetcher, LogoOverlay, SymbolStyle,
};
pub use types::{encode, EncryptionKind, HexColor, PayloadMode};
