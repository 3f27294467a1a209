//! Studio: holds the user's input and keeps the rendered symbol in sync
//!
//! Every setter re-derives the payload and re-renders the symbol into the
//! platform slot. There is no memoisation: the payload is recomputed from
//! the current input on demand.

use crate::error::Result;
use crate::export::{ExportArtifact, ExportConfig, RasterExporter};
use crate::platform::Platform;
use crate::symbol::{render_symbol, LogoOverlay, SymbolStyle};
use crate::types::{HexColor, PayloadMode};
use std::sync::Arc;
use tracing::{debug, warn};

/// Input state plus the exporter for the current symbol
pub struct QrStudio<P: Platform> {
    mode: PayloadMode,
    style: SymbolStyle,
    exporter: RasterExporter<P>,
}

impl<P: Platform> QrStudio<P> {
    /// Create studio with default input (`https://`, dark slate, no logo)
    ///
    /// Nothing is rendered until [`QrStudio::refresh`] or a setter runs.
    pub fn new(platform: Arc<P>, config: ExportConfig) -> Result<Self> {
        Ok(Self {
            mode: PayloadMode::default(),
            style: SymbolStyle::default(),
            exporter: RasterExporter::new(platform, config)?,
        })
    }

    /// Replace the initial style without rendering
    ///
    /// Lets callers set colour and logo up front so the first setter renders
    /// once with everything in place.
    pub fn with_style(mut self, style: SymbolStyle) -> Self {
        self.style = style;
        self
    }

    pub fn mode(&self) -> &PayloadMode {
        &self.mode
    }

    pub fn style(&self) -> &SymbolStyle {
        &self.style
    }

    /// Current payload string
    pub fn payload(&self) -> String {
        self.mode.encode()
    }

    /// Replace the payload input
    pub async fn set_mode(&mut self, mode: PayloadMode) -> Result<()> {
        self.mode = mode;
        self.refresh().await
    }

    /// Change the symbol foreground
    pub async fn set_foreground(&mut self, color: HexColor) -> Result<()> {
        self.style.foreground = color;
        self.refresh().await
    }

    /// Show or hide the centre logo
    pub async fn set_logo(&mut self, overlay: Option<LogoOverlay>) -> Result<()> {
        self.style.overlay = overlay;
        self.refresh().await
    }

    /// Re-render the symbol for the current input
    ///
    /// On failure (payload too long) the previous symbol is cleared so a later
    /// export cannot save a stale image.
    pub async fn refresh(&self) -> Result<()> {
        let payload = self.payload();
        let platform = self.exporter.platform();

        match render_symbol(&payload, &self.style) {
            Ok(svg) => {
                debug!("Rendered {} payload ({} chars)", self.mode.label(), payload.len());
                platform.set_vector_image(Some(svg)).await;
                Ok(())
            }
            Err(e) => {
                warn!("Symbol render failed: {}", e);
                platform.set_vector_image(None).await;
                Err(e)
            }
        }
    }

    /// Export the current symbol; `Ok(None)` if nothing is rendered
    pub async fn export(&self) -> Result<Option<ExportArtifact>> {
        self.exporter.export(self.mode.label()).await
    }
}
