//! Raster exporter
//!
//! Turns the currently rendered vector symbol into a square PNG:
//!
//! 1. serialize the symbol and wrap it in a base64 data URI
//! 2. decode the URI (the only suspension point)
//! 3. fill a `size x size` surface with the opaque background
//! 4. draw the symbol into the inner square `[margin, size - margin]`
//! 5. encode PNG and hand it to the platform under
//!    `<prefix>_<MODE>_<unix-millis>.png`
//!
//! Every call owns its own surface, so overlapping exports are independent.

use crate::error::{CoreError, Result};
use crate::export::{to_data_uri, DecodedImage, ExportConfig};
use crate::platform::Platform;
use crate::types::HexColor;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// One export, built when the user triggers it and dropped once saved
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Serialized SVG markup of the rendered symbol
    pub vector_image: String,
    pub background: HexColor,
    pub canvas_size: u32,
    pub margin_fraction: f32,
}

impl ExportRequest {
    pub fn new(vector_image: String, config: &ExportConfig) -> Self {
        Self {
            vector_image,
            background: config.background,
            canvas_size: config.size,
            margin_fraction: config.margin_fraction,
        }
    }

    /// Margin in pixels
    pub fn margin(&self) -> f32 {
        self.canvas_size as f32 * self.margin_fraction
    }
}

/// Result of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    /// Where the platform stored the file
    pub location: PathBuf,
    /// Edge length in pixels
    pub size: u32,
    /// Encoded PNG length
    pub byte_len: usize,
}

/// Build `<prefix>_<mode>_<unix-millis>.png`
pub fn export_file_name(prefix: &str, mode: &str, unix_millis: i64) -> String {
    format!("{}_{}_{}.png", prefix, mode, unix_millis)
}

/// Draw a decoded image onto a fresh opaque surface and encode it as PNG
pub fn rasterize(image: &DecodedImage, request: &ExportRequest) -> Result<Vec<u8>> {
    let size = request.canvas_size;
    let mut pixmap = Pixmap::new(size, size).ok_or(CoreError::SurfaceAllocation { size })?;

    let bg = request.background;
    pixmap.fill(Color::from_rgba8(bg.r, bg.g, bg.b, 255));

    let margin = request.margin();
    let inner = size as f32 - 2.0 * margin;
    let transform = Transform::from_row(
        inner / image.width(),
        0.0,
        0.0,
        inner / image.height(),
        margin,
        margin,
    );
    resvg::render(image.tree(), transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| CoreError::PngEncode(e.to_string()))
}

/// Exports the platform's current symbol as PNG
pub struct RasterExporter<P: Platform> {
    platform: Arc<P>,
    config: ExportConfig,
}

impl<P: Platform> RasterExporter<P> {
    /// Create exporter
    ///
    /// # Errors
    /// - `InvalidConfig` if the config fails [`ExportConfig::validate`]
    pub fn new(platform: Arc<P>, config: ExportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { platform, config })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn platform(&self) -> &Arc<P> {
        &self.platform
    }

    /// Export the current symbol
    ///
    /// Returns `Ok(None)` without saving anything when no symbol has been
    /// rendered yet. Decode failures are returned as `ImageDecode` and nothing
    /// is saved.
    pub async fn export(&self, mode_label: &str) -> Result<Option<ExportArtifact>> {
        let Some(markup) = self.platform.serialize_vector_image().await else {
            debug!("Export skipped: no symbol rendered");
            return Ok(None);
        };

        let request = ExportRequest::new(markup, &self.config);
        let data_uri = to_data_uri(&request.vector_image);

        let image = self.platform.decode_image(&data_uri).await?;
        debug!(
            "Decoded symbol {}x{}, drawing at {}px with {:.1}px margin",
            image.width(),
            image.height(),
            request.canvas_size,
            request.margin()
        );

        let size = request.canvas_size;
        let png = tokio::task::spawn_blocking(move || rasterize(&image, &request)).await??;

        let file_name = export_file_name(
            &self.config.file_prefix,
            mode_label,
            chrono::Utc::now().timestamp_millis(),
        );
        let byte_len = png.len();
        let location = self.platform.save_bytes_as_file(&file_name, png).await?;
        // the platform may have renamed the file to avoid a collision
        let file_name = location
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(file_name);
        info!("Exported {} ({} bytes)", location.display(), byte_len);

        Ok(Some(ExportArtifact {
            file_name,
            location,
            size,
            byte_len,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatform;

    /// 10x10 black square with a red top-right quadrant
    const STUB: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="#000000"/><rect x="5" y="0" width="5" height="5" fill="#ff0000"/></svg>"##;

    fn rgb(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8) {
        let p = pixmap.pixel(x, y).unwrap();
        (p.red(), p.green(), p.blue())
    }

    fn small_config() -> ExportConfig {
        ExportConfig::default().with_size(200).with_margin_fraction(0.10)
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("QR", "WIFI", 1_700_000_000_123),
            "QR_WIFI_1700000000123.png"
        );
    }

    #[test]
    fn test_request_from_config() {
        let request = ExportRequest::new("<svg/>".into(), &small_config());
        assert_eq!(request.canvas_size, 200);
        assert_eq!(request.background, HexColor::WHITE);
        assert!((request.margin() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_rasterize_layout() {
        let image = DecodedImage::from_data_uri(&to_data_uri(STUB)).unwrap();
        let request = ExportRequest::new(STUB.to_string(), &small_config());
        let png = rasterize(&image, &request).unwrap();
        let pixmap = Pixmap::decode_png(&png).unwrap();

        assert_eq!((pixmap.width(), pixmap.height()), (200, 200));

        // margin band is background on all four sides
        for (x, y) in [(0, 0), (199, 0), (0, 199), (199, 199), (18, 100), (100, 18), (181, 100), (100, 181)] {
            assert_eq!(rgb(&pixmap, x, y), (255, 255, 255), "({x},{y})");
        }

        // stub scaled by 16 into [20, 180]
        assert_eq!(rgb(&pixmap, 21, 21), (0, 0, 0));
        assert_eq!(rgb(&pixmap, 60, 140), (0, 0, 0));
        assert_eq!(rgb(&pixmap, 178, 178), (0, 0, 0));
        assert_eq!(rgb(&pixmap, 140, 60), (255, 0, 0));
    }

    #[test]
    fn test_rasterize_opaque_background() {
        let transparent = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect x="4" y="4" width="2" height="2" fill="#000"/></svg>"##;
        let image = DecodedImage::from_data_uri(&to_data_uri(transparent)).unwrap();
        let request = ExportRequest::new(transparent.to_string(), &small_config());
        let pixmap = Pixmap::decode_png(&rasterize(&image, &request).unwrap()).unwrap();

        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 255));
        assert_eq!(rgb(&pixmap, 40, 40), (255, 255, 255));
    }

    #[tokio::test]
    async fn test_export_default_size() {
        let platform = Arc::new(MockPlatform::with_symbol(STUB));
        let exporter = RasterExporter::new(platform.clone(), ExportConfig::default()).unwrap();

        let artifact = exporter.export("URL").await.unwrap().unwrap();
        assert_eq!(artifact.size, 2048);
        assert!(artifact.file_name.starts_with("QR_URL_"));
        assert!(artifact.file_name.ends_with(".png"));

        let saved = platform.saved().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, artifact.file_name);
        assert_eq!(saved[0].bytes.len(), artifact.byte_len);

        let pixmap = Pixmap::decode_png(&saved[0].bytes).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (2048, 2048));
        assert_eq!(rgb(&pixmap, 100, 100), (255, 255, 255));
        assert_eq!(rgb(&pixmap, 600, 1400), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_export_without_symbol_is_noop() {
        let platform = Arc::new(MockPlatform::new());
        let exporter = RasterExporter::new(platform.clone(), small_config()).unwrap();

        let result = exporter.export("URL").await.unwrap();
        assert!(result.is_none());
        assert!(platform.saved().await.is_empty());
    }

    #[tokio::test]
    async fn test_export_decode_failure_surfaces() {
        let platform = Arc::new(MockPlatform::with_symbol(STUB).fail_decode());
        let exporter = RasterExporter::new(platform.clone(), small_config()).unwrap();

        let result = exporter.export("URL").await;
        assert!(matches!(result, Err(CoreError::ImageDecode(_))));
        assert!(platform.saved().await.is_empty());
    }

    #[tokio::test]
    async fn test_export_malformed_symbol() {
        let platform = Arc::new(MockPlatform::with_symbol("<svg><g"));
        let exporter = RasterExporter::new(platform.clone(), small_config()).unwrap();

        assert!(exporter.export("WIFI").await.is_err());
        assert!(platform.saved().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_exports_are_independent() {
        let platform = Arc::new(MockPlatform::with_symbol(STUB));
        let exporter = RasterExporter::new(platform.clone(), small_config()).unwrap();

        let (a, b, c, d) = tokio::join!(
            exporter.export("URL"),
            exporter.export("WIFI"),
            exporter.export("URL"),
            exporter.export("WIFI"),
        );
        for artifact in [a, b, c, d] {
            assert_eq!(artifact.unwrap().unwrap().size, 200);
        }

        let saved = platform.saved().await;
        assert_eq!(saved.len(), 4);
        for file in &saved {
            let pixmap = Pixmap::decode_png(&file.bytes).unwrap();
            assert_eq!((pixmap.width(), pixmap.height()), (200, 200));
            assert_eq!(rgb(&pixmap, 0, 0), (255, 255, 255));
            assert_eq!(rgb(&pixmap, 140, 60), (255, 0, 0));
        }
    }

    #[test]
    fn test_exporter_rejects_invalid_config() {
        let platform = Arc::new(MockPlatform::new());
        let result = RasterExporter::new(platform, ExportConfig::default().with_size(1));
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }
}
