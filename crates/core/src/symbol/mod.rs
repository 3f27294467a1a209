//! QR symbol rendering
//!
//! Renders a payload string into self-contained SVG markup at error
//! correction level H, without a quiet zone (the exporter adds the margin).
//! An optional centre logo is drawn over an excavated area: modules under
//! the logo are left out so they cannot be misread.

mod fetch;
mod logo;

pub use fetch::{image_data_uri, LogoFetcher};
pub use logo::{resolve_logo, LOGO_PRESETS};

use crate::error::Result;
use crate::types::HexColor;
use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Intrinsic pixel size written on the SVG root
pub const SYMBOL_PIXEL_SIZE: u32 = 256;

/// Logo footprint relative to the symbol edge (48px on a 220px symbol)
pub const LOGO_FRACTION: f32 = 48.0 / 220.0;

/// Centre logo drawn over the symbol
///
/// Only data URIs and local paths are drawn at export time; run remote
/// URLs through [`LogoFetcher::inline`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoOverlay {
    /// Image reference (URL, file path or data URI)
    pub href: String,
}

impl LogoOverlay {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// Build from a preset name or URL, `None` for blank input
    pub fn from_source(source: &str) -> Option<Self> {
        resolve_logo(source).map(Self::new)
    }
}

/// Visual options for the rendered symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolStyle {
    pub foreground: HexColor,
    #[serde(default)]
    pub overlay: Option<LogoOverlay>,
}

impl Default for SymbolStyle {
    fn default() -> Self {
        Self {
            foreground: HexColor::SLATE,
            overlay: None,
        }
    }
}

impl SymbolStyle {
    pub fn with_foreground(mut self, foreground: HexColor) -> Self {
        self.foreground = foreground;
        self
    }

    pub fn with_overlay(mut self, overlay: Option<LogoOverlay>) -> Self {
        self.overlay = overlay;
        self
    }
}

/// Square region of modules hidden under the logo
#[derive(Debug, Clone, Copy, PartialEq)]
struct Excavation {
    /// Logo placement in module units
    x: f32,
    size: f32,
    /// Excavated module range (start inclusive, end exclusive)
    first: usize,
    last: usize,
}

impl Excavation {
    fn centered(width: usize) -> Self {
        let size = width as f32 * LOGO_FRACTION;
        let x = (width as f32 - size) / 2.0;
        Self {
            x,
            size,
            first: x.floor() as usize,
            last: ((x + size).ceil() as usize).min(width),
        }
    }

    fn contains(&self, x: usize, y: usize) -> bool {
        (self.first..self.last).contains(&x) && (self.first..self.last).contains(&y)
    }
}

/// Render `payload` as SVG markup
///
/// # Errors
/// - `QrGenerationError` if the payload does not fit any QR version at level H
pub fn render_symbol(payload: &str, style: &SymbolStyle) -> Result<String> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;
    let width = code.width();
    let colors = code.to_colors();
    let excavation = style.overlay.as_ref().map(|_| Excavation::centered(width));

    let mut path = String::new();
    for y in 0..width {
        for x in 0..width {
            if colors[y * width + x] != Color::Dark {
                continue;
            }
            if excavation.is_some_and(|e| e.contains(x, y)) {
                continue;
            }
            if !path.is_empty() {
                path.push(' ');
            }
            let _ = write!(path, "M{},{}h1v1h-1z", x, y);
        }
    }

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{px}" height="{px}" viewBox="0 0 {w} {w}" shape-rendering="crispEdges">"#,
        px = SYMBOL_PIXEL_SIZE,
        w = width
    );
    let _ = writeln!(svg, r#"<rect width="{w}" height="{w}" fill="{}"/>"#, HexColor::WHITE, w = width);
    let _ = writeln!(svg, r#"<path fill="{}" d="{}"/>"#, style.foreground, path);

    if let (Some(overlay), Some(area)) = (&style.overlay, excavation) {
        let _ = writeln!(
            svg,
            r#"<image href="{}" x="{x}" y="{x}" width="{s}" height="{s}" preserveAspectRatio="none"/>"#,
            escape_attr(&overlay.href),
            x = area.x,
            s = area.size
        );
    }
    svg.push_str("</svg>\n");

    Ok(svg)
}

/// Render `payload` as Unicode block art for terminal display
///
/// Uses the Dense1x2 renderer with inverted colours so dark modules show as
/// light characters on a dark terminal. Includes the quiet zone.
pub fn render_terminal(payload: &str) -> Result<String> {
    use qrcode::render::unicode;

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;

    let image = code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build();

    Ok(image)
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
