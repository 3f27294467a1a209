//! SVG data URIs and decoding into a drawable image

use crate::error::{CoreError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use resvg::usvg;

const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Encode SVG markup as a base64 data URI
///
/// Markup is base64-encoded from its UTF-8 bytes, so non-ASCII payloads
/// survive unchanged.
pub fn to_data_uri(markup: &str) -> String {
    format!("{}{}", SVG_DATA_URI_PREFIX, STANDARD.encode(markup.as_bytes()))
}

/// Extract the SVG markup bytes from a base64 data URI
pub fn from_data_uri(uri: &str) -> Result<Vec<u8>> {
    let encoded = uri
        .strip_prefix(SVG_DATA_URI_PREFIX)
        .ok_or_else(|| CoreError::ImageDecode("not an SVG base64 data URI".to_string()))?;

    STANDARD
        .decode(encoded)
        .map_err(|e| CoreError::ImageDecode(format!("invalid base64: {}", e)))
}

/// A decoded vector image, ready to be drawn at any scale
pub struct DecodedImage {
    tree: usvg::Tree,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl DecodedImage {
    /// Decode a data URI produced by [`to_data_uri`]
    ///
    /// CPU-bound; async callers should run it on a blocking worker.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let markup = from_data_uri(uri)?;
        let tree = usvg::Tree::from_data(&markup, &usvg::Options::default())
            .map_err(|e| CoreError::ImageDecode(e.to_string()))?;
        Ok(Self { tree })
    }

    /// Intrinsic width in pixels
    pub fn width(&self) -> f32 {
        self.tree.size().width()
    }

    /// Intrinsic height in pixels
    pub fn height(&self) -> f32 {
        self.tree.size().height()
    }

    pub(crate) fn tree(&self) -> &usvg::Tree {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="#000000"/></svg>"##;

    #[test]
    fn test_data_uri_prefix() {
        let uri = to_data_uri(SQUARE);
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_data_uri_keeps_non_ascii() {
        let markup = "<svg><title>Café ☕ 日本</title></svg>";
        let bytes = from_data_uri(&to_data_uri(markup)).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), markup);
    }

    #[test]
    fn test_from_data_uri_rejects_other_schemes() {
        let err = from_data_uri("data:image/png;base64,AAAA").unwrap_err();
        assert!(matches!(err, CoreError::ImageDecode(_)));
        assert!(from_data_uri("data:image/svg+xml;base64,***").is_err());
    }

    #[test]
    fn test_decode_svg() {
        let image = DecodedImage::from_data_uri(&to_data_uri(SQUARE)).unwrap();
        assert_eq!(image.width(), 10.0);
        assert_eq!(image.height(), 10.0);
    }

    #[test]
    fn test_decode_malformed_markup() {
        let result = DecodedImage::from_data_uri(&to_data_uri("<svg><rect"));
        assert!(matches!(result, Err(CoreError::ImageDecode(_))));
    }
}
