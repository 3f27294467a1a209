//! Center logo presets

/// Named logo presets and their image URLs
pub const LOGO_PRESETS: &[(&str, &str)] = &[
    (
        "google",
        "https://www.gstatic.com/images/branding/product/2x/googleg_48dp.png",
    ),
    (
        "gcloud",
        "https://www.gstatic.com/images/branding/product/2x/cloud_48dp.png",
    ),
    (
        "drive",
        "https://www.gstatic.com/images/branding/product/2x/drive_48dp.png",
    ),
    ("synology", "https://www.synology.com/img/synology_logo_s.png"),
    (
        "search",
        "https://www.gstatic.com/images/branding/product/2x/search_48dp.png",
    ),
];

/// Resolve a logo source to an image reference
///
/// Preset names match case-insensitively; anything else is taken as a
/// URL/path and passed through trimmed. Blank input yields `None`.
pub fn resolve_logo(source: &str) -> Option<String> {
    let source = source.trim();
    if source.is_empty() {
        return None;
    }

    let resolved = LOGO_PRESETS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(source))
        .map(|(_, url)| (*url).to_string())
        .unwrap_or_else(|| source.to_string());

    Some(resolved)
}
