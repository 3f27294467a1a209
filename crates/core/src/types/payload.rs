//! Payload encoding for QR symbols
//!
//! A [`PayloadMode`] is the structured user input; [`PayloadMode::encode`]
//! derives the canonical string that is handed to the symbol renderer.
//!
//! The derivation is cheap and pure, so callers simply re-run it whenever the
//! input changes instead of caching the result.
//!
//! ## WiFi wire format
//!
//! `WIFI:S:<ssid>;T:<WPA|WEP|nopass>;P:<password>;H:<true|false>;;`
//!
//! Field order is fixed. Field values are emitted verbatim: reserved
//! characters (`;` `,` `\` `"`) are NOT escaped.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder emitted when the URL/text input is blank
pub const URL_PLACEHOLDER: &str = "https://";

/// WiFi network encryption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EncryptionKind {
    #[default]
    #[serde(rename = "WPA", alias = "wpa")]
    Wpa,
    #[serde(rename = "WEP", alias = "wep")]
    Wep,
    #[serde(rename = "nopass", alias = "open", alias = "Open")]
    Open,
}

impl EncryptionKind {
    /// Token written after `T:` in the WiFi payload
    pub fn token(&self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::Open => "nopass",
        }
    }
}

impl fmt::Display for EncryptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Structured input for a QR payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PayloadMode {
    /// Plain URL or free text
    Url { text: String },

    /// WiFi network descriptor
    Wifi {
        ssid: String,
        #[serde(default)]
        password: String,
        #[serde(default)]
        encryption: EncryptionKind,
        #[serde(default)]
        hidden: bool,
    },
}

impl Default for PayloadMode {
    fn default() -> Self {
        Self::Url {
            text: URL_PLACEHOLDER.to_string(),
        }
    }
}

impl PayloadMode {
    /// Create URL/text input
    pub fn url(text: impl Into<String>) -> Self {
        Self::Url { text: text.into() }
    }

    /// Create WiFi input
    pub fn wifi(
        ssid: impl Into<String>,
        password: impl Into<String>,
        encryption: EncryptionKind,
        hidden: bool,
    ) -> Self {
        Self::Wifi {
            ssid: ssid.into(),
            password: password.into(),
            encryption,
            hidden,
        }
    }

    /// Short upper-case label used in exported file names
    pub fn label(&self) -> &'static str {
        match self {
            Self::Url { .. } => "URL",
            Self::Wifi { .. } => "WIFI",
        }
    }

    /// Derive the canonical payload string
    ///
    /// Total: every input yields a non-empty string.
    ///
    /// # Example
    /// ```
    /// # use quickqr_core::{EncryptionKind, PayloadMode};
    /// let mode = PayloadMode::wifi("Home", "secret", EncryptionKind::Wpa, false);
    /// assert_eq!(mode.encode(), "WIFI:S:Home;T:WPA;P:secret;H:false;;");
    /// ```
    pub fn encode(&self) -> String {
        match self {
            Self::Url { text } => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    URL_PLACEHOLDER.to_string()
                } else {
                    trimmed.to_string()
                }
            }
            Self::Wifi {
                ssid,
                password,
                encryption,
                hidden,
            } => format!(
                "WIFI:S:{};T:{};P:{};H:{};;",
                ssid,
                encryption.token(),
                password,
                hidden
            ),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Free-function form of [`PayloadMode::encode`]
pub fn encode(mode: &PayloadMode) -> String {
    mode.encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_url_falls_back() {
        assert_eq!(PayloadMode::url("").encode(), "https://");
        assert_eq!(PayloadMode::url("   \t\n").encode(), "https://");
    }

    #[test]
    fn test_url_is_trimmed() {
        assert_eq!(
            PayloadMode::url("  https://example.com  ").encode(),
            "https://example.com"
        );
    }

    #[test]
    fn test_url_passes_through_verbatim() {
        let text = "WIFI:S:x;\"quoted\"\\,é";
        assert_eq!(PayloadMode::url(text).encode(), text);
    }

    #[test]
    fn test_wifi_canonical_form() {
        let mode = PayloadMode::wifi("Home", "secret", EncryptionKind::Wpa, false);
        assert_eq!(mode.encode(), "WIFI:S:Home;T:WPA;P:secret;H:false;;");
    }

    #[test]
    fn test_wifi_hidden_wep() {
        let mode = PayloadMode::wifi("Lab", "abc", EncryptionKind::Wep, true);
        assert_eq!(mode.encode(), "WIFI:S:Lab;T:WEP;P:abc;H:true;;");
    }

    #[test]
    fn test_wifi_open_uses_nopass() {
        let mode = PayloadMode::wifi("Cafe", "", EncryptionKind::Open, false);
        let payload = mode.encode();
        assert_eq!(payload, "WIFI:S:Cafe;T:nopass;P:;H:false;;");
        assert!(!payload.contains("Open"));
    }

    #[test]
    fn test_wifi_fields_not_escaped() {
        let mode = PayloadMode::wifi("a;b,c", "p\\\"q", EncryptionKind::Wpa, false);
        assert_eq!(mode.encode(), "WIFI:S:a;b,c;T:WPA;P:p\\\"q;H:false;;");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let inputs = [
            PayloadMode::url(" x "),
            PayloadMode::url(""),
            PayloadMode::wifi("Home", "secret", EncryptionKind::Open, true),
        ];
        for input in &inputs {
            assert_eq!(encode(input), encode(&input.clone()));
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(PayloadMode::default().label(), "URL");
        assert_eq!(
            PayloadMode::wifi("a", "b", EncryptionKind::Wpa, false).label(),
            "WIFI"
        );
    }

    #[test]
    fn test_payload_mode_json_roundtrip() {
        let original = PayloadMode::wifi("Home", "secret", EncryptionKind::Open, true);
        let json = original.to_json().unwrap();
        assert!(json.contains("\"type\":\"wifi\""));
        assert!(json.contains("\"encryption\":\"nopass\""));
        assert_eq!(PayloadMode::from_json(&json).unwrap(), original);
    }

    #[test]
    fn test_payload_mode_json_defaults() {
        let mode = PayloadMode::from_json(r#"{"type":"wifi","ssid":"Home"}"#).unwrap();
        assert_eq!(mode.encode(), "WIFI:S:Home;T:WPA;P:;H:false;;");
    }

    #[test]
    fn test_payload_mode_invalid_json() {
        assert!(PayloadMode::from_json("{}").is_err());
        assert!(PayloadMode::from_json("invalid json").is_err());
    }
}
