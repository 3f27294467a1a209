//! Domain types for payload input

mod color;
mod payload;

pub use color::HexColor;
pub use payload::{encode, EncryptionKind, PayloadMode, URL_PLACEHOLDER};
