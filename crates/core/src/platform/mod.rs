//! Platform I/O capabilities (symbol slot, image decode, file save)

mod native;
mod traits;

pub use native::NativePlatform;
pub use traits::{MockPlatform, Platform, SavedFile};
