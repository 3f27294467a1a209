//! Vector-to-bitmap export

mod config;
mod data_uri;
mod raster;

pub use config::{
    ExportConfig, DEFAULT_FILE_PREFIX, DEFAULT_MARGIN_FRACTION, DEFAULT_SIZE, MAX_MARGIN_FRACTION,
    MAX_SIZE, MIN_MARGIN_FRACTION, MIN_SIZE,
};
pub use data_uri::{from_data_uri, to_data_uri, DecodedImage};
pub use raster::{export_file_name, rasterize, ExportArtifact, ExportRequest, RasterExporter};
