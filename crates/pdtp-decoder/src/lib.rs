#![warn(clippy::pedantic)]

pub mod error;
pub mod inflate;
pub mod raster;
pub mod stream;

pub use error::DecodeError;
pub use inflate::InflateError;
pub use raster::RasterError;
pub use stream::{DecodeOptions, RecordStream};
