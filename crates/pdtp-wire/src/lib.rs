#![warn(clippy::pedantic)]

pub mod error;
pub mod frame;
pub mod stream_buffer;

pub use error::WireError;
pub use frame::{FRAME_HEADER_SIZE, Frame, FrameHeader, record_type};
pub use stream_buffer::StreamBuffer;
