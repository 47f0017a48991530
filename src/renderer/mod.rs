//! Renderer Module
//!
//! - [`buffer`] - `FrameBuffer` and drawing primitives
//! - [`output`] - batched output and the stateful cell renderer
//! - [`diff`] - fullscreen differential rendering

pub mod buffer;
pub mod diff;
pub mod output;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};
