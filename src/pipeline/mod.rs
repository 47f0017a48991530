//! Pipeline
//!
//! Connects the form state to the terminal.
//!
//! ```text
//! input event → controller (state update) → layout → view (Frame) → diff renderer
//! ```
//!
//! - **controller** - applies events to the form, focus, carets and scroll
//! - **view** - pure render pass from state to a [`view::Frame`]
//! - **terminal** - raw mode / alternate screen guard
//! - **mount** - the event loop and the confirmation modal

pub mod controller;
pub mod mount;
pub mod terminal;
pub mod view;

pub use controller::{Flow, FormController};
pub use mount::{TerminalSink, run};
pub use terminal::Terminal;
pub use view::{Frame, HitRegion, ViewContext};
