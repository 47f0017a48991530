//! State Module - Input and interaction state
//!
//! - **Keyboard** - Key event types, browser-style key names
//! - **Mouse** - Click and wheel events
//! - **Input** - crossterm event conversion and polling
//! - **Focus** - Tab order derived from the form, wrap-around navigation
//! - **Text edit** - Caret movement and single-line edits

pub mod focus;
pub mod input;
pub mod keyboard;
pub mod mouse;
pub mod text_edit;

pub use focus::{FocusState, FocusTarget, RowControl, focus_order};
pub use input::{InputEvent, poll_event, read_event};
pub use keyboard::{KeyState, KeyboardEvent, Modifiers};
pub use mouse::{MouseAction, MouseButton, MouseEvent, ScrollDirection};
pub use text_edit::EditResult;
