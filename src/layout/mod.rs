//! Layout Module
//!
//! Flexbox layout of the form using [Taffy](https://github.com/DioxusLabs/taffy).
//!
//! # Architecture
//!
//! 1. The bridge builds a Taffy tree from the current form (one row node
//!    per work-experience entry)
//! 2. Taffy computes the flexbox layout for the terminal width
//! 3. Results are flattened into absolute [`Slot`] rectangles
//!
//! Text widths for drawing come from [`text_measure`].

pub mod taffy_bridge;
pub mod text_measure;

pub use taffy_bridge::{CONTROL_HEIGHT, FormLayout, HELPER_HEIGHT, Slot, compute_form_layout};
pub use text_measure::{string_width, truncate_text};
