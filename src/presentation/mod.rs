//! Presentation layer handling terminal UI and user input.
//!
//! Rendering is a pure function of [`crate::application::App`]; key and
//! mouse events are mapped onto screen operations in [`input`].

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
