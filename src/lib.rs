//! Editor-side primitives for codepad.
//!
//! Invariant: the [`OutputLog`] only grows until an explicit clear; every
//! mutation reaches the injected [`LogRenderer`].
//!
//! # Public API Overview
//! - [`EditorSession`] owns one [`EditorWidget`] and exposes get/set of its text.
//! - [`OutputLog`] records run results as [`OutputEntry`] values.
//! - [`ExampleSet`] maps example names to literal source snippets.
//! - [`AnsiRenderer`] draws the log to a terminal.

pub mod config;
pub mod editor;
pub mod example_set;
pub mod output;
pub mod terminal;
pub mod text;

pub use crate::config::RenderConfig;
pub use crate::editor::{EditorOptions, EditorSession, EditorWidget, LineEditor};
pub use crate::example_set::ExampleSet;
pub use crate::output::{LogRenderer, NullRenderer, OutputEntry, OutputKind, OutputLog};
pub use crate::terminal::AnsiRenderer;
pub use crate::text::visible_width;
