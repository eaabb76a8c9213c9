//! TUI pane rendering modules
//!
//! Rendering logic for the visible panes, one module per pane:
//!
//! - [`source`]: traced program text with syntax highlighting and a
//!   current-line indicator
//! - [`stack`]: call stack frames, most recent call first
//! - [`variables`]: variable bindings at the current step
//! - [`output`]: console output accumulated up to the current step
//! - [`status`]: status bar with step position, progress, speed,
//!   keybindings, and playback state
//!
//! Each pane module exports a `render_*_pane()` function taking a
//! `*RenderData` struct of plain borrowed data plus, where the pane
//! scrolls, a mutable scroll state. The panes never touch playback state.

pub mod output;
pub mod source;
pub mod stack;
pub mod status;
pub mod variables;

// Re-export render functions for convenience
pub use output::{render_output_pane, OutputRenderData};
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use stack::{render_stack_pane, StackRenderData};
pub use status::{render_status_bar, StatusRenderData};
pub use variables::{render_variables_pane, VariablesRenderData};
