//! # Introduction
//!
//! tracetty loads a precomputed execution trace — an ordered sequence of
//! snapshots of a program's call stack, variable bindings, and console
//! output — and plays it back step by step in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Playback pipeline
//!
//! ```text
//! trace.json → TraceDocument → TraceStore → PlaybackController → TUI
//! ```
//!
//! 1. [`trace::format`] — deserialises the JSON trace document produced by an
//!    external trace generator.
//! 2. [`trace`] — validates and holds the immutable snapshot sequence
//!    ([`trace::TraceStore`]) and the [`trace::value::Value`] model for
//!    variable bindings.
//! 3. [`playback`] — the playback state machine: step, play/pause, reset,
//!    speed, and deadline-driven auto-advance.
//! 4. [`player`] — couples the store with the controller and exposes the
//!    read surface the UI projects.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! Trace *generation* is out of scope: this crate consumes traces, it never
//! parses or executes the traced program itself.

pub mod playback;
pub mod player;
pub mod trace;
pub mod ui;
