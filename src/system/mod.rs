//! # Interactive Layer
//!
//! Everything that talks to the terminal. [`session`] is the prompt state
//! machine and does no I/O besides reporting errors; [`line_editor`] adapts it
//! to `rustyline`; [`repl`] owns the read loop.

/// rustyline adapter.
pub mod line_editor;
/// Read loop.
pub mod repl;
/// Prompt state machine.
pub mod session;
