//! # cmdnav
//!
//! Navigate a hierarchical command set from an interactive prompt, addressing
//! commands like paths in a filesystem (`/group/sub command args`, `..`, `.`),
//! with context-sensitive tab completion at every level of the tree.
//!
//! The two halves that must agree on where a command ends and its arguments
//! begin live in [`core::resolver`] and [`core::completion`]. The interactive
//! driver is in [`system`].

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

/// The binary's command line and the clap bridge.
pub mod cli;
/// Reserved tokens and file names.
pub mod constants;
/// Tree, resolution and completion.
pub mod core;
/// Command descriptors.
pub mod models;
/// The interactive prompt.
pub mod system;

#[cfg(test)]
mod test_support;
