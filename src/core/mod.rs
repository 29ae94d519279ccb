// src/core/mod.rs

/// Argument translation for invocation.
pub mod arg_builder;
/// Colour names.
pub mod color;
/// Group and leaf completion.
pub mod completion;
/// `config.toml` loading.
pub mod config_loader;
/// Fuzzy overlay over completion.
pub mod fuzzy;
/// Help screens.
pub mod help_display;
/// Config directory and path expansion.
pub mod paths;
/// Reserved leading verbs.
pub mod prefixes;
/// Input line to tree position.
pub mod resolver;
/// The command arena.
pub mod tree;
