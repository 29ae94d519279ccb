// src/system/session.rs

use crate::core::completion::{Candidates, Completer};
use crate::core::config_loader::Config;
use crate::core::prefixes::{PrefixHandler, PrefixRegistry};
use crate::core::resolver::{Resolution, ResolveError, Resolver, strip_comment};
use crate::core::tree::{CommandTree, NodeId};
use colored::{Color, Colorize};
use thiserror::Error;

/// Failure reported by the command-invocation collaborator.
#[derive(Error, Debug)]
pub enum InvocationError {
    /// The user cancelled the command.
    #[error("Aborted!")]
    Aborted,
    /// The command ran and failed.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Runs a resolved leaf (or a group asked for `--help`).
pub trait Invoker {
    /// Runs `node` with the residual argument string.
    fn invoke(&mut self, tree: &CommandTree, node: NodeId, args: &str) -> Result<(), InvocationError>;
}

/// Why the pointer cannot move to a path.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    /// The path names a leaf.
    #[error("'{0}' is a command, not a command group.")]
    NotAGroup(String),
    /// The path resolves with arguments left over.
    #[error("Cannot navigate to '{path}' with arguments '{args}'.")]
    ResidualArguments {
        /// Path as given.
        path: String,
        /// What was left after the path resolved.
        args: String,
    },
    /// The path does not resolve.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// What one submitted line did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank line or comment only.
    Empty,
    /// The pointer moved to this group.
    Navigated(NodeId),
    /// This node was handed to the invoker.
    Executed(NodeId),
    /// The line did not resolve.
    NotFound(ResolveError),
    /// The command was cancelled.
    Aborted,
    /// The command failed with this message.
    Failed(String),
}

/// One interactive session: the command tree plus the current position.
///
/// The pointer only moves on a line that resolves to a group with no
/// arguments; every other outcome leaves it untouched.
#[derive(Debug)]
pub struct Session {
    tree: CommandTree,
    prefixes: PrefixRegistry,
    pointer: NodeId,
    fuzzy: bool,
    bracket_color: Color,
    path_color: Color,
}

impl Session {
    /// Session at the root with default prefixes and fuzzy matching.
    pub fn new(tree: CommandTree) -> Self {
        let pointer = tree.root();
        Self {
            tree,
            prefixes: PrefixRegistry::default(),
            pointer,
            fuzzy: true,
            bracket_color: Color::Green,
            path_color: Color::BrightCyan,
        }
    }

    /// Session tuned by the user's configuration file.
    pub fn from_config(tree: CommandTree, config: &Config) -> Self {
        let (bracket_color, path_color) = config.prompt.colors();
        Self {
            prefixes: PrefixRegistry::with_help_prefixes(
                config.help_prefixes.iter().map(String::as_str),
            ),
            fuzzy: config.fuzzy,
            bracket_color,
            path_color,
            ..Self::new(tree)
        }
    }

    /// Builder form of [`Session::set_fuzzy`].
    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Turns the fuzzy overlay on or off.
    pub fn set_fuzzy(&mut self, fuzzy: bool) {
        self.fuzzy = fuzzy;
    }

    /// Adds or replaces a reserved leading verb.
    pub fn register_prefix(&mut self, name: &str, handler: impl PrefixHandler + 'static) {
        self.prefixes.register(name, handler);
    }

    /// The command tree.
    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Current position.
    pub fn pointer(&self) -> NodeId {
        self.pointer
    }

    /// Absolute path of the current position.
    pub fn path(&self) -> &str {
        &self.tree.node(self.pointer).path
    }

    /// Whether the pointer is at the root.
    pub fn at_root(&self) -> bool {
        self.pointer == self.tree.root()
    }

    /// Resolver over this session's tree and prefixes.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.tree, &self.prefixes)
    }

    /// Strict resolution of a full line from the current position.
    pub fn resolve(&self, line: &str) -> Result<Resolution, ResolveError> {
        self.resolver().resolve(self.pointer, line, true, false)
    }

    /// Completion candidates for `text` with the cursor at byte `cursor`.
    pub fn complete(&self, text: &str, cursor: usize) -> Candidates<'_> {
        Completer::new(self.resolver(), self.fuzzy).complete(self.pointer, text, cursor)
    }

    /// `[/current/path] ` without styling.
    pub fn prompt_text(&self) -> String {
        format!("[{}] ", self.path())
    }

    /// `[/current/path] ` in the configured colors.
    pub fn prompt_message(&self) -> String {
        format!(
            "{}{}{} ",
            "[".color(self.bracket_color),
            self.path().color(self.path_color),
            "]".color(self.bracket_color)
        )
    }

    /// Moves the pointer to the group at `path`, relative or absolute.
    pub fn set_path(&mut self, path: &str) -> Result<(), NavigationError> {
        let res = self.resolve(path)?;
        let node = self.tree.node(res.node);
        if !node.is_group() {
            return Err(NavigationError::NotAGroup(node.path.clone()));
        }
        if !res.args.is_empty() {
            return Err(NavigationError::ResidualArguments {
                path: node.path.clone(),
                args: res.args,
            });
        }
        self.pointer = res.node;
        Ok(())
    }

    /// Handles one submitted line. Problems are reported to the user and
    /// never end the session.
    pub fn submit(&mut self, line: &str, invoker: &mut dyn Invoker) -> TurnOutcome {
        if strip_comment(line).trim().is_empty() {
            return TurnOutcome::Empty;
        }

        let res = match self.resolve(line) {
            Ok(res) => res,
            Err(e) => {
                eprintln!("{}", not_found_message(&e).red());
                log::debug!("Resolution of '{}' failed: {}", line.trim(), e);
                return TurnOutcome::NotFound(e);
            }
        };

        if self.tree.is_group(res.node) && res.args.is_empty() {
            log::debug!("Navigating to '{}'", self.tree.node(res.node).path);
            self.pointer = res.node;
            return TurnOutcome::Navigated(res.node);
        }

        match invoker.invoke(&self.tree, res.node, &res.args) {
            Ok(()) => TurnOutcome::Executed(res.node),
            Err(InvocationError::Aborted) => {
                eprintln!("{}", t!("repl.error.aborted").red());
                TurnOutcome::Aborted
            }
            Err(InvocationError::Failed(e)) => {
                eprintln!("{}: {:#}", t!("repl.error.exception").red(), e);
                TurnOutcome::Failed(e.to_string())
            }
        }
    }
}

/// What the user sees when a line does not resolve: the failing token, or
/// the misplaced separator.
pub fn not_found_message(error: &ResolveError) -> String {
    match error {
        ResolveError::UnknownCommand(token) => {
            format!("{}: {}", t!("repl.error.not_found"), token)
        }
        ResolveError::AmbiguousArgumentSeparator { .. } => error.to_string(),
    }
}
