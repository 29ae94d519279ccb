// src/core/resolver.rs

use crate::constants::{COMMENT_CHAR, CURRENT_DIR_TOKEN, ESCAPE_CHAR, PARENT_DIR_TOKEN, PATH_SEPARATOR};
use crate::core::prefixes::{PrefixContext, PrefixHandler, PrefixRegistry};
use crate::core::tree::{CommandTree, NodeId};
use thiserror::Error;

/// Why a line does not name a node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No child with this name.
    #[error("Unknown command '{0}'.")]
    UnknownCommand(String),
    /// A leaf was followed by `/` instead of whitespace.
    #[error("'{command}' must be separated from its arguments by whitespace, not '/'.")]
    AmbiguousArgumentSeparator {
        /// Absolute path of the leaf.
        command: String,
    },
}

type ResolveResult<T> = Result<T, ResolveError>;

/// Where a line of input lands in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Deepest node reached.
    pub node: NodeId,
    /// Residual argument string, trimmed.
    pub args: String,
    /// Byte offset into the original input where `args` starts, or where the
    /// command path ends when `args` is empty.
    pub consumed: usize,
}

/// Turns raw input lines into tree positions.
///
/// `/` and whitespace are interchangeable separators on the command path.
/// Only whitespace may separate a leaf from its arguments.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    tree: &'a CommandTree,
    prefixes: &'a PrefixRegistry,
}

impl<'a> Resolver<'a> {
    /// Resolver over `tree` honouring `prefixes`.
    pub fn new(tree: &'a CommandTree, prefixes: &'a PrefixRegistry) -> Self {
        Self { tree, prefixes }
    }

    /// The tree being resolved against.
    pub fn tree(&self) -> &'a CommandTree {
        self.tree
    }

    /// Resolves `input` relative to `pointer`.
    ///
    /// With `partial`, an unknown token ends the walk instead of failing: the
    /// deepest node matched so far is returned with the rest of the line as
    /// its arguments and `consumed` rolled back to the start of that token.
    pub fn resolve(
        &self,
        pointer: NodeId,
        input: &str,
        prefix_enabled: bool,
        partial: bool,
    ) -> ResolveResult<Resolution> {
        let s = strip_comment(input);
        let mut pos = skip_while(s, 0, char::is_whitespace);
        let mut current = pointer;
        if rest(s, pos).starts_with(PATH_SEPARATOR) {
            current = self.tree.root();
        }
        pos = skip_while(s, pos, is_separator);

        if !self.tree.is_group(current) {
            let args = rest(s, pos).trim_end();
            let consumed = if args.is_empty() { s.trim_end().len() } else { pos };
            return Ok(self.finish(current, args, consumed));
        }

        let mut prefix_enabled = prefix_enabled;
        while pos < s.len() {
            let end = skip_while(s, pos, |c| !is_separator(c));
            let token = s.get(pos..end).unwrap_or_default();
            log::trace!("Resolving token '{}' at {}", token, pos);

            match token {
                CURRENT_DIR_TOKEN => {}
                PARENT_DIR_TOKEN => current = self.tree.parent(current).unwrap_or(current),
                name => match self.tree.child(current, name) {
                    Some(child) => current = child,
                    None => {
                        if prefix_enabled && let Some(handler) = self.prefixes.get(name) {
                            return self.apply_prefix(handler, current, s, token, end, partial);
                        }
                        if partial {
                            return Ok(self.finish(current, rest(s, pos).trim_end(), pos));
                        }
                        return Err(ResolveError::UnknownCommand(name.to_string()));
                    }
                },
            }
            prefix_enabled = false;

            if !self.tree.is_group(current) {
                return self.leaf_tail(current, s, end, partial);
            }
            pos = skip_while(s, end, is_separator);
        }

        Ok(self.finish(current, "", s.trim_end().len()))
    }

    /// Splits what follows a leaf's name into the argument string.
    fn leaf_tail(
        &self,
        leaf: NodeId,
        s: &str,
        end: usize,
        partial: bool,
    ) -> ResolveResult<Resolution> {
        let after_slashes = skip_while(s, end, |c| c == PATH_SEPARATOR);
        match rest(s, after_slashes).chars().next() {
            None => Ok(self.finish(leaf, "", after_slashes)),
            Some(c) if c.is_whitespace() => {
                let args_start = skip_while(s, after_slashes, char::is_whitespace);
                let args = rest(s, args_start).trim_end();
                let consumed = if args.is_empty() { after_slashes } else { args_start };
                Ok(self.finish(leaf, args, consumed))
            }
            Some(_) if partial => {
                Ok(self.finish(leaf, rest(s, after_slashes).trim_end(), after_slashes))
            }
            Some(_) => Err(ResolveError::AmbiguousArgumentSeparator {
                command: self.tree.node(leaf).path.clone(),
            }),
        }
    }

    fn apply_prefix(
        &self,
        handler: &dyn PrefixHandler,
        node: NodeId,
        s: &str,
        token: &str,
        end: usize,
        partial: bool,
    ) -> ResolveResult<Resolution> {
        let after_slashes = skip_while(s, end, |c| c == PATH_SEPARATOR);
        let (remaining, offset) = match rest(s, after_slashes).chars().next() {
            None => ("", after_slashes),
            Some(c) if c.is_whitespace() => {
                let args_start = skip_while(s, after_slashes, char::is_whitespace);
                let remaining = rest(s, args_start);
                if remaining.trim_end().is_empty() {
                    ("", after_slashes)
                } else {
                    (remaining, args_start)
                }
            }
            Some(_) if partial => (rest(s, after_slashes), after_slashes),
            Some(_) => {
                return Err(ResolveError::AmbiguousArgumentSeparator {
                    command: token.to_string(),
                });
            }
        };
        log::debug!("Prefix '{}' takes over at offset {}", token, offset);

        handler.handle(&PrefixContext {
            resolver: self,
            node,
            remaining,
            offset,
            partial,
        })
    }

    fn finish(&self, node: NodeId, args: &str, consumed: usize) -> Resolution {
        log::debug!(
            "Resolved to '{}' (args: '{}', consumed: {})",
            self.tree.node(node).path,
            args,
            consumed
        );
        Resolution {
            node,
            args: args.to_string(),
            consumed,
        }
    }
}

/// `/` and whitespace both separate path tokens.
pub fn is_separator(c: char) -> bool {
    c == PATH_SEPARATOR || c.is_whitespace()
}

/// Cuts the line at the first `#` not preceded by `\`.
pub fn strip_comment(input: &str) -> &str {
    let mut prev = None;
    for (i, c) in input.char_indices() {
        if c == COMMENT_CHAR && prev != Some(ESCAPE_CHAR) {
            return input.get(..i).unwrap_or(input);
        }
        prev = Some(c);
    }
    input
}

/// True when `cursor` sits inside a comment of `input`.
pub fn in_comment(input: &str, cursor: usize) -> bool {
    strip_comment(input).len() < cursor
}

/// Index of the first char at or after `from` that fails `pred`.
pub(crate) fn skip_while(s: &str, from: usize, pred: impl Fn(char) -> bool) -> usize {
    rest(s, from)
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| from + i)
}

pub(crate) fn rest(s: &str, from: usize) -> &str {
    s.get(from..).unwrap_or_default()
}
