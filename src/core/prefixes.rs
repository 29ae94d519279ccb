// src/core/prefixes.rs

use crate::constants::{DEFAULT_HELP_PREFIXES, HELP_ARGS};
use crate::core::resolver::{Resolution, ResolveError, Resolver};
use crate::core::tree::NodeId;
use std::collections::HashMap;
use std::fmt;

/// What a prefix handler gets to work with.
#[derive(Debug)]
pub struct PrefixContext<'r> {
    /// Resolver the prefix was met by.
    pub resolver: &'r Resolver<'r>,
    /// Node the prefix was typed at.
    pub node: NodeId,
    /// Input after the prefix token and its separator.
    pub remaining: &'r str,
    /// Offset of `remaining` in the original line, or the end of the prefix
    /// token when nothing follows it.
    pub offset: usize,
    /// Whether resolution is tolerant.
    pub partial: bool,
}

impl PrefixContext<'_> {
    /// Resolves `remaining` from the prefix's node with prefixes disabled,
    /// shifting the consumed length back into the original line.
    pub fn resolve_remaining(&self) -> Result<Resolution, ResolveError> {
        let mut inner = self
            .resolver
            .resolve(self.node, self.remaining, false, self.partial)?;
        inner.consumed += self.offset;
        Ok(inner)
    }

    /// True when nothing but whitespace follows the prefix.
    pub fn is_bare(&self) -> bool {
        self.remaining.trim().is_empty()
    }
}

/// A reserved leading verb that rewrites how the rest of the line resolves.
pub trait PrefixHandler {
    /// Resolves the rest of the line.
    fn handle(&self, ctx: &PrefixContext<'_>) -> Result<Resolution, ResolveError>;
}

impl<F> PrefixHandler for F
where
    F: Fn(&PrefixContext<'_>) -> Result<Resolution, ResolveError>,
{
    fn handle(&self, ctx: &PrefixContext<'_>) -> Result<Resolution, ResolveError> {
        self(ctx)
    }
}

/// `help <path>` / `? <path>`: resolve the path, then force `--help`,
/// dropping whatever arguments were typed after the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpPrefix;

impl PrefixHandler for HelpPrefix {
    fn handle(&self, ctx: &PrefixContext<'_>) -> Result<Resolution, ResolveError> {
        if ctx.is_bare() {
            return Ok(Resolution {
                node: ctx.node,
                args: HELP_ARGS.to_string(),
                consumed: ctx.offset,
            });
        }
        let target = ctx.resolve_remaining()?;
        Ok(Resolution {
            args: HELP_ARGS.to_string(),
            ..target
        })
    }
}

/// Reserved verbs recognized as the first token of a line.
pub struct PrefixRegistry {
    handlers: HashMap<String, Box<dyn PrefixHandler>>,
}

impl fmt::Debug for PrefixRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl Default for PrefixRegistry {
    fn default() -> Self {
        Self::with_help_prefixes(DEFAULT_HELP_PREFIXES.iter().copied())
    }
}

impl PrefixRegistry {
    /// A registry without any reserved verb.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// A registry where each of `names` maps to [`HelpPrefix`].
    pub fn with_help_prefixes<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self::empty();
        for name in names {
            registry.register(name, HelpPrefix);
        }
        registry
    }

    /// Registers `handler` under `name`, replacing any previous handler.
    pub fn register(&mut self, name: &str, handler: impl PrefixHandler + 'static) {
        if self
            .handlers
            .insert(name.to_string(), Box::new(handler))
            .is_some()
        {
            log::debug!("Prefix '{}' handler replaced", name);
        }
    }

    /// Removes `name`. Returns whether it was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// Handler registered under `name`.
    pub fn get(&self, name: &str) -> Option<&dyn PrefixHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Whether `name` is reserved.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
