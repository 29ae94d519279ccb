// src/core/tree.rs

use crate::constants::{PATH_SEPARATOR, ROOT_PATH};
use crate::models::{CommandSpec, ParamKind, ParamSpec, help_summary};
use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

/// Malformed descriptor tree.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// Two children of one group share a name.
    #[error("Duplicate command '{name}' under '{parent}'.")]
    DuplicateSibling {
        /// Path of the group.
        parent: String,
        /// Repeated name.
        name: String,
    },
    /// A non-root command has no name.
    #[error("A command under '{parent}' has an empty name.")]
    EmptyName {
        /// Path of the group.
        parent: String,
    },
}

/// Index of a node inside its [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named option of a leaf, pre-rendered for completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Spelling as typed, without dashes (`opt-arg1`, `no-flag2`).
    pub long: String,
    /// Completion text: `--flag` or `name=`.
    pub text: String,
    /// Completion metadata.
    pub meta: String,
    /// Flag or option.
    pub kind: ParamKind,
}

/// A positional argument of a leaf, pre-rendered for completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalEntry {
    /// Placeholder shown in the menu, e.g. `<ARG1>`.
    pub display: String,
    /// Completion metadata.
    pub meta: String,
    /// Never offered by completion.
    pub hidden: bool,
}

/// Group or leaf, with what completion needs for each.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Has children, takes no arguments.
    Group {
        children: IndexMap<String, NodeId>,
    },
    /// Runnable command.
    Leaf {
        params: Vec<ParamSpec>,
        /// Visible options in declaration order.
        options: Vec<OptionEntry>,
        /// All positionals in declaration order, hidden ones included so that
        /// positions stay aligned with the descriptor.
        positionals: Vec<PositionalEntry>,
    },
}

/// One command or command group.
#[derive(Debug, Clone)]
pub struct Node {
    /// Name as typed.
    pub name: String,
    /// Absolute path, `/` for the root.
    pub path: String,
    /// `None` only for the root.
    pub parent: Option<NodeId>,
    /// Full help text.
    pub help: Option<String>,
    /// Left out of completion and help listings.
    pub hidden: bool,
    /// Marked as deprecated in listings.
    pub deprecated: bool,
    /// Group or leaf data.
    pub kind: NodeKind,
}

impl Node {
    /// Whether this node has children.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// First line of the help text, or an empty string.
    pub fn summary(&self) -> &str {
        help_summary(self.help.as_deref())
    }

    /// Parameters of a leaf; empty for groups.
    pub fn params(&self) -> &[ParamSpec] {
        match &self.kind {
            NodeKind::Leaf { params, .. } => params,
            NodeKind::Group { .. } => &[],
        }
    }
}

/// Immutable arena holding the whole command hierarchy.
///
/// Nodes refer to each other by [`NodeId`]; the root is always the first slot.
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<Node>,
}

impl CommandTree {
    /// Builds the arena from a descriptor tree, keeping declaration order.
    pub fn build(spec: &CommandSpec) -> Result<Self, TreeError> {
        let mut tree = Self { nodes: Vec::new() };
        tree.insert(spec, None, ROOT_PATH.to_string())?;
        log::debug!("Built command tree with {} nodes", tree.nodes.len());
        Ok(tree)
    }

    fn insert(
        &mut self,
        spec: &CommandSpec,
        parent: Option<NodeId>,
        path: String,
    ) -> Result<NodeId, TreeError> {
        let id = NodeId(self.nodes.len());
        let kind = if spec.is_group() {
            NodeKind::Group {
                children: IndexMap::new(),
            }
        } else {
            leaf_kind(&spec.params)
        };
        self.nodes.push(Node {
            name: spec.name.clone(),
            path: path.clone(),
            parent,
            help: spec.help.clone(),
            hidden: spec.hidden,
            deprecated: spec.deprecated,
            kind,
        });

        for child in &spec.children {
            if child.name.is_empty() {
                return Err(TreeError::EmptyName { parent: path });
            }
            if self.child(id, &child.name).is_some() {
                return Err(TreeError::DuplicateSibling {
                    parent: path,
                    name: child.name.clone(),
                });
            }
            let child_path = if parent.is_none() {
                format!("{}{}", ROOT_PATH, child.name)
            } else {
                format!("{}{}{}", path, PATH_SEPARATOR, child.name)
            };
            let child_id = self.insert(child, Some(id), child_path)?;
            if let Some(Node {
                kind: NodeKind::Group { children },
                ..
            }) = self.nodes.get_mut(id.0)
            {
                children.insert(child.name.clone(), child_id);
            }
        }
        Ok(id)
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Node behind `id`.
    #[allow(clippy::indexing_slicing)]
    pub fn node(&self, id: NodeId) -> &Node {
        // Ids are only minted by `insert`, so they always point inside the arena.
        &self.nodes[id.0]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false once built.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Exact child lookup. Hidden children are found too.
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        match &self.node(id).kind {
            NodeKind::Group { children } => children.get(name).copied(),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Children in declaration order, hidden ones included.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let children = match &self.node(id).kind {
            NodeKind::Group { children } => Some(children.values().copied()),
            NodeKind::Leaf { .. } => None,
        };
        children.into_iter().flatten()
    }

    /// Whether `id` is a group.
    pub fn is_group(&self, id: NodeId) -> bool {
        self.node(id).is_group()
    }

    /// Looks a node up by its absolute path (`/level1A/command1`).
    pub fn find(&self, path: &str) -> Option<NodeId> {
        path.split(PATH_SEPARATOR)
            .filter(|part| !part.is_empty())
            .try_fold(self.root(), |current, part| self.child(current, part))
    }
}

fn leaf_kind(params: &[ParamSpec]) -> NodeKind {
    let options = params
        .iter()
        .filter(|p| p.kind != ParamKind::Positional && !p.hidden)
        .map(|p| {
            let long = p.long_name();
            let (text, metavar) = match p.kind {
                ParamKind::Flag => (format!("--{}", long), "FLAG".to_string()),
                _ => (
                    format!("{}=", long),
                    p.metavar.clone().unwrap_or_else(|| "TEXT".to_string()),
                ),
            };
            OptionEntry {
                meta: param_meta(&metavar, p),
                long,
                text,
                kind: p.kind,
            }
        })
        .collect();

    let positionals = params
        .iter()
        .filter(|p| p.kind == ParamKind::Positional)
        .map(|p| {
            let metavar = p.metavar.clone().unwrap_or_else(|| "TEXT".to_string());
            PositionalEntry {
                display: format!("<{}>", p.name.to_uppercase()),
                meta: param_meta(&metavar, p),
                hidden: p.hidden,
            }
        })
        .collect();

    NodeKind::Leaf {
        params: params.to_vec(),
        options,
        positionals,
    }
}

/// `"METAVAR (default) help (deprecated)"`, absent parts omitted.
fn param_meta(metavar: &str, param: &ParamSpec) -> String {
    let mut parts = vec![metavar.to_string()];
    if let Some(default) = &param.default_value {
        parts.push(format!("({})", default));
    }
    let summary = help_summary(param.help.as_deref());
    if !summary.is_empty() {
        parts.push(summary.to_string());
    }
    if param.deprecated {
        parts.push(t!("help.deprecated_marker").to_string());
    }
    parts.join(" ")
}
