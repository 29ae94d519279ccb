// src/core/help_display.rs

use crate::core::tree::{CommandTree, NodeId, NodeKind};
use crate::models::ParamKind;
use std::fmt;

/// Help screen sections, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpSection {
    /// How to call the node.
    Usage,
    /// Full help text.
    Description,
    /// Visible subtree of a group.
    Commands,
    /// Visible positionals of a leaf.
    Arguments,
    /// Visible options of a leaf.
    Options,
}

impl HelpSection {
    /// Sections always render in this order; empty ones are skipped.
    pub const ORDER: [Self; 5] = [
        Self::Usage,
        Self::Description,
        Self::Commands,
        Self::Arguments,
        Self::Options,
    ];

    /// Localized heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Usage => t!("help.section.usage"),
            Self::Description => t!("help.section.description"),
            Self::Commands => t!("help.section.commands"),
            Self::Arguments => t!("help.section.arguments"),
            Self::Options => t!("help.section.options"),
        }
    }
}

impl fmt::Display for HelpSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Renders the help screen of a node.
///
/// Implementors provide section bodies; the ordering and the layout around
/// them is fixed by [`HelpFormatter::render`].
pub trait HelpFormatter {
    /// Body of one section, `None` when the section does not apply.
    fn section(&self, tree: &CommandTree, node: NodeId, section: HelpSection) -> Option<String>;

    /// Whole help screen: non-empty sections joined by blank lines.
    fn render(&self, tree: &CommandTree, node: NodeId) -> String {
        HelpSection::ORDER
            .iter()
            .filter_map(|&section| {
                self.section(tree, node, section)
                    .filter(|body| !body.trim().is_empty())
                    .map(|body| format!("{}:\n{}", section, body.trim_end()))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Plain-text formatter. `Commands` lists the whole subtree.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeHelpFormatter;

impl HelpFormatter for TreeHelpFormatter {
    fn section(&self, tree: &CommandTree, node: NodeId, section: HelpSection) -> Option<String> {
        let current = tree.node(node);
        match section {
            HelpSection::Usage => Some(format!("  {}", usage_line(tree, node))),
            HelpSection::Description => current.help.as_ref().map(|help| {
                let mut text = help
                    .lines()
                    .map(|l| format!("  {}", l.trim()))
                    .collect::<Vec<_>>()
                    .join("\n");
                if current.deprecated {
                    text.push_str("\n  ");
                    text.push_str(t!("help.deprecated_notice"));
                }
                text
            }),
            HelpSection::Commands => {
                let mut out = String::new();
                render_subtree(tree, node, "  ", &mut out);
                Some(out)
            }
            HelpSection::Arguments => {
                let NodeKind::Leaf { positionals, .. } = &current.kind else {
                    return None;
                };
                let rows: Vec<(String, String)> = positionals
                    .iter()
                    .filter(|p| !p.hidden)
                    .map(|p| (p.display.clone(), p.meta.clone()))
                    .collect();
                Some(table(&rows))
            }
            HelpSection::Options => {
                let NodeKind::Leaf { options, .. } = &current.kind else {
                    return None;
                };
                let rows: Vec<(String, String)> = options
                    .iter()
                    .map(|o| {
                        let spelling = match o.kind {
                            ParamKind::Flag => o.text.clone(),
                            _ => format!("--{}", o.long),
                        };
                        (spelling, o.meta.clone())
                    })
                    .collect();
                Some(table(&rows))
            }
        }
    }
}

fn usage_line(tree: &CommandTree, node: NodeId) -> String {
    let current = tree.node(node);
    match &current.kind {
        NodeKind::Group { .. } => format!("{} COMMAND [ARGS]...", current.path),
        NodeKind::Leaf {
            options,
            positionals,
            ..
        } => {
            let mut parts = vec![current.path.clone()];
            if !options.is_empty() {
                parts.push("[OPTIONS]".to_string());
            }
            parts.extend(
                positionals
                    .iter()
                    .filter(|p| !p.hidden)
                    .map(|p| p.display.clone()),
            );
            parts.join(" ")
        }
    }
}

/// Two aligned columns.
fn table(rows: &[(String, String)]) -> String {
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(left, right)| format!("  {:<width$}  {}", left, right, width = width).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indented tree of visible descendants, with `├─`/`└─` connectors.
fn render_subtree(tree: &CommandTree, node: NodeId, prefix: &str, out: &mut String) {
    let visible: Vec<NodeId> = tree
        .children(node)
        .filter(|&id| !tree.node(id).hidden)
        .collect();

    for (i, &child_id) in visible.iter().enumerate() {
        let child = tree.node(child_id);
        let is_last = i + 1 == visible.len();
        let connector = if is_last { "└─" } else { "├─" };
        let deprecated = if child.deprecated {
            format!(" {}", t!("help.deprecated_marker"))
        } else {
            String::new()
        };
        let line = format!(
            "{}{}{}  {}{}",
            prefix,
            connector,
            child.name,
            child.summary(),
            deprecated
        );
        out.push_str(line.trim_end());
        out.push('\n');

        let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
        render_subtree(tree, child_id, &child_prefix, out);
    }
}
