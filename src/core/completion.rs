// src/core/completion.rs

use crate::core::fuzzy::fuzzy_overlay;
use crate::core::resolver::{Resolver, in_comment, is_separator};
use crate::core::tree::{CommandTree, NodeId, NodeKind, OptionEntry, PositionalEntry};
use crate::models::ParamKind;

/// One entry of the completion menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Text inserted at the cursor. Empty for argument placeholders.
    pub text: String,
    /// Label shown in the menu.
    pub display: String,
    /// Help text shown next to the label.
    pub meta: String,
    /// Where the replaced text starts, in bytes relative to the cursor (`<= 0`).
    pub start_offset: isize,
}

impl Candidate {
    /// Builds a candidate from borrowed parts.
    pub fn new(text: &str, display: &str, meta: &str, start_offset: isize) -> Self {
        Self {
            text: text.to_string(),
            display: display.to_string(),
            meta: meta.to_string(),
            start_offset,
        }
    }

    /// Placeholders describe a positional argument but insert nothing.
    pub fn is_placeholder(&self) -> bool {
        self.text.is_empty()
    }
}

/// Lazy, finite candidate stream.
pub type Candidates<'a> = Box<dyn Iterator<Item = Candidate> + 'a>;

/// Negative offset covering `len` bytes before the cursor.
pub(crate) fn back(len: usize) -> isize {
    isize::try_from(len).map_or(isize::MIN, |n| -n)
}

fn nothing<'a>() -> Candidates<'a> {
    Box::new(std::iter::empty())
}

/// Trailing run of `text` made of chars that are not separators.
fn current_word(text: &str, is_boundary: impl Fn(char) -> bool) -> &str {
    let start = text
        .char_indices()
        .rev()
        .find(|&(_, c)| is_boundary(c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    text.get(start..).unwrap_or_default()
}

/// Completion for the text before the cursor, relative to a pointer.
///
/// Never fails: malformed or unknown input yields an empty stream.
#[derive(Debug, Clone, Copy)]
pub struct Completer<'a> {
    resolver: Resolver<'a>,
    fuzzy: bool,
}

impl<'a> Completer<'a> {
    /// Completer resolving through `resolver`, optionally fuzzy.
    pub fn new(resolver: Resolver<'a>, fuzzy: bool) -> Self {
        Self { resolver, fuzzy }
    }

    /// Candidates for `text` with the cursor at byte `cursor`, seen from `pointer`.
    pub fn complete(&self, pointer: NodeId, text: &str, cursor: usize) -> Candidates<'a> {
        let Some(before) = text.get(..cursor) else {
            return nothing();
        };
        if in_comment(text, cursor) {
            return nothing();
        }

        let word = current_word(before, is_separator);
        if !self.fuzzy || word.is_empty() {
            return self.exact(pointer, before);
        }
        let head = before.get(..before.len() - word.len()).unwrap_or_default();
        let ranked = fuzzy_overlay(word, self.exact(pointer, head));
        Box::new(ranked.into_iter())
    }

    /// Finds the node that owns the word under the cursor and asks it.
    fn exact(&self, pointer: NodeId, before: &str) -> Candidates<'a> {
        let word = current_word(before, is_separator);
        let head = before.get(..before.len() - word.len()).unwrap_or_default();
        let Ok(position) = self.resolver.resolve(pointer, head, true, true) else {
            return nothing();
        };
        let local = before.get(position.consumed..).unwrap_or_default();
        log::trace!(
            "Completing '{}' at '{}'",
            local,
            self.resolver.tree().node(position.node).path
        );
        local_candidates(self.resolver.tree(), position.node, local)
    }
}

/// Candidates produced by one node for the text typed after it.
pub fn local_candidates<'a>(tree: &'a CommandTree, node: NodeId, text: &str) -> Candidates<'a> {
    match &tree.node(node).kind {
        NodeKind::Group { .. } => group_candidates(tree, node, text),
        NodeKind::Leaf {
            options,
            positionals,
            ..
        } => leaf_candidates(tree, node, options, positionals, text),
    }
}

fn group_candidates<'a>(tree: &'a CommandTree, node: NodeId, text: &str) -> Candidates<'a> {
    let text = text.trim_start();

    if let Some(split) = text.find(is_separator) {
        let first = text.get(..split).unwrap_or_default();
        if let Some(child) = tree.child(node, first) {
            return local_candidates(tree, child, text.get(split..).unwrap_or_default());
        }
    }

    let word = current_word(text, is_separator).to_string();
    let earlier: Vec<String> = text
        .get(..text.len() - word.len())
        .unwrap_or_default()
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    let start_offset = back(word.len());

    Box::new(
        tree.children(node)
            .map(move |id| tree.node(id))
            .filter(move |child| {
                !child.hidden
                    && child.name.starts_with(word.as_str())
                    && child.name != word
                    && !earlier.contains(&child.name)
            })
            .map(move |child| {
                let meta = if child.deprecated {
                    format!("{} {}", child.summary(), t!("help.deprecated_marker")).trim_start().to_string()
                } else {
                    child.summary().to_string()
                };
                Candidate::new(&child.name, &child.name, &meta, start_offset)
            }),
    )
}

fn leaf_candidates<'a>(
    tree: &'a CommandTree,
    node: NodeId,
    options: &'a [OptionEntry],
    positionals: &'a [PositionalEntry],
    text: &str,
) -> Candidates<'a> {
    let word = current_word(text, char::is_whitespace).to_string();
    let start_offset = back(word.len());

    let params = tree.node(node).params();
    let is_option_name = |token: &str| {
        token.strip_prefix("--").is_some_and(|name| {
            params
                .iter()
                .any(|p| p.kind != ParamKind::Positional && p.long_name() == name)
        })
    };
    let filled = text
        .split_whitespace()
        .filter(|&t| !t.contains('=') && !is_option_name(t))
        .count();

    let placeholder = positionals
        .get(filled)
        .filter(|p| !p.hidden)
        .map(|p| Candidate::new("", &p.display, &p.meta, 0));

    let named = options
        .iter()
        .filter(move |o| o.text.starts_with(word.as_str()) && o.text != word)
        .map(move |o| Candidate::new(&o.text, &o.text, &o.meta, start_offset));

    Box::new(named.chain(placeholder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prefixes::PrefixRegistry;
    use crate::test_support::demo_tree;
    use pretty_assertions::assert_eq;

    const ROOT_LEVEL: [(&str, &str); 4] = [
        ("root1", "Root command 1"),
        ("root2", "Root command 2"),
        ("root3", "Root command 3"),
        ("level1A", "Sub level 1"),
    ];
    const LEVEL1A: [(&str, &str); 4] = [
        ("command1", "First command"),
        ("command2", "Second command (deprecated)"),
        ("level2A", "Sub level 2A"),
        ("level2B", "Sub level 2B (deprecated)"),
    ];
    const ROOT2_PARAMS: [(&str, &str); 1] = [("<ARG1>", "TEXT")];
    const ROOT3_PARAMS: [(&str, &str); 5] = [
        ("opt-arg1=", "TEXT (False) An optional arg"),
        ("opt-arg2=", "TEXT A second optional arg"),
        ("--flag1", "FLAG A flag option"),
        ("--no-flag2", "FLAG Another flag option"),
        ("--no-flag3", "FLAG Yet another flag option"),
    ];
    const COMMAND1_PARAMS: [(&str, &str); 3] = [
        ("<ARG1>", "TEXT The first arg"),
        ("<ARG2>", "INTEGER The second arg"),
        ("<ARG3>", "INTEGER The third arg"),
    ];

    fn run(start: &str, text: &str, fuzzy: bool) -> Vec<Candidate> {
        let tree = demo_tree();
        let prefixes = PrefixRegistry::default();
        let completer = Completer::new(Resolver::new(&tree, &prefixes), fuzzy);
        let pointer = tree.find(start).unwrap();
        completer.complete(pointer, text, text.len()).collect()
    }

    fn shown(candidates: &[Candidate]) -> Vec<(&str, &str)> {
        candidates
            .iter()
            .map(|c| (c.display.as_str(), c.meta.as_str()))
            .collect()
    }

    /// `fuzzy: None` checks both modes.
    fn check(cases: &[(Option<bool>, &str, &[(&str, &str)])]) {
        for &(fuzzy, text, expected) in cases {
            let modes: &[bool] = match fuzzy {
                None => &[false, true],
                Some(true) => &[true],
                Some(false) => &[false],
            };
            for &mode in modes {
                let got = run("/", text, mode);
                assert_eq!(shown(&got), expected.to_vec(), "'{text}' fuzzy={mode}");
            }
        }
    }

    #[test]
    fn test_root_level_names() {
        check(&[
            (None, "", &ROOT_LEVEL),
            (None, "/", &ROOT_LEVEL),
            (None, "r", &ROOT_LEVEL[..3]),
            (None, "/ro", &ROOT_LEVEL[..3]),
            (None, "root", &ROOT_LEVEL[..3]),
            (Some(false), "root1", &[]),
            (Some(true), "root1", &ROOT_LEVEL[..1]),
            (Some(false), "/root2", &[]),
            (Some(true), "/root2", &ROOT_LEVEL[1..2]),
            (None, "le", &ROOT_LEVEL[3..]),
            (Some(false), "lel", &[]),
            (Some(true), "/lel", &ROOT_LEVEL[3..]),
            (Some(false), "level1A", &[]),
            (Some(true), "level1A", &ROOT_LEVEL[3..]),
        ]);
    }

    #[test]
    fn test_leaf_without_params_offers_nothing() {
        check(&[(None, "root1 ", &[]), (None, "/root1 ", &[])]);
    }

    #[test]
    fn test_group_children() {
        check(&[
            (None, "level1A ", &LEVEL1A),
            (None, "/level1A/", &LEVEL1A),
            (None, "level1A c", &LEVEL1A[..2]),
            (None, "/level1A/c", &LEVEL1A[..2]),
            (None, "level1A l", &LEVEL1A[2..]),
        ]);
    }

    #[test]
    fn test_hidden_children_are_not_offered() {
        let got = run("/level1A", "hid", false);
        assert!(got.is_empty());
    }

    #[test]
    fn test_hidden_options_are_never_offered() {
        const COMMAND2_PARAMS: [(&str, &str); 2] = [
            ("opt-arg1=", "TEXT (False) An optional arg"),
            ("opt-arg2=", "INTEGER (0) A second optional arg"),
        ];
        check(&[
            (None, "level1A command2 ", &COMMAND2_PARAMS),
            (None, "level1A command2 opt-arg3", &[]),
        ]);
    }

    #[test]
    fn test_hidden_command_completes_when_typed_exactly() {
        check(&[(
            None,
            "level1A hidden_subcommand1 ",
            &[("opt-arg1=", "TEXT An optional arg"), ("<ARG1>", "TEXT The first arg")],
        )]);
    }

    #[test]
    fn test_options() {
        check(&[
            (None, "root3 ", &ROOT3_PARAMS),
            (None, "/root3 ", &ROOT3_PARAMS),
            (Some(false), "root3 o", &ROOT3_PARAMS[..2]),
            (
                Some(true),
                "root3 o",
                &[ROOT3_PARAMS[0], ROOT3_PARAMS[1], ROOT3_PARAMS[3], ROOT3_PARAMS[4]],
            ),
            (Some(false), "root3   o", &ROOT3_PARAMS[..2]),
            (None, "root3 op", &ROOT3_PARAMS[..2]),
            (Some(false), "root3 a", &[]),
            (Some(true), "root3 a", &ROOT3_PARAMS),
            (Some(true), "/root3   arg", &ROOT3_PARAMS[..2]),
            (Some(false), "root3 fla", &[]),
            (Some(true), "root3 fla", &ROOT3_PARAMS[2..]),
            (Some(false), "root3 --flag1", &[]),
            (Some(true), "root3 --flag1", &ROOT3_PARAMS[2..3]),
        ]);
    }

    #[test]
    fn test_typed_flags_are_offered_again() {
        check(&[
            (None, "root3 --flag1 ", &ROOT3_PARAMS),
            (Some(false), "root3 --flag1 o", &ROOT3_PARAMS[..2]),
        ]);
    }

    #[test]
    fn test_positional_placeholders_follow_position() {
        check(&[
            (None, "root2 ", &ROOT2_PARAMS),
            (Some(false), "root2 a", &[]),
            (Some(true), "root2 a", &ROOT2_PARAMS),
            (None, "level1A command1 ", &COMMAND1_PARAMS[..1]),
            (Some(false), "level1A command1 A", &COMMAND1_PARAMS[1..2]),
            (Some(true), "level1A command1 A", &COMMAND1_PARAMS[..1]),
            (Some(true), "level1A command1 o", &[]),
            (None, "level1A command1 other1 ", &COMMAND1_PARAMS[1..2]),
            (Some(false), "level1A command1 other1 o", &COMMAND1_PARAMS[2..]),
            (Some(true), "level1A command1 other1 other2", &[]),
            (None, "level1A command1 other1 other2 ", &COMMAND1_PARAMS[2..]),
            // The fourth positional is hidden.
            (None, "level1A command1 other1 other2 other3 ", &[]),
            (None, "level1A command1 other1 other2 other3 other4 ", &[]),
        ]);
    }

    #[test]
    fn test_option_values_do_not_fill_positionals() {
        check(&[
            (
                None,
                "level1A level2A command3 opt-arg1=x ",
                &[("opt-arg1=", "TEXT (False)"), ("<ARG1>", "TEXT")],
            ),
            (
                None,
                "level1A level2A command3 --opt-arg1 ",
                &[("opt-arg1=", "TEXT (False)"), ("<ARG1>", "TEXT")],
            ),
            (None, "level1A level2A command3 y ", &[("opt-arg1=", "TEXT (False)")]),
        ]);
    }

    #[test]
    fn test_help_prefix_unwraps() {
        check(&[
            (None, "help", &[]),
            (None, "help ", &ROOT_LEVEL),
            (None, "help /", &ROOT_LEVEL),
            (None, "help level1A c", &LEVEL1A[..2]),
            (Some(false), "? root3 --f", &ROOT3_PARAMS[2..3]),
        ]);
    }

    #[test]
    fn test_relative_to_pointer() {
        let got = run("/level1A/level2A", "c", false);
        let names: Vec<_> = got.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(names, vec!["command3", "command4"]);

        let got = run("/level1A/level2A", "../l", false);
        let names: Vec<_> = got.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(names, vec!["level2A", "level2B"]);
    }

    #[test]
    fn test_start_offsets() {
        let got = run("/", "level1A com", false);
        assert_eq!(got[0].start_offset, -3);
        assert_eq!(got[0].text, "command1");

        let got = run("/", "root3 --fl", true);
        assert_eq!(got[0].text, "--flag1");
        assert_eq!(got[0].start_offset, -4);

        let got = run("/", "level1A command1 ", false);
        assert!(got[0].is_placeholder());
        assert_eq!(got[0].start_offset, 0);
    }

    #[test]
    fn test_degenerate_input_yields_nothing() {
        let tree = demo_tree();
        let prefixes = PrefixRegistry::default();
        let completer = Completer::new(Resolver::new(&tree, &prefixes), false);
        assert_eq!(completer.complete(tree.root(), "root3 # r", 9).count(), 0);
        assert_eq!(completer.complete(tree.root(), "root3", 42).count(), 0);
        assert_eq!(completer.complete(tree.root(), "é", 1).count(), 0);
    }

    #[test]
    fn test_cursor_in_the_middle() {
        let tree = demo_tree();
        let prefixes = PrefixRegistry::default();
        let completer = Completer::new(Resolver::new(&tree, &prefixes), false);
        let names: Vec<_> = completer
            .complete(tree.root(), "level1A c whatever", 9)
            .map(|c| c.text)
            .collect();
        assert_eq!(names, vec!["command1", "command2"]);
    }

    #[test]
    fn test_stream_can_be_abandoned() {
        let tree = demo_tree();
        let prefixes = PrefixRegistry::default();
        let completer = Completer::new(Resolver::new(&tree, &prefixes), false);
        let mut stream = completer.complete(tree.root(), "", 0);
        assert_eq!(stream.next().map(|c| c.text), Some("root1".to_string()));
        drop(stream);
    }
}
