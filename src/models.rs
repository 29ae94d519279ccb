// src/models.rs

use serde::{Deserialize, Serialize};

// --- COMMAND DESCRIPTORS ---
// These are supplied by the host's command-definition layer (see `cli::clap_adapter`)
// and are never mutated by the navigation core.

/// How a parameter is spelled on the command line.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A boolean switch, e.g. `--force`.
    Flag,
    /// A named option that takes a value, e.g. `--depth=3`.
    #[default]
    Option,
    /// A value identified by its position.
    Positional,
}

/// Declares one parameter of a leaf command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ParamSpec {
    /// Identifier of the parameter (e.g. `opt_arg1`).
    pub name: String,
    /// Flag, option or positional.
    pub kind: ParamKind,
    /// Spelling of the option without leading dashes (e.g. `opt-arg1`, `no-flag2`).
    /// Derived from `name` when absent.
    pub long: Option<String>,
    /// Value placeholder shown in completion metadata (e.g. `TEXT`, `INTEGER`).
    pub metavar: Option<String>,
    /// Help text; the first line is the summary.
    pub help: Option<String>,
    /// Shown in completion metadata.
    pub default_value: Option<String>,
    /// Must be given on invocation.
    pub required: bool,
    /// Never offered by completion.
    pub hidden: bool,
    /// Flagged in completion metadata.
    pub deprecated: bool,
}

impl ParamSpec {
    fn with_kind(name: &str, kind: ParamKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            ..Default::default()
        }
    }

    /// A boolean switch.
    pub fn flag(name: &str) -> Self {
        Self::with_kind(name, ParamKind::Flag)
    }

    /// A named option taking a value.
    pub fn option(name: &str) -> Self {
        Self::with_kind(name, ParamKind::Option)
    }

    /// A positional argument.
    pub fn positional(name: &str) -> Self {
        Self::with_kind(name, ParamKind::Positional)
    }

    /// Explicit spelling; leading dashes are dropped.
    pub fn long(mut self, long: &str) -> Self {
        self.long = Some(long.trim_start_matches('-').to_string());
        self
    }

    /// Value placeholder.
    pub fn metavar(mut self, metavar: &str) -> Self {
        self.metavar = Some(metavar.to_string());
        self
    }

    /// Help text.
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Default value.
    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    /// Marks as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Hides from completion.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Marks as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// The option name as typed, without dashes.
    ///
    /// Without an explicit spelling, a flag that defaults to on is spelled
    /// `no-<name>`, since passing it can only turn it off.
    pub fn long_name(&self) -> String {
        if let Some(long) = &self.long {
            return long.clone();
        }
        let dashed = self.name.replace('_', "-");
        if self.kind == ParamKind::Flag && self.defaults_on() {
            format!("no-{}", dashed)
        } else {
            dashed
        }
    }

    fn defaults_on(&self) -> bool {
        self.default_value
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// Declares a command or a command group.
///
/// A descriptor with at least one child is a group; otherwise it is a leaf
/// command and its `params` describe what it accepts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CommandSpec {
    /// Name as typed. Empty for the root.
    pub name: String,
    /// Help text; the first line is the summary.
    pub help: Option<String>,
    /// Reachable by exact name only.
    pub hidden: bool,
    /// Flagged in listings.
    pub deprecated: bool,
    /// Declaration order is preserved all the way to completion output.
    pub children: Vec<CommandSpec>,
    /// Parameters of a leaf.
    pub params: Vec<ParamSpec>,
}

impl CommandSpec {
    /// Empty command named `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Help text.
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Hides from listings.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Marks as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Appends a subcommand.
    pub fn child(mut self, child: CommandSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a parameter.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Whether this describes a group.
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    /// Marks the descendant at `path` as deprecated. Returns `false` if no such
    /// descendant exists.
    pub fn mark_deprecated(&mut self, path: &[&str]) -> bool {
        match path.split_first() {
            None => {
                self.deprecated = true;
                true
            }
            Some((first, rest)) => self
                .children
                .iter_mut()
                .find(|c| c.name == *first)
                .is_some_and(|c| c.mark_deprecated(rest)),
        }
    }
}

/// First non-empty line of a help text, trimmed.
pub fn help_summary(help: Option<&str>) -> &str {
    help.and_then(|h| h.lines().map(str::trim).find(|l| !l.is_empty()))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_name_defaults_to_dashed_identifier() {
        assert_eq!(ParamSpec::option("opt_arg1").long_name(), "opt-arg1");
        assert_eq!(ParamSpec::flag("flag2").long("--no-flag2").long_name(), "no-flag2");
    }

    #[test]
    fn test_flag_defaulting_on_is_spelled_negated() {
        assert_eq!(ParamSpec::flag("flag2").default_value("True").long_name(), "no-flag2");
        assert_eq!(ParamSpec::flag("dry_run").default_value("false").long_name(), "dry-run");
        assert_eq!(ParamSpec::option("opt_arg1").default_value("True").long_name(), "opt-arg1");
        // An explicit spelling always wins.
        assert_eq!(
            ParamSpec::flag("color").default_value("true").long("color").long_name(),
            "color"
        );
    }

    #[test]
    fn test_mark_deprecated_walks_path() {
        let mut spec = CommandSpec::new("")
            .child(CommandSpec::new("a").child(CommandSpec::new("b")));
        assert!(spec.mark_deprecated(&["a", "b"]));
        assert!(spec.children[0].children[0].deprecated);
        assert!(!spec.children[0].deprecated);
        assert!(!spec.mark_deprecated(&["a", "missing"]));
    }

    #[test]
    fn test_help_summary_takes_first_non_empty_line() {
        assert_eq!(help_summary(Some("\n  Second command  \n\nmore")), "Second command");
        assert_eq!(help_summary(None), "");
    }
}
