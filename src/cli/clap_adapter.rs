// src/cli/clap_adapter.rs

//! Turns a `clap::Command` hierarchy into the descriptors the navigation tree
//! is built from.

use crate::models::{CommandSpec, ParamSpec};
use clap::{Arg, Command};

/// Ids clap reserves for its own flags.
const RESERVED_IDS: [&str; 2] = ["help", "version"];

/// Describes `command` and all its subcommands. The root is anonymous.
///
/// Clap has no notion of deprecation; use [`CommandSpec::mark_deprecated`]
/// on the result.
pub fn spec_from_clap(command: &Command) -> CommandSpec {
    describe(command, "")
}

fn describe(command: &Command, name: &str) -> CommandSpec {
    let mut spec = CommandSpec::new(name);
    if let Some(help) = command.get_long_about().or_else(|| command.get_about()) {
        spec = spec.help(&help.to_string());
    }
    if command.is_hide_set() {
        spec = spec.hidden();
    }

    for arg in command.get_arguments() {
        if RESERVED_IDS.contains(&arg.get_id().as_str()) {
            continue;
        }
        spec = spec.param(describe_arg(arg));
    }

    for sub in command.get_subcommands() {
        if sub.get_name() == "help" {
            continue;
        }
        spec = spec.child(describe(sub, sub.get_name()));
    }
    spec
}

fn describe_arg(arg: &Arg) -> ParamSpec {
    let name = arg.get_id().as_str();
    let mut param = if arg.is_positional() {
        ParamSpec::positional(name)
    } else if arg.get_action().takes_values() {
        ParamSpec::option(name)
    } else {
        ParamSpec::flag(name)
    };

    // Only an explicit spelling is kept; the dashed id is the default.
    if let Some(long) = arg.get_long()
        && long != name.replace('_', "-")
    {
        param = param.long(long);
    }
    if let Some(metavar) = arg.get_value_names().and_then(|names| names.first()) {
        param = param.metavar(metavar.as_str());
    }
    if let Some(help) = arg.get_help() {
        param = param.help(&help.to_string());
    }
    // Flags get implicit defaults from their action; those are not shown.
    if arg.get_action().takes_values()
        && let Some(default) = arg.get_default_values().first()
    {
        param = param.default_value(&default.to_string_lossy());
    }
    if arg.is_required_set() {
        param = param.required();
    }
    if arg.is_hide_set() {
        param = param.hidden();
    }
    param
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParamKind;
    use clap::ArgAction;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_commands_keep_order_and_flags() {
        // --- Setup ---
        let command = Command::new("tool")
            .about("A tool")
            .subcommand(Command::new("b").about("B"))
            .subcommand(
                Command::new("a")
                    .hide(true)
                    .subcommand(Command::new("leaf").long_about("Leaf\n\nDetails")),
            );

        // --- Act ---
        let spec = spec_from_clap(&command);

        // --- Assert ---
        assert_eq!(spec.name, "");
        assert_eq!(spec.help.as_deref(), Some("A tool"));
        let names: Vec<_> = spec.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(spec.children[1].hidden);
        assert_eq!(
            spec.children[1].children[0].help.as_deref(),
            Some("Leaf\n\nDetails")
        );
    }

    #[test]
    fn test_argument_kinds() {
        let command = Command::new("leaf")
            .arg(Arg::new("path").required(true).value_name("FILE"))
            .arg(Arg::new("level").long("level").default_value("3"))
            .arg(Arg::new("dry_run").long("dry-run").action(ArgAction::SetTrue))
            .arg(
                Arg::new("color")
                    .long("no-color")
                    .action(ArgAction::SetFalse)
                    .help("Plain output"),
            );

        let params = spec_from_clap(&command).params;

        assert_eq!(params[0].kind, ParamKind::Positional);
        assert!(params[0].required);
        assert_eq!(params[0].metavar.as_deref(), Some("FILE"));

        assert_eq!(params[1].kind, ParamKind::Option);
        assert_eq!(params[1].default_value.as_deref(), Some("3"));
        assert_eq!(params[1].long, None);

        assert_eq!(params[2].kind, ParamKind::Flag);
        assert_eq!(params[2].long_name(), "dry-run");

        assert_eq!(params[3].long_name(), "no-color");
        assert_eq!(params[3].default_value, None);
        assert_eq!(params[3].help.as_deref(), Some("Plain output"));
    }
}
