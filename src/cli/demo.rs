// src/cli/demo.rs

//! The bundled demonstration command set, declared with clap.

use crate::cli::clap_adapter::spec_from_clap;
use crate::models::CommandSpec;
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;

/// Runs a demo leaf once its arguments have been parsed.
pub type Handler = fn(&str, &ArgMatches) -> Result<()>;

struct HandlerDefinition {
    path: &'static str,
    handler: Handler,
}

/// Leaves with a dedicated handler. Every other leaf reports its matches.
static HANDLER_REGISTRY: &[HandlerDefinition] = &[
    HandlerDefinition {
        path: "/root1",
        handler: greet,
    },
    HandlerDefinition {
        path: "/root2",
        handler: echo_argument,
    },
];

/// Handler for the leaf at `path`.
pub fn find_handler(path: &str) -> Handler {
    HANDLER_REGISTRY
        .iter()
        .find(|def| def.path == path)
        .map_or(report_matches as Handler, |def| def.handler)
}

fn greet(path: &str, _matches: &ArgMatches) -> Result<()> {
    println!("{}", format!(t!("demo.greet"), path = path.cyan()));
    Ok(())
}

fn echo_argument(_path: &str, matches: &ArgMatches) -> Result<()> {
    if let Some(value) = matches.get_one::<String>("arg1") {
        println!("{}", value);
    }
    Ok(())
}

fn report_matches(path: &str, matches: &ArgMatches) -> Result<()> {
    println!("{}", format!(t!("demo.invoked"), path = path.cyan()));
    for id in matches.ids() {
        let values: Vec<String> = matches
            .try_get_raw(id.as_str())?
            .map(|raw| raw.map(|v| v.to_string_lossy().into_owned()).collect())
            .unwrap_or_default();
        println!("  {} = {}", id.as_str().bold(), values.join(" "));
    }
    Ok(())
}

fn integer(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).value_name("INTEGER").required(true).help(help)
}

/// The demonstration hierarchy as a clap command.
pub fn demo_command() -> Command {
    let root3 = Command::new("root3")
        .about("Root command 3")
        .arg(
            Arg::new("opt_arg1")
                .long("opt-arg1")
                .default_value("False")
                .help("An optional arg"),
        )
        .arg(Arg::new("opt_arg2").long("opt-arg2").help("A second optional arg"))
        .arg(
            Arg::new("flag1")
                .long("flag1")
                .action(ArgAction::SetTrue)
                .help("A flag option"),
        )
        .arg(
            Arg::new("flag2")
                .long("no-flag2")
                .action(ArgAction::SetFalse)
                .help("Another flag option"),
        )
        .arg(
            Arg::new("flag3")
                .long("no-flag3")
                .action(ArgAction::SetFalse)
                .help("Yet another flag option"),
        );

    let command1 = Command::new("command1")
        .about("First command")
        .arg(Arg::new("arg1").required(true).help("The first arg"))
        .arg(integer("arg2", "The second arg"))
        .arg(integer("arg3", "The third arg"))
        .arg(integer("arg4", "The fourth (hidden) arg").hide(true));

    let command2 = Command::new("command2")
        .about("Second command")
        .long_about("Second command\n\nThis has\n\nmore\n\nlines")
        .arg(
            Arg::new("opt_arg1")
                .long("opt-arg1")
                .default_value("False")
                .help("An optional arg"),
        )
        .arg(
            Arg::new("opt_arg2")
                .long("opt-arg2")
                .value_name("INTEGER")
                .default_value("0")
                .help("A second optional arg"),
        )
        .arg(
            Arg::new("opt_arg3")
                .long("opt-arg3")
                .value_name("INTEGER")
                .default_value("0")
                .hide(true)
                .help("An hidden optional arg"),
        );

    let hidden = Command::new("hidden_subcommand1")
        .about("Hidden subcommand")
        .hide(true)
        .arg(Arg::new("arg1").required(true).help("The first arg"))
        .arg(Arg::new("opt_arg1").long("opt-arg1").help("An optional arg"));

    let level2a = Command::new("level2A")
        .about("Sub level 2A")
        .subcommand(
            Command::new("command3")
                .about("Third command")
                .arg(Arg::new("arg1").required(true))
                .arg(Arg::new("opt_arg1").long("opt-arg1").default_value("False")),
        )
        .subcommand(Command::new("command4").about("Fourth command"));

    let level2b = Command::new("level2B")
        .about("Sub level 2B")
        .subcommand(Command::new("command5").about("Fifth command"))
        .subcommand(Command::new("command6").about("Sixth command"));

    Command::new("cmdnav")
        .about("Application testing command navigation")
        .subcommand(Command::new("root1").about("Root command 1"))
        .subcommand(
            Command::new("root2")
                .about("Root command 2")
                .arg(Arg::new("arg1").required(true)),
        )
        .subcommand(root3)
        .subcommand(
            Command::new("level1A")
                .about("Sub level 1")
                .subcommand(command1)
                .subcommand(command2)
                .subcommand(hidden)
                .subcommand(level2a)
                .subcommand(level2b),
        )
}

/// Descriptor of [`demo_command`], with its deprecated commands marked.
pub fn demo_spec() -> CommandSpec {
    let mut spec = spec_from_clap(&demo_command());
    for path in [
        &["level1A", "command2"][..],
        &["level1A", "level2B"],
        &["level1A", "level2B", "command6"],
    ] {
        if !spec.mark_deprecated(path) {
            log::warn!("No demo command at {:?}", path);
        }
    }
    spec
}
