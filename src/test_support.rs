// src/test_support.rs

use crate::core::tree::CommandTree;
use crate::models::{CommandSpec, ParamSpec};

/// The reference command hierarchy shared by the unit tests.
///
/// ```text
/// /
/// ├─ root1
/// ├─ root2            <ARG1>
/// ├─ root3            opt-arg1= opt-arg2= --flag1 --no-flag2 --no-flag3
/// └─ level1A
///    ├─ command1      <ARG1> <ARG2> <ARG3> (hidden <ARG4>)
///    ├─ command2      deprecated
///    ├─ hidden_subcommand1  hidden
///    ├─ level2A
///    │  ├─ command3
///    │  └─ command4
///    └─ level2B       deprecated
///       ├─ command5
///       └─ command6   deprecated
/// ```
pub(crate) fn demo_spec() -> CommandSpec {
    CommandSpec::new("")
        .help("Application testing command navigation")
        .child(CommandSpec::new("root1").help("Root command 1"))
        .child(
            CommandSpec::new("root2")
                .help("Root command 2")
                .param(ParamSpec::positional("arg1").required()),
        )
        .child(
            CommandSpec::new("root3")
                .help("Root command 3")
                .param(
                    ParamSpec::option("opt_arg1")
                        .default_value("False")
                        .help("An optional arg"),
                )
                .param(ParamSpec::option("opt_arg2").help("A second optional arg"))
                .param(ParamSpec::flag("flag1").help("A flag option"))
                .param(
                    ParamSpec::flag("flag2")
                        .long("no-flag2")
                        .help("Another flag option"),
                )
                .param(
                    ParamSpec::flag("flag3")
                        .long("no-flag3")
                        .help("Yet another flag option"),
                ),
        )
        .child(
            CommandSpec::new("level1A")
                .help("Sub level 1")
                .child(
                    CommandSpec::new("command1")
                        .help("First command")
                        .param(ParamSpec::positional("arg1").required().help("The first arg"))
                        .param(
                            ParamSpec::positional("arg2")
                                .metavar("INTEGER")
                                .required()
                                .help("The second arg"),
                        )
                        .param(
                            ParamSpec::positional("arg3")
                                .metavar("INTEGER")
                                .required()
                                .help("The third arg"),
                        )
                        .param(
                            ParamSpec::positional("arg4")
                                .metavar("INTEGER")
                                .required()
                                .hidden()
                                .help("The fourth (hidden) arg"),
                        ),
                )
                .child(
                    CommandSpec::new("command2")
                        .help("Second command\n\nThis has\n\nmore\n\nlines")
                        .deprecated()
                        .param(
                            ParamSpec::option("opt_arg1")
                                .default_value("False")
                                .help("An optional arg"),
                        )
                        .param(
                            ParamSpec::option("opt_arg2")
                                .metavar("INTEGER")
                                .default_value("0")
                                .help("A second optional arg"),
                        )
                        .param(
                            ParamSpec::option("opt_arg3")
                                .metavar("INTEGER")
                                .default_value("0")
                                .hidden()
                                .help("An hidden optional arg"),
                        ),
                )
                .child(
                    CommandSpec::new("hidden_subcommand1")
                        .help("Hidden subcommand")
                        .hidden()
                        .param(ParamSpec::positional("arg1").required().help("The first arg"))
                        .param(ParamSpec::option("opt_arg1").help("An optional arg")),
                )
                .child(
                    CommandSpec::new("level2A")
                        .help("Sub level 2A")
                        .child(
                            CommandSpec::new("command3")
                                .help("Third command")
                                .param(ParamSpec::positional("arg1").required())
                                .param(ParamSpec::option("opt_arg1").default_value("False")),
                        )
                        .child(CommandSpec::new("command4").help("Fourth command")),
                )
                .child(
                    CommandSpec::new("level2B")
                        .help("Sub level 2B")
                        .deprecated()
                        .child(CommandSpec::new("command5").help("Fifth command"))
                        .child(
                            CommandSpec::new("command6")
                                .help("Sixth command")
                                .deprecated(),
                        ),
                ),
        )
}

pub(crate) fn demo_tree() -> CommandTree {
    match CommandTree::build(&demo_spec()) {
        Ok(tree) => tree,
        Err(e) => panic!("demo tree should build: {e}"),
    }
}
