// src/cli/invoker.rs

use crate::cli::demo;
use crate::constants::{HELP_ARGS, PATH_SEPARATOR};
use crate::core::arg_builder::build_args;
use crate::core::help_display::{HelpFormatter, TreeHelpFormatter};
use crate::core::tree::{CommandTree, NodeId};
use crate::system::session::{InvocationError, Invoker};
use anyhow::{Context, anyhow};
use clap::Command;
use clap::error::ErrorKind;

/// Runs tree leaves through the clap command they were derived from.
#[derive(Debug)]
pub struct ClapInvoker<F: HelpFormatter = TreeHelpFormatter> {
    root: Command,
    formatter: F,
}

impl ClapInvoker {
    /// Invoker rendering help with [`TreeHelpFormatter`].
    pub fn new(root: Command) -> Self {
        Self::with_formatter(root, TreeHelpFormatter)
    }
}

impl<F: HelpFormatter> ClapInvoker<F> {
    /// Invoker rendering help with a custom formatter.
    pub fn with_formatter(root: Command, formatter: F) -> Self {
        Self { root, formatter }
    }

    fn find(&self, path: &str) -> Option<&Command> {
        path.split(PATH_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.root, |command, name| command.find_subcommand(name))
    }
}

impl<F: HelpFormatter> Invoker for ClapInvoker<F> {
    fn invoke(&mut self, tree: &CommandTree, node: NodeId, args: &str) -> Result<(), InvocationError> {
        let target = tree.node(node);
        let argv = build_args(target.params(), args)
            .with_context(|| format!(t!("invoke.error.arguments"), path = target.path))?;

        if argv.iter().any(|a| a == HELP_ARGS) {
            println!("{}", self.formatter.render(tree, node));
            return Ok(());
        }
        if target.is_group() {
            return Err(anyhow!(format!(t!("invoke.error.group"), path = target.path)).into());
        }

        let command = self
            .find(&target.path)
            .ok_or_else(|| anyhow!(format!(t!("invoke.error.unknown"), path = target.path)))?
            .clone()
            .no_binary_name(true);

        log::debug!("Invoking '{}' with {:?}", target.path, argv);
        let matches = match command.try_get_matches_from(&argv) {
            Ok(matches) => matches,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                println!("{}", self.formatter.render(tree, node));
                return Ok(());
            }
            Err(e) => return Err(anyhow::Error::from(e).into()),
        };

        demo::find_handler(&target.path)(&target.path, &matches).map_err(InvocationError::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::demo::{demo_command, demo_spec};

    fn setup() -> (ClapInvoker, CommandTree) {
        let tree = CommandTree::build(&demo_spec()).unwrap();
        (ClapInvoker::new(demo_command()), tree)
    }

    #[test]
    fn test_leaf_runs_with_translated_arguments() {
        let (mut invoker, tree) = setup();
        let root3 = tree.find("/root3").unwrap();
        assert!(invoker.invoke(&tree, root3, "opt-arg1=x flag1= --no-flag2").is_ok());
        let command3 = tree.find("/level1A/level2A/command3").unwrap();
        assert!(invoker.invoke(&tree, command3, "value opt-arg1=True").is_ok());
    }

    #[test]
    fn test_help_is_rendered_for_groups_and_leaves() {
        let (mut invoker, tree) = setup();
        let level1a = tree.find("/level1A").unwrap();
        assert!(invoker.invoke(&tree, level1a, "--help").is_ok());
        let root2 = tree.find("/root2").unwrap();
        assert!(invoker.invoke(&tree, root2, "-h").is_ok());
    }

    #[test]
    fn test_usage_errors_fail() {
        let (mut invoker, tree) = setup();
        let root2 = tree.find("/root2").unwrap();
        assert!(matches!(
            invoker.invoke(&tree, root2, ""),
            Err(InvocationError::Failed(_))
        ));
        assert!(matches!(
            invoker.invoke(&tree, root2, "\"unterminated"),
            Err(InvocationError::Failed(_))
        ));
        let level1a = tree.find("/level1A").unwrap();
        assert!(matches!(
            invoker.invoke(&tree, level1a, "extra"),
            Err(InvocationError::Failed(_))
        ));
    }
}
