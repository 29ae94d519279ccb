// src/bin/cmdnav.rs

use anyhow::{Context, Result};
use clap::Parser;
use cmdnav::{
    cli::{Cli, demo, invoker::ClapInvoker},
    core::{config_loader::Config, tree::CommandTree},
    system::{repl, session::Session},
};
use cmdnav::t;
use colored::*;

/// Entry point: sets up logging, runs the prompt, and reports any fatal
/// error in one place.
fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if let Some(level) = cli.log_level_filter() {
        logger.filter_level(level);
    }
    logger.init();

    if let Err(e) = run_cli(cli) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let config = Config::discover(cli.config.as_deref()).context(t!("main.error.config"))?;
    let tree = CommandTree::build(&demo::demo_spec()).context(t!("main.error.tree"))?;

    let mut session = Session::from_config(tree, &config);
    if cli.no_fuzzy {
        session.set_fuzzy(false);
    }
    if let Some(start) = cli.start_at.as_deref() {
        session
            .set_path(start)
            .with_context(|| format!(t!("main.error.start_at"), path = start))?;
    }

    let mut invoker = ClapInvoker::new(demo::demo_command());
    repl::run_repl(session, &mut invoker)
}
