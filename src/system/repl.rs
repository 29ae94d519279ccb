// src/system/repl.rs

use crate::system::line_editor::CmdnavHelper;
use crate::system::session::{Invoker, Session, TurnOutcome};
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

/// Runs the interactive loop until end-of-input or an interrupt.
pub fn run_repl(session: Session, invoker: &mut dyn Invoker) -> Result<()> {
    let mut editor: Editor<CmdnavHelper, DefaultHistory> =
        Editor::new().context("Failed to initialize the line editor")?;
    editor.set_helper(Some(CmdnavHelper::new(session)));

    println!("{}", t!("repl.welcome").bold());

    loop {
        let prompt = editor
            .helper()
            .map(|h| h.session().prompt_text())
            .unwrap_or_default();

        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                log::debug!("Input closed, leaving the prompt");
                break;
            }
            Err(e) => return Err(anyhow!(e).context(t!("repl.error.readline"))),
        };

        if !line.trim().is_empty()
            && let Err(e) = editor.add_history_entry(line.as_str())
        {
            log::warn!("Could not add history entry: {}", e);
        }

        let Some(helper) = editor.helper_mut() else {
            break;
        };
        let outcome = helper.session_mut().submit(&line, invoker);
        if outcome != TurnOutcome::Empty {
            log::trace!("Turn outcome: {:?}", outcome);
        }
    }

    println!("{}", t!("repl.goodbye").dimmed());
    Ok(())
}
