// src/system/line_editor.rs

//! Glue between [`Session`] and `rustyline`.
//!
//! The helper owns the session so the read loop can reach it through
//! `Editor::helper_mut` between two lines, while rustyline borrows it for
//! completion and prompt highlighting during a line.

use crate::core::completion::Candidate;
use crate::system::session::Session;
use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// One row of rustyline's completion menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// `text` (or the placeholder) followed by its description.
    pub display: String,
    /// Everything from the common start position up to the inserted text.
    pub replacement: String,
}

impl rustyline::completion::Candidate for MenuEntry {
    fn display(&self) -> &str {
        &self.display
    }

    fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Maps candidates with per-candidate start offsets onto rustyline's single
/// replacement start.
///
/// The start is the furthest point any candidate reaches back to; each
/// replacement re-inserts the bytes between that start and its own start.
pub fn menu_entries(line: &str, pos: usize, candidates: Vec<Candidate>) -> (usize, Vec<MenuEntry>) {
    let reach = candidates
        .iter()
        .map(|c| c.start_offset.unsigned_abs())
        .max()
        .unwrap_or(0)
        .min(pos);
    let start = pos - reach;

    let entries = candidates
        .into_iter()
        .filter_map(|c| {
            let own_start = pos.checked_sub(c.start_offset.unsigned_abs())?;
            let kept = line.get(start..own_start)?;
            let display = if c.meta.is_empty() {
                c.display
            } else {
                format!("{}  {}", c.display, c.meta)
            };
            Some(MenuEntry {
                display,
                replacement: format!("{}{}", kept, c.text),
            })
        })
        .collect();
    (start, entries)
}

/// rustyline helper backed by a navigation session.
#[derive(Debug)]
pub struct CmdnavHelper {
    session: Session,
}

impl CmdnavHelper {
    /// Helper owning `session`.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The session behind the prompt.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access between two lines.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}

impl Helper for CmdnavHelper {}

impl Completer for CmdnavHelper {
    type Candidate = MenuEntry;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<MenuEntry>)> {
        let candidates: Vec<Candidate> = self.session.complete(line, pos).collect();
        log::trace!("{} candidates for {:?} at {}", candidates.len(), line, pos);
        Ok(menu_entries(line, pos, candidates))
    }
}

impl Hinter for CmdnavHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CmdnavHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(&'s self, prompt: &'p str, default: bool) -> Cow<'b, str> {
        if default && prompt == self.session.prompt_text() {
            Cow::Owned(self.session.prompt_message())
        } else {
            Cow::Borrowed(prompt)
        }
    }
}

impl Validator for CmdnavHelper {}
