// src/core/fuzzy.rs

//! Optional fuzzy overlay over exact completion candidates.
//!
//! The overlay only filters and reorders; candidate text, display and
//! metadata are passed through untouched.

use crate::core::completion::{Candidate, back};
use nucleo_matcher::{
    Config, Matcher, Utf32Str,
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
};
use std::fmt;

/// Case-insensitive subsequence matcher backed by nucleo.
pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl fmt::Debug for FuzzyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzyMatcher").finish_non_exhaustive()
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    /// Matcher with nucleo's default scoring.
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Sorted char indices of `haystack` matched by `pattern`, or `None`.
    pub fn match_indices(&mut self, pattern: &str, haystack: &str) -> Option<Vec<u32>> {
        if pattern.is_empty() {
            return Some(Vec::new());
        }
        let pat = Pattern::new(
            pattern,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut haystack_buf = Vec::new();
        let haystack_chars = Utf32Str::new(haystack, &mut haystack_buf);
        let mut indices = Vec::new();
        pat.indices(haystack_chars, &mut self.matcher, &mut indices)?;
        indices.sort_unstable();
        indices.dedup();
        Some(indices)
    }

    /// `(first matched index, span)`: earlier and tighter matches rank first.
    pub fn rank_key(&mut self, pattern: &str, haystack: &str) -> Option<(u32, u32)> {
        let indices = self.match_indices(pattern, haystack)?;
        match (indices.first(), indices.last()) {
            (Some(&first), Some(&last)) => Some((first, last - first)),
            _ => Some((0, 0)),
        }
    }
}

/// Keeps the candidates whose display matches `word`, best matches first,
/// ties in their original order. Replacing candidates are widened to also
/// cover `word`; placeholders insert nothing and keep their offset.
pub fn fuzzy_overlay(word: &str, candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    let mut matcher = FuzzyMatcher::new();
    let mut ranked: Vec<((u32, u32), Candidate)> = candidates
        .into_iter()
        .filter_map(|c| matcher.rank_key(word, &c.display).map(|key| (key, c)))
        .collect();
    ranked.sort_by_key(|(key, _)| *key);
    log::trace!("Fuzzy '{}' kept {} candidates", word, ranked.len());

    ranked
        .into_iter()
        .map(|(_, mut c)| {
            if !c.is_placeholder() {
                c.start_offset += back(word.len());
            }
            c
        })
        .collect()
}
