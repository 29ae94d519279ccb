// src/core/arg_builder.rs

use crate::models::{ParamKind, ParamSpec};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    // `name=value` where `name` looks like an option identifier.
    static ref NAME_VALUE_RE: Regex = Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*)=(.*)$").unwrap();
}

/// Failure to split an argument string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgError {
    /// A quote was opened and never closed.
    #[error("Unbalanced quotes in arguments: {0}")]
    UnbalancedQuotes(String),
}

/// Splits an argument string with shell-like quoting.
pub fn split_args(args: &str) -> Result<Vec<String>, ArgError> {
    if args.trim().is_empty() {
        return Ok(Vec::new());
    }
    shlex::split(args).ok_or_else(|| ArgError::UnbalancedQuotes(args.to_string()))
}

/// Rewrites `name=value` tokens naming a declared option of the command into
/// `--name=value`, or `--name` when the value is empty. Everything else
/// passes through unchanged.
pub fn translate_args(params: &[ParamSpec], tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| translate_token(params, token))
        .collect()
}

fn translate_token(params: &[ParamSpec], token: String) -> String {
    rewrite_token(params, &token).unwrap_or(token)
}

fn rewrite_token(params: &[ParamSpec], token: &str) -> Option<String> {
    let caps = NAME_VALUE_RE.captures(token)?;
    let (name, value) = (caps.get(1)?.as_str(), caps.get(2)?.as_str());
    let param = params
        .iter()
        .find(|p| p.kind != ParamKind::Positional && (p.long_name() == name || p.name == name))?;
    if value.is_empty() {
        Some(format!("--{}", param.long_name()))
    } else {
        Some(format!("--{}={}", param.long_name(), value))
    }
}

/// Tokenizes and translates the residual argument string of a leaf.
pub fn build_args(params: &[ParamSpec], args: &str) -> Result<Vec<String>, ArgError> {
    let tokens = split_args(args)?;
    let translated = translate_args(params, tokens);
    log::debug!("Arguments '{}' translated to {:?}", args, translated);
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params() -> Vec<ParamSpec> {
        vec![
            ParamSpec::option("opt_arg1"),
            ParamSpec::flag("flag1"),
            ParamSpec::flag("flag2").long("no-flag2"),
            ParamSpec::positional("arg1"),
        ]
    }

    #[test]
    fn test_declared_options_are_rewritten() {
        let args = build_args(&params(), "opt-arg1=hello flag1= no-flag2=").unwrap();
        assert_eq!(args, vec!["--opt-arg1=hello", "--flag1", "--no-flag2"]);
    }

    #[test]
    fn test_identifier_spelling_is_accepted() {
        let args = build_args(&params(), "opt_arg1=x").unwrap();
        assert_eq!(args, vec!["--opt-arg1=x"]);
    }

    #[test]
    fn test_other_tokens_pass_through() {
        let args = build_args(&params(), "arg1=5 plain --flag1 'a b' unknown=1").unwrap();
        assert_eq!(args, vec!["arg1=5", "plain", "--flag1", "a b", "unknown=1"]);
    }

    #[test]
    fn test_quoted_values_keep_equals() {
        let args = build_args(&params(), r#"opt-arg1="a=b c""#).unwrap();
        assert_eq!(args, vec!["--opt-arg1=a=b c"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(build_args(&params(), "   ").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_unbalanced_quotes() {
        assert!(matches!(
            build_args(&params(), "'open"),
            Err(ArgError::UnbalancedQuotes(_))
        ));
    }
}
