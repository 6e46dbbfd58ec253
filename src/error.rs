//! Error types for the Lisp reader

use nom::error::{ContextError, ErrorKind, FromExternalError, ParseError};
use thiserror::Error;

/// Reader errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input does not match the grammar
    ///
    /// **Triggered by:** Unbalanced parentheses, characters outside the grammar,
    /// trailing input after the last top-level form
    /// **Example:** `(a b` (missing closing parenthesis), `(a) %` (trailing garbage)
    #[error("Parse failed at line {line}, column {col}: expected {expected}")]
    ParseFailure {
        /// Byte offset reached before the failure
        offset: usize,
        /// Line number where the failure occurred (1-based)
        line: usize,
        /// Column number where the failure occurred (1-based)
        col: usize,
        /// Name of the rule or alternative set that was exhausted
        expected: &'static str,
    },
}

impl Error {
    /// Build a failure for `source`, reached with `remaining` input left over
    pub(crate) fn parse_failure(source: &str, remaining: &str, expected: &'static str) -> Self {
        let offset = source.len().saturating_sub(remaining.len());
        let consumed = &source[..offset];
        let line = consumed.matches('\n').count() + 1;
        let col = match consumed.rfind('\n') {
            Some(newline) => consumed[newline + 1..].chars().count() + 1,
            None => consumed.chars().count() + 1,
        };

        Error::ParseFailure {
            offset,
            line,
            col,
            expected,
        }
    }

    /// Byte offset at which parsing stopped
    pub fn offset(&self) -> usize {
        match self {
            Error::ParseFailure { offset, .. } => *offset,
        }
    }

    /// Name of the rule that could not be matched
    pub fn expected(&self) -> &'static str {
        match self {
            Error::ParseFailure { expected, .. } => *expected,
        }
    }
}

/// Result type for reader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Rule-level failure threaded through the combinators.
///
/// Alternation keeps whichever failure got furthest into the input, and the
/// innermost named rule wins, so the final error points at the deepest place
/// the grammar could reach.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleError<'a> {
    /// Input remaining where the failure occurred
    pub input: &'a str,
    /// Primitive combinator that failed
    pub kind: ErrorKind,
    /// Innermost named rule enclosing the failure
    pub rule: Option<&'static str>,
}

impl<'a> RuleError<'a> {
    pub(crate) fn in_rule(input: &'a str, kind: ErrorKind, rule: &'static str) -> Self {
        RuleError {
            input,
            kind,
            rule: Some(rule),
        }
    }

    /// Convert into the public error, given the full source text
    pub(crate) fn into_error(self, source: &str) -> Error {
        Error::parse_failure(source, self.input, self.rule.unwrap_or("valid input"))
    }
}

impl<'a> ParseError<&'a str> for RuleError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        RuleError {
            input,
            kind,
            rule: None,
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        // Less input remaining means that alternative progressed further
        if other.input.len() <= self.input.len() {
            other
        } else {
            self
        }
    }
}

impl<'a> ContextError<&'a str> for RuleError<'a> {
    fn add_context(_input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        if other.rule.is_none() {
            other.rule = Some(ctx);
        }
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for RuleError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        Self::from_error_kind(input, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_position_single_line() {
        let source = "(a b";
        let err = Error::parse_failure(source, "", "list");
        assert_eq!(
            err,
            Error::ParseFailure {
                offset: 4,
                line: 1,
                col: 5,
                expected: "list",
            }
        );
        assert_eq!(
            err.to_string(),
            "Parse failed at line 1, column 5: expected list"
        );
    }

    #[test]
    fn test_failure_position_after_newline() {
        let source = "(a)\n(b %";
        let err = Error::parse_failure(source, "%", "list");
        assert_eq!(err.offset(), 7);
        let Error::ParseFailure { line, col, .. } = err;
        assert_eq!(line, 2);
        assert_eq!(col, 4);
    }

    #[test]
    fn test_or_keeps_furthest_failure() {
        let source = "(define (1) (a))";
        let near = RuleError::from_error_kind(&source[1..], ErrorKind::Char);
        let far = RuleError::from_error_kind(&source[9..], ErrorKind::TakeWhile1);
        assert_eq!(near.clone().or(far.clone()), far);
        assert_eq!(far.clone().or(near), far);
    }

    #[test]
    fn test_innermost_context_wins() {
        let leaf = RuleError::from_error_kind("x", ErrorKind::Tag);
        let inner = RuleError::add_context("x", "symbol", leaf);
        let outer = RuleError::add_context("(x", "list", inner);
        assert_eq!(outer.rule, Some("symbol"));
    }
}
