//! # combinator-lisp - A Lisp reader built from parser combinators
//!
//! Reads a small Lisp dialect into a typed abstract syntax tree. The grammar is
//! a handful of mutually recursive rules composed with [`nom`]: ordered
//! alternation with full backtracking, repetition, and separated sequences.
//!
//! Only reading is covered. There is no evaluator; consumers walk the tree
//! with pattern matching or a [`Visitor`].
//!
//! ## Quick Start
//!
//! ```rust
//! use combinator_lisp::{parse, Expression, Result};
//!
//! # fn main() -> Result<()> {
//! let program = parse("(define (x) (y)) (1 2 3)")?;
//!
//! assert_eq!(
//!     program.forms[0],
//!     Expression::define("x", Expression::list(vec![Expression::symbol("y")]))
//! );
//! assert_eq!(
//!     program.forms[1],
//!     Expression::list(vec![
//!         Expression::term(1),
//!         Expression::term(2),
//!         Expression::term(3),
//!     ])
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Integers**: `42`, `-7`
//! - **Symbols**: runs of lowercase letters, except the keywords `define` and `lambda`
//! - **Lists**: `(a 1 (b))`, items separated by one or more spaces
//! - **Empty list**: `()`, `( )`
//! - **Definitions**: `(define (name) (body ...))`
//! - **Functions**: `lambda name (body ...)`
//!
//! A program is one or more parenthesized forms separated by spaces. The whole
//! input must be consumed; anything left over is a parse failure.
//!
//! ## Error Handling
//!
//! ```rust
//! use combinator_lisp::{parse, Error};
//!
//! match parse("(a b") {
//!     Ok(_) => panic!("Should have failed"),
//!     Err(Error::ParseFailure { offset, expected, .. }) => {
//!         assert_eq!(offset, 4);
//!         assert_eq!(expected, "list");
//!     }
//! }
//! ```
//!
//! ## Single Rules
//!
//! Each grammar rule can be run on its own through [`Grammar::parse_rule`]:
//!
//! ```rust
//! use combinator_lisp::{Expression, Grammar, Rule};
//!
//! let grammar = Grammar::new();
//! assert_eq!(grammar.parse_rule(Rule::Term, "123").unwrap(), Expression::term(123));
//! assert!(grammar.parse_rule(Rule::Symbol, "lambda").is_err());
//! ```

/// Version of the reader
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;

// Re-export main types
pub use error::{Error, Result};
pub use parser::{Expression, Grammar, GrammarConfig, Program, Rule, Symbol, Visitor};

/// Parses `source` as a program with the default grammar configuration
pub fn parse(source: &str) -> Result<Program> {
    Grammar::new().parse_program(source)
}
