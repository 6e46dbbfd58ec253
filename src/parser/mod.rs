//! Parser Module
//!
//! Reads Lisp source text into an abstract syntax tree using parser combinators.

mod ast;
mod grammar;

pub use ast::{Expression, Program, Symbol, Visitor};
pub use grammar::{Grammar, GrammarConfig, Rule};
