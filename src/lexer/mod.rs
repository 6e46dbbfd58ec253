//! Lexical rules for the Lisp reader
//!
//! Character-level parsers that the grammar is composed from. There is no
//! separate token stream: each rule consumes directly from the source text.

mod primitives;

pub use primitives::{
    integer, is_keyword, keyword, left_paren, right_paren, space, spaces, spaces0, symbol_name,
    PResult, KEYWORDS,
};
