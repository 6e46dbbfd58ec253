use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit1};
use nom::combinator::{map_res, opt, recognize, verify};
use nom::multi::{many0_count, many1_count};
use nom::sequence::pair;
use nom::IResult;

use crate::error::RuleError;

/// Result of applying a rule to the remaining input
pub type PResult<'a, O> = IResult<&'a str, O, RuleError<'a>>;

/// Words the grammar recognizes structurally; never valid as symbols
pub const KEYWORDS: [&str; 2] = ["define", "lambda"];

/// Whether `name` is reserved by the grammar
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Exactly one literal space
pub fn space(input: &str) -> PResult<'_, char> {
    char(' ')(input)
}

/// One or more spaces
pub fn spaces(input: &str) -> PResult<'_, &str> {
    recognize(many1_count(space))(input)
}

/// Zero or more spaces
pub fn spaces0(input: &str) -> PResult<'_, &str> {
    recognize(many0_count(space))(input)
}

/// `(`
pub fn left_paren(input: &str) -> PResult<'_, char> {
    char('(')(input)
}

/// `)`
pub fn right_paren(input: &str) -> PResult<'_, char> {
    char(')')(input)
}

/// A reserved word, matched literally
pub fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    tag(word)
}

/// Decimal integer literal with an optional leading `-`.
///
/// Literals that do not fit in an `i64` fail the rule.
pub fn integer(input: &str) -> PResult<'_, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |digits: &str| {
        digits.parse::<i64>()
    })(input)
}

/// A run of lowercase ASCII letters that is not a keyword
pub fn symbol_name(input: &str) -> PResult<'_, &str> {
    verify(
        take_while1(|c: char| c.is_ascii_lowercase()),
        |name: &str| !is_keyword(name),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_matches_one() {
        assert_eq!(space("  x"), Ok((" x", ' ')));
        assert!(space("x").is_err());
        assert!(space("").is_err());
    }

    #[test]
    fn test_spaces_requires_one() {
        assert_eq!(spaces("   )"), Ok((")", "   ")));
        assert!(spaces(")").is_err());
        assert_eq!(spaces0(")"), Ok((")", "")));
    }

    #[test]
    fn test_tabs_are_not_spaces() {
        assert!(spaces("\t").is_err());
        assert_eq!(spaces0("\n"), Ok(("\n", "")));
    }

    #[test]
    fn test_parens() {
        assert_eq!(left_paren("(a"), Ok(("a", '(')));
        assert_eq!(right_paren(")"), Ok(("", ')')));
        assert!(left_paren(")").is_err());
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer("0"), Ok(("", 0)));
        assert_eq!(integer("123 "), Ok((" ", 123)));
        assert_eq!(integer("0042)"), Ok((")", 42)));
        assert_eq!(integer("-17"), Ok(("", -17)));
        assert_eq!(integer("9223372036854775807"), Ok(("", i64::MAX)));
        assert_eq!(integer("-9223372036854775808"), Ok(("", i64::MIN)));
    }

    #[test]
    fn test_integer_rejects() {
        assert!(integer("abc").is_err());
        assert!(integer("-").is_err());
        assert!(integer("+1").is_err());
        assert!(integer("9223372036854775808").is_err());
    }

    #[test]
    fn test_symbol_name() {
        assert_eq!(symbol_name("abc def"), Ok((" def", "abc")));
        assert_eq!(symbol_name("fib("), Ok(("(", "fib")));
        assert_eq!(symbol_name("ab1"), Ok(("1", "ab")));
        assert_eq!(symbol_name("definex"), Ok(("", "definex")));
    }

    #[test]
    fn test_symbol_name_rejects() {
        assert!(symbol_name("Abc").is_err());
        assert!(symbol_name("_x").is_err());
        assert!(symbol_name("1").is_err());
        assert!(symbol_name("define").is_err());
        assert!(symbol_name("lambda").is_err());
    }

    #[test]
    fn test_keyword() {
        assert_eq!(keyword("define")("define (x)"), Ok((" (x)", "define")));
        assert!(keyword("lambda")("lamb").is_err());
        assert!(is_keyword("define"));
        assert!(!is_keyword("defined"));
    }
}
