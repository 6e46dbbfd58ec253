use nom::branch::alt;
use nom::combinator::{eof, map};
use nom::error::{context, ErrorKind};
use nom::multi::separated_list1;
use nom::Parser;

use super::ast::{Expression, Program, Symbol};
use crate::error::{Error, Result, RuleError};
use crate::lexer::{
    integer, keyword, left_paren, right_paren, spaces, spaces0, symbol_name, PResult,
};

/// Configuration for the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarConfig {
    /// Deepest form nesting accepted before the parse is abandoned (default: 64)
    pub max_depth: usize,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig { max_depth: 64 }
    }
}

/// Handle naming one rule of the grammar, for parsing input against it alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `(define (name) body)`
    Define,
    /// `lambda name body`
    Lambda,
    /// `()` with optional inner spaces
    EmptyList,
    /// Parenthesized, space-separated expressions
    List,
    /// Integer literal
    Term,
    /// Non-keyword lowercase identifier
    Symbol,
    /// Any of the above, tried in that order
    Expression,
}

/// The Lisp grammar: mutually recursive rules over the combinator engine.
///
/// Every rule is a pure function of its input. A failing rule hands back
/// `Err::Error` without consuming anything, so `alt` can retry the next
/// alternative from the same position.
///
/// # Example
///
/// ```rust
/// use combinator_lisp::{Expression, Grammar};
///
/// let program = Grammar::new().parse_program("(a b c)").unwrap();
/// assert_eq!(
///     program.forms,
///     vec![Expression::list(vec![
///         Expression::symbol("a"),
///         Expression::symbol("b"),
///         Expression::symbol("c"),
///     ])]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Grammar {
    config: GrammarConfig,
}

impl Grammar {
    /// Creates a grammar with the default configuration
    pub fn new() -> Self {
        Grammar::default()
    }

    /// Creates a grammar with a custom configuration
    pub fn with_config(config: GrammarConfig) -> Self {
        Grammar { config }
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Parses a whole program: one or more top-level list forms separated by
    /// spaces, consuming the entire input.
    pub fn parse_program(&self, source: &str) -> Result<Program> {
        tracing::debug!(len = source.len(), "parsing program");

        match self.program(source) {
            Ok((_, forms)) => {
                tracing::debug!(forms = forms.len(), "parsed program");
                Ok(Program { forms })
            }
            Err(err) => {
                let err = Self::failure(source, err);
                tracing::debug!(
                    offset = err.offset(),
                    expected = err.expected(),
                    "program parse failed"
                );
                Err(err)
            }
        }
    }

    /// Parses `source` against a single rule, which must consume all of it
    pub fn parse_rule(&self, rule: Rule, source: &str) -> Result<Expression> {
        tracing::trace!(?rule, "parsing rule");

        let result = match rule {
            Rule::Define => Self::whole(source, |i| self.define(i, 0)),
            Rule::Lambda => Self::whole(source, |i| self.lambda(i, 0)),
            Rule::EmptyList => Self::whole(source, empty_list),
            Rule::List => Self::whole(source, |i| self.list(i, 0)),
            Rule::Term => Self::whole(source, term),
            Rule::Symbol => Self::whole(source, symbol),
            Rule::Expression => Self::whole(source, |i| self.expression(i, 0)),
        };

        result.map_err(|err| Self::failure(source, err))
    }

    fn whole<'a, F>(
        source: &'a str,
        rule: F,
    ) -> std::result::Result<Expression, nom::Err<RuleError<'a>>>
    where
        F: FnMut(&'a str) -> PResult<'a, Expression>,
    {
        let (_, (expr, _)) = rule.and(context("end of input", eof)).parse(source)?;
        Ok(expr)
    }

    fn failure(source: &str, err: nom::Err<RuleError<'_>>) -> Error {
        match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => e.into_error(source),
            // Complete parsers never ask for more input
            nom::Err::Incomplete(_) => Error::parse_failure(source, "", "more input"),
        }
    }

    /// `form (sp+ form)* EOF`
    fn program<'a>(&self, input: &'a str) -> PResult<'a, Vec<Expression>> {
        let (input, forms) = separated_list1(spaces, |i| self.top_level_form(i))(input)?;
        let (input, _) = context("end of input", eof)(input)?;
        Ok((input, forms))
    }

    /// The parenthesized forms allowed at top level
    fn top_level_form<'a>(&self, input: &'a str) -> PResult<'a, Expression> {
        alternatives(
            "top-level form",
            alt((|i| self.define(i, 0), empty_list, |i| self.list(i, 0))),
        )(input)
    }

    /// The full alternative set, in priority order
    fn expression<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, Expression> {
        self.check_depth(input, depth)?;

        alternatives(
            "expression",
            alt((
                |i| self.define(i, depth),
                |i| self.lambda(i, depth),
                empty_list,
                |i| self.list(i, depth),
                term,
                symbol,
            )),
        )(input)
    }

    /// `( sp* define sp* ( sp* symbol sp* ) sp* list sp* )`
    fn define<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, Expression> {
        context("define", |input: &'a str| -> PResult<'a, Expression> {
            let (input, _) = left_paren(input)?;
            let (input, _) = spaces0(input)?;
            let (input, _) = keyword("define")(input)?;
            let (input, _) = spaces0(input)?;
            let (input, _) = left_paren(input)?;
            let (input, _) = spaces0(input)?;
            let (input, parameter) = symbol_name(input)?;
            let (input, _) = spaces0(input)?;
            let (input, _) = right_paren(input)?;
            let (input, _) = spaces0(input)?;
            let (input, body) = self.list(input, depth + 1)?;
            let (input, _) = spaces0(input)?;
            let (input, _) = right_paren(input)?;
            Ok((input, Expression::define(parameter, body)))
        })(input)
    }

    /// `lambda sp+ symbol sp+ list`
    fn lambda<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, Expression> {
        context("lambda", |input: &'a str| -> PResult<'a, Expression> {
            let (input, _) = keyword("lambda")(input)?;
            let (input, _) = spaces(input)?;
            let (input, parameter) = symbol_name(input)?;
            let (input, _) = spaces(input)?;
            let (input, body) = self.list(input, depth + 1)?;
            Ok((input, Expression::lambda(parameter, body)))
        })(input)
    }

    /// `( sp* expr (sp+ expr)* sp* )`
    fn list<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, Expression> {
        self.check_depth(input, depth)?;

        context("list", |input: &'a str| -> PResult<'a, Expression> {
            let (input, _) = left_paren(input)?;
            let (input, _) = spaces0(input)?;
            let (input, items) =
                separated_list1(spaces, |i| self.expression(i, depth + 1))(input)?;
            let (input, _) = spaces0(input)?;
            let (input, _) = right_paren(input)?;
            Ok((input, Expression::list(items)))
        })(input)
    }

    fn check_depth<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, ()> {
        if depth > self.config.max_depth {
            return Err(nom::Err::Failure(RuleError::in_rule(
                input,
                ErrorKind::TooLarge,
                "nesting within depth limit",
            )));
        }
        Ok((input, ()))
    }
}

/// `( sp* )`
fn empty_list<'a>(input: &'a str) -> PResult<'a, Expression> {
    context("empty list", |input: &'a str| -> PResult<'a, Expression> {
        let (input, _) = left_paren(input)?;
        let (input, _) = spaces0(input)?;
        let (input, _) = right_paren(input)?;
        Ok((input, Expression::EmptyList))
    })(input)
}

fn term(input: &str) -> PResult<'_, Expression> {
    context("term", map(integer, Expression::term))(input)
}

fn symbol(input: &str) -> PResult<'_, Expression> {
    context("symbol", map(symbol_name, |name| Expression::Symbol(Symbol::new(name))))(input)
}

/// Names an alternative set in the failure when none of its alternatives
/// got past the starting position.
fn alternatives<'a, O, F>(set: &'static str, mut rules: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: Parser<&'a str, O, RuleError<'a>>,
{
    move |input: &'a str| {
        rules.parse(input).map_err(|err| match err {
            nom::Err::Error(mut e) if e.input.len() == input.len() => {
                e.rule = Some(set);
                nom::Err::Error(e)
            }
            other => other,
        })
    }
}
