use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete program: the top-level forms in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level forms, each a list form (`Define`, `EmptyList` or `List`)
    pub forms: Vec<Expression>,
}

/// Identifier made of lowercase letters
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    /// Creates a symbol from its name
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    /// The symbol's name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expressions
///
/// Each node owns its children outright; trees are never shared or mutated
/// after the grammar builds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// Parenthesized sequence of one or more expressions: `(a 1 (b))`
    List(Vec<Expression>),

    /// The empty form `()`
    EmptyList,

    /// Integer literal
    Term(i64),

    /// Identifier
    Symbol(Symbol),

    /// Binding form: `(define (name) body)`
    Define {
        /// Name being bound
        parameter: Symbol,
        /// Bound body (a list)
        body: Box<Expression>,
    },

    /// Function form: `lambda name body`
    Lambda {
        /// Parameter name
        parameter: Symbol,
        /// Function body (a list)
        body: Box<Expression>,
    },
}

impl Expression {
    /// Creates a list node. Callers are responsible for passing at least one item.
    pub fn list(items: Vec<Expression>) -> Self {
        Expression::List(items)
    }

    /// Creates an integer literal
    pub fn term(value: i64) -> Self {
        Expression::Term(value)
    }

    /// Creates a symbol node
    pub fn symbol(name: impl Into<Symbol>) -> Self {
        Expression::Symbol(name.into())
    }

    /// Creates a `define` form
    pub fn define(parameter: impl Into<Symbol>, body: Expression) -> Self {
        Expression::Define {
            parameter: parameter.into(),
            body: Box::new(body),
        }
    }

    /// Creates a `lambda` form
    pub fn lambda(parameter: impl Into<Symbol>, body: Expression) -> Self {
        Expression::Lambda {
            parameter: parameter.into(),
            body: Box::new(body),
        }
    }

    pub fn as_list(&self) -> Option<&[Expression]> {
        match self {
            Expression::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_term(&self) -> Option<i64> {
        match self {
            Expression::Term(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Expression::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Expression::EmptyList)
    }

    /// Dispatches to the visitor method matching this node's variant
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expression::List(items) => visitor.visit_list(items),
            Expression::EmptyList => visitor.visit_empty_list(),
            Expression::Term(value) => visitor.visit_term(*value),
            Expression::Symbol(symbol) => visitor.visit_symbol(symbol),
            Expression::Define { parameter, body } => visitor.visit_define(parameter, body),
            Expression::Lambda { parameter, body } => visitor.visit_lambda(parameter, body),
        }
    }
}

/// Behavior over expression trees, one method per node kind.
///
/// Implementors decide whether and how to descend; call
/// [`Expression::accept`] on children to recurse.
pub trait Visitor {
    /// Value produced for each visited node
    type Output;

    /// Visit a non-empty list
    fn visit_list(&mut self, items: &[Expression]) -> Self::Output;

    /// Visit `()`
    fn visit_empty_list(&mut self) -> Self::Output;

    /// Visit an integer literal
    fn visit_term(&mut self, value: i64) -> Self::Output;

    /// Visit a symbol
    fn visit_symbol(&mut self, symbol: &Symbol) -> Self::Output;

    /// Visit a `define` form
    fn visit_define(&mut self, parameter: &Symbol, body: &Expression) -> Self::Output;

    /// Visit a `lambda` form
    fn visit_lambda(&mut self, parameter: &Symbol, body: &Expression) -> Self::Output;
}

/// Writes the canonical single-space rendering that the grammar reads back
struct Printer<'f, 'a> {
    f: &'f mut fmt::Formatter<'a>,
}

impl Visitor for Printer<'_, '_> {
    type Output = fmt::Result;

    fn visit_list(&mut self, items: &[Expression]) -> fmt::Result {
        self.f.write_str("(")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.f.write_str(" ")?;
            }
            item.accept(self)?;
        }
        self.f.write_str(")")
    }

    fn visit_empty_list(&mut self) -> fmt::Result {
        self.f.write_str("()")
    }

    fn visit_term(&mut self, value: i64) -> fmt::Result {
        write!(self.f, "{}", value)
    }

    fn visit_symbol(&mut self, symbol: &Symbol) -> fmt::Result {
        self.f.write_str(symbol.name())
    }

    fn visit_define(&mut self, parameter: &Symbol, body: &Expression) -> fmt::Result {
        write!(self.f, "(define ({}) ", parameter)?;
        body.accept(self)?;
        self.f.write_str(")")
    }

    fn visit_lambda(&mut self, parameter: &Symbol, body: &Expression) -> fmt::Result {
        write!(self.f, "lambda {} ", parameter)?;
        body.accept(self)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.accept(&mut Printer { f })
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, form) in self.forms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", form)?;
        }
        Ok(())
    }
}
