use crate::error::ModelError;
use crate::expr::Expr;
use crate::parser::parse;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coefficient or derivative order: a concrete number, a bare symbol, or a small
/// algebraic sub-expression over symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawValue")]
pub enum Value {
    Number(f64),
    Symbol(String),
    Expression(Expr),
}

// Wire form; `{"Number": 0}` lands in `Expression` until normalized.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Symbol(String),
    Expression(Expr),
}

impl From<RawValue> for Value {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Number(n) => Value::Number(n),
            RawValue::Symbol(name) => Value::Symbol(name),
            RawValue::Expression(expr) => Value::from(expr),
        }
    }
}

impl Value {
    /// Parses `"2"`, `"η"` or `"α+γ-β"` into the matching variant.
    pub fn parse(input: &str) -> Result<Self, ModelError> {
        parse(input).map(Value::from)
    }

    /// Collapses an `Expression` wrapping a bare number or name into its atomic variant.
    pub fn normalized(self) -> Self {
        match self {
            Value::Expression(expr) => Value::from(expr),
            atom => atom,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) | Value::Expression(Expr::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn to_expr(&self) -> Expr {
        match self {
            Value::Number(n) => Expr::Number(*n),
            Value::Symbol(name) => Expr::Variable(name.clone()),
            Value::Expression(expr) => expr.clone(),
        }
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        match expr {
            Expr::Number(n) => Value::Number(n),
            Expr::Variable(name) => Value::Symbol(name),
            other => Value::Expression(other),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(name: &str) -> Self {
        Value::Symbol(name.to_string())
    }
}

impl From<String> for Value {
    fn from(name: String) -> Self {
        Value::Symbol(name)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr())
    }
}

/// One `coefficient * d^order/dt^order` contribution to a side of an equation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    coefficient: Value,
    order: Value,
}

impl Term {
    pub fn new(coefficient: impl Into<Value>, order: impl Into<Value>) -> Self {
        Self {
            coefficient: coefficient.into().normalized(),
            order: order.into().normalized(),
        }
    }

    /// Builds a term from two value strings, e.g. `Term::parse("c_α", "α")`.
    pub fn parse(coefficient: &str, order: &str) -> Result<Self, ModelError> {
        Ok(Self::new(Value::parse(coefficient)?, Value::parse(order)?))
    }

    pub fn coefficient(&self) -> &Value {
        &self.coefficient
    }

    pub fn order(&self) -> &Value {
        &self.order
    }
}
