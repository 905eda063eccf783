use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract Syntax Tree nodes for symbolic expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Binary(Box<Expr>, char, Box<Expr>), // char is operator +, -, *, /, ^
    Unary(char, Box<Expr>),             // only '-'
    Call(String, Vec<Expr>),            // opaque operators such as D(x, α)
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    /// True for the numeric literal `1` and nothing else.
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Number(n) if *n == 1.0)
    }

    /// True if any node in the tree is a `Call`.
    pub fn contains_call(&self) -> bool {
        match self {
            Expr::Number(_) | Expr::Variable(_) => false,
            Expr::Binary(left, _, right) => left.contains_call() || right.contains_call(),
            Expr::Unary(_, operand) => operand.contains_call(),
            Expr::Call(..) => true,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(_, '+', _) | Expr::Binary(_, '-', _) => 1,
            Expr::Binary(_, '*', _) | Expr::Binary(_, '/', _) => 2,
            Expr::Unary(..) => 3,
            Expr::Number(n) if n.is_sign_negative() => 3,
            Expr::Binary(_, '^', _) => 4,
            Expr::Binary(..) => 0,
            Expr::Number(_) | Expr::Variable(_) | Expr::Call(..) => 5,
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Number(value)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Variable(name.to_string())
    }
}

// --- Combinators ---

/// `a + b`, built as-is.
pub fn sum(a: Expr, b: Expr) -> Expr {
    Expr::Binary(Box::new(a), '+', Box::new(b))
}

/// `a * b`, dropping a literal `1` on either side (checked on `a` first).
pub fn product(a: Expr, b: Expr) -> Expr {
    if a.is_one() {
        return b;
    }
    if b.is_one() {
        return a;
    }
    Expr::Binary(Box::new(a), '*', Box::new(b))
}

pub fn difference(a: Expr, b: Expr) -> Expr {
    Expr::Binary(Box::new(a), '-', Box::new(b))
}

pub fn quotient(a: Expr, b: Expr) -> Expr {
    Expr::Binary(Box::new(a), '/', Box::new(b))
}

pub fn power(base: Expr, exponent: Expr) -> Expr {
    Expr::Binary(Box::new(base), '^', Box::new(exponent))
}

// --- Rendering ---

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Unary(op, operand) => {
                write!(f, "{op}")?;
                write_operand(f, operand, operand.precedence() < 4)
            }
            Expr::Binary(left, op, right) => {
                let own = self.precedence();
                let (left_parens, right_parens) = match op {
                    '^' => (left.precedence() <= own, right.precedence() < own),
                    '-' | '/' => (left.precedence() < own, right.precedence() <= own),
                    _ => (left.precedence() < own, right.precedence() < own),
                };
                write_operand(f, left, left_parens)?;
                match op {
                    '+' | '-' => write!(f, " {op} ")?,
                    _ => write!(f, "{op}")?,
                }
                write_operand(f, right, right_parens)
            }
            Expr::Call(name, args) => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
