use thiserror::Error;

/// Errors raised while building, folding, parsing or evaluating constitutive-law expressions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("unknown side '{variable}': equation relates '{left}' and '{right}'")]
    UnknownSide {
        variable: String,
        left: String,
        right: String,
    },
    #[error("both sides of an equation use the variable '{0}'")]
    DuplicateVariable(String),
    #[error("side variable names must not be empty")]
    EmptyVariable,
    #[error("cannot build expression from an empty term set (side '{0}')")]
    EmptySide(String),
    #[error("unsupported derivative order: {0}")]
    UnsupportedOrder(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unbound symbol '{0}'")]
    UnboundSymbol(String),
    #[error("cannot evaluate fractional derivative call '{0}' numerically")]
    UnevaluatedDerivative(String),
    #[error("malformed bytecode: stack underflow")]
    MalformedProgram,
}
