//! The `viscofrac_core` crate turns a linear fractional-order constitutive law into the
//! symbolic expressions used to characterise a viscoelastic material.
//!
//! An [`Equation`] holds two sides, each a sum of `coefficient * d^order/dt^order` terms
//! applied to one variable (typically strain and stress). The builders derive:
//! - **Governing equation**: the time-domain residual `left - right`.
//! - **Relaxation modulus**: `left(s) / (s * right(s))` in the Laplace domain.
//! - **Creep compliance**: `right(s) / (s * left(s))`.
//! - **Dynamic modulus**: `left(iω) / right(iω)` in the frequency domain.
//!
//! Supporting pieces: an expression AST with a small value parser, a configurable
//! [`Notation`], and a complex-valued bytecode VM for sampling frequency responses.

pub mod builders;
pub mod equation;
pub mod error;
pub mod evaluate;
pub mod expr;
pub mod models;
pub mod notation;
pub mod parser;
pub mod rewrite;
pub mod term;
pub mod traits;

pub use builders::{
    creep_compliance, dynamic_modulus, governing_equation, relaxation_modulus, ModulusBuilder,
};
pub use equation::{Equation, Side};
pub use error::ModelError;
pub use expr::Expr;
pub use notation::Notation;
pub use term::{Term, Value};
pub use traits::{DerivativeOperator, FractionalDerivative};
