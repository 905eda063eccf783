//! Reference constitutive laws relating strain `ε` (left) to stress `σ` (right).

use crate::equation::Equation;
use crate::error::ModelError;
use crate::expr::{difference, product, quotient, sum, Expr};
use crate::term::{Term, Value};

pub const STRAIN: &str = "ε";
pub const STRESS: &str = "σ";

/// Spring `k` and dashpot `η` in series: `η dε/dt = k σ + η dσ/dt`.
pub fn single_relaxation() -> Result<Equation, ModelError> {
    let mut equation = Equation::new(STRAIN, STRESS)?;
    equation.insert(STRAIN, Term::new("η", 1))?;
    equation.insert_all(STRESS, [Term::new("k", 0), Term::new("η", 1)])?;
    Ok(equation)
}

/// Fractional three-parameter model with springpot orders `α`, `β`, `γ`:
///
/// `c_α D^α ε + c_γ D^γ ε + (c_α c_γ / c_β) D^{α+γ-β} ε = σ + (c_α / c_β) D^{α-β} σ`
pub fn fractional_three_parameter() -> Result<Equation, ModelError> {
    let alpha = || Expr::var("α");
    let beta = || Expr::var("β");
    let gamma = || Expr::var("γ");
    let c_alpha = || Expr::var("c_α");
    let c_beta = || Expr::var("c_β");
    let c_gamma = || Expr::var("c_γ");

    Equation::with_terms(
        STRAIN,
        [
            Term::new("c_α", "α"),
            Term::new("c_γ", "γ"),
            Term::new(
                quotient(product(c_alpha(), c_gamma()), c_beta()),
                Value::from(difference(sum(alpha(), gamma()), beta())),
            ),
        ],
        STRESS,
        [
            Term::new(1, 0),
            Term::new(
                quotient(c_alpha(), c_beta()),
                Value::from(difference(alpha(), beta())),
            ),
        ],
    )
}
