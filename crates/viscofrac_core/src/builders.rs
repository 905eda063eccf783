use crate::equation::{Equation, Side};
use crate::error::ModelError;
use crate::expr::{difference, product, quotient, sum, Expr};
use crate::notation::Notation;
use crate::rewrite::{laplace_power, time_derivative};
use crate::term::{Term, Value};
use crate::traits::{DerivativeOperator, FractionalDerivative};
use log::debug;

/// Folds a side into `Σ product(coefficient, rewrite(order))`.
///
/// The first term seeds the fold and the rest are appended left to right, so the tree
/// shape follows insertion order. An empty side is an error.
pub fn fold_side<F>(variable: &str, terms: &[Term], mut rewrite: F) -> Result<Expr, ModelError>
where
    F: FnMut(&Value) -> Result<Expr, ModelError>,
{
    let (first, rest) = terms
        .split_first()
        .ok_or_else(|| ModelError::EmptySide(variable.to_string()))?;

    let mut acc = product(first.coefficient().to_expr(), rewrite(first.order())?);
    for term in rest {
        acc = sum(acc, product(term.coefficient().to_expr(), rewrite(term.order())?));
    }
    Ok(acc)
}

/// Derives the governing equation and the three moduli of an [`Equation`].
///
/// Carries the symbol [`Notation`] and the operator used for non-integer time derivatives.
#[derive(Debug, Clone, Default)]
pub struct ModulusBuilder<D = FractionalDerivative> {
    notation: Notation,
    derivative: D,
}

impl ModulusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notation(notation: Notation) -> Self {
        Self {
            notation,
            derivative: FractionalDerivative::default(),
        }
    }
}

impl<D: DerivativeOperator> ModulusBuilder<D> {
    pub fn with_derivative(notation: Notation, derivative: D) -> Self {
        Self {
            notation,
            derivative,
        }
    }

    pub fn notation(&self) -> &Notation {
        &self.notation
    }

    /// Sums the terms of `side` in time-derivative notation.
    pub fn fold_time_domain(&self, equation: &Equation, side: Side) -> Result<Expr, ModelError> {
        let variable = equation.variable(side);
        let terms = equation.terms(side);
        debug!("folding {} term(s) of '{variable}' in the time domain", terms.len());
        fold_side(variable, terms, |order| {
            time_derivative(variable, order, &self.notation.time, &self.derivative)
        })
    }

    /// Sums the terms of `side` as powers of `transform`.
    pub fn fold_transformed(
        &self,
        equation: &Equation,
        side: Side,
        transform: &Expr,
    ) -> Result<Expr, ModelError> {
        let variable = equation.variable(side);
        let terms = equation.terms(side);
        debug!("folding {} term(s) of '{variable}' over {transform}", terms.len());
        fold_side(variable, terms, |order| laplace_power(order, transform))
    }

    /// Time-domain residual `left - right`; zero when the true solution is substituted.
    pub fn governing_equation(&self, equation: &Equation) -> Result<Expr, ModelError> {
        let left = self.fold_time_domain(equation, Side::Left)?;
        let right = self.fold_time_domain(equation, Side::Right)?;
        Ok(difference(left, right))
    }

    /// `left(s) / (s * right(s))`.
    pub fn relaxation_modulus(&self, equation: &Equation) -> Result<Expr, ModelError> {
        let s = self.notation.laplace_variable();
        let left = self.fold_transformed(equation, Side::Left, &s)?;
        let right = self.fold_transformed(equation, Side::Right, &s)?;
        Ok(quotient(left, product(s, right)))
    }

    /// `right(s) / (s * left(s))`.
    pub fn creep_compliance(&self, equation: &Equation) -> Result<Expr, ModelError> {
        let s = self.notation.laplace_variable();
        let left = self.fold_transformed(equation, Side::Left, &s)?;
        let right = self.fold_transformed(equation, Side::Right, &s)?;
        Ok(quotient(right, product(s, left)))
    }

    /// `left(iω) / right(iω)`, the complex modulus on the imaginary axis.
    pub fn dynamic_modulus(&self, equation: &Equation) -> Result<Expr, ModelError> {
        let iw = self.notation.frequency_variable();
        let left = self.fold_transformed(equation, Side::Left, &iw)?;
        let right = self.fold_transformed(equation, Side::Right, &iw)?;
        Ok(quotient(left, right))
    }
}

pub fn governing_equation(equation: &Equation) -> Result<Expr, ModelError> {
    ModulusBuilder::new().governing_equation(equation)
}

pub fn relaxation_modulus(equation: &Equation) -> Result<Expr, ModelError> {
    ModulusBuilder::new().relaxation_modulus(equation)
}

pub fn creep_compliance(equation: &Equation) -> Result<Expr, ModelError> {
    ModulusBuilder::new().creep_compliance(equation)
}

pub fn dynamic_modulus(equation: &Equation) -> Result<Expr, ModelError> {
    ModulusBuilder::new().dynamic_modulus(equation)
}
