use crate::expr::Expr;

/// Represents `D^order(variable)` when the order is not a whole number.
///
/// The builders never evaluate the result; they only embed whatever node the operator
/// returns. Swap in a different implementation to target another derivative notation or
/// a numeric engine.
pub trait DerivativeOperator {
    fn apply(&self, variable: &Expr, order: &Expr) -> Expr;
}

/// Default operator: emits an opaque call node `name(variable, order)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractionalDerivative {
    pub name: String,
}

impl FractionalDerivative {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for FractionalDerivative {
    fn default() -> Self {
        Self::new("D")
    }
}

impl DerivativeOperator for FractionalDerivative {
    fn apply(&self, variable: &Expr, order: &Expr) -> Expr {
        Expr::Call(self.name.clone(), vec![variable.clone(), order.clone()])
    }
}

impl<F> DerivativeOperator for F
where
    F: Fn(&Expr, &Expr) -> Expr,
{
    fn apply(&self, variable: &Expr, order: &Expr) -> Expr {
        self(variable, order)
    }
}
