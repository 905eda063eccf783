//! Per-term rewrite rules.
//!
//! A term's order is encoded either as a time derivative of the side variable
//! (`dεdt`, `d2εdt2`, `D(ε, α)`) or as a power of a transform variable (`s^α`, `(i*ω)^α`).

use crate::error::ModelError;
use crate::expr::{power, Expr};
use crate::term::Value;
use crate::traits::DerivativeOperator;

/// Rejects orders the rules cannot encode: non-finite numbers and sub-expressions that
/// already contain an operator call.
fn check_order(order: &Value) -> Result<(), ModelError> {
    match order {
        Value::Number(n) if !n.is_finite() => {
            Err(ModelError::UnsupportedOrder(format!("non-finite order {n}")))
        }
        Value::Expression(expr) if expr.contains_call() => Err(ModelError::UnsupportedOrder(
            format!("order '{expr}' contains a function call"),
        )),
        _ => Ok(()),
    }
}

/// `d^order(variable)/dt^order` in time-derivative notation.
///
/// Whole-number orders become synthesized names; every other order is handed to
/// `derivative`.
pub fn time_derivative<D>(
    variable: &str,
    order: &Value,
    time: &str,
    derivative: &D,
) -> Result<Expr, ModelError>
where
    D: DerivativeOperator + ?Sized,
{
    check_order(order)?;
    match order.as_number() {
        Some(n) if n == 0.0 => Ok(Expr::var(variable)),
        Some(n) if n == 1.0 => Ok(Expr::Variable(format!("d{variable}d{time}"))),
        // f64 Display prints whole values without a fraction and never saturates.
        Some(n) if n.floor() == n => Ok(Expr::Variable(format!("d{n}{variable}d{time}{n}"))),
        _ => Ok(derivative.apply(&Expr::var(variable), &order.to_expr())),
    }
}

/// `transform^order` in Laplace/frequency notation.
pub fn laplace_power(order: &Value, transform: &Expr) -> Result<Expr, ModelError> {
    check_order(order)?;
    match order.as_number() {
        Some(n) if n == 0.0 => Ok(Expr::Number(1.0)),
        Some(n) if n == 1.0 => Ok(transform.clone()),
        _ => Ok(power(transform.clone(), order.to_expr())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{difference, sum};
    use crate::traits::FractionalDerivative;

    fn dt(variable: &str, order: impl Into<Value>) -> Result<Expr, ModelError> {
        time_derivative(variable, &order.into(), "t", &FractionalDerivative::default())
    }

    #[test]
    fn zeroth_order_is_identity() {
        assert_eq!(dt("ε", 0).expect("rewrite"), Expr::var("ε"));
        assert_eq!(dt("σ", 0.0).expect("rewrite"), Expr::var("σ"));
        assert_eq!(
            laplace_power(&Value::Number(0.0), &Expr::var("s")).expect("rewrite"),
            Expr::Number(1.0)
        );
        let iw = crate::notation::Notation::default().frequency_variable();
        assert_eq!(
            laplace_power(&Value::Number(0.0), &iw).expect("rewrite"),
            Expr::Number(1.0)
        );
    }

    #[test]
    fn first_order_uses_canonical_names() {
        assert_eq!(dt("x", 1).expect("rewrite"), Expr::var("dxdt"));
        let t = Expr::var("t");
        assert_eq!(laplace_power(&Value::Number(1.0), &t).expect("rewrite"), t);
    }

    #[test]
    fn integer_orders_become_named_higher_derivatives() {
        assert_eq!(dt("x", 2).expect("rewrite"), Expr::var("d2xdt2"));
        assert_eq!(dt("x", 3.0).expect("rewrite"), Expr::var("d3xdt3"));
        assert_eq!(dt("x", -1).expect("rewrite"), Expr::var("d-1xdt-1"));
        assert_eq!(
            dt("x", 1e20).expect("rewrite"),
            Expr::var("d100000000000000000000xdt100000000000000000000")
        );
    }

    #[test]
    fn fractional_orders_call_the_derivative_operator() {
        assert_eq!(
            dt("x", 0.5).expect("rewrite"),
            Expr::Call("D".to_string(), vec![Expr::var("x"), Expr::Number(0.5)])
        );
        assert_eq!(
            dt("ε", "α").expect("rewrite"),
            Expr::Call("D".to_string(), vec![Expr::var("ε"), Expr::var("α")])
        );
        let order = Value::parse("α+γ-β").expect("parse");
        assert_eq!(dt("ε", order).expect("rewrite").to_string(), "D(ε, α + γ - β)");
    }

    #[test]
    fn custom_operator_is_used_for_fractional_orders() {
        let caputo = |variable: &Expr, order: &Expr| {
            Expr::Call("caputo".to_string(), vec![order.clone(), variable.clone()])
        };
        let expr = time_derivative("x", &Value::from("α"), "t", &caputo).expect("rewrite");
        assert_eq!(expr.to_string(), "caputo(α, x)");
        // Whole orders never reach the operator.
        let expr = time_derivative("x", &Value::from(1), "τ", &caputo).expect("rewrite");
        assert_eq!(expr, Expr::var("dxdτ"));
    }

    #[test]
    fn laplace_rule_builds_power_nodes() {
        let s = Expr::var("s");
        assert_eq!(
            laplace_power(&Value::from(2), &s).expect("rewrite"),
            power(s.clone(), Expr::Number(2.0))
        );
        assert_eq!(
            laplace_power(&Value::from("α"), &s).expect("rewrite").to_string(),
            "s^α"
        );
        let order = Value::Expression(difference(Expr::var("α"), Expr::var("β")));
        assert_eq!(laplace_power(&order, &s).expect("rewrite").to_string(), "s^(α - β)");
        let iw = crate::notation::Notation::default().frequency_variable();
        assert_eq!(
            laplace_power(&Value::from(0.5), &iw).expect("rewrite").to_string(),
            "(i*ω)^0.5"
        );
    }

    #[test]
    fn wrapped_numeric_orders_follow_the_numeric_rules() {
        let zero = Value::Expression(Expr::Number(0.0));
        let one = Value::Expression(Expr::Number(1.0));
        let s = Expr::var("s");
        assert_eq!(laplace_power(&zero, &s).expect("rewrite"), Expr::Number(1.0));
        assert_eq!(laplace_power(&one, &s).expect("rewrite"), s);
        assert_eq!(dt("x", zero).expect("rewrite"), Expr::var("x"));
        assert_eq!(dt("x", one).expect("rewrite"), Expr::var("dxdt"));
    }

    #[test]
    fn unsupported_orders_are_rejected() {
        let s = Expr::var("s");
        assert!(matches!(
            laplace_power(&Value::Number(f64::NAN), &s),
            Err(ModelError::UnsupportedOrder(_))
        ));
        assert!(matches!(dt("x", f64::INFINITY), Err(ModelError::UnsupportedOrder(_))));
        let with_call = Value::Expression(sum(
            Expr::var("α"),
            Expr::Call("f".to_string(), vec![Expr::var("β")]),
        ));
        assert!(matches!(dt("x", with_call), Err(ModelError::UnsupportedOrder(_))));
    }
}
