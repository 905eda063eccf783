//! `WasmEquation`: construction and builder entry points.

use anyhow::Context;
use js_sys::Float64Array;
use num_complex::Complex64;
use serde_wasm_bindgen::{from_value, to_value};
use std::collections::HashMap;
use viscofrac_core::evaluate::dynamic_modulus_response;
use viscofrac_core::{Equation, Expr, ModelError, ModulusBuilder, Notation, Term};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmEquation {
    equation: Equation,
    notation: Notation,
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

pub(crate) fn parse_term(coefficient: &str, order: &str) -> anyhow::Result<Term> {
    Term::parse(coefficient, order)
        .with_context(|| format!("Invalid term (coefficient '{coefficient}', order '{order}')"))
}

impl WasmEquation {
    fn builder(&self) -> ModulusBuilder {
        ModulusBuilder::with_notation(self.notation.clone())
    }

    fn render<F>(&self, build: F) -> anyhow::Result<String>
    where
        F: FnOnce(&ModulusBuilder, &Equation) -> Result<Expr, ModelError>,
    {
        let expr = build(&self.builder(), &self.equation)?;
        Ok(expr.to_string())
    }

    pub(crate) fn insert_term(
        &mut self,
        variable: &str,
        coefficient: &str,
        order: &str,
    ) -> anyhow::Result<bool> {
        let term = parse_term(coefficient, order)?;
        Ok(self.equation.insert(variable, term)?)
    }

    /// Interleaved `[re, im, re, im, ...]` samples of the dynamic modulus.
    pub(crate) fn response_values(
        &self,
        param_names: &[String],
        param_values: &[f64],
        omegas: &[f64],
    ) -> anyhow::Result<Vec<f64>> {
        if param_names.len() != param_values.len() {
            anyhow::bail!(
                "Parameter name/value count mismatch: {} names, {} values",
                param_names.len(),
                param_values.len()
            );
        }
        let params: HashMap<String, f64> = param_names
            .iter()
            .cloned()
            .zip(param_values.iter().copied())
            .collect();
        let response = dynamic_modulus_response(&self.equation, &self.notation, &params, omegas)
            .context("Dynamic modulus evaluation failed")?;
        Ok(response
            .iter()
            .flat_map(|value: &Complex64| [value.re, value.im])
            .collect())
    }
}

#[wasm_bindgen]
impl WasmEquation {
    #[wasm_bindgen(constructor)]
    pub fn new(left_variable: &str, right_variable: &str) -> Result<WasmEquation, JsValue> {
        console_error_panic_hook::set_once();

        let equation = Equation::new(left_variable, right_variable)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmEquation {
            equation,
            notation: Notation::default(),
        })
    }

    /// Builds an equation from `{ left_variable, right_variable, left_terms, right_terms }`.
    pub fn from_json(value: JsValue) -> Result<WasmEquation, JsValue> {
        console_error_panic_hook::set_once();

        let equation: Equation = from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid equation: {}", e)))?;
        Ok(WasmEquation {
            equation,
            notation: Notation::default(),
        })
    }

    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        to_value(&self.equation).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_notation(&mut self, value: JsValue) -> Result<(), JsValue> {
        self.notation = from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid notation: {}", e)))?;
        Ok(())
    }

    /// Adds a term whose coefficient and order are given as text (`"c_α"`, `"α+γ-β"`).
    /// Returns `false` when an identical term was already present.
    pub fn add_term(
        &mut self,
        variable: &str,
        coefficient: &str,
        order: &str,
    ) -> Result<bool, JsValue> {
        self.insert_term(variable, coefficient, order).map_err(to_js)
    }

    pub fn left_variable(&self) -> String {
        self.equation.left_variable().to_string()
    }

    pub fn right_variable(&self) -> String {
        self.equation.right_variable().to_string()
    }

    pub fn term_count(&self) -> usize {
        self.equation.left_terms().len() + self.equation.right_terms().len()
    }

    pub fn governing_equation(&self) -> Result<String, JsValue> {
        self.render(|builder, eq| builder.governing_equation(eq)).map_err(to_js)
    }

    pub fn relaxation_modulus(&self) -> Result<String, JsValue> {
        self.render(|builder, eq| builder.relaxation_modulus(eq)).map_err(to_js)
    }

    pub fn creep_compliance(&self) -> Result<String, JsValue> {
        self.render(|builder, eq| builder.creep_compliance(eq)).map_err(to_js)
    }

    pub fn dynamic_modulus(&self) -> Result<String, JsValue> {
        self.render(|builder, eq| builder.dynamic_modulus(eq)).map_err(to_js)
    }

    pub fn dynamic_modulus_response(
        &self,
        param_names: Vec<String>,
        param_values: Vec<f64>,
        omegas: Vec<f64>,
    ) -> Result<Float64Array, JsValue> {
        let values = self
            .response_values(&param_names, &param_values, &omegas)
            .map_err(to_js)?;
        Ok(Float64Array::from(values.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maxwell() -> WasmEquation {
        let mut eq = WasmEquation::new("ε", "σ").expect("equation");
        eq.add_term("ε", "η", "1").expect("term");
        eq.add_term("σ", "k", "0").expect("term");
        eq.add_term("σ", "η", "1").expect("term");
        eq
    }

    #[test]
    fn renders_all_four_expressions() {
        let eq = maxwell();
        assert_eq!(eq.term_count(), 3);
        assert_eq!(
            eq.governing_equation().expect("governing"),
            "η*dεdt - (k*σ + η*dσdt)"
        );
        assert_eq!(
            eq.relaxation_modulus().expect("relaxation"),
            "η*s/(s*(k + η*s))"
        );
        assert_eq!(
            eq.creep_compliance().expect("creep"),
            "(k + η*s)/(s*η*s)"
        );
        assert_eq!(
            eq.dynamic_modulus().expect("dynamic"),
            "η*i*ω/(k + η*i*ω)"
        );
    }

    #[test]
    fn duplicate_text_terms_collapse() {
        let mut eq = maxwell();
        assert!(!eq.add_term("σ", "k", "0").expect("term"));
        assert!(eq.add_term("σ", "c_α/c_β", "α-β").expect("term"));
        assert_eq!(eq.term_count(), 4);
    }

    #[test]
    fn fractional_terms_parse_from_text() {
        let mut eq = WasmEquation::new("ε", "σ").expect("equation");
        eq.add_term("ε", "c_α", "α").expect("term");
        eq.add_term("σ", "1", "0").expect("term");
        eq.add_term("σ", "c_α/c_β", "α-β").expect("term");
        assert_eq!(
            eq.relaxation_modulus().expect("relaxation"),
            "c_α*s^α/(s*(1 + c_α/c_β*s^(α - β)))"
        );
    }

    #[test]
    fn insert_term_reports_unknown_side_and_bad_values() {
        let mut eq = maxwell();
        let err = eq.insert_term("τ", "k", "0").expect_err("unknown side");
        assert!(err.to_string().contains("unknown side 'τ'"));

        let err = eq.insert_term("σ", "k +", "0").expect_err("bad coefficient");
        assert!(format!("{err:#}").contains("Invalid term"));
        assert!(format!("{err:#}").contains("parse error"));
    }

    #[test]
    fn response_values_interleave_real_and_imaginary_parts() {
        let eq = maxwell();
        let values = eq
            .response_values(
                &["k".to_string(), "η".to_string()],
                &[2.0, 0.5],
                &[1.0, 4.0],
            )
            .expect("response");
        assert_eq!(values.len(), 4);
        for (pair, omega) in values.chunks(2).zip([1.0, 4.0]) {
            let iw = Complex64::new(0.0, omega);
            let expected = (0.5 * iw) / (2.0 + 0.5 * iw);
            assert!((pair[0] - expected.re).abs() < 1e-12);
            assert!((pair[1] - expected.im).abs() < 1e-12);
        }
    }

    #[test]
    fn response_values_reject_mismatched_parameters() {
        let eq = maxwell();
        let err = eq
            .response_values(&["k".to_string()], &[], &[1.0])
            .expect_err("mismatch");
        assert!(err.to_string().contains("mismatch"));

        let err = eq
            .response_values(&["k".to_string()], &[1.0], &[1.0])
            .expect_err("unbound");
        assert!(format!("{err:#}").contains("unbound symbol 'η'"));
    }

    #[test]
    #[cfg(target_arch = "wasm32")]
    fn rejects_identical_side_names() {
        let result = WasmEquation::new("x", "x");
        assert!(result.is_err(), "expected duplicate variable error");
    }
}
