use crate::error::ModelError;
use crate::term::Term;
use serde::{Deserialize, Serialize};

/// Which side of an [`Equation`] a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A linear fractional-order constitutive law:
/// `Σ c_i D^{o_i} left_variable = Σ c_j D^{o_j} right_variable`.
///
/// Each side keeps its terms in insertion order with structural duplicates collapsed, so
/// folding is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EquationSpec")]
pub struct Equation {
    left_variable: String,
    right_variable: String,
    left_terms: Vec<Term>,
    right_terms: Vec<Term>,
}

/// Unvalidated wire form of an [`Equation`].
#[derive(Debug, Clone, Deserialize)]
pub struct EquationSpec {
    pub left_variable: String,
    pub right_variable: String,
    #[serde(default)]
    pub left_terms: Vec<Term>,
    #[serde(default)]
    pub right_terms: Vec<Term>,
}

impl TryFrom<EquationSpec> for Equation {
    type Error = ModelError;

    fn try_from(spec: EquationSpec) -> Result<Self, Self::Error> {
        Equation::with_terms(
            spec.left_variable,
            spec.left_terms,
            spec.right_variable,
            spec.right_terms,
        )
    }
}

impl Equation {
    pub fn new(
        left_variable: impl Into<String>,
        right_variable: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let left_variable = left_variable.into();
        let right_variable = right_variable.into();
        if left_variable.is_empty() || right_variable.is_empty() {
            return Err(ModelError::EmptyVariable);
        }
        if left_variable == right_variable {
            return Err(ModelError::DuplicateVariable(left_variable));
        }
        Ok(Self {
            left_variable,
            right_variable,
            left_terms: Vec::new(),
            right_terms: Vec::new(),
        })
    }

    /// Creates an equation and populates both sides in one call.
    pub fn with_terms(
        left_variable: impl Into<String>,
        left_terms: impl IntoIterator<Item = Term>,
        right_variable: impl Into<String>,
        right_terms: impl IntoIterator<Item = Term>,
    ) -> Result<Self, ModelError> {
        let mut equation = Self::new(left_variable, right_variable)?;
        for term in left_terms {
            equation.push(Side::Left, term);
        }
        for term in right_terms {
            equation.push(Side::Right, term);
        }
        Ok(equation)
    }

    /// Adds `term` to the side named `variable`. Returns `false` if an equal term was
    /// already present.
    pub fn insert(&mut self, variable: &str, term: Term) -> Result<bool, ModelError> {
        let side = self.resolve(variable)?;
        Ok(self.push(side, term))
    }

    /// Adds a batch of terms to the side named `variable`, returning how many were new.
    /// Nothing is inserted when the side is unknown.
    pub fn insert_all(
        &mut self,
        variable: &str,
        terms: impl IntoIterator<Item = Term>,
    ) -> Result<usize, ModelError> {
        let side = self.resolve(variable)?;
        let mut added = 0;
        for term in terms {
            if self.push(side, term) {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn side_of(&self, variable: &str) -> Option<Side> {
        if variable == self.left_variable {
            Some(Side::Left)
        } else if variable == self.right_variable {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn variable(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_variable,
            Side::Right => &self.right_variable,
        }
    }

    pub fn terms(&self, side: Side) -> &[Term] {
        match side {
            Side::Left => &self.left_terms,
            Side::Right => &self.right_terms,
        }
    }

    pub fn left_variable(&self) -> &str {
        &self.left_variable
    }

    pub fn right_variable(&self) -> &str {
        &self.right_variable
    }

    pub fn left_terms(&self) -> &[Term] {
        &self.left_terms
    }

    pub fn right_terms(&self) -> &[Term] {
        &self.right_terms
    }

    fn resolve(&self, variable: &str) -> Result<Side, ModelError> {
        self.side_of(variable)
            .ok_or_else(|| ModelError::UnknownSide {
                variable: variable.to_string(),
                left: self.left_variable.clone(),
                right: self.right_variable.clone(),
            })
    }

    fn push(&mut self, side: Side, term: Term) -> bool {
        let terms = match side {
            Side::Left => &mut self.left_terms,
            Side::Right => &mut self.right_terms,
        };
        if terms.contains(&term) {
            return false;
        }
        terms.push(term);
        true
    }
}
