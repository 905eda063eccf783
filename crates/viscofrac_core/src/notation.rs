use crate::expr::{product, Expr};
use serde::{Deserialize, Serialize};

/// Symbol names used when rendering derived expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notation {
    /// Laplace variable used by the relaxation modulus and creep compliance.
    pub laplace: String,
    pub imaginary_unit: String,
    /// Angular frequency used by the dynamic modulus.
    pub frequency: String,
    /// Time symbol in derivative names such as `dεdt`.
    pub time: String,
}

impl Default for Notation {
    fn default() -> Self {
        Self {
            laplace: "s".to_string(),
            imaginary_unit: "i".to_string(),
            frequency: "ω".to_string(),
            time: "t".to_string(),
        }
    }
}

impl Notation {
    pub fn laplace_variable(&self) -> Expr {
        Expr::var(self.laplace.as_str())
    }

    /// `i*ω`, the substitution for `s` on the imaginary axis.
    pub fn frequency_variable(&self) -> Expr {
        product(
            Expr::var(self.imaginary_unit.as_str()),
            Expr::var(self.frequency.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let notation: Notation = serde_json::from_str(r#"{"laplace": "p"}"#).expect("json");
        assert_eq!(notation.laplace, "p");
        assert_eq!(notation.frequency, "ω");
        assert_eq!(notation.laplace_variable(), Expr::var("p"));
        assert_eq!(notation.frequency_variable().to_string(), "i*ω");
    }
}
