//! WASM bridge for the viscofrac core library.
//!
//! JavaScript builds a constitutive law term by term (or from a JSON description) and
//! reads back the rendered governing equation and moduli, plus sampled frequency
//! responses of the dynamic modulus.

mod equation;

pub use equation::WasmEquation;
