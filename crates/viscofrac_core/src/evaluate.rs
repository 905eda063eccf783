use crate::builders::ModulusBuilder;
use crate::equation::Equation;
use crate::error::ModelError;
use crate::expr::Expr;
use crate::notation::Notation;
use log::trace;
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::collections::HashMap;

/// OpCodes for the Stack-based Virtual Machine.
/// The VM operates on a stack of complex values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpCode {
    /// Pushes a constant onto the stack.
    LoadConst(Complex64),
    /// Pushes the value of a named parameter (by index) onto the stack.
    LoadParam(usize),
    /// Pops top two values (b, a), pushes (a + b).
    Add,
    /// Pops top two values (b, a), pushes (a - b).
    Sub,
    /// Pops top two values (b, a), pushes (a * b).
    Mul,
    /// Pops top two values (b, a), pushes (a / b).
    Div,
    /// Pops top two values (b, a), pushes (a ^ b) on the principal branch.
    Pow,
    /// Pops top value (a), pushes -a.
    Neg,
}

/// Represents a compiled sequence of operations.
#[derive(Debug, Clone, Default)]
pub struct Bytecode {
    pub ops: Vec<OpCode>,
}

/// Compiles an `Expr` into `Bytecode`, resolving symbol names to parameter indices.
///
/// Fractional-derivative call nodes have no numeric meaning here and are rejected.
pub struct Compiler {
    pub param_map: HashMap<String, usize>,
}

impl Compiler {
    pub fn new(param_names: &[String]) -> Self {
        let param_map = param_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { param_map }
    }

    pub fn compile(&self, expr: &Expr) -> Result<Bytecode, ModelError> {
        let mut ops = Vec::new();
        self.compile_recursive(expr, &mut ops)?;
        trace!("compiled '{expr}' into {} ops", ops.len());
        Ok(Bytecode { ops })
    }

    fn compile_recursive(&self, expr: &Expr, ops: &mut Vec<OpCode>) -> Result<(), ModelError> {
        match expr {
            Expr::Number(n) => ops.push(OpCode::LoadConst(Complex64::new(*n, 0.0))),
            Expr::Variable(name) => {
                let idx = self
                    .param_map
                    .get(name)
                    .ok_or_else(|| ModelError::UnboundSymbol(name.clone()))?;
                ops.push(OpCode::LoadParam(*idx));
            }
            Expr::Binary(left, op, right) => {
                self.compile_recursive(left, ops)?;
                self.compile_recursive(right, ops)?;
                ops.push(match op {
                    '+' => OpCode::Add,
                    '-' => OpCode::Sub,
                    '*' => OpCode::Mul,
                    '/' => OpCode::Div,
                    '^' => OpCode::Pow,
                    other => {
                        return Err(ModelError::Parse(format!("unknown binary operator '{other}'")))
                    }
                });
            }
            Expr::Unary(op, operand) => {
                self.compile_recursive(operand, ops)?;
                match op {
                    '-' => ops.push(OpCode::Neg),
                    other => {
                        return Err(ModelError::Parse(format!("unknown unary operator '{other}'")))
                    }
                }
            }
            Expr::Call(name, _) => return Err(ModelError::UnevaluatedDerivative(name.clone())),
        }
        Ok(())
    }
}

/// Stack-based Virtual Machine for evaluating compiled expressions.
///
/// Stateless; `execute` receives the parameter values and a reusable stack buffer.
pub struct VM;

impl VM {
    pub fn execute(
        bytecode: &Bytecode,
        params: &[Complex64],
        stack: &mut Vec<Complex64>,
    ) -> Result<Complex64, ModelError> {
        stack.clear();

        for op in &bytecode.ops {
            let value = match *op {
                OpCode::LoadConst(val) => val,
                OpCode::LoadParam(idx) => *params.get(idx).ok_or(ModelError::MalformedProgram)?,
                OpCode::Neg => -pop(stack)?,
                binary => {
                    let b = pop(stack)?;
                    let a = pop(stack)?;
                    match binary {
                        OpCode::Add => a + b,
                        OpCode::Sub => a - b,
                        OpCode::Mul => a * b,
                        OpCode::Div => a / b,
                        OpCode::Pow => complex_pow(a, b),
                        _ => return Err(ModelError::MalformedProgram),
                    }
                }
            };
            stack.push(value);
        }

        pop(stack)
    }
}

fn pop(stack: &mut Vec<Complex64>) -> Result<Complex64, ModelError> {
    stack.pop().ok_or(ModelError::MalformedProgram)
}

// powc goes through ln(0) for a zero base, which turns 0^α into NaN.
fn complex_pow(base: Complex64, exponent: Complex64) -> Complex64 {
    if exponent.is_zero() {
        return Complex64::one();
    }
    if base.is_zero() && exponent.re > 0.0 {
        return Complex64::zero();
    }
    base.powc(exponent)
}

/// Evaluates `expr` once with every free symbol bound in `bindings`.
pub fn evaluate(expr: &Expr, bindings: &HashMap<String, Complex64>) -> Result<Complex64, ModelError> {
    let (names, values): (Vec<String>, Vec<Complex64>) = bindings
        .iter()
        .map(|(name, value)| (name.clone(), *value))
        .unzip();
    let code = Compiler::new(&names).compile(expr)?;
    VM::execute(&code, &values, &mut Vec::new())
}

/// Samples the dynamic modulus `E*(ω)` at each angular frequency.
///
/// `params` binds the coefficient and order symbols to real values; the notation's
/// imaginary unit and frequency symbols are bound internally. The real part of each
/// sample is the storage modulus and the imaginary part the loss modulus.
pub fn dynamic_modulus_response(
    equation: &Equation,
    notation: &Notation,
    params: &HashMap<String, f64>,
    omegas: &[f64],
) -> Result<Vec<Complex64>, ModelError> {
    let expr = ModulusBuilder::with_notation(notation.clone()).dynamic_modulus(equation)?;

    let (mut names, mut values): (Vec<String>, Vec<Complex64>) = params
        .iter()
        .map(|(name, value)| (name.clone(), Complex64::new(*value, 0.0)))
        .unzip();
    names.push(notation.imaginary_unit.clone());
    values.push(Complex64::i());
    names.push(notation.frequency.clone());
    values.push(Complex64::zero());
    let omega_idx = values.len() - 1;

    let code = Compiler::new(&names).compile(&expr)?;
    let mut stack = Vec::with_capacity(32);
    omegas
        .iter()
        .map(|&omega| {
            values[omega_idx] = Complex64::new(omega, 0.0);
            VM::execute(&code, &values, &mut stack)
        })
        .collect()
}
