//! String-based convenience API for quick experimentation.

use serde_json::Value;

use crate::error::Result;
use crate::evaluator::{NATIVE, latex};
use crate::expr::Expr;
use crate::generators::default_registry;
use crate::parser::parse_expr;

pub use crate::format::pretty;
pub use crate::{Equation, Numeric, Polynomial, Random, WorksheetDef, WorksheetGenerator};

pub fn parse(input: &str) -> Result<Expr> {
    parse_expr(input)
}

/// Factored TeX of a polynomial or rational function.
pub fn factor(input: &str, var: &str) -> Result<String> {
    latex(&NATIVE, &format!("factor({input}, {var})"))
}

pub fn partfrac(input: &str, var: &str) -> Result<String> {
    latex(&NATIVE, &format!("partfrac({input}, {var})"))
}

/// Real solutions of `lhs = rhs` as a TeX list.
pub fn solve(equation: &str, var: &str) -> Result<String> {
    latex(&NATIVE, &format!("solve({equation}, {var})"))
}

pub fn linsolve(equations: &[&str], vars: &[&str]) -> Result<String> {
    latex(
        &NATIVE,
        &format!("linsolve([{}], [{}])", equations.join(", "), vars.join(", ")),
    )
}

/// Formulation and answer of one question from the default registry.
pub fn question(category: &str, seed: u64, options: &Value) -> Result<(String, String)> {
    let mut rand = Random::from_seed(seed);
    let generator = default_registry()?.create(category, &mut rand, options, &NATIVE)?;
    Ok((generator.formulation(), generator.answer()))
}
