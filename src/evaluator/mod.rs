//! The symbolic-evaluator seam.
//!
//! Requests are plain expressions wrapped in `latex(...)`; responses are quoted
//! LaTeX strings, the way a CAS answers them. Callers go through [`latex`] or
//! [`latex_or_placeholder`], which strip the quotes and adapt fraction macros.

mod command;
pub mod partfrac;

use num_bigint::BigInt;
use num_traits::{One, Signed};
use tracing::{debug, warn};

use crate::error::{MathError, Result};
use crate::expr::{Expr, Rational};
use crate::factor::factor_polynomial;
use crate::format::linear_combination_tex;
use crate::numeric::Numeric;
use crate::polynomial::Polynomial;
use crate::radical::extract_power;
use crate::solver::{LinearResult, SolveResult, solve_system};

use command::{Command, parse_request};
pub use partfrac::{PartialFractions, partial_fractions, rational_function};

/// Marker substituted for output the evaluator could not produce.
pub const PLACEHOLDER: &str = "?";

pub trait SymbolicEvaluator {
    fn evaluate(&self, request: &str) -> Result<String>;
}

/// In-process evaluator covering factoring, partial fractions, univariate
/// solving up to quadratic factors, and linear systems.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeEvaluator;

/// An evaluator that is never reachable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unavailable;

pub static NATIVE: NativeEvaluator = NativeEvaluator;

/// Strips quotes and rewrites `\frac` to the display-style `\dfrac`.
pub fn adapt_latex(raw: &str) -> String {
    raw.replace('"', "")
        .replace("\\dfrac", "\\frac")
        .replace("\\frac", "\\dfrac")
}

pub fn latex(evaluator: &dyn SymbolicEvaluator, operation: &str) -> Result<String> {
    let raw = evaluator.evaluate(&format!("latex({operation})"))?;
    Ok(adapt_latex(&raw))
}

pub fn latex_or_placeholder(evaluator: &dyn SymbolicEvaluator, operation: &str) -> String {
    match latex(evaluator, operation) {
        Ok(tex) => tex,
        Err(err) => {
            warn!(target: "evaluator", %err, operation, "symbolic evaluation failed, using placeholder");
            PLACEHOLDER.to_string()
        }
    }
}

impl SymbolicEvaluator for Unavailable {
    fn evaluate(&self, request: &str) -> Result<String> {
        Err(MathError::Evaluator(format!("no evaluator for `{request}`")))
    }
}

impl SymbolicEvaluator for NativeEvaluator {
    fn evaluate(&self, request: &str) -> Result<String> {
        debug!(target: "evaluator", request, "native evaluation");
        let tex = match parse_request(request)? {
            Command::Factor(expr, var) => {
                let var = var.unwrap_or_else(|| infer_var(&expr));
                factor_tex(&expr, &var)?
            }
            Command::Partfrac(expr, var) => {
                let var = var.unwrap_or_else(|| infer_var(&expr));
                let (num, den) = rational_function(&expr, &var)
                    .ok_or_else(|| unsupported("partfrac", &expr))?;
                partial_fractions(&num, &den)?.to_tex(&var)
            }
            Command::Solve((lhs, rhs), var) => {
                let diff = Expr::Sub(lhs.boxed(), rhs.boxed());
                let var = var.unwrap_or_else(|| infer_var(&diff));
                solve_tex(&diff, &var)?
            }
            Command::Linsolve(equations, vars) => linsolve_tex(equations, vars)?,
        };
        Ok(format!("\"{tex}\""))
    }
}

fn unsupported(op: &str, expr: &Expr) -> MathError {
    MathError::Unsupported(format!("{op}({expr})"))
}

fn infer_var(expr: &Expr) -> String {
    expr.variables()
        .into_iter()
        .next()
        .unwrap_or_else(|| "x".to_string())
}

fn factor_tex(expr: &Expr, var: &str) -> Result<String> {
    if let Some(poly) = Polynomial::from_expr(expr, var) {
        return Ok(factor_polynomial(&poly).to_tex(var));
    }
    let (num, den) = rational_function(expr, var).ok_or_else(|| unsupported("factor", expr))?;
    Ok(format!(
        "\\frac{{{}}}{{{}}}",
        factor_polynomial(&num).to_tex(var),
        factor_polynomial(&den).to_tex(var)
    ))
}

fn solve_tex(diff: &Expr, var: &str) -> Result<String> {
    let (num, _) = rational_function(diff, var).ok_or_else(|| unsupported("solve", diff))?;
    if num.is_zero() {
        return Err(MathError::Unsupported("every value is a solution".to_string()));
    }
    let factorization = factor_polynomial(&num);
    let mut exact = factorization.rational_roots();
    exact.sort();
    exact.dedup();
    let mut roots: Vec<String> = exact.iter().map(Numeric::to_tex).collect();
    for factor in &factorization.factors {
        match factor.poly.degree() {
            1 => {}
            2 => roots.extend(quadratic_surds(&factor.poly)),
            _ => return Err(unsupported("solve", diff)),
        }
    }
    Ok(format!("[{}]", roots.join(",")))
}

/// Real roots `p ± q√m` of an irreducible quadratic.
fn quadratic_surds(poly: &Polynomial) -> Vec<String> {
    let (a, b, c) = (poly.coef(2), poly.coef(1), poly.coef(0));
    let disc = b.multiply(&b).subtract(&Numeric::from_number(4).multiply(&a).multiply(&c));
    if !disc.is_positive() {
        return Vec::new();
    }
    let Ok(two_a) = Numeric::from_number(2).multiply(&a).inverse() else {
        return Vec::new();
    };
    let center = b.opposite().multiply(&two_a);
    // √(n/d) = √(n·d)/d
    let (outside, inside) = extract_power(&(disc.numer() * disc.denom()), 2);
    let spread = Numeric::from_rational(Rational::new(outside, disc.denom().clone()))
        .multiply(&two_a)
        .abs();
    let surd = format_surd(&spread, &inside);
    [" - ", " + "]
        .iter()
        .map(|sign| {
            if center.is_zero() {
                let lead = if *sign == " - " { "-" } else { "" };
                format!("{lead}{surd}")
            } else {
                format!("{}{sign}{surd}", center.to_tex())
            }
        })
        .collect()
}

fn format_surd(coef: &Numeric, radicand: &BigInt) -> String {
    let root = format!("\\sqrt{{{radicand}}}");
    if coef.is_one() {
        root
    } else if coef.is_integer() {
        format!("{}{root}", coef.numer())
    } else if coef.numer().is_one() {
        format!("\\frac{{{root}}}{{{}}}", coef.denom())
    } else {
        format!("\\frac{{{}{root}}}{{{}}}", coef.numer().abs(), coef.denom())
    }
}

fn linsolve_tex(equations: Vec<(Expr, Expr)>, vars: Vec<String>) -> Result<String> {
    let values: Vec<String> = match solve_system(vars, equations) {
        SolveResult::Linear(LinearResult::Unique(solution)) => {
            solution.values.iter().map(Numeric::to_tex).collect()
        }
        SolveResult::Linear(LinearResult::Infinite(family)) => {
            let free: Vec<&str> = family
                .diagnostics
                .free_columns
                .iter()
                .map(|&col| family.variables[col].as_str())
                .collect();
            (0..family.variables.len())
                .map(|col| {
                    let terms: Vec<(Numeric, &str)> = family
                        .basis
                        .iter()
                        .zip(&free)
                        .map(|(vector, name)| (vector[col].clone(), *name))
                        .collect();
                    linear_combination_tex(&terms, &family.particular[col])
                })
                .collect()
        }
        SolveResult::Linear(LinearResult::Inconsistent(_)) => Vec::new(),
        SolveResult::NonLinear(result) => {
            return Err(MathError::Unsupported(format!(
                "non-linear equations {:?}",
                result.nonlinear_equations
            )));
        }
    };
    Ok(format!("[{}]", values.join(",")))
}
