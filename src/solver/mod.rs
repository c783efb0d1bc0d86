//! Exact Gauss-Jordan elimination over the rationals, for systems given as
//! parsed equations and for plain coefficient matrices.

use std::collections::HashMap;

use crate::error::{MathError, Result};
use crate::expr::{Expr, Rational};
use crate::numeric::Numeric;
use num_traits::{One, Signed, Zero};

#[derive(Debug, Clone)]
pub enum SolveResult {
    Linear(LinearResult),
    NonLinear(NonLinearResult),
}

#[derive(Debug, Clone)]
pub enum LinearResult {
    Unique(LinearSolution),
    Infinite(LinearFamily),
    Inconsistent(LinearInconsistent),
}

#[derive(Debug, Clone)]
pub struct LinearSolution {
    pub variables: Vec<String>,
    pub values: Vec<Numeric>,
    pub diagnostics: LinearDiagnostics,
}

/// Solutions `particular + Σ tᵢ·basisᵢ`, one parameter per free column.
#[derive(Debug, Clone)]
pub struct LinearFamily {
    pub variables: Vec<String>,
    pub particular: Vec<Numeric>,
    pub basis: Vec<Vec<Numeric>>,
    pub diagnostics: LinearDiagnostics,
}

#[derive(Debug, Clone)]
pub struct LinearInconsistent {
    pub diagnostics: LinearDiagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct LinearDiagnostics {
    pub rank: usize,
    pub pivot_rows: Vec<usize>,
    pub pivot_columns: Vec<usize>,
    pub free_columns: Vec<usize>,
    pub determinant: Option<Numeric>,
    pub inconsistent_row: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct NonLinearResult {
    pub variables: Vec<String>,
    pub normalized_equations: Vec<Expr>,
    pub nonlinear_equations: Vec<usize>,
}

struct LinearDecomposition {
    coeffs: Vec<Rational>,
    constant: Rational,
    residual: Vec<Expr>,
}

/// Solve a system of equations provided as (lhs, rhs) pairs by exact Gauss-Jordan
/// elimination. Any product of unknowns or other non-linear term yields `NonLinear`.
pub fn solve_system(vars: Vec<impl Into<String>>, equations: Vec<(Expr, Expr)>) -> SolveResult {
    let variables: Vec<String> = vars.into_iter().map(Into::into).collect();
    let var_map: HashMap<String, usize> = variables
        .iter()
        .enumerate()
        .map(|(i, v)| (v.clone(), i))
        .collect();

    let eq_len = equations.len();
    let mut normalized_equations = Vec::with_capacity(eq_len);
    let mut decompositions = Vec::with_capacity(eq_len);
    let mut nonlinear_eqs = Vec::new();

    for (idx, (lhs, rhs)) in equations.into_iter().enumerate() {
        let normalized = Expr::Sub(lhs.boxed(), rhs.boxed());
        let decomp = decompose_linear(&normalized, &var_map);
        if !decomp.residual.is_empty() {
            nonlinear_eqs.push(idx);
        }
        normalized_equations.push(normalized);
        decompositions.push(decomp);
    }

    if !nonlinear_eqs.is_empty() {
        return SolveResult::NonLinear(NonLinearResult {
            variables,
            normalized_equations,
            nonlinear_equations: nonlinear_eqs,
        });
    }

    let mut matrix = build_augmented(&decompositions, variables.len());
    let mut diagnostics = LinearDiagnostics::default();
    let n_vars = variables.len();
    let determinant = rref(&mut matrix, n_vars, &mut diagnostics);
    if matrix.rows == n_vars {
        diagnostics.determinant = Some(Numeric::from_rational(determinant));
    }
    diagnostics.free_columns = free_columns(n_vars, &diagnostics.pivot_columns);

    if diagnostics.inconsistent_row.is_some() {
        return SolveResult::Linear(LinearResult::Inconsistent(LinearInconsistent {
            diagnostics,
        }));
    }

    let mut particular = vec![Numeric::zero(); n_vars];
    for (&row, &col) in diagnostics
        .pivot_rows
        .iter()
        .zip(diagnostics.pivot_columns.iter())
    {
        particular[col] = Numeric::from_rational(matrix.get(row, n_vars).clone());
    }

    if diagnostics.rank == n_vars {
        return SolveResult::Linear(LinearResult::Unique(LinearSolution {
            variables,
            values: particular,
            diagnostics,
        }));
    }

    let mut basis = Vec::new();
    for &free_col in &diagnostics.free_columns {
        let mut vec = vec![Numeric::zero(); n_vars];
        vec[free_col] = Numeric::one();
        for (&row, &pivot_col) in diagnostics
            .pivot_rows
            .iter()
            .zip(diagnostics.pivot_columns.iter())
        {
            let coeff = matrix.get(row, free_col);
            if !coeff.is_zero() {
                vec[pivot_col] = Numeric::from_rational(-coeff.clone());
            }
        }
        basis.push(vec);
    }

    SolveResult::Linear(LinearResult::Infinite(LinearFamily {
        variables,
        particular,
        basis,
        diagnostics,
    }))
}

/// Solves the square system `matrix · x = rhs`, failing unless the solution is unique.
pub fn solve_linear(matrix: &[Vec<Numeric>], rhs: &[Numeric]) -> Result<Vec<Numeric>> {
    let n_vars = matrix.first().map_or(0, Vec::len);
    if matrix.len() != rhs.len() || matrix.iter().any(|row| row.len() != n_vars) {
        return Err(MathError::DegenerateInput(
            "linear system has ragged rows".to_string(),
        ));
    }
    let cols = n_vars + 1;
    let mut data = Vec::with_capacity(matrix.len() * cols);
    for (row, value) in matrix.iter().zip(rhs) {
        data.extend(row.iter().map(|c| c.as_rational().clone()));
        data.push(value.as_rational().clone());
    }
    let mut augmented = Matrix {
        rows: matrix.len(),
        cols,
        data,
    };
    let mut diagnostics = LinearDiagnostics::default();
    rref(&mut augmented, n_vars, &mut diagnostics);
    if diagnostics.inconsistent_row.is_some() || diagnostics.rank < n_vars {
        return Err(MathError::DegenerateInput(
            "linear system has no unique solution".to_string(),
        ));
    }
    let mut values = vec![Numeric::zero(); n_vars];
    for (&row, &col) in diagnostics
        .pivot_rows
        .iter()
        .zip(diagnostics.pivot_columns.iter())
    {
        values[col] = Numeric::from_rational(augmented.get(row, n_vars).clone());
    }
    Ok(values)
}

fn decompose_linear(expr: &Expr, var_map: &HashMap<String, usize>) -> LinearDecomposition {
    let mut decomposition = LinearDecomposition {
        coeffs: vec![Rational::zero(); var_map.len()],
        constant: Rational::zero(),
        residual: Vec::new(),
    };
    collect_linear_terms(expr, Rational::one(), &mut decomposition, var_map);
    decomposition
}

fn collect_linear_terms(
    expr: &Expr,
    scale: Rational,
    out: &mut LinearDecomposition,
    var_map: &HashMap<String, usize>,
) {
    if scale.is_zero() {
        return;
    }
    if let Some(c) = constant_of(expr) {
        out.constant += scale * c;
        return;
    }
    match expr {
        Expr::Variable(name) => match var_map.get(name) {
            Some(&idx) => out.coeffs[idx] += scale,
            None => out.residual.push(expr.clone()),
        },
        Expr::Add(a, b) => {
            collect_linear_terms(a, scale.clone(), out, var_map);
            collect_linear_terms(b, scale, out, var_map);
        }
        Expr::Sub(a, b) => {
            collect_linear_terms(a, scale.clone(), out, var_map);
            collect_linear_terms(b, -scale, out, var_map);
        }
        Expr::Neg(a) => collect_linear_terms(a, -scale, out, var_map),
        Expr::Mul(a, b) => {
            if let Some(c) = constant_of(a) {
                collect_linear_terms(b, scale * c, out, var_map);
            } else if let Some(c) = constant_of(b) {
                collect_linear_terms(a, scale * c, out, var_map);
            } else {
                out.residual.push(expr.clone());
            }
        }
        Expr::Div(a, b) => match constant_of(b) {
            Some(c) if !c.is_zero() => collect_linear_terms(a, scale / c, out, var_map),
            _ => out.residual.push(expr.clone()),
        },
        _ => out.residual.push(expr.clone()),
    }
}

/// Value of a variable-free subtree built from `+ - * /` and integer powers.
fn constant_of(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Constant(c) => Some(c.clone()),
        Expr::Neg(inner) => constant_of(inner).map(|c| -c),
        Expr::Add(a, b) => Some(constant_of(a)? + constant_of(b)?),
        Expr::Sub(a, b) => Some(constant_of(a)? - constant_of(b)?),
        Expr::Mul(a, b) => Some(constant_of(a)? * constant_of(b)?),
        Expr::Div(a, b) => {
            let denom = constant_of(b)?;
            if denom.is_zero() {
                return None;
            }
            Some(constant_of(a)? / denom)
        }
        Expr::Pow(base, exp) => {
            let exp = constant_of(exp)?;
            if !exp.is_integer() {
                return None;
            }
            let e: i32 = exp.to_integer().try_into().ok()?;
            Numeric::from_rational(constant_of(base)?)
                .power(e)
                .ok()
                .map(|n| n.as_rational().clone())
        }
        _ => None,
    }
}

fn build_augmented(rows: &[LinearDecomposition], n_vars: usize) -> Matrix {
    let cols = n_vars + 1;
    let mut data = Vec::with_capacity(rows.len() * cols);
    for row in rows {
        for coeff in row.coeffs.iter().take(n_vars) {
            data.push(coeff.clone());
        }
        data.push(-row.constant.clone());
    }
    Matrix {
        rows: rows.len(),
        cols,
        data,
    }
}

/// Reduces in place and returns the determinant of the coefficient block
/// (zero when rank-deficient; meaningless for non-square systems).
fn rref(matrix: &mut Matrix, n_vars: usize, diag: &mut LinearDiagnostics) -> Rational {
    let mut det = Rational::one();
    let rows = matrix.rows;
    if rows == 0 {
        diag.rank = 0;
        return Rational::zero();
    }
    let cols = matrix.cols;
    let mut row = 0;
    for col in 0..n_vars {
        if row >= rows {
            break;
        }

        let mut pivot_row = None;
        let mut pivot_abs = Rational::zero();
        for r in row..rows {
            let value = matrix.get(r, col);
            if !value.is_zero() && value.abs() > pivot_abs {
                pivot_abs = value.abs();
                pivot_row = Some(r);
            }
        }

        let Some(pivot_idx) = pivot_row else {
            continue;
        };

        if pivot_idx != row {
            matrix.swap_rows(row, pivot_idx);
            det = -det;
        }

        let pivot_value = matrix.get(row, col).clone();
        det *= pivot_value.clone();

        for c in col..cols {
            let cell = matrix.get_mut(row, c);
            *cell /= pivot_value.clone();
        }

        let row_start = row * cols;
        let (before, rest) = matrix.data.split_at_mut(row_start);
        let (pivot_row_slice, after) = rest.split_at_mut(cols);
        let pivot_row_ref: &[Rational] = &*pivot_row_slice;

        for rrow in before.chunks_exact_mut(cols).chain(after.chunks_exact_mut(cols)) {
            let factor = rrow[col].clone();
            if factor.is_zero() {
                continue;
            }
            for c in col..cols {
                rrow[c] -= &factor * &pivot_row_ref[c];
            }
        }

        diag.pivot_rows.push(row);
        diag.pivot_columns.push(col);
        row += 1;
    }

    diag.rank = diag.pivot_columns.len();
    if diag.rank < n_vars {
        det = Rational::zero();
    }

    for r in row..rows {
        let row_slice = matrix.row(r);
        let all_zero = (0..n_vars).all(|c| row_slice[c].is_zero());
        if all_zero && !row_slice[n_vars].is_zero() {
            diag.inconsistent_row = Some(r);
            break;
        }
    }
    det
}

fn free_columns(n_vars: usize, pivots: &[usize]) -> Vec<usize> {
    (0..n_vars).filter(|col| !pivots.contains(col)).collect()
}

struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Rational>,
}

impl Matrix {
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn get(&self, row: usize, col: usize) -> &Rational {
        &self.data[self.idx(row, col)]
    }

    fn get_mut(&mut self, row: usize, col: usize) -> &mut Rational {
        let idx = self.idx(row, col);
        &mut self.data[idx]
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols;
        for offset in 0..cols {
            self.data.swap(a * cols + offset, b * cols + offset);
        }
    }

    fn row(&self, row: usize) -> &[Rational] {
        let start = self.idx(row, 0);
        &self.data[start..start + self.cols]
    }
}
