//! Equation synthesis from known solution sets.
//!
//! An [`Equation`] starts empty and is populated by exactly one recipe call.
//! Every recipe draws from the shared [`Random`] in a fixed order, so the same
//! seed always yields the same equation.

use tracing::{debug, warn};

use crate::error::{MathError, Result};
use crate::evaluator::{self, NATIVE, PLACEHOLDER, SymbolicEvaluator};
use crate::format::{append, coef_var_tex, parens};
use crate::numeric::Numeric;
use crate::polynomial::Polynomial;
use crate::radical::{Monomial, Radical};
use crate::random::{PolynomialOptions, Random};

/// Draws allowed before `rational` falls back to a fixed numerator root.
pub const MAX_RATIONAL_ATTEMPTS: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Relation {
    #[default]
    Eq,
    Lt,
    Gt,
    Leq,
    Geq,
}

impl Relation {
    pub fn tex(self) -> &'static str {
        match self {
            Relation::Eq => "=",
            Relation::Lt => "<",
            Relation::Gt => ">",
            Relation::Leq => "\\leq",
            Relation::Geq => "\\geq",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Relation::Eq => "=",
            Relation::Lt => "<",
            Relation::Gt => ">",
            Relation::Leq => "<=",
            Relation::Geq => ">=",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Exact(Numeric),
    Radical(Radical),
    Rendered(String),
}

impl Answer {
    pub fn to_tex(&self) -> String {
        match self {
            Answer::Exact(n) => n.to_tex(),
            Answer::Radical(r) => r.to_tex(),
            Answer::Rendered(s) => s.clone(),
        }
    }

    pub fn as_exact(&self) -> Option<&Numeric> {
        match self {
            Answer::Exact(n) => Some(n),
            _ => None,
        }
    }
}

pub struct Equation<'r> {
    rnd: &'r mut Random,
    evaluator: &'r dyn SymbolicEvaluator,
    bar: String,
    lhs: String,
    rhs: String,
    relation: Relation,
    answers: Vec<Answer>,
}

/// `bar + c` in TeX, e.g. `x - 3`.
fn shifted(bar: &str, c: i64) -> String {
    format!("{bar}{}", append(&Numeric::from_number(c)))
}

/// `x² + b·x + c` with a negative discriminant.
pub(crate) fn irreducible_quadratic(rnd: &mut Random) -> Polynomial {
    let b = rnd.int_between(-5, 5);
    let c = b * b / 4 + rnd.int_between(2, 5);
    Polynomial::from_ints(&[1, b, c])
}

impl<'r> Equation<'r> {
    pub fn new(rnd: &'r mut Random, bar: impl Into<String>) -> Self {
        Equation {
            rnd,
            evaluator: &NATIVE,
            bar: bar.into(),
            lhs: String::new(),
            rhs: String::new(),
            relation: Relation::Eq,
            answers: Vec::new(),
        }
    }

    pub fn with_evaluator(mut self, evaluator: &'r dyn SymbolicEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_sides(
        mut self,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
        relation: Relation,
    ) -> Self {
        self.lhs = lhs.into();
        self.rhs = rhs.into();
        self.relation = relation;
        self
    }

    pub fn bar(&self) -> &str {
        &self.bar
    }

    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    pub fn rhs(&self) -> &str {
        &self.rhs
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn lineal_from_root(&mut self, root: Numeric, complexity: u32) {
        self.polynomial_from_roots(&[root], 1, complexity);
    }

    pub fn quadratic_from_roots(&mut self, roots: &[Numeric], complexity: u32) {
        self.polynomial_from_roots(roots, 2, complexity);
    }

    /// Polynomial equation whose real solutions are exactly `roots`. Missing
    /// degree is filled with irreducible quadratics.
    pub fn polynomial_from_roots(&mut self, roots: &[Numeric], degree: usize, complexity: u32) {
        self.answers = roots.iter().cloned().map(Answer::Exact).collect();
        let with_roots = Polynomial::from_roots(roots);
        let mut padding = Vec::new();
        let mut current = roots.len();
        while current < degree {
            padding.push(irreducible_quadratic(self.rnd));
            current += 2;
        }
        let poly = padding
            .iter()
            .fold(with_roots.clone(), |acc, q| acc.multiply(q));
        let bar = self.bar.clone();

        match complexity {
            0 => {
                let mut factors = Vec::new();
                if !roots.is_empty() {
                    factors.push(with_roots.to_factor_form(&bar, self.evaluator));
                }
                factors.extend(padding.iter().map(|q| parens(&q.to_tex(&bar))));
                if factors.is_empty() {
                    factors.push(poly.to_tex(&bar));
                }
                self.lhs = factors.join(" \\cdot ");
                self.rhs = "0".to_string();
            }
            1 => {
                self.lhs = poly.to_tex(&bar);
                self.rhs = "0".to_string();
            }
            _ if roots.len() == 2 && degree == 2 => {
                if self.rnd.int_between(0, 1) == 0 {
                    // (x - α)² = β with α the midpoint and β the squared half-gap.
                    let half = Numeric::from_fraction(1, 2).unwrap_or_default();
                    let half_gap = roots[0].subtract(&roots[1]).multiply(&half);
                    let beta = half_gap.multiply(&half_gap);
                    let alpha = roots[0].add(&roots[1]).multiply(&half);
                    let inner = Polynomial::new(vec![Numeric::one(), alpha.opposite()]);
                    self.lhs = format!("{}^{{2}}", parens(&inner.to_tex(&bar)));
                    self.rhs = beta.to_tex();
                } else {
                    let square = self.rnd.polynomial(&PolynomialOptions {
                        min_degree: 1,
                        max_degree: 1,
                        ..PolynomialOptions::default()
                    });
                    self.lhs = poly.add(&square.power(2)).to_tex(&bar);
                    self.rhs = format!("{}^{{2}}", parens(&square.to_tex(&bar)));
                }
            }
            _ => {
                let drawn = self.rnd.polynomial(&PolynomialOptions {
                    min_degree: 1,
                    max_degree: 1,
                    ..PolynomialOptions::default()
                });
                let mut coefs = drawn.coefs().to_vec();
                if let Some(last) = coefs.last_mut() {
                    *last = self.rnd.numeric_between_not_zero(-10, 10);
                }
                let square = Polynomial::new(coefs);
                self.lhs = poly.add(&square.power(2)).to_tex(&bar);
                self.rhs = format!("{}^{{2}}", parens(&square.to_tex(&bar)));
            }
        }
    }

    /// `A·x⁴ + B·x² + C = 0` from the two roots of the inner quadratic in `x²`.
    /// A negative inner root contributes no real solutions.
    pub fn biquadratic_from_quadratic_roots(
        &mut self,
        roots: &[Numeric],
        complexity: u32,
    ) -> Result<()> {
        let [r1, r2] = roots else {
            return Err(MathError::DegenerateInput(format!(
                "biquadratic needs two inner roots, got {}",
                roots.len()
            )));
        };
        let b = r1.add(r2).opposite();
        let c = r1.multiply(r2);
        let lcm = num_integer::lcm(b.denom().clone(), c.denom().clone());
        let scale = Numeric::from_rational(crate::expr::Rational::from_integer(lcm));
        let poly = Polynomial::new(vec![
            scale.clone(),
            Numeric::zero(),
            b.multiply(&scale),
            Numeric::zero(),
            c.multiply(&scale),
        ]);

        if complexity > 1 {
            let extra = self.rnd.polynomial(&PolynomialOptions {
                max_degree: 4,
                ..PolynomialOptions::default()
            });
            self.lhs = poly.add(&extra).to_tex(&self.bar);
            self.rhs = extra.to_tex(&self.bar);
        } else {
            self.lhs = poly.to_tex(&self.bar);
            self.rhs = "0".to_string();
        }

        self.answers.clear();
        for r in [r1, r2] {
            if r.is_negative() {
                continue;
            }
            match r.sqrt_exact() {
                Some(s) => {
                    self.answers.push(Answer::Exact(s.opposite()));
                    self.answers.push(Answer::Exact(s));
                }
                None => {
                    let root = Radical::new(Monomial::one(), 2, Monomial::constant(r.clone())).simplify();
                    let mut negative = root.clone();
                    negative.coefficient.coef = negative.coefficient.coef.opposite();
                    self.answers.push(Answer::Radical(negative));
                    self.answers.push(Answer::Radical(root));
                }
            }
        }
        Ok(())
    }

    /// Rational equation rendered as partial fractions equal to zero.
    pub fn rational(&mut self, r: i64, complexity: u32) {
        let complexity = complexity.max(1) as usize;
        let mut attempt = 0;
        let (num_roots, den_poly) = loop {
            attempt += 1;
            let mut num_roots = self.rnd.numeric_list(complexity + 1, r);
            let (den_roots, den_poly) = match self.rnd.int_between(0, 2) {
                0 => {
                    let roots = self.rnd.numeric_list(2, 4);
                    let poly = Polynomial::from_roots(&roots);
                    (roots, poly)
                }
                1 => {
                    let roots = self.rnd.numeric_list(complexity, 4);
                    let poly = Polynomial::from_roots(&roots);
                    (roots, poly)
                }
                _ => {
                    let roots = vec![self.rnd.numeric_between(-2, 2)];
                    let n = self.rnd.numeric_between(1, 4);
                    let poly = Polynomial::from_roots(&roots)
                        .multiply(&Polynomial::new(vec![Numeric::one(), Numeric::zero(), n]));
                    (roots, poly)
                }
            };
            num_roots.retain(|root| !den_roots.contains(root));
            if !num_roots.is_empty() {
                break (num_roots, den_poly);
            }
            if attempt < MAX_RATIONAL_ATTEMPTS {
                debug!(target: "equation", attempt, "numerator roots cancelled, drawing again");
                continue;
            }
            let fallback = (1..=den_roots.len() as i64 + 1)
                .map(Numeric::from_number)
                .find(|c| !den_roots.contains(c))
                .unwrap_or_else(Numeric::one);
            warn!(target: "equation", %fallback, "rational retries exhausted, using fallback root");
            break (vec![fallback], den_poly);
        };

        let num_poly = Polynomial::from_roots(&num_roots);
        let bar = self.bar.clone();
        let request = format!(
            "partfrac(({})/({}), {bar})",
            num_poly.to_text(&bar),
            den_poly.to_text(&bar)
        );
        self.lhs = match evaluator::latex(self.evaluator, &request) {
            Ok(tex) => tex,
            Err(err) => {
                warn!(target: "equation", %err, "partial fractions unavailable, keeping the quotient");
                format!(
                    "\\dfrac{{{}}}{{{}}}",
                    num_poly.to_tex(&bar),
                    den_poly.to_tex(&bar)
                )
            }
        };
        self.rhs = "0".to_string();
        self.answers = num_roots.into_iter().map(Answer::Exact).collect();
    }

    /// Radical equations from fixed templates with closed-form answers.
    pub fn irrational(&mut self, r: i64, complexity: u32) {
        self.answers.clear();
        if complexity <= 1 {
            let case = self.rnd.int_between(0, 1);
            let a = self.rnd.int_between_not_zero(-r, r);
            let b = self.rnd.int_between_not_zero(-r, r);
            let c = self.rnd.int_between_not_zero(-r, r);
            if case == 0 {
                self.radical_equals_constant(a, b, c.abs());
            } else {
                let sigma = 2 * self.rnd.int_between(2, 5) - 1;
                self.radical_equals_line(a, sigma);
            }
            return;
        }

        let case = self.rnd.int_between(0, 2);
        let a = self.rnd.int_between_not_zero(-r, r);
        let b = self.rnd.int_between_not_zero(-r, r);
        let c = self.rnd.int_between_not_zero(-r, r);
        match case {
            0 => self.radical_plus_constant(a, b, c),
            1 => self.radical_of_square_sum(a, b, c.abs()),
            _ => {
                // b < a < 0 and c² > a - b keep the single root real.
                let a = self.rnd.int_between(-r, -1);
                let b = a + self.rnd.int_between(-r, -1);
                let c = ((a - b) as f64).sqrt().round() as i64 + self.rnd.int_between(1, r);
                self.radical_sum(a, b, c);
            }
        }
    }

    /// `√(ax + b) = c` with `c > 0`.
    fn radical_equals_constant(&mut self, a: i64, b: i64, c: i64) {
        self.lhs = format!(
            "\\sqrt{{{}{}}}",
            coef_var_tex(&Numeric::from_number(a), &self.bar),
            append(&Numeric::from_number(b))
        );
        self.rhs = c.to_string();
        if let Ok(root) = Numeric::from_fraction(c * c - b, a) {
            self.answers.push(Answer::Exact(root));
        }
    }

    /// `√(x - a) = x - (a + δ)` with `δ = (σ² - 1)/4` and odd `σ ≥ 3`. Squaring
    /// gives `u² - u - δ = 0` for `u = √(x - a)`; only `u = (1 + σ)/2` is positive.
    fn radical_equals_line(&mut self, a: i64, sigma: i64) {
        let delta = Numeric::from_fraction(sigma * sigma - 1, 4).unwrap_or_default();
        let shift = Numeric::from_number(a).add(&delta);
        self.lhs = format!("\\sqrt{{{}}}", shifted(&self.bar, -a));
        self.rhs = format!("{}{}", self.bar, append(&shift.opposite()));
        let half = Numeric::from_fraction(1 + sigma, 2).unwrap_or_default();
        self.answers.push(Answer::Exact(half.add(&shift)));
    }

    /// `√(x - a) + b = √(x - c)`. Squaring leaves `s = √(x - a) = (a - c - b²)/(2b)`,
    /// kept only when `s ≥ 0` and `s + b ≥ 0`.
    fn radical_plus_constant(&mut self, a: i64, b: i64, c: i64) {
        self.lhs = format!(
            "\\sqrt{{{}}}{}",
            shifted(&self.bar, -a),
            append(&Numeric::from_number(b))
        );
        self.rhs = format!("\\sqrt{{{}}}", shifted(&self.bar, -c));
        let Ok(s) = Numeric::from_fraction(a - c - b * b, 2 * b) else {
            return;
        };
        if !s.is_negative() && !s.add(&Numeric::from_number(b)).is_negative() {
            let root = Numeric::from_number(a).add(&s.multiply(&s));
            self.answers.push(Answer::Exact(root));
        } else {
            debug!(target: "equation", a, b, c, "squared root is extraneous");
        }
    }

    /// `√((x - a)² + (x - b)²) = c`, solved by the evaluator.
    fn radical_of_square_sum(&mut self, a: i64, b: i64, c: i64) {
        let bar = self.bar.clone();
        self.lhs = format!(
            "\\sqrt{{{}^{{2}} + {}^{{2}}}}",
            parens(&shifted(&bar, -a)),
            parens(&shifted(&bar, -b))
        );
        self.rhs = c.to_string();
        let request = format!("solve(({bar} - ({a}))^2 + ({bar} - ({b}))^2 = {}, {bar})", c * c);
        match evaluator::latex(self.evaluator, &request) {
            Ok(list) => {
                let inner = list.trim().trim_start_matches('[').trim_end_matches(']');
                self.answers.extend(
                    inner
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| Answer::Rendered(s.to_string())),
                );
            }
            Err(err) => {
                warn!(target: "equation", %err, "irrational solve unavailable");
                self.answers.push(Answer::Rendered(PLACEHOLDER.to_string()));
            }
        }
    }

    /// `√(x - a) + √(x - b) = c`. With `u = √(x - a)` the root is
    /// `u = (c² + b - a)/(2c)`, real when `u ≥ 0`.
    fn radical_sum(&mut self, a: i64, b: i64, c: i64) {
        self.lhs = format!(
            "\\sqrt{{{}}} + \\sqrt{{{}}}",
            shifted(&self.bar, -a),
            shifted(&self.bar, -b)
        );
        self.rhs = c.to_string();
        let Ok(u) = Numeric::from_fraction(c * c + b - a, 2 * c) else {
            return;
        };
        if !u.is_negative() {
            let root = Numeric::from_number(a).add(&u.multiply(&u));
            self.answers.push(Answer::Exact(root));
        }
    }

    pub fn to_text(&self) -> String {
        format!("{} {} {}", self.lhs, self.relation.text(), self.rhs)
    }

    pub fn to_tex(&self) -> String {
        format!("{} {} {}", self.lhs, self.relation.tex(), self.rhs)
    }

    /// `$x=…$` per distinct answer, joined by `; `.
    pub fn solutions_tex(&self) -> String {
        let mut seen: Vec<String> = Vec::new();
        for answer in &self.answers {
            let tex = format!("${}={}$", self.bar, answer.to_tex());
            if !seen.contains(&tex) {
                seen.push(tex);
            }
        }
        if seen.is_empty() {
            "No solution".to_string()
        } else {
            seen.join("; ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Unavailable;

    fn n(value: i64) -> Numeric {
        Numeric::from_number(value)
    }

    fn sqrt(value: Numeric) -> Numeric {
        value
            .sqrt_exact()
            .unwrap_or_else(|| panic!("{value} is not a rational square"))
    }

    fn exact_answers(eq: &Equation<'_>) -> Vec<Numeric> {
        eq.answers()
            .iter()
            .map(|a| a.as_exact().cloned().expect("exact answer"))
            .collect()
    }

    #[test]
    fn radical_equals_constant_substitutes_back() {
        let mut rnd = Random::from_seed(1);
        let mut eq = Equation::new(&mut rnd, "x");
        eq.radical_equals_constant(3, -2, 4);
        assert_eq!(eq.rhs(), "4");
        let roots = exact_answers(&eq);
        assert_eq!(roots, vec![n(6)]);
        assert_eq!(sqrt(n(3).multiply(&roots[0]).add(&n(-2))), n(4));
    }

    #[test]
    fn radical_equals_line_keeps_the_positive_branch() {
        for a in [-4, 2, 7] {
            for sigma in [3, 5, 7, 9] {
                let mut rnd = Random::from_seed(2);
                let mut eq = Equation::new(&mut rnd, "x");
                eq.radical_equals_line(a, sigma);
                let delta = Numeric::from_fraction(sigma * sigma - 1, 4).unwrap();
                let line = |x: &Numeric| x.subtract(&n(a)).subtract(&delta);

                let roots = exact_answers(&eq);
                assert_eq!(roots.len(), 1, "a={a} sigma={sigma}");
                assert_eq!(sqrt(roots[0].subtract(&n(a))), line(&roots[0]));

                // The other branch u = (1 - σ)/2 < 0 squares to a root that fails.
                let u = Numeric::from_fraction(1 - sigma, 2).unwrap();
                let extraneous = n(a).add(&u.multiply(&u));
                assert_ne!(sqrt(extraneous.subtract(&n(a))), line(&extraneous));
            }
        }
    }

    #[test]
    fn radical_plus_constant_answers_are_exactly_the_solutions() {
        for a in -4..=4 {
            for b in (-4..=4).filter(|b| *b != 0) {
                for c in -4..=4 {
                    let mut rnd = Random::from_seed(3);
                    let mut eq = Equation::new(&mut rnd, "x");
                    eq.radical_plus_constant(a, b, c);

                    // Squaring leaves one candidate; it belongs to the answers iff it holds.
                    let s = Numeric::from_fraction(a - c - b * b, 2 * b).unwrap();
                    let candidate = n(a).add(&s.multiply(&s));
                    let holds = sqrt(candidate.subtract(&n(a))).add(&n(b))
                        == sqrt(candidate.subtract(&n(c)));
                    let expected = if holds { vec![candidate] } else { Vec::new() };
                    assert_eq!(exact_answers(&eq), expected, "a={a} b={b} c={c}");
                }
            }
        }
    }

    #[test]
    fn sign_check_rejects_the_squared_root() {
        // s = 1 but s + b = -2: x = 2 gives √1 - 3 = -2 against √4 = 2.
        let mut rnd = Random::from_seed(4);
        let mut eq = Equation::new(&mut rnd, "x");
        eq.radical_plus_constant(1, -3, -2);
        assert!(eq.answers().is_empty());
        assert_eq!(eq.solutions_tex(), "No solution");

        let mut rnd = Random::from_seed(4);
        let mut eq = Equation::new(&mut rnd, "x");
        eq.radical_plus_constant(6, 1, 1);
        assert_eq!(exact_answers(&eq), vec![n(10)]);
        assert_eq!(eq.solutions_tex(), "$x=10$");
    }

    #[test]
    fn radical_sum_answers_are_exactly_the_solutions() {
        for a in -5..=-1 {
            for b in (a - 5)..a {
                for c in 1..=6 {
                    let mut rnd = Random::from_seed(5);
                    let mut eq = Equation::new(&mut rnd, "x");
                    eq.radical_sum(a, b, c);
                    let roots = exact_answers(&eq);
                    if c * c < a - b {
                        // The left side is at least √(a - b).
                        assert!(roots.is_empty(), "a={a} b={b} c={c}");
                        continue;
                    }
                    assert_eq!(roots.len(), 1, "a={a} b={b} c={c}");
                    let x = &roots[0];
                    assert_eq!(sqrt(x.subtract(&n(a))).add(&sqrt(x.subtract(&n(b)))), n(c));
                }
            }
        }
    }

    #[test]
    fn radical_of_square_sum_delegates_the_solve() {
        let mut rnd = Random::from_seed(6);
        let mut eq = Equation::new(&mut rnd, "x");
        eq.radical_of_square_sum(1, -1, 2);
        let roots: Vec<i64> = eq
            .answers()
            .iter()
            .map(|a| a.to_tex().parse().expect("integer root"))
            .collect();
        assert_eq!(roots, vec![-1, 1]);
        for x in roots {
            assert_eq!((x - 1).pow(2) + (x + 1).pow(2), 4);
        }

        let mut rnd = Random::from_seed(6);
        let mut eq = Equation::new(&mut rnd, "x");
        eq.radical_of_square_sum(1, -1, 1);
        assert_eq!(eq.solutions_tex(), "No solution");

        let mut rnd = Random::from_seed(6);
        let mut eq = Equation::new(&mut rnd, "x").with_evaluator(&Unavailable);
        eq.radical_of_square_sum(1, -1, 2);
        assert_eq!(eq.answers(), &[Answer::Rendered(PLACEHOLDER.to_string())]);
    }
}
