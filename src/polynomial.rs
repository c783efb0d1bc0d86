//! Dense univariate polynomials over the rationals, highest degree first.

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::warn;

use crate::error::{MathError, Result};
use crate::evaluator::{self, SymbolicEvaluator};
use crate::expr::{Expr, Rational};
use crate::format::parens;
use crate::numeric::Numeric;

#[derive(Clone, Debug)]
pub struct Polynomial {
    coefs: Vec<Numeric>,
    roots: Option<Vec<Numeric>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Division {
    pub quotient: Polynomial,
    pub remainder: Polynomial,
}

/// Drops leading zeros; the constant term always survives.
fn normalize(coefs: Vec<Numeric>) -> Vec<Numeric> {
    match coefs.iter().position(|c| !c.is_zero()) {
        Some(first) => coefs.into_iter().skip(first).collect(),
        None => vec![Numeric::zero()],
    }
}

/// `(d·x − n)` for the root `n/d`, so the factor keeps integer coefficients.
pub(crate) fn root_binomial(root: &Numeric) -> (Numeric, Numeric) {
    let scale = Numeric::from_rational(Rational::from_integer(root.denom().clone()));
    let constant = root.opposite().multiply(&scale);
    (scale, constant)
}

impl Polynomial {
    pub fn new(coefs: Vec<Numeric>) -> Self {
        Polynomial {
            coefs: normalize(coefs),
            roots: None,
        }
    }

    pub fn from_ints(coefs: &[i64]) -> Self {
        Polynomial::new(coefs.iter().map(|c| Numeric::from_number(*c)).collect())
    }

    pub fn zero() -> Self {
        Polynomial::new(vec![Numeric::zero()])
    }

    pub fn one() -> Self {
        Polynomial::constant(Numeric::one())
    }

    pub fn constant(c: Numeric) -> Self {
        Polynomial::new(vec![c])
    }

    /// `coef · x^degree`.
    pub fn monomial(coef: Numeric, degree: usize) -> Self {
        let mut coefs = vec![Numeric::zero(); degree + 1];
        coefs[0] = coef;
        Polynomial::new(coefs)
    }

    /// Builds `∏(dᵢ·x − nᵢ)` and remembers the roots for factored rendering.
    pub fn from_roots(roots: &[Numeric]) -> Self {
        if roots.is_empty() {
            warn!(target: "polynomial", "from_roots called with no roots; using the constant 1");
            return Polynomial::one();
        }
        let mut poly = Polynomial::one();
        for root in roots {
            let (a, b) = root_binomial(root);
            poly = poly.multiply(&Polynomial::new(vec![a, b]));
        }
        poly.roots = Some(roots.to_vec());
        poly
    }

    pub fn degree(&self) -> usize {
        self.coefs.len() - 1
    }

    pub fn coefs(&self) -> &[Numeric] {
        &self.coefs
    }

    /// Coefficient of `x^power`.
    pub fn coef(&self, power: usize) -> Numeric {
        if power > self.degree() {
            return Numeric::zero();
        }
        self.coefs[self.degree() - power].clone()
    }

    pub fn leading_coef(&self) -> &Numeric {
        &self.coefs[0]
    }

    pub fn constant_term(&self) -> &Numeric {
        &self.coefs[self.degree()]
    }

    pub fn roots(&self) -> Option<&[Numeric]> {
        self.roots.as_deref()
    }

    pub fn is_zero(&self) -> bool {
        self.coefs.len() == 1 && self.coefs[0].is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.coefs.len() == 1 && self.coefs[0].is_one()
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let len = self.coefs.len().max(other.coefs.len());
        let pad_a = len - self.coefs.len();
        let pad_b = len - other.coefs.len();
        let coefs = (0..len)
            .map(|i| {
                let a = if i >= pad_a { self.coefs[i - pad_a].clone() } else { Numeric::zero() };
                let b = if i >= pad_b { other.coefs[i - pad_b].clone() } else { Numeric::zero() };
                a + b
            })
            .collect();
        Polynomial::new(coefs)
    }

    pub fn negate(&self) -> Polynomial {
        Polynomial::new(self.coefs.iter().map(Numeric::opposite).collect())
    }

    pub fn subtract(&self, other: &Polynomial) -> Polynomial {
        self.add(&other.negate())
    }

    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        let mut product = vec![Numeric::zero(); self.coefs.len() + other.coefs.len() - 1];
        for (i, a) in self.coefs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (k, b) in other.coefs.iter().enumerate() {
                product[i + k] = product[i + k].add(&a.multiply(b));
            }
        }
        Polynomial::new(product)
    }

    pub fn scale(&self, k: &Numeric) -> Polynomial {
        Polynomial::new(self.coefs.iter().map(|c| c.multiply(k)).collect())
    }

    pub fn power(&self, exp: u32) -> Polynomial {
        if exp == 0 {
            return Polynomial::one();
        }
        if exp == 1 {
            return self.clone();
        }
        let mut result = Polynomial::one();
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result.multiply(&base);
            }
            base = base.multiply(&base);
            n /= 2;
        }
        result
    }

    /// Long division. A dividend of lower degree comes back untouched as the remainder.
    pub fn divide(&self, divisor: &Polynomial) -> Result<Division> {
        if divisor.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let (quotient, remainder) = self.long_division(divisor);
        Ok(Division {
            quotient,
            remainder,
        })
    }

    fn long_division(&self, divisor: &Polynomial) -> (Polynomial, Polynomial) {
        let Ok(lead_inv) = divisor.leading_coef().inverse() else {
            return (Polynomial::zero(), self.clone());
        };
        if self.degree() < divisor.degree() {
            return (Polynomial::zero(), self.clone());
        }
        let mut quotient = Polynomial::zero();
        let mut remainder = self.clone();
        remainder.roots = None;
        while !remainder.is_zero() && remainder.degree() >= divisor.degree() {
            let coef = remainder.leading_coef().multiply(&lead_inv);
            let term = Polynomial::monomial(coef, remainder.degree() - divisor.degree());
            remainder = remainder.subtract(&divisor.multiply(&term));
            quotient = quotient.add(&term);
        }
        (quotient, remainder)
    }

    pub fn div_exact(&self, divisor: &Polynomial) -> Option<Polynomial> {
        let division = self.divide(divisor).ok()?;
        division.remainder.is_zero().then_some(division.quotient)
    }

    pub fn derive(&self) -> Polynomial {
        let degree = self.degree();
        if degree == 0 {
            return Polynomial::zero();
        }
        let coefs = self.coefs[..degree]
            .iter()
            .enumerate()
            .map(|(i, c)| c.multiply(&Numeric::from_number((degree - i) as i64)))
            .collect();
        Polynomial::new(coefs)
    }

    /// Antiderivative with `cte` as the constant of integration.
    pub fn integrate(&self, cte: &Numeric) -> Polynomial {
        let degree = self.degree();
        let mut coefs: Vec<Numeric> = self
            .coefs
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let power = (degree - i + 1) as i64;
                c.multiply(&Numeric::from_rational(Rational::new(
                    BigInt::one(),
                    BigInt::from(power),
                )))
            })
            .collect();
        coefs.push(cte.clone());
        Polynomial::new(coefs)
    }

    pub fn evaluate(&self, x: &Numeric) -> Numeric {
        self.coefs
            .iter()
            .fold(Numeric::zero(), |acc, c| acc.multiply(x).add(c))
    }

    pub fn monic(&self) -> Polynomial {
        match self.leading_coef().inverse() {
            Ok(inv) => self.scale(&inv),
            Err(_) => self.clone(),
        }
    }

    pub fn gcd(a: &Polynomial, b: &Polynomial) -> Polynomial {
        let mut r0 = a.clone();
        let mut r1 = b.clone();
        while !r1.is_zero() {
            let (_, r) = r0.long_division(&r1);
            r0 = r1;
            r1 = r;
        }
        r0.monic()
    }

    /// Splits into `content · primitive` with an integer primitive part whose
    /// leading coefficient is positive.
    pub fn content_and_primitive_part(&self) -> (Numeric, Polynomial) {
        if self.is_zero() {
            return (Numeric::zero(), Polynomial::zero());
        }
        let mut lcm = BigInt::one();
        for coeff in &self.coefs {
            lcm = lcm.lcm(coeff.denom());
        }

        let mut gcd_num = BigInt::zero();
        let mut scaled_nums = Vec::with_capacity(self.coefs.len());
        for coeff in &self.coefs {
            let scaled = coeff.as_rational() * Rational::from_integer(lcm.clone());
            let num = scaled.numer().clone();
            if !num.is_zero() {
                gcd_num = if gcd_num.is_zero() { num.abs() } else { gcd_num.gcd(&num) };
            }
            scaled_nums.push(num);
        }

        let mut primitive = Polynomial::new(
            scaled_nums
                .into_iter()
                .map(|n| Numeric::from_rational(Rational::from_integer(n / &gcd_num)))
                .collect(),
        );
        let mut content = Numeric::from_rational(Rational::new(gcd_num, lcm));
        if primitive.leading_coef().is_negative() {
            primitive = primitive.negate();
            content = content.opposite();
        }
        (content, primitive)
    }

    pub fn square_free_decomposition(&self) -> Vec<(Polynomial, usize)> {
        if self.is_zero() || self.degree() == 0 {
            return Vec::new();
        }

        let mut result = Vec::new();
        let mut i = 1;
        let mut g = Polynomial::gcd(self, &self.derive());
        let mut y = self.div_exact(&g).unwrap_or_else(Polynomial::zero);

        while !y.is_one() && !y.is_zero() {
            let z = Polynomial::gcd(&y, &g);
            let factor = y.div_exact(&z).unwrap_or_else(Polynomial::zero);
            if !factor.is_one() && factor.degree() > 0 {
                result.push((factor.monic(), i));
            }
            y = z.clone();
            g = g.div_exact(&z).unwrap_or_else(Polynomial::zero);
            i += 1;
        }

        if g.degree() > 0 {
            for (part, mult) in g.square_free_decomposition() {
                result.push((part, mult + i - 1));
            }
        }

        result
    }

    /// Reads a polynomial in `var` out of an expression tree, if it is one.
    pub fn from_expr(expr: &Expr, var: &str) -> Option<Polynomial> {
        match expr {
            Expr::Constant(c) => Some(Polynomial::constant(Numeric::from_rational(c.clone()))),
            Expr::Variable(v) if v == var => Some(Polynomial::from_ints(&[1, 0])),
            Expr::Variable(_) => None,
            Expr::Add(a, b) => Some(Self::from_expr(a, var)?.add(&Self::from_expr(b, var)?)),
            Expr::Sub(a, b) => Some(Self::from_expr(a, var)?.subtract(&Self::from_expr(b, var)?)),
            Expr::Mul(a, b) => {
                Some(Self::from_expr(a, var)?.multiply(&Self::from_expr(b, var)?))
            }
            Expr::Div(a, b) => {
                let denom = Self::from_expr(b, var)?;
                if denom.degree() != 0 {
                    return None;
                }
                let inv = denom.leading_coef().inverse().ok()?;
                Some(Self::from_expr(a, var)?.scale(&inv))
            }
            Expr::Neg(inner) => Some(Self::from_expr(inner, var)?.negate()),
            Expr::Pow(base, exp) => {
                let power = match extract_integer(exp) {
                    Some(k) if k >= 0 => k.to_u32()?,
                    _ => return None,
                };
                Some(Self::from_expr(base, var)?.power(power))
            }
            Expr::Sqrt(_) => None,
        }
    }

    pub fn to_tex(&self, bar: &str) -> String {
        self.render(bar, |magnitude, literal| {
            if literal.is_empty() {
                magnitude.to_tex()
            } else if magnitude.is_one() {
                literal.to_string()
            } else {
                format!("{}{literal}", magnitude.to_tex())
            }
        }, |exp| format!("^{{{exp}}}"))
    }

    /// Plain form accepted back by the expression parser.
    pub fn to_text(&self, bar: &str) -> String {
        self.render(bar, |magnitude, literal| {
            if literal.is_empty() {
                magnitude.to_string()
            } else if magnitude.is_one() {
                literal.to_string()
            } else {
                format!("{magnitude}*{literal}")
            }
        }, |exp| format!("^{exp}"))
    }

    fn render(
        &self,
        bar: &str,
        term: impl Fn(&Numeric, &str) -> String,
        power: impl Fn(usize) -> String,
    ) -> String {
        let degree = self.degree();
        let mut out = String::new();
        for (i, coef) in self.coefs.iter().enumerate() {
            if coef.is_zero() {
                continue;
            }
            let exp = degree - i;
            let literal = match exp {
                0 => String::new(),
                1 => bar.to_string(),
                _ => format!("{bar}{}", power(exp)),
            };
            let body = term(&coef.abs(), &literal);
            if out.is_empty() {
                if coef.is_negative() {
                    out.push('-');
                }
            } else {
                out.push_str(if coef.is_negative() { " - " } else { " + " });
            }
            out.push_str(&body);
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }

    /// Factored rendering from the attached roots, grouped by multiplicity.
    pub fn factor_form(&self, bar: &str) -> Option<String> {
        let roots = self.roots.as_ref()?;
        let mut groups: Vec<(&Numeric, usize)> = Vec::new();
        for root in roots {
            match groups.iter_mut().find(|(r, _)| *r == root) {
                Some(group) => group.1 += 1,
                None => groups.push((root, 1)),
            }
        }
        let factors: Vec<String> = groups
            .into_iter()
            .map(|(root, multiplicity)| {
                let exponent = if multiplicity > 1 {
                    format!("^{{{multiplicity}}}")
                } else {
                    String::new()
                };
                if root.is_zero() {
                    return format!("{bar}{exponent}");
                }
                let (a, b) = root_binomial(root);
                let linear = Polynomial::new(vec![a, b]).to_tex(bar);
                format!("{}{exponent}", parens(&linear))
            })
            .collect();
        Some(factors.join(" \\cdot "))
    }

    /// Factored form; without attached roots the factoring goes to `evaluator`.
    pub fn to_factor_form(&self, bar: &str, evaluator: &dyn SymbolicEvaluator) -> String {
        if let Some(form) = self.factor_form(bar) {
            return form;
        }
        evaluator::latex_or_placeholder(
            evaluator,
            &format!("factor({}, {bar})", self.to_text(bar)),
        )
    }
}

fn extract_integer(exp: &Expr) -> Option<i64> {
    match exp {
        Expr::Constant(c) if c.is_integer() => c.to_integer().to_i64(),
        Expr::Neg(inner) => extract_integer(inner).map(|k| -k),
        _ => None,
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Polynomial) -> bool {
        self.coefs == other.coefs
    }
}

impl Eq for Polynomial {}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text("x"))
    }
}

impl std::ops::Add for Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: Polynomial) -> Polynomial {
        Polynomial::add(&self, &rhs)
    }
}

impl std::ops::Sub for Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: Polynomial) -> Polynomial {
        self.subtract(&rhs)
    }
}

impl std::ops::Mul for Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: Polynomial) -> Polynomial {
        self.multiply(&rhs)
    }
}

impl std::ops::Neg for Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        self.negate()
    }
}
