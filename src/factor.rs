//! Factoring over the rationals: square-free split, rational roots, and the
//! quartic-into-quadratics split for what is left.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::expr::Rational;
use crate::format::parens;
use crate::numeric::Numeric;
use crate::polynomial::Polynomial;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    pub constant: Numeric,
    pub factors: Vec<Factor>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factor {
    /// Primitive integer polynomial with a positive leading coefficient.
    pub poly: Polynomial,
    pub multiplicity: usize,
}

impl Factorization {
    pub fn expand(&self) -> Polynomial {
        self.factors.iter().fold(
            Polynomial::constant(self.constant.clone()),
            |acc, factor| acc.multiply(&factor.poly.power(factor.multiplicity as u32)),
        )
    }

    /// Real roots visible in the factorization, with multiplicity.
    pub fn rational_roots(&self) -> Vec<Numeric> {
        let mut roots = Vec::new();
        for factor in &self.factors {
            if factor.poly.degree() != 1 {
                continue;
            }
            let root = factor.poly.coef(0).opposite().multiply(
                &factor
                    .poly
                    .coef(1)
                    .inverse()
                    .unwrap_or_else(|_| Numeric::zero()),
            );
            roots.extend(std::iter::repeat(root).take(factor.multiplicity));
        }
        roots
    }

    pub fn to_tex(&self, var: &str) -> String {
        if self.constant.is_zero() {
            return "0".to_string();
        }
        if self.factors.is_empty() {
            return self.constant.to_tex();
        }
        let lone = self.factors.len() == 1 && self.factors[0].multiplicity == 1;
        let body: Vec<String> = self
            .factors
            .iter()
            .map(|factor| {
                let inner = factor.poly.to_tex(var);
                let is_bare = factor.poly.degree() == 1
                    && factor.poly.constant_term().is_zero()
                    && factor.poly.leading_coef().is_one();
                let base = if is_bare || (lone && self.constant.is_one()) {
                    inner
                } else {
                    parens(&inner)
                };
                if factor.multiplicity > 1 {
                    format!("{base}^{{{}}}", factor.multiplicity)
                } else {
                    base
                }
            })
            .collect();
        let prefix = if self.constant.is_one() {
            String::new()
        } else if self.constant.opposite().is_one() {
            "-".to_string()
        } else {
            self.constant.to_tex()
        };
        format!("{prefix}{}", body.join(" \\cdot "))
    }
}

pub fn factor_polynomial(poly: &Polynomial) -> Factorization {
    if poly.is_zero() {
        return Factorization {
            constant: Numeric::zero(),
            factors: Vec::new(),
        };
    }

    let mut constant = poly.leading_coef().clone();
    let monic = poly.monic();
    let mut factors = Vec::new();

    for (part, multiplicity) in monic.square_free_decomposition() {
        let mut stack = vec![part];
        while let Some(current) = stack.pop() {
            if current.degree() == 0 {
                continue;
            }
            if current.degree() == 1 {
                factors.push((current, multiplicity));
                continue;
            }

            if let Some(root) = find_rational_root(&current) {
                let divider = Polynomial::new(vec![Numeric::one(), root.opposite()]);
                if let Some(next) = current.div_exact(&divider) {
                    factors.push((divider, multiplicity));
                    stack.push(next);
                    continue;
                }
            }

            if current.degree() == 4 {
                if let Some((a, b)) = split_quartic(&current) {
                    stack.push(a);
                    stack.push(b);
                    continue;
                }
            }

            factors.push((current, multiplicity));
        }
    }

    // Monic factors become primitive integer ones; the scale moves into the constant.
    let mut primitive = Vec::with_capacity(factors.len());
    for (monic_factor, multiplicity) in factors {
        let (content, part) = monic_factor.content_and_primitive_part();
        if let Ok(scale) = content.power(multiplicity as i32) {
            constant = constant.multiply(&scale);
        }
        primitive.push(Factor {
            poly: part,
            multiplicity,
        });
    }

    primitive.sort_by(|a, b| {
        a.poly
            .degree()
            .cmp(&b.poly.degree())
            .then_with(|| b.poly.coefs().cmp(a.poly.coefs()))
    });

    Factorization {
        constant,
        factors: primitive,
    }
}

pub fn find_rational_root(poly: &Polynomial) -> Option<Numeric> {
    let degree = poly.degree();
    if degree == 0 {
        return None;
    }
    if poly.constant_term().is_zero() {
        return Some(Numeric::zero());
    }
    if degree == 1 {
        return poly.coef(0).opposite().divide(&poly.coef(1)).ok();
    }

    let (_, primitive) = poly.content_and_primitive_part();
    let leading = primitive.leading_coef().numer().clone();
    let constant = primitive.constant_term().numer().clone();

    let mut candidates = Vec::new();
    for p in divisors(&constant) {
        for q in divisors(&leading) {
            let candidate = Rational::new(p.clone(), q);
            candidates.push(candidate.clone());
            candidates.push(-candidate);
        }
    }
    candidates.sort();
    candidates.dedup();

    candidates
        .into_iter()
        .map(Numeric::from_rational)
        .find(|candidate| poly.evaluate(candidate).is_zero())
}

fn divisors(n: &BigInt) -> Vec<BigInt> {
    let abs_n = n.abs();
    if abs_n.is_zero() {
        return vec![BigInt::one()];
    }
    let mut result = Vec::new();
    let mut d = BigInt::one();
    while &d * &d <= abs_n {
        if abs_n.is_multiple_of(&d) {
            let other = &abs_n / &d;
            if other != d {
                result.push(other);
            }
            result.push(d.clone());
        }
        d += 1;
    }
    result.sort();
    result
}

fn rational_divisors(r: &Numeric) -> Vec<Numeric> {
    let mut result = Vec::new();
    for p in divisors(r.numer()) {
        for q in divisors(r.denom()) {
            let frac = Numeric::from_rational(Rational::new(p.clone(), q));
            result.push(frac.opposite());
            result.push(frac);
        }
    }
    result.sort();
    result.dedup();
    result
}

/// Splits a monic quartic into `(x² + a x + b)(x² + c x + d)` with rational coefficients.
fn split_quartic(poly: &Polynomial) -> Option<(Polynomial, Polynomial)> {
    if poly.degree() != 4 || !poly.leading_coef().is_one() {
        return None;
    }

    let p3 = poly.coef(3);
    let p2 = poly.coef(2);
    let p1 = poly.coef(1);
    let p0 = poly.coef(0);
    let two = Numeric::from_number(2);
    let four = Numeric::from_number(4);

    let candidates = rational_divisors(&p0);
    for b in &candidates {
        let Ok(d) = p0.divide(b) else {
            continue;
        };
        let ac = p2.subtract(b).subtract(&d);
        let discriminant = p3.multiply(&p3).subtract(&four.multiply(&ac));
        let Some(sqrt) = discriminant.sqrt_exact() else {
            continue;
        };
        for a in [p3.add(&sqrt), p3.subtract(&sqrt)] {
            let Ok(a) = a.divide(&two) else {
                continue;
            };
            let c = p3.subtract(&a);
            if a.multiply(&d).add(&b.multiply(&c)) == p1 {
                return Some((
                    Polynomial::new(vec![Numeric::one(), a, b.clone()]),
                    Polynomial::new(vec![Numeric::one(), c, d]),
                ));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartic_splits_into_irreducible_quadratics() {
        // (x² + x + 1)(x² + 2) = x⁴ + x³ + 3x² + 2x + 2
        let poly = Polynomial::from_ints(&[1, 1, 3, 2, 2]);
        let (a, b) = split_quartic(&poly).unwrap();
        assert_eq!(a.multiply(&b), poly);
    }
}
