//! Partial-fraction decomposition by undetermined coefficients.

use num_traits::ToPrimitive;

use crate::error::{MathError, Result};
use crate::expr::Expr;
use crate::factor::factor_polynomial;
use crate::format::parens;
use crate::numeric::Numeric;
use crate::polynomial::Polynomial;
use crate::solver::solve_linear;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialTerm {
    pub numerator: Polynomial,
    pub base: Polynomial,
    pub power: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialFractions {
    pub quotient: Polynomial,
    pub terms: Vec<PartialTerm>,
}

/// Writes `numerator / denominator` as a polynomial plus a sum of `Pᵢⱼ / fᵢʲ`
/// with `deg Pᵢⱼ < deg fᵢ`.
pub fn partial_fractions(numerator: &Polynomial, denominator: &Polynomial) -> Result<PartialFractions> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let common = Polynomial::gcd(numerator, denominator);
    let numerator = numerator.div_exact(&common).unwrap_or_else(|| numerator.clone());
    let denominator = denominator
        .div_exact(&common)
        .unwrap_or_else(|| denominator.clone());

    let division = numerator.divide(&denominator)?;
    if division.remainder.is_zero() || denominator.degree() == 0 {
        return Ok(PartialFractions {
            quotient: division.quotient,
            terms: Vec::new(),
        });
    }

    let factorization = factor_polynomial(&denominator);
    let scaled = division.remainder.scale(&factorization.constant.inverse()?);
    let primitive = factorization
        .factors
        .iter()
        .fold(Polynomial::one(), |acc, f| {
            acc.multiply(&f.poly.power(f.multiplicity as u32))
        });

    // One column per unknown coefficient: x^t · primitive / f^j.
    let size = primitive.degree();
    let mut columns: Vec<Polynomial> = Vec::with_capacity(size);
    let mut shape: Vec<(usize, usize)> = Vec::new();
    for (index, factor) in factorization.factors.iter().enumerate() {
        for power in 1..=factor.multiplicity {
            let cofactor = primitive
                .div_exact(&factor.poly.power(power as u32))
                .ok_or_else(|| MathError::DegenerateInput("factor does not divide".to_string()))?;
            for t in 0..factor.poly.degree() {
                columns.push(cofactor.multiply(&Polynomial::monomial(Numeric::one(), t)));
            }
            shape.push((index, power));
        }
    }

    let matrix: Vec<Vec<Numeric>> = (0..size)
        .map(|row| columns.iter().map(|col| col.coef(row)).collect())
        .collect();
    let rhs: Vec<Numeric> = (0..size).map(|row| scaled.coef(row)).collect();
    let unknowns = solve_linear(&matrix, &rhs)?;

    let mut terms = Vec::new();
    let mut cursor = 0;
    for (index, power) in shape {
        let base = &factorization.factors[index].poly;
        let width = base.degree();
        let mut coefs: Vec<Numeric> = unknowns[cursor..cursor + width].to_vec();
        coefs.reverse();
        cursor += width;
        let numerator = Polynomial::new(coefs);
        if numerator.is_zero() {
            continue;
        }
        terms.push(PartialTerm {
            numerator,
            base: base.clone(),
            power,
        });
    }

    Ok(PartialFractions {
        quotient: division.quotient,
        terms,
    })
}

impl PartialFractions {
    pub fn evaluate(&self, x: &Numeric) -> Option<Numeric> {
        let mut total = self.quotient.evaluate(x);
        for term in &self.terms {
            let denom = term.base.evaluate(x).power(term.power as i32).ok()?;
            total = total.add(&term.numerator.evaluate(x).divide(&denom).ok()?);
        }
        Some(total)
    }

    pub fn to_tex(&self, var: &str) -> String {
        let mut out = String::new();
        if !self.quotient.is_zero() || self.terms.is_empty() {
            out.push_str(&self.quotient.to_tex(var));
        }
        for term in &self.terms {
            let base = term.base.to_tex(var);
            let denom = if term.power > 1 {
                format!("{}^{{{}}}", parens(&base), term.power)
            } else {
                base.clone()
            };
            let (negative, numer) = if term.numerator.degree() == 0 {
                let c = term.numerator.constant_term();
                (c.is_negative(), c.abs())
            } else {
                (false, Numeric::zero())
            };
            let fraction = if term.numerator.degree() == 0 {
                let (n, d) = (numer.numer(), numer.denom());
                if numer.is_integer() {
                    format!("\\frac{{{n}}}{{{denom}}}")
                } else if term.power > 1 {
                    format!("\\frac{{{n}}}{{{d}{denom}}}")
                } else {
                    format!("\\frac{{{n}}}{{{d}{}}}", parens(&base))
                }
            } else {
                format!("\\frac{{{}}}{{{denom}}}", term.numerator.to_tex(var))
            };
            if out.is_empty() {
                if negative {
                    out.push('-');
                }
            } else {
                out.push_str(if negative { " - " } else { " + " });
            }
            out.push_str(&fraction);
        }
        out
    }
}

/// Reads an expression as `N(var) / D(var)` reduced to lowest terms.
pub fn rational_function(expr: &Expr, var: &str) -> Option<(Polynomial, Polynomial)> {
    let (n, d) = fraction_parts(expr, var)?;
    if d.is_zero() {
        return None;
    }
    let common = Polynomial::gcd(&n, &d);
    let n = n.div_exact(&common)?;
    let d = d.div_exact(&common)?;
    // Normalise so the denominator is monic.
    let lead = d.leading_coef().inverse().ok()?;
    Some((n.scale(&lead), d.scale(&lead)))
}

fn fraction_parts(expr: &Expr, var: &str) -> Option<(Polynomial, Polynomial)> {
    match expr {
        Expr::Add(a, b) | Expr::Sub(a, b) => {
            let (an, ad) = fraction_parts(a, var)?;
            let (bn, bd) = fraction_parts(b, var)?;
            let left = an.multiply(&bd);
            let right = bn.multiply(&ad);
            let numerator = if matches!(expr, Expr::Add(..)) {
                left.add(&right)
            } else {
                left.subtract(&right)
            };
            Some((numerator, ad.multiply(&bd)))
        }
        Expr::Mul(a, b) => {
            let (an, ad) = fraction_parts(a, var)?;
            let (bn, bd) = fraction_parts(b, var)?;
            Some((an.multiply(&bn), ad.multiply(&bd)))
        }
        Expr::Div(a, b) => {
            let (an, ad) = fraction_parts(a, var)?;
            let (bn, bd) = fraction_parts(b, var)?;
            if bn.is_zero() {
                return None;
            }
            Some((an.multiply(&bd), ad.multiply(&bn)))
        }
        Expr::Neg(inner) => {
            let (n, d) = fraction_parts(inner, var)?;
            Some((n.negate(), d))
        }
        Expr::Pow(base, _) => {
            let exponent = integer_exponent(expr)?;
            let (n, d) = fraction_parts(base, var)?;
            let k = u32::try_from(exponent.unsigned_abs()).ok()?;
            if exponent >= 0 {
                Some((n.power(k), d.power(k)))
            } else if n.is_zero() {
                None
            } else {
                Some((d.power(k), n.power(k)))
            }
        }
        Expr::Sqrt(_) => None,
        _ => Polynomial::from_expr(expr, var).map(|p| (p, Polynomial::one())),
    }
}

fn integer_exponent(expr: &Expr) -> Option<i64> {
    let Expr::Pow(_, exp) = expr else {
        return None;
    };
    match exp.as_ref() {
        Expr::Constant(c) if c.is_integer() => c.to_integer().to_i64(),
        Expr::Neg(inner) => match inner.as_ref() {
            Expr::Constant(c) if c.is_integer() => c.to_integer().to_i64().map(|k| -k),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_poles() {
        // (x + 1) / ((x - 1)(x + 2)) = (2/3)/(x - 1) + (1/3)/(x + 2)
        let num = Polynomial::from_ints(&[1, 1]);
        let den = Polynomial::from_ints(&[1, 1, -2]);
        let pf = partial_fractions(&num, &den).unwrap();
        assert_eq!(pf.terms.len(), 2);
        assert!(pf.quotient.is_zero());
        for x in [3, 5, -7] {
            let x = Numeric::from_number(x);
            let expected = num.evaluate(&x).divide(&den.evaluate(&x)).unwrap();
            assert_eq!(pf.evaluate(&x), Some(expected));
        }
    }

    fn assert_matches_quotient(num: &Polynomial, den: &Polynomial, pf: &PartialFractions) {
        for x in [0, 1, 4, -5, 7] {
            let x = Numeric::from_number(x);
            let expected = num.evaluate(&x).divide(&den.evaluate(&x)).unwrap();
            assert_eq!(pf.evaluate(&x), Some(expected), "at {x}");
        }
    }

    #[test]
    fn repeated_linear_factor() {
        // (x + 1) / ((x - 2)^2 (x + 3)) = (2/25)/(x - 2) + (3/5)/(x - 2)^2 - (2/25)/(x + 3)
        let num = Polynomial::from_ints(&[1, 1]);
        let den = Polynomial::from_ints(&[1, -1, -8, 12]);
        let pf = partial_fractions(&num, &den).unwrap();
        assert!(pf.quotient.is_zero());
        assert_eq!(pf.terms.len(), 3);
        let squared = pf.terms.iter().find(|t| t.power == 2).unwrap();
        assert_eq!(squared.base, Polynomial::from_ints(&[1, -2]));
        assert_eq!(squared.numerator.constant_term(), &Numeric::from_fraction(3, 5).unwrap());
        assert_matches_quotient(&num, &den, &pf);
    }

    #[test]
    fn repeated_factor_is_bracketed_once() {
        let num = Polynomial::from_ints(&[1, 1]);
        let den = Polynomial::from_ints(&[1, -1, -8, 12]);
        let tex = partial_fractions(&num, &den).unwrap().to_tex("x");
        assert!(tex.contains("\\frac{3}{5\\left(x - 2\\right)^{2}}"), "{tex}");
        assert!(tex.contains("\\frac{2}{25\\left(x - 2\\right)}"), "{tex}");
        assert!(!tex.contains("\\left(\\left("), "{tex}");
    }

    #[test]
    fn linear_times_irreducible_quadratic() {
        // (x - 1) / ((x + 1)(x^2 + 2)) = (-2/3)/(x + 1) + ((2/3)x + 1/3)/(x^2 + 2)
        let num = Polynomial::from_ints(&[1, -1]);
        let den = Polynomial::from_ints(&[1, 1, 2, 2]);
        let pf = partial_fractions(&num, &den).unwrap();
        assert_eq!(pf.terms.len(), 2);
        let quadratic = pf.terms.iter().find(|t| t.base.degree() == 2).unwrap();
        assert_eq!(quadratic.base, Polynomial::from_ints(&[1, 0, 2]));
        assert_eq!(
            quadratic.numerator,
            Polynomial::new(vec![
                Numeric::from_fraction(2, 3).unwrap(),
                Numeric::from_fraction(1, 3).unwrap(),
            ])
        );
        assert_matches_quotient(&num, &den, &pf);
    }
}
