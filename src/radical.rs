//! Radicals `coefficient · ⁿ√radicand` over monomials with rational coefficients.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{MathError, Result};
use crate::expr::Rational;
use crate::format::display_root;
use crate::numeric::Numeric;
use crate::random::Random;

/// Splits `n` into `outside^index · inside` with `inside` free of `index`-th powers.
/// The sign stays with `inside`.
pub(crate) fn extract_power(n: &BigInt, index: u32) -> (BigInt, BigInt) {
    let mut remaining = n.abs();
    let mut outside = BigInt::one();
    let mut inside = if n.is_negative() { -BigInt::one() } else { BigInt::one() };
    if remaining.is_zero() || index < 2 {
        return (BigInt::one(), n.clone());
    }
    let mut p = BigInt::from(2);
    while &p * &p <= remaining {
        let mut count = 0u32;
        while remaining.is_multiple_of(&p) {
            remaining /= &p;
            count += 1;
        }
        if count > 0 {
            outside *= p.pow(count / index);
            inside *= p.pow(count % index);
        }
        p += 1;
    }
    inside *= remaining;
    (outside, inside)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monomial {
    pub coef: Numeric,
    pub literals: BTreeMap<String, i64>,
}

impl Monomial {
    pub fn constant(coef: Numeric) -> Self {
        Monomial {
            coef,
            literals: BTreeMap::new(),
        }
    }

    pub fn one() -> Self {
        Monomial::constant(Numeric::one())
    }

    pub fn with_literal(mut self, name: impl Into<String>, exponent: i64) -> Self {
        let name = name.into();
        let entry = self.literals.entry(name.clone()).or_insert(0);
        *entry += exponent;
        if *entry == 0 {
            self.literals.remove(&name);
        }
        self
    }

    pub fn is_zero(&self) -> bool {
        self.coef.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.coef.is_one() && self.literals.is_empty()
    }

    pub fn multiply(&self, other: &Monomial) -> Monomial {
        let mut out = Monomial::constant(self.coef.multiply(&other.coef));
        out.literals = self.literals.clone();
        for (name, exp) in &other.literals {
            out = out.with_literal(name.clone(), *exp);
        }
        out
    }

    pub fn divide(&self, other: &Monomial) -> Result<Monomial> {
        let mut out = Monomial::constant(self.coef.divide(&other.coef)?);
        out.literals = self.literals.clone();
        for (name, exp) in &other.literals {
            out = out.with_literal(name.clone(), -exp);
        }
        Ok(out)
    }

    pub fn power(&self, n: u32) -> Monomial {
        Monomial {
            coef: Numeric::from_rational(Rational::new(
                self.coef.numer().pow(n),
                self.coef.denom().pow(n),
            )),
            literals: self
                .literals
                .iter()
                .map(|(name, exp)| (name.clone(), exp * i64::from(n)))
                .collect(),
        }
    }

    fn literals_tex(&self) -> String {
        self.literals
            .iter()
            .map(|(name, exp)| {
                if *exp == 1 {
                    name.clone()
                } else {
                    format!("{name}^{{{exp}}}")
                }
            })
            .collect()
    }

    pub fn to_tex(&self) -> String {
        let literals = self.literals_tex();
        if literals.is_empty() {
            return self.coef.to_tex();
        }
        if self.coef.is_one() {
            literals
        } else if self.coef.opposite().is_one() {
            format!("-{literals}")
        } else {
            format!("{}{literals}", self.coef.to_tex())
        }
    }
}

#[derive(Clone, Debug)]
pub struct RadicalOptions {
    pub range: i64,
    pub max_index: u32,
    pub algebraic: bool,
    pub use_coeff: bool,
    pub bar: String,
}

impl Default for RadicalOptions {
    fn default() -> Self {
        RadicalOptions {
            range: 10,
            max_index: 5,
            algebraic: false,
            use_coeff: false,
            bar: "x".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Radical {
    pub coefficient: Monomial,
    pub index: u32,
    pub radicand: Monomial,
}

impl Radical {
    pub fn new(coefficient: Monomial, index: u32, radicand: Monomial) -> Self {
        Radical {
            coefficient,
            index: index.max(1),
            radicand,
        }
    }

    /// `coef · ⁱⁿᵈᵉˣ√radicand` with numeric parts only.
    pub fn numeric(radicand: i64, index: u32, coef: Numeric) -> Self {
        Radical::new(
            Monomial::constant(coef),
            index,
            Monomial::constant(Numeric::from_number(radicand)),
        )
    }

    pub fn random(rnd: &mut Random, options: &RadicalOptions) -> Radical {
        let index = rnd.int_between(2, i64::from(options.max_index.max(2))) as u32;
        let mut radicand = Monomial::constant(rnd.numeric_between(2, options.range.max(2)));
        if options.algebraic {
            let exponent = rnd.int_between(1, 2 * i64::from(index));
            radicand = radicand.with_literal(options.bar.clone(), exponent);
        }
        let coefficient = if options.use_coeff {
            Monomial::constant(rnd.numeric_between_not_zero(-options.range, options.range))
        } else {
            Monomial::one()
        };
        Radical::new(coefficient, index, radicand)
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero() || self.radicand.is_zero()
    }

    pub fn multiply(&self, other: &Radical) -> Radical {
        let index = self.index.lcm(&other.index);
        let radicand = self
            .radicand
            .power(index / self.index)
            .multiply(&other.radicand.power(index / other.index));
        Radical::new(self.coefficient.multiply(&other.coefficient), index, radicand)
    }

    pub fn divide(&self, other: &Radical) -> Result<Radical> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let index = self.index.lcm(&other.index);
        let radicand = self
            .radicand
            .power(index / self.index)
            .divide(&other.radicand.power(index / other.index))?;
        Ok(Radical::new(
            self.coefficient.divide(&other.coefficient)?,
            index,
            radicand,
        ))
    }

    pub fn power(&self, n: u32) -> Radical {
        Radical::new(self.coefficient.power(n), self.index, self.radicand.power(n))
    }

    /// `ⁿ√` of this radical. Enter the coefficient first to keep it exact.
    pub fn root(&self, n: u32) -> Radical {
        let outer = self.enter_coefficient();
        Radical::new(outer.coefficient, outer.index * n.max(1), outer.radicand)
    }

    /// Moves the coefficient under the root. For an even index a negative
    /// coefficient leaves its sign outside.
    pub fn enter_coefficient(&self) -> Radical {
        let mut coef = self.coefficient.clone();
        let mut sign = Monomial::one();
        if coef.coef.is_negative() && self.index % 2 == 0 {
            coef.coef = coef.coef.abs();
            sign = Monomial::constant(Numeric::from_number(-1));
        }
        let radicand = self.radicand.multiply(&coef.power(self.index));
        Radical::new(sign, self.index, radicand)
    }

    pub fn simplify(&self) -> Radical {
        if self.is_zero() {
            return Radical::new(Monomial::constant(Numeric::zero()), 1, Monomial::one());
        }
        let mut coefficient = self.coefficient.clone();
        let mut radicand = self.radicand.clone();
        let index = self.index;
        let idx = i64::from(index);

        // Clear negative literal exponents from the radicand.
        let negatives: Vec<(String, i64)> = radicand
            .literals
            .iter()
            .filter(|(_, e)| **e < 0)
            .map(|(n, e)| (n.clone(), *e))
            .collect();
        for (name, exp) in negatives {
            let k = (-exp + idx - 1) / idx;
            radicand = radicand.with_literal(name.clone(), k * idx);
            coefficient = coefficient.with_literal(name, -k);
        }

        // Rationalise: n/d = n·d^(index-1) / d^index.
        let d = radicand.coef.denom().clone();
        if !d.is_one() {
            let numer = radicand.coef.numer() * d.pow(index - 1);
            radicand.coef = Numeric::from_rational(Rational::from_integer(numer));
            coefficient.coef = coefficient
                .coef
                .multiply(&Numeric::from_rational(Rational::new(BigInt::one(), d)));
        }

        if radicand.coef.is_negative() && index % 2 == 1 {
            radicand.coef = radicand.coef.abs();
            coefficient.coef = coefficient.coef.opposite();
        }

        let (outside, inside) = extract_power(radicand.coef.numer(), index);
        coefficient.coef = coefficient
            .coef
            .multiply(&Numeric::from_rational(Rational::from_integer(outside)));
        radicand.coef = Numeric::from_rational(Rational::from_integer(inside));
        let extracted: Vec<(String, i64)> = radicand
            .literals
            .iter()
            .map(|(n, e)| (n.clone(), *e))
            .collect();
        radicand.literals.clear();
        for (name, exp) in extracted {
            coefficient = coefficient.with_literal(name.clone(), exp / idx);
            radicand = radicand.with_literal(name, exp % idx);
        }

        if radicand.is_one() {
            return Radical::new(coefficient, 1, radicand);
        }

        // Lower the index when the radicand is a perfect power of a divisor of it.
        let mut index = index;
        for g in (2..=index).rev() {
            if index % g != 0 {
                continue;
            }
            let exps_divisible = radicand.literals.values().all(|e| e % i64::from(g) == 0);
            let (root, rest) = extract_power(radicand.coef.numer(), g);
            if exps_divisible && rest.abs().is_one() && (rest.is_positive() || g % 2 == 1) {
                radicand.coef = Numeric::from_rational(Rational::from_integer(root * rest));
                for exp in radicand.literals.values_mut() {
                    *exp /= i64::from(g);
                }
                index /= g;
                break;
            }
        }

        Radical::new(coefficient, index, radicand)
    }

    /// Floating value; `None` when the radicand carries literals or the root is not real.
    pub fn to_number(&self) -> Option<f64> {
        if !self.radicand.literals.is_empty() || !self.coefficient.literals.is_empty() {
            return None;
        }
        let radicand = self.radicand.coef.to_number();
        let coef = self.coefficient.coef.to_number();
        if radicand < 0.0 {
            if self.index % 2 == 0 {
                return None;
            }
            return Some(-coef * (-radicand).powf(1.0 / f64::from(self.index)));
        }
        Some(coef * radicand.powf(1.0 / f64::from(self.index)))
    }

    pub fn to_tex(&self) -> String {
        if self.radicand.is_one() || self.index == 1 {
            return self.coefficient.multiply(&self.radicand).to_tex();
        }
        let root = display_root(self.index, &self.radicand.to_tex());
        if self.coefficient.is_one() {
            root
        } else if self.coefficient.coef.opposite().is_one() && self.coefficient.literals.is_empty() {
            format!("-{root}")
        } else {
            format!("{}{root}", self.coefficient.to_tex())
        }
    }

    fn like(&self, other: &Radical) -> bool {
        self.index == other.index
            && self.radicand == other.radicand
            && self.coefficient.literals == other.coefficient.literals
    }
}

/// A sum of radicals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolyRadical {
    pub terms: Vec<Radical>,
}

impl PolyRadical {
    pub fn new(terms: Vec<Radical>) -> Self {
        PolyRadical { terms }
    }

    /// Simplifies every term and collects like radicals.
    pub fn simplify(&self) -> PolyRadical {
        let mut collected: Vec<Radical> = Vec::new();
        for term in self.terms.iter().map(Radical::simplify) {
            match collected.iter_mut().find(|c| c.like(&term)) {
                Some(existing) => {
                    existing.coefficient.coef =
                        existing.coefficient.coef.add(&term.coefficient.coef);
                }
                None => collected.push(term),
            }
        }
        collected.retain(|t| !t.is_zero());
        PolyRadical { terms: collected }
    }

    pub fn to_number(&self) -> Option<f64> {
        self.terms.iter().map(Radical::to_number).sum()
    }

    pub fn to_tex(&self) -> String {
        let mut out = String::new();
        for term in &self.terms {
            let tex = term.to_tex();
            if out.is_empty() {
                out = tex;
            } else if let Some(rest) = tex.strip_prefix('-') {
                out.push_str(" - ");
                out.push_str(rest);
            } else {
                out.push_str(" + ");
                out.push_str(&tex);
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }
}
