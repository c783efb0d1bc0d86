//! Exact rational numbers.
//!
//! A `Numeric` is always kept in lowest terms with a positive denominator; the
//! underlying `BigRational` re-normalises after every operation.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{MathError, Result};
use crate::expr::Rational;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeric(Rational);

impl Numeric {
    pub fn zero() -> Self {
        Numeric(Rational::zero())
    }

    pub fn one() -> Self {
        Numeric(Rational::one())
    }

    pub fn from_number(n: i64) -> Self {
        Numeric(Rational::from_integer(BigInt::from(n)))
    }

    pub fn from_fraction(n: i64, d: i64) -> Result<Self> {
        Self::from_bigints(BigInt::from(n), BigInt::from(d))
    }

    pub fn from_bigints(n: BigInt, d: BigInt) -> Result<Self> {
        if d.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(Numeric(Rational::new(n, d)))
    }

    pub fn from_rational(r: Rational) -> Self {
        Numeric(r)
    }

    pub fn as_rational(&self) -> &Rational {
        &self.0
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn add(&self, other: &Numeric) -> Numeric {
        Numeric(&self.0 + &other.0)
    }

    pub fn subtract(&self, other: &Numeric) -> Numeric {
        Numeric(&self.0 - &other.0)
    }

    pub fn multiply(&self, other: &Numeric) -> Numeric {
        Numeric(&self.0 * &other.0)
    }

    pub fn divide(&self, other: &Numeric) -> Result<Numeric> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(Numeric(&self.0 / &other.0))
    }

    pub fn inverse(&self) -> Result<Numeric> {
        Numeric::one().divide(self)
    }

    /// Integer power; negative exponents invert first.
    pub fn power(&self, exponent: i32) -> Result<Numeric> {
        let base = if exponent < 0 {
            self.inverse()?
        } else {
            self.clone()
        };
        let e = exponent.unsigned_abs();
        Ok(Numeric(Rational::new(
            base.numer().pow(e),
            base.denom().pow(e),
        )))
    }

    pub fn opposite(&self) -> Numeric {
        Numeric(-self.0.clone())
    }

    pub fn abs(&self) -> Numeric {
        Numeric(self.0.abs())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_equal(&self, other: &Numeric) -> bool {
        self == other
    }

    pub fn to_integer(&self) -> Option<i64> {
        if self.is_integer() {
            self.numer().to_i64()
        } else {
            None
        }
    }

    /// Floating approximation, only meant for irrational contexts.
    pub fn to_number(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Exact square root when numerator and denominator are both perfect squares.
    pub fn sqrt_exact(&self) -> Option<Numeric> {
        if self.is_negative() {
            return None;
        }
        let n = self.numer().sqrt();
        let d = self.denom().sqrt();
        if &(&n * &n) == self.numer() && &(&d * &d) == self.denom() {
            Some(Numeric(Rational::new(n, d)))
        } else {
            None
        }
    }

    pub fn to_tex(&self) -> String {
        if self.is_integer() {
            return self.numer().to_string();
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{sign}\\frac{{{}}}{{{}}}", self.numer().abs(), self.denom())
    }

    /// Rendering for appending after a previous term: `+ 3`, `- \frac{1}{2}`,
    /// or nothing for zero.
    pub fn signed_tex(&self) -> String {
        if self.is_zero() {
            String::new()
        } else if self.is_negative() {
            format!("- {}", self.abs().to_tex())
        } else {
            format!("+ {}", self.to_tex())
        }
    }
}

impl Default for Numeric {
    fn default() -> Self {
        Numeric::zero()
    }
}

impl From<i64> for Numeric {
    fn from(n: i64) -> Self {
        Numeric::from_number(n)
    }
}

impl From<Rational> for Numeric {
    fn from(r: Rational) -> Self {
        Numeric(r)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl Add for Numeric {
    type Output = Numeric;
    fn add(self, rhs: Numeric) -> Numeric {
        Numeric(self.0 + rhs.0)
    }
}

impl Add<&Numeric> for &Numeric {
    type Output = Numeric;
    fn add(self, rhs: &Numeric) -> Numeric {
        Numeric(&self.0 + &rhs.0)
    }
}

impl Sub for Numeric {
    type Output = Numeric;
    fn sub(self, rhs: Numeric) -> Numeric {
        Numeric(self.0 - rhs.0)
    }
}

impl Sub<&Numeric> for &Numeric {
    type Output = Numeric;
    fn sub(self, rhs: &Numeric) -> Numeric {
        Numeric(&self.0 - &rhs.0)
    }
}

impl Mul for Numeric {
    type Output = Numeric;
    fn mul(self, rhs: Numeric) -> Numeric {
        Numeric(self.0 * rhs.0)
    }
}

impl Mul<&Numeric> for &Numeric {
    type Output = Numeric;
    fn mul(self, rhs: &Numeric) -> Numeric {
        Numeric(&self.0 * &rhs.0)
    }
}

impl Neg for Numeric {
    type Output = Numeric;
    fn neg(self) -> Numeric {
        Numeric(-self.0)
    }
}

impl Neg for &Numeric {
    type Output = Numeric;
    fn neg(self) -> Numeric {
        self.opposite()
    }
}

impl Sum for Numeric {
    fn sum<I: Iterator<Item = Numeric>>(iter: I) -> Numeric {
        iter.fold(Numeric::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_over_negative_is_positive() {
        let n = Numeric::from_fraction(-6, -4).unwrap();
        assert_eq!(n.numer(), &BigInt::from(3));
        assert_eq!(n.denom(), &BigInt::from(2));
        assert!(!n.is_negative());
    }

    #[test]
    fn sign_moves_to_numerator() {
        let n = Numeric::from_fraction(3, -9).unwrap();
        assert_eq!(n.to_string(), "-1/3");
        assert_eq!(n.to_tex(), "-\\frac{1}{3}");
    }

    #[test]
    fn zero_denominator_fails() {
        assert_eq!(Numeric::from_fraction(1, 0), Err(MathError::DivisionByZero));
        assert_eq!(
            Numeric::one().divide(&Numeric::zero()),
            Err(MathError::DivisionByZero)
        );
        assert_eq!(Numeric::zero().power(-2), Err(MathError::DivisionByZero));
    }
}
