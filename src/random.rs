//! Seeded randomness. Every draw goes through one `ChaCha8Rng`, so a seed and a
//! fixed call order reproduce the same exercise byte for byte.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::numeric::Numeric;
use crate::polynomial::Polynomial;

/// Display names drawn for the unknown of an exercise.
pub const BAR_NAMES: [&str; 5] = ["x", "y", "z", "t", "w"];

const FILTER_ATTEMPTS: usize = 64;
const FILTER_SCAN: usize = 1024;

#[derive(Clone, Debug)]
pub struct PolynomialOptions {
    pub min_degree: usize,
    pub max_degree: usize,
    pub range: i64,
    pub fractions: bool,
}

impl Default for PolynomialOptions {
    fn default() -> Self {
        PolynomialOptions {
            min_degree: 1,
            max_degree: 2,
            range: 10,
            fractions: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Random {
    rng: ChaCha8Rng,
}

impl Random {
    pub fn from_seed(seed: u64) -> Self {
        Random {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Folds the bytes of `seed` into the 32-byte ChaCha key.
    pub fn from_seed_str(seed: &str) -> Self {
        let mut key = [0u8; 32];
        for (i, byte) in seed.bytes().enumerate() {
            let slot = &mut key[i % 32];
            *slot = slot.rotate_left(3) ^ byte;
        }
        key[31] ^= (seed.len() % 256) as u8;
        Random {
            rng: ChaCha8Rng::from_seed(key),
        }
    }

    /// Uniform integer in `[lo, hi]`; reversed bounds are swapped.
    pub fn int_between(&mut self, lo: i64, hi: i64) -> i64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform over `[lo, hi]` without zero. Draws from one value fewer and
    /// shifts the non-negative half up, so the cost does not grow with the range.
    pub fn int_between_not_zero(&mut self, lo: i64, hi: i64) -> i64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        if lo > 0 || hi < 0 {
            return self.rng.gen_range(lo..=hi);
        }
        if lo == hi {
            warn!(target: "random", lo, hi, "range holds only zero");
            return lo;
        }
        let n = self.rng.gen_range(lo..=hi - 1);
        if n >= 0 { n + 1 } else { n }
    }

    /// Uniform over the values of `[lo, hi]` accepted by `keep`, by rejection.
    /// After `FILTER_ATTEMPTS` misses the first accepted value from `lo` is
    /// used, and `lo` itself when none is found.
    pub fn int_between_filtered(&mut self, lo: i64, hi: i64, keep: impl Fn(i64) -> bool) -> i64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        for _ in 0..FILTER_ATTEMPTS {
            let n = self.rng.gen_range(lo..=hi);
            if keep(n) {
                return n;
            }
        }
        let scanned = (lo..=hi).take(FILTER_SCAN).find(|n| keep(*n));
        scanned.unwrap_or_else(|| {
            warn!(target: "random", lo, hi, "no value in range passes the filter");
            lo
        })
    }

    pub fn int_list(&mut self, n: usize, lo: i64, hi: i64) -> Vec<i64> {
        (0..n).map(|_| self.int_between(lo, hi)).collect()
    }

    pub fn numeric_between(&mut self, lo: i64, hi: i64) -> Numeric {
        Numeric::from_number(self.int_between(lo, hi))
    }

    pub fn numeric_between_not_zero(&mut self, lo: i64, hi: i64) -> Numeric {
        Numeric::from_number(self.int_between_not_zero(lo, hi))
    }

    /// `n` integers in `[-r, r]`.
    pub fn numeric_list(&mut self, n: usize, r: i64) -> Vec<Numeric> {
        (0..n).map(|_| self.numeric_between(-r, r)).collect()
    }

    /// Non-zero fraction in `[lo, hi]` with a denominator up to 5.
    pub fn fraction_between_not_zero(&mut self, lo: i64, hi: i64) -> Numeric {
        let den = self.int_between(1, 5);
        let num = self.int_between_not_zero(lo.saturating_mul(den), hi.saturating_mul(den));
        Numeric::from_fraction(num, den).unwrap_or_else(|_| Numeric::from_number(num))
    }

    pub fn coin(&mut self) -> bool {
        self.int_between(0, 1) == 1
    }

    /// # Panics
    /// Panics if `items` is empty.
    pub fn pick_one<T: Clone>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())].clone()
    }

    /// Up to `k` distinct positions of `items`, in random order.
    pub fn pick_many<T: Clone>(&mut self, items: &[T], k: usize) -> Vec<T> {
        items.choose_multiple(&mut self.rng, k).cloned().collect()
    }

    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        out.shuffle(&mut self.rng);
        out
    }

    /// Random polynomial with a non-zero leading coefficient.
    pub fn polynomial(&mut self, options: &PolynomialOptions) -> Polynomial {
        let degree = self.int_between(options.min_degree as i64, options.max_degree as i64) as usize;
        let range = options.range.max(1);
        let mut coefs = Vec::with_capacity(degree + 1);
        coefs.push(if options.fractions {
            self.fraction_between_not_zero(-range, range)
        } else {
            self.numeric_between_not_zero(-range, range)
        });
        for _ in 0..degree {
            coefs.push(if options.fractions && self.coin() {
                self.fraction_between_not_zero(-range, range)
            } else {
                self.numeric_between(-range, range)
            });
        }
        Polynomial::new(coefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_seeds_differ() {
        let a = Random::from_seed_str("sheet-1").int_list(8, 0, 1000);
        let b = Random::from_seed_str("sheet-2").int_list(8, 0, 1000);
        assert_ne!(a, b);
    }

    #[test]
    fn not_zero_covers_both_signs() {
        let mut rnd = Random::from_seed(8);
        let drawn: Vec<i64> = (0..400).map(|_| rnd.int_between_not_zero(-2, 2)).collect();
        for value in [-2, -1, 1, 2] {
            assert!(drawn.contains(&value), "{value} never drawn");
        }
        assert!(!drawn.contains(&0));
    }

    #[test]
    fn zero_only_range_falls_back() {
        let mut rnd = Random::from_seed(9);
        assert_eq!(rnd.int_between_not_zero(0, 0), 0);
        assert_eq!(rnd.int_between_not_zero(3, 3), 3);
    }
}
