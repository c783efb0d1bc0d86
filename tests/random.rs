use wsmath::{PolynomialOptions, Random};

#[test]
fn same_seed_same_stream() {
    let mut a = Random::from_seed(42);
    let mut b = Random::from_seed(42);
    let first: Vec<i64> = (0..32).map(|_| a.int_between(-100, 100)).collect();
    let second: Vec<i64> = (0..32).map(|_| b.int_between(-100, 100)).collect();
    assert_eq!(first, second);
}

#[test]
fn string_seeds_are_deterministic() {
    let mut a = Random::from_seed_str("worksheet-7");
    let mut b = Random::from_seed_str("worksheet-7");
    assert_eq!(a.int_list(16, 0, 1000), b.int_list(16, 0, 1000));
}

#[test]
fn int_between_is_inclusive_and_swaps_bounds() {
    let mut rnd = Random::from_seed(1);
    for _ in 0..200 {
        let n = rnd.int_between(3, -3);
        assert!((-3..=3).contains(&n));
    }
    assert_eq!(rnd.int_between(5, 5), 5);
}

#[test]
fn not_zero_never_draws_zero() {
    let mut rnd = Random::from_seed(2);
    for _ in 0..200 {
        assert_ne!(rnd.int_between_not_zero(-1, 1), 0);
        assert!(!rnd.numeric_between_not_zero(-2, 2).is_zero());
        assert!(!rnd.fraction_between_not_zero(-3, 3).is_zero());
    }
}

#[test]
fn wide_ranges_draw_without_overflow() {
    let mut rnd = Random::from_seed(10);
    for _ in 0..50 {
        assert_ne!(rnd.int_between_not_zero(-20_000_000, 20_000_000), 0);
        assert_ne!(rnd.int_between_not_zero(i64::MIN, i64::MAX), 0);
        assert!(!rnd.fraction_between_not_zero(i64::MIN / 2, i64::MAX / 2).is_zero());
    }
    let odd = rnd.int_between_filtered(-4_000_000_000, 4_000_000_000, |n| n % 2 != 0);
    assert_ne!(odd % 2, 0);
}

#[test]
fn filter_without_candidates_falls_back_to_lower_bound() {
    let mut rnd = Random::from_seed(3);
    assert_eq!(rnd.int_between_filtered(4, 8, |_| false), 4);
}

#[test]
fn pick_many_returns_distinct_positions() {
    let mut rnd = Random::from_seed(4);
    let items = [1, 2, 3, 4, 5, 6];
    let mut picked = rnd.pick_many(&items, 4);
    assert_eq!(picked.len(), 4);
    picked.sort_unstable();
    picked.dedup();
    assert_eq!(picked.len(), 4);
    assert_eq!(rnd.pick_many(&items, 10).len(), items.len());
}

#[test]
fn shuffle_is_a_permutation() {
    let mut rnd = Random::from_seed(5);
    let mut shuffled = rnd.shuffle(&[5, 1, 4, 2, 3]);
    shuffled.sort_unstable();
    assert_eq!(shuffled, vec![1, 2, 3, 4, 5]);
}

#[test]
fn random_polynomials_respect_options() {
    let mut rnd = Random::from_seed(6);
    let options = PolynomialOptions {
        min_degree: 2,
        max_degree: 4,
        range: 3,
        fractions: false,
    };
    for _ in 0..50 {
        let p = rnd.polynomial(&options);
        assert!((2..=4).contains(&p.degree()));
        assert!(!p.leading_coef().is_zero());
        assert!(p.coefs().iter().all(|c| c.is_integer() && c.abs().to_integer().unwrap() <= 3));
    }
}
