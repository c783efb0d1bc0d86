use wsmath::{Numeric, Polynomial, factor_polynomial, parse_expr};

fn poly(input: &str) -> Polynomial {
    let expr = parse_expr(input).expect("parse input");
    Polynomial::from_expr(&expr, "x").expect("polynomial input")
}

fn sorted(mut factors: Vec<(Polynomial, usize)>) -> Vec<(Polynomial, usize)> {
    factors.sort_by(|(p1, m1), (p2, m2)| {
        p1.degree()
            .cmp(&p2.degree())
            .then_with(|| p1.coefs().cmp(p2.coefs()))
            .then_with(|| m1.cmp(m2))
    });
    factors
}

fn assert_factorization(input: &str, constant: i64, expected: &[(&str, usize)]) {
    let original = poly(input);
    let factorization = factor_polynomial(&original);
    assert_eq!(
        factorization.constant,
        Numeric::from_number(constant),
        "leading constant for {input}"
    );

    let expected_factors = sorted(expected.iter().map(|(txt, mult)| (poly(txt), *mult)).collect());
    let actual = sorted(
        factorization
            .factors
            .iter()
            .map(|f| (f.poly.clone(), f.multiplicity))
            .collect(),
    );
    assert_eq!(actual, expected_factors, "factors for {input}");
    assert_eq!(
        factorization.expand(),
        original,
        "factorization should reconstruct {input}"
    );
}

#[test]
fn trivial_factorizations() {
    let cases: Vec<(&str, i64, Vec<(&str, usize)>)> = vec![
        ("x^2 - 1", 1, vec![("x - 1", 1), ("x + 1", 1)]),
        ("x^2 + 2*x + 1", 1, vec![("x + 1", 2)]),
        ("x^2 - 3*x", 1, vec![("x", 1), ("x - 3", 1)]),
        ("x^3 - x", 1, vec![("x", 1), ("x - 1", 1), ("x + 1", 1)]),
        ("2*x^2", 2, vec![("x", 2)]),
        ("3*x^3", 3, vec![("x", 3)]),
        ("x", 1, vec![("x", 1)]),
        ("5", 5, vec![]),
        ("0", 0, vec![]),
        ("x^3 + x^2 - x - 1", 1, vec![("x + 1", 2), ("x - 1", 1)]),
        ("x^3 - 4*x^2 + 4*x", 1, vec![("x", 1), ("x - 2", 2)]),
        ("x^4 - x^2", 1, vec![("x", 2), ("x - 1", 1), ("x + 1", 1)]),
        ("x^2 - 4", 1, vec![("x - 2", 1), ("x + 2", 1)]),
        ("x^2 + x", 1, vec![("x", 1), ("x + 1", 1)]),
        ("x^3 + 2*x^2 + x", 1, vec![("x", 1), ("x + 1", 2)]),
        ("4*x^2 + 4*x + 1", 1, vec![("2*x + 1", 2)]),
        ("x^3 - 8", 1, vec![("x - 2", 1), ("x^2 + 2*x + 4", 1)]),
        ("x^3 + 8", 1, vec![("x + 2", 1), ("x^2 - 2*x + 4", 1)]),
        ("x^4 - 16", 1, vec![("x - 2", 1), ("x + 2", 1), ("x^2 + 4", 1)]),
        ("x^4 + 4*x^2 + 4", 1, vec![("x^2 + 2", 2)]),
        ("x^3 - 9*x", 1, vec![("x", 1), ("x - 3", 1), ("x + 3", 1)]),
        ("2*x^2 + 4*x", 2, vec![("x", 1), ("x + 2", 1)]),
        ("x^2 - x - 6", 1, vec![("x - 3", 1), ("x + 2", 1)]),
        ("3*x^2 - 12", 3, vec![("x - 2", 1), ("x + 2", 1)]),
        ("x^3 - 2*x^2 - x + 2", 1, vec![("x - 1", 1), ("x + 1", 1), ("x - 2", 1)]),
    ];

    assert_eq!(cases.len(), 25);
    for (input, constant, factors) in cases {
        assert_factorization(input, constant, &factors);
    }
}

#[test]
fn nontrivial_factorizations() {
    let cases: Vec<(&str, i64, Vec<(&str, usize)>)> = vec![
        ("x^4 - 1", 1, vec![("x - 1", 1), ("x + 1", 1), ("x^2 + 1", 1)]),
        (
            "x^4 - 5*x^2 + 4",
            1,
            vec![("x - 2", 1), ("x + 2", 1), ("x - 1", 1), ("x + 1", 1)],
        ),
        (
            "x^3 - 6*x^2 + 11*x - 6",
            1,
            vec![("x - 1", 1), ("x - 2", 1), ("x - 3", 1)],
        ),
        ("x^3 + 3*x^2 + 3*x + 1", 1, vec![("x + 1", 3)]),
        (
            "2*x^3 + 3*x^2 - 8*x - 12",
            1,
            vec![("x - 2", 1), ("x + 2", 1), ("2*x + 3", 1)],
        ),
        ("x^5 - 3*x^4 + 3*x^3 - x^2", 1, vec![("x", 2), ("x - 1", 3)]),
        (
            "x^6 - 1",
            1,
            vec![
                ("x - 1", 1),
                ("x + 1", 1),
                ("x^2 + x + 1", 1),
                ("x^2 - x + 1", 1),
            ],
        ),
        ("x^4 + 4*x^3 + 6*x^2 + 4*x + 1", 1, vec![("x + 1", 4)]),
        ("4*x^3 + 4*x^2 - 12*x - 12", 4, vec![("x + 1", 1), ("x^2 - 3", 1)]),
        (
            "x^4 - 3*x^3 - 2*x^2 + 12*x - 8",
            1,
            vec![("x + 2", 1), ("x - 1", 1), ("x - 2", 2)],
        ),
        (
            "x^4 + x^3 - 7*x^2 - x + 6",
            1,
            vec![("x - 1", 1), ("x + 1", 1), ("x - 2", 1), ("x + 3", 1)],
        ),
        (
            "x^5 + x^4 - 2*x^3 - 2*x^2 + x + 1",
            1,
            vec![("x - 1", 2), ("x + 1", 3)],
        ),
        (
            "2*x^4 - 3*x^3 - 11*x^2 + 3*x + 9",
            1,
            vec![("x - 3", 1), ("x - 1", 1), ("x + 1", 1), ("2*x + 3", 1)],
        ),
        (
            "x^5 - 16*x",
            1,
            vec![("x", 1), ("x - 2", 1), ("x + 2", 1), ("x^2 + 4", 1)],
        ),
        (
            "x^4 + 5*x^3 + 8*x^2 + 5*x + 1",
            1,
            vec![("x + 1", 2), ("x^2 + 3*x + 1", 1)],
        ),
        (
            "3*x^4 + x^3 - 16*x^2 - 4*x + 16",
            1,
            vec![("x - 2", 1), ("x + 2", 1), ("x - 1", 1), ("3*x + 4", 1)],
        ),
        (
            "x^4 + 2*x^3 - 2*x^2 - 8*x - 8",
            1,
            vec![("x^2 + 2*x + 2", 1), ("x - 2", 1), ("x + 2", 1)],
        ),
        (
            "x^4 + 4*x^3 + 3*x^2 - 4*x - 4",
            1,
            vec![("x + 2", 2), ("x - 1", 1), ("x + 1", 1)],
        ),
    ];

    for (input, constant, factors) in cases {
        assert_factorization(input, constant, &factors);
    }
}

#[test]
fn rational_roots_follow_multiplicity() {
    let factorization = factor_polynomial(&poly("x^3 - 4*x^2 + 4*x"));
    let mut roots = factorization.rational_roots();
    roots.sort();
    assert_eq!(
        roots,
        vec![Numeric::zero(), Numeric::from_number(2), Numeric::from_number(2)]
    );
}

#[test]
fn factored_tex() {
    let tex = |input: &str| factor_polynomial(&poly(input)).to_tex("x");
    assert_eq!(tex("2*x^2 - 2"), "2\\left(x + 1\\right) \\cdot \\left(x - 1\\right)");
    assert_eq!(tex("x^2 + 1"), "x^{2} + 1");
    assert_eq!(tex("-x^3"), "-x^{3}");
    assert_eq!(tex("x^2 - 4*x + 4"), "\\left(x - 2\\right)^{2}");
}
