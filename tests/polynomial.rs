use wsmath::{MathError, Numeric, Polynomial, Unavailable, parse_expr};

fn poly(input: &str) -> Polynomial {
    let expr = parse_expr(input).expect("parse polynomial");
    Polynomial::from_expr(&expr, "x").expect("build polynomial")
}

fn frac(n: i64, d: i64) -> Numeric {
    Numeric::from_fraction(n, d).expect("non-zero denominator")
}

#[test]
fn polynomial_division_exact() {
    let division = poly("x^3 - 1").divide(&poly("x - 1")).unwrap();
    assert!(division.remainder.is_zero());
    assert_eq!(division.quotient, poly("x^2 + x + 1"));
}

#[test]
fn polynomial_division_remainder() {
    let division = poly("x^3 + x + 1").divide(&poly("x^2 + 1")).unwrap();
    assert_eq!(division.quotient, poly("x"));
    assert_eq!(division.remainder, poly("1"));
}

#[test]
fn polynomial_division_non_exact() {
    assert!(poly("x^2 + 1").div_exact(&poly("x + 1")).is_none());
}

#[test]
fn division_of_lower_degree_keeps_dividend() {
    let division = poly("3*x + 2").divide(&poly("x^2 - 5")).unwrap();
    assert!(division.quotient.is_zero());
    assert_eq!(division.remainder, poly("3*x + 2"));
}

#[test]
fn division_by_zero_polynomial_fails() {
    assert_eq!(
        poly("x + 1").divide(&Polynomial::zero()),
        Err(MathError::DivisionByZero)
    );
}

#[test]
fn polynomial_gcd_is_monic() {
    assert_eq!(Polynomial::gcd(&poly("x^2 - 1"), &poly("x^2 - x")), poly("x - 1"));
}

#[test]
fn polynomial_gcd_ignores_content() {
    assert_eq!(Polynomial::gcd(&poly("2*x^2 + 2*x"), &poly("4*x")), poly("x"));
}

#[test]
fn polynomial_content_and_primitive_part() {
    let polynomial = poly("2/3*x^2 + 4/3*x + 2/3");
    let (content, primitive) = polynomial.content_and_primitive_part();
    assert_eq!(content, frac(2, 3));
    assert_eq!(primitive, poly("x^2 + 2*x + 1"));
    assert_eq!(primitive.scale(&content), polynomial);
}

#[test]
fn polynomial_content_sign_normalizes_leading_coeff() {
    let polynomial = poly("-2*x^2 - 4*x");
    let (content, primitive) = polynomial.content_and_primitive_part();
    assert_eq!(content, Numeric::from_number(-2));
    assert_eq!(primitive, poly("x^2 + 2*x"));
    assert_eq!(primitive.scale(&content), polynomial);
}

#[test]
fn polynomial_content_zero_is_zero() {
    let (content, primitive) = poly("0").content_and_primitive_part();
    assert!(content.is_zero());
    assert!(primitive.is_zero());
}

#[test]
fn leading_zeros_are_stripped() {
    let p = Polynomial::from_ints(&[0, 0, 3, 0, -1]);
    assert_eq!(p.degree(), 2);
    assert_eq!(p.coefs(), poly("3*x^2 - 1").coefs());
    assert_eq!(Polynomial::from_ints(&[0, 0]).coefs(), &[Numeric::zero()]);
}

#[test]
fn from_roots_clears_denominators() {
    let p = Polynomial::from_roots(&[frac(1, 2), Numeric::from_number(-3)]);
    assert_eq!(p, poly("2*x^2 + 5*x - 3"));
    assert_eq!(p.roots().map(<[Numeric]>::len), Some(2));
    assert!(p.evaluate(&frac(1, 2)).is_zero());
    assert!(p.evaluate(&Numeric::from_number(-3)).is_zero());
}

#[test]
fn from_roots_empty_is_one() {
    assert!(Polynomial::from_roots(&[]).is_one());
}

#[test]
fn equality_ignores_attached_roots() {
    let with_roots = Polynomial::from_roots(&[Numeric::from_number(1), Numeric::from_number(2)]);
    assert_eq!(with_roots, poly("x^2 - 3*x + 2"));
}

#[test]
fn power_and_products() {
    assert_eq!(poly("x + 1").power(0), Polynomial::one());
    assert_eq!(poly("x + 1").power(3), poly("x^3 + 3*x^2 + 3*x + 1"));
    assert_eq!(poly("x - 1") * poly("x + 1"), poly("x^2 - 1"));
    assert_eq!(poly("x^2") - poly("x^2 - 4"), poly("4"));
}

#[test]
fn derive_and_integrate() {
    let p = poly("3*x^2 - 2*x + 5");
    assert_eq!(p.derive(), poly("6*x - 2"));
    assert_eq!(p.derive().integrate(&Numeric::from_number(5)), p);
    assert_eq!(poly("x^2").integrate(&Numeric::zero()), poly("1/3*x^3"));
}

#[test]
fn rendering_suppresses_unit_coefficients() {
    let p = poly("-x^3 + 1/2*x^2 - x + 4");
    assert_eq!(p.to_tex("t"), "-t^{3} + \\frac{1}{2}t^{2} - t + 4");
    assert_eq!(p.to_text("t"), "-t^3 + 1/2*t^2 - t + 4");
    assert_eq!(Polynomial::zero().to_tex("x"), "0");
}

#[test]
fn text_form_parses_back() {
    let p = poly("5*x^4 - 2/3*x + 7");
    let reparsed = Polynomial::from_expr(&parse_expr(&p.to_text("x")).unwrap(), "x").unwrap();
    assert_eq!(reparsed, p);
}

#[test]
fn factor_form_groups_equal_roots() {
    let roots = [
        Numeric::from_number(2),
        Numeric::from_number(2),
        Numeric::zero(),
        frac(-1, 3),
    ];
    let p = Polynomial::from_roots(&roots);
    assert_eq!(
        p.factor_form("x").unwrap(),
        "\\left(x - 2\\right)^{2} \\cdot x \\cdot \\left(3x + 1\\right)"
    );
}

#[test]
fn factor_form_without_roots_delegates() {
    let p = poly("x^2 - 1");
    assert!(p.factor_form("x").is_none());
    assert_eq!(p.to_factor_form("x", &Unavailable), "?");
    assert_eq!(
        p.to_factor_form("x", &wsmath::NATIVE),
        "\\left(x + 1\\right) \\cdot \\left(x - 1\\right)"
    );
}
