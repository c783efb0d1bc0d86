//! Elementary functions in shifted form, for graphing exercises.

use crate::format::{append, coef_var_tex, parens};
use crate::numeric::Numeric;
use crate::polynomial::Polynomial;
use crate::random::Random;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementalKind {
    Lineal,
    Quadratic,
    Radical,
    Hyperbola,
    Exponential,
    Logarithm,
    Trigonometric,
}

impl ElementalKind {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => ElementalKind::Lineal,
            1 => ElementalKind::Quadratic,
            2 => ElementalKind::Radical,
            3 => ElementalKind::Hyperbola,
            4 => ElementalKind::Exponential,
            5 => ElementalKind::Logarithm,
            6 => ElementalKind::Trigonometric,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberDomain {
    Integers,
    Rationals,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sin,
    Cos,
}

#[derive(Clone, Debug)]
pub struct ElementalOptions {
    pub range: i64,
    pub complexity: i64,
    pub domain: NumberDomain,
}

/// `h` and `k` are the horizontal and vertical shifts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementalFunction {
    Lineal { m: Numeric, n: Numeric },
    Quadratic { a: Numeric, h: Numeric, k: Numeric },
    Radical { a: Numeric, h: Numeric, k: Numeric },
    Hyperbola { a: Numeric, h: Numeric, k: Numeric },
    Exponential { a: Numeric, base: i64, h: Numeric, k: Numeric },
    Logarithm { a: Numeric, base: i64, h: Numeric, k: Numeric },
    Trigonometric { a: Numeric, b: Numeric, wave: Wave, k: Numeric },
}

fn draw(rnd: &mut Random, options: &ElementalOptions) -> Numeric {
    match options.domain {
        NumberDomain::Integers => rnd.numeric_between_not_zero(-options.range, options.range),
        NumberDomain::Rationals => rnd.fraction_between_not_zero(-options.range, options.range),
    }
}

fn shift(rnd: &mut Random, options: &ElementalOptions) -> Numeric {
    let r = (options.range / 2).max(1);
    rnd.numeric_between(-r, r)
}

/// `x - h` in TeX.
fn shifted(h: &Numeric) -> String {
    Polynomial::new(vec![Numeric::one(), h.opposite()]).to_tex("x")
}

fn shifted_text(h: &Numeric) -> String {
    Polynomial::new(vec![Numeric::one(), h.opposite()]).to_text("x")
}

/// Coefficient placed in front of a factor: hides 1, keeps only the sign of -1.
fn leading(a: &Numeric) -> String {
    if a.is_one() {
        String::new()
    } else if a.opposite().is_one() {
        "-".to_string()
    } else {
        a.to_tex()
    }
}

fn text_term(a: &Numeric, body: &str) -> String {
    if a.is_one() {
        body.to_string()
    } else {
        format!("{a}*{body}")
    }
}

fn text_shift(k: &Numeric) -> String {
    if k.is_zero() {
        String::new()
    } else if k.is_negative() {
        format!(" - {}", k.abs())
    } else {
        format!(" + {k}")
    }
}

impl ElementalFunction {
    pub fn random(
        rnd: &mut Random,
        types: &[ElementalKind],
        options: &ElementalOptions,
    ) -> ElementalFunction {
        let kind = if types.is_empty() {
            ElementalKind::Lineal
        } else {
            rnd.pick_one(types)
        };
        match kind {
            ElementalKind::Lineal => {
                let m = draw(rnd, options);
                let n = rnd.numeric_between(-options.range, options.range);
                ElementalFunction::Lineal { m, n }
            }
            ElementalKind::Quadratic => {
                let a = if options.complexity == 0 {
                    rnd.pick_one(&[Numeric::one(), Numeric::from_number(-1)])
                } else {
                    draw(rnd, options)
                };
                let h = shift(rnd, options);
                let k = shift(rnd, options);
                ElementalFunction::Quadratic { a, h, k }
            }
            ElementalKind::Radical => {
                let a = draw(rnd, options);
                let h = shift(rnd, options);
                let k = shift(rnd, options);
                ElementalFunction::Radical { a, h, k }
            }
            ElementalKind::Hyperbola => {
                let a = draw(rnd, options);
                let h = shift(rnd, options);
                let k = shift(rnd, options);
                ElementalFunction::Hyperbola { a, h, k }
            }
            ElementalKind::Exponential => {
                let a = draw(rnd, options);
                let base = rnd.pick_one(&[2, 3, 5, 10]);
                let h = shift(rnd, options);
                let k = shift(rnd, options);
                ElementalFunction::Exponential { a, base, h, k }
            }
            ElementalKind::Logarithm => {
                let a = draw(rnd, options);
                let base = rnd.pick_one(&[2, 3, 5, 10]);
                let h = shift(rnd, options);
                let k = shift(rnd, options);
                ElementalFunction::Logarithm { a, base, h, k }
            }
            ElementalKind::Trigonometric => {
                let a = draw(rnd, options);
                let b = rnd.numeric_between(1, 4);
                let wave = if rnd.coin() { Wave::Cos } else { Wave::Sin };
                let k = shift(rnd, options);
                ElementalFunction::Trigonometric { a, b, wave, k }
            }
        }
    }

    pub fn to_tex(&self) -> String {
        match self {
            ElementalFunction::Lineal { m, n } => Polynomial::new(vec![m.clone(), n.clone()]).to_tex("x"),
            ElementalFunction::Quadratic { a, h, k } => {
                let square = if h.is_zero() {
                    "x^{2}".to_string()
                } else {
                    format!("{}^{{2}}", parens(&shifted(h)))
                };
                format!("{}{square}{}", leading(a), append(k))
            }
            ElementalFunction::Radical { a, h, k } => {
                format!("{}\\sqrt{{{}}}{}", leading(a), shifted(h), append(k))
            }
            ElementalFunction::Hyperbola { a, h, k } => {
                let sign = if a.is_negative() { "-" } else { "" };
                format!("{sign}\\frac{{{}}}{{{}}}{}", a.abs().to_tex(), shifted(h), append(k))
            }
            ElementalFunction::Exponential { a, base, h, k } => {
                let power = format!("{base}^{{{}}}", shifted(h));
                let body = if a.is_one() {
                    power
                } else if a.opposite().is_one() {
                    format!("-{power}")
                } else {
                    format!("{} \\cdot {power}", a.to_tex())
                };
                format!("{body}{}", append(k))
            }
            ElementalFunction::Logarithm { a, base, h, k } => format!(
                "{}\\log_{{{base}}}{}{}",
                leading(a),
                parens(&shifted(h)),
                append(k)
            ),
            ElementalFunction::Trigonometric { a, b, wave, k } => {
                let name = match wave {
                    Wave::Sin => "\\sin",
                    Wave::Cos => "\\cos",
                };
                format!(
                    "{}{name}{}{}",
                    leading(a),
                    parens(&coef_var_tex(b, "x")),
                    append(k)
                )
            }
        }
    }

    /// Plain form for a plotting library (`2*sqrt(x - 1) + 3`).
    pub fn to_text(&self) -> String {
        match self {
            ElementalFunction::Lineal { m, n } => Polynomial::new(vec![m.clone(), n.clone()]).to_text("x"),
            ElementalFunction::Quadratic { a, h, k } => format!(
                "{}{}",
                text_term(a, &format!("({})^2", shifted_text(h))),
                text_shift(k)
            ),
            ElementalFunction::Radical { a, h, k } => format!(
                "{}{}",
                text_term(a, &format!("sqrt({})", shifted_text(h))),
                text_shift(k)
            ),
            ElementalFunction::Hyperbola { a, h, k } => {
                format!("{a}/({}){}", shifted_text(h), text_shift(k))
            }
            ElementalFunction::Exponential { a, base, h, k } => format!(
                "{}{}",
                text_term(a, &format!("{base}^({})", shifted_text(h))),
                text_shift(k)
            ),
            ElementalFunction::Logarithm { a, base, h, k } => format!(
                "{}{}",
                text_term(a, &format!("log({})/log({base})", shifted_text(h))),
                text_shift(k)
            ),
            ElementalFunction::Trigonometric { a, b, wave, k } => {
                let name = match wave {
                    Wave::Sin => "sin",
                    Wave::Cos => "cos",
                };
                format!(
                    "{}{}",
                    text_term(a, &format!("{name}({b}*x)")),
                    text_shift(k)
                )
            }
        }
    }

    /// Key features of the graph, each one a TeX fragment.
    pub fn features(&self) -> Vec<String> {
        match self {
            ElementalFunction::Lineal { m, n } => vec![
                format!("m = {}", m.to_tex()),
                format!("(0, {})", n.to_tex()),
            ],
            ElementalFunction::Quadratic { a, h, k } => vec![
                format!("V = ({}, {})", h.to_tex(), k.to_tex()),
                format!("x = {}", h.to_tex()),
                if a.is_positive() { "\\cup" } else { "\\cap" }.to_string(),
            ],
            ElementalFunction::Radical { h, k, .. } => vec![
                format!("D = [{}, +\\infty)", h.to_tex()),
                format!("({}, {})", h.to_tex(), k.to_tex()),
            ],
            ElementalFunction::Hyperbola { h, k, .. } => vec![
                format!("D = \\mathbb{{R}} \\setminus \\{{{}\\}}", h.to_tex()),
                format!("x = {}", h.to_tex()),
                format!("y = {}", k.to_tex()),
            ],
            ElementalFunction::Exponential { a, h, k, .. } => vec![
                format!("y = {}", k.to_tex()),
                format!("({}, {})", h.to_tex(), a.add(k).to_tex()),
            ],
            ElementalFunction::Logarithm { h, k, .. } => vec![
                format!("D = ({}, +\\infty)", h.to_tex()),
                format!("x = {}", h.to_tex()),
                format!("({}, {})", h.add(&Numeric::one()).to_tex(), k.to_tex()),
            ],
            ElementalFunction::Trigonometric { a, b, k, .. } => {
                let period = Numeric::from_number(2)
                    .divide(&b.abs())
                    .unwrap_or_else(|_| Numeric::from_number(2));
                vec![
                    format!("A = {}", a.abs().to_tex()),
                    format!("T = {}", coef_var_tex(&period, "\\pi")),
                    format!("y = {}", k.to_tex()),
                ]
            }
        }
    }
}
