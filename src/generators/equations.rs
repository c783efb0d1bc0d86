use crate::equation::Equation;
use crate::error::{MathError, Result};
use crate::evaluator::latex_or_placeholder;
use crate::format::{linear_combination_tex, linear_combination_text};
use crate::numeric::Numeric;
use crate::random::{BAR_NAMES, Random};

use super::params::{ParamDefault, ParamSpec};
use super::{GeneratorSpec, QuestionContext, QuestionGenerator, inline};

const INTERVAL_10: ParamSpec = ParamSpec {
    name: "interval",
    default: ParamDefault::Int(10),
    description: "Range in which random coefficients are generated",
    range: Some(1..=1000),
};

const INTERVAL_5: ParamSpec = ParamSpec {
    name: "interval",
    default: ParamDefault::Int(5),
    description: "Range in which random roots are generated",
    range: Some(1..=1000),
};

const COMPLEXITY: ParamSpec = ParamSpec {
    name: "complexity",
    default: ParamDefault::Int(1),
    description: "How much the equation is disguised; from 0 to 2",
    range: Some(0..=10),
};

pub(super) const POLYNOMIAL: GeneratorSpec = GeneratorSpec {
    category: "algebra/equations/polynomial",
    parameters: &[
        INTERVAL_5,
        ParamSpec {
            name: "degree",
            default: ParamDefault::Int(2),
            description: "Degree of the polynomial equation",
            range: Some(1..=10),
        },
        COMPLEXITY,
        ParamSpec {
            name: "irreducible",
            default: ParamDefault::Bool(false),
            description: "Replace two real roots by an irreducible quadratic factor",
            range: None,
        },
        ParamSpec {
            name: "allowFractions",
            default: ParamDefault::Bool(false),
            description: "Allow one fractional root",
            range: None,
        },
    ],
    build: EquationsPolynomial::build,
};

pub(super) const BIQUADRATIC: GeneratorSpec = GeneratorSpec {
    category: "algebra/equations/biquadratic",
    parameters: &[
        INTERVAL_5,
        COMPLEXITY,
        ParamSpec {
            name: "perfectSquares",
            default: ParamDefault::Bool(true),
            description: "Inner roots are perfect squares, so every solution is an integer",
            range: None,
        },
        ParamSpec {
            name: "allowNegative",
            default: ParamDefault::Bool(false),
            description: "An inner root may be negative and contribute no solutions",
            range: None,
        },
    ],
    build: EquationsBiquadratic::build,
};

pub(super) const RATIONAL: GeneratorSpec = GeneratorSpec {
    category: "algebra/equations/rational",
    parameters: &[
        INTERVAL_10,
        ParamSpec {
            name: "complexity",
            default: ParamDefault::Int(1),
            description: "Number of denominator roots; from 1 to 3",
            range: Some(0..=10),
        },
    ],
    build: EquationsRational::build,
};

pub(super) const IRRATIONAL: GeneratorSpec = GeneratorSpec {
    category: "algebra/equations/irrational",
    parameters: &[
        INTERVAL_10,
        ParamSpec {
            name: "complexity",
            default: ParamDefault::Int(1),
            description: "Complexity; number of radicals. From 1-2",
            range: Some(0..=10),
        },
    ],
    build: EquationsIrrational::build,
};

pub(super) const LINEAL_SYSTEM: GeneratorSpec = GeneratorSpec {
    category: "algebra/system/lineal",
    parameters: &[
        INTERVAL_10,
        ParamSpec {
            name: "complexity",
            default: ParamDefault::Int(1),
            description: "Complexity; From 1-2",
            range: Some(0..=10),
        },
        ParamSpec {
            name: "extraComplexity",
            default: ParamDefault::Bool(false),
            description: "Does not generate a matrix form system, needs reduction",
            range: None,
        },
        ParamSpec {
            name: "dimension",
            default: ParamDefault::Int(2),
            description: "Number of variables of the system from 2 to 5",
            range: Some(2..=5),
        },
        ParamSpec {
            name: "nequations",
            default: ParamDefault::Int(0),
            description: "Number of equations from 2 to 5; 0 means one per variable",
            range: Some(0..=5),
        },
        ParamSpec {
            name: "allowIncompatible",
            default: ParamDefault::Bool(false),
            description: "Generate problems that do not have any answer",
            range: None,
        },
        ParamSpec {
            name: "allowIndeterminate",
            default: ParamDefault::Bool(false),
            description: "Generate problems that have infinite answers",
            range: None,
        },
    ],
    build: EquationsLinealSystem::build,
};

/// Formulation and answer of a single equation.
#[derive(Clone, Debug)]
struct Rendered {
    question: String,
    answer: String,
}

impl Rendered {
    fn of(eqn: &Equation<'_>) -> Rendered {
        Rendered {
            question: inline(&eqn.to_tex()),
            answer: eqn.solutions_tex(),
        }
    }
}

macro_rules! question_accessors {
    ($($ty:ident),+) => {
        $(
            impl QuestionGenerator for $ty {
                fn formulation(&self) -> String {
                    self.0.question.clone()
                }

                fn answer(&self) -> String {
                    self.0.answer.clone()
                }
            }
        )+
    };
}

question_accessors!(
    EquationsPolynomial,
    EquationsBiquadratic,
    EquationsRational,
    EquationsIrrational
);

fn complexity(ctx: &QuestionContext<'_>) -> u32 {
    ctx.params.int("complexity").clamp(0, 3) as u32
}

/// Polynomial equation with known rational roots.
#[derive(Clone, Debug)]
pub struct EquationsPolynomial(Rendered);

impl EquationsPolynomial {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let complexity = complexity(&ctx);
        let QuestionContext {
            rand,
            params,
            evaluator,
        } = ctx;
        let r = params.int("interval").max(1);
        let degree = params.int("degree").clamp(1, 6) as usize;
        let real_roots = if params.bool("irreducible") && degree >= 2 {
            degree - 2
        } else {
            degree
        };
        let mut roots = rand.numeric_list(real_roots, r);
        if params.bool("allowFractions") {
            if let Some(first) = roots.first_mut() {
                *first = rand.fraction_between_not_zero(-r, r);
            }
        }

        let mut eqn = Equation::new(rand, "x").with_evaluator(evaluator);
        eqn.polynomial_from_roots(&roots, degree, complexity);
        Ok(Box::new(EquationsPolynomial(Rendered::of(&eqn))))
    }
}

/// `ax⁴ + bx² + c = 0` built from the roots of the quadratic in `x²`.
#[derive(Clone, Debug)]
pub struct EquationsBiquadratic(Rendered);

impl EquationsBiquadratic {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let complexity = complexity(&ctx);
        let QuestionContext {
            rand,
            params,
            evaluator,
        } = ctx;
        let r = params.int("interval").max(1);
        let squares = params.bool("perfectSquares");
        let negative = params.bool("allowNegative");

        let mut inner = Vec::with_capacity(2);
        for _ in 0..2 {
            let value = if squares {
                let k = rand.int_between(0, r);
                square(k)?
            } else {
                rand.int_between(1, square(r)?)
            };
            let value = if negative && rand.int_between(0, 3) == 0 {
                -value
            } else {
                value
            };
            inner.push(Numeric::from_number(value));
        }

        let mut eqn = Equation::new(rand, "x").with_evaluator(evaluator);
        eqn.biquadratic_from_quadratic_roots(&inner, complexity)?;
        Ok(Box::new(EquationsBiquadratic(Rendered::of(&eqn))))
    }
}

fn square(n: i64) -> Result<i64> {
    n.checked_mul(n).ok_or_else(|| MathError::InvalidParameter {
        name: "interval".to_string(),
        reason: format!("{n} squared overflows"),
    })
}

/// Rational equation presented as a sum of partial fractions.
#[derive(Clone, Debug)]
pub struct EquationsRational(Rendered);

impl EquationsRational {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let complexity = complexity(&ctx).max(1);
        let QuestionContext {
            rand,
            params,
            evaluator,
        } = ctx;
        let r = params.int("interval").max(1);
        let mut eqn = Equation::new(rand, "x").with_evaluator(evaluator);
        eqn.rational(r, complexity);
        Ok(Box::new(EquationsRational(Rendered::of(&eqn))))
    }
}

/// Equations with one or two square roots.
#[derive(Clone, Debug)]
pub struct EquationsIrrational(Rendered);

impl EquationsIrrational {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let complexity = complexity(&ctx).max(1);
        let QuestionContext {
            rand,
            params,
            evaluator,
        } = ctx;
        let r = params.int("interval").max(1);
        let mut eqn = Equation::new(rand, "x").with_evaluator(evaluator);
        eqn.irrational(r, complexity);
        Ok(Box::new(EquationsIrrational(Rendered::of(&eqn))))
    }
}

/// Integer linear systems with a chosen solution, optionally made
/// indeterminate or incompatible by a dependent last row.
#[derive(Clone, Debug)]
pub struct EquationsLinealSystem {
    question: String,
    answer: String,
}

struct System {
    matrix: Vec<Vec<i64>>,
    rhs: Vec<i64>,
}

fn draw_system(rand: &mut Random, r: i64, dimension: usize, nequations: usize, complexity: i64) -> System {
    let roots: Vec<i64> = (0..dimension).map(|_| rand.int_between(-r, r)).collect();
    let mut matrix: Vec<Vec<i64>> = (0..nequations).map(|_| rand.int_list(dimension, -r, r)).collect();
    if complexity < 2 {
        let row = rand.int_between(0, nequations as i64 - 1) as usize;
        matrix[row][0] = 1;
    }
    let rhs = matrix
        .iter()
        .map(|coefs| coefs.iter().zip(&roots).map(|(a, x)| a * x).sum())
        .collect();
    System { matrix, rhs }
}

impl System {
    /// Replaces the last row with a combination of the others. An incompatible
    /// system also moves its right-hand side off the combination.
    fn make_dependent(&mut self, rand: &mut Random, r: i64, incompatible: bool) {
        let n = self.matrix.len();
        let weights: Vec<i64> = (0..n - 1).map(|_| rand.int_between_not_zero(-r, r)).collect();
        let mut last = vec![0; self.matrix[n - 1].len()];
        let mut last_rhs = 0;
        for (k, weight) in weights.iter().enumerate() {
            for (slot, coef) in last.iter_mut().zip(&self.matrix[k]) {
                *slot += weight * coef;
            }
            last_rhs += weight * self.rhs[k];
        }
        if incompatible {
            last_rhs += rand.int_between(1, 5);
        }
        self.matrix[n - 1] = last;
        self.rhs[n - 1] = last_rhs;
    }
}

impl EquationsLinealSystem {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let QuestionContext {
            rand,
            params,
            evaluator,
        } = ctx;
        let r = params.int("interval").max(1);
        let complexity = params.int("complexity");
        let dimension = params.int("dimension").clamp(2, 5) as usize;
        let nequations = match params.int("nequations") {
            0 => dimension,
            n => n.clamp(2, 5) as usize,
        };
        let incompatible = params.bool("allowIncompatible");
        let indeterminate = params.bool("allowIndeterminate");
        let bars = &BAR_NAMES[..dimension];

        let mut system = draw_system(rand, r, dimension, nequations, complexity);
        let coin = rand.int_between(0, 3);
        if (indeterminate || incompatible) && coin < 1 {
            system.make_dependent(rand, r, incompatible && coin == 0);
        }

        let mut plain = Vec::with_capacity(nequations);
        let mut rows = Vec::with_capacity(nequations);
        for (coefs, rhs) in system.matrix.iter().zip(&system.rhs) {
            let terms: Vec<(Numeric, &str)> = coefs
                .iter()
                .zip(bars)
                .map(|(c, bar)| (Numeric::from_number(*c), *bar))
                .collect();
            let rhs = Numeric::from_number(*rhs);
            plain.push(format!(
                "{} = {rhs}",
                linear_combination_text(&terms, &Numeric::zero())
            ));

            if params.bool("extraComplexity") {
                rows.push(disguise_row(rand, &terms, &rhs));
            } else {
                let lhs = linear_combination_tex(&terms, &Numeric::zero());
                rows.push(format!("{lhs} &= {}", rhs.to_tex()));
            }
        }

        let request = format!("linsolve([{}], [{}])", plain.join(", "), bars.join(", "));
        let solved = latex_or_placeholder(evaluator, &request);
        let inner = solved.trim().trim_start_matches('[').trim_end_matches(']').trim();
        let answer = if inner.is_empty() {
            "No solution".to_string()
        } else {
            inline(&format!(" \\left({} \\right)", inner.replace(',', ", \\quad ")))
        };

        let question = format!(
            "\\left\\{{ \\begin{{array}}{{ll}} {} \\end{{array}} \\right.",
            rows.join(" \\\\ ")
        );
        Ok(Box::new(EquationsLinealSystem {
            question: inline(&question),
            answer,
        }))
    }
}

/// Adds `a(x - by) + d(x - y)` to both sides, expanding it on opposite sides.
fn disguise_row(rand: &mut Random, terms: &[(Numeric, &str)], rhs: &Numeric) -> String {
    let a = rand.int_between(2, 5);
    let b = rand.int_between(2, 5);
    let d = rand.int_between(2, 5);

    let mut lhs: Vec<(Numeric, &str)> = terms.to_vec();
    lhs[0].0 = lhs[0].0.add(&Numeric::from_number(a));
    lhs[1].0 = lhs[1].0.subtract(&Numeric::from_number(a * b));
    let right = [
        (Numeric::from_number(d), terms[0].1),
        (Numeric::from_number(-d), terms[1].1),
    ];
    let (x, y) = (terms[0].1, terms[1].1);
    format!(
        "{} + {d} \\, ({x} - {y}) &= {} + {a} \\, ({x} - {b}{y})",
        linear_combination_tex(&lhs, &Numeric::zero()),
        linear_combination_tex(&right, rhs)
    )
}

impl QuestionGenerator for EquationsLinealSystem {
    fn formulation(&self) -> String {
        self.question.clone()
    }

    fn answer(&self) -> String {
        self.answer.clone()
    }
}
