use crate::error::Result;
use crate::evaluator::latex_or_placeholder;
use crate::equation::irreducible_quadratic;
use crate::numeric::Numeric;
use crate::polynomial::Polynomial;
use crate::random::PolynomialOptions;

use super::params::{ParamDefault, ParamSpec};
use super::{GeneratorSpec, QuestionContext, QuestionGenerator, inline};

pub(super) const FACTORIZE: GeneratorSpec = GeneratorSpec {
    category: "algebra/polynomial/factorize",
    parameters: &[
        ParamSpec {
            name: "interval",
            default: ParamDefault::Int(10),
            description: "Roots are drawn from [-interval, interval]",
            range: Some(1..=1000),
        },
        ParamSpec {
            name: "minDegree",
            default: ParamDefault::Int(2),
            description: "Minimum number of rational roots",
            range: Some(0..=10),
        },
        ParamSpec {
            name: "maxDegree",
            default: ParamDefault::Int(4),
            description: "Maximum number of rational roots",
            range: Some(0..=10),
        },
        ParamSpec {
            name: "allowFractions",
            default: ParamDefault::Bool(false),
            description: "Replace one or two roots by fractions",
            range: None,
        },
        ParamSpec {
            name: "complexity",
            default: ParamDefault::Int(1),
            description: "Above 1 an irreducible quadratic factor is added",
            range: Some(0..=10),
        },
    ],
    build: PolyFactorize::build,
};

pub(super) const DIVISION: GeneratorSpec = GeneratorSpec {
    category: "algebra/polynomial/division",
    parameters: &[
        ParamSpec {
            name: "interval",
            default: ParamDefault::Int(5),
            description: "Coefficients are drawn from [-interval, interval]",
            range: Some(1..=1000),
        },
        ParamSpec {
            name: "minDegree",
            default: ParamDefault::Int(3),
            description: "Minimum degree of the dividend",
            range: Some(0..=10),
        },
        ParamSpec {
            name: "maxDegree",
            default: ParamDefault::Int(4),
            description: "Maximum degree of the dividend",
            range: Some(0..=10),
        },
        ParamSpec {
            name: "divisorDegree",
            default: ParamDefault::Int(1),
            description: "Degree of the divisor",
            range: Some(1..=10),
        },
        ParamSpec {
            name: "monicDivisor",
            default: ParamDefault::Bool(true),
            description: "Force a leading coefficient of 1 on the divisor",
            range: None,
        },
        ParamSpec {
            name: "allowFractions",
            default: ParamDefault::Bool(false),
            description: "Allow fractional coefficients in the dividend",
            range: None,
        },
    ],
    build: PolyDivision::build,
};

/// Factor a polynomial built from random rational roots.
#[derive(Clone, Debug)]
pub struct PolyFactorize {
    question: String,
    answer: String,
    steps: String,
}

impl PolyFactorize {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let QuestionContext {
            rand,
            params,
            evaluator,
        } = ctx;
        let r = params.int("interval").max(1);
        let min_degree = params.int("minDegree").max(1);
        let max_degree = params.int("maxDegree").max(min_degree);

        let num_roots = rand.int_between(min_degree, max_degree) as usize;
        let mut roots: Vec<Numeric> = rand
            .int_list(num_roots, -r, r)
            .into_iter()
            .map(Numeric::from_number)
            .collect();
        if params.bool("allowFractions") {
            let num_fractions = (rand.int_between(1, 2) as usize).min(roots.len());
            for root in roots.iter_mut().take(num_fractions) {
                *root = rand.fraction_between_not_zero(-r, r);
            }
        }

        let bar = "x";
        let with_roots = Polynomial::from_roots(&roots);
        let (poly, factored) = if params.int("complexity") > 1 {
            let poly = with_roots.multiply(&irreducible_quadratic(rand));
            let request = format!("factor({}, {bar})", poly.to_text(bar));
            let factored = latex_or_placeholder(evaluator, &request);
            (poly, factored)
        } else {
            let factored = with_roots.to_factor_form(bar, evaluator);
            (with_roots, factored)
        };

        let mut sorted = roots.clone();
        sorted.sort();
        sorted.dedup();
        let steps = sorted
            .iter()
            .map(|root| inline(&format!("{bar} = {}", root.to_tex())))
            .collect::<Vec<_>>()
            .join("; ");

        Ok(Box::new(PolyFactorize {
            question: inline(&poly.to_tex(bar)),
            answer: inline(&factored),
            steps,
        }))
    }
}

impl QuestionGenerator for PolyFactorize {
    fn formulation(&self) -> String {
        self.question.clone()
    }

    fn answer(&self) -> String {
        self.answer.clone()
    }

    fn steps(&self) -> String {
        self.steps.clone()
    }
}

/// Long division of two random polynomials.
#[derive(Clone, Debug)]
pub struct PolyDivision {
    question: String,
    answer: String,
}

impl PolyDivision {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let QuestionContext { rand, params, .. } = ctx;
        let range = params.int("interval").max(1);
        let min_degree = params.int("minDegree").max(1) as usize;
        let max_degree = (params.int("maxDegree").max(0) as usize).max(min_degree);
        let divisor_degree = params.int("divisorDegree").max(1) as usize;

        let dividend = rand.polynomial(&PolynomialOptions {
            min_degree,
            max_degree,
            range,
            fractions: params.bool("allowFractions"),
        });
        let drawn = rand.polynomial(&PolynomialOptions {
            min_degree: divisor_degree,
            max_degree: divisor_degree,
            range,
            fractions: false,
        });
        let divisor = if params.bool("monicDivisor") {
            let mut coefs = drawn.coefs().to_vec();
            coefs[0] = Numeric::one();
            Polynomial::new(coefs)
        } else {
            drawn
        };

        let division = dividend.divide(&divisor)?;
        let bar = "x";
        let question = inline(&format!(
            "\\left({}\\right) : \\left({}\\right)",
            dividend.to_tex(bar),
            divisor.to_tex(bar)
        ));
        let answer = format!(
            "{}, {}",
            inline(&format!("Q({bar}) = {}", division.quotient.to_tex(bar))),
            inline(&format!("R({bar}) = {}", division.remainder.to_tex(bar)))
        );
        Ok(Box::new(PolyDivision { question, answer }))
    }
}

impl QuestionGenerator for PolyDivision {
    fn formulation(&self) -> String {
        self.question.clone()
    }

    fn answer(&self) -> String {
        self.answer.clone()
    }
}
