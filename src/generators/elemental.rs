use tracing::debug;

use crate::elemental::{ElementalFunction, ElementalKind, ElementalOptions, NumberDomain};
use crate::error::{MathError, Result};

use super::params::{ParamDefault, ParamSpec};
use super::{GeneratorSpec, QuestionContext, QuestionGenerator, inline};

pub(super) const GRAPH: GeneratorSpec = GeneratorSpec {
    category: "calculus/elemental/graph",
    parameters: &[
        ParamSpec {
            name: "interval",
            default: ParamDefault::Int(10),
            description: "Range in which random coefficients are generated",
            range: Some(1..=1000),
        },
        ParamSpec {
            name: "domain",
            default: ParamDefault::Str("Z"),
            description: "Number domain of the coefficients: Z or Q",
            range: None,
        },
        ParamSpec {
            name: "types",
            default: ParamDefault::IntList(&[0, 1]),
            description: "Lineal: 0, Quadratic: 1, Radical: 2, Hyperbola: 3, Exponential: 4, Logarithm: 5, Trigonometric: 6",
            range: None,
        },
        ParamSpec {
            name: "complexity",
            default: ParamDefault::Int(0),
            description: "When set to 0 parabolas have a simpler vertex form",
            range: Some(0..=10),
        },
    ],
    build: ElementalFunctionGraph::build,
};

/// Sketch the graph of a shifted elementary function.
#[derive(Clone, Debug)]
pub struct ElementalFunctionGraph {
    function: ElementalFunction,
}

fn domain(code: &str) -> Result<NumberDomain> {
    match code {
        "Z" => Ok(NumberDomain::Integers),
        "Q" => Ok(NumberDomain::Rationals),
        other => Err(MathError::InvalidParameter {
            name: "domain".to_string(),
            reason: format!("expected Z or Q, got {other}"),
        }),
    }
}

impl ElementalFunctionGraph {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let QuestionContext { rand, params, .. } = ctx;
        let mut number_domain = domain(params.str("domain"))?;
        let types: Vec<ElementalKind> = params
            .int_list("types")
            .into_iter()
            .filter_map(|code| {
                let kind = ElementalKind::from_code(code);
                if kind.is_none() {
                    debug!(target: "generators", code, "skipping unknown function type");
                }
                kind
            })
            .collect();
        if rand.int_between(0, 1) == 0 {
            number_domain = NumberDomain::Integers;
        }
        let options = ElementalOptions {
            range: params.int("interval").max(1),
            complexity: params.int("complexity"),
            domain: number_domain,
        };
        let function = ElementalFunction::random(rand, &types, &options);
        Ok(Box::new(ElementalFunctionGraph { function }))
    }

    pub fn function(&self) -> &ElementalFunction {
        &self.function
    }
}

impl QuestionGenerator for ElementalFunctionGraph {
    fn formulation(&self) -> String {
        inline(&format!("y = {}", self.function.to_tex()))
    }

    fn answer(&self) -> String {
        self.function
            .features()
            .iter()
            .map(|feature| inline(feature))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The plottable form, for a graphing front end.
    fn steps(&self) -> String {
        format!("y = {}", self.function.to_text())
    }
}
