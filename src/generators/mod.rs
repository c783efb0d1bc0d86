//! Per-topic question generators and the registry that maps category keys to them.
//!
//! A generator does all of its work when it is built: it draws from the shared
//! [`Random`] stream once, renders its question and answer, and is read-only
//! afterwards. Same seed and same options give byte-identical output.

mod arithmetic;
mod elemental;
mod equations;
pub mod params;
mod polynomial;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{MathError, Result};
use crate::evaluator::SymbolicEvaluator;
use crate::random::Random;

pub use arithmetic::{FractionOperations, RadicalsOperations};
pub use elemental::ElementalFunctionGraph;
pub use equations::{
    EquationsBiquadratic, EquationsIrrational, EquationsLinealSystem, EquationsPolynomial,
    EquationsRational,
};
pub use params::{ParamDefault, ParamSpec, Params};
pub use polynomial::{PolyDivision, PolyFactorize};

pub trait QuestionGenerator {
    fn formulation(&self) -> String;

    fn answer(&self) -> String;

    fn distractors(&self) -> Vec<String> {
        Vec::new()
    }

    fn steps(&self) -> String {
        String::new()
    }
}

pub struct QuestionContext<'a> {
    pub rand: &'a mut Random,
    pub params: Params,
    pub evaluator: &'a dyn SymbolicEvaluator,
}

pub type BuildFn = fn(QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>>;

#[derive(Clone, Copy)]
pub struct GeneratorSpec {
    pub category: &'static str,
    pub parameters: &'static [ParamSpec],
    pub build: BuildFn,
}

impl std::fmt::Debug for GeneratorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorSpec")
            .field("category", &self.category)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    specs: BTreeMap<&'static str, GeneratorSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn register(&mut self, spec: GeneratorSpec) -> Result<()> {
        if self.specs.contains_key(spec.category) {
            return Err(MathError::DuplicateGenerator(spec.category.to_string()));
        }
        self.specs.insert(spec.category, spec);
        Ok(())
    }

    pub fn get(&self, category: &str) -> Option<&GeneratorSpec> {
        self.specs.get(category)
    }

    /// Registered keys in lexicographic order.
    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.keys().copied()
    }

    /// Resolves `options` against the generator's schema and builds one instance.
    pub fn create(
        &self,
        category: &str,
        rand: &mut Random,
        options: &Value,
        evaluator: &dyn SymbolicEvaluator,
    ) -> Result<Box<dyn QuestionGenerator>> {
        let spec = self
            .get(category)
            .ok_or_else(|| MathError::UnknownGenerator(category.to_string()))?;
        let params = Params::resolve(spec.parameters, options)?;
        (spec.build)(QuestionContext {
            rand,
            params,
            evaluator,
        })
    }
}

/// Registry holding every generator shipped with the crate.
pub fn default_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    for spec in [
        polynomial::FACTORIZE,
        polynomial::DIVISION,
        arithmetic::FRACTIONS,
        arithmetic::RADICALS,
        equations::POLYNOMIAL,
        equations::BIQUADRATIC,
        equations::RATIONAL,
        equations::IRRATIONAL,
        equations::LINEAL_SYSTEM,
        elemental::GRAPH,
    ] {
        registry.register(spec)?;
    }
    Ok(registry)
}

/// Wraps a TeX fragment in inline math delimiters.
pub(crate) fn inline(tex: &str) -> String {
    format!("${tex}$")
}
