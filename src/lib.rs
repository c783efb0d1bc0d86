//! Randomised, reproducible mathematics exercises built on an exact rational core.
//!
//! The core is [`Numeric`] (exact fractions), [`Polynomial`] (dense polynomials
//! over the rationals) and [`Equation`] (equations synthesised from a known
//! solution set). Question generators in [`generators`] draw from a seeded
//! [`Random`] stream, and [`worksheet`] assembles them into documents.

pub mod elemental;
pub mod equation;
pub mod error;
pub mod evaluator;
pub mod expr;
pub mod factor;
pub mod format;
pub mod generators;
pub mod numeric;
pub mod parser;
pub mod polynomial;
pub mod prelude;
pub mod radical;
pub mod random;
pub mod solver;
pub mod worksheet;

pub use elemental::{ElementalFunction, ElementalKind, ElementalOptions, NumberDomain};
pub use equation::{Answer, Equation, MAX_RATIONAL_ATTEMPTS, Relation};
pub use error::{MathError, Result};
pub use evaluator::{
    NATIVE, NativeEvaluator, PLACEHOLDER, SymbolicEvaluator, Unavailable, adapt_latex,
    latex, latex_or_placeholder, partial_fractions,
};
pub use expr::{Expr, Rational};
pub use factor::{Factor, Factorization, factor_polynomial};
pub use format::pretty;
pub use generators::{
    GeneratorSpec, ParamDefault, ParamSpec, Params, QuestionContext, QuestionGenerator, Registry,
    default_registry,
};
pub use numeric::Numeric;
pub use parser::{parse_equation, parse_expr};
pub use polynomial::{Division, Polynomial};
pub use radical::{Monomial, PolyRadical, Radical, RadicalOptions};
pub use random::{BAR_NAMES, PolynomialOptions, Random};
pub use solver::{
    LinearDiagnostics, LinearFamily, LinearInconsistent, LinearResult, LinearSolution,
    NonLinearResult, SolveResult, solve_linear, solve_system,
};
pub use worksheet::{
    ActivityDef, Document, QuestionDef, QuestionOutcome, SectionDef, WorksheetDef,
    WorksheetGenerator,
};
