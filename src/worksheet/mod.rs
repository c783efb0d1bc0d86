//! Worksheet composition: sections of activities, each activity a formulation
//! followed by generated questions.
//!
//! One [`Random`] stream drives the whole worksheet. Questions are built in
//! definition order and every repeat draws from that same stream, so a seed
//! reproduces the document exactly. A generator that fails is recorded as a
//! [`QuestionOutcome::Failed`] entry and the rest of the worksheet continues.

pub mod template;

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{MathError, Result};
use crate::evaluator::{NATIVE, SymbolicEvaluator};
use crate::generators::{Registry, default_registry};
use crate::random::Random;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetDef {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub include_keys: bool,
    #[serde(default)]
    pub sections: Vec<SectionDef>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub activities: Vec<ActivityDef>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityDef {
    #[serde(default)]
    pub formulation: String,
    /// Name to constructor expression, e.g. `"p": "Polynomial.fromRoots([1, 2])"`.
    #[serde(default)]
    pub scope: BTreeMap<String, String>,
    #[serde(default)]
    pub questions: Vec<QuestionDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionDef {
    #[serde(rename = "gen")]
    pub generator: String,
    #[serde(default = "single")]
    pub repeat: u32,
    #[serde(default)]
    pub options: Value,
}

fn single() -> u32 {
    1
}

impl WorksheetDef {
    pub fn from_json(json: &str) -> Result<WorksheetDef> {
        serde_json::from_str(json).map_err(|e| MathError::Parse(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub title: String,
    pub instructions: String,
    pub include_keys: bool,
    pub seed: u64,
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    pub activities: Vec<Activity>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Activity {
    pub formulation: String,
    pub questions: Vec<QuestionOutcome>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum QuestionOutcome {
    Generated {
        #[serde(rename = "gen")]
        generator: String,
        formulation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        answer: Option<String>,
        distractors: Vec<String>,
        steps: String,
    },
    Failed {
        #[serde(rename = "gen")]
        generator: String,
        error: String,
    },
}

impl QuestionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, QuestionOutcome::Failed { .. })
    }
}

impl Document {
    pub fn questions(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.sections
            .iter()
            .flat_map(|s| s.activities.iter())
            .flat_map(|a| a.questions.iter())
    }

    /// Answers in question order; empty when the key is not included.
    pub fn answer_key(&self) -> Vec<String> {
        self.questions()
            .filter_map(|q| match q {
                QuestionOutcome::Generated { answer, .. } => answer.clone(),
                QuestionOutcome::Failed { .. } => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub struct WorksheetGenerator<'e> {
    registry: Registry,
    evaluator: &'e dyn SymbolicEvaluator,
}

impl WorksheetGenerator<'static> {
    /// Every shipped generator, answered by the native evaluator.
    pub fn native() -> Result<Self> {
        Ok(WorksheetGenerator::new(default_registry()?, &NATIVE))
    }
}

impl<'e> WorksheetGenerator<'e> {
    pub fn new(registry: Registry, evaluator: &'e dyn SymbolicEvaluator) -> Self {
        WorksheetGenerator {
            registry,
            evaluator,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn generate(&self, def: &WorksheetDef, seed: u64) -> Document {
        let mut rand = Random::from_seed(seed);
        let mut generated = 0usize;
        let mut failed = 0usize;

        let mut sections = Vec::with_capacity(def.sections.len());
        for section in &def.sections {
            let mut activities = Vec::with_capacity(section.activities.len());
            for activity in &section.activities {
                let formulation = template::render(&activity.formulation, &activity.scope, &mut rand);
                let mut questions = Vec::new();
                for question in &activity.questions {
                    for _ in 0..question.repeat {
                        let outcome = self.question(question, &mut rand, def.include_keys);
                        if outcome.is_failed() {
                            failed += 1;
                        } else {
                            generated += 1;
                        }
                        questions.push(outcome);
                    }
                }
                activities.push(Activity {
                    formulation,
                    questions,
                });
            }
            sections.push(Section {
                name: section.name.clone(),
                activities,
            });
        }

        info!(target: "worksheet", title = def.title.as_str(), seed, generated, failed, "worksheet generated");
        Document {
            title: def.title.clone(),
            instructions: def.instructions.clone(),
            include_keys: def.include_keys,
            seed,
            sections,
        }
    }

    /// Builds one question. Errors and panics inside the generator both become
    /// a [`QuestionOutcome::Failed`] entry.
    fn question(&self, def: &QuestionDef, rand: &mut Random, include_keys: bool) -> QuestionOutcome {
        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            let generator = self
                .registry
                .create(&def.generator, rand, &def.options, self.evaluator)?;
            Ok::<_, MathError>(QuestionOutcome::Generated {
                generator: def.generator.clone(),
                formulation: generator.formulation(),
                answer: include_keys.then(|| generator.answer()),
                distractors: generator.distractors(),
                steps: generator.steps(),
            })
        }));
        let error = match built {
            Ok(Ok(outcome)) => return outcome,
            Ok(Err(err)) => err.to_string(),
            Err(payload) => format!("generator panicked: {}", panic_message(payload.as_ref())),
        };
        warn!(target: "worksheet", generator = def.generator.as_str(), error = error.as_str(), "question generation failed");
        QuestionOutcome::Failed {
            generator: def.generator.clone(),
            error,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}
