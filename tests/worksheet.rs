use serde_json::Value;
use serde_json::json;
use wsmath::{
    GeneratorSpec, MathError, NATIVE, QuestionContext, QuestionDef, QuestionGenerator,
    QuestionOutcome, Result, WorksheetDef, WorksheetGenerator, default_registry,
};

const DEFINITION: &str = r#"{
    "title": "Algebra review",
    "instructions": "Show your work.",
    "includeKeys": true,
    "sections": [
        {
            "name": "Polynomials",
            "activities": [
                {
                    "formulation": "Factor the following polynomials",
                    "questions": [
                        { "gen": "algebra/polynomial/factorize", "repeat": 3 },
                        { "gen": "no/such/generator" },
                        { "gen": "algebra/polynomial/division", "options": { "interval": 3 } }
                    ]
                }
            ]
        },
        {
            "name": "Equations",
            "activities": [
                {
                    "formulation": "Solve ${p} = 0 and compare with the roots of ${q}",
                    "scope": {
                        "p": "Polynomial.fromRoots([1, -2])",
                        "q": "Polynomial([1, 0, -4])"
                    },
                    "questions": [
                        { "gen": "algebra/equations/polynomial", "repeat": 2 }
                    ]
                }
            ]
        }
    ]
}"#;

fn definition() -> WorksheetDef {
    WorksheetDef::from_json(DEFINITION).expect("valid definition")
}

#[test]
fn reads_the_definition() {
    let def = definition();
    assert_eq!(def.title, "Algebra review");
    assert!(def.include_keys);
    assert_eq!(def.sections.len(), 2);
    let questions = &def.sections[0].activities[0].questions;
    assert_eq!(questions[0].repeat, 3);
    assert_eq!(questions[1].repeat, 1);
    assert_eq!(questions[1].options, Value::Null);
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        WorksheetDef::from_json("{ \"sections\": 3 }"),
        Err(MathError::Parse(_))
    ));
}

#[test]
fn failures_stay_with_their_question() {
    let document = WorksheetGenerator::native().unwrap().generate(&definition(), 7);
    let outcomes: Vec<&QuestionOutcome> = document.questions().collect();
    assert_eq!(outcomes.len(), 7);
    let failed: Vec<usize> = outcomes
        .iter()
        .enumerate()
        .filter(|(_, q)| q.is_failed())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(failed, vec![3]);
    match outcomes[3] {
        QuestionOutcome::Failed { generator, error } => {
            assert_eq!(generator, "no/such/generator");
            assert!(error.contains("unknown generator"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(document.answer_key().len(), 6);
}

#[test]
fn scope_values_fill_the_formulation() {
    let document = WorksheetGenerator::native().unwrap().generate(&definition(), 7);
    assert_eq!(
        document.sections[1].activities[0].formulation,
        "Solve x^{2} + x - 2 = 0 and compare with the roots of x^{2} - 4"
    );
}

#[test]
fn broken_scope_keeps_the_formulation() {
    let mut def = definition();
    let activity = &mut def.sections[1].activities[0];
    activity
        .scope
        .insert("p".to_string(), "Polynomial.fromRoots(1, 2".to_string());
    let document = WorksheetGenerator::native().unwrap().generate(&def, 7);
    assert_eq!(
        document.sections[1].activities[0].formulation,
        "Solve ${p} = 0 and compare with the roots of ${q}"
    );
}

#[test]
fn keys_are_omitted_unless_requested() {
    let mut def = definition();
    def.include_keys = false;
    let document = WorksheetGenerator::native().unwrap().generate(&def, 7);
    assert!(document.answer_key().is_empty());
    let json = document.to_json().unwrap();
    assert!(!json.contains("\"answer\""));
}

#[test]
fn same_seed_same_document() {
    let generator = WorksheetGenerator::native().unwrap();
    let first = generator.generate(&definition(), 31);
    let second = generator.generate(&definition(), 31);
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn serialised_document_shape() {
    let document = WorksheetGenerator::native().unwrap().generate(&definition(), 7);
    let value: Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
    assert_eq!(value["title"], "Algebra review");
    assert_eq!(value["includeKeys"], true);
    assert_eq!(value["seed"], 7);
    let first = &value["sections"][0]["activities"][0]["questions"][0];
    assert_eq!(first["status"], "generated");
    assert_eq!(first["gen"], "algebra/polynomial/factorize");
    assert!(first["answer"].is_string());
    let failed = &value["sections"][0]["activities"][0]["questions"][3];
    assert_eq!(failed["status"], "failed");
}

fn always_panics(_: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
    panic!("coefficient table is empty")
}

fn single_activity(questions: Vec<QuestionDef>) -> WorksheetDef {
    let mut def = definition();
    def.sections.truncate(1);
    def.sections[0].activities[0].questions = questions;
    def
}

fn question(generator: &str, options: Value) -> QuestionDef {
    QuestionDef {
        generator: generator.to_string(),
        repeat: 1,
        options,
    }
}

#[test]
fn a_panicking_generator_fails_alone() {
    let mut registry = default_registry().unwrap();
    registry
        .register(GeneratorSpec {
            category: "broken/always",
            parameters: &[],
            build: always_panics,
        })
        .unwrap();
    let generator = WorksheetGenerator::new(registry, &NATIVE);
    let def = single_activity(vec![
        question("broken/always", Value::Null),
        question("algebra/polynomial/factorize", Value::Null),
    ]);

    let document = generator.generate(&def, 3);
    let outcomes: Vec<&QuestionOutcome> = document.questions().collect();
    assert_eq!(outcomes.len(), 2);
    match outcomes[0] {
        QuestionOutcome::Failed { generator, error } => {
            assert_eq!(generator, "broken/always");
            assert!(error.contains("coefficient table is empty"), "{error}");
        }
        other => panic!("expected a failure, got {other:?}"),
    }
    assert!(!outcomes[1].is_failed());
}

#[test]
fn oversized_options_fail_the_question_only() {
    let def = single_activity(vec![
        question(
            "algebra/equations/biquadratic",
            json!({ "interval": 4_000_000_000_i64, "perfectSquares": false }),
        ),
        question("algebra/equations/irrational", json!({ "interval": 20_000_000 })),
        question("algebra/equations/irrational", json!({ "interval": 1000 })),
    ]);
    let document = WorksheetGenerator::native().unwrap().generate(&def, 5);
    let failed: Vec<bool> = document.questions().map(QuestionOutcome::is_failed).collect();
    assert_eq!(failed, vec![true, true, false]);
    match document.questions().next() {
        Some(QuestionOutcome::Failed { error, .. }) => assert!(error.contains("interval"), "{error}"),
        other => panic!("expected a failure, got {other:?}"),
    };
}
