use serde_json::{Value, json};
use wsmath::{MathError, NATIVE, Random, Registry, Unavailable, default_registry};

fn render(category: &str, seed: u64, options: &Value) -> (String, String, Vec<String>, String) {
    let mut rand = Random::from_seed(seed);
    let generator = default_registry().unwrap()
        .create(category, &mut rand, options, &NATIVE)
        .unwrap_or_else(|e| panic!("{category} with seed {seed}: {e}"));
    (
        generator.formulation(),
        generator.answer(),
        generator.distractors(),
        generator.steps(),
    )
}

#[test]
fn default_registry_lists_every_generator() {
    let categories: Vec<&str> = default_registry().unwrap().categories().collect();
    assert_eq!(
        categories,
        vec![
            "algebra/equations/biquadratic",
            "algebra/equations/irrational",
            "algebra/equations/polynomial",
            "algebra/equations/rational",
            "algebra/polynomial/division",
            "algebra/polynomial/factorize",
            "algebra/system/lineal",
            "arithmetics/fractions/operations",
            "arithmetics/radicals/operations",
            "calculus/elemental/graph",
        ]
    );
}

#[test]
fn every_generator_builds_with_defaults() {
    let registry = default_registry().unwrap();
    for category in registry.categories() {
        for seed in 0..8 {
            let (formulation, answer, _, _) = render(category, seed, &Value::Null);
            assert!(!formulation.is_empty(), "{category} seed {seed}");
            assert!(!answer.is_empty(), "{category} seed {seed}");
        }
    }
}

#[test]
fn same_seed_same_question() {
    let registry = default_registry().unwrap();
    for category in registry.categories() {
        assert_eq!(
            render(category, 2024, &Value::Null),
            render(category, 2024, &Value::Null),
            "{category}"
        );
    }
}

#[test]
fn registering_twice_is_rejected() {
    let source = default_registry().unwrap();
    let spec = *source.get("algebra/polynomial/division").unwrap();
    let mut registry = Registry::new();
    registry.register(spec).unwrap();
    assert_eq!(
        registry.register(spec),
        Err(MathError::DuplicateGenerator("algebra/polynomial/division".to_string()))
    );
}

#[test]
fn unknown_category() {
    let mut rand = Random::from_seed(1);
    let result = default_registry().unwrap().create("geometry/triangles", &mut rand, &Value::Null, &NATIVE);
    assert!(matches!(result, Err(MathError::UnknownGenerator(name)) if name == "geometry/triangles"));
}

#[test]
fn options_must_match_the_schema() {
    let registry = default_registry().unwrap();
    let mut rand = Random::from_seed(1);
    let wrong_type = registry.create(
        "algebra/polynomial/factorize",
        &mut rand,
        &json!({ "interval": "ten" }),
        &NATIVE,
    );
    assert!(matches!(
        wrong_type,
        Err(MathError::InvalidParameter { name, .. }) if name == "interval"
    ));

    let not_an_object = registry.create("algebra/polynomial/factorize", &mut rand, &json!([1, 2]), &NATIVE);
    assert!(matches!(
        not_an_object,
        Err(MathError::InvalidParameter { name, .. }) if name == "options"
    ));

    let bad_domain = registry.create("calculus/elemental/graph", &mut rand, &json!({ "domain": "R" }), &NATIVE);
    assert!(matches!(
        bad_domain,
        Err(MathError::InvalidParameter { name, .. }) if name == "domain"
    ));
}

#[test]
fn options_outside_their_range_are_rejected() {
    let registry = default_registry().unwrap();
    let mut rand = Random::from_seed(1);
    for (category, options, param) in [
        ("algebra/equations/biquadratic", json!({ "interval": 4_000_000_000_i64 }), "interval"),
        ("algebra/equations/irrational", json!({ "interval": 20_000_000 }), "interval"),
        ("algebra/polynomial/division", json!({ "maxDegree": 40 }), "maxDegree"),
        ("algebra/system/lineal", json!({ "dimension": 9 }), "dimension"),
    ] {
        let result = registry.create(category, &mut rand, &options, &NATIVE);
        assert!(
            matches!(&result, Err(MathError::InvalidParameter { name, .. }) if name == param),
            "{category} accepted {options}"
        );
    }

    let widest = json!({ "interval": 1000, "perfectSquares": false });
    assert!(registry
        .create("algebra/equations/biquadratic", &mut rand, &widest, &NATIVE)
        .is_ok());
}

#[test]
fn undeclared_options_are_ignored() {
    let options = json!({ "colour": "blue" });
    assert_eq!(
        render("algebra/polynomial/division", 5, &options),
        render("algebra/polynomial/division", 5, &Value::Null)
    );
}

#[test]
fn sums_only_have_no_precedence_distractor() {
    for seed in 0..10 {
        let (formulation, answer, distractors, _) = render(
            "arithmetics/fractions/operations",
            seed,
            &json!({ "operators": "+-", "terms": 4 }),
        );
        assert!(formulation.starts_with('$') && answer.starts_with('$'));
        assert!(distractors.is_empty());
    }
}

#[test]
fn division_reports_quotient_and_remainder() {
    let (formulation, answer, _, _) = render("algebra/polynomial/division", 3, &Value::Null);
    assert!(formulation.contains("\\right) : \\left("));
    assert!(answer.starts_with("$Q(x) = "));
    assert!(answer.contains("$R(x) = "));
}

#[test]
fn factorize_lists_roots_in_steps() {
    let (formulation, answer, _, steps) = render(
        "algebra/polynomial/factorize",
        9,
        &json!({ "minDegree": 2, "maxDegree": 2 }),
    );
    assert!(formulation.starts_with('$') && answer.starts_with('$'));
    assert!(steps.starts_with("$x = "));
}

#[test]
fn factorize_without_evaluator_still_renders_from_roots() {
    let mut rand = Random::from_seed(9);
    let generator = default_registry().unwrap()
        .create("algebra/polynomial/factorize", &mut rand, &Value::Null, &Unavailable)
        .unwrap();
    assert!(!generator.answer().contains('?'));

    let mut rand = Random::from_seed(9);
    let generator = default_registry().unwrap()
        .create(
            "algebra/polynomial/factorize",
            &mut rand,
            &json!({ "complexity": 2 }),
            &Unavailable,
        )
        .unwrap();
    assert_eq!(generator.answer(), "$?$");
}

#[test]
fn larger_lineal_systems() {
    for seed in 0..5 {
        let (formulation, answer, _, _) = render(
            "algebra/system/lineal",
            seed,
            &json!({ "dimension": 3, "extraComplexity": false }),
        );
        assert!(formulation.contains("\\begin{array}"));
        assert!(answer.contains("\\quad") || answer == "No solution");
    }
}

#[test]
fn biquadratic_answers_are_listed() {
    let (formulation, answer, _, _) = render("algebra/equations/biquadratic", 4, &Value::Null);
    assert!(formulation.contains("^{4}"));
    assert!(answer.contains('='));
}
