use std::env;
use std::fs;

use wsmath::{WorksheetDef, WorksheetGenerator};

const SAMPLE: &str = r#"{
    "title": "Mixed practice",
    "includeKeys": true,
    "sections": [
        {
            "name": "Arithmetic",
            "activities": [
                {
                    "formulation": "Compute",
                    "questions": [
                        { "gen": "arithmetics/fractions/operations", "repeat": 2 },
                        { "gen": "arithmetics/radicals/operations", "options": { "miscellania": true } }
                    ]
                }
            ]
        },
        {
            "name": "Algebra",
            "activities": [
                {
                    "formulation": "Divide by ${d}",
                    "scope": { "d": "Polynomial([1, -2])" },
                    "questions": [
                        { "gen": "algebra/polynomial/division" },
                        { "gen": "algebra/system/lineal", "options": { "dimension": 3 } }
                    ]
                }
            ]
        }
    ]
}"#;

fn main() {
    let mut args = env::args().skip(1);
    let source = match args.next() {
        Some(path) => match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("cannot read {path}: {err}");
                return;
            }
        },
        None => SAMPLE.to_string(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    let def = match WorksheetDef::from_json(&source) {
        Ok(def) => def,
        Err(err) => {
            eprintln!("invalid worksheet: {err}");
            return;
        }
    };
    let generator = match WorksheetGenerator::native() {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("cannot build the generator registry: {err}");
            return;
        }
    };
    let document = generator.generate(&def, seed);
    match document.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("serialisation failed: {err}"),
    }
}
