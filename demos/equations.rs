use serde_json::json;
use wsmath::prelude::{linsolve, question, solve};

fn main() {
    match solve("x^2 - 5*x + 6 = 0", "x") {
        Ok(roots) => println!("roots: {roots}"),
        Err(err) => eprintln!("solve failed: {err}"),
    }

    match linsolve(&["2*x + 3*y = 7", "x - 4*y = -2"], &["x", "y"]) {
        Ok(solution) => println!("system: {solution}"),
        Err(err) => eprintln!("linsolve failed: {err}"),
    }

    for category in [
        "algebra/equations/polynomial",
        "algebra/equations/biquadratic",
        "algebra/equations/rational",
        "algebra/equations/irrational",
    ] {
        match question(category, 7, &json!({ "complexity": 2 })) {
            Ok((formulation, answer)) => println!("{category}\n  {formulation}\n  {answer}"),
            Err(err) => eprintln!("{category}: {err}"),
        }
    }
}
