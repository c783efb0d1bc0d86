use crate::error::Result;
use crate::format::{display_power, display_root, parens};
use crate::numeric::Numeric;
use crate::radical::{Monomial, PolyRadical, Radical, RadicalOptions};
use crate::random::{BAR_NAMES, Random};

use super::params::{ParamDefault, ParamSpec};
use super::{GeneratorSpec, QuestionContext, QuestionGenerator, inline};

pub(super) const FRACTIONS: GeneratorSpec = GeneratorSpec {
    category: "arithmetics/fractions/operations",
    parameters: &[
        ParamSpec {
            name: "interval",
            default: ParamDefault::Int(10),
            description: "Numerators in [-interval, interval], denominators in [2, interval]",
            range: Some(1..=1000),
        },
        ParamSpec {
            name: "terms",
            default: ParamDefault::Int(3),
            description: "Number of fractions in the expression",
            range: Some(1..=10),
        },
        ParamSpec {
            name: "operators",
            default: ParamDefault::Str("+-*:"),
            description: "Operators to choose from (+, -, *, :)",
            range: None,
        },
    ],
    build: FractionOperations::build,
};

pub(super) const RADICALS: GeneratorSpec = GeneratorSpec {
    category: "arithmetics/radicals/operations",
    parameters: &[
        ParamSpec {
            name: "interval",
            default: ParamDefault::Int(4),
            description: "Range in which random coefficients are generated",
            range: Some(1..=1000),
        },
        ParamSpec {
            name: "maxIndex",
            default: ParamDefault::Int(5),
            description: "Max radical index",
            range: Some(2..=12),
        },
        ParamSpec {
            name: "algebraic",
            default: ParamDefault::Bool(false),
            description: "Whether radicands carry a literal",
            range: None,
        },
        ParamSpec {
            name: "operators",
            default: ParamDefault::Str("*/"),
            description: "Operations between two radicals (* and /)",
            range: None,
        },
        ParamSpec {
            name: "useSingleBase",
            default: ParamDefault::Bool(false),
            description: "Only one base appears in the operations",
            range: None,
        },
        ParamSpec {
            name: "forceDifferentIndex",
            default: ParamDefault::Bool(false),
            description: "All generated roots have different indexes",
            range: None,
        },
        ParamSpec {
            name: "miscellania",
            default: ParamDefault::Bool(false),
            description: "Short mixed exercises with fractions, powers and identities",
            range: None,
        },
    ],
    build: RadicalsOperations::build,
};

const SMALL_BASES: [i64; 5] = [2, 3, 5, 7, 8];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn from_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            ':' | '/' => Some(Op::Div),
            _ => None,
        }
    }

    fn tex(self) -> &'static str {
        match self {
            Op::Add => " + ",
            Op::Sub => " - ",
            Op::Mul => " \\cdot ",
            Op::Div => " : ",
        }
    }

    fn apply(self, lhs: &Numeric, rhs: &Numeric) -> Result<Numeric> {
        Ok(match self {
            Op::Add => lhs.add(rhs),
            Op::Sub => lhs.subtract(rhs),
            Op::Mul => lhs.multiply(rhs),
            Op::Div => lhs.divide(rhs)?,
        })
    }

    fn binds_tight(self) -> bool {
        matches!(self, Op::Mul | Op::Div)
    }
}

/// Products and quotients first, then sums, each pass left to right.
fn evaluate_with_precedence(values: &[Numeric], ops: &[Op]) -> Result<Numeric> {
    let mut terms = vec![values[0].clone()];
    let mut pending = Vec::new();
    for (op, value) in ops.iter().zip(&values[1..]) {
        if op.binds_tight() {
            let last = terms.pop().unwrap_or_default();
            terms.push(op.apply(&last, value)?);
        } else {
            pending.push(*op);
            terms.push(value.clone());
        }
    }
    let mut total = terms[0].clone();
    for (op, value) in pending.iter().zip(&terms[1..]) {
        total = op.apply(&total, value)?;
    }
    Ok(total)
}

fn evaluate_left_to_right(values: &[Numeric], ops: &[Op]) -> Result<Numeric> {
    let mut total = values[0].clone();
    for (op, value) in ops.iter().zip(&values[1..]) {
        total = op.apply(&total, value)?;
    }
    Ok(total)
}

/// Arithmetic with a chain of fractions, respecting operator precedence.
#[derive(Clone, Debug)]
pub struct FractionOperations {
    question: String,
    answer: String,
    distractors: Vec<String>,
}

impl FractionOperations {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let QuestionContext { rand, params, .. } = ctx;
        let r = params.int("interval").max(2);
        let terms = params.int("terms").max(2) as usize;
        let mut operators: Vec<Op> = params.str("operators").chars().filter_map(Op::from_char).collect();
        if operators.is_empty() {
            operators.push(Op::Add);
        }

        let mut values = Vec::with_capacity(terms);
        let mut rendered = String::new();
        let mut ops = Vec::with_capacity(terms - 1);
        for i in 0..terms {
            if i > 0 {
                let op = rand.pick_one(&operators);
                rendered.push_str(op.tex());
                ops.push(op);
            }
            let num = rand.int_between_not_zero(-r, r);
            let den = rand.int_between(2, r);
            let body = format!("\\frac{{{}}}{{{den}}}", num.abs());
            if num < 0 && i > 0 {
                rendered.push_str(&parens(&format!("-{body}")));
            } else if num < 0 {
                rendered.push_str(&format!("-{body}"));
            } else {
                rendered.push_str(&body);
            }
            values.push(Numeric::from_fraction(num, den)?);
        }

        let value = evaluate_with_precedence(&values, &ops)?;
        let naive = evaluate_left_to_right(&values, &ops)?;
        let distractors = if naive == value {
            Vec::new()
        } else {
            vec![inline(&naive.to_tex())]
        };

        Ok(Box::new(FractionOperations {
            question: inline(&rendered),
            answer: inline(&value.to_tex()),
            distractors,
        }))
    }
}

impl QuestionGenerator for FractionOperations {
    fn formulation(&self) -> String {
        self.question.clone()
    }

    fn answer(&self) -> String {
        self.answer.clone()
    }

    fn distractors(&self) -> Vec<String> {
        self.distractors.clone()
    }
}

/// Products, quotients, powers and roots of radicals.
#[derive(Clone, Debug)]
pub struct RadicalsOperations {
    question: String,
    answer: String,
}

impl RadicalsOperations {
    fn build(ctx: QuestionContext<'_>) -> Result<Box<dyn QuestionGenerator>> {
        let QuestionContext { rand, params, .. } = ctx;
        let r = params.int("interval").max(2);
        let (question, answer) = if params.bool("miscellania") {
            miscellania(rand, r)?
        } else {
            let max_index = params.int("maxIndex").clamp(2, 12) as u32;
            let operators = params.str("operators");
            let options = RadicalOptions {
                range: r,
                max_index,
                algebraic: params.bool("algebraic"),
                use_coeff: false,
                bar: rand.pick_one(&BAR_NAMES).to_string(),
            };
            operations(
                rand,
                &options,
                operators,
                params.bool("useSingleBase"),
                params.bool("forceDifferentIndex"),
            )?
        };
        Ok(Box::new(RadicalsOperations {
            question,
            answer: inline(&answer),
        }))
    }
}

impl QuestionGenerator for RadicalsOperations {
    fn formulation(&self) -> String {
        self.question.clone()
    }

    fn answer(&self) -> String {
        self.answer.clone()
    }
}

fn operations(
    rand: &mut Random,
    options: &RadicalOptions,
    operators: &str,
    single_base: bool,
    different_index: bool,
) -> Result<(String, String)> {
    let mut n = rand.int_between(1, 3) as u32;
    if single_base {
        n = n.max(2);
    }
    let mut radicals: Vec<Radical> = (0..n).map(|_| Radical::random(rand, options)).collect();
    if different_index {
        let indexes = rand.shuffle(&(2..n + 2).collect::<Vec<u32>>());
        for (radical, index) in radicals.iter_mut().zip(indexes) {
            radical.index = index;
        }
    }
    if single_base && radicals.len() > 1 {
        let mut base = radicals[0].radicand.clone();
        if !base.literals.is_empty() {
            base.coef = Numeric::one();
        }
        for radical in radicals.iter_mut() {
            radical.radicand = base.clone();
        }
    }

    match radicals.as_slice() {
        [r1] => {
            let rindex = rand.int_between(2, i64::from(options.max_index)) as u32;
            if rand.int_between(0, 1) == 0 {
                let question = display_root(rindex, &r1.to_tex());
                let answer = r1.enter_coefficient().root(rindex).simplify();
                Ok((inline(&question), answer.to_tex()))
            } else {
                let question = format!("{}^{{{rindex}}}", parens(&r1.to_tex()));
                let answer = r1.power(rindex).simplify();
                Ok((inline(&question), answer.to_tex()))
            }
        }
        [r1, r2] => {
            let divide = match (operators.contains('*'), operators.contains('/')) {
                (true, false) => false,
                (false, true) => true,
                _ => rand.int_between(0, 1) == 1,
            };
            if divide {
                let question = format!("\\dfrac{{{}}}{{{}}}", r1.to_tex(), r2.to_tex());
                Ok((inline(&question), r1.divide(r2)?.simplify().to_tex()))
            } else {
                let question = format!("{} \\cdot {}", r1.to_tex(), r2.to_tex());
                Ok((inline(&question), r1.multiply(r2).simplify().to_tex()))
            }
        }
        [r1, r2, r3, ..] => {
            let question = format!(
                "\\dfrac{{{} \\cdot {}}}{{{}}}",
                r1.to_tex(),
                r2.to_tex(),
                r3.to_tex()
            );
            let answer = r1.multiply(r2).divide(r3)?.simplify();
            Ok((inline(&question), answer.to_tex()))
        }
        [] => Ok((String::new(), String::new())),
    }
}

fn sign_pick(rand: &mut Random) -> &'static str {
    rand.pick_one(&["+", "-"])
}

fn miscellania(rand: &mut Random, r: i64) -> Result<(String, String)> {
    match rand.int_between(0, 5) {
        0 => {
            // a/√b ± c/√d
            let picked = rand.pick_many(&SMALL_BASES, 3);
            let (a, d, b) = (picked[0], picked[1], picked[2]);
            let c = rand.int_between(2, 5);
            let op = sign_pick(rand);
            let mut coef = Numeric::from_fraction(c, d)?;
            if op == "-" {
                coef = coef.opposite();
            }
            let sum = PolyRadical::new(vec![
                Radical::numeric(b, 2, Numeric::from_fraction(a, b)?),
                Radical::numeric(d, 2, coef),
            ]);
            let question = format!("\\dfrac{{{a}}}{{\\sqrt{{{b}}}}} {op} \\dfrac{{{c}}}{{\\sqrt{{{d}}}}}");
            Ok((inline(&question), sum.simplify().to_tex()))
        }
        1 => {
            // (a ± √b)² = a² + b ± 2a√b
            let picked = rand.pick_many(&SMALL_BASES, 2);
            let (a, b) = (picked[0], picked[1]);
            let op = sign_pick(rand);
            let middle = if op == "-" { -2 * a } else { 2 * a };
            let sum = PolyRadical::new(vec![
                Radical::numeric(1, 1, Numeric::from_number(a * a + b)),
                Radical::numeric(b, 2, Numeric::from_number(middle)),
            ]);
            let question = format!("\\left( {a} {op} \\sqrt{{{b}}} \\right)^{{2}}");
            Ok((inline(&question), sum.simplify().to_tex()))
        }
        2 => {
            // (a√b + c√d)(a√b − c√d) = a²b − c²d
            let picked = rand.pick_many(&SMALL_BASES, 4);
            let (a, b, c, d) = (picked[0], picked[1], picked[2], picked[3]);
            let question = format!(
                "\\left( {a}\\sqrt{{{b}}} + {c}\\sqrt{{{d}}} \\right) \\cdot \\left( {a}\\sqrt{{{b}}} - {c}\\sqrt{{{d}}} \\right)"
            );
            Ok((inline(&question), (a * a * b - c * c * d).to_string()))
        }
        3 => {
            // (a/b) / (√c/d) = ad/(bc) · √c
            let picked = rand.pick_many(&SMALL_BASES, 4);
            let (a, b, c, d) = (picked[0], picked[1], picked[2], picked[3]);
            let radical = Radical::numeric(c, 2, Numeric::from_fraction(a * d, b * c)?);
            let question = format!("\\dfrac{{\\frac{{{a}}}{{{b}}}}}{{\\frac{{\\sqrt{{{c}}}}}{{{d}}}}}");
            Ok((inline(&question), radical.simplify().to_tex()))
        }
        4 => {
            // base^a · ᵇ√base · ⁿ√(base^d) = base^(a + 1/b + d/n)
            let base = rand.pick_one(&SMALL_BASES);
            let a = rand.int_between_filtered(-r, r, |x| x != 0 && x != 1);
            let b = rand.int_between(2, 5);
            let n = rand.int_between(2, 5);
            let d = rand.int_between(1, 5);
            let question = format!(
                "{} \\cdot {} \\cdot {}",
                display_power(base, &Numeric::from_number(a)),
                display_root(b as u32, &base.to_string()),
                display_root(n as u32, &display_power(base, &Numeric::from_number(d)))
            );
            let exponent = Numeric::from_number(a)
                .add(&Numeric::from_fraction(1, b)?)
                .add(&Numeric::from_fraction(d, n)?);
            Ok((inline(&question), display_power(base, &exponent)))
        }
        _ => {
            // (1 + 1/√B) / (1 − √B/c) = c(1+c)/(c²−B) + c(B+c)/(B(c²−B)) · √B
            let base = rand.pick_one(&[2, 3, 5, 7]);
            let c = rand.int_between(2, 5);
            let question = format!(
                "\\dfrac{{1 + \\frac{{1}}{{\\sqrt{{{base}}}}}}}{{1 - \\frac{{\\sqrt{{{base}}}}}{{{c}}}}}"
            );
            let rational = Numeric::from_fraction(c * (1 + c), c * c - base)?;
            let irrational = Numeric::from_fraction(c * (base + c), base * (c * c - base))?;
            let sum = PolyRadical::new(vec![
                Radical::numeric(1, 1, rational),
                Radical::new(Monomial::constant(irrational), 2, Monomial::constant(Numeric::from_number(base))),
            ]);
            Ok((inline(&question), sum.simplify().to_tex()))
        }
    }
}
