//! Request grammar: `latex(<op>)` where `<op>` is `factor`, `partfrac`, `solve`
//! or `linsolve`.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::combinator::{all_consuming, map, opt};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded, separated_pair};

use crate::error::{MathError, Result};
use crate::expr::Expr;
use crate::parser::{ParseResult, equation, expression, identifier, ws};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Factor(Expr, Option<String>),
    Partfrac(Expr, Option<String>),
    Solve((Expr, Expr), Option<String>),
    Linsolve(Vec<(Expr, Expr)>, Vec<String>),
}

pub(crate) fn parse_request(input: &str) -> Result<Command> {
    match all_consuming(latex)(input) {
        Ok((_, command)) => Ok(command),
        Err(e) => Err(MathError::Parse(format!("{e:?}"))),
    }
}

fn latex(input: &str) -> ParseResult<'_, Command> {
    preceded(ws(tag("latex")), call(command))(input)
}

fn command(input: &str) -> ParseResult<'_, Command> {
    alt((factor, partfrac, solve, linsolve))(input)
}

fn call<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(ws(char('(')), inner, ws(char(')')))
}

fn optional_var(input: &str) -> ParseResult<'_, Option<String>> {
    opt(map(preceded(ws(char(',')), identifier), str::to_string))(input)
}

fn factor(input: &str) -> ParseResult<'_, Command> {
    map(
        preceded(ws(tag("factor")), call(pair(expression, optional_var))),
        |(expr, var)| Command::Factor(expr, var),
    )(input)
}

fn partfrac(input: &str) -> ParseResult<'_, Command> {
    map(
        preceded(ws(tag("partfrac")), call(pair(expression, optional_var))),
        |(expr, var)| Command::Partfrac(expr, var),
    )(input)
}

fn solve(input: &str) -> ParseResult<'_, Command> {
    map(
        preceded(ws(tag("solve")), call(pair(equation, optional_var))),
        |(sides, var)| Command::Solve(sides, var),
    )(input)
}

fn linsolve(input: &str) -> ParseResult<'_, Command> {
    map(
        preceded(
            ws(tag("linsolve")),
            call(separated_pair(
                list(equation),
                ws(char(',')),
                list(map(identifier, str::to_string)),
            )),
        ),
        |(equations, vars)| Command::Linsolve(equations, vars),
    )(input)
}

fn list<'a, F, O>(item: F) -> impl FnMut(&'a str) -> ParseResult<'a, Vec<O>>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(
        ws(char('[')),
        separated_list1(ws(char(',')), item),
        ws(char(']')),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_each_operation() {
        assert!(matches!(
            parse_request("latex(factor(x^2 - 1))"),
            Ok(Command::Factor(_, None))
        ));
        assert!(matches!(
            parse_request("latex(partfrac((x + 1)/(x^2 - 4), x))"),
            Ok(Command::Partfrac(_, Some(v))) if v == "x"
        ));
        assert!(matches!(
            parse_request("latex(solve(x^2 = 4, x))"),
            Ok(Command::Solve(_, Some(_)))
        ));
        match parse_request("latex(linsolve([x + y = 3, x - y = 1], [x, y]))") {
            Ok(Command::Linsolve(eqs, vars)) => {
                assert_eq!(eqs.len(), 2);
                assert_eq!(vars, vec!["x".to_string(), "y".to_string()]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(parse_request("simplify(x)").is_err());
    }
}
