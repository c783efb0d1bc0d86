//! `nom` grammar for the plain expression language used in evaluator requests
//! (`3*x^2 - 1/2*x + 4`, `sqrt(x - 2)`, `(x - 1)/(x^2 + 3)`).

use crate::error::{MathError, Result};
use crate::expr::{Expr, Rational};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric0, char, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, not, peek, recognize};
use nom::error::VerboseError;
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated};
use num_bigint::BigInt;
use num_traits::Num;

pub(crate) type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn parse_expr(input: &str) -> Result<Expr> {
    match all_consuming(ws(expression))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(e) => Err(MathError::Parse(format!("{e:?}"))),
    }
}

/// Parses `lhs = rhs`.
pub fn parse_equation(input: &str) -> Result<(Expr, Expr)> {
    match all_consuming(equation)(input) {
        Ok((_, sides)) => Ok(sides),
        Err(e) => Err(MathError::Parse(format!("{e:?}"))),
    }
}

pub(crate) fn equation(input: &str) -> ParseResult<'_, (Expr, Expr)> {
    separated_pair(ws(expression), char('='), ws(expression))(input)
}

pub(crate) fn expression(input: &str) -> ParseResult<'_, Expr> {
    parse_add_sub(input)
}

fn parse_add_sub(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            _ => Expr::Sub(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        pair(
            ws(alt((terminated(char('*'), not(peek(char('*')))), char('/')))),
            parse_unary,
        ),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            _ => Expr::Div(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_unary(input: &str) -> ParseResult<'_, Expr> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_unary)(input) {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else {
        parse_pow(input)
    }
}

fn parse_pow(input: &str) -> ParseResult<'_, Expr> {
    let (rest, base) = parse_primary(input)?;
    if let Ok((next, exp)) = preceded(ws(alt((tag("^"), tag("**")))), parse_unary)(rest) {
        Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
    } else {
        Ok((rest, base))
    }
}

fn parse_primary(input: &str) -> ParseResult<'_, Expr> {
    alt((parse_parens, parse_sqrt, parse_number, parse_identifier))(input)
}

fn parse_parens(input: &str) -> ParseResult<'_, Expr> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_sqrt(input: &str) -> ParseResult<'_, Expr> {
    map(
        preceded(ws(tag("sqrt")), delimited(ws(char('(')), parse_add_sub, ws(char(')')))),
        |arg| Expr::Sqrt(arg.boxed()),
    )(input)
}

fn parse_number(input: &str) -> ParseResult<'_, Expr> {
    map(parse_int, |n| Expr::Constant(Rational::from_integer(n)))(input)
}

fn parse_identifier(input: &str) -> ParseResult<'_, Expr> {
    map(identifier, |s: &str| Expr::Variable(s.to_string()))(input)
}

pub(crate) fn identifier(input: &str) -> ParseResult<'_, &str> {
    ws(recognize(pair(alpha1, alphanumeric0)))(input)
}

fn parse_int(input: &str) -> ParseResult<'_, BigInt> {
    map_res(ws(digit1), |s: &str| BigInt::from_str_radix(s, 10))(input)
}

pub(crate) fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}
