//! Activity scopes: named values built from a fixed set of constructors and
//! substituted into a formulation through `${name}` placeholders.

use std::collections::BTreeMap;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::multi::separated_list0;
use nom::sequence::{delimited, pair, preceded, separated_pair};
use tracing::warn;

use crate::error::{MathError, Result};
use crate::numeric::Numeric;
use crate::parser::{ParseResult, ws};
use crate::polynomial::Polynomial;
use crate::random::Random;

/// A constructor call as written in a scope entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Constructor {
    Numeric(i64, i64),
    Polynomial(Vec<(i64, i64)>),
    FromRoots(Vec<(i64, i64)>),
    Vector(Vec<(i64, i64)>),
    IntBetween(i64, i64),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScopeValue {
    Numeric(Numeric),
    Polynomial(Polynomial),
    Vector(Vec<Numeric>),
    Integer(i64),
}

impl ScopeValue {
    pub fn to_tex(&self) -> String {
        match self {
            ScopeValue::Numeric(n) => n.to_tex(),
            ScopeValue::Polynomial(p) => p.to_tex("x"),
            ScopeValue::Vector(items) => format!(
                "\\left({}\\right)",
                items.iter().map(Numeric::to_tex).collect::<Vec<_>>().join(", ")
            ),
            ScopeValue::Integer(n) => n.to_string(),
        }
    }
}

fn integer(input: &str) -> ParseResult<'_, i64> {
    ws(map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>))(input)
}

/// `n` or `n/d`.
fn fraction(input: &str) -> ParseResult<'_, (i64, i64)> {
    map(pair(integer, opt(preceded(ws(char('/')), integer))), |(n, d)| {
        (n, d.unwrap_or(1))
    })(input)
}

fn list(input: &str) -> ParseResult<'_, Vec<(i64, i64)>> {
    delimited(
        ws(char('[')),
        separated_list0(ws(char(',')), fraction),
        ws(char(']')),
    )(input)
}

fn args<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(ws(char('(')), inner, ws(char(')')))
}

fn constructor(input: &str) -> ParseResult<'_, Constructor> {
    alt((
        map(preceded(ws(tag("Polynomial.fromRoots")), args(list)), Constructor::FromRoots),
        map(preceded(ws(tag("Polynomial")), args(list)), Constructor::Polynomial),
        map(
            preceded(
                ws(tag("Numeric")),
                args(pair(integer, opt(preceded(ws(char(',')), integer)))),
            ),
            |(n, d)| Constructor::Numeric(n, d.unwrap_or(1)),
        ),
        map(preceded(ws(tag("Vector")), args(list)), Constructor::Vector),
        map(
            preceded(
                ws(tag("intBetween")),
                args(separated_pair(integer, ws(char(',')), integer)),
            ),
            |(lo, hi)| Constructor::IntBetween(lo, hi),
        ),
    ))(input)
}

pub fn parse_constructor(input: &str) -> Result<Constructor> {
    match all_consuming(constructor)(input) {
        Ok((_, c)) => Ok(c),
        Err(e) => Err(MathError::Template(format!("`{input}`: {e:?}"))),
    }
}

fn numerics(items: &[(i64, i64)]) -> Result<Vec<Numeric>> {
    items
        .iter()
        .map(|(n, d)| Numeric::from_fraction(*n, *d))
        .collect()
}

impl Constructor {
    /// Builds the value; only `intBetween` draws from `rnd`.
    pub fn build(&self, rnd: &mut Random) -> Result<ScopeValue> {
        Ok(match self {
            Constructor::Numeric(n, d) => ScopeValue::Numeric(Numeric::from_fraction(*n, *d)?),
            Constructor::Polynomial(coefs) => ScopeValue::Polynomial(Polynomial::new(numerics(coefs)?)),
            Constructor::FromRoots(roots) => {
                ScopeValue::Polynomial(Polynomial::from_roots(&numerics(roots)?))
            }
            Constructor::Vector(items) => ScopeValue::Vector(numerics(items)?),
            Constructor::IntBetween(lo, hi) => ScopeValue::Integer(rnd.int_between(*lo, *hi)),
        })
    }
}

/// Evaluates every scope entry in key order.
pub fn evaluate_scope(
    scope: &BTreeMap<String, String>,
    rnd: &mut Random,
) -> Result<BTreeMap<String, ScopeValue>> {
    scope
        .iter()
        .map(|(name, source)| Ok((name.clone(), parse_constructor(source)?.build(rnd)?)))
        .collect()
}

/// Replaces each `${name}` with the TeX of its value.
pub fn substitute(formulation: &str, values: &BTreeMap<String, ScopeValue>) -> Result<String> {
    let mut out = String::with_capacity(formulation.len());
    let mut rest = formulation;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or_else(|| MathError::Template("unterminated placeholder".to_string()))?;
        let name = after[..end].trim();
        let value = values
            .get(name)
            .ok_or_else(|| MathError::Template(format!("unknown name `{name}`")))?;
        out.push_str(&value.to_tex());
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Formulation with its scope applied. Errors keep the formulation as written.
pub fn render(formulation: &str, scope: &BTreeMap<String, String>, rnd: &mut Random) -> String {
    if scope.is_empty() {
        return formulation.to_string();
    }
    match evaluate_scope(scope, rnd).and_then(|values| substitute(formulation, &values)) {
        Ok(rendered) => rendered,
        Err(err) => {
            warn!(target: "worksheet", %err, "scope evaluation failed, formulation left as written");
            formulation.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_every_constructor() {
        assert_eq!(parse_constructor("Numeric(3, 4)").unwrap(), Constructor::Numeric(3, 4));
        assert_eq!(
            parse_constructor("Polynomial.fromRoots([1, -2, 1/2])").unwrap(),
            Constructor::FromRoots(vec![(1, 1), (-2, 1), (1, 2)])
        );
        assert_eq!(
            parse_constructor(" Vector([]) ").unwrap(),
            Constructor::Vector(Vec::new())
        );
        assert!(parse_constructor("eval(process)").is_err());
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let values = BTreeMap::new();
        assert!(matches!(
            substitute("Solve ${p}", &values),
            Err(MathError::Template(_))
        ));
    }
}
