//! Generator parameter schemas and resolution of caller options against them.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde_json::Value;
use tracing::debug;

use crate::error::{MathError, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum ParamDefault {
    Int(i64),
    Bool(bool),
    Str(&'static str),
    IntList(&'static [i64]),
}

impl ParamDefault {
    fn to_value(&self) -> Value {
        match self {
            ParamDefault::Int(n) => Value::from(*n),
            ParamDefault::Bool(b) => Value::from(*b),
            ParamDefault::Str(s) => Value::from(*s),
            ParamDefault::IntList(items) => Value::from(items.to_vec()),
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamDefault::Int(_) => value.as_i64().is_some(),
            ParamDefault::Bool(_) => value.is_boolean(),
            ParamDefault::Str(_) => value.is_string(),
            ParamDefault::IntList(_) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|v| v.as_i64().is_some())),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ParamDefault::Int(_) => "an integer",
            ParamDefault::Bool(_) => "a boolean",
            ParamDefault::Str(_) => "a string",
            ParamDefault::IntList(_) => "a list of integers",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: ParamDefault,
    pub description: &'static str,
    /// Accepted values of an integer parameter, or of each item of a list.
    pub range: Option<RangeInclusive<i64>>,
}

impl ParamSpec {
    fn check_range(&self, value: &Value) -> Result<()> {
        let Some(range) = &self.range else {
            return Ok(());
        };
        let items = match value {
            Value::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        match items.iter().filter_map(Value::as_i64).find(|n| !range.contains(n)) {
            Some(n) => Err(MathError::InvalidParameter {
                name: self.name.to_string(),
                reason: format!("{n} is outside {}..={}", range.start(), range.end()),
            }),
            None => Ok(()),
        }
    }
}

/// Parameter values after defaults have been applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, Value>,
}

impl Params {
    /// Fills every declared parameter from `options` or its default. Values of
    /// the wrong type or outside the declared range are rejected; undeclared
    /// keys are ignored.
    pub fn resolve(schema: &[ParamSpec], options: &Value) -> Result<Params> {
        let supplied = match options {
            Value::Null => None,
            Value::Object(map) => Some(map),
            other => {
                return Err(MathError::InvalidParameter {
                    name: "options".to_string(),
                    reason: format!("expected an object, got {other}"),
                });
            }
        };

        let mut values = BTreeMap::new();
        for spec in schema {
            let value = match supplied.and_then(|map| map.get(spec.name)) {
                Some(Value::Null) | None => spec.default.to_value(),
                Some(value) if spec.default.accepts(value) => {
                    spec.check_range(value)?;
                    value.clone()
                }
                Some(value) => {
                    return Err(MathError::InvalidParameter {
                        name: spec.name.to_string(),
                        reason: format!("expected {}, got {value}", spec.default.kind()),
                    });
                }
            };
            values.insert(spec.name.to_string(), value);
        }

        if let Some(map) = supplied {
            for key in map.keys() {
                if !schema.iter().any(|spec| spec.name == key) {
                    debug!(target: "generators", key = key.as_str(), "ignoring undeclared parameter");
                }
            }
        }

        Ok(Params { values })
    }

    pub fn int(&self, name: &str) -> i64 {
        self.values.get(name).and_then(Value::as_i64).unwrap_or(0)
    }

    pub fn bool(&self, name: &str) -> bool {
        self.values
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn str(&self, name: &str) -> &str {
        self.values.get(name).and_then(Value::as_str).unwrap_or("")
    }

    pub fn int_list(&self, name: &str) -> Vec<i64> {
        self.values
            .get(name)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: &[ParamSpec] = &[
        ParamSpec {
            name: "interval",
            default: ParamDefault::Int(10),
            description: "range",
            range: Some(1..=1000),
        },
        ParamSpec {
            name: "types",
            default: ParamDefault::IntList(&[0, 1]),
            description: "kinds",
            range: Some(0..=6),
        },
    ];

    #[test]
    fn defaults_fill_missing_values() {
        let params = Params::resolve(SCHEMA, &json!({ "interval": 4, "extra": true })).unwrap();
        assert_eq!(params.int("interval"), 4);
        assert_eq!(params.int_list("types"), vec![0, 1]);
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = Params::resolve(SCHEMA, &json!({ "interval": "wide" })).unwrap_err();
        assert!(matches!(err, MathError::InvalidParameter { name, .. } if name == "interval"));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = Params::resolve(SCHEMA, &json!({ "interval": 20_000_000 })).unwrap_err();
        assert!(matches!(err, MathError::InvalidParameter { name, .. } if name == "interval"));
        let err = Params::resolve(SCHEMA, &json!({ "interval": 0 })).unwrap_err();
        assert!(matches!(err, MathError::InvalidParameter { name, .. } if name == "interval"));
        let err = Params::resolve(SCHEMA, &json!({ "types": [0, 7] })).unwrap_err();
        assert!(matches!(err, MathError::InvalidParameter { name, .. } if name == "types"));

        let params = Params::resolve(SCHEMA, &json!({ "interval": 1000, "types": [6] })).unwrap();
        assert_eq!(params.int("interval"), 1000);
    }
}
