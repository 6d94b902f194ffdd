//! Typed building blocks of a command: values, operators, arguments and ranges.
//!
//! Every argument handed to the assembler is one of three shapes:
//! * [`Arg::Flag`] – a bare name, meaning the flag is set (also used for free-form text).
//! * [`Arg::Equals`] – `key=value`.
//! * [`Arg::Relational`] – `key<op>value` with an explicit [`Operator`].
//!
//! Values carry their own textual rendering so nothing is stringified implicitly.

use std::fmt;
use std::str::FromStr;

use serde_json::Value as JsonValue;

use crate::error::{MadError, Result, json_kind};

// ------------- Value -------------
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Range(Range),
}

impl Value {
    /// Textual form used on the generic `key<op>value` path.
    pub fn render(&self, key: &str) -> Result<String> {
        match self {
            Value::Bool(b) => Ok(b.to_string()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) if f.is_finite() => Ok(format!("{f:?}")),
            Value::Float(f) => Err(MadError::UnsupportedValue {
                key: key.to_string(),
                kind: format!("non-finite number {f}"),
            }),
            Value::Str(s) => Ok(s.clone()),
            Value::Range(r) => Ok(r.to_string()),
        }
    }

    /// Reads a JSON scalar as a value for `key`. The `range` key accepts a range descriptor.
    pub fn from_json(key: &str, json: &JsonValue) -> Result<Value> {
        if key.eq_ignore_ascii_case("range") {
            return Ok(match Range::from_json(json)? {
                Some(range) => Value::Range(range),
                None => Value::Str(String::new()),
            });
        }
        match json {
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::String(s) => Ok(Value::Str(s.clone())),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(MadError::UnsupportedValue { key: key.to_string(), kind: n.to_string() })
                }
            }
            other => Err(MadError::UnsupportedValue {
                key: key.to_string(),
                kind: json_kind(other).to_string(),
            }),
        }
    }

    /// Reads a literal as it appears in command text.
    pub fn from_literal(text: &str) -> Value {
        let text = text.trim();
        if let Ok(i) = text.parse::<i64>() {
            return Value::Int(i);
        }
        let numeric = text.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
            && text.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
        if numeric {
            if let Ok(f) = text.parse::<f64>() {
                return Value::Float(f);
            }
        }
        Value::Str(text.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}
impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::Int(i as i64) }
}
impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Int(i) }
}
impl From<u32> for Value {
    fn from(i: u32) -> Self { Value::Int(i as i64) }
}
impl From<f64> for Value {
    fn from(f: f64) -> Self { Value::Float(f) }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}
impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}
impl From<Range> for Value {
    fn from(r: Range) -> Self { Value::Range(r) }
}

// ------------- Operator -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    Assign,
    Deferred,
    Equal,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Assign => "=",
            Operator::Deferred => ":=",
            Operator::Equal => "==",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = MadError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "=" => Ok(Operator::Assign),
            ":=" => Ok(Operator::Deferred),
            "==" => Ok(Operator::Equal),
            "<" => Ok(Operator::Less),
            ">" => Ok(Operator::Greater),
            "<=" => Ok(Operator::LessOrEqual),
            ">=" => Ok(Operator::GreaterOrEqual),
            other => Err(MadError::UnknownOperator(other.to_string())),
        }
    }
}

// ------------- Arg -------------
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Flag(String),
    Equals(String, Value),
    Relational(String, Operator, Value),
}

impl Arg {
    pub fn flag(key: impl Into<String>) -> Self {
        Arg::Flag(key.into())
    }
    pub fn equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Arg::Equals(key.into(), value.into())
    }
    pub fn relational(key: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Arg::Relational(key.into(), op, value.into())
    }

    /// The (key, operator, value) triple every argument resolves to.
    pub fn normalize(&self) -> (&str, Operator, Value) {
        match self {
            Arg::Flag(key) => (key.as_str(), Operator::Assign, Value::Bool(true)),
            Arg::Equals(key, value) => (key.as_str(), Operator::Assign, value.clone()),
            Arg::Relational(key, op, value) => (key.as_str(), *op, value.clone()),
        }
    }

    /// Reads a positional argument: a string, `[key, value]` or `[key, op, value]`.
    pub fn from_json(json: &JsonValue) -> Result<Arg> {
        match json {
            JsonValue::String(s) => Ok(Arg::Flag(s.clone())),
            JsonValue::Array(items) => match items.as_slice() {
                [JsonValue::String(key), value] => Ok(Arg::Equals(key.clone(), Value::from_json(key, value)?)),
                [JsonValue::String(key), JsonValue::String(op), value] => {
                    Ok(Arg::Relational(key.clone(), op.parse()?, Value::from_json(key, value)?))
                }
                _ => Err(MadError::MalformedArgument(json.to_string())),
            },
            other => Err(MadError::MalformedArgument(other.to_string())),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self { Arg::Flag(s.to_string()) }
}
impl From<String> for Arg {
    fn from(s: String) -> Self { Arg::Flag(s) }
}
impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Arg {
    fn from((key, value): (K, V)) -> Self { Arg::Equals(key.into(), value.into()) }
}
impl<K: Into<String>, V: Into<Value>> From<(K, Operator, V)> for Arg {
    fn from((key, op, value): (K, Operator, V)) -> Self { Arg::Relational(key.into(), op, value.into()) }
}

// ------------- Kwargs -------------
/// Keyword arguments. Inserting an existing key overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kwargs {
    entries: Vec<(String, Value)>,
}

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
    pub fn extend(&mut self, other: Kwargs) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Entries in ascending key order; equal keys keep their relative order.
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut sorted: Vec<(&str, &Value)> = self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Kwargs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut kwargs = Kwargs::new();
        for (key, value) in iter {
            kwargs.insert(key, value);
        }
        kwargs
    }
}

// ------------- Range -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Range {
    Element(String),
    Span { first: String, last: String },
}

impl Range {
    pub fn element(name: impl Into<String>) -> Self {
        Range::Element(name.into())
    }
    pub fn span(first: impl Into<String>, last: impl Into<String>) -> Self {
        Range::Span { first: first.into(), last: last.into() }
    }

    /// `range=A/B,` with the trailing comma callers splice into argument lists.
    pub fn fragment(&self) -> String {
        format!("range={self},")
    }

    /// Reads a range descriptor. `None` when no range is given.
    pub fn from_json(json: &JsonValue) -> Result<Option<Range>> {
        match json {
            JsonValue::Null => Ok(None),
            JsonValue::String(s) if s.is_empty() => Ok(None),
            JsonValue::String(s) => Ok(Some(Range::Element(s.clone()))),
            JsonValue::Array(items) if items.is_empty() => Ok(None),
            JsonValue::Array(items) => match items.as_slice() {
                [JsonValue::String(first), JsonValue::String(last)] => Ok(Some(Range::span(first, last))),
                _ => Err(MadError::InvalidRange(json.to_string())),
            },
            JsonValue::Object(map) if map.is_empty() => Ok(None),
            JsonValue::Object(map) => match (map.get("first"), map.get("last")) {
                (Some(JsonValue::String(first)), Some(JsonValue::String(last))) => Ok(Some(Range::span(first, last))),
                _ => Err(MadError::InvalidRange(json.to_string())),
            },
            other => Err(MadError::InvalidRange(other.to_string())),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Range::Element(name) => write!(f, "{name}"),
            Range::Span { first, last } => write!(f, "{first}/{last}"),
        }
    }
}

impl From<&str> for Range {
    fn from(s: &str) -> Self { Range::Element(s.to_string()) }
}
impl<A: Into<String>, B: Into<String>> From<(A, B)> for Range {
    fn from((first, last): (A, B)) -> Self { Range::span(first, last) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literals_keep_their_type() {
        assert_eq!(Value::from_literal("3"), Value::Int(3));
        assert_eq!(Value::from_literal(" 3.13 "), Value::Float(3.13));
        assert_eq!(Value::from_literal("lhcb1"), Value::Str("lhcb1".into()));
        assert_eq!(Value::from_literal("inf"), Value::Str("inf".into()));
        assert_eq!(Value::from_literal("\"file.tfs\""), Value::Str("\"file.tfs\"".into()));
    }

    #[test]
    fn floats_render_like_literals() {
        assert_eq!(Value::Float(3.13).render("x").unwrap(), "3.13");
        assert_eq!(Value::Float(2.0).render("x").unwrap(), "2.0");
        assert_eq!(Value::Float(1e20).render("x").unwrap(), "1e20");
        assert_eq!(Value::Float(1e-7).render("x").unwrap(), "1e-7");
        assert!(matches!(Value::Float(f64::NAN).render("x"), Err(MadError::UnsupportedValue { .. })));
    }

    #[test]
    fn operators_parse_and_display() {
        for text in ["=", ":=", "==", "<", ">", "<=", ">="] {
            let op: Operator = text.parse().unwrap();
            assert_eq!(op.to_string(), text);
        }
        assert!(matches!("=>".parse::<Operator>(), Err(MadError::UnknownOperator(_))));
    }

    #[test]
    fn kwargs_overwrite_and_sort_stably() {
        let mut kwargs = Kwargs::new();
        kwargs.insert("dx", 2);
        kwargs.insert("betx", 3);
        kwargs.insert("dx", 5);
        let keys: Vec<&str> = kwargs.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["betx", "dx"]);
        assert_eq!(kwargs.get("dx"), Some(&Value::Int(5)));
    }

    #[test]
    fn json_values_for_other_keys_must_be_scalars() {
        assert!(matches!(Value::from_json("k", &json!([1, 2])), Err(MadError::UnsupportedValue { .. })));
        assert!(matches!(Value::from_json("k", &json!(null)), Err(MadError::UnsupportedValue { .. })));
        assert_eq!(Value::from_json("k", &json!(1.5)).unwrap(), Value::Float(1.5));
        assert_eq!(
            Value::from_json("RANGE", &json!(["a", "b"])).unwrap(),
            Value::Range(Range::span("a", "b"))
        );
    }
}
