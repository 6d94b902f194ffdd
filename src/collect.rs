//! Merging argument sources before forwarding them to a target.
//!
//! Callers that build arguments from several dynamic places (a user supplied
//! mapping, a fixed positional list, ...) hand them over as JSON values:
//! arrays extend the positional arguments, objects merge into the keyword
//! arguments with later keys overwriting earlier ones.

use serde_json::{Map, Value as JsonValue};

use crate::command::assemble;
use crate::error::{MadError, Result, json_kind};
use crate::value::{Arg, Kwargs, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collected {
    pub args: Vec<Arg>,
    pub kwargs: Kwargs,
}

pub fn collect(sources: &[JsonValue]) -> Result<Collected> {
    let mut collected = Collected::default();
    for source in sources {
        match source {
            JsonValue::Object(map) => collected.kwargs.extend(kwargs_from_json(map)?),
            JsonValue::Array(items) => {
                for item in items {
                    collected.args.push(Arg::from_json(item)?);
                }
            }
            other => return Err(MadError::InvalidArgumentSource(json_kind(other))),
        }
    }
    Ok(collected)
}

pub fn kwargs_from_json(map: &Map<String, JsonValue>) -> Result<Kwargs> {
    let mut kwargs = Kwargs::new();
    for (key, value) in map {
        kwargs.insert(key.as_str(), Value::from_json(key, value)?);
    }
    Ok(kwargs)
}

/// Collects `sources` and invokes `target` with the merged arguments.
pub fn call<T, F>(target: F, sources: &[JsonValue]) -> Result<T>
where
    F: FnOnce(&[Arg], &Kwargs) -> Result<T>,
{
    let collected = collect(sources)?;
    target(&collected.args, &collected.kwargs)
}

/// Assembles `name` from argument lists, with `kwargs` as the lowest priority mapping.
pub fn command_unpack(name: &str, arglists: &[JsonValue], kwargs: &Map<String, JsonValue>) -> Result<String> {
    let mut sources = Vec::with_capacity(arglists.len() + 1);
    sources.push(JsonValue::Object(kwargs.clone()));
    sources.extend(arglists.iter().cloned());
    call(|args, kwargs| assemble(name, args, kwargs), &sources)
}
