//! Command text assembly.
//!
//! A command is rendered as `name, arg, key=value, -flag;` followed by a newline.
//! Positional arguments keep their order, keyword arguments are sorted by key so
//! that the same logical call always produces the same bytes.
//!
//! ```
//! use madcmd::command::Command;
//! let text = Command::new("twiss")
//!     .arg(("sequence", "lhc"))
//!     .arg("centre")
//!     .kwarg("dx", 2)
//!     .kwarg("betx", 3)
//!     .render()
//!     .unwrap();
//! assert_eq!(text, "twiss, sequence=lhc, centre, betx=3, dx=2;\n");
//! ```

use serde_json::Value as JsonValue;

use crate::error::{MadError, Result, json_kind};
use crate::value::{Arg, Kwargs, Range, Value};

/// Commands longer than this (in characters) are submitted line by line.
pub const MAX_COMMAND_LENGTH: usize = 10_000;

pub const TERMINATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sanitized {
    /// Nothing to send.
    Empty,
    Single(String),
    /// Oversized input, to be submitted one line at a time.
    Lines(Vec<String>),
}

impl Sanitized {
    pub fn is_empty(&self) -> bool {
        matches!(self, Sanitized::Empty)
    }
    /// The units to hand to the engine, in order.
    pub fn units(&self) -> Vec<&str> {
        match self {
            Sanitized::Empty => Vec::new(),
            Sanitized::Single(text) => vec![text.as_str()],
            Sanitized::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

pub fn sanitize(command: &str) -> Sanitized {
    sanitize_with_limit(command, MAX_COMMAND_LENGTH)
}

pub fn sanitize_with_limit(command: &str, limit: usize) -> Sanitized {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Sanitized::Empty;
    }
    let mut command = command.to_string();
    if !trimmed.ends_with(TERMINATOR) {
        command.push(TERMINATOR);
    }
    // probably read in from a file
    if command.chars().count() > limit {
        return Sanitized::Lines(command.split('\n').map(String::from).collect());
    }
    Sanitized::Single(command)
}

/// Sanitizes a dynamically typed command; anything but a string is a type error.
pub fn sanitize_value(command: &JsonValue) -> Result<Sanitized> {
    match command {
        JsonValue::String(text) => Ok(sanitize(text)),
        other => Err(MadError::NotText(json_kind(other))),
    }
}

pub fn format_range(range: Option<&Range>) -> String {
    range.map(Range::fragment).unwrap_or_default()
}

/// Range fragment from a dynamically typed descriptor.
pub fn format_range_value(range: &JsonValue) -> Result<String> {
    Ok(Range::from_json(range)?.map(|r| r.fragment()).unwrap_or_default())
}

pub fn format_offset(offset: Option<&str>) -> String {
    match offset {
        Some(offset) if !offset.is_empty() => format!("offsetelem=\"{offset}\","),
        _ => String::new(),
    }
}

/// Appends `, <argument>` for one normalized argument.
pub fn push_arg(command: &mut String, arg: &Arg) -> Result<()> {
    let (key, op, value) = arg.normalize();
    command.push_str(", ");
    if key.eq_ignore_ascii_case("range") {
        let fragment = match value {
            Value::Str(s) if s.is_empty() => String::new(),
            Value::Str(s) => Range::Element(s).fragment(),
            Value::Range(r) => r.fragment(),
            other => return Err(MadError::InvalidRange(format!("{other:?}"))),
        };
        command.push_str(fragment.strip_suffix(',').unwrap_or(&fragment));
    } else if let Value::Bool(set) = value {
        if !set {
            command.push('-');
        }
        command.push_str(key);
    } else {
        command.push_str(key);
        command.push_str(op.as_str());
        command.push_str(&value.render(key)?);
    }
    Ok(())
}

pub fn assemble(name: &str, args: &[Arg], kwargs: &Kwargs) -> Result<String> {
    let mut command = String::from(name);
    for arg in args {
        push_arg(&mut command, arg)?;
    }
    for (key, value) in kwargs.sorted() {
        push_arg(&mut command, &Arg::Equals(key.to_string(), value.clone()))?;
    }
    command.push(TERMINATOR);
    command.push('\n');
    Ok(command)
}

/// Builder over [`assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    args: Vec<Arg>,
    kwargs: Kwargs,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), args: Vec::new(), kwargs: Kwargs::new() }
    }
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key, value);
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn args(&self) -> &[Arg] {
        &self.args
    }
    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }
    pub fn render(&self) -> Result<String> {
        assemble(&self.name, &self.args, &self.kwargs)
    }
}
