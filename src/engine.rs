//! Handing commands to the simulation engine.
//!
//! The engine process is not driven from here. An [`Engine`] owns a caller
//! supplied execution function and only takes care of sanitizing text,
//! splitting oversized input and, for table producing commands, reading the
//! result file back through a [`ResultParser`].

use std::path::Path;

use serde_json::Value as JsonValue;
use tempfile::{Builder, TempPath};
use tracing::{debug, trace, warn};

use crate::collect::collect;
use crate::command::{Sanitized, TERMINATOR, assemble, format_offset, format_range, push_arg, sanitize_with_limit};
use crate::error::{MadError, Result, json_kind};
use crate::results::{ResultParser, Retrieved, retrieve};
use crate::settings::Settings;
use crate::value::{Arg, Kwargs, Range};

/// A command that writes its output table to a file, such as `twiss` or `survey`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub command: String,
    pub sequence: String,
    pub range: Option<Range>,
    pub offset: Option<String>,
    pub args: Vec<Arg>,
}

impl TableQuery {
    pub fn new(command: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self { command: command.into(), sequence: sequence.into(), range: None, offset: None, args: Vec::new() }
    }
    pub fn range(mut self, range: impl Into<Range>) -> Self {
        self.range = Some(range.into());
        self
    }
    pub fn offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn to_command(&self, file: &Path) -> Result<String> {
        let mut text = format!("{}, sequence={},", self.command, self.sequence);
        text.push_str(&format_range(self.range.as_ref()));
        text.push_str(&format_offset(self.offset.as_deref()));
        text.push_str(&format!("file=\"{}\"", file.display()));
        for arg in &self.args {
            push_arg(&mut text, arg)?;
        }
        text.push(TERMINATOR);
        text.push('\n');
        Ok(text)
    }
}

pub struct Engine<F>
where
    F: FnMut(&str) -> Result<()>,
{
    exec: F,
    settings: Settings,
}

impl<F> Engine<F>
where
    F: FnMut(&str) -> Result<()>,
{
    pub fn new(exec: F) -> Self {
        Self::with_settings(exec, Settings::default())
    }

    pub fn with_settings(exec: F, settings: Settings) -> Self {
        Self { exec, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_inner(self) -> F {
        self.exec
    }

    /// Sanitizes and submits `text`. Returns how many units were handed over.
    pub fn execute(&mut self, text: &str) -> Result<usize> {
        let sanitized = sanitize_with_limit(text, self.settings.max_command_length);
        if let Sanitized::Lines(lines) = &sanitized {
            debug!(lines = lines.len(), "oversized input, submitting line by line");
        }
        let units = sanitized.units();
        for &unit in &units {
            trace!(command = %unit, "submit");
            (self.exec)(unit)?;
        }
        if units.is_empty() {
            debug!("nothing to submit");
        }
        Ok(units.len())
    }

    pub fn execute_value(&mut self, text: &JsonValue) -> Result<usize> {
        match text {
            JsonValue::String(text) => self.execute(text),
            other => Err(MadError::NotText(json_kind(other))),
        }
    }

    pub fn command(&mut self, name: &str, args: &[Arg], kwargs: &Kwargs) -> Result<usize> {
        let text = assemble(name, args, kwargs)?;
        self.execute(&text)
    }

    /// Assembles `name` from merged argument sources and submits it.
    pub fn call(&mut self, name: &str, sources: &[JsonValue]) -> Result<usize> {
        let collected = collect(sources)?;
        self.command(name, &collected.args, &collected.kwargs)
    }

    /// Runs a table producing command and reads its output back.
    pub fn table<P: ResultParser>(
        &mut self,
        query: &TableQuery,
        parser: &P,
        as_dict: bool,
    ) -> Result<Retrieved<P::Table, P::Dict>> {
        let file = self.scratch_file()?;
        let outcome = query
            .to_command(&file)
            .and_then(|text| self.execute(&text))
            .and_then(|_| retrieve(parser, &file, as_dict));
        let shown = file.display().to_string();
        if let Err(e) = file.close() {
            warn!(file = %shown, error = %e, "could not remove result file");
        }
        outcome
    }

    /// Fresh, uniquely named result file; removed when the returned path is dropped.
    fn scratch_file(&self) -> Result<TempPath> {
        let file = Builder::new()
            .prefix("madcmd-")
            .suffix(".tfs")
            .tempfile_in(&self.settings.scratch_dir)?;
        Ok(file.into_temp_path())
    }
}
