//! Reading command text back into structured statements.
//!
//! The grammar (see `statement.pest`) accepts what the assembler writes plus
//! hand written scripts with `//` and `!` comments. Free-form arguments such as
//! `bety < 3.5` are normalized into their relational form.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::command::assemble;
use crate::error::{MadError, Result};
use crate::value::{Arg, Kwargs, Operator, Value};

#[derive(Parser)]
#[grammar = "statement.pest"]
struct StatementParser;

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub name: String,
    pub args: Vec<Arg>,
}

impl Statement {
    pub fn render(&self) -> Result<String> {
        assemble(&self.name, &self.args, &Kwargs::new())
    }
}

pub fn parse_script(text: &str) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();
    let script = StatementParser::parse(Rule::script, text)?;
    for pair in script.flatten().filter(|p| p.as_rule() == Rule::statement) {
        statements.push(build_statement(pair)?);
    }
    Ok(statements)
}

/// Parses exactly one statement.
pub fn parse_statement(text: &str) -> Result<Statement> {
    let mut statements = parse_script(text)?;
    match statements.len() {
        1 => Ok(statements.remove(0)),
        n => Err(MadError::Parse {
            message: format!("expected one statement, found {n}"),
            line: None,
            col: None,
        }),
    }
}

fn build_statement(pair: Pair<Rule>) -> Result<Statement> {
    let mut inner = pair.into_inner();
    let name = match inner.next() {
        Some(p) if p.as_rule() == Rule::name => p.as_str().trim().to_string(),
        _ => return Err(MadError::Parse { message: "statement without name".into(), line: None, col: None }),
    };
    let mut args = Vec::new();
    for argument in inner {
        // argument wraps exactly one alternative
        if let Some(arg) = argument.into_inner().next() {
            args.push(build_arg(arg)?);
        }
    }
    Ok(Statement { name, args })
}

fn build_arg(pair: Pair<Rule>) -> Result<Arg> {
    let (line, col) = pair.as_span().start_pos().line_col();
    match pair.as_rule() {
        Rule::negated => {
            let key = pair.into_inner().next().map(|k| k.as_str().to_string()).unwrap_or_default();
            Ok(Arg::Equals(key, Value::Bool(false)))
        }
        Rule::relation => {
            let mut parts = pair.into_inner();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(op), Some(value)) => {
                    let key = key.as_str().to_string();
                    let value = Value::from_literal(value.as_str());
                    match op.as_str().parse::<Operator>()? {
                        Operator::Assign => Ok(Arg::Equals(key, value)),
                        op => Ok(Arg::Relational(key, op, value)),
                    }
                }
                _ => Err(MadError::Parse { message: "incomplete relation".into(), line: Some(line), col: Some(col) }),
            }
        }
        Rule::bare => Ok(Arg::Flag(pair.as_str().trim().to_string())),
        other => Err(MadError::Parse {
            message: format!("unexpected {other:?}"),
            line: Some(line),
            col: Some(col),
        }),
    }
}
