//! madcmd command line.
//!
//! ```text
//! madcmd models                      list the available model identifiers
//! madcmd command <name> [json ...]   assemble a command from JSON lists and mappings
//! madcmd check <file>                parse a script and print it normalized
//! ```

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use madcmd::collect::call;
use madcmd::command::assemble;
use madcmd::models::model_list;
use madcmd::settings::Settings;
use madcmd::statement::parse_script;
use madcmd::{MadError, Result};

const USAGE: &str = "usage: madcmd models | command <name> [json ...] | check <file>";

fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&settings, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "madcmd failed");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings, args: &[String]) -> Result<()> {
    match args.split_first() {
        Some((sub, rest)) if sub == "models" && rest.is_empty() => {
            for model in model_list(settings)? {
                println!("{model}");
            }
        }
        Some((sub, rest)) if sub == "command" && !rest.is_empty() => {
            let sources = rest[1..]
                .iter()
                .map(|s| serde_json::from_str(s).map_err(|e| MadError::Parse { message: e.to_string(), line: Some(e.line()), col: Some(e.column()) }))
                .collect::<Result<Vec<serde_json::Value>>>()?;
            let text = call(|args, kwargs| assemble(&rest[0], args, kwargs), &sources)?;
            print!("{text}");
        }
        Some((sub, rest)) if sub == "check" && rest.len() == 1 => {
            let script = std::fs::read_to_string(&rest[0])?;
            let statements = parse_script(&script)?;
            info!(file = %rest[0], statements = statements.len(), "parsed script");
            for statement in &statements {
                print!("{}", statement.render()?);
            }
        }
        _ => return Err(MadError::Execution(USAGE.to_string())),
    }
    Ok(())
}
