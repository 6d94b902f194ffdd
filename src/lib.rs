//! madcmd – command text for a MAD-X style accelerator simulation engine.
//!
//! The engine is driven through a small textual command language:
//!
//! ```text
//! twiss, sequence=lhcb1, centre, range=IP1/IP2, -chrom;
//! ```
//!
//! This crate turns structured arguments into that language and enumerates the
//! model definitions shipped next to it. Running the engine and parsing the
//! files it writes are left to the caller.
//!
//! ## Modules
//! * [`value`] – [`value::Arg`], [`value::Value`], [`value::Operator`], [`value::Range`] and keyword arguments.
//! * [`command`] – the sanitizer, range/offset fragments and the assembler.
//! * [`collect`] – merging dynamic (JSON) argument sources before assembling.
//! * [`statement`] – a pest grammar reading command text back into statements.
//! * [`engine`] – submission through a caller supplied execution function.
//! * [`results`] – the seam towards result file parsers.
//! * [`models`] – listing of `.json` model definitions.
//! * [`settings`] – layered configuration.
//!
//! ## Determinism
//! Keyword arguments are rendered in ascending key order, so the same logical
//! call always yields the same text:
//!
//! ```
//! use madcmd::value::{Arg, Kwargs};
//! use madcmd::command::assemble;
//! let kwargs: Kwargs = [("dx", 2), ("betx", 3), ("bety", 8)].into_iter().collect();
//! let text = assemble("twiss", &[Arg::equals("sequence", "lhc"), Arg::flag("centre")], &kwargs).unwrap();
//! assert_eq!(text, "twiss, sequence=lhc, centre, betx=3, bety=8, dx=2;\n");
//! ```
//!
//! ## Submitting
//! ```
//! use madcmd::engine::Engine;
//! let mut sent = Vec::new();
//! let mut engine = Engine::new(|unit: &str| { sent.push(unit.to_string()); Ok(()) });
//! engine.execute("option, -echo").unwrap();
//! drop(engine);
//! assert_eq!(sent, vec!["option, -echo;"]);
//! ```

pub mod collect;
pub mod command;
pub mod engine;
pub mod error;
pub mod models;
pub mod results;
pub mod settings;
pub mod statement;
pub mod value;

pub use error::{MadError, Result};
