//! Seam towards the readers of result files written by the engine.
//!
//! Parsing the tabular format is not done here; a [`ResultParser`] is supplied
//! by the caller and this module only decides which of its readers to use.

use std::path::Path;

use crate::error::Result;

pub trait ResultParser {
    /// Row oriented view of a result file.
    type Table;
    /// Mapping view of a result file.
    type Dict;
    fn table(&self, path: &Path) -> Result<Self::Table>;
    fn dict(&self, path: &Path) -> Result<Self::Dict>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Retrieved<T, D> {
    Table(T),
    Dict(D),
}

impl<T, D> Retrieved<T, D> {
    pub fn into_table(self) -> Option<T> {
        match self {
            Retrieved::Table(t) => Some(t),
            Retrieved::Dict(_) => None,
        }
    }
    pub fn into_dict(self) -> Option<D> {
        match self {
            Retrieved::Dict(d) => Some(d),
            Retrieved::Table(_) => None,
        }
    }
}

pub fn retrieve<P: ResultParser>(parser: &P, path: &Path, as_dict: bool) -> Result<Retrieved<P::Table, P::Dict>> {
    if as_dict {
        return Ok(Retrieved::Dict(parser.dict(path)?));
    }
    Ok(Retrieved::Table(parser.table(path)?))
}
