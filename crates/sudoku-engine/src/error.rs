//! Error taxonomy.
//!
//! Contradictions found while propagating or searching are ordinary control
//! flow (`Option` / `bool`), never errors. Only conditions no caller-side
//! recovery can address are surfaced here.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input that cannot be interpreted as a board: bad symbols in the
    /// compact form, wrong cell count, or values outside 1..=9.
    MalformedInput(String),
    /// `is_unique` was invoked on input the solver cannot decide.
    UniquenessIndeterminate,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedInput(msg) => write!(f, "malformed input: {msg}"),
            Error::UniquenessIndeterminate => {
                write!(f, "uniqueness cannot be determined for this input")
            }
        }
    }
}

impl std::error::Error for Error {}
