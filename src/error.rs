//! Crate-level error types.

use std::fmt;

/// Errors produced by the bondline crate.
#[derive(Debug)]
pub enum Error {
    /// Malformed molecule definition.
    Parse(ParseError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "molecule parse error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Failures while decoding a molecule definition.
///
/// Parsing is all-or-nothing: the first malformed field aborts the whole
/// structure, and the variant names the field so hand-authored data files
/// can be fixed quickly.
#[derive(Debug)]
pub enum ParseError {
    /// The input was not syntactically valid JSON.
    Json(serde_json::Error),
    /// A definition node that must be a JSON object was something else.
    NotAnObject(&'static str),
    /// A required field was absent.
    MissingField {
        /// Definition kind (`atom`, `bond`, ...).
        kind: &'static str,
        /// Name of the missing field.
        field: &'static str,
    },
    /// A field was present but held the wrong JSON type or an out-of-range
    /// value.
    InvalidField {
        /// Definition kind (`atom`, `bond`, ...).
        kind: &'static str,
        /// Name of the offending field.
        field: &'static str,
    },
    /// An atom definition carried neither a `u`/`v` nor an `x`/`y` pair.
    MissingCoordinates,
    /// A `contents` entry had an unrecognized `type` tag.
    UnknownContentType(String),
    /// A legacy `bond_type` token was not recognized.
    UnknownBondType(String),
    /// A `lines` entry was not a known line style.
    UnknownLineStyle(String),
    /// A bond declared an explicit empty `lines` list.
    EmptyLineList,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid JSON: {e}"),
            Self::NotAnObject(kind) => {
                write!(f, "{kind} definition must be an object")
            }
            Self::MissingField { kind, field } => {
                write!(f, "{kind} definition must contain {field}")
            }
            Self::InvalidField { kind, field } => {
                write!(f, "{kind} definition has an invalid {field}")
            }
            Self::MissingCoordinates => {
                write!(f, "atom definition must contain either u and v, or x and y")
            }
            Self::UnknownContentType(tag) => {
                write!(f, "contents entry has unknown type {tag}")
            }
            Self::UnknownBondType(tag) => {
                write!(f, "bond type {tag} not recognized")
            }
            Self::UnknownLineStyle(tag) => {
                write!(f, "line style {tag} not recognized")
            }
            Self::EmptyLineList => {
                write!(f, "bond must have at least one line")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
