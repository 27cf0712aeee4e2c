use std::io;
use thiserror::Error;

/// Errors produced while decoding a single record line.
///
/// `Syntax` covers a line that fails its keyword-specific grammar;
/// `InvalidInt`/`InvalidFloat` cover a token that was expected to be numeric
/// but is not. Record decoders know nothing about line numbers; the parser
/// wraps these into [`DbcParseError::Record`] with the 1-based source line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid {keyword} syntax: {detail}")]
    Syntax {
        keyword: &'static str,
        detail: String,
    },
    #[error("invalid integer '{token}'")]
    InvalidInt { token: String },
    #[error("invalid number '{token}'")]
    InvalidFloat { token: String },
}

/// Errors produced while parsing a `.dbc` input.
///
/// `MissingColon` and `SignalWithoutMessage` are structural errors raised by
/// the dispatcher itself; `Record` wraps a [`RecordError`] from one of the
/// keyword grammars; the remaining variants are I/O failures. The first error
/// aborts the whole parse; no partial model is returned.
#[derive(Debug, Error)]
pub enum DbcParseError {
    #[error("Not a valid .dbc file: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while reading input. \nError: {source}")]
    Read {
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
    #[error("line {line}: keyword '{keyword}' missing required colon")]
    MissingColon { line: usize, keyword: String },
    #[error("line {line}: SG_ with no preceding BO_ message")]
    SignalWithoutMessage { line: usize },
}

impl DbcParseError {
    /// 1-based source line the error was raised on, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            DbcParseError::Record { line, .. }
            | DbcParseError::MissingColon { line, .. }
            | DbcParseError::SignalWithoutMessage { line } => Some(*line),
            _ => None,
        }
    }
}

/// Errors produced while saving a `BusDefinition` into a `.dbc` file.
#[derive(Debug, Error)]
pub enum DbcSaveError {
    #[error("Output path must end in .dbc: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to create '{path}'. \nError: {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create directories for '{path}'. \nError: {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while writing DBC output. \nError: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
    #[error("Failed to format DBC content")]
    Format,
}
