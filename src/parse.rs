//! Line-oriented DBC parser.
//!
//! [`Parser`] consumes an input stream line by line and fills one
//! [`BusDefinition`]. One parser instance parses exactly one input:
//! [`Parser::parse`] takes the parser by value, so callers needing concurrent
//! parsing create independent instances over independently read streams.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::{debug, trace};

use crate::core;
use crate::types::database::{BusDefinition, RawSection};
use crate::types::errors::{DbcParseError, RecordError};

/// Header sub-mode of the dispatcher.
///
/// `NS_:` switches to `InsideNamespace`; only a `BS_:` line switches back.
/// An explicit enum rather than a flag, leaving room for further header
/// states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum HeaderSection {
    #[default]
    Outside,
    InsideNamespace,
}

/// Keywords that only exist in their colon form.
const COLON_REQUIRED: &[&str] = &["NS_", "BS_", "BU_"];

/// Stateful line dispatcher building one [`BusDefinition`].
#[derive(Debug, Default)]
pub struct Parser {
    line_no: usize,
    section: HeaderSection,
    raw_buffer: Vec<String>,
    db: BusDefinition,
}

impl Parser {
    /// Instantiates a parser for one input stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses all lines from `reader` and returns the populated
    /// [`BusDefinition`].
    ///
    /// Blank lines are ignored. The first malformed line aborts the parse;
    /// every parse error carries the 1-based source line number. Consumes the
    /// parser: a `Parser` cannot be reused across inputs.
    ///
    /// # Errors
    /// Returns an `Err(DbcParseError)` if:
    /// - Reading from `reader` fails.
    /// - A record line fails its keyword-specific grammar.
    /// - A `SG_` line appears before any `BO_` line, or a keyword requiring
    ///   the colon form (`NS_`, `BS_`, `BU_`) appears without its colon.
    pub fn parse<R: BufRead>(mut self, reader: R) -> Result<BusDefinition, DbcParseError> {
        for line in reader.lines() {
            let line = line.map_err(|source| DbcParseError::Read { source })?;
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.dispatch(trimmed)?;
        }
        Ok(self.finish())
    }

    /// Routes one trimmed, non-empty line to its record grammar.
    fn dispatch(&mut self, line: &str) -> Result<(), DbcParseError> {
        let extracted = leading_keyword(line);

        if let Some((keyword, has_colon)) = extracted
            && COLON_REQUIRED.contains(&keyword)
            && !has_colon
        {
            return Err(DbcParseError::MissingColon {
                line: self.line_no,
                keyword: keyword.to_string(),
            });
        }

        // Inside the namespace block only `BS_:` is meaningful; every other
        // line is namespace body content, consumed and dropped.
        if self.section == HeaderSection::InsideNamespace
            && extracted.map(|(keyword, _)| keyword) != Some("BS_")
        {
            return Ok(());
        }

        let Some((keyword, _)) = extracted else {
            // no keyword-like token at all
            self.collect_raw(line);
            return Ok(());
        };

        match keyword {
            "NS_" => {
                trace!(line = self.line_no, "entering namespace block");
                self.section = HeaderSection::InsideNamespace;
                Ok(())
            }
            "BS_" => {
                if self.section == HeaderSection::InsideNamespace {
                    trace!(line = self.line_no, "leaving namespace block");
                }
                self.section = HeaderSection::Outside;
                if let Some(rate) = core::bs_::decode(line).map_err(|e| self.record_err(e))? {
                    self.db.baud_rates.push(rate);
                }
                Ok(())
            }
            "BU_" => {
                self.db.nodes.extend(core::bu_::decode(line));
                Ok(())
            }
            "VERSION" => {
                self.db.version = core::version::decode(line).map_err(|e| self.record_err(e))?;
                Ok(())
            }
            "VAL_TABLE_" => {
                let table = core::val_table_::decode(line).map_err(|e| self.record_err(e))?;
                self.db.value_tables.push(table);
                Ok(())
            }
            "BO_" => {
                let message = core::bo_::decode(line).map_err(|e| self.record_err(e))?;
                self.db.messages.push(message);
                Ok(())
            }
            "SG_" => {
                let signal = core::sg_::decode(line).map_err(|e| self.record_err(e))?;
                if !self.db.attach_signal(signal) {
                    return Err(DbcParseError::SignalWithoutMessage { line: self.line_no });
                }
                Ok(())
            }
            "CM_" => {
                let comment = core::cm_::decode(line).map_err(|e| self.record_err(e))?;
                self.db.comments.push(comment);
                Ok(())
            }
            "BA_DEF_" => {
                core::ba_::decode_definition(line);
                Ok(())
            }
            "BA_" => {
                core::ba_::decode_value(line);
                Ok(())
            }
            _ => {
                self.collect_raw(line);
                Ok(())
            }
        }
    }

    /// Appends the line to the raw buffer and flushes the buffer as one
    /// [`RawSection`] when the line ends in `;`.
    fn collect_raw(&mut self, line: &str) {
        self.raw_buffer.push(line.to_string());
        if line.ends_with(';') {
            trace!(
                line = self.line_no,
                lines = self.raw_buffer.len(),
                "flushing raw section"
            );
            self.db.raw_sections.push(RawSection {
                lines: std::mem::take(&mut self.raw_buffer),
            });
        }
    }

    /// Flushes a pending unterminated raw run and hands out the model.
    fn finish(mut self) -> BusDefinition {
        if !self.raw_buffer.is_empty() {
            trace!(
                lines = self.raw_buffer.len(),
                "flushing unterminated raw section at end of input"
            );
            self.db.raw_sections.push(RawSection {
                lines: std::mem::take(&mut self.raw_buffer),
            });
        }
        self.db
    }

    fn record_err(&self, source: RecordError) -> DbcParseError {
        DbcParseError::Record {
            line: self.line_no,
            source,
        }
    }
}

/// Extracts the leading keyword: the longest run of ASCII uppercase letters,
/// digits and underscores, plus whether a `:` follows (directly or after
/// whitespace). Returns `None` when the line does not start with a
/// keyword-like token.
fn leading_keyword(line: &str) -> Option<(&str, bool)> {
    let end = line
        .find(|c: char| !(c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
        .unwrap_or(line.len());
    if end == 0 {
        return None;
    }
    let has_colon = line[end..].trim_start().starts_with(':');
    Some((&line[..end], has_colon))
}

/// Parses a complete DBC input stream into a [`BusDefinition`].
pub fn parse<R: BufRead>(reader: R) -> Result<BusDefinition, DbcParseError> {
    Parser::new().parse(reader)
}

/// Parses DBC text held in memory. Convenience wrapper around [`parse`].
pub fn parse_str(text: &str) -> Result<BusDefinition, DbcParseError> {
    parse(text.as_bytes())
}

/// Parses a DBC file and returns a populated [`BusDefinition`] instance.
///
/// Reads the whole file, decodes it as Windows-1252 and transliterates a
/// handful of characters (e.g. `ü`, `ö`, `ß`) to ASCII fallbacks to keep
/// downstream processing UTF-8 safe, then parses the decoded text line by
/// line. The model's `file_name` is set from `path`.
///
/// # Parameters
/// - `path`: Path to the `.dbc` file to parse.
///
/// # Errors
/// Returns an `Err(DbcParseError)` if:
/// - The path does not end in `.dbc`.
/// - The file cannot be opened or read.
/// - Any line fails its grammar (see [`Parser::parse`]).
///
/// # Example
/// ```no_run
/// let db = dbcfile::parse_from_file("example.dbc").expect("Failed to parse DBC file");
/// println!("Parsed {} messages", db.messages.len());
/// ```
pub fn parse_from_file(path: &str) -> Result<BusDefinition, DbcParseError> {
    if !path.to_ascii_lowercase().ends_with(".dbc") {
        return Err(DbcParseError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let file: File = File::open(path).map_err(|source| DbcParseError::OpenFile {
        path: path.to_string(),
        source,
    })?;
    let mut reader: BufReader<File> = BufReader::new(file);

    let mut bytes: Vec<u8> = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| DbcParseError::Read { source })?;

    let (text, _, _) = WINDOWS_1252.decode(&bytes);
    let text = transliterate(&text);

    let mut db = parse(text.as_bytes())?;
    db.file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(
        path,
        nodes = db.nodes.len(),
        messages = db.messages.len(),
        signals = db.signal_count(),
        "parsed DBC file"
    );
    Ok(db)
}

/// Swap German characters for ASCII fallbacks.
fn transliterate(src: &str) -> String {
    let mut out: String = String::with_capacity(src.len());
    for ch in src.chars() {
        match ch {
            'ü' => out.push('u'),
            'ö' => out.push('o'),
            'ä' => out.push('a'),
            'ß' => {
                out.push('s');
                out.push('s');
            }
            'Ü' => out.push('U'),
            'Ö' => out.push('O'),
            'Ä' => out.push('A'),
            '¿' => out.push('?'),
            _ => out.push(ch),
        }
    }
    out
}
