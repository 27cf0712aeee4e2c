//! # dbcfile
//!
//! Read, edit and write **CAN DBC** bus definition files.
//!
//! ## Highlights
//! - **Line-oriented parser**: [`parse`] / [`parse_from_file`] turn DBC text
//!   into a [`BusDefinition`]; every malformed record aborts the parse with
//!   its 1-based source line number.
//! - **Plain ownership**: messages own their signals, sequences preserve
//!   declaration order and duplicates.
//! - **Raw passthrough**: lines with unrecognized keywords are captured
//!   verbatim as [`RawSection`]s instead of being dropped.
//! - **Deterministic writer**: [`save`] / [`save_to_file`] emit a fixed
//!   section order; the same model always produces the same bytes.
//!
//! Documented lossy behaviors, preserved from the dialect this crate targets:
//! namespace body content (between `NS_:` and `BS_:`) is consumed and
//! dropped, only the first baud rate is written back, and raw sections are
//! not re-emitted.

mod core;
pub mod parse;
pub mod save;
pub mod types;

pub use crate::parse::{Parser, parse, parse_from_file, parse_str};
pub use crate::save::{save, save_to_file};
pub use crate::types::{
    attributes::{AttrObject, AttrType, AttributeDefinition, AttributeValue},
    comment::{Comment, CommentObject},
    database::{BusDefinition, RawSection},
    errors::{DbcParseError, DbcSaveError, RecordError},
    message::Message,
    node::{BaudRate, Node},
    signal::{Endianness, MuxRole, Signal, Signess},
    value_table::ValueTable,
};
