//! # core
//!
//! One module per DBC record grammar, named after the keyword it decodes.
//! Every `decode` is a pure function from one line to a model fragment or a
//! [`RecordError`](crate::types::errors::RecordError); only the parser in
//! [`parse`](crate::parse) holds cross-line state.

pub(crate) mod ba_;
pub(crate) mod bo_;
pub(crate) mod bs_;
pub(crate) mod bu_;
pub(crate) mod cm_;
pub(crate) mod sg_;
pub(crate) mod strings;
pub(crate) mod val_table_;
pub(crate) mod version;
