//! BusDefinition model.
//!
//! This module defines the in-memory **bus definition** populated by the DBC
//! parser. Storage is plain ownership: the root owns its nodes, value tables
//! and messages, and every [`Signal`](crate::types::signal::Signal) is owned
//! by exactly one [`Message`]. All sequences preserve declaration order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    attributes::{AttributeDefinition, AttributeValue},
    comment::Comment,
    message::Message,
    node::{BaudRate, Node},
    signal::Signal,
    value_table::ValueTable,
};

/// In-memory representation of a CAN bus definition (DBC).
///
/// Created empty at parse start, mutated append-only while parsing, and read
/// only during serialization.
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BusDefinition {
    // --- General information ---
    /// Version string (`VERSION` line).
    pub version: String,
    /// Author metadata, best effort; not grammar-enforced.
    pub author: String,
    /// License metadata, best effort; not grammar-enforced.
    pub license: String,
    /// Creation timestamp metadata, best effort; not grammar-enforced.
    pub created_on: Option<DateTime<Utc>>,
    /// Source file name, set by [`parse_from_file`](crate::parse::parse_from_file).
    pub file_name: String,

    // --- Symbol tables ---
    /// Declared nodes, order and duplicates preserved.
    pub nodes: Vec<Node>,
    /// Declared baud rates. Only the first is honored on save.
    pub baud_rates: Vec<BaudRate>,
    /// Named value tables.
    pub value_tables: Vec<ValueTable>,

    // --- Core data ---
    /// Messages in declaration order, each owning its signals.
    pub messages: Vec<Message>,
    /// Attribute definitions. Never populated by the parser (the `BA_DEF_`
    /// grammar is inert); callers may fill them in.
    pub attributes: Vec<AttributeDefinition>,
    /// Attribute assignments. Never populated by the parser.
    pub attr_values: Vec<AttributeValue>,

    // --- Comments ---
    pub comments: Vec<Comment>,

    // --- Unrecognized constructs, captured verbatim ---
    pub raw_sections: Vec<RawSection>,
}

impl BusDefinition {
    /// Appends `signal` to the most recently declared message. Signals bind
    /// to the tail of the message list; returns `false` when no message
    /// exists yet.
    pub(crate) fn attach_signal(&mut self, signal: Signal) -> bool {
        match self.messages.last_mut() {
            Some(message) => {
                message.signals.push(signal);
                true
            }
            None => false,
        }
    }

    /// Returns a message by numeric CAN ID.
    pub fn get_message_by_id(&self, id: u32) -> Option<&Message> {
        self.messages.iter().find(|msg| msg.id == id)
    }

    /// Returns a message by name (case-insensitive).
    pub fn get_message_by_name(&self, name: &str) -> Option<&Message> {
        self.messages
            .iter()
            .find(|msg| msg.name.eq_ignore_ascii_case(name))
    }

    /// Returns a node by name (case-insensitive). With duplicate
    /// declarations this is the first occurrence.
    pub fn get_node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|node| node.name.eq_ignore_ascii_case(name))
    }

    /// Total number of signals across all messages.
    pub fn signal_count(&self) -> usize {
        self.messages.iter().map(|msg| msg.signals.len()).sum()
    }
}

/// Verbatim capture of a run of input lines whose leading keyword is not part
/// of the grammar. Flushed as one unit when a line ends in `;`.
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RawSection {
    /// Raw text lines, trimmed, in input order.
    pub lines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use crate::parse::parse_str;

    #[test]
    fn test_lookup_helpers() {
        let db = parse_str(
            "BU_: A B;\nBO_ 7 Frame: 8 A\n SG_ Speed : 0|8@1+ (1,0) [0|255] \"\" B\n",
        )
        .unwrap();

        assert_eq!(db.get_message_by_id(7).unwrap().name, "Frame");
        assert!(db.get_message_by_name("frame").is_some());
        assert!(db.get_message_by_id(8).is_none());
        assert!(db.get_node_by_name("b").is_some());
        assert_eq!(db.signal_count(), 1);

        let msg = db.get_message_by_id(7).unwrap();
        assert!(msg.get_signal_by_name("speed").is_some());
        assert!(msg.get_signal_by_name("missing").is_none());
    }
}
