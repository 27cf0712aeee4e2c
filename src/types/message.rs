use serde::{Deserialize, Serialize};

use crate::types::signal::Signal;

/// CAN frame defined in the bus definition (`BO_` line).
///
/// Maintains the numeric ID, the name, the payload length in bytes (`dlc`),
/// the transmitting nodes, and the signals packed into the frame. A message
/// exclusively owns its signals; the parser appends signal lines to the most
/// recently declared message.
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Numeric CAN ID (base 10).
    pub id: u32,
    /// Message name.
    pub name: String,
    /// Payload length in bytes (Data Length Code).
    pub dlc: u16,
    /// Transmitting node names.
    pub transmitters: Vec<String>,
    /// Signals that belong to this message, in declaration order.
    pub signals: Vec<Signal>,
    /// Associated comment (DBC `CM_ BO_` section).
    pub comment: String,
}

impl Message {
    /// Returns a signal of this message by name (case-insensitive).
    pub fn get_signal_by_name(&self, name: &str) -> Option<&Signal> {
        self.signals
            .iter()
            .find(|sig| sig.name.eq_ignore_ascii_case(name))
    }

    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = Message::default();
    }
}
