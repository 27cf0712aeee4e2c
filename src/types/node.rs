use serde::{Deserialize, Serialize};

/// Node/ECU declared on the bus (`BU_` line).
///
/// The parser preserves declaration order and duplicates exactly as
/// encountered.
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Node/ECU name.
    pub name: String,
}

/// Bus bit-timing declaration (`BS_` line).
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BaudRate {
    /// Baud rate in bit/s.
    pub rate: u32,
}
