use serde::{Deserialize, Serialize};

/// Signal defined within a message (`SG_` line).
///
/// Describes position/bit-length, endianness, sign, scaling (factor/offset),
/// valid range, unit of measure, receiver nodes and multiplexing role.
/// A signal only ever exists inside its owning [`Message`](crate::types::message::Message).
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Signal {
    /// Signal name.
    pub name: String,
    /// Bit start in the payload (bit 0 = LSB of the first byte).
    pub bit_start: u16,
    /// Bit length.
    pub bit_length: u16,
    /// Endianness (bit order).
    pub endian: Endianness,
    /// Sign.
    pub sign: Signess,
    /// Scaling factor.
    pub factor: f64,
    /// Scaling offset.
    pub offset: f64,
    /// Minimum physical value.
    pub min: f64,
    /// Maximum physical value.
    pub max: f64,
    /// Unit of measure.
    pub unit: String,
    /// Receiver node names, in declaration order.
    pub receivers: Vec<String>,
    /// Multiplexing role (`MuxRole::None` when unused).
    pub mux_role: MuxRole,
    /// Switch value gating this signal. Only meaningful when
    /// `mux_role == MuxRole::Multiplexed`.
    pub mux_value: u32,
    /// Associated comment (DBC `CM_ SG_` section).
    pub comment: String,
}

impl Signal {
    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = Signal::default();
    }
}

/// Bit order of a signal within the payload.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Endianness {
    #[default]
    Motorola, // 0
    Intel, // 1
}

/// Signedness of the raw value.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Signess {
    #[default]
    Unsigned, // +
    Signed, // -
}

/// What role (if any) a signal plays in multiplexing.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MuxRole {
    /// Not multiplexed (always present).
    #[default]
    None,
    /// This signal is the multiplexer switch (marked as `M` in DBC).
    Multiplexor,
    /// This signal is gated by a multiplexer value (marked as `mX`).
    Multiplexed,
}
