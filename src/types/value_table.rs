use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named value-to-text mapping (`VAL_TABLE_` line).
///
/// Keys are unique by construction; the ordered map keeps serialization
/// deterministic.
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ValueTable {
    /// Table name.
    pub name: String,
    /// Raw value → human-readable label.
    pub values: BTreeMap<i64, String>,
}
