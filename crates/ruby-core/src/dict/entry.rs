use serde::{Deserialize, Serialize};

/// One analysis of a surface form: its reading and lattice costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    /// Katakana reading; empty when the source has none.
    pub reading: String,
    pub cost: i16,
    pub left_id: u16,
    pub right_id: u16,
}
