//! Dictionary and connection-matrix storage.
//!
//! `SurfaceDictionary` stores surface → entries mappings for lattice lookup.
//! `ConnectionMatrix` stores POS bigram transition costs for Viterbi scoring.

pub mod connection;
mod connection_io;
mod entry;
mod surface_dict;
#[cfg(test)]
mod tests;

pub use connection::ConnectionMatrix;
pub use entry::DictEntry;
pub use surface_dict::SurfaceDictionary;

use std::io;

/// Unified error type for dictionary and connection-matrix binary I/O.
///
/// Covers loading/saving both `SurfaceDictionary` (FGDX) and
/// `ConnectionMatrix` (FGCX) files.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected FGDX or FGCX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch (expected {expected:08x}, got {actual:08x})")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

pub struct SearchResult<'a> {
    pub surface: String,
    pub entries: &'a [DictEntry],
}

pub trait Dictionary: Send + Sync {
    fn lookup(&self, surface: &str) -> Option<&[DictEntry]>;

    /// All dictionary surfaces that are prefixes of `query`, shortest first.
    fn common_prefix_search(&self, query: &str) -> Vec<SearchResult<'_>>;
}
