//! Morphological analysis via lattice construction and Viterbi search.
//!
//! Builds a character-level lattice from surface-dictionary lookups plus
//! unknown-word nodes, then picks the cheapest path using word costs and an
//! optional connection matrix. The resulting tokens always cover the input
//! exactly, in order.

pub(crate) mod cost;
mod lattice;
#[cfg(test)]
mod testutil;
#[cfg(test)]
mod tests;
mod viterbi;

use std::path::Path;

use tracing::info;

use crate::dict::{ConnectionMatrix, DictError, Dictionary, SurfaceDictionary};
use crate::token::{Token, Tokenizer};

use cost::DefaultCostFunction;
use viterbi::viterbi_best;

pub use lattice::{build_lattice, Lattice, LatticeNode};

/// Split `text` into the best-scoring token sequence.
///
/// If `conn` is provided, uses connection costs for scoring transitions.
/// Otherwise, falls back to unigram-only scoring (sum of word costs).
pub fn analyze(dict: &dyn Dictionary, conn: Option<&ConnectionMatrix>, text: &str) -> Vec<Token> {
    if text.is_empty() {
        return Vec::new();
    }
    let cost_fn = DefaultCostFunction::new(conn);
    let lattice = build_lattice(dict, text);
    viterbi_best(&lattice, &cost_fn)
        .into_iter()
        .map(|idx| {
            let node = &lattice.nodes[idx];
            Token::new(node.surface.clone(), node.reading.clone())
        })
        .collect()
}

/// A ready-to-use analyzer owning its dictionary and connection matrix.
pub struct LatticeTokenizer {
    dict: SurfaceDictionary,
    conn: Option<ConnectionMatrix>,
}

impl LatticeTokenizer {
    pub fn new(dict: SurfaceDictionary, conn: Option<ConnectionMatrix>) -> Self {
        Self { dict, conn }
    }

    /// Load the dictionary (and optional connection matrix) from disk.
    pub fn open(dict_path: &Path, conn_path: Option<&Path>) -> Result<Self, DictError> {
        let dict = SurfaceDictionary::open(dict_path)?;
        let conn = conn_path.map(ConnectionMatrix::open).transpose()?;
        let (surfaces, entries) = dict.stats();
        info!(
            surfaces,
            entries,
            has_conn = conn.is_some(),
            "lattice tokenizer loaded"
        );
        Ok(Self::new(dict, conn))
    }

    pub fn dictionary(&self) -> &SurfaceDictionary {
        &self.dict
    }

    pub fn connection(&self) -> Option<&ConnectionMatrix> {
        self.conn.as_ref()
    }
}

impl Tokenizer for LatticeTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        analyze(&self.dict, self.conn.as_ref(), text)
    }
}
