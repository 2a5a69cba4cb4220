//! Morphological tokens and the tokenizer seam.

use serde::{Deserialize, Serialize};

/// One morpheme of the analyzed text.
///
/// `surface` is the literal slice of the input; concatenating the surfaces of
/// a tokenizer's output reproduces the input exactly. `reading` is the
/// katakana reading, or `None` when the analyzer has none (symbols, Latin
/// runs, unknown words).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
}

impl Token {
    pub fn new(surface: impl Into<String>, reading: Option<String>) -> Self {
        Self {
            surface: surface.into(),
            reading,
        }
    }

    /// A token with a known reading.
    pub fn with_reading(surface: impl Into<String>, reading: impl Into<String>) -> Self {
        Self::new(surface, Some(reading.into()))
    }

    /// A token the analyzer could not read.
    pub fn bare(surface: impl Into<String>) -> Self {
        Self::new(surface, None)
    }

    /// The reading, treating an empty string the same as no reading.
    pub fn reading(&self) -> Option<&str> {
        self.reading.as_deref().filter(|r| !r.is_empty())
    }
}

/// A morphological analyzer that is ready to use.
///
/// Implementations must emit tokens in source order and cover the whole
/// input, so that the surfaces concatenate back to `text`.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Concatenate token surfaces back into the source text.
pub fn surface_text(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.surface.as_str()).collect()
}
