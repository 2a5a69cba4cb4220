use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use ruby_core::annotate::{annotate_with, MarkupStyle};
use ruby_core::{contains_kanji, Token, Tokenizer};
use tracing::{debug, debug_span};

use crate::error::EngineError;
use crate::loader::{DictionaryFiles, LoadState, SharedTokenizer, TokenizerCell, TokenizerSource};

/// Result of annotating a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The selection has no kanji; the tokenizer was not consulted.
    NoKanji,
    /// Ruby markup covering the whole selection.
    Markup(String),
}

/// Owns the tokenizer handle and its initialization state.
///
/// Share it behind an `Arc`; every method takes `&self`.
pub struct FuriganaEngine {
    source: Arc<dyn TokenizerSource>,
    cell: TokenizerCell,
    style: MarkupStyle,
}

impl FuriganaEngine {
    pub fn new(source: Arc<dyn TokenizerSource>) -> Self {
        Self {
            source,
            cell: TokenizerCell::new(),
            style: MarkupStyle::from_settings(),
        }
    }

    /// Engine backed by a compiled dictionary and optional connection matrix.
    pub fn from_files(dict: impl Into<PathBuf>, conn: Option<PathBuf>) -> Self {
        Self::new(Arc::new(DictionaryFiles::new(dict, conn)))
    }

    pub fn with_style(mut self, style: MarkupStyle) -> Self {
        self.style = style;
        self
    }

    pub fn load_state(&self) -> LoadState {
        self.cell.state()
    }

    /// Number of tokenizer loads started (one per flight).
    pub fn load_count(&self) -> usize {
        self.cell.flights()
    }

    /// Get the tokenizer, loading it on first use.
    pub fn tokenizer(&self) -> Result<SharedTokenizer, EngineError> {
        let source = Arc::clone(&self.source);
        Ok(self.cell.get_or_init(move || source.load())?)
    }

    /// Start loading on a background thread. Joining the handle yields the
    /// load result; the load cannot be cancelled once started.
    pub fn warm_up(self: &Arc<Self>) -> Result<JoinHandle<Result<(), EngineError>>, EngineError> {
        let engine = Arc::clone(self);
        let handle = thread::Builder::new()
            .name("furigana-loader".into())
            .spawn(move || engine.tokenizer().map(|_| ()))?;
        Ok(handle)
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, EngineError> {
        Ok(self.tokenizer()?.tokenize(text))
    }

    /// Annotate a selection.
    ///
    /// Selections without kanji are skipped without loading the tokenizer.
    /// If the tokenizer is unavailable the error is returned and no markup
    /// is produced.
    pub fn annotate_text(&self, text: &str) -> Result<Annotation, EngineError> {
        let _span = debug_span!("annotate_text", len = text.len()).entered();
        if !contains_kanji(text) {
            debug!("selection has no kanji");
            return Ok(Annotation::NoKanji);
        }
        let tokens = self.tokenize(text)?;
        debug!(tokens = tokens.len());
        Ok(Annotation::Markup(annotate_with(&tokens, &self.style)))
    }
}
