//! Furigana for selected Japanese text.
//!
//! [`FuriganaEngine`] owns a lazily loaded tokenizer (loaded at most once at a
//! time, shared by every caller) and turns selections into ruby markup.
//! [`AnnotationWorker`] serves typed [`Request`]s on a background thread and
//! keeps the enabled flag in a [`PrefsStore`].

mod engine;
mod error;
pub mod loader;
pub mod messages;
pub mod prefs;
mod trace_init;
mod worker;

pub use engine::{Annotation, FuriganaEngine};
pub use error::EngineError;
pub use loader::{
    DictionaryFiles, LoadError, LoadState, SharedTokenizer, TokenizerCell, TokenizerSource,
};
pub use messages::{Request, Response, SkipReason};
pub use prefs::{Preferences, PrefsStore};
pub use trace_init::init_tracing;
pub use worker::AnnotationWorker;

pub use ruby_core::{annotate, contains_kanji, katakana_to_hiragana, Token, Tokenizer};
