//! Furigana core: Japanese tokenization and ruby annotation.

pub mod annotate;
pub mod dict;
pub mod settings;
pub mod token;
pub mod tokenizer;
pub mod unicode;

pub use annotate::{annotate, annotate_with, MarkupStyle, Segment};
pub use token::{Token, Tokenizer};
pub use unicode::{contains_kanji, katakana_to_hiragana};
