//! Character-level Unicode classification for Japanese text.

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes the prolonged
/// sound mark ー and the middle dot ・, which have no hiragana counterpart.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// CJK Unified Ideographs and Extension A. Supplementary-plane extensions are
/// intentionally not treated as kanji for annotation purposes.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c) || ('\u{3400}'..='\u{4DBF}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// True if `s` contains at least one kanji.
pub fn contains_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

/// Katakana letters with a direct hiragana counterpart (ァ..ヶ).
const KATAKANA_LETTERS: std::ops::RangeInclusive<char> = '\u{30A1}'..='\u{30F6}';
const KANA_OFFSET: u32 = 0x60;

/// Convert a katakana string to hiragana.
/// Only ァ..ヶ are mapped; ー, ヷ..ヺ, ・ and everything else pass through.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if KATAKANA_LETTERS.contains(&c) {
                char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Coarse script class used to group runs of unknown characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Kanji,
    Hiragana,
    Katakana,
    Latin,
    Digit,
    Space,
    Other,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        if is_kanji(c) {
            CharClass::Kanji
        } else if is_hiragana(c) {
            CharClass::Hiragana
        } else if is_katakana(c) {
            CharClass::Katakana
        } else if is_latin(c)
            || ('\u{FF21}'..='\u{FF3A}').contains(&c)
            || ('\u{FF41}'..='\u{FF5A}').contains(&c)
        {
            CharClass::Latin
        } else if c.is_ascii_digit() || ('\u{FF10}'..='\u{FF19}').contains(&c) {
            CharClass::Digit
        } else if c.is_whitespace() {
            CharClass::Space
        } else {
            CharClass::Other
        }
    }

    /// Whether consecutive characters of this class form a single unknown word.
    pub fn groups(self) -> bool {
        matches!(
            self,
            CharClass::Katakana | CharClass::Latin | CharClass::Digit | CharClass::Space
        )
    }
}
