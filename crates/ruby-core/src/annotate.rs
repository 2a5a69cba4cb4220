//! Furigana annotation: turn analyzed tokens into ruby markup.
//!
//! Each token is decided on its own and emitted in input order:
//!
//! 1. no kanji in the surface → plain text
//! 2. no reading → plain text
//! 3. hiragana-normalized reading equal to the surface → plain text
//! 4. otherwise → `<ruby>surface<rp>(</rp><rt>reading</rt><rp>)</rp></ruby>`
//!
//! Only the reading is normalized before the comparison in step 3; the
//! surface is compared as written. All text is escaped, so the output is
//! safe to insert into a document.

use crate::settings::settings;
use crate::token::Token;
use crate::unicode::{contains_kanji, katakana_to_hiragana};

/// The annotation decision for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Emitted verbatim (escaped), without a reading.
    Plain(&'a str),
    /// Base text carrying a hiragana reading.
    Ruby { base: &'a str, reading: String },
}

impl Segment<'_> {
    pub fn is_ruby(&self) -> bool {
        matches!(self, Segment::Ruby { .. })
    }

    /// Append this segment's markup to `out`.
    pub fn render_into(&self, out: &mut String, style: &MarkupStyle) {
        match self {
            Segment::Plain(text) => escape_into(out, text),
            Segment::Ruby { base, reading } => {
                out.push_str("<ruby>");
                escape_into(out, base);
                out.push_str("<rp>");
                escape_into(out, &style.fallback_open);
                out.push_str("</rp><rt>");
                escape_into(out, reading);
                out.push_str("</rt><rp>");
                escape_into(out, &style.fallback_close);
                out.push_str("</rp></ruby>");
            }
        }
    }
}

/// Parentheses shown around the reading when ruby is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupStyle {
    pub fallback_open: String,
    pub fallback_close: String,
}

impl Default for MarkupStyle {
    fn default() -> Self {
        Self {
            fallback_open: "(".to_string(),
            fallback_close: ")".to_string(),
        }
    }
}

impl MarkupStyle {
    /// Style taken from the global settings.
    pub fn from_settings() -> Self {
        let markup = &settings().markup;
        Self {
            fallback_open: markup.fallback_open.clone(),
            fallback_close: markup.fallback_close.clone(),
        }
    }
}

/// Decide how a single token is annotated.
pub fn segment(token: &Token) -> Segment<'_> {
    let surface = token.surface.as_str();
    if !contains_kanji(surface) {
        return Segment::Plain(surface);
    }
    let Some(reading) = token.reading() else {
        return Segment::Plain(surface);
    };
    let reading = katakana_to_hiragana(reading);
    if reading == surface {
        return Segment::Plain(surface);
    }
    Segment::Ruby {
        base: surface,
        reading,
    }
}

/// Annotation decisions for a whole token sequence, in order.
pub fn segments(tokens: &[Token]) -> Vec<Segment<'_>> {
    tokens.iter().map(segment).collect()
}

/// Render tokens as ruby markup using the configured fallback style.
pub fn annotate(tokens: &[Token]) -> String {
    annotate_with(tokens, &MarkupStyle::from_settings())
}

/// Render tokens as ruby markup with an explicit style.
pub fn annotate_with(tokens: &[Token], style: &MarkupStyle) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.surface.len() * 2).sum());
    for token in tokens {
        segment(token).render_into(&mut out, style);
    }
    out
}

/// Escape text for use as element content or a quoted attribute value.
pub fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::surface_text;
    use proptest::prelude::*;

    fn render(tokens: &[Token]) -> String {
        annotate_with(tokens, &MarkupStyle::default())
    }

    #[test]
    fn verb_gets_hiragana_reading() {
        let tokens = vec![Token::with_reading("食べる", "タベル")];
        let out = render(&tokens);
        assert_eq!(
            out,
            "<ruby>食べる<rp>(</rp><rt>たべる</rt><rp>)</rp></ruby>"
        );
        assert_eq!(out.matches("<ruby>").count(), 1);
    }

    #[test]
    fn kana_particle_stays_plain() {
        let tokens = vec![
            Token::with_reading("私", "ワタシ"),
            Token::with_reading("は", "ハ"),
        ];
        assert_eq!(
            render(&tokens),
            "<ruby>私<rp>(</rp><rt>わたし</rt><rp>)</rp></ruby>は"
        );
    }

    #[test]
    fn unknown_latin_passes_through() {
        let tokens = vec![Token::bare("Hello")];
        assert_eq!(render(&tokens), "Hello");
    }

    #[test]
    fn markup_in_surface_is_escaped() {
        let tokens = vec![Token::bare("<script>")];
        let out = render(&tokens);
        assert_eq!(out, "&lt;script&gt;");
        assert!(!out.contains('<'));
    }

    #[test]
    fn kanji_surface_and_reading_are_escaped() {
        let tokens = vec![Token::with_reading("漢<&>", "カン\"'")];
        assert_eq!(
            render(&tokens),
            "<ruby>漢&lt;&amp;&gt;<rp>(</rp><rt>かん&quot;&#39;</rt><rp>)</rp></ruby>"
        );
    }

    #[test]
    fn empty_sequence_renders_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn empty_surface_emits_nothing() {
        let tokens = vec![Token::bare(""), Token::with_reading("", "ア")];
        assert_eq!(render(&tokens), "");
    }

    #[test]
    fn kanji_without_reading_stays_plain() {
        assert_eq!(segment(&Token::bare("漢")), Segment::Plain("漢"));
        assert_eq!(
            segment(&Token::with_reading("漢", "")),
            Segment::Plain("漢")
        );
    }

    #[test]
    fn reading_equal_to_surface_stays_plain() {
        assert_eq!(
            segment(&Token::with_reading("一", "一")),
            Segment::Plain("一")
        );
        assert_eq!(
            segment(&Token::with_reading("一つ", "一ツ")),
            Segment::Plain("一つ")
        );
    }

    #[test]
    fn katakana_surface_is_not_normalized() {
        // No kanji, so step 1 short-circuits before any comparison.
        assert_eq!(
            segment(&Token::with_reading("タベル", "たべる")),
            Segment::Plain("タベル")
        );
    }

    #[test]
    fn hiragana_reading_is_accepted() {
        assert_eq!(
            segment(&Token::with_reading("今日", "きょう")),
            Segment::Ruby {
                base: "今日",
                reading: "きょう".to_string()
            }
        );
    }

    #[test]
    fn order_is_preserved() {
        let tokens = vec![
            Token::with_reading("今日", "キョウ"),
            Token::with_reading("は", "ハ"),
            Token::bare(" "),
            Token::with_reading("天気", "テンキ"),
        ];
        let segs = segments(&tokens);
        assert_eq!(segs.len(), 4);
        assert!(segs[0].is_ruby());
        assert_eq!(segs[1], Segment::Plain("は"));
        assert_eq!(segs[2], Segment::Plain(" "));
        assert!(segs[3].is_ruby());
        let out = render(&tokens);
        let first = out.find("今日").unwrap();
        let second = out.find("天気").unwrap();
        assert!(first < second);
    }

    #[test]
    fn custom_fallback_style() {
        let style = MarkupStyle {
            fallback_open: "（".to_string(),
            fallback_close: "）".to_string(),
        };
        let out = annotate_with(&[Token::with_reading("山", "ヤマ")], &style);
        assert_eq!(out, "<ruby>山<rp>（</rp><rt>やま</rt><rp>）</rp></ruby>");
    }

    #[test]
    fn default_settings_style_matches_default() {
        assert_eq!(MarkupStyle::from_settings(), MarkupStyle::default());
        let tokens = vec![Token::with_reading("山", "ヤマ")];
        assert_eq!(annotate(&tokens), render(&tokens));
    }

    #[test]
    fn escape_plain_text() {
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("日本語"), "日本語");
    }

    fn token() -> impl Strategy<Value = Token> {
        (
            r#"[漢字今日食はかなカナa<&>"' ]{0,4}"#,
            prop::option::of("[ァ-ヶーa<&]{0,4}"),
        )
            .prop_map(|(surface, reading)| Token::new(surface, reading))
    }

    fn kana_token() -> impl Strategy<Value = Token> {
        (
            r#"[はかなカナa<&>"' ]{0,4}"#,
            prop::option::of("[ァ-ヶ]{0,4}"),
        )
            .prop_map(|(surface, reading)| Token::new(surface, reading))
    }

    proptest! {
        #[test]
        fn annotation_is_local_and_ordered(tokens in prop::collection::vec(token(), 0..12)) {
            let whole = render(&tokens);
            let pieces: String = tokens
                .iter()
                .map(|t| render(std::slice::from_ref(t)))
                .collect();
            prop_assert_eq!(whole, pieces);
        }

        #[test]
        fn kanji_free_tokens_render_as_escaped_text(tokens in prop::collection::vec(kana_token(), 0..12)) {
            prop_assert_eq!(render(&tokens), escape(&surface_text(&tokens)));
        }
    }
}
