use std::path::PathBuf;

use furigana_engine::{Annotation, FuriganaEngine};
use ruby_core::annotate::{segment, Segment};
use ruby_core::Token;
use unicode_width::UnicodeWidthStr;

fn engine(dict_file: &str, conn_file: Option<&str>) -> FuriganaEngine {
    FuriganaEngine::from_files(dict_file, conn_file.map(PathBuf::from))
}

pub fn annotate_cmd(dict_file: &str, conn_file: Option<&str>, text: &str) {
    let engine = engine(dict_file, conn_file);
    match die!(engine.annotate_text(text), "Error: {}") {
        Annotation::Markup(markup) => println!("{markup}"),
        Annotation::NoKanji => {
            eprintln!("(no kanji in selection)");
            println!("{}", ruby_core::annotate::escape(text));
        }
    }
}

pub fn tokenize_cmd(dict_file: &str, conn_file: Option<&str>, text: &str, json: bool) {
    let engine = engine(dict_file, conn_file);
    let tokens = die!(engine.tokenize(text), "Error: {}");
    if json {
        let out = die!(serde_json::to_string_pretty(&tokens), "Error: {}");
        println!("{out}");
    } else {
        print!("{}", format_token_table(&tokens));
    }
}

/// One row per token: surface padded to a common display width, the
/// reading (or `-`), and the hiragana shown as furigana, if any.
pub fn format_token_table(tokens: &[Token]) -> String {
    let width = tokens
        .iter()
        .map(|t| UnicodeWidthStr::width(t.surface.as_str()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for token in tokens {
        let pad = width - UnicodeWidthStr::width(token.surface.as_str());
        let furigana = match segment(token) {
            Segment::Ruby { reading, .. } => reading,
            Segment::Plain(_) => String::new(),
        };
        out.push_str(&token.surface);
        out.push_str(&" ".repeat(pad));
        out.push_str("  ");
        out.push_str(token.reading().unwrap_or("-"));
        if !furigana.is_empty() {
            out.push_str("  ");
            out.push_str(&furigana);
        }
        out.push('\n');
    }
    out
}
