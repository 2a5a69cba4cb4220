use proptest::prelude::*;

use super::testutil::test_dict;
use super::{analyze, LatticeTokenizer};
use crate::annotate::{annotate_with, MarkupStyle};
use crate::dict::ConnectionMatrix;
use crate::token::{surface_text, Token, Tokenizer};

fn pairs(tokens: &[Token]) -> Vec<(&str, Option<&str>)> {
    tokens
        .iter()
        .map(|t| (t.surface.as_str(), t.reading.as_deref()))
        .collect()
}

#[test]
fn test_analyze_sentence() {
    let dict = test_dict();
    let tokens = analyze(&dict, None, "今日はいい天気");
    assert_eq!(
        pairs(&tokens),
        vec![
            ("今日", Some("キョウ")),
            ("は", Some("ハ")),
            ("いい", Some("イイ")),
            ("天気", Some("テンキ")),
        ]
    );
}

#[test]
fn test_analyze_empty() {
    let dict = test_dict();
    assert!(analyze(&dict, None, "").is_empty());
}

#[test]
fn test_unknown_runs_have_no_reading() {
    let dict = test_dict();
    let tokens = analyze(&dict, None, "私はRustで2024年");
    assert_eq!(
        pairs(&tokens),
        vec![
            ("私", Some("ワタシ")),
            ("は", Some("ハ")),
            ("Rust", None),
            ("で", Some("デ")),
            ("2024", None),
            ("年", Some("ネン")),
        ]
    );
}

#[test]
fn test_symbol_entry_without_reading() {
    let dict = test_dict();
    let tokens = analyze(&dict, None, "今日、");
    assert_eq!(pairs(&tokens), vec![("今日", Some("キョウ")), ("、", None)]);
}

#[test]
fn test_connection_cost_changes_best_path() {
    let dict = test_dict();
    assert_eq!(analyze(&dict, None, "天気").len(), 1);

    // A strong noun → noun bonus makes 天 + 気 cheaper than 天気.
    let conn = ConnectionMatrix::from_text("6 6\n1 1 -8000\n").unwrap();
    let tokens = analyze(&dict, Some(&conn), "天気");
    assert_eq!(pairs(&tokens), vec![("天", Some("テン")), ("気", Some("キ"))]);
}

#[test]
fn test_lattice_tokenizer_open() {
    let dir = tempfile::tempdir().unwrap();
    let dict_path = dir.path().join("test.dict");
    let conn_path = dir.path().join("test.conn");
    test_dict().save(&dict_path).unwrap();
    ConnectionMatrix::from_text("6 6\n0 1 -50\n")
        .unwrap()
        .save(&conn_path)
        .unwrap();

    let tokenizer = LatticeTokenizer::open(&dict_path, Some(&conn_path)).unwrap();
    assert!(tokenizer.connection().is_some());
    assert_eq!(tokenizer.dictionary().stats(), test_dict().stats());
    let tokens = tokenizer.tokenize("私は");
    assert_eq!(pairs(&tokens), vec![("私", Some("ワタシ")), ("は", Some("ハ"))]);
}

#[test]
fn test_lattice_tokenizer_open_missing_dict() {
    let dir = tempfile::tempdir().unwrap();
    assert!(LatticeTokenizer::open(&dir.path().join("missing.dict"), None).is_err());
}

#[test]
fn test_tokenize_then_annotate() {
    let tokenizer = LatticeTokenizer::new(test_dict(), None);
    let tokens = tokenizer.tokenize("私は食べる");
    let markup = annotate_with(&tokens, &MarkupStyle::default());
    assert_eq!(
        markup,
        "<ruby>私<rp>(</rp><rt>わたし</rt><rp>)</rp></ruby>は\
         <ruby>食べる<rp>(</rp><rt>たべる</rt><rp>)</rp></ruby>"
    );
}

proptest! {
    #[test]
    fn surfaces_reconstruct_input(text in "[今日は天気いい私食べるですねでHello 、。ア-ン0-9a-z鬱]{0,24}") {
        let tokenizer = LatticeTokenizer::new(test_dict(), None);
        let tokens = tokenizer.tokenize(&text);
        prop_assert_eq!(surface_text(&tokens), text.clone());
        prop_assert!(tokens.iter().all(|t| !t.surface.is_empty()));
    }

    #[test]
    fn arbitrary_text_reconstructs(text in "\\PC{0,24}") {
        let dict = test_dict();
        let tokens = analyze(&dict, None, &text);
        prop_assert_eq!(surface_text(&tokens), text);
    }
}
