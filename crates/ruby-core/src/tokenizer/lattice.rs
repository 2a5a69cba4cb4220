use tracing::{debug, debug_span};

use crate::dict::Dictionary;
use crate::settings::settings;
use crate::unicode::CharClass;

/// A node in the analysis lattice.
#[derive(Debug, Clone)]
pub struct LatticeNode {
    /// Start position (char index, inclusive)
    pub start: usize,
    /// End position (char index, exclusive)
    pub end: usize,
    /// Slice of the input covered by this node
    pub surface: String,
    /// Katakana reading; `None` for unknown words and reading-less entries
    pub reading: Option<String>,
    /// Word cost (lower = more preferred)
    pub cost: i16,
    /// Left context ID
    pub left_id: u16,
    /// Right context ID
    pub right_id: u16,
}

impl LatticeNode {
    pub fn is_unknown(&self) -> bool {
        self.reading.is_none() && self.left_id == 0 && self.right_id == 0
    }
}

/// The lattice: all candidate segmentations of an input string.
pub struct Lattice {
    /// The original input
    pub input: String,
    /// All nodes in the lattice
    pub nodes: Vec<LatticeNode>,
    /// nodes_by_end[i] = indices of nodes that end at position i
    pub nodes_by_end: Vec<Vec<usize>>,
    /// nodes_by_start[i] = indices of nodes that start at position i
    pub nodes_by_start: Vec<Vec<usize>>,
    /// Number of characters in input
    pub char_count: usize,
}

impl Lattice {
    fn push(&mut self, node: LatticeNode) {
        let idx = self.nodes.len();
        self.nodes_by_end[node.end].push(idx);
        self.nodes_by_start[node.start].push(idx);
        self.nodes.push(node);
    }
}

/// Build a lattice from raw text using dictionary lookups.
///
/// Each start position gets one node per dictionary surface that prefixes the
/// remaining text. Unknown-word nodes (no reading) are added for:
/// - a run of same-class characters (katakana, Latin, digits, spaces) starting
///   at a class boundary, capped at `cost.max_unknown_group` chars;
/// - a single character whenever no dictionary entry covers exactly that
///   character, which keeps every position reachable.
pub fn build_lattice(dict: &dyn Dictionary, text: &str) -> Lattice {
    let chars: Vec<char> = text.chars().collect();
    let char_count = chars.len();
    let _span = debug_span!("build_lattice", char_count).entered();
    let cost = &settings().cost;
    // byte_offsets[i] = byte index of char i; the extra slot is text.len().
    let byte_offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let slice = |start: usize, end: usize| &text[byte_offsets[start]..byte_offsets[end]];

    let mut lattice = Lattice {
        input: text.to_string(),
        nodes: Vec::new(),
        nodes_by_end: vec![Vec::new(); char_count + 1],
        nodes_by_start: vec![Vec::new(); char_count],
        char_count,
    };

    for start in 0..char_count {
        let mut has_single_char_match = false;

        for result in dict.common_prefix_search(&text[byte_offsets[start]..]) {
            let len = result.surface.chars().count();
            for entry in result.entries {
                lattice.push(LatticeNode {
                    start,
                    end: start + len,
                    surface: result.surface.clone(),
                    reading: Some(entry.reading.clone()).filter(|r| !r.is_empty()),
                    cost: entry.cost,
                    left_id: entry.left_id,
                    right_id: entry.right_id,
                });
            }
            if len == 1 && !result.entries.is_empty() {
                has_single_char_match = true;
            }
        }

        let class = CharClass::of(chars[start]);
        let run_start = start == 0 || CharClass::of(chars[start - 1]) != class;
        if class.groups() && run_start {
            let grouped_len = chars[start..]
                .iter()
                .take(cost.max_unknown_group)
                .take_while(|&&c| CharClass::of(c) == class)
                .count();
            if grouped_len > 1 {
                lattice.push(unknown_node(
                    slice(start, start + grouped_len),
                    start,
                    grouped_len,
                ));
            }
        }

        if !has_single_char_match {
            lattice.push(unknown_node(slice(start, start + 1), start, 1));
        }
    }

    debug!(node_count = lattice.nodes.len());
    lattice
}

fn unknown_node(surface: &str, start: usize, len: usize) -> LatticeNode {
    LatticeNode {
        start,
        end: start + len,
        surface: surface.to_string(),
        reading: None,
        cost: settings().cost.unknown_word_cost,
        left_id: 0,
        right_id: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::testutil::test_dict;

    #[test]
    fn test_build_lattice_basic() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "今日は");

        assert_eq!(lattice.char_count, 3);
        let kyou: Vec<_> = lattice
            .nodes
            .iter()
            .filter(|n| n.surface == "今日")
            .collect();
        assert_eq!(kyou.len(), 2);
        assert!(kyou.iter().any(|n| n.reading.as_deref() == Some("キョウ")));
        assert!(kyou.iter().any(|n| n.reading.as_deref() == Some("コンニチ")));
    }

    #[test]
    fn test_unknown_word_fallback() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "鬱");

        assert_eq!(lattice.nodes.len(), 1);
        let unknown = &lattice.nodes[0];
        assert_eq!(unknown.surface, "鬱");
        assert_eq!(unknown.reading, None);
        assert_eq!(unknown.cost, 10000);
        assert!(unknown.is_unknown());
    }

    #[test]
    fn test_latin_run_is_grouped() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "Hello");

        let grouped: Vec<_> = lattice.nodes.iter().filter(|n| n.end - n.start > 1).collect();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].surface, "Hello");
        // Mid-run positions only get single-char fallbacks.
        assert_eq!(lattice.nodes_by_start[1].len(), 1);
    }

    #[test]
    fn test_lattice_connectivity() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "今日はいい天気ですね、Rustで2024年");

        for pos in 1..=lattice.char_count {
            assert!(
                !lattice.nodes_by_end[pos].is_empty(),
                "no nodes end at position {pos}"
            );
        }
    }

    #[test]
    fn test_nodes_by_start_end_consistency() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "今日はいい天気");

        for (idx, node) in lattice.nodes.iter().enumerate() {
            assert!(lattice.nodes_by_start[node.start].contains(&idx));
            assert!(lattice.nodes_by_end[node.end].contains(&idx));
            let expected: String = lattice
                .input
                .chars()
                .skip(node.start)
                .take(node.end - node.start)
                .collect();
            assert_eq!(node.surface, expected, "node {idx} surface mismatch");
        }
    }

    #[test]
    fn test_empty_input() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "");
        assert_eq!(lattice.char_count, 0);
        assert!(lattice.nodes.is_empty());
        assert_eq!(lattice.nodes_by_end.len(), 1);
    }
}
