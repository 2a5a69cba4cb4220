use tracing::{debug, debug_span};

use super::cost::CostFunction;
use super::lattice::Lattice;

/// Best accumulated cost at a node and the node it was reached from.
#[derive(Clone, Copy)]
struct Best {
    cost: i64,
    prev_idx: Option<usize>,
}

/// Run 1-best Viterbi over the lattice.
///
/// Returns the node indices of the cheapest BOS → EOS path in source order,
/// or an empty path for an empty lattice. Ties keep the first candidate seen,
/// so results are deterministic for a given dictionary.
pub(crate) fn viterbi_best(lattice: &Lattice, cost_fn: &dyn CostFunction) -> Vec<usize> {
    let char_count = lattice.char_count;
    let _span = debug_span!("viterbi_best", char_count).entered();
    if char_count == 0 {
        return Vec::new();
    }

    let mut best: Vec<Option<Best>> = vec![None; lattice.nodes.len()];

    // Initialize nodes starting at position 0 (BOS transition)
    for &idx in &lattice.nodes_by_start[0] {
        let node = &lattice.nodes[idx];
        best[idx] = Some(Best {
            cost: cost_fn.word_cost(node).saturating_add(cost_fn.bos_cost(node)),
            prev_idx: None,
        });
    }

    // Forward pass: word cost is computed once per next node.
    for pos in 1..char_count {
        for &next_idx in &lattice.nodes_by_start[pos] {
            let next_node = &lattice.nodes[next_idx];
            let word = cost_fn.word_cost(next_node);

            for &prev_idx in &lattice.nodes_by_end[pos] {
                let Some(prev) = best[prev_idx] else {
                    continue;
                };
                let prev_node = &lattice.nodes[prev_idx];
                let total = prev
                    .cost
                    .saturating_add(cost_fn.transition_cost(prev_node, next_node))
                    .saturating_add(word);
                if best[next_idx].map_or(true, |b| total < b.cost) {
                    best[next_idx] = Some(Best {
                        cost: total,
                        prev_idx: Some(prev_idx),
                    });
                }
            }
        }
    }

    // Pick the cheapest node reaching EOS
    let mut end: Option<(i64, usize)> = None;
    for &idx in &lattice.nodes_by_end[char_count] {
        let Some(b) = best[idx] else {
            continue;
        };
        let total = b.cost.saturating_add(cost_fn.eos_cost(&lattice.nodes[idx]));
        if end.map_or(true, |(cost, _)| total < cost) {
            end = Some((total, idx));
        }
    }

    let Some((total_cost, end_idx)) = end else {
        return Vec::new();
    };

    let mut path = Vec::new();
    let mut cur = Some(end_idx);
    while let Some(idx) = cur {
        path.push(idx);
        cur = best[idx].and_then(|b| b.prev_idx);
    }
    path.reverse();

    debug!(total_cost, segments = path.len());
    path
}
