use crate::dict::ConnectionMatrix;
use crate::settings::settings;

use super::lattice::LatticeNode;

/// Trait for scoring lattice paths during Viterbi search.
pub(crate) trait CostFunction: Send + Sync {
    fn word_cost(&self, node: &LatticeNode) -> i64;
    fn transition_cost(&self, prev: &LatticeNode, next: &LatticeNode) -> i64;
    fn bos_cost(&self, node: &LatticeNode) -> i64;
    fn eos_cost(&self, node: &LatticeNode) -> i64;
}

/// Look up connection cost between two IDs, returning 0 if no matrix is provided.
pub fn conn_cost(conn: Option<&ConnectionMatrix>, prev_right: u16, next_left: u16) -> i64 {
    conn.map(|c| c.cost(prev_right, next_left) as i64)
        .unwrap_or(0)
}

/// Default cost function using word costs and optional connection matrix.
/// BOS and EOS use context ID 0, as in MeCab dictionaries.
pub(crate) struct DefaultCostFunction<'a> {
    conn: Option<&'a ConnectionMatrix>,
    segment_penalty: i64,
}

impl<'a> DefaultCostFunction<'a> {
    pub fn new(conn: Option<&'a ConnectionMatrix>) -> Self {
        Self {
            conn,
            segment_penalty: settings().cost.segment_penalty,
        }
    }
}

impl CostFunction for DefaultCostFunction<'_> {
    fn word_cost(&self, node: &LatticeNode) -> i64 {
        (node.cost as i64).saturating_add(self.segment_penalty)
    }

    fn transition_cost(&self, prev: &LatticeNode, next: &LatticeNode) -> i64 {
        conn_cost(self.conn, prev.right_id, next.left_id)
    }

    fn bos_cost(&self, node: &LatticeNode) -> i64 {
        conn_cost(self.conn, 0, node.left_id)
    }

    fn eos_cost(&self, node: &LatticeNode) -> i64 {
        conn_cost(self.conn, node.right_id, 0)
    }
}
