use memmap2::Mmap;

pub(super) const MAGIC: &[u8; 4] = b"FGCX";
pub(super) const VERSION: u8 = 1;
/// Fixed header size: magic(4) + version(1) + rows(2) + cols(2).
pub(super) const HEADER_SIZE: usize = 4 + 1 + 2 + 2;

/// Backing storage for cost data: either owned or memory-mapped.
pub(super) enum CostStorage {
    Owned(Vec<i16>),
    Mapped(Mmap),
}

/// A connection cost matrix mapping (prev right_id, next left_id) → cost.
/// Used by the Viterbi search to score morpheme transitions.
pub struct ConnectionMatrix {
    pub(super) rows: u16,
    pub(super) cols: u16,
    pub(super) storage: CostStorage,
}

impl ConnectionMatrix {
    /// Create an owned matrix. `costs` is row-major: `prev_right * cols + next_left`.
    pub fn new_owned(rows: u16, cols: u16, mut costs: Vec<i16>) -> Self {
        costs.resize(rows as usize * cols as usize, 0);
        Self {
            rows,
            cols,
            storage: CostStorage::Owned(costs),
        }
    }

    /// Look up the connection cost between two morphemes.
    /// Out-of-range IDs return 0.
    pub fn cost(&self, prev_right: u16, next_left: u16) -> i16 {
        if prev_right >= self.rows || next_left >= self.cols {
            return 0;
        }
        let idx = prev_right as usize * self.cols as usize + next_left as usize;
        match &self.storage {
            CostStorage::Owned(costs) => costs.get(idx).copied().unwrap_or(0),
            CostStorage::Mapped(mmap) => {
                let byte_offset = HEADER_SIZE + idx * 2;
                mmap.get(byte_offset..byte_offset + 2)
                    .map(|b| i16::from_le_bytes([b[0], b[1]]))
                    .unwrap_or(0)
            }
        }
    }

    /// Number of right-context IDs (rows).
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of left-context IDs (columns).
    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self.storage, CostStorage::Mapped(_))
    }
}
