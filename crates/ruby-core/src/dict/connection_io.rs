use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;

use super::connection::{ConnectionMatrix, CostStorage, HEADER_SIZE, MAGIC, VERSION};
use super::DictError;

impl ConnectionMatrix {
    /// Build from a MeCab `matrix.def` text file.
    ///
    /// Line 1 is `rows cols`, then `prev_right next_left cost` per line.
    /// Pairs that never appear keep cost 0.
    pub fn from_text(text: &str) -> Result<Self, DictError> {
        let mut lines = text.lines();

        let header = lines
            .next()
            .ok_or_else(|| DictError::Parse("empty file".to_string()))?;
        let parts: Vec<&str> = header.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(DictError::Parse(format!(
                "expected 2 values in header, got {}",
                parts.len()
            )));
        }
        let rows: u16 = parts[0]
            .parse()
            .map_err(|e| DictError::Parse(format!("invalid rows: {e}")))?;
        let cols: u16 = parts[1]
            .parse()
            .map_err(|e| DictError::Parse(format!("invalid cols: {e}")))?;

        let mut costs = vec![0i16; rows as usize * cols as usize];
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                return Err(DictError::Parse(format!(
                    "expected 3 fields, got {}",
                    fields.len()
                )));
            }
            let prev_right: u16 = fields[0]
                .parse()
                .map_err(|e| DictError::Parse(format!("prev_right: {e}")))?;
            let next_left: u16 = fields[1]
                .parse()
                .map_err(|e| DictError::Parse(format!("next_left: {e}")))?;
            let cost: i16 = fields[2]
                .parse()
                .map_err(|e| DictError::Parse(format!("cost: {e}")))?;
            if prev_right >= rows || next_left >= cols {
                return Err(DictError::Parse(format!(
                    "index out of bounds: ({prev_right}, {next_left})"
                )));
            }
            costs[prev_right as usize * cols as usize + next_left as usize] = cost;
        }

        Ok(Self::new_owned(rows, cols, costs))
    }

    /// Validate a binary header and return `(rows, cols)`.
    fn validate_header(data: &[u8]) -> Result<(u16, u16), DictError> {
        if data.len() < 5 {
            return Err(DictError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }
        let rows = u16::from_le_bytes([data[5], data[6]]);
        let cols = u16::from_le_bytes([data[7], data[8]]);
        let expected_bytes = rows as usize * cols as usize * 2;
        let actual_bytes = data.len() - HEADER_SIZE;
        if actual_bytes != expected_bytes {
            return Err(DictError::Parse(format!(
                "expected {expected_bytes} bytes of cost data, got {actual_bytes}",
            )));
        }
        Ok((rows, cols))
    }

    /// Load from the compiled binary format using memory-mapped I/O.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap lives as long as this struct; the file must not be modified
        // while the matrix is in use.
        let mmap = unsafe { Mmap::map(&file)? };
        let (rows, cols) = Self::validate_header(&mmap)?;
        Ok(Self {
            rows,
            cols,
            storage: CostStorage::Mapped(mmap),
        })
    }

    /// Parse the compiled binary format into an owned representation.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        let (rows, cols) = Self::validate_header(data)?;
        let costs: Vec<i16> = data[HEADER_SIZE..]
            .chunks_exact(2)
            .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
            .collect();
        Ok(Self::new_owned(rows, cols, costs))
    }

    /// Serialize to the compiled binary format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let n = self.rows as usize * self.cols as usize;
        let mut buf = Vec::with_capacity(HEADER_SIZE + n * 2);
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&self.rows.to_le_bytes());
        buf.extend_from_slice(&self.cols.to_le_bytes());
        match &self.storage {
            CostStorage::Owned(costs) => {
                for &cost in costs {
                    buf.extend_from_slice(&cost.to_le_bytes());
                }
            }
            CostStorage::Mapped(mmap) => buf.extend_from_slice(&mmap[HEADER_SIZE..]),
        }
        buf
    }

    /// Save compiled binary to file.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes())?)
    }
}
