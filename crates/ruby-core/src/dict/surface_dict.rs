use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use super::{DictEntry, DictError, Dictionary, SearchResult};

const MAGIC: &[u8; 4] = b"FGDX";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 4 + 1 + 4; // magic + version + crc32 of payload

/// Surface-keyed dictionary for morphological analysis.
///
/// Keys are kept sorted by bytes so exact lookups are a binary search, and a
/// common-prefix search probes each char boundary of the query up to the
/// longest key.
pub struct SurfaceDictionary {
    keys: Vec<String>,
    values: Vec<Vec<DictEntry>>,
    max_key_chars: usize,
}

impl SurfaceDictionary {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Vec<DictEntry>)>) -> Self {
        let mut pairs: Vec<(String, Vec<DictEntry>)> = entries
            .into_iter()
            .filter(|(surface, _)| !surface.is_empty())
            .collect();
        pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        pairs.dedup_by(|later, earlier| {
            if later.0 == earlier.0 {
                earlier.1.append(&mut later.1);
                true
            } else {
                false
            }
        });
        for (_, candidates) in &mut pairs {
            candidates.sort_by_key(|e| e.cost);
        }
        Self::from_sorted(pairs)
    }

    fn from_sorted(pairs: Vec<(String, Vec<DictEntry>)>) -> Self {
        let max_key_chars = pairs
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0);
        let (keys, values) = pairs.into_iter().unzip();
        Self {
            keys,
            values,
            max_key_chars,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let pairs: Vec<(&String, &Vec<DictEntry>)> = self.keys.iter().zip(&self.values).collect();
        let payload = bincode::serialize(&pairs).map_err(DictError::Serialize)?;
        let crc = crc32fast::hash(&payload);

        let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&crc.to_le_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
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

        let expected = u32::from_le_bytes([data[5], data[6], data[7], data[8]]);
        let payload = &data[HEADER_SIZE..];
        let actual = crc32fast::hash(payload);
        if expected != actual {
            return Err(DictError::ChecksumMismatch { expected, actual });
        }

        let pairs: Vec<(String, Vec<DictEntry>)> =
            bincode::deserialize(payload).map_err(DictError::Deserialize)?;
        if pairs
            .windows(2)
            .any(|w| w[0].0.as_bytes() >= w[1].0.as_bytes())
        {
            return Err(DictError::Parse("surface keys are not sorted".to_string()));
        }
        Ok(Self::from_sorted(pairs))
    }

    /// Open a dictionary file, using mmap to avoid doubling peak memory.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap is dropped after deserialization completes below.
        let mmap = unsafe { Mmap::map(&file)? };
        let dict = Self::from_bytes(&mmap)?;
        debug!(path = %path.display(), surfaces = dict.keys.len(), "dictionary opened");
        Ok(dict)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Iterate over all `(surface, entries)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DictEntry])> {
        self.keys
            .iter()
            .zip(&self.values)
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns (surface_count, entry_count).
    pub fn stats(&self) -> (usize, usize) {
        let entries: usize = self.values.iter().map(|v| v.len()).sum();
        (self.keys.len(), entries)
    }

    /// Length in chars of the longest surface.
    pub fn max_surface_chars(&self) -> usize {
        self.max_key_chars
    }

    fn find(&self, surface: &str) -> Option<usize> {
        self.keys
            .binary_search_by(|k| k.as_bytes().cmp(surface.as_bytes()))
            .ok()
    }
}

impl Dictionary for SurfaceDictionary {
    fn lookup(&self, surface: &str) -> Option<&[DictEntry]> {
        self.find(surface).map(|i| self.values[i].as_slice())
    }

    fn common_prefix_search(&self, query: &str) -> Vec<SearchResult<'_>> {
        query
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .chain(std::iter::once(query.len()))
            .take(self.max_key_chars)
            .filter(|&end| end > 0)
            .filter_map(|end| {
                let prefix = &query[..end];
                self.find(prefix).map(|i| SearchResult {
                    surface: prefix.to_string(),
                    entries: self.values[i].as_slice(),
                })
            })
            .collect()
    }
}
