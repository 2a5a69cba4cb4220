mod mecab;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use ruby_core::dict::DictEntry;

pub use mecab::MecabSource;

/// A pluggable dictionary source that parses raw dictionary files into entries.
pub trait DictSource {
    /// Parse all dictionary files in `dir` and return a map of surface → entries.
    fn parse_dir(&self, dir: &Path) -> Result<HashMap<String, Vec<DictEntry>>, DictSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DictSourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

/// List files in `dir` whose names satisfy `predicate`, sorted by name.
///
/// Returns an error if no matching files are found, using `label` in the
/// message (e.g. `"*.csv"`).
pub(super) fn list_dict_files(
    dir: &Path,
    label: &str,
    predicate: impl Fn(&str) -> bool,
) -> Result<Vec<fs::DirEntry>, DictSourceError> {
    let mut files: Vec<fs::DirEntry> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| predicate(&entry.file_name().to_string_lossy()))
        .collect();
    files.sort_by_key(|e| e.file_name());

    if files.is_empty() {
        return Err(DictSourceError::Parse(format!(
            "no {label} files found in {}",
            dir.display()
        )));
    }
    Ok(files)
}

/// Create a `DictSource` by name. Returns `None` for unknown source names.
pub fn from_name(name: &str) -> Option<Box<dyn DictSource>> {
    match name {
        "mecab" | "ipadic" | "sudachi" => Some(Box::new(MecabSource)),
        _ => None,
    }
}

pub const SOURCE_NAMES: &str = "mecab, ipadic, sudachi";
