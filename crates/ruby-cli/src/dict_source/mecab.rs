use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ruby_core::dict::DictEntry;

use super::{list_dict_files, DictSource, DictSourceError};

/// Lexicon CSV in the MeCab/IPADIC layout (Sudachi uses the same leading
/// columns): surface, left_id, right_id, cost, POS fields, then the katakana
/// reading in column 11. Files must be UTF-8.
pub struct MecabSource;

const READING_COLUMN: usize = 11;

impl MecabSource {
    /// Parse one CSV line into `(surface, entry)`. Returns `None` for lines
    /// that should be skipped.
    pub fn parse_line(line: &str) -> Option<(String, DictEntry)> {
        let fields: Vec<&str> = line.split(',').collect();
        let surface = fields.first()?.trim();
        if surface.is_empty() {
            return None;
        }
        let left_id: u16 = fields.get(1)?.trim().parse().ok()?;
        let right_id: u16 = fields.get(2)?.trim().parse().ok()?;
        let cost: i16 = fields.get(3)?.trim().parse().ok()?;
        let reading = fields.get(READING_COLUMN)?.trim();
        if reading.is_empty() || reading == "*" {
            return None;
        }
        Some((
            surface.to_string(),
            DictEntry {
                reading: reading.to_string(),
                cost,
                left_id,
                right_id,
            },
        ))
    }
}

impl DictSource for MecabSource {
    fn parse_dir(&self, dir: &Path) -> Result<HashMap<String, Vec<DictEntry>>, DictSourceError> {
        let files = list_dict_files(dir, "*.csv", |name| name.ends_with(".csv"))?;
        let mut entries: HashMap<String, Vec<DictEntry>> = HashMap::new();
        let mut total_lines = 0u64;
        let mut skipped = 0u64;

        for file_entry in &files {
            let path = file_entry.path();
            eprintln!("Reading {}...", path.display());
            let content = fs::read_to_string(&path)?;

            for line in content.lines() {
                total_lines += 1;
                if line.is_empty() || line.starts_with('#') {
                    skipped += 1;
                    continue;
                }
                let Some((surface, entry)) = Self::parse_line(line) else {
                    skipped += 1;
                    continue;
                };
                entries.entry(surface).or_default().push(entry);
            }
        }

        eprintln!("  (skipped {skipped} of {total_lines} lines)");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPADIC_LINE: &str = "食べる,31,31,7014,動詞,自立,*,*,一段,基本形,食べる,タベル,タベル";

    #[test]
    fn parse_ipadic_line() {
        let (surface, entry) = MecabSource::parse_line(IPADIC_LINE).unwrap();
        assert_eq!(surface, "食べる");
        assert_eq!(
            entry,
            DictEntry {
                reading: "タベル".to_string(),
                cost: 7014,
                left_id: 31,
                right_id: 31,
            }
        );
    }

    #[test]
    fn skip_missing_reading() {
        assert!(MecabSource::parse_line("ＡＢＣ,1,1,100,名詞,一般,*,*,*,*,*,*,*").is_none());
        assert!(MecabSource::parse_line("短い,1,1,100").is_none());
        assert!(MecabSource::parse_line("数,x,1,100,名詞,一般,*,*,*,*,数,カズ,カズ").is_none());
    }

    #[test]
    fn parse_dir_merges_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Noun.csv"),
            "今日,1,1,3000,名詞,副詞可能,*,*,*,*,今日,キョウ,キョー\n\
             今日,1,1,4500,名詞,副詞可能,*,*,*,*,今日,コンニチ,コンニチ\n\
             # comment\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Verb.csv"),
            format!("{IPADIC_LINE}\n"),
        )
        .unwrap();
        fs::write(dir.path().join("README"), "not a lexicon").unwrap();

        let entries = MecabSource.parse_dir(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["今日"].len(), 2);
        assert_eq!(entries["食べる"][0].reading, "タベル");
    }

    #[test]
    fn parse_dir_without_csv_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            MecabSource.parse_dir(dir.path()),
            Err(DictSourceError::Parse(_))
        ));
    }
}
