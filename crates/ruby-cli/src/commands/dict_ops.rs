use std::fs;
use std::path::Path;
use std::process;

use ruby_core::dict::{ConnectionMatrix, DictEntry, Dictionary, SurfaceDictionary};

use crate::dict_source;

fn file_size_mb(path: &str) -> f64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0) as f64 / 1_048_576.0
}

pub fn compile(source_name: &str, input_dir: &str, output_file: &str) {
    let dict_source = dict_source::from_name(source_name).unwrap_or_else(|| {
        eprintln!(
            "Error: unknown source '{source_name}' (available: {})",
            dict_source::SOURCE_NAMES
        );
        process::exit(1);
    });

    let input_path = Path::new(input_dir);
    if !input_path.is_dir() {
        eprintln!("Error: {input_dir} is not a directory");
        process::exit(1);
    }

    eprintln!("Source: {source_name}");
    let entries = die!(
        dict_source.parse_dir(input_path),
        "Error parsing dictionary: {}"
    );

    let surface_count = entries.len();
    let entry_count: usize = entries.values().map(|v| v.len()).sum();
    eprintln!("Building dictionary from {surface_count} surfaces ({entry_count} entries)...");

    let dict = SurfaceDictionary::from_entries(entries);
    die!(
        dict.save(Path::new(output_file)),
        "Error writing dictionary: {}"
    );
    eprintln!("Wrote {output_file} ({:.1} MB)", file_size_mb(output_file));
}

pub fn compile_conn(input_txt: &str, output_file: &str) {
    let text = die!(
        fs::read_to_string(input_txt),
        "Error reading {input_txt}: {}"
    );

    eprintln!("Parsing connection matrix from {input_txt}...");
    let matrix = die!(
        ConnectionMatrix::from_text(&text),
        "Error parsing connection matrix: {}"
    );
    eprintln!("  Matrix size: {}x{}", matrix.rows(), matrix.cols());

    die!(
        matrix.save(Path::new(output_file)),
        "Error writing {output_file}: {}"
    );
    eprintln!("Wrote {output_file} ({:.1} MB)", file_size_mb(output_file));
}

/// Show dictionary or connection matrix info, detected by magic bytes.
pub fn info(file: &str) {
    let magic = fs::read(file)
        .ok()
        .and_then(|b| b.get(..4).map(|s| s.to_vec()));

    match magic.as_deref() {
        Some(b"FGCX") => info_conn(file),
        Some(b"FGDX") => info_dict(file),
        Some(other) => {
            eprintln!(
                "Unknown file format (magic: {:?})",
                String::from_utf8_lossy(other)
            );
            process::exit(1);
        }
        None => {
            eprintln!("Error reading file: {file}");
            process::exit(1);
        }
    }
}

/// Surfaces whose every entry lacks a reading; these are never annotated.
pub fn reading_less_surfaces(dict: &SurfaceDictionary) -> usize {
    dict.iter()
        .filter(|(_, entries)| entries.iter().all(|e| e.reading.is_empty()))
        .count()
}

fn info_dict(dict_file: &str) {
    let dict = die!(
        SurfaceDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    let (surface_count, entry_count) = dict.stats();

    println!("Dictionary: {dict_file}");
    println!("File size:  {:.1} MB", file_size_mb(dict_file));
    println!("Surfaces:   {surface_count}");
    println!("Entries:    {entry_count}");
    println!("Longest:    {} chars", dict.max_surface_chars());
    println!("No reading: {} surfaces", reading_less_surfaces(&dict));

    let sample_keys = ["漢字", "日本", "東京", "食べる"];
    println!();
    println!("Sample lookups:");
    for key in &sample_keys {
        match dict.lookup(key) {
            Some(entries) => {
                let readings: Vec<&str> =
                    entries.iter().take(5).map(|e| e.reading.as_str()).collect();
                println!("  {key} → {}", readings.join(", "));
            }
            None => println!("  {key} → (not found)"),
        }
    }
}

fn info_conn(conn_file: &str) {
    let conn = die!(
        ConnectionMatrix::open(Path::new(conn_file)),
        "Error opening connection matrix: {}"
    );
    let (rows, cols) = (conn.rows(), conn.cols());

    println!("Connection matrix: {conn_file}");
    println!("File size:  {:.1} MB", file_size_mb(conn_file));
    println!(
        "Matrix:     {rows}x{cols} = {} entries",
        rows as u64 * cols as u64
    );
    println!("Mapped:     {}", conn.is_mapped());
}

fn print_entries(entries: &[DictEntry]) {
    for e in entries {
        println!(
            "  {}\tcost={}\tleft={}\tright={}",
            e.reading, e.cost, e.left_id, e.right_id
        );
    }
}

pub fn lookup(dict_file: &str, surface: &str) {
    let dict = die!(
        SurfaceDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    match dict.lookup(surface) {
        Some(entries) => {
            println!("{surface} ({} entries):", entries.len());
            print_entries(entries);
        }
        None => println!("{surface}: not found"),
    }
}

pub fn prefix(dict_file: &str, query: &str) {
    let dict = die!(
        SurfaceDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    let results = dict.common_prefix_search(query);
    if results.is_empty() {
        println!("{query}: no prefix matches");
        return;
    }
    for r in &results {
        println!("{} ({} entries):", r.surface, r.entries.len());
        print_entries(r.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(reading: &str) -> DictEntry {
        DictEntry {
            reading: reading.to_string(),
            cost: 1000,
            left_id: 1,
            right_id: 1,
        }
    }

    #[test]
    fn counts_surfaces_without_readings() {
        let dict = SurfaceDictionary::from_entries(vec![
            ("、".to_string(), vec![entry("")]),
            ("。".to_string(), vec![entry("")]),
            ("日".to_string(), vec![entry(""), entry("ヒ")]),
            ("私".to_string(), vec![entry("ワタシ")]),
        ]);
        assert_eq!(reading_less_surfaces(&dict), 2);
    }
}
