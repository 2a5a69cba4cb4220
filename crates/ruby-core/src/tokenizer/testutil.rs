use crate::dict::{DictEntry, SurfaceDictionary};

fn entries(list: &[(&str, i16, u16)]) -> Vec<DictEntry> {
    list.iter()
        .map(|&(reading, cost, id)| DictEntry {
            reading: reading.to_string(),
            cost,
            left_id: id,
            right_id: id,
        })
        .collect()
}

/// Small surface dictionary shared by tokenizer tests.
///
/// Context IDs: 1 = noun, 2 = particle, 3 = verb/adjective, 4 = auxiliary,
/// 5 = symbol.
pub(crate) fn test_dict() -> SurfaceDictionary {
    SurfaceDictionary::from_entries(vec![
        (
            "今日".to_string(),
            entries(&[("キョウ", 3000, 1), ("コンニチ", 4500, 1)]),
        ),
        ("今".to_string(), entries(&[("イマ", 4000, 1)])),
        ("日".to_string(), entries(&[("ニチ", 4800, 1), ("ヒ", 5000, 1)])),
        ("は".to_string(), entries(&[("ハ", 2000, 2)])),
        ("いい".to_string(), entries(&[("イイ", 3500, 3)])),
        ("天気".to_string(), entries(&[("テンキ", 4000, 1)])),
        ("天".to_string(), entries(&[("テン", 5000, 1)])),
        ("気".to_string(), entries(&[("キ", 5000, 1)])),
        ("です".to_string(), entries(&[("デス", 2500, 4)])),
        ("ね".to_string(), entries(&[("ネ", 2500, 2)])),
        ("で".to_string(), entries(&[("デ", 2200, 2)])),
        ("、".to_string(), entries(&[("", 1000, 5)])),
        ("私".to_string(), entries(&[("ワタシ", 3000, 1)])),
        ("食べる".to_string(), entries(&[("タベル", 3000, 3)])),
        ("年".to_string(), entries(&[("ネン", 3500, 1)])),
    ])
}
