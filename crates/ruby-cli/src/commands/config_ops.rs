use std::fs;

pub fn settings_export() {
    print!("{}", ruby_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        ruby_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: cost.segment_penalty={}, cost.unknown_word_cost={}, markup.fallback={}…{}",
        s.cost.segment_penalty,
        s.cost.unknown_word_cost,
        s.markup.fallback_open,
        s.markup.fallback_close
    );
}

/// Install a custom settings file before any lookup of the global settings.
pub fn load_custom(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        ruby_core::settings::init_custom(content),
        "Error in {file}: {}"
    );
}
