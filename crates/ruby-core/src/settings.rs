//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        // init_custom validated the custom text; the default is checked by build.rs.
        parse_settings_toml(toml_str).unwrap_or_else(|_| Settings::fallback())
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub cost: CostSettings,
    pub markup: MarkupSettings,
}

impl Settings {
    fn fallback() -> Self {
        Self {
            cost: CostSettings {
                segment_penalty: 200,
                unknown_word_cost: 10000,
                max_unknown_group: 32,
            },
            markup: MarkupSettings {
                fallback_open: "(".to_string(),
                fallback_close: ")".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostSettings {
    pub segment_penalty: i64,
    pub unknown_word_cost: i16,
    pub max_unknown_group: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkupSettings {
    pub fallback_open: String,
    pub fallback_close: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if s.$section.$field < 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        };
    }
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    macro_rules! check_at_most {
        ($section:ident . $field:ident, $max:expr) => {
            if s.$section.$field > $max {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: format!("must be at most {}", $max),
                });
            }
        };
    }

    check_non_negative!(cost.segment_penalty);
    check_at_most!(cost.segment_penalty, i64::from(i16::MAX));
    check_non_negative!(cost.unknown_word_cost);
    check_positive_usize!(cost.max_unknown_group);

    for (field, value) in [
        ("markup.fallback_open", &s.markup.fallback_open),
        ("markup.fallback_close", &s.markup.fallback_close),
    ] {
        if value.is_empty() {
            return Err(SettingsError::InvalidValue {
                field: field.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if value.contains(['<', '>']) {
            return Err(SettingsError::InvalidValue {
                field: field.to_string(),
                reason: "must not contain '<' or '>'".to_string(),
            });
        }
    }

    Ok(())
}
