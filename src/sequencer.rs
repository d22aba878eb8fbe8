//! Round-name sequencer
//!
//! Proposes the name for the round after one that was just committed.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::EngineConfig;

static SERIES_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn series_pattern() -> Option<&'static Regex> {
    SERIES_PATTERN
        .get_or_init(|| Regex::new(r"^Series ([A-Z])$").ok())
        .as_ref()
}

/// Next round name using the default fallback ("New Round")
pub fn next_round_name(name: &str) -> String {
    next_round_name_with_config(name, &EngineConfig::default())
}

/// "Series A" through "Series Y" advance one letter, "Series Z" yields an
/// empty name, anything else yields the configured default round name.
pub fn next_round_name_with_config(name: &str, config: &EngineConfig) -> String {
    let letter = series_pattern()
        .and_then(|re| re.captures(name.trim()))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next());

    match letter {
        Some('Z') => String::new(),
        Some(c) => match char::from_u32(c as u32 + 1) {
            Some(next) => format!("Series {}", next),
            None => config.default_round_name.clone(),
        },
        None => config.default_round_name.clone(),
    }
}
