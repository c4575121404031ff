use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::model::config::{ReviewIntervals, SliceConfig};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid review interval {0:?}: expected PRIORITY:DAYS, e.g. A:1,_:30")]
    InvalidInterval(String),
    #[error("invalid value {value:?} for {var}: expected a boolean")]
    InvalidBool { var: String, value: String },
}

/// Environment variable naming the config file
pub const CONFIG_VAR: &str = "TODO_SLICE_CONFIG";

/// Read a TOML config file
pub fn read_config(path: &Path) -> Result<SliceConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: SliceConfig = toml::from_str(&text)?;
    for key in config.review_intervals.0.keys() {
        validate_interval_key(key)?;
    }
    Ok(config)
}

/// Defaults, then the config file (`explicit` or `$TODO_SLICE_CONFIG`), then
/// the process environment.
pub fn load_config(explicit: Option<&Path>) -> Result<SliceConfig, ConfigError> {
    let from_env = std::env::var_os(CONFIG_VAR).map(PathBuf::from);
    let config = match explicit.map(Path::to_path_buf).or(from_env) {
        Some(path) => read_config(&path)?,
        None => SliceConfig::default(),
    };
    apply_env_overrides(config, |var| std::env::var(var).ok())
}

/// Layer environment variables over `config`. `lookup` is `std::env::var`
/// outside of tests.
pub fn apply_env_overrides(
    mut config: SliceConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SliceConfig, ConfigError> {
    if let Some(file) = lookup("TODO_FILE").filter(|v| !v.is_empty()) {
        config.todo_file = PathBuf::from(file);
    }
    if config.editor.is_none() {
        config.editor = lookup("VISUAL")
            .filter(|v| !v.trim().is_empty())
            .or_else(|| lookup("EDITOR").filter(|v| !v.trim().is_empty()));
    }
    if let Some(value) = lookup("TODOTXT_DATE_ON_ADD") {
        config.date_on_add = parse_bool("TODOTXT_DATE_ON_ADD", &value)?;
    }
    if let Some(value) = lookup("TODOTXT_PRESERVE_LINE_NUMBERS") {
        config.preserve_line_numbers = parse_bool("TODOTXT_PRESERVE_LINE_NUMBERS", &value)?;
    }
    if let Some(value) = lookup("TODOTXT_DISABLE_FILTER") {
        config.disable_filter = parse_bool("TODOTXT_DISABLE_FILTER", &value)?;
    }
    if let Some(value) = lookup("TODOTXT_SLICE_REVIEW_INTERVALS") {
        config.review_intervals = parse_review_intervals(&value)?;
    }
    Ok(config)
}

/// Parse `A:1,B:7,_:30`. An empty string is an empty table.
pub fn parse_review_intervals(s: &str) -> Result<ReviewIntervals, ConfigError> {
    let mut table = IndexMap::new();
    for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (key, days) = entry
            .split_once(':')
            .ok_or_else(|| ConfigError::InvalidInterval(entry.to_string()))?;
        let key = key.trim();
        validate_interval_key(key)?;
        let days: u32 = days
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidInterval(entry.to_string()))?;
        table.insert(key.to_string(), days);
    }
    Ok(ReviewIntervals(table))
}

fn validate_interval_key(key: &str) -> Result<(), ConfigError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some('A'..='Z' | '_'), None) => Ok(()),
        _ => Err(ConfigError::InvalidInterval(key.to_string())),
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
