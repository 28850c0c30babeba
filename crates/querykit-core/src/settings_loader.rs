//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `QUERYKIT_DIALECT` | `dialect` |
//! | `QUERYKIT_POSTGIS` | `postgis` |
//! | `QUERYKIT_ALIAS_PREFIX` | `alias_prefix` |
//! | `QUERYKIT_DEBUG` | `debug` |
//! | `QUERYKIT_LOG_LEVEL` | `log_level` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use querykit_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/querykit.toml").unwrap();
//! let settings = settings_loader::from_toml_file_with_env("config/querykit.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::QueryKitError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, QueryKitError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| QueryKitError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, QueryKitError> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, QueryKitError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, QueryKitError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| QueryKitError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, QueryKitError> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `QUERYKIT_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("QUERYKIT_DIALECT") {
        settings.dialect = val.to_lowercase();
    }

    if let Ok(val) = std::env::var("QUERYKIT_POSTGIS") {
        settings.postgis = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("QUERYKIT_ALIAS_PREFIX") {
        if !val.trim().is_empty() {
            settings.alias_prefix = val.trim().to_string();
        }
    }

    if let Ok(val) = std::env::var("QUERYKIT_DEBUG") {
        settings.debug = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("QUERYKIT_LOG_LEVEL") {
        settings.log_level = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_flag(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn merge_over_defaults(
    overrides: serde_json::Value,
    format: &str,
) -> Result<Settings, QueryKitError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        QueryKitError::SerializationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, overrides);
    serde_json::from_value(merged).map_err(|e| {
        QueryKitError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            dialect = "sqlite"
            debug = false
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.dialect, "sqlite");
        assert!(!settings.debug);
        // Defaults preserved
        assert_eq!(settings.alias_prefix, "qk");
    }

    #[test]
    fn test_from_toml_str_postgis() {
        let toml = r#"
            dialect = "postgresql"
            postgis = true
            alias_prefix = "mode"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(settings.postgis);
        assert_eq!(settings.alias_prefix, "mode");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings.dialect, "standard");
        assert!(settings.debug);
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(matches!(result, Err(QueryKitError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("postgis = \"maybe\"");
        assert!(result.is_err());
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "dialect": "mysql",
            "log_level": "debug"
        }"#;

        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.dialect, "mysql");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.alias_prefix, "qk");
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/nonexistent/querykit.toml");
        assert!(matches!(
            result,
            Err(QueryKitError::IoError(ref e)) if e.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = from_json_file("/nonexistent/querykit.json");
        assert!(matches!(result, Err(QueryKitError::IoError(_))));
    }

    #[test]
    fn test_from_json_file_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("querykit-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"dialect": "postgresql", "postgis": true}"#).unwrap();
        let settings = from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.dialect, "postgresql");
        assert!(settings.postgis);
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("YES"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        let over = serde_json::json!({"a": {"b": 10}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"b": 10, "c": 2}, "d": 3}));
    }
}
