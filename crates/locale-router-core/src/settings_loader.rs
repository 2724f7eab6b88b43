//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
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
//! | `LOCALE_ROUTER_DEBUG` | `debug` |
//! | `LOCALE_ROUTER_LOG_LEVEL` | `log_level` |
//! | `LOCALE_ROUTER_DEFAULT_LOCALE` | `default_locale` |
//! | `LOCALE_ROUTER_LOCALES` | `locales` (comma-separated) |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use locale_router_core::settings_loader;
//!
//! // Load from TOML
//! let settings = settings_loader::from_toml_file("config/routes.toml").unwrap();
//!
//! // Load from TOML with environment overrides
//! let settings = settings_loader::from_toml_file_with_env("config/routes.toml").unwrap();
//! ```
//!
//! A route table in TOML:
//!
//! ```toml
//! default_locale = "en"
//!
//! [[routes]]
//! name = "home"
//! pattern = ""
//!
//! [[routes]]
//! name = "blog"
//! locale = "fr"
//! pattern = "/blog/:slug"
//! ```

use std::path::Path;

use crate::error::RouterError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, RouterError> {
    // Deserialize into a generic value first so missing keys fall back to the
    // defaults after merging.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| RouterError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    let json_value = toml_to_json(toml_value);
    merge_over_defaults(json_value, "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, RouterError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        RouterError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, RouterError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, RouterError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| RouterError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, RouterError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        RouterError::ConfigurationError(format!(
            "Failed to read JSON file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_json_str(&content)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, RouterError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// - `LOCALE_ROUTER_DEBUG` -> `debug` ("true"/"1"/"yes" => true, anything else => false)
/// - `LOCALE_ROUTER_LOG_LEVEL` -> `log_level`
/// - `LOCALE_ROUTER_DEFAULT_LOCALE` -> `default_locale`
/// - `LOCALE_ROUTER_LOCALES` -> `locales` (comma-separated)
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("LOCALE_ROUTER_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("LOCALE_ROUTER_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("LOCALE_ROUTER_DEFAULT_LOCALE") {
        settings.default_locale = val;
    }

    if let Ok(val) = std::env::var("LOCALE_ROUTER_LOCALES") {
        settings.locales = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
}

// ============================================================
// Helpers
// ============================================================

/// Merges a parsed document over the default settings and deserializes the result.
fn merge_over_defaults(
    value: serde_json::Value,
    format_name: &str,
) -> Result<Settings, RouterError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        RouterError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        RouterError::ConfigurationError(format!(
            "Failed to deserialize settings from {format_name}: {e}"
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
///
/// Arrays are replaced wholesale, so a `routes` list in a file never
/// interleaves with the (empty) default list.
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
    use crate::settings::RouteDefinition;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            default_locale = "fr"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.default_locale, "fr");
        // Defaults preserved
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_toml_str_routes() {
        let toml = r#"
            default_locale = "en"
            locales = ["en", "fr"]

            [[routes]]
            name = "home"
            pattern = ""

            [[routes]]
            name = "blog"
            locale = "fr"
            pattern = "/blog/:slug"
            page = "/blog"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.locales, vec!["en", "fr"]);
        assert_eq!(settings.routes.len(), 2);
        assert_eq!(settings.routes[0], RouteDefinition::new("home").pattern(""));
        assert_eq!(
            settings.routes[1],
            RouteDefinition::new("blog")
                .locale("fr")
                .pattern("/blog/:slug")
                .page("/blog")
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.default_locale, "en");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("this is [not valid toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_str_route_missing_name() {
        let toml = r#"
            [[routes]]
            pattern = "/a"
        "#;
        let err = from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize settings from TOML"));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "default_locale": "de",
            "log_level": "debug",
            "routes": [{"name": "about", "pattern": "/ueber-uns"}]
        }"#;

        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.default_locale, "de");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(
            settings.routes,
            vec![RouteDefinition::new("about").pattern("/ueber-uns")]
        );
    }

    #[test]
    fn test_from_json_str_empty_object() {
        let settings = from_json_str("{}").unwrap();
        assert_eq!(settings.default_locale, "en");
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = std::env::temp_dir().join("locale_router_test_toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("routes.toml");

        let toml_content = r#"
            default_locale = "es"

            [[routes]]
            name = "contact"
        "#;
        std::fs::write(&path, toml_content).unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.default_locale, "es");
        assert_eq!(settings.routes, vec![RouteDefinition::new("contact")]);

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_from_json_file() {
        let dir = std::env::temp_dir().join("locale_router_test_json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("routes.json");

        std::fs::write(&path, r#"{"debug": false}"#).unwrap();

        let settings = from_json_file(&path).unwrap();
        assert!(!settings.debug);

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/nonexistent/path/routes.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = from_json_file("/nonexistent/path/routes.json");
        assert!(result.is_err());
    }

    // ── Environment variable overrides ──────────────────────────────

    #[test]
    fn test_apply_env_overrides_debug() {
        let mut settings = Settings::default();
        settings.debug = false;
        std::env::set_var("LOCALE_ROUTER_DEBUG", "1");
        apply_env_overrides(&mut settings);
        assert!(settings.debug);
        std::env::remove_var("LOCALE_ROUTER_DEBUG");
    }

    #[test]
    fn test_apply_env_overrides_log_level() {
        let mut settings = Settings::default();
        std::env::set_var("LOCALE_ROUTER_LOG_LEVEL", "trace");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.log_level, "trace");
        std::env::remove_var("LOCALE_ROUTER_LOG_LEVEL");
    }

    #[test]
    fn test_apply_env_overrides_locales() {
        let mut settings = Settings::default();
        std::env::set_var("LOCALE_ROUTER_LOCALES", "en, fr,,de ");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.locales, vec!["en", "fr", "de"]);
        std::env::remove_var("LOCALE_ROUTER_LOCALES");
    }

    #[test]
    fn test_apply_env_overrides_default_locale() {
        let mut settings = Settings::default();
        std::env::set_var("LOCALE_ROUTER_DEFAULT_LOCALE", "pt-br");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.default_locale, "pt-br");
        std::env::remove_var("LOCALE_ROUTER_DEFAULT_LOCALE");
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_merge_json_replaces_arrays() {
        let base = serde_json::json!({"locales": ["en"], "debug": true});
        let over = serde_json::json!({"locales": ["fr", "de"]});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"locales": ["fr", "de"], "debug": true}));
    }
}
