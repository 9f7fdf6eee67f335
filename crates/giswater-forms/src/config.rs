//! Engine configuration.
//!
//! Every field has a default, so an empty document is a valid configuration
//! and hosts only spell out what they change:
//!
//! ```toml
//! seed_defaults = false
//!
//! [strings]
//! no_results = "Sin resultados"
//!
//! [date_bounds]
//! min = "2000-01-01"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use giswater_forms_core::{FormError, FormResult};

/// Configuration of a form instance and its renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Push form-declared defaults to the host for widgets without external
    /// state, once per document.
    pub seed_defaults: bool,
    /// Display strings.
    pub strings: FormStrings,
    /// Fallback bounds for date controls.
    pub date_bounds: DateBounds,
    /// Point size that renders at 100% relative font size.
    pub base_point_size: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
            strings: FormStrings::default(),
            date_bounds: DateBounds::default(),
            base_point_size: 8,
        }
    }
}

/// Placeholder and notice strings shown by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStrings {
    /// Shown for a table whose data holds no rows.
    pub no_results: String,
    /// Shown for a table whose data is malformed.
    pub no_result: String,
    /// Translation id of the loading notice.
    pub loading_id: String,
    /// Translation id of the injected empty combo box option's label. An
    /// empty id renders an empty label.
    pub combo_placeholder_id: String,
}

impl Default for FormStrings {
    fn default() -> Self {
        Self {
            no_results: "No results found".to_string(),
            no_result: "No result".to_string(),
            loading_id: "giswater.loading".to_string(),
            combo_placeholder_id: String::new(),
        }
    }
}

/// Fallback `min`/`max` of date controls, as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateBounds {
    pub min: String,
    pub max: String,
}

impl Default for DateBounds {
    fn default() -> Self {
        Self {
            min: "1900-01-01".to_string(),
            max: "9999-12-31".to_string(),
        }
    }
}

impl FormConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> FormResult<Self> {
        toml::from_str(text).map_err(|e| FormError::config(e.to_string()))
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> FormResult<Self> {
        serde_json::from_str(text).map_err(|e| FormError::config(e.to_string()))
    }

    /// Loads a configuration file, choosing the format by extension
    /// (`.json`, anything else is read as TOML).
    pub fn load(path: impl AsRef<Path>) -> FormResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FormError::config(format!("{}: {e}", path.display())))?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_toml_str(&text)?,
        };
        tracing::debug!(
            target: "giswater_forms",
            path = %path.display(),
            "loaded form configuration"
        );
        Ok(config)
    }

    /// Serializes the configuration to TOML text.
    pub fn to_toml_string(&self) -> FormResult<String> {
        toml::to_string_pretty(self).map_err(|e| FormError::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormConfig::default();
        assert!(config.seed_defaults);
        assert_eq!(config.strings.no_results, "No results found");
        assert_eq!(config.strings.no_result, "No result");
        assert_eq!(config.date_bounds.min, "1900-01-01");
        assert_eq!(config.date_bounds.max, "9999-12-31");
        assert_eq!(config.base_point_size, 8);
    }

    #[test]
    fn test_partial_toml() {
        let config = FormConfig::from_toml_str(
            r#"
            seed_defaults = false

            [strings]
            no_results = "Sin resultados"
            "#,
        )
        .unwrap();
        assert!(!config.seed_defaults);
        assert_eq!(config.strings.no_results, "Sin resultados");
        assert_eq!(config.strings.no_result, "No result");
        assert_eq!(config.date_bounds, DateBounds::default());
    }

    #[test]
    fn test_empty_documents_are_default() {
        assert_eq!(FormConfig::from_toml_str("").unwrap(), FormConfig::default());
        assert_eq!(FormConfig::from_json_str("{}").unwrap(), FormConfig::default());
    }

    #[test]
    fn test_json() {
        let config =
            FormConfig::from_json_str(r#"{"date_bounds": {"max": "2100-12-31"}, "base_point_size": 10}"#)
                .unwrap();
        assert_eq!(config.date_bounds.max, "2100-12-31");
        assert_eq!(config.date_bounds.min, "1900-01-01");
        assert_eq!(config.base_point_size, 10);
    }

    #[test]
    fn test_invalid_is_config_error() {
        let err = FormConfig::from_toml_str("seed_defaults = \"maybe\"").unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = FormConfig::default();
        config.strings.combo_placeholder_id = "giswater.select".to_string();
        let text = config.to_toml_string().unwrap();
        assert_eq!(FormConfig::from_toml_str(&text).unwrap(), config);
    }
}
