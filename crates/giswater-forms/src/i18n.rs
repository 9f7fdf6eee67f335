//! Translation lookup for user-facing fallback strings.
//!
//! Strings are looked up by a fixed id. An id with no translation resolves to
//! itself, so an empty [`Translator`] is always usable.

use std::collections::HashMap;

use giswater_forms_core::{FormError, FormResult};

/// An id → text catalog for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translator {
    locale: String,
    messages: HashMap<String, String>,
}

impl Translator {
    /// Create an empty catalog.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    /// Loads a catalog from a JSON object.
    ///
    /// Nested objects are flattened with `.`, so
    /// `{"giswater": {"loading": "…"}}` defines `giswater.loading`.
    pub fn from_json_str(locale: impl Into<String>, text: &str) -> FormResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| FormError::catalog(e.to_string()))?;
        let serde_json::Value::Object(object) = value else {
            return Err(FormError::catalog("catalog root must be an object"));
        };
        let mut translator = Self::new(locale);
        flatten_into(&mut translator.messages, "", &object);
        Ok(translator)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Adds or replaces one message.
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(id.into(), text.into());
    }

    /// Resolves an id, falling back to the id itself.
    pub fn tr<'a>(&'a self, id: &'a str) -> &'a str {
        self.messages.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn flatten_into(
    out: &mut HashMap<String, String>,
    prefix: &str,
    object: &serde_json::Map<String, serde_json::Value>,
) {
    for (key, value) in object {
        let id = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            serde_json::Value::String(text) => {
                out.insert(id, text.clone());
            }
            serde_json::Value::Object(inner) => flatten_into(out, &id, inner),
            other => {
                tracing::debug!(
                    target: "giswater_forms",
                    id = %id,
                    kind = ?other,
                    "ignoring non-string catalog entry"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untranslated_id_falls_back() {
        let translator = Translator::new("en");
        assert_eq!(translator.tr("giswater.loading"), "giswater.loading");
    }

    #[test]
    fn test_nested_catalog() {
        let translator = Translator::from_json_str(
            "es",
            r#"{"giswater": {"loading": "Cargando...", "select": "Seleccionar"}, "count": 3}"#,
        )
        .unwrap();
        assert_eq!(translator.locale(), "es");
        assert_eq!(translator.len(), 2);
        assert_eq!(translator.tr("giswater.loading"), "Cargando...");
    }

    #[test]
    fn test_invalid_catalog() {
        assert!(matches!(
            Translator::from_json_str("en", "[1, 2]"),
            Err(FormError::Catalog(_))
        ));
        assert!(Translator::from_json_str("en", "{").is_err());
    }
}
