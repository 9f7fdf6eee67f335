//! Error types for the Giswater form engine.

use thiserror::Error;

/// Errors that can occur while loading or driving a form.
///
/// Malformed *input data* inside an otherwise readable form (bad embedded
/// JSON, unknown widget classes, missing table data) is never reported
/// through this type; those cases degrade to neutral values at the point of
/// use.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The XML text could not be read into any element tree.
    #[error("XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// The document has no `ui` > `widget` root.
    #[error("form document has no root widget")]
    MissingRoot,

    /// A configuration document could not be deserialized.
    #[error("invalid form configuration: {0}")]
    Config(String),

    /// A translation catalog could not be deserialized.
    #[error("invalid translation catalog: {0}")]
    Catalog(String),

    /// The form instance has been unmounted.
    #[error("form instance has been destroyed")]
    Destroyed,
}

impl FormError {
    /// Create an XML error.
    pub fn xml(position: u64, message: impl Into<String>) -> Self {
        Self::Xml {
            position,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a catalog error.
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    /// Returns true if this error was raised while reading XML.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Xml { .. } | Self::MissingRoot)
    }
}

/// Result type for form operations.
pub type FormResult<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            FormError::xml(12, "unexpected end").to_string(),
            "XML error at byte 12: unexpected end"
        );
        assert_eq!(
            FormError::MissingRoot.to_string(),
            "form document has no root widget"
        );
        assert_eq!(
            FormError::config("bad key").to_string(),
            "invalid form configuration: bad key"
        );
    }

    #[test]
    fn test_parse_error_classification() {
        assert!(FormError::MissingRoot.is_parse_error());
        assert!(FormError::xml(0, "x").is_parse_error());
        assert!(!FormError::Destroyed.is_parse_error());
        assert!(!FormError::catalog("x").is_parse_error());
    }
}
