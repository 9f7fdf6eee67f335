//! Qt Designer `.ui` XML input.
//!
//! Reading a form happens in two steps:
//!
//! 1. [`parse_xml`] reads the text into an [`XmlElement`] tree, recovering
//!    from reader errors where it can.
//! 2. [`RawValue::from_element`] merges each element's attributes and
//!    children into one value, which is what the normalizer walks.
//!
//! [`parse_ui`] runs both steps and extracts the `ui` > `widget` root.
//!
//! ```ignore
//! use giswater_forms::xml::parse_ui;
//!
//! let root = parse_ui(r#"<ui><widget class="QWidget" name="Form"/></ui>"#)?;
//! assert_eq!(root.get_text("class"), Some("QWidget"));
//! ```

mod raw;
mod reader;

pub use raw::{RawValue, TEXT_KEY};
pub use reader::{parse_xml, LenientParse, XmlElement, XmlNode};

use giswater_forms_core::{FormError, FormResult};

/// Parses a Qt Designer document and returns its root widget as a raw value.
///
/// Malformed XML is logged and parsed on a best-effort basis. A document
/// without a `ui` root element or without a top-level `widget` is a
/// [`FormError::MissingRoot`].
pub fn parse_ui(text: &str) -> FormResult<RawValue> {
    let parsed = parse_xml(text)?;
    if parsed.root.name() != "ui" {
        tracing::warn!(
            target: "giswater_forms::parse",
            root = parsed.root.name(),
            "form document root is not <ui>"
        );
        return Err(FormError::MissingRoot);
    }

    let ui = RawValue::from_element(&parsed.root);
    RawValue::one_or_many(ui.get("widget"))
        .into_iter()
        .next()
        .cloned()
        .ok_or(FormError::MissingRoot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ui_returns_root_widget() {
        let root = parse_ui(r#"<ui version="4.0"><widget class="QWidget" name="Form"/></ui>"#)
            .unwrap();
        assert_eq!(root.get_text("class"), Some("QWidget"));
        assert_eq!(root.get_text("name"), Some("Form"));
    }

    #[test]
    fn test_missing_widget_is_missing_root() {
        assert_eq!(
            parse_ui(r#"<ui version="4.0"><class>Form</class></ui>"#),
            Err(FormError::MissingRoot)
        );
    }

    #[test]
    fn test_wrong_root_is_missing_root() {
        assert_eq!(
            parse_ui(r#"<form><widget class="QWidget"/></form>"#),
            Err(FormError::MissingRoot)
        );
    }

    #[test]
    fn test_truncated_ui_still_yields_widget() {
        let root = parse_ui(r#"<ui><widget class="QWidget" name="Form"><layout class="QVBoxLayout">"#)
            .unwrap();
        assert_eq!(root.get_text("name"), Some("Form"));
        assert!(root.get("layout").is_some());
    }
}
