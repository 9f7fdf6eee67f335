//! Combo box options and selection.

use crate::document::Widget;
use crate::state::{value_text, ExternalState};

/// One option of a rendered combo box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboOption {
    pub value: String,
    pub label: String,
}

/// Builds the options of a combo box and resolves the selected value.
///
/// Options come from the widget's items: value is `property.value`, else
/// `property.text`. An empty placeholder option is put first unless some
/// option already has an empty value or label.
///
/// The selection is, in order: the external value; the option whose label
/// equals the declared `property.value`; the option whose value equals it;
/// the first option.
pub fn resolve_combo(
    widget: &Widget,
    state: &ExternalState,
    placeholder: &str,
) -> (Vec<ComboOption>, String) {
    let mut options: Vec<ComboOption> = widget
        .items()
        .iter()
        .map(|item| {
            let value = item.value().unwrap_or_default().to_string();
            let label = item.text().map(str::to_string).unwrap_or_else(|| value.clone());
            ComboOption { value, label }
        })
        .collect();

    let has_empty = options
        .iter()
        .any(|option| option.value.is_empty() || option.label.is_empty());
    if !has_empty {
        options.insert(
            0,
            ComboOption {
                value: String::new(),
                label: placeholder.to_string(),
            },
        );
    }

    if let Some(external) = state.value(widget.name()).and_then(value_text) {
        return (options, external);
    }

    let selected = match widget.text_property("value") {
        Some(declared) => options
            .iter()
            .find(|option| option.label == declared)
            .or_else(|| options.iter().find(|option| option.value == declared))
            .map(|option| option.value.clone()),
        None => None,
    };
    let selected = selected.unwrap_or_else(|| {
        options
            .first()
            .map(|option| option.value.clone())
            .unwrap_or_default()
    });
    (options, selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FormDocument;

    fn combo(declared: Option<&str>) -> FormDocument {
        let value = declared
            .map(|v| format!(r#"<property name="value"><string>{v}</string></property>"#))
            .unwrap_or_default();
        FormDocument::parse(&format!(
            r#"<ui><widget class="QComboBox" name="cmb">{value}
                <item><property name="value"><string>1</string></property>
                      <property name="text"><string>One</string></property></item>
                <item><property name="value"><string>2</string></property>
                      <property name="text"><string>Two</string></property></item>
            </widget></ui>"#
        ))
        .unwrap()
    }

    #[test]
    fn test_declared_text_selects_value() {
        let doc = combo(Some("One"));
        let (options, selected) = resolve_combo(doc.root(), &ExternalState::new(), "");
        assert_eq!(selected, "1");
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "");
    }

    #[test]
    fn test_declared_value_matches_value() {
        let doc = combo(Some("2"));
        let (_, selected) = resolve_combo(doc.root(), &ExternalState::new(), "");
        assert_eq!(selected, "2");
    }

    #[test]
    fn test_unmatched_falls_back_to_placeholder() {
        let doc = combo(Some("Three"));
        let (_, selected) = resolve_combo(doc.root(), &ExternalState::new(), "-");
        assert_eq!(selected, "");
    }

    #[test]
    fn test_external_value_wins() {
        let doc = combo(Some("One"));
        let mut state = ExternalState::new();
        state.set_value("cmb", 2);
        let (_, selected) = resolve_combo(doc.root(), &state, "");
        assert_eq!(selected, "2");
    }

    #[test]
    fn test_existing_empty_option_suppresses_placeholder() {
        let doc = FormDocument::parse(
            r#"<ui><widget class="QComboBox" name="cmb">
                <item><property name="text"><string/></property></item>
                <item><property name="text"><string>A</string></property></item>
            </widget></ui>"#,
        )
        .unwrap();
        let (options, selected) = resolve_combo(doc.root(), &ExternalState::new(), "");
        assert_eq!(options.len(), 2);
        assert_eq!(selected, "");
    }

    #[test]
    fn test_no_items() {
        let doc =
            FormDocument::parse(r#"<ui><widget class="QComboBox" name="cmb"/></ui>"#).unwrap();
        let (options, selected) = resolve_combo(doc.root(), &ExternalState::new(), "");
        assert_eq!(options.len(), 1);
        assert_eq!(selected, "");
    }
}
