//! Normalized widget and layout nodes.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::kind::{LayoutKind, WidgetKind};
use crate::xml::RawValue;

/// A property or attribute value.
///
/// Qt Designer encodes each property as one element holding a typed child
/// (`<string>`, `<bool>`, `<enum>`, `<font>`, `<date>`, …). Scalar children
/// normalize to `Text`; structured ones (`font`, `date`, `rect`) to `Struct`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Struct(BTreeMap<String, PropertyValue>),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub(crate) fn from_raw(raw: &RawValue) -> Self {
        if let Some(text) = raw.as_text() {
            return PropertyValue::Text(text.to_string());
        }
        match raw {
            RawValue::List(items) => {
                PropertyValue::List(items.iter().map(PropertyValue::from_raw).collect())
            }
            _ => PropertyValue::Struct(
                raw.entries()
                    .iter()
                    .map(|(key, value)| (key.clone(), PropertyValue::from_raw(value)))
                    .collect(),
            ),
        }
    }

    /// Returns the text of a scalar value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the fields of a structured value.
    pub fn as_struct(&self) -> Option<&BTreeMap<String, PropertyValue>> {
        match self {
            PropertyValue::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Reads a named field of a structured value as text.
    pub fn field_text(&self, key: &str) -> Option<&str> {
        self.as_struct()?.get(key)?.as_text()
    }

    /// Reads a named field of a structured value as an integer.
    pub fn field_i64(&self, key: &str) -> Option<i64> {
        self.field_text(key)?.trim().parse().ok()
    }
}

/// Property or attribute map of a widget.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Parses a Qt boolean string.
pub fn parse_qt_bool(text: &str) -> Option<bool> {
    match text {
        "true" | "True" => Some(true),
        "false" | "False" => Some(false),
        _ => None,
    }
}

/// One Qt Designer widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub(crate) kind: WidgetKind,
    pub(crate) name: String,
    pub(crate) property: PropertyMap,
    pub(crate) attribute: PropertyMap,
    pub(crate) layout: Option<Layout>,
    pub(crate) widgets: Vec<Arc<Widget>>,
    pub(crate) items: Vec<ComboItem>,
}

impl Widget {
    /// The widget's class.
    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    /// The raw Qt class name.
    pub fn class_name(&self) -> &str {
        self.kind.class_name()
    }

    /// The declared or synthetic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All properties.
    pub fn properties(&self) -> &PropertyMap {
        &self.property
    }

    /// All attributes.
    pub fn attributes(&self) -> &PropertyMap {
        &self.attribute
    }

    /// The child layout of a container widget.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Direct child widgets (tab pages).
    pub fn widgets(&self) -> &[Arc<Widget>] {
        &self.widgets
    }

    /// Combo box option items.
    pub fn items(&self) -> &[ComboItem] {
        &self.items
    }

    /// Gets a property value.
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.property.get(key)
    }

    /// Gets a scalar property as text.
    pub fn text_property(&self, key: &str) -> Option<&str> {
        self.property.get(key)?.as_text()
    }

    /// Gets a boolean property (`true`/`True`/`false`/`False`).
    pub fn bool_property(&self, key: &str) -> Option<bool> {
        parse_qt_bool(self.text_property(key)?)
    }

    /// Returns true if the property holds exactly the string `"true"`.
    pub fn property_is_true(&self, key: &str) -> bool {
        self.text_property(key) == Some("true")
    }

    /// Gets a scalar property as a number.
    pub fn number_property(&self, key: &str) -> Option<f64> {
        self.text_property(key)?.trim().parse().ok()
    }

    /// Gets a scalar attribute as text.
    pub fn attribute_text(&self, key: &str) -> Option<&str> {
        self.attribute.get(key)?.as_text()
    }
}

/// One option of a combo box.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComboItem {
    pub(crate) property: PropertyMap,
}

impl ComboItem {
    /// All properties of the item.
    pub fn properties(&self) -> &PropertyMap {
        &self.property
    }

    /// The displayed text.
    pub fn text(&self) -> Option<&str> {
        self.property.get("text")?.as_text()
    }

    /// The value submitted for this option: `value`, else `text`.
    pub fn value(&self) -> Option<&str> {
        self.property
            .get("value")
            .and_then(PropertyValue::as_text)
            .or_else(|| self.text())
    }
}

/// One Qt Designer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub(crate) kind: LayoutKind,
    pub(crate) name: String,
    pub(crate) items: Vec<LayoutItem>,
}

impl Layout {
    /// The layout's class.
    pub fn kind(&self) -> &LayoutKind {
        &self.kind
    }

    /// The declared or synthetic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The layout items in source order.
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }
}

/// One entry of a layout with its grid placement.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem {
    pub(crate) row: u32,
    pub(crate) column: u32,
    pub(crate) rowspan: u32,
    pub(crate) colspan: u32,
    pub(crate) content: LayoutContent,
}

impl LayoutItem {
    /// Zero-based row (0 when not declared).
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column (0 when not declared).
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Row span (1 when not declared).
    pub fn rowspan(&self) -> u32 {
        self.rowspan
    }

    /// Column span (1 when not declared).
    pub fn colspan(&self) -> u32 {
        self.colspan
    }

    /// The nested widget or layout.
    pub fn content(&self) -> &LayoutContent {
        &self.content
    }

    /// The nested widget, if this item holds one.
    pub fn widget(&self) -> Option<&Arc<Widget>> {
        match &self.content {
            LayoutContent::Widget(widget) => Some(widget),
            LayoutContent::Layout(_) => None,
        }
    }
}

/// What a layout item holds.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutContent {
    Widget(Arc<Widget>),
    Layout(Layout),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qt_bool() {
        assert_eq!(parse_qt_bool("true"), Some(true));
        assert_eq!(parse_qt_bool("True"), Some(true));
        assert_eq!(parse_qt_bool("False"), Some(false));
        assert_eq!(parse_qt_bool("yes"), None);
    }

    #[test]
    fn test_combo_item_value_falls_back_to_text() {
        let mut item = ComboItem::default();
        item.property
            .insert("text".into(), PropertyValue::Text("One".into()));
        assert_eq!(item.value(), Some("One"));

        item.property
            .insert("value".into(), PropertyValue::Text("1".into()));
        assert_eq!(item.value(), Some("1"));
        assert_eq!(item.text(), Some("One"));
    }

    #[test]
    fn test_struct_fields() {
        let date = PropertyValue::Struct(
            [
                ("year".to_string(), PropertyValue::Text("2024".into())),
                ("month".to_string(), PropertyValue::Text("3".into())),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(date.field_i64("year"), Some(2024));
        assert_eq!(date.field_i64("month"), Some(3));
        assert_eq!(date.field_i64("day"), None);
    }
}
