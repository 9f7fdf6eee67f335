//! Widget tree normalization.
//!
//! Turns the raw merged-value tree of a `ui` > `widget` root into a
//! [`FormDocument`]. One depth-first, pre-order pass over widgets, recursing
//! into layouts:
//!
//! 1. `property` and `attribute` become `name -> value` maps (empty when
//!    absent).
//! 2. Combo box `item`s get their own property maps.
//! 3. Unnamed widgets get `:widget_<n>`, unnamed layouts `:layout_<n>`. The
//!    counters live in a [`Normalizer`] created for this one pass.
//! 4. Layout items recurse into their widget or layout; items holding neither
//!    (spacers) are dropped.
//! 5. Child widgets (tab pages) are always given a fresh synthetic name,
//!    discarding any declared one.

use std::collections::HashMap;
use std::sync::Arc;

use super::kind::{LayoutKind, WidgetKind};
use super::node::{ComboItem, Layout, LayoutContent, LayoutItem, PropertyMap, PropertyValue, Widget};
use super::FormDocument;
use crate::xml::RawValue;

/// Fields of a property element that are not its value.
const PROPERTY_META_KEYS: [&str; 2] = ["name", "stdset"];

/// Normalizes a raw root widget into a form document.
pub fn normalize(raw_root: &RawValue) -> FormDocument {
    let mut normalizer = Normalizer::new();
    let root = normalizer.widget(raw_root, None);
    tracing::debug!(
        target: "giswater_forms::parse",
        widgets = normalizer.widget_count,
        layouts = normalizer.layout_count,
        fields = normalizer.fields.len(),
        "normalized form tree"
    );
    FormDocument {
        root,
        fields: normalizer.fields,
        external_fields: HashMap::new(),
    }
}

/// Per-pass normalization context.
#[derive(Debug, Default)]
pub struct Normalizer {
    widget_count: u32,
    layout_count: u32,
    fields: HashMap<String, Arc<Widget>>,
}

impl Normalizer {
    /// Create a context with fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_widget_name(&mut self) -> String {
        let name = format!(":widget_{}", self.widget_count);
        self.widget_count += 1;
        name
    }

    fn next_layout_name(&mut self) -> String {
        let name = format!(":layout_{}", self.layout_count);
        self.layout_count += 1;
        name
    }

    /// Normalizes one widget and everything below it.
    pub fn widget(&mut self, raw: &RawValue, forced_name: Option<String>) -> Arc<Widget> {
        let kind = WidgetKind::from_class(raw.get_text("class").unwrap_or_default());
        let property = property_map(raw.get("property"));
        let attribute = property_map(raw.get("attribute"));
        let items = RawValue::one_or_many(raw.get("item"))
            .into_iter()
            .map(|item| ComboItem {
                property: property_map(item.get("property")),
            })
            .collect();

        let name = match forced_name {
            Some(name) => name,
            None => match raw.get_text("name") {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => self.next_widget_name(),
            },
        };

        let layout = RawValue::one_or_many(raw.get("layout"))
            .into_iter()
            .next()
            .map(|layout| self.layout(layout));

        let mut widgets = Vec::new();
        for child in RawValue::one_or_many(raw.get("widget")) {
            let child_name = self.next_widget_name();
            widgets.push(self.widget(child, Some(child_name)));
        }

        let widget = Arc::new(Widget {
            kind,
            name,
            property,
            attribute,
            layout,
            widgets,
            items,
        });
        if self
            .fields
            .insert(widget.name.clone(), widget.clone())
            .is_some()
        {
            tracing::debug!(
                target: "giswater_forms::parse",
                name = %widget.name,
                "duplicate widget name, keeping the later widget"
            );
        }
        widget
    }

    /// Normalizes one layout and everything below it.
    pub fn layout(&mut self, raw: &RawValue) -> Layout {
        let kind = LayoutKind::from_class(raw.get_text("class").unwrap_or_default());
        let name = match raw.get_text("name") {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.next_layout_name(),
        };

        let mut items = Vec::new();
        for item in RawValue::one_or_many(raw.get("item")) {
            let content = if let Some(widget) = first(item.get("widget")) {
                LayoutContent::Widget(self.widget(widget, None))
            } else if let Some(layout) = first(item.get("layout")) {
                LayoutContent::Layout(self.layout(layout))
            } else {
                tracing::trace!(
                    target: "giswater_forms::parse",
                    layout = %name,
                    "skipping layout item without widget or layout"
                );
                continue;
            };
            items.push(LayoutItem {
                row: placement(item, "row", 0),
                column: placement(item, "column", 0),
                rowspan: placement(item, "rowspan", 1).max(1),
                colspan: placement(item, "colspan", 1).max(1),
                content,
            });
        }

        Layout { kind, name, items }
    }
}

/// Coerces a `property`/`attribute` field into a map.
///
/// Each entry is one element; its value is the first field that is not the
/// element's own `name` (or `stdset`) attribute.
fn property_map(raw: Option<&RawValue>) -> PropertyMap {
    let mut map = PropertyMap::new();
    for entry in RawValue::one_or_many(raw) {
        let Some(name) = entry.get_text("name") else {
            continue;
        };
        let value = entry
            .entries()
            .iter()
            .find(|(key, _)| !PROPERTY_META_KEYS.contains(&key.as_str()))
            .map(|(_, value)| PropertyValue::from_raw(value))
            .unwrap_or_else(|| PropertyValue::Text(String::new()));
        map.insert(name.to_string(), value);
    }
    map
}

fn first(raw: Option<&RawValue>) -> Option<&RawValue> {
    RawValue::one_or_many(raw).into_iter().next()
}

fn placement(item: &RawValue, key: &str, default: u32) -> u32 {
    item.get_text(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_ui;
    use std::collections::HashSet;

    fn document(xml: &str) -> FormDocument {
        normalize(&parse_ui(xml).unwrap())
    }

    #[test]
    fn test_properties_become_map() {
        let doc = document(
            r#"<ui><widget class="QLineEdit" name="txt_code">
                <property name="text"><string>abc</string></property>
                <property name="readOnly"><bool>true</bool></property>
            </widget></ui>"#,
        );
        let root = doc.root();
        assert_eq!(root.name(), "txt_code");
        assert_eq!(root.text_property("text"), Some("abc"));
        assert_eq!(root.text_property("readOnly"), Some("true"));
        assert!(root.attributes().is_empty());
    }

    #[test]
    fn test_missing_maps_are_empty() {
        let doc = document(r#"<ui><widget class="QLabel"/></ui>"#);
        assert!(doc.root().properties().is_empty());
        assert!(doc.root().attributes().is_empty());
    }

    #[test]
    fn test_stdset_is_not_the_value() {
        let doc = document(
            r#"<ui><widget class="QLineEdit" name="txt">
                <property name="columnname" stdset="0"><string>expl_id</string></property>
            </widget></ui>"#,
        );
        assert_eq!(doc.root().text_property("columnname"), Some("expl_id"));
    }

    #[test]
    fn test_font_is_struct() {
        let doc = document(
            r#"<ui><widget class="QLabel" name="lbl">
                <property name="font"><font><pointsize>12</pointsize><bold>true</bold></font></property>
            </widget></ui>"#,
        );
        let font = doc.root().property("font").unwrap();
        assert_eq!(font.field_text("bold"), Some("true"));
        assert_eq!(font.field_i64("pointsize"), Some(12));
    }

    #[test]
    fn test_synthetic_names_are_unique() {
        let doc = document(
            r#"<ui><widget class="QWidget">
                <layout class="QGridLayout">
                    <item row="0" column="0"><widget class="QLabel"/></item>
                    <item row="0" column="1"><widget class="QLabel"/></item>
                    <item row="1" column="0"><layout class="QHBoxLayout">
                        <item><widget class="QLineEdit"/></item>
                    </layout></item>
                </layout>
            </widget></ui>"#,
        );
        let names: HashSet<&str> = doc.fields().keys().map(String::as_str).collect();
        assert_eq!(names.len(), 4);
        assert!(names.contains(":widget_0"));
        assert!(names.contains(":widget_3"));

        let layout = doc.root().layout().unwrap();
        assert_eq!(layout.name(), ":layout_0");
        match layout.items()[2].content() {
            LayoutContent::Layout(inner) => assert_eq!(inner.name(), ":layout_1"),
            other => panic!("expected nested layout, got {other:?}"),
        }
    }

    #[test]
    fn test_names_are_assigned_in_pre_order() {
        let doc = document(
            r#"<ui><widget class="QWidget">
                <layout class="QVBoxLayout">
                    <item><widget class="QFrame">
                        <layout class="QVBoxLayout"><item><widget class="QLabel"/></item></layout>
                    </widget></item>
                    <item><widget class="QLabel"/></item>
                </layout>
            </widget></ui>"#,
        );
        let items = doc.root().layout().unwrap().items();
        let frame = items[0].widget().unwrap();
        assert_eq!(doc.root().name(), ":widget_0");
        assert_eq!(frame.name(), ":widget_1");
        assert_eq!(
            frame.layout().unwrap().items()[0].widget().unwrap().name(),
            ":widget_2"
        );
        assert_eq!(items[1].widget().unwrap().name(), ":widget_3");
    }

    #[test]
    fn test_tab_pages_are_always_renamed() {
        let doc = document(
            r#"<ui><widget class="QTabWidget" name="tab_main">
                <widget class="QWidget" name="tab_data">
                    <attribute name="title"><string>Data</string></attribute>
                </widget>
                <widget class="QWidget" name="tab_doc">
                    <attribute name="title"><string>Documents</string></attribute>
                </widget>
            </widget></ui>"#,
        );
        let pages = doc.root().widgets();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].name(), ":widget_0");
        assert_eq!(pages[1].name(), ":widget_1");
        assert_eq!(pages[0].attribute_text("title"), Some("Data"));
        assert!(doc.widget("tab_data").is_none());
    }

    #[test]
    fn test_single_tab_page_is_coerced_to_list() {
        let doc = document(
            r#"<ui><widget class="QTabWidget" name="tabs">
                <widget class="QWidget"/>
            </widget></ui>"#,
        );
        assert_eq!(doc.root().widgets().len(), 1);
    }

    #[test]
    fn test_spacer_items_are_skipped() {
        let doc = document(
            r#"<ui><widget class="QWidget" name="form">
                <layout class="QVBoxLayout">
                    <item><widget class="QLabel" name="lbl"/></item>
                    <item><spacer name="verticalSpacer"/></item>
                </layout>
            </widget></ui>"#,
        );
        assert_eq!(doc.root().layout().unwrap().items().len(), 1);
    }

    #[test]
    fn test_grid_placement_defaults() {
        let doc = document(
            r#"<ui><widget class="QWidget" name="form">
                <layout class="QGridLayout" name="grid">
                    <item row="2" column="1" colspan="3"><widget class="QLineEdit" name="txt"/></item>
                    <item><widget class="QLabel" name="lbl"/></item>
                </layout>
            </widget></ui>"#,
        );
        let items = doc.root().layout().unwrap().items();
        assert_eq!(
            (items[0].row(), items[0].column(), items[0].rowspan(), items[0].colspan()),
            (2, 1, 1, 3)
        );
        assert_eq!(
            (items[1].row(), items[1].column(), items[1].rowspan(), items[1].colspan()),
            (0, 0, 1, 1)
        );
    }

    #[test]
    fn test_combo_items() {
        let doc = document(
            r#"<ui><widget class="QComboBox" name="cmb">
                <item><property name="text"><string>One</string></property>
                      <property name="value"><string>1</string></property></item>
                <item><property name="text"><string>Two</string></property></item>
            </widget></ui>"#,
        );
        let items = doc.root().items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].value(), Some("1"));
        assert_eq!(items[1].value(), Some("Two"));
    }

    #[test]
    fn test_counters_are_per_pass() {
        let xml = r#"<ui><widget class="QLabel"/></ui>"#;
        assert_eq!(document(xml).root().name(), ":widget_0");
        assert_eq!(document(xml).root().name(), ":widget_0");
    }
}
