//! Default seeding.
//!
//! Value-bearing widgets without an external value render their
//! form-declared default, but the host store does not know that value yet.
//! Seeding computes those defaults once per document so the host can store
//! them. It is a separate step after parsing; rendering never emits.

use std::collections::HashSet;

use serde_json::Value;

use crate::binding::{button_group, number_value, FieldUpdate};
use crate::document::{FormDocument, Widget, WidgetKind};
use crate::state::ExternalState;
use crate::widget::{
    combine_date_time, format_qt_date, format_qt_date_time, format_qt_time, resolve_combo,
    split_date_time,
};

/// Computes the default of every value-bearing widget with no external value.
///
/// Widgets are visited in pre-order. A button group yields at most one
/// update, from its first radio button declared checked.
pub fn collect_defaults(
    document: &FormDocument,
    state: &ExternalState,
    combo_placeholder: &str,
) -> Vec<FieldUpdate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut updates = Vec::new();
    for widget in document.walk() {
        let Some((key, value)) = declared_default(widget, combo_placeholder) else {
            continue;
        };
        if state.value(&key).is_some() || !seen.insert(key.clone()) {
            continue;
        }
        updates.push(FieldUpdate {
            widget: widget.clone(),
            key,
            value,
            action: None,
        });
    }
    updates
}

/// The form-declared default of one widget and the state key it belongs to.
///
/// Returns `None` for widgets without a value, spin boxes without a declared
/// value, and grouped radio buttons that are not declared checked.
pub fn declared_default(widget: &Widget, combo_placeholder: &str) -> Option<(String, Value)> {
    let checked = matches!(widget.text_property("checked"), Some("true" | "True"));
    let text = |value: Option<String>| Value::String(value.unwrap_or_default());

    let value = match widget.kind() {
        WidgetKind::LineEdit
        | WidgetKind::TextEdit
        | WidgetKind::TextBrowser
        | WidgetKind::PlainTextEdit => text(widget.text_property("text").map(str::to_string)),
        WidgetKind::CheckBox => Value::Bool(checked),
        WidgetKind::RadioButton => {
            return match button_group(widget) {
                Some(group) if checked => {
                    Some((group.to_string(), Value::String(widget.name().to_string())))
                }
                Some(_) => None,
                None => Some((widget.name().to_string(), Value::Bool(checked))),
            };
        }
        WidgetKind::ComboBox => {
            let (_, selected) = resolve_combo(widget, &ExternalState::new(), combo_placeholder);
            Value::String(selected)
        }
        WidgetKind::SpinBox | WidgetKind::DoubleSpinBox | WidgetKind::Slider => {
            number_value(widget.kind(), widget.number_property("value")?)
        }
        WidgetKind::DateEdit => text(widget.property("date").and_then(format_qt_date)),
        WidgetKind::TimeEdit => text(widget.property("time").and_then(format_qt_time)),
        WidgetKind::DateTimeEdit => {
            let combined = widget
                .property("dateTime")
                .and_then(format_qt_date_time)
                .unwrap_or_default();
            let (date, time) = split_date_time(&combined);
            Value::String(combine_date_time(&date, &time))
        }
        _ => return None,
    };
    Some((widget.name().to_string(), value))
}
