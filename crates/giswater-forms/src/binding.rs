//! Change propagation towards the host.
//!
//! Rendered controls never hold their own value. User input is reported as a
//! [`FormEvent`], translated against the document into a [`FieldUpdate`] or a
//! [`ButtonAction`], and emitted through a [`FormBinding`] signal. The host
//! stores the value and renders again.
//!
//! # Example
//!
//! ```ignore
//! let binding = FormBinding::new();
//! binding.field_changed.connect(|update| {
//!     println!("{} = {}", update.key, update.value);
//! });
//! ```

use std::sync::Arc;

use serde_json::{json, Value};

use giswater_forms_core::Signal;

use crate::document::{FormDocument, Widget, WidgetKind};
use crate::state::ExternalState;
use crate::widget::{combine_date_time, split_date_time};

/// A value change for the host's external state.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    /// The widget the change came from.
    pub widget: Arc<Widget>,
    /// The external-state key: the widget name, or the button group id of a
    /// grouped radio button.
    pub key: String,
    /// The new value.
    pub value: Value,
    /// The parsed `property.action` of check boxes and radio buttons.
    pub action: Option<Value>,
}

/// A one-shot button or file selection action.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonAction {
    /// The parsed `property.widgetfunction`, or an `upload_file` payload.
    pub payload: Value,
    pub widget: Arc<Widget>,
}

/// A tab selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TabChange {
    /// The tab widget.
    pub widget: Arc<Widget>,
    /// Name of the selected page.
    pub tab: String,
}

/// Which half of a date-time control changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimePart {
    Date,
    Time,
}

/// User interaction with a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Text typed into a line or text edit.
    TextChanged { widget: String, text: String },
    /// A check box or radio button toggled.
    Toggled { widget: String, checked: bool },
    /// A combo box option picked, by option value.
    ComboSelected { widget: String, value: String },
    /// A spin box or slider moved.
    NumberChanged { widget: String, value: f64 },
    /// A date or time edit changed.
    DateChanged { widget: String, value: String },
    /// One half of a date-time edit changed.
    DateTimePartChanged {
        widget: String,
        part: DateTimePart,
        value: String,
    },
    /// A push button activated.
    ButtonClicked { widget: String },
    /// A file chosen in a file picker.
    FileSelected { widget: String, file: String },
    /// A tab page selected.
    TabSelected { tab_widget: String, tab: String },
}

impl FormEvent {
    /// Name of the widget the event targets.
    pub fn widget(&self) -> &str {
        match self {
            FormEvent::TextChanged { widget, .. }
            | FormEvent::Toggled { widget, .. }
            | FormEvent::ComboSelected { widget, .. }
            | FormEvent::NumberChanged { widget, .. }
            | FormEvent::DateChanged { widget, .. }
            | FormEvent::DateTimePartChanged { widget, .. }
            | FormEvent::ButtonClicked { widget }
            | FormEvent::FileSelected { widget, .. } => widget,
            FormEvent::TabSelected { tab_widget, .. } => tab_widget,
        }
    }
}

/// What an event translates to.
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    Field(FieldUpdate),
    Button(ButtonAction),
}

/// The host-facing signals of one form.
///
/// Emitting with nothing connected is logged and otherwise ignored. Panics in
/// connected slots are not caught.
#[derive(Debug, Default)]
pub struct FormBinding {
    /// `updateField`: user edits and default seeding.
    pub field_changed: Signal<FieldUpdate>,
    /// `dispatchButton`: button activations and file selections.
    pub button_dispatched: Signal<ButtonAction>,
    /// `onTabChanged`.
    pub tab_changed: Signal<TabChange>,
}

impl FormBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_field(&self, update: FieldUpdate) {
        let key = update.key.clone();
        if self.field_changed.emit(update) == 0 {
            tracing::debug!(target: "giswater_forms::binding", key = %key, "field update with no slot connected");
        }
    }

    pub fn dispatch_button(&self, action: ButtonAction) {
        let widget = action.widget.name().to_string();
        if self.button_dispatched.emit(action) == 0 {
            tracing::debug!(target: "giswater_forms::binding", widget = %widget, "button action with no slot connected");
        }
    }

    pub fn notify_tab_changed(&self, change: TabChange) {
        let widget = change.widget.name().to_string();
        if self.tab_changed.emit(change) == 0 {
            tracing::debug!(target: "giswater_forms::binding", widget = %widget, "tab change with no slot connected");
        }
    }

    pub fn send(&self, outgoing: Outgoing) {
        match outgoing {
            Outgoing::Field(update) => self.update_field(update),
            Outgoing::Button(action) => self.dispatch_button(action),
        }
    }
}

/// Translates a control event into what the host receives.
///
/// Returns `None` for events on unknown widgets, events that do not fit the
/// widget's class, radio buttons being unchecked, and tab selections (which
/// the form instance handles itself).
pub fn translate_event(
    document: &FormDocument,
    state: &ExternalState,
    event: &FormEvent,
) -> Option<Outgoing> {
    let Some(widget) = document.widget(event.widget()) else {
        tracing::debug!(
            target: "giswater_forms::binding",
            widget = event.widget(),
            "event for unknown widget"
        );
        return None;
    };
    let field = |value: Value| {
        Some(Outgoing::Field(FieldUpdate {
            widget: widget.clone(),
            key: widget.name().to_string(),
            value,
            action: None,
        }))
    };

    match (widget.kind(), event) {
        (
            WidgetKind::LineEdit
            | WidgetKind::TextEdit
            | WidgetKind::TextBrowser
            | WidgetKind::PlainTextEdit,
            FormEvent::TextChanged { text, .. },
        ) => field(Value::String(text.clone())),
        (WidgetKind::CheckBox, FormEvent::Toggled { checked, .. }) => {
            Some(Outgoing::Field(FieldUpdate {
                widget: widget.clone(),
                key: widget.name().to_string(),
                value: Value::Bool(*checked),
                action: parse_action(widget),
            }))
        }
        (WidgetKind::RadioButton, FormEvent::Toggled { checked, .. }) => {
            match button_group(widget) {
                Some(group) if *checked => Some(Outgoing::Field(FieldUpdate {
                    widget: widget.clone(),
                    key: group.to_string(),
                    value: Value::String(widget.name().to_string()),
                    action: parse_action(widget),
                })),
                Some(_) => None,
                None => Some(Outgoing::Field(FieldUpdate {
                    widget: widget.clone(),
                    key: widget.name().to_string(),
                    value: Value::Bool(*checked),
                    action: parse_action(widget),
                })),
            }
        }
        (WidgetKind::ComboBox, FormEvent::ComboSelected { value, .. }) => {
            field(Value::String(value.clone()))
        }
        (
            WidgetKind::SpinBox | WidgetKind::DoubleSpinBox | WidgetKind::Slider,
            FormEvent::NumberChanged { value, .. },
        ) => field(number_value(widget.kind(), *value)),
        (WidgetKind::DateEdit | WidgetKind::TimeEdit, FormEvent::DateChanged { value, .. }) => {
            field(Value::String(value.clone()))
        }
        (WidgetKind::DateTimeEdit, FormEvent::DateTimePartChanged { part, value, .. }) => {
            let current = state
                .value(widget.name())
                .and_then(crate::state::value_text)
                .unwrap_or_default();
            let (date, time) = split_date_time(&current);
            let combined = match part {
                DateTimePart::Date => combine_date_time(value, &time),
                DateTimePart::Time => combine_date_time(&date, value),
            };
            field(Value::String(combined))
        }
        (WidgetKind::PushButton, FormEvent::ButtonClicked { .. }) => {
            Some(Outgoing::Button(ButtonAction {
                payload: parse_widget_function(widget),
                widget: widget.clone(),
            }))
        }
        (WidgetKind::FileWidget, FormEvent::FileSelected { file, .. }) => {
            Some(Outgoing::Button(ButtonAction {
                payload: json!({"functionName": "upload_file", "file": file}),
                widget: widget.clone(),
            }))
        }
        (_, FormEvent::TabSelected { .. }) => None,
        (kind, event) => {
            tracing::debug!(
                target: "giswater_forms::binding",
                widget = widget.name(),
                class = %kind,
                ?event,
                "event does not apply to widget class"
            );
            None
        }
    }
}

/// The button group id of a radio button or check box, if any.
pub fn button_group(widget: &Widget) -> Option<&str> {
    widget
        .attribute_text("buttonGroup")
        .filter(|group| !group.is_empty())
}

/// Parses `property.action`; malformed JSON becomes `""`.
pub fn parse_action(widget: &Widget) -> Option<Value> {
    let text = widget.text_property("action")?;
    Some(parse_embedded_json(widget, "action", text))
}

/// Parses `property.widgetfunction`; absent is `null`, malformed is `""`.
pub fn parse_widget_function(widget: &Widget) -> Value {
    match widget.text_property("widgetfunction") {
        Some(text) => parse_embedded_json(widget, "widgetfunction", text),
        None => Value::Null,
    }
}

fn parse_embedded_json(widget: &Widget, property: &str, text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                target: "giswater_forms::binding",
                widget = widget.name(),
                property,
                %error,
                "malformed embedded JSON, using empty value"
            );
            Value::String(String::new())
        }
    }
}

/// Integer widgets report integers; fractional values stay floats.
pub(crate) fn number_value(kind: &WidgetKind, value: f64) -> Value {
    let integral = matches!(kind, WidgetKind::SpinBox | WidgetKind::Slider) || value.fract() == 0.0;
    if integral && value.is_finite() {
        json!(value.round() as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
