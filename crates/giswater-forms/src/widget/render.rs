//! The widget renderer.

use std::collections::HashMap;
use std::sync::Arc;

use super::access::Access;
use super::combo_box::resolve_combo;
use super::date_time::{
    date_bound, format_qt_date, format_qt_date_time, format_qt_time, split_date_time,
};
use super::font::FontStyle;
use super::table::render_table;
use super::{
    ButtonView, CellContent, CellView, CheckView, ComboView, ContainerView, ControlView,
    DateTimeView, DateView, FilePickerView, GroupBoxView, LabelView, LayoutView, NumberView,
    RenderContext, RuleOrientation, RuleView, TabView, TabsView, TextView, TimeView, UiElement,
};
use crate::binding::{button_group, parse_action, parse_widget_function};
use crate::document::{Layout, LayoutContent, Widget, WidgetKind};
use crate::layout::compute_layout;
use crate::state::{value_is_checked, value_number, value_text};

/// Renders widgets of one document against one context.
///
/// Rendering is a pure function of the widget, the context and the active
/// tabs; it can run any number of times.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    context: &'a RenderContext,
    active_tabs: &'a HashMap<String, String>,
}

impl<'a> Renderer<'a> {
    pub fn new(context: &'a RenderContext, active_tabs: &'a HashMap<String, String>) -> Self {
        Self {
            context,
            active_tabs,
        }
    }

    /// Renders a widget, or `None` when it contributes no UI.
    pub fn render_widget(&self, widget: &Arc<Widget>) -> Option<UiElement> {
        if self.context.state.is_hidden(widget.name()) {
            return None;
        }
        let style = FontStyle::of(widget, self.context.config.base_point_size);

        let element = match widget.kind() {
            WidgetKind::Label => UiElement::Label(LabelView {
                name: widget.name().to_string(),
                text: widget.text_property("text").unwrap_or_default().to_string(),
                style,
            }),
            WidgetKind::Line => UiElement::Rule(RuleView {
                name: widget.name().to_string(),
                orientation: match widget.text_property("orientation") {
                    Some(orientation) if orientation.contains("Vertical") => {
                        RuleOrientation::Vertical
                    }
                    _ => RuleOrientation::Horizontal,
                },
            }),
            WidgetKind::Frame | WidgetKind::Widget => UiElement::Container(ContainerView {
                name: widget.name().to_string(),
                layout: self.container_layout(widget),
                style,
            }),
            WidgetKind::GroupBox => UiElement::GroupBox(GroupBoxView {
                name: widget.name().to_string(),
                title: widget.text_property("title").unwrap_or_default().to_string(),
                layout: self.container_layout(widget),
                style,
            }),
            WidgetKind::TabWidget => UiElement::Tabs(self.render_tabs(widget)),
            WidgetKind::LineEdit
            | WidgetKind::TextEdit
            | WidgetKind::TextBrowser
            | WidgetKind::PlainTextEdit => UiElement::Text(TextView {
                value: self.text_value(widget).unwrap_or_default(),
                multiline: widget.kind().is_multiline_text(),
                control: self.control(widget, widget.name(), style),
            }),
            WidgetKind::CheckBox | WidgetKind::RadioButton => self.render_check(widget, style),
            WidgetKind::ComboBox => {
                let (options, selected) = resolve_combo(
                    widget,
                    &self.context.state,
                    self.context.combo_placeholder(),
                );
                UiElement::Combo(ComboView {
                    control: self.control(widget, widget.name(), style),
                    options,
                    selected,
                })
            }
            WidgetKind::SpinBox | WidgetKind::DoubleSpinBox | WidgetKind::Slider => {
                UiElement::Number(NumberView {
                    value: self.number_value(widget),
                    min: widget.number_property("minimum"),
                    max: widget.number_property("maximum"),
                    step: widget.number_property("singleStep").unwrap_or(1.0),
                    slider: *widget.kind() == WidgetKind::Slider,
                    control: self.control(widget, widget.name(), style),
                })
            }
            WidgetKind::DateEdit => {
                let (min, max) = self.date_bounds(widget);
                UiElement::Date(DateView {
                    value: self.date_value(widget).unwrap_or_default(),
                    min,
                    max,
                    control: self.control(widget, widget.name(), style),
                })
            }
            WidgetKind::TimeEdit => UiElement::Time(TimeView {
                value: self.time_value(widget).unwrap_or_default(),
                control: self.control(widget, widget.name(), style),
            }),
            WidgetKind::DateTimeEdit => {
                let (min, max) = self.date_bounds(widget);
                let combined = self.date_time_value(widget).unwrap_or_default();
                let (date, time) = split_date_time(&combined);
                let control = self.control(widget, widget.name(), style);
                UiElement::DateTime(DateTimeView {
                    time_enabled: !date.is_empty() && !control.read_only,
                    date,
                    time,
                    min,
                    max,
                    control,
                })
            }
            WidgetKind::TableWidget | WidgetKind::TableView => UiElement::Table(render_table(
                widget.name(),
                &self.context.tables,
                &self.context.config.strings,
                *widget.kind() == WidgetKind::TableView && self.context.options.image_thumbnails,
            )?),
            WidgetKind::PushButton => UiElement::Button(ButtonView {
                text: widget.text_property("text").unwrap_or_default().to_string(),
                payload: parse_widget_function(widget),
                control: self.control(widget, widget.name(), style),
            }),
            WidgetKind::FileWidget => UiElement::FilePicker(FilePickerView {
                control: self.control(widget, widget.name(), style),
            }),
            WidgetKind::Unknown(class) => {
                tracing::debug!(
                    target: "giswater_forms::render",
                    widget = widget.name(),
                    class = %class,
                    "unknown widget class, rendering nothing"
                );
                return None;
            }
        };
        Some(element)
    }

    /// Renders a layout, or `None` for an unrecognized layout class.
    ///
    /// A hidden layout is still fully built.
    pub fn render_layout(&self, layout: &Layout, hidden: bool) -> Option<LayoutView> {
        let plan = compute_layout(layout)?;
        let cells = plan
            .placements
            .iter()
            .filter_map(|placement| {
                let item = layout.items().get(placement.item)?;
                let content = match item.content() {
                    LayoutContent::Widget(widget) => {
                        CellContent::Widget(self.render_widget(widget)?)
                    }
                    LayoutContent::Layout(inner) => {
                        CellContent::Layout(self.render_layout(inner, false)?)
                    }
                };
                Some(CellView {
                    placement: *placement,
                    content,
                })
            })
            .collect();

        Some(LayoutView {
            name: layout.name().to_string(),
            class: layout.kind().clone(),
            tracks: plan.tracks,
            cells,
            hidden,
        })
    }

    fn container_layout(&self, widget: &Widget) -> Option<LayoutView> {
        let hidden = widget.text_property("visible") == Some("false");
        self.render_layout(widget.layout()?, hidden)
    }

    fn render_tabs(&self, widget: &Widget) -> TabsView {
        let pages: Vec<&Arc<Widget>> = widget
            .widgets()
            .iter()
            .filter(|page| !self.context.state.is_hidden(page.name()))
            .collect();
        let active = self
            .active_tabs
            .get(widget.name())
            .filter(|name| pages.iter().any(|page| page.name() == name.as_str()))
            .cloned()
            .or_else(|| pages.first().map(|page| page.name().to_string()))
            .unwrap_or_default();

        let tabs = pages
            .into_iter()
            .map(|page| {
                let is_active = page.name() == active;
                TabView {
                    name: page.name().to_string(),
                    title: page.attribute_text("title").unwrap_or_default().to_string(),
                    active: is_active,
                    layout: page
                        .layout()
                        .and_then(|layout| self.render_layout(layout, !is_active)),
                }
            })
            .collect();

        TabsView {
            name: widget.name().to_string(),
            active,
            tabs,
        }
    }

    fn render_check(&self, widget: &Widget, style: FontStyle) -> UiElement {
        let radio = *widget.kind() == WidgetKind::RadioButton;
        let group = button_group(widget).map(str::to_string);
        let declared_checked = matches!(widget.text_property("checked"), Some("true" | "True"));

        let (key, checked) = match (&group, radio) {
            (Some(group), true) => {
                let checked = match self.context.state.value(group) {
                    Some(value) => value_text(value).as_deref() == Some(widget.name()),
                    None => declared_checked,
                };
                (group.as_str(), checked)
            }
            _ => {
                let checked = match self.context.state.value(widget.name()) {
                    Some(value) => value_is_checked(value),
                    None => declared_checked,
                };
                (widget.name(), checked)
            }
        };

        UiElement::Check(CheckView {
            control: self.control(widget, key, style),
            radio,
            group,
            checked,
            action: parse_action(widget),
        })
    }

    fn control(&self, widget: &Widget, key: &str, style: FontStyle) -> ControlView {
        let access = Access::of(widget, &self.context.options);
        ControlView {
            name: widget.name().to_string(),
            key: key.to_string(),
            input_name: self.context.options.input_name(key),
            class: widget.kind().clone(),
            read_only: access.read_only,
            required: access.required,
            style,
        }
    }

    fn external_text(&self, widget: &Widget) -> Option<String> {
        self.context.state.value(widget.name()).and_then(value_text)
    }

    fn text_value(&self, widget: &Widget) -> Option<String> {
        self.external_text(widget)
            .or_else(|| widget.text_property("text").map(str::to_string))
    }

    fn number_value(&self, widget: &Widget) -> Option<f64> {
        match self.context.state.value(widget.name()) {
            Some(value) => value_number(value),
            None => widget.number_property("value"),
        }
    }

    fn date_value(&self, widget: &Widget) -> Option<String> {
        self.external_text(widget)
            .or_else(|| widget.property("date").and_then(format_qt_date))
    }

    fn time_value(&self, widget: &Widget) -> Option<String> {
        self.external_text(widget)
            .or_else(|| widget.property("time").and_then(format_qt_time))
    }

    fn date_time_value(&self, widget: &Widget) -> Option<String> {
        self.external_text(widget)
            .or_else(|| widget.property("dateTime").and_then(format_qt_date_time))
    }

    fn date_bounds(&self, widget: &Widget) -> (String, String) {
        let bounds = &self.context.config.date_bounds;
        (
            date_bound(widget.property("minimumDate"), &bounds.min, widget.name()),
            date_bound(widget.property("maximumDate"), &bounds.max, widget.name()),
        )
    }
}
