//! Widget rendering.
//!
//! The renderer maps a normalized widget plus the current external state to
//! a [`UiElement`], a framework-neutral description of the control to show.
//! Hosts turn elements into real UI; the engine stops at this tree.
//!
//! # Element kinds
//!
//! | Qt class | element |
//! |---|---|
//! | `QLabel` | [`UiElement::Label`] |
//! | `Line` | [`UiElement::Rule`] |
//! | `QFrame`, `QWidget` | [`UiElement::Container`] |
//! | `QGroupBox` | [`UiElement::GroupBox`] |
//! | `QTabWidget` | [`UiElement::Tabs`] |
//! | `QLineEdit`, `QTextEdit`, `QTextBrowser`, `QPlainTextEdit` | [`UiElement::Text`] |
//! | `QCheckBox`, `QRadioButton` | [`UiElement::Check`] |
//! | `QComboBox` | [`UiElement::Combo`] |
//! | `QSpinBox`, `QDoubleSpinBox`, `QSlider` | [`UiElement::Number`] |
//! | `QDateEdit` | [`UiElement::Date`] |
//! | `QTimeEdit` | [`UiElement::Time`] |
//! | `QDateTimeEdit` | [`UiElement::DateTime`] |
//! | `QTableWidget`, `QTableView` | [`UiElement::Table`] |
//! | `QPushButton` | [`UiElement::Button`] |
//! | `QgsFileWidget` | [`UiElement::FilePicker`] |
//!
//! Any other class renders nothing.
//!
//! # Visibility
//!
//! A widget whose external entry has `visible: false` is not rendered at all.
//! Layouts are different: a hidden layout (inactive tab page, container with
//! `visible` set to false) is still built and only flagged `hidden`, so the
//! controls inside keep their state.

mod access;
mod combo_box;
mod date_time;
mod font;
mod render;
mod table;

pub use access::Access;
pub use combo_box::{resolve_combo, ComboOption};
pub use date_time::{
    combine_date_time, format_qt_date, format_qt_date_time, format_qt_time, split_date_time,
};
pub use font::FontStyle;
pub use render::Renderer;
pub use table::{image_pattern, CellValue};

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::FormConfig;
use crate::document::{LayoutKind, WidgetKind};
use crate::i18n::Translator;
use crate::layout::{Placement, TrackSize};
use crate::state::{ExternalState, TableStore};

/// Maps a widget name to the input name the host sees.
pub type NameTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Host-level rendering switches.
#[derive(Clone, Default)]
pub struct RenderOptions {
    /// Render every value-bearing widget read-only.
    pub read_only: bool,
    /// Widgets rendered read-only by name.
    pub disabled: HashSet<String>,
    /// Applied to widget names to build input names.
    pub name_transform: Option<NameTransform>,
    /// Show image URLs in `QTableView` cells as thumbnails.
    pub image_thumbnails: bool,
}

impl RenderOptions {
    /// The input name of a widget.
    pub fn input_name(&self, name: &str) -> String {
        match &self.name_transform {
            Some(transform) => transform(name),
            None => name.to_string(),
        }
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("read_only", &self.read_only)
            .field("disabled", &self.disabled)
            .field("name_transform", &self.name_transform.is_some())
            .field("image_thumbnails", &self.image_thumbnails)
            .finish()
    }
}

/// Everything a render reads besides the document.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub state: ExternalState,
    pub tables: TableStore,
    pub options: RenderOptions,
    pub config: FormConfig,
    pub translator: Translator,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ExternalState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Translated label of the injected empty combo box option.
    pub fn combo_placeholder(&self) -> &str {
        self.translator.tr(&self.config.strings.combo_placeholder_id)
    }
}

/// Fields shared by every value-bearing control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlView {
    /// The widget name.
    pub name: String,
    /// The external-state key the control binds to.
    pub key: String,
    /// The (possibly transformed) input name.
    pub input_name: String,
    pub class: WidgetKind,
    pub read_only: bool,
    pub required: bool,
    pub style: FontStyle,
}

/// A rendered widget.
#[derive(Debug, Clone, PartialEq)]
pub enum UiElement {
    Label(LabelView),
    Rule(RuleView),
    Container(ContainerView),
    GroupBox(GroupBoxView),
    Tabs(TabsView),
    Text(TextView),
    Check(CheckView),
    Combo(ComboView),
    Number(NumberView),
    Date(DateView),
    Time(TimeView),
    DateTime(DateTimeView),
    Table(TableView),
    Button(ButtonView),
    FilePicker(FilePickerView),
}

impl UiElement {
    /// The name of the widget this element was rendered from.
    pub fn name(&self) -> &str {
        match self {
            UiElement::Label(view) => &view.name,
            UiElement::Rule(view) => &view.name,
            UiElement::Container(view) => &view.name,
            UiElement::GroupBox(view) => &view.name,
            UiElement::Tabs(view) => &view.name,
            UiElement::Text(view) => &view.control.name,
            UiElement::Check(view) => &view.control.name,
            UiElement::Combo(view) => &view.control.name,
            UiElement::Number(view) => &view.control.name,
            UiElement::Date(view) => &view.control.name,
            UiElement::Time(view) => &view.control.name,
            UiElement::DateTime(view) => &view.control.name,
            UiElement::Table(view) => &view.name,
            UiElement::Button(view) => &view.control.name,
            UiElement::FilePicker(view) => &view.control.name,
        }
    }

    /// Finds an element by widget name, searching nested layouts and tabs.
    pub fn find(&self, name: &str) -> Option<&UiElement> {
        if self.name() == name {
            return Some(self);
        }
        match self {
            UiElement::Container(view) => view.layout.as_ref()?.find(name),
            UiElement::GroupBox(view) => view.layout.as_ref()?.find(name),
            UiElement::Tabs(view) => view
                .tabs
                .iter()
                .filter_map(|tab| tab.layout.as_ref())
                .find_map(|layout| layout.find(name)),
            _ => None,
        }
    }
}

/// A rendered layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutView {
    pub name: String,
    pub class: LayoutKind,
    pub tracks: Vec<TrackSize>,
    /// Cells in rendering order. Items that render nothing are left out.
    pub cells: Vec<CellView>,
    /// Built but not displayed.
    pub hidden: bool,
}

impl LayoutView {
    /// The `grid-template-columns` value of this layout.
    pub fn template_columns(&self) -> String {
        crate::layout::template_columns(&self.tracks)
    }

    /// Finds an element by widget name.
    pub fn find(&self, name: &str) -> Option<&UiElement> {
        self.cells.iter().find_map(|cell| match &cell.content {
            CellContent::Widget(element) => element.find(name),
            CellContent::Layout(layout) => layout.find(name),
        })
    }
}

/// One placed layout item.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub placement: Placement,
    pub content: CellContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Widget(UiElement),
    Layout(LayoutView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelView {
    pub name: String,
    pub text: String,
    pub style: FontStyle,
}

/// Orientation of a `Line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleView {
    pub name: String,
    pub orientation: RuleOrientation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerView {
    pub name: String,
    pub layout: Option<LayoutView>,
    pub style: FontStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBoxView {
    pub name: String,
    pub title: String,
    pub layout: Option<LayoutView>,
    pub style: FontStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabsView {
    pub name: String,
    /// Name of the active page.
    pub active: String,
    pub tabs: Vec<TabView>,
}

/// One tab page. Inactive pages are built with a hidden layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TabView {
    pub name: String,
    pub title: String,
    pub active: bool,
    pub layout: Option<LayoutView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextView {
    pub control: ControlView,
    pub value: String,
    pub multiline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckView {
    pub control: ControlView,
    pub radio: bool,
    /// Button group id of grouped radio buttons and check boxes.
    pub group: Option<String>,
    pub checked: bool,
    /// Parsed `property.action`, forwarded with changes.
    pub action: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComboView {
    pub control: ControlView,
    pub options: Vec<ComboOption>,
    /// Value of the selected option.
    pub selected: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberView {
    pub control: ControlView,
    pub value: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
    /// Rendered as a range control rather than numeric entry.
    pub slider: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateView {
    pub control: ControlView,
    pub value: String,
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeView {
    pub control: ControlView,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeView {
    pub control: ControlView,
    pub date: String,
    pub time: String,
    /// The time part is only editable once a date is chosen.
    pub time_enabled: bool,
    pub min: String,
    pub max: String,
}

impl DateTimeView {
    /// The combined value.
    pub fn value(&self) -> String {
        combine_date_time(&self.date, &self.time)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    /// Placeholder text shown instead of rows.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView {
    pub control: ControlView,
    pub text: String,
    /// Parsed `property.widgetfunction`.
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilePickerView {
    pub control: ControlView,
}
