//! Widget and layout classes.
//!
//! Qt Designer identifies widgets and layouts by class name. The engine knows
//! a fixed set of classes; anything else is kept as `Unknown` with its raw
//! class so it can be reported, and renders to nothing.

use std::fmt;

/// The class of a form widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Label,
    Line,
    Frame,
    Widget,
    GroupBox,
    TabWidget,
    LineEdit,
    TextEdit,
    TextBrowser,
    PlainTextEdit,
    CheckBox,
    RadioButton,
    ComboBox,
    SpinBox,
    DoubleSpinBox,
    Slider,
    DateEdit,
    TimeEdit,
    DateTimeEdit,
    TableWidget,
    TableView,
    PushButton,
    /// QGIS file selection widget.
    FileWidget,
    /// Any class the engine does not render.
    Unknown(String),
}

impl WidgetKind {
    /// Maps a Qt class name to a widget kind.
    pub fn from_class(class: &str) -> Self {
        match class {
            "QLabel" => Self::Label,
            "Line" => Self::Line,
            "QFrame" => Self::Frame,
            "QWidget" => Self::Widget,
            "QGroupBox" => Self::GroupBox,
            "QTabWidget" => Self::TabWidget,
            "QLineEdit" => Self::LineEdit,
            "QTextEdit" => Self::TextEdit,
            "QTextBrowser" => Self::TextBrowser,
            "QPlainTextEdit" => Self::PlainTextEdit,
            "QCheckBox" => Self::CheckBox,
            "QRadioButton" => Self::RadioButton,
            "QComboBox" => Self::ComboBox,
            "QSpinBox" => Self::SpinBox,
            "QDoubleSpinBox" => Self::DoubleSpinBox,
            "QSlider" => Self::Slider,
            "QDateEdit" => Self::DateEdit,
            "QTimeEdit" => Self::TimeEdit,
            "QDateTimeEdit" => Self::DateTimeEdit,
            "QTableWidget" => Self::TableWidget,
            "QTableView" => Self::TableView,
            "QPushButton" => Self::PushButton,
            "QgsFileWidget" => Self::FileWidget,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the Qt class name.
    pub fn class_name(&self) -> &str {
        match self {
            Self::Label => "QLabel",
            Self::Line => "Line",
            Self::Frame => "QFrame",
            Self::Widget => "QWidget",
            Self::GroupBox => "QGroupBox",
            Self::TabWidget => "QTabWidget",
            Self::LineEdit => "QLineEdit",
            Self::TextEdit => "QTextEdit",
            Self::TextBrowser => "QTextBrowser",
            Self::PlainTextEdit => "QPlainTextEdit",
            Self::CheckBox => "QCheckBox",
            Self::RadioButton => "QRadioButton",
            Self::ComboBox => "QComboBox",
            Self::SpinBox => "QSpinBox",
            Self::DoubleSpinBox => "QDoubleSpinBox",
            Self::Slider => "QSlider",
            Self::DateEdit => "QDateEdit",
            Self::TimeEdit => "QTimeEdit",
            Self::DateTimeEdit => "QDateTimeEdit",
            Self::TableWidget => "QTableWidget",
            Self::TableView => "QTableView",
            Self::PushButton => "QPushButton",
            Self::FileWidget => "QgsFileWidget",
            Self::Unknown(class) => class,
        }
    }

    /// Returns true for widgets that hold a value bound to external state.
    pub fn is_value_bearing(&self) -> bool {
        matches!(
            self,
            Self::LineEdit
                | Self::TextEdit
                | Self::TextBrowser
                | Self::PlainTextEdit
                | Self::CheckBox
                | Self::RadioButton
                | Self::ComboBox
                | Self::SpinBox
                | Self::DoubleSpinBox
                | Self::Slider
                | Self::DateEdit
                | Self::TimeEdit
                | Self::DateTimeEdit
        )
    }

    /// Returns true for widgets whose width is set by their content.
    ///
    /// Grid columns holding only such widgets are sized to fit content.
    pub fn has_intrinsic_width(&self) -> bool {
        matches!(
            self,
            Self::Label | Self::CheckBox | Self::RadioButton | Self::Line
        )
    }

    /// Returns true for multi-line text widgets.
    pub fn is_multiline_text(&self) -> bool {
        matches!(self, Self::TextEdit | Self::TextBrowser | Self::PlainTextEdit)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// The class of a form layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Grid,
    Form,
    VBox,
    HBox,
    Unknown(String),
}

impl LayoutKind {
    /// Maps a Qt class name to a layout kind.
    pub fn from_class(class: &str) -> Self {
        match class {
            "QGridLayout" => Self::Grid,
            "QFormLayout" => Self::Form,
            "QVBoxLayout" => Self::VBox,
            "QHBoxLayout" => Self::HBox,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the Qt class name.
    pub fn class_name(&self) -> &str {
        match self {
            Self::Grid => "QGridLayout",
            Self::Form => "QFormLayout",
            Self::VBox => "QVBoxLayout",
            Self::HBox => "QHBoxLayout",
            Self::Unknown(class) => class,
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_round_trip() {
        for class in ["QLabel", "QComboBox", "QDateTimeEdit", "QgsFileWidget", "Line"] {
            assert_eq!(WidgetKind::from_class(class).class_name(), class);
        }
        for class in ["QGridLayout", "QFormLayout", "QVBoxLayout", "QHBoxLayout"] {
            assert_eq!(LayoutKind::from_class(class).class_name(), class);
        }
    }

    #[test]
    fn test_unknown_keeps_raw_class() {
        let kind = WidgetKind::from_class("QCustomWidget123");
        assert_eq!(kind, WidgetKind::Unknown("QCustomWidget123".to_string()));
        assert_eq!(kind.to_string(), "QCustomWidget123");
        assert!(!kind.is_value_bearing());
    }

    #[test]
    fn test_intrinsic_width_classes() {
        assert!(WidgetKind::Label.has_intrinsic_width());
        assert!(WidgetKind::Line.has_intrinsic_width());
        assert!(!WidgetKind::LineEdit.has_intrinsic_width());
        assert!(!WidgetKind::ComboBox.has_intrinsic_width());
    }
}
