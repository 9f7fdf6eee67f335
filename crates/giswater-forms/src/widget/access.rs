//! Read-only and required flags.

use super::RenderOptions;
use crate::document::Widget;

/// Editability of a value-bearing widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Access {
    pub read_only: bool,
    pub required: bool,
}

impl Access {
    /// A widget is read-only when the host says so for the whole form or for
    /// this widget, or when it declares `readOnly` true or `enabled` false.
    /// Only editable widgets can be required.
    pub fn of(widget: &Widget, options: &RenderOptions) -> Self {
        let read_only = options.read_only
            || options.disabled.contains(widget.name())
            || widget.text_property("readOnly") == Some("true")
            || widget.text_property("enabled") == Some("false");
        Self {
            read_only,
            required: !read_only && widget.property_is_true("required"),
        }
    }
}
