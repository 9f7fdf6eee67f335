//! Normalized form documents.
//!
//! A [`FormDocument`] is produced once per XML input by [`normalize`] and
//! replaced wholesale when the input changes. It owns the widget tree and two
//! lookup tables:
//!
//! - `fields`: every widget by its (declared or synthetic) name
//! - `external_fields`: widgets whose values come from outside the tree,
//!   empty after parsing and filled by callers
//!
//! Widgets are shared as `Arc<Widget>` so the tree and the lookup tables point
//! at the same nodes.

pub mod debug;
mod kind;
mod node;
mod normalize;

use std::collections::HashMap;
use std::sync::Arc;

pub use kind::{LayoutKind, WidgetKind};
pub use node::{
    parse_qt_bool, ComboItem, Layout, LayoutContent, LayoutItem, PropertyMap, PropertyValue,
    Widget,
};
pub use normalize::{normalize, Normalizer};

use giswater_forms_core::FormResult;

/// A parsed and normalized Qt Designer form.
#[derive(Debug, Clone)]
pub struct FormDocument {
    pub(crate) root: Arc<Widget>,
    pub(crate) fields: HashMap<String, Arc<Widget>>,
    pub(crate) external_fields: HashMap<String, Arc<Widget>>,
}

impl FormDocument {
    /// Parses and normalizes a `.ui` document.
    ///
    /// This is the synchronous path. [`FormInstance`](crate::FormInstance)
    /// runs it through a [`ParseRequest`](crate::ParseRequest) so stale
    /// results can be dropped.
    pub fn parse(xml: &str) -> FormResult<Self> {
        let raw = crate::xml::parse_ui(xml)?;
        Ok(normalize(&raw))
    }

    /// The root widget.
    pub fn root(&self) -> &Arc<Widget> {
        &self.root
    }

    /// All widgets by name.
    pub fn fields(&self) -> &HashMap<String, Arc<Widget>> {
        &self.fields
    }

    /// Looks up a widget by name.
    pub fn widget(&self, name: &str) -> Option<&Arc<Widget>> {
        self.fields.get(name)
    }

    /// Widgets registered as externally valued.
    pub fn external_fields(&self) -> &HashMap<String, Arc<Widget>> {
        &self.external_fields
    }

    /// Registers a widget whose value is supplied from outside the tree.
    pub fn register_external_field(&mut self, name: impl Into<String>, widget: Arc<Widget>) {
        self.external_fields.insert(name.into(), widget);
    }

    /// Returns the first widget of the given kind in pre-order.
    ///
    /// Used for lookups like "the one table of this form".
    pub fn find_first(&self, kind: &WidgetKind) -> Option<&Arc<Widget>> {
        self.walk().into_iter().find(|widget| widget.kind() == kind)
    }

    /// All widgets of the tree in pre-order: a widget, then its layout, then
    /// its child widgets.
    pub fn walk(&self) -> Vec<&Arc<Widget>> {
        let mut out = Vec::with_capacity(self.fields.len());
        walk_widget(&self.root, &mut out);
        out
    }
}

fn walk_widget<'a>(widget: &'a Arc<Widget>, out: &mut Vec<&'a Arc<Widget>>) {
    out.push(widget);
    if let Some(layout) = widget.layout() {
        walk_layout(layout, out);
    }
    for child in widget.widgets() {
        walk_widget(child, out);
    }
}

fn walk_layout<'a>(layout: &'a Layout, out: &mut Vec<&'a Arc<Widget>>) {
    for item in layout.items() {
        match item.content() {
            LayoutContent::Widget(widget) => walk_widget(widget, out),
            LayoutContent::Layout(inner) => walk_layout(inner, out),
        }
    }
}
