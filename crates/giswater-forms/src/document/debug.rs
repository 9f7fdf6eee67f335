//! Text dumps of a normalized form tree.
//!
//! ```ignore
//! use giswater_forms::document::debug::{DocumentTree, TreeFormatOptions};
//!
//! let doc = FormDocument::parse(xml)?;
//! println!("{}", DocumentTree::new(&doc));
//! ```
//!
//! Output for a small form in the default style:
//!
//! ```text
//! form (QWidget)
//! └── [QVBoxLayout :layout_0]
//!     ├── lbl_code (QLabel)
//!     └── txt_code (QLineEdit)
//! ```

use std::fmt::{self, Write};

use super::{FormDocument, Layout, LayoutContent, Widget};

/// Style of the branch characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Indentation only.
    Compact,
}

/// Configuration for tree dumps.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Print the Qt class after each widget name.
    pub show_classes: bool,
    /// Print property names under each widget.
    pub show_properties: bool,
    /// Include layout nodes as their own lines.
    pub show_layouts: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_classes: true,
            show_properties: false,
            show_layouts: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed output.
    pub fn detailed() -> Self {
        Self {
            show_properties: true,
            ..Default::default()
        }
    }

    /// Names only.
    pub fn minimal() -> Self {
        Self {
            show_classes: false,
            show_layouts: false,
            ..Default::default()
        }
    }
}

/// Displays a form document as an indented tree.
#[derive(Debug, Clone)]
pub struct DocumentTree<'a> {
    document: &'a FormDocument,
    options: TreeFormatOptions,
}

impl<'a> DocumentTree<'a> {
    pub fn new(document: &'a FormDocument) -> Self {
        Self::with_options(document, TreeFormatOptions::default())
    }

    pub fn with_options(document: &'a FormDocument, options: TreeFormatOptions) -> Self {
        Self { document, options }
    }

    fn write_widget(
        &self,
        f: &mut impl Write,
        widget: &Widget,
        prefix: &str,
        connector: &str,
        depth: usize,
    ) -> fmt::Result {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        write!(f, "{prefix}{connector}{}", widget.name())?;
        if self.options.show_classes {
            write!(f, " ({})", widget.class_name())?;
        }
        f.write_char('\n')?;

        let child_prefix = self.child_prefix(prefix, connector);
        if self.options.show_properties {
            for key in widget.properties().keys() {
                writeln!(f, "{child_prefix}  .{key}")?;
            }
        }

        let mut children: Vec<Child<'_>> = Vec::new();
        if let Some(layout) = widget.layout() {
            children.push(Child::Layout(layout));
        }
        children.extend(widget.widgets().iter().map(|w| Child::Widget(w)));
        self.write_children(f, &children, &child_prefix, depth + 1)
    }

    fn write_layout(
        &self,
        f: &mut impl Write,
        layout: &Layout,
        prefix: &str,
        connector: &str,
        depth: usize,
    ) -> fmt::Result {
        let children: Vec<Child<'_>> = layout
            .items()
            .iter()
            .map(|item| match item.content() {
                LayoutContent::Widget(widget) => Child::Widget(widget),
                LayoutContent::Layout(inner) => Child::Layout(inner),
            })
            .collect();

        if !self.options.show_layouts {
            return self.write_children(f, &children, prefix, depth);
        }
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        writeln!(f, "{prefix}{connector}[{} {}]", layout.kind(), layout.name())?;
        let child_prefix = self.child_prefix(prefix, connector);
        self.write_children(f, &children, &child_prefix, depth + 1)
    }

    fn write_children(
        &self,
        f: &mut impl Write,
        children: &[Child<'_>],
        prefix: &str,
        depth: usize,
    ) -> fmt::Result {
        let count = children.len();
        for (i, child) in children.iter().enumerate() {
            let connector = self.connector(i + 1 == count);
            match child {
                Child::Widget(widget) => self.write_widget(f, widget, prefix, connector, depth)?,
                Child::Layout(layout) => self.write_layout(f, layout, prefix, connector, depth)?,
            }
        }
        Ok(())
    }

    fn connector(&self, is_last: bool) -> &'static str {
        match (self.options.style, is_last) {
            (TreeStyle::Ascii, false) => "+-- ",
            (TreeStyle::Ascii, true) => "`-- ",
            (TreeStyle::Unicode, false) => "\u{251c}\u{2500}\u{2500} ",
            (TreeStyle::Unicode, true) => "\u{2514}\u{2500}\u{2500} ",
            (TreeStyle::Compact, _) => "- ",
        }
    }

    fn child_prefix(&self, prefix: &str, connector: &str) -> String {
        if connector.is_empty() {
            return prefix.to_string();
        }
        let continuation = match self.options.style {
            TreeStyle::Ascii if connector.starts_with('+') => "|   ",
            TreeStyle::Unicode if connector.starts_with('\u{251c}') => "\u{2502}   ",
            TreeStyle::Compact => "  ",
            _ => "    ",
        };
        format!("{prefix}{continuation}")
    }
}

enum Child<'a> {
    Widget(&'a Widget),
    Layout(&'a Layout),
}

impl fmt::Display for DocumentTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_widget(f, self.document.root(), "", "", 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"<ui><widget class="QWidget" name="form">
        <layout class="QVBoxLayout">
            <item><widget class="QLabel" name="lbl_code">
                <property name="text"><string>Code</string></property>
            </widget></item>
            <item><widget class="QLineEdit" name="txt_code"/></item>
        </layout>
    </widget></ui>"#;

    #[test]
    fn test_default_dump() {
        let doc = FormDocument::parse(FORM).unwrap();
        let dump = DocumentTree::new(&doc).to_string();
        let expected = "form (QWidget)\n\
                        └── [QVBoxLayout :layout_0]\n    \
                        ├── lbl_code (QLabel)\n    \
                        └── txt_code (QLineEdit)\n";
        assert_eq!(dump, expected);
    }

    #[test]
    fn test_minimal_dump() {
        let doc = FormDocument::parse(FORM).unwrap();
        let dump = DocumentTree::with_options(&doc, TreeFormatOptions::minimal()).to_string();
        assert_eq!(dump, "form\n├── lbl_code\n└── txt_code\n");
    }

    #[test]
    fn test_detailed_dump_lists_properties() {
        let doc = FormDocument::parse(FORM).unwrap();
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::detailed()
        };
        let dump = DocumentTree::with_options(&doc, options).to_string();
        assert!(dump.contains("+-- lbl_code (QLabel)"));
        assert!(dump.contains(".text"));
    }

    #[test]
    fn test_max_depth() {
        let doc = FormDocument::parse(FORM).unwrap();
        let options = TreeFormatOptions {
            max_depth: Some(0),
            ..Default::default()
        };
        let dump = DocumentTree::with_options(&doc, options).to_string();
        assert_eq!(dump, "form (QWidget)\n");
    }
}
