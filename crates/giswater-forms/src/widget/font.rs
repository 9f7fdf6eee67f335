//! Font-derived presentation.

use crate::document::{parse_qt_bool, PropertyValue, Widget};

/// Presentational style derived from a widget's `font` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
    /// Relative size in percent.
    pub size_percent: u32,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            size_percent: 100,
        }
    }
}

impl FontStyle {
    /// Reads the `font` property of a widget.
    ///
    /// `base_point_size` is the point size that maps to 100%.
    pub fn of(widget: &Widget, base_point_size: u32) -> Self {
        widget
            .property("font")
            .map(|font| Self::from_font(font, base_point_size))
            .unwrap_or_default()
    }

    /// Reads a Qt `<font>` struct.
    pub fn from_font(font: &PropertyValue, base_point_size: u32) -> Self {
        let flag = |key: &str| font.field_text(key).and_then(parse_qt_bool).unwrap_or(false);
        let weight_bold = font.field_i64("weight").is_some_and(|weight| weight >= 75);
        let size_percent = match font.field_i64("pointsize") {
            Some(points) if points > 0 && base_point_size > 0 => {
                let percent = (points as u64).saturating_mul(100) / base_point_size as u64;
                u32::try_from(percent).unwrap_or(u32::MAX)
            }
            _ => 100,
        };
        Self {
            bold: flag("bold") || weight_bold,
            italic: flag("italic"),
            underline: flag("underline"),
            strikeout: flag("strikeout"),
            size_percent,
        }
    }

    /// Returns true for normal weight and style at 100%.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Renders the style as inline CSS declarations.
    pub fn to_css(&self) -> String {
        let mut declarations = Vec::new();
        if self.bold {
            declarations.push("font-weight: bold".to_string());
        }
        if self.italic {
            declarations.push("font-style: italic".to_string());
        }
        let decorations: Vec<&str> = [
            (self.underline, "underline"),
            (self.strikeout, "line-through"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
        if !decorations.is_empty() {
            declarations.push(format!("text-decoration: {}", decorations.join(" ")));
        }
        if self.size_percent != 100 {
            declarations.push(format!("font-size: {}%", self.size_percent));
        }
        declarations.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FormDocument;

    fn label_style(font: &str) -> FontStyle {
        let xml = format!(
            r#"<ui><widget class="QLabel" name="lbl"><property name="font"><font>{font}</font></property></widget></ui>"#
        );
        FontStyle::of(FormDocument::parse(&xml).unwrap().root(), 8)
    }

    #[test]
    fn test_no_font_is_plain() {
        let doc = FormDocument::parse(r#"<ui><widget class="QLabel" name="lbl"/></ui>"#).unwrap();
        let style = FontStyle::of(doc.root(), 8);
        assert!(style.is_plain());
        assert_eq!(style.size_percent, 100);
        assert_eq!(style.to_css(), "");
    }

    #[test]
    fn test_huge_point_size_saturates() {
        let style = label_style("<pointsize>999999999999999999</pointsize>");
        assert_eq!(style.size_percent, u32::MAX);

        let style = label_style("<pointsize>100000000</pointsize>");
        assert_eq!(style.size_percent, 1_250_000_000);
    }

    #[test]
    fn test_font_flags_and_size() {
        let style = label_style(
            "<pointsize>12</pointsize><italic>true</italic><underline>true</underline><strikeout>true</strikeout>",
        );
        assert!(!style.bold);
        assert!(style.italic);
        assert_eq!(style.size_percent, 150);
        assert_eq!(
            style.to_css(),
            "font-style: italic; text-decoration: underline line-through; font-size: 150%"
        );
    }

    #[test]
    fn test_weight_implies_bold() {
        assert!(label_style("<weight>75</weight>").bold);
        assert!(!label_style("<weight>50</weight>").bold);
        assert!(label_style("<bold>true</bold>").bold);
    }
}
