//! Layout engine.
//!
//! Turns a normalized [`Layout`] into a [`LayoutPlan`]: where each item sits
//! on a 1-based grid and how wide each column track is.
//!
//! # Built-in Layouts
//!
//! - `QGridLayout` / `QFormLayout`: declared placement, rows sorted stably
//! - `QVBoxLayout`: one flexible column, one row per item
//! - `QHBoxLayout`: one row, one column per item
//!
//! Any other layout class has no plan and contributes no UI.
//!
//! # Column Tracks
//!
//! A column is flexible (`auto`) when it holds at least one item whose widget
//! is not intrinsically sized (`QLabel`, `QCheckBox`, `QRadioButton`, `Line`)
//! and spans exactly one column. Other columns are `fit-content(100/n %)`.
//! When no column is flexible every column is, so the layout never collapses.

mod box_layout;
mod grid_layout;
mod track;

pub use box_layout::{box_plan, Orientation};
pub use grid_layout::{grid_plan, MAX_GRID_COLUMNS};
pub use track::{classify_tracks, template_columns, TrackSize};

use crate::document::{Layout, LayoutItem, LayoutKind};

/// Where one layout item is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index of the item in the layout's source order.
    pub item: usize,
    /// 1-based row.
    pub row: u32,
    /// 1-based column.
    pub column: u32,
    pub rowspan: u32,
    pub colspan: u32,
}

impl Placement {
    fn single(item: usize, row: u32, column: u32) -> Self {
        Self {
            item,
            row,
            column,
            rowspan: 1,
            colspan: 1,
        }
    }
}

/// The computed arrangement of one layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Column tracks, left to right.
    pub tracks: Vec<TrackSize>,
    /// Item placements in rendering order.
    pub placements: Vec<Placement>,
}

impl LayoutPlan {
    /// The `grid-template-columns` value of this plan.
    pub fn template_columns(&self) -> String {
        template_columns(&self.tracks)
    }
}

/// Computes the plan of a layout, or `None` for an unrecognized class.
pub fn compute_layout(layout: &Layout) -> Option<LayoutPlan> {
    match layout.kind() {
        LayoutKind::Grid | LayoutKind::Form => Some(grid_plan(layout)),
        LayoutKind::VBox => Some(box_plan(layout, Orientation::Vertical)),
        LayoutKind::HBox => Some(box_plan(layout, Orientation::Horizontal)),
        LayoutKind::Unknown(class) => {
            tracing::debug!(
                target: "giswater_forms::render",
                layout = layout.name(),
                class = %class,
                "unrecognized layout class, rendering nothing"
            );
            None
        }
    }
}

/// Returns true if this item makes its column flexible.
fn is_flexible_item(item: &LayoutItem) -> bool {
    item.colspan() == 1
        && item
            .widget()
            .is_some_and(|widget| !widget.kind().has_intrinsic_width())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FormDocument;

    #[test]
    fn test_unknown_layout_has_no_plan() {
        let doc = FormDocument::parse(
            r#"<ui><widget class="QWidget" name="form"><layout class="QStackedLayout">
                <item><widget class="QLabel"/></item>
            </layout></widget></ui>"#,
        )
        .unwrap();
        assert!(compute_layout(doc.root().layout().unwrap()).is_none());
    }

    #[test]
    fn test_dispatch_by_class() {
        let doc = FormDocument::parse(
            r#"<ui><widget class="QWidget" name="form"><layout class="QFormLayout">
                <item row="0" column="0"><widget class="QLabel"/></item>
                <item row="0" column="1"><widget class="QLineEdit"/></item>
            </layout></widget></ui>"#,
        )
        .unwrap();
        let plan = compute_layout(doc.root().layout().unwrap()).unwrap();
        assert_eq!(plan.template_columns(), "fit-content(50%) auto");
    }

    #[test]
    fn test_nested_layout_item_is_not_flexible() {
        let doc = FormDocument::parse(
            r#"<ui><widget class="QWidget" name="form"><layout class="QGridLayout">
                <item row="0" column="0"><layout class="QHBoxLayout">
                    <item><widget class="QLineEdit"/></item>
                </layout></item>
                <item row="0" column="1"><widget class="QLineEdit"/></item>
            </layout></widget></ui>"#,
        )
        .unwrap();
        let plan = compute_layout(doc.root().layout().unwrap()).unwrap();
        assert_eq!(plan.tracks, vec![TrackSize::FitContent(50), TrackSize::Auto]);
    }
}
