//! Vertical and horizontal box layouts.

use std::collections::BTreeSet;

use super::track::{classify_tracks, TrackSize};
use super::{is_flexible_item, LayoutPlan, Placement};
use crate::document::Layout;

/// Orientation of a box layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Computes the plan of a `QVBoxLayout` or `QHBoxLayout`.
///
/// A vertical box is one flexible column with a row per item. A horizontal
/// box is one row with a column per item, tracks classified by source index.
pub fn box_plan(layout: &Layout, orientation: Orientation) -> LayoutPlan {
    let items = layout.items();
    match orientation {
        Orientation::Vertical => LayoutPlan {
            tracks: vec![TrackSize::Auto],
            placements: (0..items.len())
                .map(|index| Placement::single(index, index as u32 + 1, 1))
                .collect(),
        },
        Orientation::Horizontal => {
            let flexible: BTreeSet<usize> = items
                .iter()
                .enumerate()
                .filter(|(_, item)| is_flexible_item(item))
                .map(|(index, _)| index)
                .collect();
            LayoutPlan {
                tracks: classify_tracks(items.len(), &flexible),
                placements: (0..items.len())
                    .map(|index| Placement::single(index, 1, index as u32 + 1))
                    .collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FormDocument;

    fn root_layout(xml: &str) -> Layout {
        FormDocument::parse(xml)
            .unwrap()
            .root()
            .layout()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_vertical_rows_in_source_order() {
        let layout = root_layout(
            r#"<ui><widget class="QWidget" name="form"><layout class="QVBoxLayout">
                <item><widget class="QLabel"/></item>
                <item><widget class="QLineEdit"/></item>
                <item><widget class="QPushButton"/></item>
            </layout></widget></ui>"#,
        );
        let plan = box_plan(&layout, Orientation::Vertical);
        assert_eq!(plan.tracks, vec![TrackSize::Auto]);
        let rows: Vec<u32> = plan.placements.iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![1, 2, 3]);
        assert!(plan.placements.iter().all(|p| p.column == 1));
    }

    #[test]
    fn test_horizontal_tracks_by_source_index() {
        let layout = root_layout(
            r#"<ui><widget class="QWidget" name="form"><layout class="QHBoxLayout">
                <item><widget class="QLabel"/></item>
                <item><widget class="QLineEdit"/></item>
            </layout></widget></ui>"#,
        );
        let plan = box_plan(&layout, Orientation::Horizontal);
        assert_eq!(plan.tracks, vec![TrackSize::FitContent(50), TrackSize::Auto]);
        let columns: Vec<u32> = plan.placements.iter().map(|p| p.column).collect();
        assert_eq!(columns, vec![1, 2]);
        assert!(plan.placements.iter().all(|p| p.row == 1));
    }
}
