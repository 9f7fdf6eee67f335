//! Grid and form layouts.
//!
//! Items carry their own `row`/`column`/`rowspan`/`colspan`. Rendering order is
//! a stable sort by row, so items of one row keep their source order.

use std::collections::BTreeSet;

use super::track::classify_tracks;
use super::{is_flexible_item, LayoutPlan, Placement};
use crate::document::Layout;

/// Upper bound on the number of column tracks of one grid.
///
/// Columns past it still get placements; CSS grid sizes them implicitly.
pub const MAX_GRID_COLUMNS: usize = 256;

/// Computes the plan of a `QGridLayout` or `QFormLayout`.
pub fn grid_plan(layout: &Layout) -> LayoutPlan {
    let mut placements: Vec<Placement> = layout
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| Placement {
            item: index,
            row: item.row().saturating_add(1),
            column: item.column().saturating_add(1),
            rowspan: item.rowspan(),
            colspan: item.colspan(),
        })
        .collect();
    placements.sort_by_key(|placement| placement.row);

    let column_count = layout
        .items()
        .iter()
        .map(|item| item.column().saturating_add(item.colspan()) as usize)
        .max()
        .unwrap_or(1);
    if column_count > MAX_GRID_COLUMNS {
        tracing::debug!(
            target: "giswater_forms::render",
            layout = layout.name(),
            column_count,
            "grid column count capped"
        );
    }
    let column_count = column_count.min(MAX_GRID_COLUMNS);

    let flexible: BTreeSet<usize> = layout
        .items()
        .iter()
        .filter(|item| is_flexible_item(item))
        .map(|item| item.column() as usize)
        .filter(|column| *column < column_count)
        .collect();

    LayoutPlan {
        tracks: classify_tracks(column_count, &flexible),
        placements,
    }
}
