//! Table rendering from `listJson` data.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::TableView;
use crate::config::FormStrings;
use crate::state::{value_text, TableLookup, TableStore};

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    /// An image URL shown as a thumbnail.
    Image(String),
}

static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|bmp|webp|svg|tif|tiff)(\?.*)?$")
        .expect("image pattern is a valid regex")
});

/// Case-insensitive pattern of image file URLs.
pub fn image_pattern() -> &'static Regex {
    &IMAGE_PATTERN
}

/// Builds a table view, or `None` when the store has no data for it.
pub(crate) fn render_table(
    name: &str,
    tables: &TableStore,
    strings: &FormStrings,
    thumbnails: bool,
) -> Option<TableView> {
    let rows = match tables.lookup(name) {
        TableLookup::Absent => return None,
        TableLookup::Malformed => {
            tracing::debug!(target: "giswater_forms::render", table = name, "malformed table data");
            return Some(notice(name, &strings.no_result));
        }
        TableLookup::Rows(rows) if rows.is_empty() => {
            return Some(notice(name, &strings.no_results));
        }
        TableLookup::Rows(rows) => rows,
    };

    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(fields) = row {
            for key in fields.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let rows = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| cell(row.get(column), thumbnails))
                .collect()
        })
        .collect();

    Some(TableView {
        name: name.to_string(),
        columns,
        rows,
        notice: None,
    })
}

fn notice(name: &str, text: &str) -> TableView {
    TableView {
        name: name.to_string(),
        columns: Vec::new(),
        rows: Vec::new(),
        notice: Some(text.to_string()),
    }
}

fn cell(value: Option<&Value>, thumbnails: bool) -> CellValue {
    let text = value.and_then(value_text).unwrap_or_default();
    if thumbnails && image_pattern().is_match(&text) {
        CellValue::Image(text)
    } else {
        CellValue::Text(text)
    }
}
