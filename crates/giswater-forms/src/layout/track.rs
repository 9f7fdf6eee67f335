//! Column track sizing.

use std::collections::BTreeSet;
use std::fmt;

/// Sizing of one column track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSize {
    /// Flexible: the track takes the remaining width.
    Auto,
    /// Sized to content, capped at the given share of the width in percent.
    FitContent(u32),
}

impl TrackSize {
    /// Renders the track as a CSS grid track size.
    pub fn to_css(&self) -> String {
        match self {
            TrackSize::Auto => "auto".to_string(),
            TrackSize::FitContent(percent) => format!("fit-content({percent}%)"),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, TrackSize::Auto)
    }
}

impl fmt::Display for TrackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Builds a track plan of `count` columns where `flexible` holds the 0-based
/// indices of the flexible columns.
///
/// All tracks become flexible when none is, so a layout never collapses to
/// zero width.
pub fn classify_tracks(count: usize, flexible: &BTreeSet<usize>) -> Vec<TrackSize> {
    let count = count.max(1);
    if !(0..count).any(|column| flexible.contains(&column)) {
        return vec![TrackSize::Auto; count];
    }
    let share = (100 / count) as u32;
    (0..count)
        .map(|column| {
            if flexible.contains(&column) {
                TrackSize::Auto
            } else {
                TrackSize::FitContent(share)
            }
        })
        .collect()
}

/// Joins tracks into a `grid-template-columns` value.
pub fn template_columns(tracks: &[TrackSize]) -> String {
    tracks
        .iter()
        .map(TrackSize::to_css)
        .collect::<Vec<_>>()
        .join(" ")
}
