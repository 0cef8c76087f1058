//! Indicator geometry: the arithmetic behind the sliding bar.
//!
//! Everything here is a pure function of the track width, the tab count and
//! a (possibly fractional) tab position. Fractional values come out of the
//! animation; [`IndicatorGeometry::cells`] snaps them onto terminal columns.

/// Width of one tab segment: `track_width / tab_count`.
///
/// Returns `0.0` for an empty tab list rather than dividing by zero.
#[allow(clippy::cast_precision_loss)]
pub fn segment_width(track_width: f64, tab_count: usize) -> f64 {
    if tab_count == 0 {
        return 0.0;
    }
    track_width / tab_count as f64
}

/// Horizontal offset of the segment for tab `index`: `segment_width * index`.
#[allow(clippy::cast_precision_loss)]
pub fn segment_offset(track_width: f64, tab_count: usize, index: usize) -> f64 {
    segment_width(track_width, tab_count) * index as f64
}

/// Position and width of the foreground indicator, relative to the track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorGeometry {
    pub offset: f64,
    pub width: f64,
}

impl IndicatorGeometry {
    /// Geometry for a settled selection.
    pub fn for_selection(track_width: f64, tab_count: usize, index: usize) -> Self {
        Self {
            offset: segment_offset(track_width, tab_count, index),
            width: segment_width(track_width, tab_count),
        }
    }

    /// Geometry for a fractional tab position (mid-animation).
    pub fn at_position(track_width: f64, tab_count: usize, position: f64) -> Self {
        let width = segment_width(track_width, tab_count);
        Self {
            offset: width * position,
            width,
        }
    }

    /// Snap to whole terminal columns.
    ///
    /// Returns `(x, width)` in absolute buffer coordinates, clamped to the
    /// track starting at `track_x` and spanning `track_width` columns.
    pub fn cells(self, track_x: u16, track_width: u16) -> (u16, u16) {
        let start = snap(self.offset, track_width);
        let end = snap(self.offset + self.width, track_width).max(start);
        (track_x.saturating_add(start), end - start)
    }
}

/// Column span `(x, width)` of tab `index` inside a row at `x` of `width`
/// columns. Consecutive spans are contiguous and cover the whole row.
pub fn tab_span(x: u16, width: u16, tab_count: usize, index: usize) -> (u16, u16) {
    IndicatorGeometry::for_selection(f64::from(width), tab_count, index).cells(x, width)
}

/// Resolve an absolute column to the tab drawn there, if any.
pub fn tab_at(x: u16, width: u16, tab_count: usize, column: u16) -> Option<usize> {
    if column < x {
        return None;
    }
    (0..tab_count).find(|&index| {
        let (start, span) = tab_span(x, width, tab_count, index);
        column >= start && column - start < span
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn snap(value: f64, max: u16) -> u16 {
    value.round().clamp(0.0, f64::from(max)) as u16
}
