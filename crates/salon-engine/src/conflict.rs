//! Detect overlapping occupied spans.
//!
//! Spans are half-open `[start, end)` intervals in minutes since midnight.
//! Adjacent spans (where one ends exactly when another starts) are NOT
//! conflicts, and no gap is required between bookings.

/// A half-open `[start, end)` span in minutes since midnight.
///
/// `end` may exceed 1440 for a span that runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span of `duration_minutes` beginning at `start`.
    pub fn starting_at(start: u32, duration_minutes: u32) -> Self {
        Self {
            start,
            end: start.saturating_add(duration_minutes),
        }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

/// Whether `[a_start, a_end)` and `[b_start, b_end)` overlap.
///
/// Two intervals overlap iff `a_start < b_end && a_end > b_start`, which
/// excludes the adjacent case where `a_end == b_start`.
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && a_end > b_start
}
