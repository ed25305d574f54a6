//! Source location tracking for declarations and diagnostics.
//!
//! Provides [`LineSpan`] to track which lines of a source unit a declaration
//! covers. The consumed syntax tree only carries line numbers, so unlike a
//! token span there are no columns.

use std::fmt;

/// An inclusive range of source lines.
///
/// `end` is `None` when the syntax tree did not supply an end line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineSpan {
    /// First line (1-indexed, 0 when unknown).
    pub start: u32,
    /// Last line, if known.
    pub end: Option<u32>,
}

impl LineSpan {
    /// Create a span covering `start..=end`.
    #[inline]
    pub fn new(start: u32, end: Option<u32>) -> Self {
        Self { start, end }
    }

    /// Create a span on a single line.
    #[inline]
    pub fn line(line: u32) -> Self {
        Self {
            start: line,
            end: Some(line),
        }
    }

    /// Whether `line` falls inside this span. An open-ended span only contains
    /// its start line.
    #[inline]
    pub fn contains(&self, line: u32) -> bool {
        line >= self.start && line <= self.end.unwrap_or(self.start)
    }

    /// Number of lines covered (at least 1).
    #[inline]
    pub fn line_count(&self) -> u32 {
        self.end
            .map(|end| end.saturating_sub(self.start) + 1)
            .unwrap_or(1)
    }
}

impl fmt::Debug for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) if end != self.start => write!(f, "{}-{}", self.start, end),
            _ => write!(f, "{}", self.start),
        }
    }
}
