//! Where a declaration came from.

use std::fmt;
use std::sync::Arc;

use crate::LineSpan;

/// File and line span of a declaration.
///
/// The file path is shared between every entity declared in the same unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Source {
    pub file: Arc<str>,
    pub span: LineSpan,
}

impl Source {
    pub fn new(file: Arc<str>, span: LineSpan) -> Self {
        Self { file, span }
    }

    /// First line of the declaration.
    pub fn line(&self) -> u32 {
        self.span.start
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.span)
    }
}
