//! Diagnostics collected while walking a source unit.

use std::collections::VecDeque;
use std::fmt;

use crate::Issue;

/// A single diagnostic produced by pass one.
///
/// # Examples
///
/// ```
/// use phan_core::{Diagnostic, DiagnosticKind};
///
/// let diagnostic = Diagnostic::new(
///     DiagnosticKind::Fatal,
///     "Invalid constant declaration",
///     "src/a.php",
///     3,
/// );
/// assert_eq!(
///     diagnostic.to_string(),
///     "src/a.php:3: fatal: Invalid constant declaration"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// File the diagnostic refers to.
    pub file: String,
    /// Line number (1-based).
    pub line: u32,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            file: file.into(),
            line,
        }
    }

    /// Report an [`Issue`] at `file:line`.
    pub fn from_issue(issue: &Issue, file: impl Into<String>, line: u32) -> Self {
        Self::new(issue.kind(), issue.to_string(), file, line)
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A declaration that cannot be registered (e.g. a property outside a class).
    Fatal,
    /// Disagreement between declared and inferred types.
    Type,
    /// Syntax whose meaning changed across language versions.
    Compatibility,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::Fatal => Severity::Critical,
            DiagnosticKind::Type => Severity::Normal,
            DiagnosticKind::Compatibility => Severity::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::Fatal => "fatal",
            DiagnosticKind::Type => "type",
            DiagnosticKind::Compatibility => "compat",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How seriously a reporting layer should treat a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Normal,
    Critical,
}

/// Diagnostics in the order they were reported.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    diagnostics: VecDeque<Diagnostic>,
    has_fatal: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        if diagnostic.kind == DiagnosticKind::Fatal {
            self.has_fatal = true;
        }
        self.diagnostics.push_back(diagnostic);
    }

    /// Append every diagnostic from `other`, keeping order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.has_fatal |= other.has_fatal;
        self.diagnostics.extend(other.diagnostics);
    }

    /// Whether any fatal diagnostic was reported. Tracked on insertion.
    pub fn has_fatal(&self) -> bool {
        self.has_fatal
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
        self.has_fatal = false;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn fatal_count(&self) -> usize {
        self.of_kind(DiagnosticKind::Fatal).count()
    }

    pub fn type_count(&self) -> usize {
        self.of_kind(DiagnosticKind::Type).count()
    }

    pub fn compatibility_count(&self) -> usize {
        self.of_kind(DiagnosticKind::Compatibility).count()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}: {}", self.file, self.line, self.kind, self.message)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
