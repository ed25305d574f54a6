//! Error types for pass one.
//!
//! ## Error Hierarchy
//!
//! ```text
//! Issue             - problems found in the analyzed program, reported as diagnostics
//! RegistrationError - code base insertion failures
//! ```
//!
//! An [`Issue`] never aborts a walk. The walker converts it to a
//! [`Diagnostic`](crate::Diagnostic) at the node where it was raised and
//! carries on with the remaining siblings.

use thiserror::Error;

use crate::{DiagnosticKind, Fqsen};

// ============================================================================
// Issues
// ============================================================================

/// A problem in the analyzed source, scoped to a single declaration or node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    /// A property group appeared outside any class body.
    #[error("Invalid property declaration")]
    InvalidPropertyDeclaration,

    /// A class-constant group appeared outside any class body.
    #[error("Invalid constant declaration")]
    InvalidConstantDeclaration,

    /// A method declaration appeared outside any class body.
    #[error("Invalid method declaration {name}")]
    InvalidMethodDeclaration { name: String },

    /// The tree is missing a child the node kind requires.
    #[error("malformed {kind} node: {reason}")]
    MalformedNode { kind: String, reason: String },

    /// A property's doc type disagrees with the type of its default value.
    #[error("property ${property} is declared to be {declared} but was assigned {inferred}")]
    PropertyTypeMismatch {
        property: String,
        declared: String,
        inferred: String,
    },

    /// An expression whose meaning changed across language versions.
    #[error("{expression} expression may not be PHP 7 compatible")]
    Compatibility { expression: String },

    /// The code base refused an insertion.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl Issue {
    /// Create a malformed-node issue.
    pub fn malformed(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// The diagnostic category this issue is reported under.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Issue::InvalidPropertyDeclaration
            | Issue::InvalidConstantDeclaration
            | Issue::InvalidMethodDeclaration { .. }
            | Issue::MalformedNode { .. }
            | Issue::Registration(_) => DiagnosticKind::Fatal,
            Issue::PropertyTypeMismatch { .. } => DiagnosticKind::Type,
            Issue::Compatibility { .. } => DiagnosticKind::Compatibility,
        }
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised by the code base when an insertion would break its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A class is already registered under this FQSEN.
    #[error("duplicate class: {0}")]
    DuplicateClass(Fqsen),

    /// A method or function is already registered under this FQSEN.
    #[error("duplicate method: {0}")]
    DuplicateMethod(Fqsen),

    /// A method names an owning class that is not registered.
    #[error("class not found: {0}")]
    UnknownClass(Fqsen),
}
