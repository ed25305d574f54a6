//! Core types shared by the pass-one crates.
//!
//! This crate has no knowledge of the syntax tree or the walk. It defines the
//! values the walk produces and the registry stores:
//!
//! - [`Fqsen`] - structured identity of every declaration
//! - [`UnionType`] - union-of-names type descriptor
//! - [`Comment`] - facts extracted from doc comments
//! - [`Class`], [`Method`], [`Property`], [`ClassConstant`] - entity records
//! - [`Diagnostic`], [`Diagnostics`] - reported problems
//! - [`Issue`], [`RegistrationError`] - error types

mod comment;
mod diagnostics;
pub mod entries;
mod error;
mod flags;
mod fqsen;
mod span;
pub mod union_type;

pub use comment::{Comment, CommentParameter};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use entries::{
    Class, ClassConstant, Method, ParentConstructorCalled, Property, Source, UNLIMITED_PARAMETERS,
};
pub use error::{Issue, RegistrationError};
pub use flags::{ClassFlags, Modifiers, Visibility};
pub use fqsen::{Fqsen, NAMESPACE_SEPARATOR};
pub use span::LineSpan;
pub use union_type::UnionType;
