//! Declared entity records.
//!
//! - [`Class`] - classes, interfaces and traits
//! - [`Method`] - methods and free functions
//! - [`Property`], [`ClassConstant`] - class members
//!
//! Supporting types:
//! - [`Source`] - file and line span of a declaration
//! - [`ParentConstructorCalled`] - constructor-chaining state of a class

mod class;
mod method;
mod property;
mod source;

pub use class::{Class, ParentConstructorCalled};
pub use method::{Method, UNLIMITED_PARAMETERS};
pub use property::{ClassConstant, Property};
pub use source::Source;
