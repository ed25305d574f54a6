//! Syntax-tree model consumed by pass one.
//!
//! The parser is an external collaborator; this crate only defines the shape
//! of what it hands over. A tree is a [`Node`] with a [`NodeKind`] tag, a raw
//! flags word, a line span, an optional doc comment and ordered [`Child`]
//! slots holding either subtrees or scalar leaves.
//!
//! The [`build`] module produces nodes in the child layout each kind expects.

pub mod build;
mod flags;
mod kind;
mod node;

pub use flags::{NameKind, ParamFlags, UseKind};
pub use kind::NodeKind;
pub use node::{Child, Node};
