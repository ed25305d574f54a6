//! Pass one: walk a source unit's syntax tree and register its declarations.
//!
//! The entry point is [`PassOne`]. It threads an immutable [`Context`]
//! through a depth-first walk, registers classes, methods, functions,
//! properties and constants in a shared [`phan_registry::CodeBase`], and
//! collects [`phan_core::Diagnostics`] for declarations it cannot register.
//!
//! ```
//! use phan_analysis::{Configuration, PassOne};
//! use phan_ast::build;
//! use phan_core::Fqsen;
//! use phan_registry::CodeBase;
//!
//! let root = build::stmts([
//!     build::namespace("App"),
//!     build::class("User", None, [], [build::method("save", [], [])]),
//! ]);
//!
//! let mut code_base = CodeBase::new();
//! let config = Configuration::default();
//! let output = PassOne::new(&mut code_base, &config).run("src/User.php", &root);
//!
//! assert!(output.diagnostics.is_empty());
//! assert!(code_base.has_class(&Fqsen::for_class("App\\", "User")));
//! ```

mod compat;
mod config;
mod context;
mod pass_one;
mod resolve;
mod types;

pub use compat::{check_compatibility, read_source_line};
pub use config::Configuration;
pub use context::{AliasMap, Context};
pub use pass_one::{ANONYMOUS_CLASS_NAME, PassOne, PassOneOutput};
pub use resolve::{
    DeclarationKind, is_special_class_name, resolve_class_name, resolve_fqsen, resolve_name_node,
    resolve_qualified_name,
};
pub use types::{type_from_child, type_from_node, type_from_type_node};
