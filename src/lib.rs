//! Declaration registration for PHP static analysis.
//!
//! A run hands each parsed source unit to pass one, which walks the tree and
//! registers every class, method, function, property and constant in one
//! shared [`CodeBase`]. Later passes read the code base; this crate stops
//! once every unit is registered.
//!
//! # Example
//!
//! ```
//! use phan::{CodeBase, Configuration, File, Fqsen};
//! use phan::ast::build;
//!
//! let file = File::new(
//!     "src/Models/User.php",
//!     build::stmts([
//!         build::namespace("App\\Models"),
//!         build::class("User", Some("Model"), [], []),
//!     ]),
//! );
//!
//! let mut code_base = CodeBase::new();
//! let output = file.pass_one(&mut code_base, &Configuration::default());
//!
//! assert!(!output.diagnostics.has_fatal());
//! let user = code_base.class(&Fqsen::for_class("App\\Models\\", "User")).unwrap();
//! assert_eq!(user.parent, Some(Fqsen::for_class("App\\Models\\", "Model")));
//! ```

use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub use phan_analysis::{Configuration, Context, PassOne, PassOneOutput};
pub use phan_core::{
    Class, ClassConstant, Diagnostic, DiagnosticKind, Diagnostics, Fqsen, Issue, Method, Modifiers,
    ParentConstructorCalled, Property, UnionType,
};
pub use phan_registry::{CodeBase, Counters};

/// The syntax-tree model consumed by pass one.
pub mod ast {
    pub use phan_ast::*;
}

/// Lower-level building blocks of the walk.
pub mod analysis {
    pub use phan_analysis::*;
}

/// A parsed source unit: its path and the root of its syntax tree.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    root: ast::Node,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, root: ast::Node) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &ast::Node {
        &self.root
    }

    /// Register this unit's declarations in `code_base`.
    ///
    /// The path is recorded on every registered entity and is the file the
    /// compatibility check re-reads, so it should name the file on disk.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn pass_one(&self, code_base: &mut CodeBase, config: &Configuration) -> PassOneOutput {
        let path = self.path.to_string_lossy();
        PassOne::new(code_base, config).run(&path, &self.root)
    }
}

/// Run pass one over `files` in order against a shared code base.
///
/// The lock is held for one whole unit at a time, so walks never interleave.
/// A lock poisoned by a panicking walk is recovered: every entity that walk
/// registered before panicking stays registered.
///
/// Returns the diagnostics of every unit, in file order, alongside the code
/// base's counters once the last unit is registered.
pub fn analyze_files<'f>(
    code_base: &Mutex<CodeBase>,
    files: impl IntoIterator<Item = &'f File>,
    config: &Configuration,
) -> (Diagnostics, Counters) {
    let mut diagnostics = Diagnostics::new();
    for file in files {
        let mut guard = code_base
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let output = file.pass_one(&mut guard, config);
        drop(guard);

        tracing::info!(
            file = %file.path().display(),
            classes = output.classes_registered,
            methods = output.methods_registered,
            functions = output.functions_registered,
            "registered declarations"
        );
        diagnostics.extend(output.diagnostics);
    }

    let counters = *code_base
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .counters();
    tracing::info!(
        declarations = counters.total_declarations(),
        diagnostics = diagnostics.count(),
        fatal = diagnostics.fatal_count(),
        %counters,
        "pass one complete"
    );
    (diagnostics, counters)
}
