//! Lexical context threaded through the pass-one walk.
//!
//! A [`Context`] is a value: every `with_*` method returns a new instance and
//! leaves the receiver untouched. The alias map is shared behind an `Arc` and
//! copied only when a `use` statement changes it.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use phan_ast::UseKind;
use phan_core::{Fqsen, LineSpan, NAMESPACE_SEPARATOR, Source};

// ==========================================================================
// Alias map
// ==========================================================================

/// `use` aliases of the current file and namespace, keyed by (kind, alias).
///
/// Class and function aliases are case-insensitive and stored lowercased;
/// constant aliases are case-sensitive. Keying on the kind keeps a class
/// alias from shadowing a function alias of the same spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: FxHashMap<(UseKind, String), String>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `alias` to the fully-qualified `target`. A later alias replaces an
    /// earlier one.
    pub fn insert(&mut self, kind: UseKind, alias: &str, target: &str) {
        let target = target.trim_start_matches(NAMESPACE_SEPARATOR);
        self.entries.insert(Self::key(kind, alias), target.to_string());
    }

    pub fn get(&self, kind: UseKind, alias: &str) -> Option<&str> {
        self.entries.get(&Self::key(kind, alias)).map(String::as_str)
    }

    pub fn contains(&self, kind: UseKind, alias: &str) -> bool {
        self.entries.contains_key(&Self::key(kind, alias))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(kind: UseKind, alias: &str) -> (UseKind, String) {
        let alias = match kind {
            UseKind::Class | UseKind::Function => alias.to_lowercase(),
            UseKind::Constant => alias.to_string(),
        };
        (kind, alias)
    }
}

// ==========================================================================
// Context
// ==========================================================================

/// Immutable lexical state at one point of the walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    file: Arc<str>,
    span: LineSpan,
    /// Resolved namespace with a trailing separator, or empty for global.
    namespace: String,
    aliases: Arc<AliasMap>,
    class_fqsen: Option<Fqsen>,
    method_fqsen: Option<Fqsen>,
    is_conditional: bool,
    in_closure: bool,
}

impl Context {
    /// A fresh context for `file`, in the global namespace.
    pub fn new(file: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    // === Accessors ===

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn span(&self) -> LineSpan {
        self.span
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    pub fn class_fqsen(&self) -> Option<&Fqsen> {
        self.class_fqsen.as_ref()
    }

    pub fn method_fqsen(&self) -> Option<&Fqsen> {
        self.method_fqsen.as_ref()
    }

    pub fn is_conditional(&self) -> bool {
        self.is_conditional
    }

    pub fn is_in_class_scope(&self) -> bool {
        self.class_fqsen.is_some()
    }

    pub fn is_in_method_scope(&self) -> bool {
        self.method_fqsen.is_some()
    }

    /// Inside a closure body, where argument introspection belongs to the
    /// closure rather than the enclosing method.
    pub fn is_in_closure_scope(&self) -> bool {
        self.in_closure
    }

    /// Source location of a declaration spanning `span` in this file.
    pub fn source(&self, span: LineSpan) -> Source {
        Source::new(Arc::clone(&self.file), span)
    }

    // === Derivation ===

    pub fn with_file(&self, file: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.into(),
            ..self.clone()
        }
    }

    pub fn with_span(&self, span: LineSpan) -> Self {
        Self {
            span,
            ..self.clone()
        }
    }

    /// Enter `namespace`. The stored form always ends with a separator
    /// (`App\Models\`); the global namespace is the empty string.
    ///
    /// Aliases are scoped to a namespace, so entering a different namespace
    /// starts with an empty alias map.
    pub fn with_namespace(&self, namespace: &str) -> Self {
        let namespace = normalize_namespace(namespace);
        let aliases = if namespace == self.namespace {
            Arc::clone(&self.aliases)
        } else {
            Arc::default()
        };
        Self {
            namespace,
            aliases,
            ..self.clone()
        }
    }

    /// Open a namespace declaration. Imports belong to the declaration that
    /// introduced them, so the alias map starts empty even when the name
    /// repeats the current namespace.
    pub fn enter_namespace(&self, namespace: &str) -> Self {
        Self {
            namespace: normalize_namespace(namespace),
            aliases: Arc::default(),
            ..self.clone()
        }
    }

    /// Adopt the namespace and alias map of `other`, keeping everything else.
    ///
    /// This is how a namespace or `use` declaration reaches the siblings that
    /// follow it.
    pub fn with_namespace_scope_of(&self, other: &Context) -> Self {
        Self {
            namespace: other.namespace.clone(),
            aliases: Arc::clone(&other.aliases),
            ..self.clone()
        }
    }

    pub fn with_alias(&self, kind: UseKind, alias: &str, target: &str) -> Self {
        let mut aliases = Arc::clone(&self.aliases);
        Arc::make_mut(&mut aliases).insert(kind, alias, target);
        Self {
            aliases,
            ..self.clone()
        }
    }

    /// Enter a class body. Any method scope of an enclosing declaration ends.
    pub fn with_class_fqsen(&self, class_fqsen: Fqsen) -> Self {
        Self {
            class_fqsen: Some(class_fqsen),
            method_fqsen: None,
            in_closure: false,
            ..self.clone()
        }
    }

    /// Enter a method or function body.
    pub fn with_method_fqsen(&self, method_fqsen: Fqsen) -> Self {
        Self {
            method_fqsen: Some(method_fqsen),
            in_closure: false,
            ..self.clone()
        }
    }

    pub fn with_conditional(&self, is_conditional: bool) -> Self {
        Self {
            is_conditional,
            ..self.clone()
        }
    }

    pub fn with_closure_scope(&self) -> Self {
        Self {
            in_closure: true,
            ..self.clone()
        }
    }
}

fn normalize_namespace(namespace: &str) -> String {
    let trimmed = namespace.trim_matches(NAMESPACE_SEPARATOR);
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}{NAMESPACE_SEPARATOR}")
    }
}
