//! Name resolution and FQSEN uniquing.
//!
//! Two separate questions are answered here:
//!
//! - What absolute name does a name written in source refer to? Answered by
//!   [`resolve_qualified_name`] using the context's namespace and aliases.
//! - Under which identity should a new declaration be registered? Answered by
//!   [`resolve_fqsen`], which probes the code base for the first free
//!   alternate id.

use phan_ast::{NameKind, Node, NodeKind, UseKind};
use phan_core::{Fqsen, Issue, NAMESPACE_SEPARATOR};
use phan_registry::CodeBase;

use crate::Context;

/// Class names that name a class relative to the current one. Resolution
/// keeps them verbatim; later passes bind them.
const SPECIAL_CLASS_NAMES: &[&str] = &["self", "static", "parent"];

/// What a declaration's FQSEN is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// Class, interface or trait.
    Class,
    /// Method of the context's current class.
    Method,
    /// Free function.
    Function,
}

// ==========================================================================
// Qualified names
// ==========================================================================

/// Resolve a name as written to its absolute form, without a leading separator.
///
/// - Fully-qualified names (`\A\B`) are returned as-is.
/// - Relative names (`namespace\B`) are prefixed with the current namespace.
/// - Otherwise, when the first segment is an alias introduced by an earlier
///   `use` of the matching kind, the alias is replaced by its target.
/// - Anything else is prefixed with the current namespace.
///
/// ```
/// use phan_analysis::{Context, resolve_qualified_name};
/// use phan_ast::{NameKind, UseKind};
///
/// let context = Context::new("a.php")
///     .with_namespace("X")
///     .with_alias(UseKind::Class, "C", "A\\B");
///
/// assert_eq!(resolve_qualified_name(&context, "C\\D", NameKind::NotFullyQualified, UseKind::Class), "A\\B\\D");
/// assert_eq!(resolve_qualified_name(&context, "E", NameKind::NotFullyQualified, UseKind::Class), "X\\E");
/// ```
pub fn resolve_qualified_name(context: &Context, raw: &str, name_kind: NameKind, kind: UseKind) -> String {
    if let Some(absolute) = raw.strip_prefix(NAMESPACE_SEPARATOR) {
        return absolute.to_string();
    }
    match name_kind {
        NameKind::FullyQualified => raw.to_string(),
        NameKind::Relative => format!("{}{raw}", context.namespace()),
        NameKind::NotFullyQualified => {
            if kind == UseKind::Class && is_special_class_name(raw) {
                return raw.to_string();
            }
            match raw.split_once(NAMESPACE_SEPARATOR) {
                // Qualified names resolve their first segment against
                // namespace (class-kind) imports whatever they name.
                Some((first, rest)) => match context.aliases().get(UseKind::Class, first) {
                    Some(target) => format!("{target}{NAMESPACE_SEPARATOR}{rest}"),
                    None => format!("{}{raw}", context.namespace()),
                },
                None => match context.aliases().get(kind, raw) {
                    Some(target) => target.to_string(),
                    None => format!("{}{raw}", context.namespace()),
                },
            }
        }
    }
}

/// Resolve the name held by a `Name` node. `None` if the node is not a
/// well-formed `Name`.
pub fn resolve_name_node(context: &Context, node: &Node, kind: UseKind) -> Option<String> {
    if node.kind != NodeKind::Name {
        return None;
    }
    let raw = node.child_str(0).filter(|raw| !raw.is_empty())?;
    Some(resolve_qualified_name(
        context,
        raw,
        NameKind::from_flags(node.flags),
        kind,
    ))
}

/// Resolve a `Name` node naming a class-like type to its FQSEN.
///
/// `self`, `static` and `parent` have no FQSEN of their own and yield `None`.
pub fn resolve_class_name(context: &Context, node: &Node) -> Option<Fqsen> {
    let resolved = resolve_name_node(context, node, UseKind::Class)?;
    if is_special_class_name(&resolved) {
        return None;
    }
    Fqsen::from_fully_qualified_class(&resolved)
}

pub fn is_special_class_name(name: &str) -> bool {
    SPECIAL_CLASS_NAMES
        .iter()
        .any(|special| special.eq_ignore_ascii_case(name))
}

// ==========================================================================
// Declaration identities
// ==========================================================================

/// The identity a new declaration named `local_name` should be registered under.
///
/// The candidate is built from the context (namespace, and the current class
/// for methods) at alternate id 0. While the code base already holds an
/// entity under the candidate, the alternate id is incremented. The result is
/// always free, so redeclarations are registered instead of rejected.
///
/// Fails only for a method outside any class, which has no owner to build
/// an identity from.
pub fn resolve_fqsen(
    code_base: &CodeBase,
    context: &Context,
    local_name: &str,
    kind: DeclarationKind,
) -> Result<Fqsen, Issue> {
    let candidate = match kind {
        DeclarationKind::Class => Fqsen::for_class(context.namespace(), local_name),
        DeclarationKind::Function => Fqsen::for_function(context.namespace(), local_name),
        DeclarationKind::Method => context
            .class_fqsen()
            .ok_or_else(|| Issue::InvalidMethodDeclaration {
                name: local_name.to_string(),
            })?
            .with_method_name(local_name),
    };

    let taken = |fqsen: &Fqsen| match kind {
        DeclarationKind::Class => code_base.has_class(fqsen),
        DeclarationKind::Method | DeclarationKind::Function => code_base.has_method(fqsen),
    };

    let mut fqsen = candidate;
    let mut alternate_id = 0;
    while taken(&fqsen) {
        alternate_id += 1;
        fqsen = fqsen.with_alternate_id(alternate_id);
    }
    Ok(fqsen)
}
