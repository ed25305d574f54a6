//! Type descriptors from expressions and signatures.
//!
//! Only literal and simple forms are typed precisely. Anything more complex
//! yields [`UnionType::none`] and is left to a later pass.

use phan_ast::{Child, NameKind, Node, NodeKind, UseKind};
use phan_core::UnionType;

use crate::resolve::{is_special_class_name, resolve_name_node, resolve_qualified_name};
use crate::Context;

/// Type names that are never resolved through aliases.
const BUILTIN_TYPE_NAMES: &[&str] = &[
    "array", "bool", "callable", "false", "float", "int", "iterable", "mixed", "null", "object",
    "string", "true", "void", "never", "boolean", "integer", "double",
];

/// The type of a default-value or constant-value expression.
///
/// ```
/// use phan_analysis::{Context, type_from_child};
/// use phan_ast::{Child, build};
///
/// let context = Context::new("a.php").with_namespace("App");
/// assert_eq!(type_from_child(&context, &Child::Int(1)).to_string(), "int");
/// assert_eq!(type_from_child(&context, &build::new("User", []).into()).to_string(), "App\\User");
/// assert!(type_from_child(&context, &Child::Null).is_none());
/// ```
pub fn type_from_child(context: &Context, child: &Child) -> UnionType {
    match child {
        Child::Int(_) => UnionType::from_name("int"),
        Child::Float(_) => UnionType::from_name("float"),
        Child::Str(_) => UnionType::from_name("string"),
        Child::Null => UnionType::none(),
        Child::Node(node) => type_from_node(context, node),
    }
}

/// The type of an expression node.
pub fn type_from_node(context: &Context, node: &Node) -> UnionType {
    match node.kind {
        NodeKind::Const => node
            .child_node(0)
            .and_then(|name| name.child_str(0))
            .map(constant_type)
            .unwrap_or_default(),
        NodeKind::Array => UnionType::from_name("array"),
        NodeKind::Encaps => UnionType::from_name("string"),
        NodeKind::Closure => UnionType::from_name("Closure"),
        NodeKind::New => node
            .child_node(0)
            .and_then(|class| resolve_name_node(context, class, UseKind::Class))
            .map(|name| UnionType::from_name(&name))
            .unwrap_or_default(),
        _ => UnionType::none(),
    }
}

/// The type named by a signature type node (parameter or return type).
///
/// Builtin names are kept as builtins; class names resolve through the
/// context's aliases. `None` for an empty slot or an unrecognized node.
pub fn type_from_type_node(context: &Context, node: &Node) -> Option<UnionType> {
    if node.kind != NodeKind::Name {
        return None;
    }
    let raw = node.child_str(0)?;
    let bare = raw.trim_start_matches('?');
    let mut union = if is_builtin_type_name(bare) || is_special_class_name(bare) {
        UnionType::from_name(bare)
    } else {
        let resolved =
            resolve_qualified_name(context, bare, NameKind::from_flags(node.flags), UseKind::Class);
        UnionType::from_name(&resolved)
    };
    if raw.starts_with('?') {
        union.add_type_name("null");
    }
    Some(union)
}

fn is_builtin_type_name(name: &str) -> bool {
    BUILTIN_TYPE_NAMES
        .iter()
        .any(|builtin| builtin.eq_ignore_ascii_case(name))
}

fn constant_type(name: &str) -> UnionType {
    match name.to_ascii_lowercase().as_str() {
        "null" => UnionType::from_name("null"),
        "true" | "false" => UnionType::from_name("bool"),
        _ => UnionType::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phan_ast::build;

    fn context() -> Context {
        Context::new("a.php")
            .with_namespace("App")
            .with_alias(UseKind::Class, "B", "Foo\\Bar")
    }

    fn type_of(child: impl Into<Child>) -> String {
        type_from_child(&context(), &child.into()).to_string()
    }

    #[test]
    fn scalar_literals() {
        assert_eq!(type_of(1i64), "int");
        assert_eq!(type_of(1.5f64), "float");
        assert_eq!(type_of("x"), "string");
    }

    #[test]
    fn constants() {
        assert_eq!(type_of(build::constant("null")), "null");
        assert_eq!(type_of(build::constant("TRUE")), "bool");
        assert_eq!(type_of(build::constant("PHP_EOL")), "");
    }

    #[test]
    fn arrays_and_objects() {
        assert_eq!(type_of(build::array([Child::Int(1)])), "array");
        assert_eq!(type_of(build::new("B", [])), "Foo\\Bar");
        assert_eq!(type_of(build::new("\\Other", [])), "Other");
        assert_eq!(type_of(build::closure([], [])), "Closure");
    }

    #[test]
    fn complex_expressions_are_unknown() {
        let expr = build::method_call(build::var("a"), "b", []);
        assert!(type_from_child(&context(), &expr.into()).is_none());
        assert!(type_from_child(&context(), &Child::Null).is_none());
    }

    #[test]
    fn signature_types() {
        let context = context();
        let int = type_from_type_node(&context, &build::name("int")).unwrap();
        assert_eq!(int.to_string(), "int");

        let class = type_from_type_node(&context, &build::name("B")).unwrap();
        assert_eq!(class.to_string(), "Foo\\Bar");

        let nullable = type_from_type_node(&context, &build::name("?string")).unwrap();
        assert_eq!(nullable.to_string(), "null|string");

        let own = type_from_type_node(&context, &build::name("self")).unwrap();
        assert_eq!(own.to_string(), "self");
    }
}
