//! Constructors for well-formed nodes.
//!
//! Parser adapters and tests use these to produce trees that follow the
//! child layout each [`NodeKind`] expects. Line numbers are left at `0`; set
//! them with [`Node::at`] and [`Node::with_end_line`].
//!
//! ```
//! use phan_ast::build;
//!
//! // namespace App; class X extends B {}
//! let unit = build::stmts([
//!     build::namespace("App"),
//!     build::class("X", Some("B"), [], []),
//! ]);
//! assert_eq!(unit.children.len(), 2);
//! ```

use phan_core::{ClassFlags, Modifiers};

use crate::{Child, NameKind, Node, NodeKind, ParamFlags, UseKind};

/// A statement list.
pub fn stmts(statements: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::StmtList).with_children(statements)
}

/// `namespace Name;` (unbraced form).
pub fn namespace(name: &str) -> Node {
    let name = if name.is_empty() {
        Child::Null
    } else {
        Child::from(name)
    };
    Node::new(NodeKind::Namespace)
        .with_child(name)
        .with_child(Child::Null)
}

/// `namespace Name { ... }`.
pub fn namespace_block(name: &str, body: impl IntoIterator<Item = Node>) -> Node {
    let mut node = namespace(name);
    node.children[1] = stmts(body).into();
    node
}

/// `use Target [as Alias], ...;`
pub fn use_(kind: UseKind, elements: impl IntoIterator<Item = (&'static str, Option<&'static str>)>) -> Node {
    Node::new(NodeKind::Use)
        .with_flags(kind.flags())
        .with_children(elements.into_iter().map(|(target, alias)| use_elem(target, alias, None)))
}

/// `use Prefix\{Target [as Alias], ...};`
///
/// Elements carry their own kind only when it differs from the group's.
pub fn group_use(
    kind: UseKind,
    prefix: &str,
    elements: impl IntoIterator<Item = (&'static str, Option<&'static str>, Option<UseKind>)>,
) -> Node {
    let list = Node::new(NodeKind::Use).with_children(
        elements
            .into_iter()
            .map(|(target, alias, kind)| use_elem(target, alias, kind)),
    );
    Node::new(NodeKind::GroupUse)
        .with_flags(kind.flags())
        .with_child(prefix)
        .with_child(list)
}

fn use_elem(target: &str, alias: Option<&str>, kind: Option<UseKind>) -> Node {
    Node::new(NodeKind::UseElem)
        .with_flags(kind.map_or(0, UseKind::flags))
        .with_child(target)
        .with_child(alias.map_or(Child::Null, Child::from))
}

/// A name reference as written in source: `\A\B`, `namespace\B` or `A\B`.
pub fn name(raw: &str) -> Node {
    let (kind, text) = if let Some(rest) = raw.strip_prefix('\\') {
        (NameKind::FullyQualified, rest)
    } else if let Some(rest) = raw.strip_prefix("namespace\\") {
        (NameKind::Relative, rest)
    } else {
        (NameKind::NotFullyQualified, raw)
    };
    Node::new(NodeKind::Name)
        .with_flags(kind.flags())
        .with_child(text)
}

pub fn name_list<'a>(names: impl IntoIterator<Item = &'a str>) -> Node {
    Node::new(NodeKind::NameList).with_children(names.into_iter().map(name))
}

/// `class Name [extends Parent] [implements I, ...] { members }`.
pub fn class<'a>(
    class_name: &str,
    extends: Option<&str>,
    implements: impl IntoIterator<Item = &'a str>,
    members: impl IntoIterator<Item = Node>,
) -> Node {
    let implements: Vec<&str> = implements.into_iter().collect();
    let implements = if implements.is_empty() {
        Child::Null
    } else {
        name_list(implements).into()
    };
    Node::new(NodeKind::Class)
        .with_child(class_name)
        .with_child(extends.map(name))
        .with_child(implements)
        .with_child(stmts(members))
}

/// `interface Name { members }`.
pub fn interface(interface_name: &str, members: impl IntoIterator<Item = Node>) -> Node {
    class(interface_name, None, [], members).with_flags(ClassFlags::INTERFACE.bits())
}

/// `trait Name { members }`.
pub fn trait_(trait_name: &str, members: impl IntoIterator<Item = Node>) -> Node {
    class(trait_name, None, [], members).with_flags(ClassFlags::TRAIT.bits())
}

/// `new class { members }`.
pub fn anonymous_class(members: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Class)
        .with_flags(ClassFlags::ANONYMOUS.bits())
        .with_child(Child::Null)
        .with_child(Child::Null)
        .with_child(Child::Null)
        .with_child(stmts(members))
}

/// `use TraitA, TraitB;` inside a class body.
pub fn use_trait<'a>(traits: impl IntoIterator<Item = &'a str>) -> Node {
    Node::new(NodeKind::UseTrait)
        .with_child(name_list(traits))
        .with_child(Child::Null)
}

/// A method declaration with public visibility.
pub fn method(
    method_name: &str,
    params: impl IntoIterator<Item = Node>,
    body: impl IntoIterator<Item = Node>,
) -> Node {
    Node::new(NodeKind::Method)
        .with_flags(Modifiers::PUBLIC.bits())
        .with_child(method_name)
        .with_child(param_list(params))
        .with_child(stmts(body))
        .with_child(Child::Null)
}

/// `function name(params) { body }`.
pub fn function(
    function_name: &str,
    params: impl IntoIterator<Item = Node>,
    body: impl IntoIterator<Item = Node>,
) -> Node {
    Node::new(NodeKind::FuncDecl)
        .with_child(function_name)
        .with_child(param_list(params))
        .with_child(stmts(body))
        .with_child(Child::Null)
}

/// Attach a signature return type to a method, function or closure.
pub fn returning(mut decl: Node, type_name: &str) -> Node {
    let slot = 3;
    while decl.children.len() <= slot {
        decl.children.push(Child::Null);
    }
    decl.children[slot] = name(type_name).into();
    decl
}

/// `function (params) { body }`.
pub fn closure(params: impl IntoIterator<Item = Node>, body: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Closure)
        .with_child(param_list(params))
        .with_child(Child::Null)
        .with_child(stmts(body))
        .with_child(Child::Null)
}

pub fn param_list(params: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::ParamList).with_children(params)
}

/// `$name`, optionally with a default value.
pub fn param(param_name: &str, default: Option<Child>) -> Node {
    Node::new(NodeKind::Param)
        .with_child(Child::Null)
        .with_child(param_name)
        .with_child(default.unwrap_or(Child::Null))
}

/// `...$name`.
pub fn variadic_param(param_name: &str) -> Node {
    param(param_name, None).with_flags(ParamFlags::VARIADIC.bits())
}

/// A property group such as `public $a = 1, $b;`.
pub fn prop_decl(modifiers: Modifiers, elements: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::PropDecl)
        .with_flags(modifiers.bits())
        .with_children(elements)
}

pub fn prop_elem(prop_name: &str, default: impl Into<Child>) -> Node {
    Node::new(NodeKind::PropElem)
        .with_child(prop_name)
        .with_child(default)
}

/// A class-constant group such as `const A = 1, B = 'x';`.
pub fn const_decl(elements: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::ClassConstDecl)
        .with_flags(Modifiers::PUBLIC.bits())
        .with_children(elements)
}

pub fn const_elem(const_name: &str, value: impl Into<Child>) -> Node {
    Node::new(NodeKind::ConstElem)
        .with_child(const_name)
        .with_child(value)
}

pub fn arg_list(args: impl IntoIterator<Item = Child>) -> Node {
    Node::new(NodeKind::ArgList).with_children(args)
}

/// `name(args)` where the callee is a plain name.
pub fn call(function_name: &str, args: impl IntoIterator<Item = Child>) -> Node {
    call_expr(name(function_name), args)
}

/// `callee(args)` for an arbitrary callee expression.
pub fn call_expr(callee: Node, args: impl IntoIterator<Item = Child>) -> Node {
    Node::new(NodeKind::Call)
        .with_child(callee)
        .with_child(arg_list(args))
}

/// `Class::method(args)`.
pub fn static_call(class_name: &str, method_name: &str, args: impl IntoIterator<Item = Child>) -> Node {
    Node::new(NodeKind::StaticCall)
        .with_child(name(class_name))
        .with_child(method_name)
        .with_child(arg_list(args))
}

/// `$object->method(args)`.
pub fn method_call(object: Node, method_name: &str, args: impl IntoIterator<Item = Child>) -> Node {
    Node::new(NodeKind::MethodCall)
        .with_child(object)
        .with_child(method_name)
        .with_child(arg_list(args))
}

/// `$name`.
pub fn var(var_name: &str) -> Node {
    Node::new(NodeKind::Var).with_child(var_name)
}

/// `$$inner`: a variable whose name is the value of another expression.
pub fn var_var(inner: Node) -> Node {
    Node::new(NodeKind::Var).with_child(inner)
}

/// `base[index]`.
pub fn dim(base: Node, index: impl Into<Child>) -> Node {
    Node::new(NodeKind::Dim)
        .with_child(base)
        .with_child(index)
}

/// `$object->property`, where the property may be an expression.
pub fn prop(object: Node, property: impl Into<Child>) -> Node {
    Node::new(NodeKind::Prop)
        .with_child(object)
        .with_child(property)
}

/// `Class::$property`, where the property may be an expression.
pub fn static_prop(class_name: &str, property: impl Into<Child>) -> Node {
    Node::new(NodeKind::StaticProp)
        .with_child(name(class_name))
        .with_child(property)
}

/// A constant reference: `null`, `true`, `PHP_EOL`, ...
pub fn constant(const_name: &str) -> Node {
    Node::new(NodeKind::Const).with_child(name(const_name))
}

/// `new Class(args)`.
pub fn new(class_name: &str, args: impl IntoIterator<Item = Child>) -> Node {
    Node::new(NodeKind::New)
        .with_child(name(class_name))
        .with_child(arg_list(args))
}

/// `Class::CONSTANT`.
pub fn class_const(class_name: &str, const_name: &str) -> Node {
    Node::new(NodeKind::ClassConstFetch)
        .with_child(name(class_name))
        .with_child(const_name)
}

/// `[values...]`.
pub fn array(values: impl IntoIterator<Item = Child>) -> Node {
    Node::new(NodeKind::Array).with_children(values.into_iter().map(|value| {
        Node::new(NodeKind::ArrayElem)
            .with_child(value)
            .with_child(Child::Null)
    }))
}

/// `$target = value`.
pub fn assign(target: Node, value: impl Into<Child>) -> Node {
    Node::new(NodeKind::Assign)
        .with_child(target)
        .with_child(value)
}

/// `if (cond) { then } [else { otherwise }]`.
pub fn if_(
    condition: impl Into<Child>,
    then: impl IntoIterator<Item = Node>,
    otherwise: Option<Vec<Node>>,
) -> Node {
    let mut node = Node::new(NodeKind::If).with_child(
        Node::new(NodeKind::IfElem)
            .with_child(condition)
            .with_child(stmts(then)),
    );
    if let Some(otherwise) = otherwise {
        node = node.with_child(
            Node::new(NodeKind::IfElem)
                .with_child(Child::Null)
                .with_child(stmts(otherwise)),
        );
    }
    node
}

pub fn echo(value: impl Into<Child>) -> Node {
    Node::new(NodeKind::Echo).with_child(value)
}

pub fn return_(value: impl Into<Child>) -> Node {
    Node::new(NodeKind::Return).with_child(value)
}
