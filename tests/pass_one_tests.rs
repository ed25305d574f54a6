//! Whole-unit walks through [`File::pass_one`].

use phan::ast::{Child, Node, UseKind, build};
use phan::{
    CodeBase, Configuration, DiagnosticKind, File, Fqsen, Modifiers, ParentConstructorCalled,
};
use proptest::prelude::*;

fn walk(root: Node) -> (CodeBase, phan::PassOneOutput) {
    let mut code_base = CodeBase::new();
    let output = File::new("src/unit.php", root).pass_one(&mut code_base, &Configuration::default());
    (code_base, output)
}

// ==========================================================================
// Scenario
// ==========================================================================

/// `namespace App; use Foo\Bar as B; class X extends B { public $p = 1; function __construct() {} }`
fn scenario() -> Node {
    build::stmts([
        build::namespace("App").at(1),
        build::use_(UseKind::Class, [("Foo\\Bar", Some("B"))]).at(2),
        build::class(
            "X",
            Some("B"),
            [],
            [
                build::prop_decl(Modifiers::PUBLIC, [build::prop_elem("p", 1i64).at(4)]).at(4),
                build::method("__construct", [], []).at(5).with_end_line(5),
            ],
        )
        .at(3)
        .with_end_line(6),
    ])
}

#[test]
fn test_scenario() {
    let (code_base, output) = walk(scenario());

    assert_eq!(output.context.namespace(), "App\\");
    assert!(output.diagnostics.is_empty());

    let x_fqsen = Fqsen::for_class("App\\", "X");
    let x = code_base.class(&x_fqsen).expect("App\\X registered");
    assert_eq!(x.fqsen.to_string(), "App\\X");
    assert_eq!(x.parent, Some(Fqsen::for_class("Foo\\", "Bar")));
    assert_eq!(x.source.span.start, 3);

    assert_eq!(x.properties.len(), 1);
    let p = x.property("p").unwrap();
    assert_eq!(p.union_type.to_string(), "int");
    assert_eq!(p.declared_type, None);

    let methods = code_base.class_methods(&x_fqsen);
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name, "__construct");
    assert_eq!(methods[0].number_of_required_parameters, 0);
    assert!(!x.is_parent_constructor_called());

    assert_eq!(code_base.counters().classes, 1);
    assert_eq!(code_base.counters().methods, 1);
}

#[test]
fn test_rerun_is_deterministic() {
    let (first, _) = walk(scenario());
    let (second, _) = walk(scenario());
    assert_eq!(first, second);
}

// ==========================================================================
// Names and scopes
// ==========================================================================

#[test]
fn test_namespace_propagates_but_class_scope_does_not() {
    let (code_base, _) = walk(build::stmts([
        build::namespace("N"),
        build::class(
            "A",
            None,
            [],
            [build::prop_decl(Modifiers::PUBLIC, [build::prop_elem("only_a", Child::Null)])],
        ),
        build::class("B", None, [], []),
    ]));

    let a = code_base.class(&Fqsen::for_class("N\\", "A")).unwrap();
    let b = code_base.class(&Fqsen::for_class("N\\", "B")).unwrap();
    assert!(a.property("only_a").is_some());
    assert!(b.property("only_a").is_none());
}

#[test]
fn test_alias_precedence() {
    let (code_base, _) = walk(build::stmts([
        build::namespace("X"),
        build::use_(UseKind::Class, [("A\\B", Some("C"))]),
        build::class("Child1", Some("C\\D"), [], []),
        build::class("Child2", Some("E"), [], []),
        build::class("Child3", Some("\\E"), [], []),
    ]));

    let parent = |name: &str| {
        code_base
            .class(&Fqsen::for_class("X\\", name))
            .and_then(|class| class.parent.clone())
            .map(|fqsen| fqsen.to_string())
    };
    assert_eq!(parent("Child1").as_deref(), Some("A\\B\\D"));
    assert_eq!(parent("Child2").as_deref(), Some("X\\E"));
    assert_eq!(parent("Child3").as_deref(), Some("E"));
}

#[test]
fn test_aliases_end_with_their_namespace() {
    let (code_base, _) = walk(build::stmts([
        build::namespace("First"),
        build::use_(UseKind::Class, [("Lib\\Base", None)]),
        build::class("A", Some("Base"), [], []),
        build::namespace("Second"),
        build::class("B", Some("Base"), [], []),
    ]));

    let a = code_base.class(&Fqsen::for_class("First\\", "A")).unwrap();
    assert_eq!(a.parent, Some(Fqsen::for_class("Lib\\", "Base")));
    let b = code_base.class(&Fqsen::for_class("Second\\", "B")).unwrap();
    assert_eq!(b.parent, Some(Fqsen::for_class("Second\\", "Base")));
}

#[test]
fn test_reopened_namespace_drops_imports() {
    let (code_base, _) = walk(build::stmts([
        build::namespace("A"),
        build::use_(UseKind::Class, [("X\\Y", None)]),
        build::class("B", Some("Y"), [], []),
        build::namespace("A"),
        build::class("C", Some("Y"), [], []),
    ]));

    let parent = |name: &str| code_base.class(&Fqsen::for_class("A\\", name)).unwrap().parent.clone();
    assert_eq!(parent("B"), Some(Fqsen::for_class("X\\", "Y")));
    assert_eq!(parent("C"), Some(Fqsen::for_class("A\\", "Y")));
}

#[test]
fn test_braced_namespaces() {
    let (code_base, output) = walk(build::stmts([
        build::namespace_block("One", [build::class("A", None, [], [])]),
        build::namespace_block("", [build::function("main", [], [])]),
    ]));

    assert!(code_base.has_class(&Fqsen::for_class("One\\", "A")));
    assert!(code_base.has_method(&Fqsen::for_function("", "main")));
    assert_eq!(output.context.namespace(), "");
}

#[test]
fn test_group_use_with_mixed_kinds() {
    let (code_base, output) = walk(build::stmts([
        build::namespace("App"),
        build::group_use(
            UseKind::Class,
            "Lib\\Http",
            [
                ("Request", None, None),
                ("Response", Some("Res"), None),
                ("helpers\\respond", None, Some(UseKind::Function)),
            ],
        ),
        build::class("Controller", Some("Request"), ["Res"], []),
        build::returning(build::function("handle", [], []), "respond"),
    ]));

    assert!(output.diagnostics.is_empty());
    let controller = code_base.class(&Fqsen::for_class("App\\", "Controller")).unwrap();
    assert_eq!(controller.parent, Some(Fqsen::for_class("Lib\\Http\\", "Request")));
    assert_eq!(controller.interfaces, vec![Fqsen::for_class("Lib\\Http\\", "Response")]);

    // A function alias does not resolve class-like type names.
    let handle = code_base.method(&Fqsen::for_function("App\\", "handle")).unwrap();
    assert_eq!(
        handle.return_type.as_ref().map(ToString::to_string).as_deref(),
        Some("App\\respond")
    );
}

// ==========================================================================
// Declarations
// ==========================================================================

proptest! {
    #[test]
    fn test_redeclarations_get_sequential_alternate_ids(count in 1usize..12) {
        let (code_base, _) = walk(build::stmts(
            (0..count).map(|_| build::if_(
                build::constant("true"),
                [build::class("Shim", None, [], []), build::function("shim", [], [])],
                None,
            )),
        ));

        let primary = Fqsen::for_class("", "Shim");
        let alternates = code_base.class_alternates(&primary);
        prop_assert_eq!(alternates.len(), count);
        for (expected, class) in alternates.iter().enumerate() {
            prop_assert_eq!(class.fqsen.alternate_id() as usize, expected);
        }

        let functions = code_base.functions();
        prop_assert_eq!(functions.len(), count);
        prop_assert_eq!(code_base.counters().conditionals as usize, count);
    }
}

#[test]
fn test_parent_constructor_call_anywhere_in_body() {
    let constructor = |body: Vec<Node>| {
        build::class("C", Some("Base"), [], [build::method("__construct", [], body)])
    };

    let (without, _) = walk(constructor(vec![build::echo("x")]));
    let fqsen = Fqsen::for_class("", "C");
    assert_eq!(
        without.class(&fqsen).unwrap().parent_constructor_called,
        ParentConstructorCalled::NotCalled
    );

    let nested_call = build::if_(
        build::var("ready"),
        [build::static_call("PARENT", "__Construct", [])],
        None,
    );
    let (with, _) = walk(constructor(vec![nested_call]));
    assert!(with.class(&fqsen).unwrap().is_parent_constructor_called());
}

#[test]
fn test_parent_constructor_call_before_constructor() {
    let (code_base, _) = walk(build::class(
        "C",
        Some("Base"),
        [],
        [
            build::method("init", [], [build::static_call("parent", "__construct", [])]),
            build::method("__construct", [], []),
        ],
    ));

    let c = code_base.class(&Fqsen::for_class("", "C")).unwrap();
    assert_eq!(c.parent_constructor_called, ParentConstructorCalled::Called);
}

#[test]
fn test_property_doc_type_precedence() {
    let (code_base, output) = walk(build::class(
        "A",
        None,
        [],
        [build::prop_decl(Modifiers::PROTECTED, [build::prop_elem("p", "x")])
            .with_doc_comment("/** @var int */")
            .at(9)],
    ));

    let p = code_base
        .class(&Fqsen::for_class("", "A"))
        .and_then(|a| a.property("p"))
        .unwrap();
    assert_eq!(p.declared_type.as_ref().unwrap().to_string(), "int");
    assert_eq!(p.union_type.to_string(), "string");
    assert_eq!(output.diagnostics.type_count(), 1);
    assert_eq!(output.diagnostics.count(), 1);
}

#[test]
fn test_property_union_doc_type_needs_exact_match() {
    let (code_base, output) = walk(build::class(
        "A",
        None,
        [],
        [
            build::prop_decl(Modifiers::PUBLIC, [build::prop_elem("p", 1i64)])
                .with_doc_comment("/** @var int|string */")
                .at(4),
            build::prop_decl(Modifiers::PUBLIC, [build::prop_elem("q", 1i64)])
                .with_doc_comment("/** @var INT */")
                .at(5),
        ],
    ));

    let mismatches: Vec<_> = output.diagnostics.of_kind(DiagnosticKind::Type).collect();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].line, 4);
    assert_eq!(
        mismatches[0].message,
        "property $p is declared to be int|string but was assigned int"
    );

    let a = code_base.class(&Fqsen::for_class("", "A")).unwrap();
    let p = a.property("p").unwrap();
    assert_eq!(p.declared_type.as_ref().unwrap().to_string(), "int|string");
}

#[test]
fn test_property_checks_can_be_disabled() {
    let root = build::class(
        "A",
        None,
        [],
        [build::prop_decl(Modifiers::PUBLIC, [build::prop_elem("p", "x")])
            .with_doc_comment("/** @var int */")],
    );
    let mut code_base = CodeBase::new();
    let config = Configuration::new().with_check_property_doc_types(false);
    let output = File::new("a.php", root).pass_one(&mut code_base, &config);
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_named_doc_vars_match_elements() {
    let (code_base, output) = walk(build::class(
        "A",
        None,
        [],
        [build::prop_decl(
            Modifiers::PUBLIC,
            [build::prop_elem("a", Child::Null), build::prop_elem("b", Child::Null)],
        )
        .with_doc_comment("/**\n * @var string $b\n * @var int $a\n */")],
    ));

    let a = code_base.class(&Fqsen::for_class("", "A")).unwrap();
    let declared = |name: &str| a.property(name).and_then(|p| p.declared_type.clone()).map(|t| t.to_string());
    assert_eq!(declared("a").as_deref(), Some("int"));
    assert_eq!(declared("b").as_deref(), Some("string"));
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_fatal_declaration_recovery() {
    let (code_base, output) = walk(build::stmts([
        build::const_decl([build::const_elem("A", 1i64)]).at(3),
        build::function("after", [], []).at(4),
    ]));

    assert_eq!(output.diagnostics.count(), 1);
    let fatal = output.diagnostics.iter().next().unwrap();
    assert_eq!(fatal.kind, DiagnosticKind::Fatal);
    assert_eq!(fatal.message, "Invalid constant declaration");
    assert_eq!(fatal.line, 3);
    assert_eq!(fatal.file, "src/unit.php");

    assert!(code_base.has_method(&Fqsen::for_function("", "after")));
    assert_eq!(output.functions_registered, 1);
}

#[test]
fn test_conditional_marker_follows_config() {
    let root = || {
        build::if_(
            build::constant("true"),
            [build::function("maybe", [], [])],
            None,
        )
    };

    let (recorded, _) = walk(root());
    assert!(recorded.method(&Fqsen::for_function("", "maybe")).unwrap().is_conditional);

    let mut code_base = CodeBase::new();
    let config = Configuration::new().with_record_conditional_declarations(false);
    File::new("a.php", root()).pass_one(&mut code_base, &config);
    assert!(!code_base.method(&Fqsen::for_function("", "maybe")).unwrap().is_conditional);
}

#[test]
fn test_interfaces_and_traits() {
    let (code_base, _) = walk(build::stmts([
        build::namespace("App"),
        build::interface("Jsonable", []),
        build::trait_("HasId", [build::method("id", [], [])]),
        build::class("Post", None, ["Jsonable"], [build::use_trait(["HasId"])]),
    ]));

    let jsonable = code_base.class(&Fqsen::for_class("App\\", "Jsonable")).unwrap();
    assert!(jsonable.is_interface());
    let has_id = code_base.class(&Fqsen::for_class("App\\", "HasId")).unwrap();
    assert!(has_id.is_trait());

    let post = code_base.class(&Fqsen::for_class("App\\", "Post")).unwrap();
    assert_eq!(post.interfaces, vec![Fqsen::for_class("App\\", "Jsonable")]);
    assert_eq!(post.traits, vec![Fqsen::for_class("App\\", "HasId")]);
    assert_eq!(code_base.counters().classes, 3);
}

#[test]
fn test_doc_comment_facts_on_methods() {
    let method = build::method("legacy", [], [])
        .with_doc_comment("/**\n * @deprecated\n * @return int|null\n */");
    let (code_base, _) = walk(build::class("A", None, [], [method]));

    let legacy = code_base
        .method(&Fqsen::for_class("", "A").with_method_name("legacy"))
        .unwrap();
    assert!(legacy.is_deprecated());
    assert_eq!(
        legacy.return_type.as_ref().map(ToString::to_string).as_deref(),
        Some("int|null")
    );
}

#[test]
fn test_func_get_args_in_method() {
    let (code_base, _) = walk(build::class(
        "A",
        None,
        [],
        [
            build::method("variadic", [], [build::assign(build::var("args"), build::call("\\func_get_args", []))]),
            build::method("fixed", [], [build::closure([], [build::call("func_get_arg", [Child::Int(0)])])]),
        ],
    ));

    let class = Fqsen::for_class("", "A");
    assert!(code_base.method(&class.with_method_name("variadic")).unwrap().accepts_unlimited_parameters());
    assert!(!code_base.method(&class.with_method_name("fixed")).unwrap().accepts_unlimited_parameters());
}

#[test]
fn test_anonymous_classes_inside_methods() {
    let (code_base, output) = walk(build::class(
        "Factory",
        None,
        [],
        [build::method(
            "make",
            [],
            [build::return_(build::anonymous_class([build::method("__invoke", [], [])]))],
        )],
    ));

    assert!(output.diagnostics.is_empty());
    let anonymous = code_base
        .class(&Fqsen::for_class("", phan::analysis::ANONYMOUS_CLASS_NAME))
        .unwrap();
    assert!(anonymous.union_type.has_type_name("callable"));
    assert!(code_base.has_method(&anonymous.fqsen.with_method_name("__invoke")));
}
