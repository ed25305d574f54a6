//! Pass-one benchmarks over synthetic syntax trees.
//!
//! - Size-based: 10 to 1000 classes in one unit
//! - Redeclaration-heavy: the same class and function declared in many branches
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use phan::ast::{Node, UseKind, build};
use phan::{CodeBase, Configuration, File, Modifiers};
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// One namespace holding `classes` classes, each with a constructor calling
/// its parent, two properties and a constant.
fn synthetic_unit(classes: usize) -> Node {
    let mut statements = vec![
        build::namespace("Bench\\Models"),
        build::use_(UseKind::Class, [("Bench\\Support\\Model", None)]),
    ];
    for i in 0..classes {
        let name = format!("Model{i}");
        statements.push(build::class(
            &name,
            Some("Model"),
            [],
            [
                build::prop_decl(
                    Modifiers::PUBLIC,
                    [build::prop_elem("id", 0i64), build::prop_elem("name", "")],
                )
                .with_doc_comment("/** @var int */"),
                build::const_decl([build::const_elem("TABLE", "models")]),
                build::method(
                    "__construct",
                    [build::param("id", None)],
                    [build::static_call("parent", "__construct", [])],
                ),
                build::method("save", [], [build::return_(build::constant("true"))]),
            ],
        ));
    }
    build::stmts(statements)
}

/// `count` conditional redeclarations of the same class and function.
fn redeclaration_unit(count: usize) -> Node {
    build::stmts((0..count).map(|_| {
        build::if_(
            build::constant("true"),
            [
                build::class("Polyfill", None, [], [build::method("run", [], [])]),
                build::function("helper", [], []),
            ],
            None,
        )
    }))
}

fn size_based_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let config = Configuration::default();

    let mut group = c.benchmark_group("pass_one/classes");
    for classes in [10, 100, 1000] {
        let file = File::new("bench.php", synthetic_unit(classes));
        group.throughput(Throughput::Elements(file.root().size() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(classes), &file, |b, file| {
            b.iter(|| {
                let mut code_base = CodeBase::new();
                let output = file.pass_one(&mut code_base, &config);
                end_profiling_frame();
                black_box(output.classes_registered)
            });
        });
    }
    group.finish();
}

fn redeclaration_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let config = Configuration::default();

    let mut group = c.benchmark_group("pass_one/redeclarations");
    for count in [10, 100] {
        let file = File::new("polyfill.php", redeclaration_unit(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &file, |b, file| {
            b.iter(|| {
                let mut code_base = CodeBase::new();
                file.pass_one(&mut code_base, &config);
                end_profiling_frame();
                black_box(code_base.class_count())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, size_based_benchmarks, redeclaration_benchmarks);
criterion_main!(benches);
