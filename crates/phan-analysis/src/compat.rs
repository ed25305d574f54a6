//! PHP 7 backward-compatibility checks.
//!
//! PHP 7 changed indirect variable, property and method references to
//! evaluate strictly left to right. `$$a['b']` used to mean `${$a['b']}` and
//! now means `($$a)['b']`. Code written for the old order is only unambiguous
//! when braces make the grouping explicit, so a flagged pattern is reported
//! unless its source line contains both `{` and `}`.
//!
//! The check only observes: it never touches the context or the code base.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use phan_ast::{Node, NodeKind};
use phan_core::Issue;

use crate::{Configuration, Context};

/// Check `node` for an expression whose meaning changed in PHP 7.
///
/// Returns `None` when checks are disabled, the node matches no pattern, or
/// its source line already disambiguates with braces.
pub fn check_compatibility(config: &Configuration, context: &Context, node: &Node) -> Option<Issue> {
    if !config.backward_compatibility_checks {
        return None;
    }
    let expression = ambiguous_expression(node)?;

    match read_source_line(context.file(), node.line) {
        Ok(Some(line)) if line.contains('{') && line.contains('}') => None,
        Ok(Some(_)) => Some(Issue::Compatibility { expression }),
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(
                file = context.file(),
                line = node.line,
                error = %err,
                "could not re-read source line for compatibility check"
            );
            None
        }
    }
}

/// Render the expression if `node` is one of the order-sensitive patterns.
fn ambiguous_expression(node: &Node) -> Option<String> {
    match node.kind {
        NodeKind::Dim => {
            let base = node.child_node(0)?;
            match base.kind {
                // $$a[]
                NodeKind::Var => {
                    let inner = base.child_node(0)?;
                    let (depth, name) = variable_variable(inner);
                    Some(format!("{}{name}[]", "$".repeat(depth + 1)))
                }
                // $a->$b[]
                NodeKind::Prop => {
                    let object = base.child_node(0).filter(|n| n.kind == NodeKind::Var)?;
                    let property = base.child_node(1).filter(|n| n.kind == NodeKind::Var)?;
                    Some(format!(
                        "${}->${}[]",
                        object.child_str(0).unwrap_or_default(),
                        property.child_str(0).unwrap_or_default()
                    ))
                }
                _ => None,
            }
        }
        // Foo::$bar[]()
        NodeKind::Call => {
            let callee = node.child_node(0).filter(|n| n.kind == NodeKind::Dim)?;
            let base = callee.child_node(0).filter(|n| n.kind == NodeKind::StaticProp)?;
            let property = base.child_node(1).filter(|n| n.kind == NodeKind::Var)?;
            let class = base
                .child_node(0)
                .and_then(|n| n.child_str(0))
                .unwrap_or_default();
            Some(format!(
                "{class}::${}[]()",
                property.child_str(0).unwrap_or_default()
            ))
        }
        _ => None,
    }
}

/// Follow a chain of `Var` nodes to the innermost name, counting the levels.
fn variable_variable(node: &Node) -> (usize, &str) {
    let mut depth = 1;
    let mut current = node;
    while let Some(inner) = current.child_node(0) {
        depth += 1;
        current = inner;
    }
    (depth, current.child_str(0).unwrap_or_default())
}

/// Read one line (1-based) of `path`. The file is closed before returning.
///
/// Bytes that are not UTF-8 are replaced, so legacy-encoded sources still
/// yield their line. Returns `Ok(None)` for line `0` or a line past the end
/// of the file.
pub fn read_source_line(path: impl AsRef<Path>, line: u32) -> io::Result<Option<String>> {
    let Some(index) = (line as usize).checked_sub(1) else {
        return Ok(None);
    };
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = Vec::new();
    for _ in 0..=index {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
    }
    let text = String::from_utf8_lossy(&buf);
    Ok(Some(text.trim_end_matches(['\n', '\r']).to_string()))
}
