//! Type descriptors.
//!
//! A [`UnionType`] is an unordered set of type names (`int`, `string`,
//! `callable`, `App\User`, ...). The empty set is the distinguished "none"
//! value meaning the type is unknown to this pass.

use std::collections::BTreeSet;
use std::fmt;

use crate::fqsen::NAMESPACE_SEPARATOR;

/// Names the analyzed language treats as builtin types. These are stored
/// lowercased; everything else is a class-like name and keeps its case.
const BUILTIN_TYPES: &[&str] = &[
    "array", "bool", "callable", "false", "float", "int", "iterable", "mixed", "null", "object",
    "parent", "resource", "self", "static", "string", "true", "void",
];

/// The `callable` capability marker added to classes that declare `__invoke`.
pub const CALLABLE: &str = "callable";

/// An immutable-by-convention union of type names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UnionType {
    names: BTreeSet<String>,
}

impl UnionType {
    /// The "none"/unknown type.
    pub fn none() -> Self {
        Self::default()
    }

    /// A single-name type.
    pub fn from_name(name: &str) -> Self {
        let mut union = Self::none();
        union.add_type_name(name);
        union
    }

    /// A union of the given names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut union = Self::none();
        for name in names {
            union.add_type_name(name);
        }
        union
    }

    /// Parse a doc-comment type such as `int|string|null`, `?Foo` or `\App\User[]`.
    ///
    /// Unparseable fragments are skipped; an empty annotation yields none.
    pub fn from_doc_annotation(text: &str) -> Self {
        let mut union = Self::none();
        for part in text.split('|') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match part.strip_prefix('?') {
                Some(nullable) => {
                    union.add_type_name(nullable);
                    union.add_type_name("null");
                }
                None => union.add_type_name(part),
            }
        }
        union
    }

    /// Add a name in place.
    ///
    /// Only used while an entity is still being built (e.g. marking a class
    /// `callable` when its `__invoke` method is seen).
    pub fn add_type_name(&mut self, name: &str) {
        if let Some(canonical) = canonical_name(name) {
            self.names.insert(canonical);
        }
    }

    /// Set union. Merging with none yields the other operand.
    pub fn merge(&self, other: &UnionType) -> UnionType {
        let mut names = self.names.clone();
        names.extend(other.names.iter().cloned());
        UnionType { names }
    }

    pub fn is_none(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether this is exactly `null`.
    pub fn is_null(&self) -> bool {
        self.names.len() == 1 && self.names.contains("null")
    }

    /// Case-insensitive membership test.
    pub fn has_type_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Set equality after case normalization.
    pub fn is_equivalent_to(&self, other: &UnionType) -> bool {
        self.normalized() == other.normalized()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn normalized(&self) -> BTreeSet<String> {
        self.names.iter().map(|n| n.to_ascii_lowercase()).collect()
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

fn canonical_name(name: &str) -> Option<String> {
    let name = name.trim().trim_start_matches(NAMESPACE_SEPARATOR);
    if name.is_empty() {
        return None;
    }
    let lower = name.to_ascii_lowercase();
    let canonical = match lower.as_str() {
        "integer" => "int",
        "boolean" => "bool",
        "double" | "real" => "float",
        other if BUILTIN_TYPES.contains(&other) => other,
        _ => return Some(name.to_string()),
    };
    Some(canonical.to_string())
}
