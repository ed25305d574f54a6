//! Class member entities: properties and class constants.

use crate::{Modifiers, UnionType};

use super::Source;

/// A property declared in a class body.
///
/// Two types are tracked: `union_type` is inferred from the default-value
/// expression, `declared_type` comes from an `@var` doc annotation. When
/// both exist the declared type is authoritative for later checks, but both
/// are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    /// Type inferred from the default value.
    pub union_type: UnionType,
    /// Type from the doc comment, if any.
    pub declared_type: Option<UnionType>,
    pub modifiers: Modifiers,
    pub source: Source,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        union_type: UnionType,
        modifiers: Modifiers,
        source: Source,
    ) -> Self {
        Self {
            name: name.into(),
            union_type,
            declared_type: None,
            modifiers,
            source,
        }
    }

    pub fn with_declared_type(mut self, declared_type: Option<UnionType>) -> Self {
        self.declared_type = declared_type;
        self
    }

    /// The type later passes should check against: the declared type when
    /// present, otherwise the inferred one.
    pub fn effective_type(&self) -> &UnionType {
        self.declared_type.as_ref().unwrap_or(&self.union_type)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }
}

/// A constant declared in a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassConstant {
    pub name: String,
    pub union_type: UnionType,
    pub modifiers: Modifiers,
    pub source: Source,
}

impl ClassConstant {
    pub fn new(
        name: impl Into<String>,
        union_type: UnionType,
        modifiers: Modifiers,
        source: Source,
    ) -> Self {
        Self {
            name: name.into(),
            union_type,
            modifiers,
            source,
        }
    }
}
