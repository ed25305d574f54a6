//! Declaration flag sets.
//!
//! The syntax tree stores flags as a raw `u32` whose meaning depends on the
//! node kind. These types give the declaration-related meanings names; the
//! bit values are part of the tree contract shared with `phan-ast`.

use std::fmt;

use bitflags::bitflags;

/// Member visibility derived from [`Modifiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Flags on a class-like declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassFlags: u32 {
        const ABSTRACT = 1 << 0;
        const FINAL = 1 << 1;
        const INTERFACE = 1 << 2;
        const TRAIT = 1 << 3;
        const ANONYMOUS = 1 << 4;
        const ENUM = 1 << 5;
        const READONLY = 1 << 6;
    }
}

bitflags! {
    /// Member modifiers on methods, functions, properties and constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const ABSTRACT = 1 << 4;
        const FINAL = 1 << 5;
        const READONLY = 1 << 6;
        /// Function or method returns by reference.
        const RETURNS_REF = 1 << 7;
    }
}

impl ClassFlags {
    pub fn is_interface(self) -> bool {
        self.contains(Self::INTERFACE)
    }

    pub fn is_trait(self) -> bool {
        self.contains(Self::TRAIT)
    }

    pub fn is_anonymous(self) -> bool {
        self.contains(Self::ANONYMOUS)
    }
}

impl Modifiers {
    /// Visibility implied by the modifiers; members default to public.
    pub fn visibility(self) -> Visibility {
        if self.contains(Self::PRIVATE) {
            Visibility::Private
        } else if self.contains(Self::PROTECTED) {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }

    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }
}
