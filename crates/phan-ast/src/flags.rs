//! Typed views of the raw `flags` field.
//!
//! What the bits mean depends on the node kind. Class declarations use
//! [`ClassFlags`](phan_core::ClassFlags) and member declarations use
//! [`Modifiers`](phan_core::Modifiers); the kinds below are specific to the
//! tree.

use bitflags::bitflags;

/// How a `Name` node was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    /// `\Foo\Bar`. The stored string has no leading separator.
    FullyQualified,
    /// `Foo\Bar` or `Bar`.
    NotFullyQualified,
    /// `namespace\Bar`. The stored string has the `namespace\` prefix removed.
    Relative,
}

impl NameKind {
    pub const FQ: u32 = 0;
    pub const NOT_FQ: u32 = 1;
    pub const RELATIVE: u32 = 2;

    pub fn from_flags(flags: u32) -> Self {
        match flags {
            Self::FQ => NameKind::FullyQualified,
            Self::RELATIVE => NameKind::Relative,
            _ => NameKind::NotFullyQualified,
        }
    }

    pub fn flags(self) -> u32 {
        match self {
            NameKind::FullyQualified => Self::FQ,
            NameKind::NotFullyQualified => Self::NOT_FQ,
            NameKind::Relative => Self::RELATIVE,
        }
    }
}

/// What a `use` statement imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseKind {
    /// Class-like names (classes, interfaces, traits, namespaces).
    Class,
    Function,
    Constant,
}

impl UseKind {
    pub const NORMAL: u32 = 1;
    pub const FUNCTION: u32 = 2;
    pub const CONST: u32 = 4;

    /// Decode a use kind; `0` means "not given" (a group-use element that
    /// inherits the group's kind).
    pub fn from_flags(flags: u32) -> Option<Self> {
        match flags {
            Self::NORMAL => Some(UseKind::Class),
            Self::FUNCTION => Some(UseKind::Function),
            Self::CONST => Some(UseKind::Constant),
            _ => None,
        }
    }

    pub fn flags(self) -> u32 {
        match self {
            UseKind::Class => Self::NORMAL,
            UseKind::Function => Self::FUNCTION,
            UseKind::Constant => Self::CONST,
        }
    }
}

bitflags! {
    /// Flags on a `Param` node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParamFlags: u32 {
        const BY_REF = 1 << 0;
        const VARIADIC = 1 << 1;
    }
}
