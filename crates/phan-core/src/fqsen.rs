//! Fully-qualified structural element names.
//!
//! An [`Fqsen`] is the identity under which every declaration is stored in the
//! code base. It is structured (namespace segments, class, method) rather than
//! a flat string so that a class alias and a function alias can never collide
//! by accident, and it carries an alternate id that tells redeclarations of the
//! same name apart.
//!
//! # Examples
//!
//! ```
//! use phan_core::Fqsen;
//!
//! let class = Fqsen::for_class("App\\", "User");
//! assert_eq!(class.to_string(), "App\\User");
//!
//! let method = class.with_method_name("save");
//! assert_eq!(method.to_string(), "App\\User::save");
//!
//! let redeclared = class.with_alternate_id(1);
//! assert_eq!(redeclared.to_string(), "App\\User,1");
//! assert_ne!(class, redeclared);
//! ```

use std::fmt;

/// Separator between namespace segments.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Identity of a declared namespace, class, trait, method or function.
///
/// Two FQSENs are equal only if every field matches, alternate id included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Fqsen {
    namespace: Vec<String>,
    class_name: Option<String>,
    /// Alternate id of the owning class when this names a method.
    class_alternate_id: u32,
    method_name: Option<String>,
    alternate_id: u32,
}

impl Fqsen {
    /// An FQSEN naming a namespace only (e.g. `App\Models\`).
    ///
    /// Leading and trailing separators are ignored; the empty string is the
    /// global namespace.
    pub fn for_namespace(namespace: &str) -> Self {
        Self {
            namespace: split_namespace(namespace),
            ..Self::default()
        }
    }

    /// A class-like FQSEN declared in `namespace`.
    pub fn for_class(namespace: &str, class_name: impl Into<String>) -> Self {
        Self::for_namespace(namespace).with_class_name(class_name)
    }

    /// A free-function FQSEN declared in `namespace`.
    ///
    /// Function names are case-insensitive in the analyzed language, so the
    /// name is stored lowercased.
    pub fn for_function(namespace: &str, function_name: &str) -> Self {
        Self::for_namespace(namespace).with_method_name(function_name.to_lowercase())
    }

    /// Parse a fully-qualified class-like name such as `\Foo\Bar` or `Foo\Bar`.
    ///
    /// The last segment becomes the class name. Returns `None` for an empty name.
    pub fn from_fully_qualified_class(name: &str) -> Option<Self> {
        let trimmed = name.trim_start_matches(NAMESPACE_SEPARATOR);
        let (namespace, class_name) = match trimmed.rfind(NAMESPACE_SEPARATOR) {
            Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
            None => ("", trimmed),
        };
        if class_name.is_empty() {
            return None;
        }
        Some(Self::for_class(namespace, class_name))
    }

    /// Same identity with a different class name.
    pub fn with_class_name(&self, class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..self.clone()
        }
    }

    /// Same identity with a different method (or function) name.
    ///
    /// Called on a class FQSEN, the class's alternate id moves into the owner
    /// slot and the method starts its own redeclaration counter at 0, so the
    /// methods of two alternate classes never share an identity.
    pub fn with_method_name(&self, method_name: impl Into<String>) -> Self {
        let class_alternate_id = if self.method_name.is_none() && self.class_name.is_some() {
            self.alternate_id
        } else {
            self.class_alternate_id
        };
        Self {
            method_name: Some(method_name.into()),
            class_alternate_id,
            alternate_id: 0,
            ..self.clone()
        }
    }

    /// Same identity with a different alternate id.
    pub fn with_alternate_id(&self, alternate_id: u32) -> Self {
        Self {
            alternate_id,
            ..self.clone()
        }
    }

    /// Namespace segments, outermost first. Empty for the global namespace.
    pub fn namespace_segments(&self) -> &[String] {
        &self.namespace
    }

    /// The namespace in its context form: segments joined by `\` with a
    /// trailing separator, or the empty string for the global namespace.
    pub fn namespace_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.namespace {
            out.push_str(segment);
            out.push(NAMESPACE_SEPARATOR);
        }
        out
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    pub fn alternate_id(&self) -> u32 {
        self.alternate_id
    }

    /// Whether this is the first declaration of its name.
    pub fn is_primary(&self) -> bool {
        self.alternate_id == 0
    }

    /// The primary (alternate id 0) form of this FQSEN.
    pub fn canonical(&self) -> Self {
        self.with_alternate_id(0)
    }

    /// The FQSEN of the class this element belongs to, if any.
    ///
    /// For a method of `App\User` this returns `App\User`; for a class it
    /// returns the class itself.
    pub fn class_fqsen(&self) -> Option<Self> {
        self.class_name.as_ref()?;
        if self.method_name.is_some() {
            Some(Self {
                namespace: self.namespace.clone(),
                class_name: self.class_name.clone(),
                class_alternate_id: 0,
                method_name: None,
                alternate_id: self.class_alternate_id,
            })
        } else {
            Some(self.clone())
        }
    }

    /// The innermost name: method, then class, then last namespace segment.
    pub fn name(&self) -> &str {
        self.method_name
            .as_deref()
            .or(self.class_name.as_deref())
            .or(self.namespace.last().map(String::as_str))
            .unwrap_or("")
    }
}

impl fmt::Display for Fqsen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.namespace {
            if !first {
                write!(f, "{NAMESPACE_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        if let Some(class_name) = &self.class_name {
            if !first {
                write!(f, "{NAMESPACE_SEPARATOR}")?;
            }
            write!(f, "{class_name}")?;
            if self.method_name.is_some() && self.class_alternate_id > 0 {
                write!(f, ",{}", self.class_alternate_id)?;
            }
            first = false;
        }
        if let Some(method_name) = &self.method_name {
            if self.class_name.is_some() {
                write!(f, "::")?;
            } else if !first {
                write!(f, "{NAMESPACE_SEPARATOR}")?;
            }
            write!(f, "{method_name}")?;
        }
        if self.alternate_id > 0 {
            write!(f, ",{}", self.alternate_id)?;
        }
        Ok(())
    }
}

fn split_namespace(namespace: &str) -> Vec<String> {
    namespace
        .split(NAMESPACE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_class() {
        let fqsen = Fqsen::for_class("", "Player");
        assert_eq!(fqsen.to_string(), "Player");
        assert!(fqsen.namespace_segments().is_empty());
        assert_eq!(fqsen.namespace_string(), "");
    }

    #[test]
    fn namespaced_class() {
        let fqsen = Fqsen::for_class("\\Game\\Core\\", "Entity");
        assert_eq!(fqsen.to_string(), "Game\\Core\\Entity");
        assert_eq!(fqsen.namespace_string(), "Game\\Core\\");
        assert_eq!(fqsen.name(), "Entity");
    }

    #[test]
    fn function_names_are_lowercased() {
        let fqsen = Fqsen::for_function("App\\", "DoThing");
        assert_eq!(fqsen.to_string(), "App\\dothing");
        assert_eq!(fqsen.class_name(), None);
    }

    #[test]
    fn method_display_and_owner() {
        let class = Fqsen::for_class("App\\", "X");
        let method = class.with_method_name("__construct");
        assert_eq!(method.to_string(), "App\\X::__construct");
        assert_eq!(method.class_fqsen(), Some(class));
    }

    #[test]
    fn alternate_ids_distinguish() {
        let a = Fqsen::for_class("N\\", "A");
        let b = a.with_alternate_id(2);
        assert_ne!(a, b);
        assert_eq!(b.canonical(), a);
        assert_eq!(b.to_string(), "N\\A,2");
        assert!(!b.is_primary());
    }

    #[test]
    fn method_of_alternate_class_is_distinct() {
        let primary = Fqsen::for_class("", "A");
        let alternate = primary.with_alternate_id(1);
        let method = alternate.with_method_name("run");
        assert_eq!(method.alternate_id(), 0);
        assert_ne!(method, primary.with_method_name("run"));
        assert_eq!(method.to_string(), "A,1::run");
        assert_eq!(method.class_fqsen(), Some(alternate));
    }

    #[test]
    fn parse_fully_qualified() {
        let fqsen = Fqsen::from_fully_qualified_class("\\Foo\\Bar").unwrap();
        assert_eq!(fqsen, Fqsen::for_class("Foo\\", "Bar"));
        assert_eq!(Fqsen::from_fully_qualified_class("Baz"), Some(Fqsen::for_class("", "Baz")));
        assert_eq!(Fqsen::from_fully_qualified_class("\\"), None);
    }

    proptest::proptest! {
        #[test]
        fn alternate_ids_decide_equality(
            namespace in "([A-Z][a-z]{0,5}\\\\){0,3}",
            name in "[A-Za-z_][A-Za-z0-9_]{0,8}",
            a in 0u32..64,
            b in 0u32..64,
        ) {
            let base = Fqsen::for_class(&namespace, name);
            let left = base.with_alternate_id(a);
            let right = base.with_alternate_id(b);
            proptest::prop_assert_eq!(left == right, a == b);
            proptest::prop_assert_eq!(left.canonical(), right.canonical());
        }
    }
}
