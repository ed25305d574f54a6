//! Class-like entity.
//!
//! One [`Class`] record covers classes, interfaces and traits; the
//! [`ClassFlags`] say which.

use crate::{ClassFlags, Comment, Fqsen, UnionType};

use super::{ClassConstant, Property, Source};

/// Whether a class's constructor is known to call its parent's constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentConstructorCalled {
    /// No constructor declared, so nothing to prove.
    #[default]
    NotRequired,
    /// A constructor exists and no `parent::__construct()` call has been seen.
    NotCalled,
    /// A `parent::__construct()` call was seen.
    Called,
}

/// Registry entry for a class, interface or trait.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Identity, including the alternate id for redeclarations.
    pub fqsen: Fqsen,
    /// Name as written in the declaration.
    pub name: String,
    pub source: Source,
    pub comment: Comment,
    /// Nominal type: the class's own name, plus capabilities such as `callable`.
    pub union_type: UnionType,
    pub flags: ClassFlags,
    /// Declared inside a conditional branch.
    pub is_conditional: bool,

    // === Hierarchy ===
    pub parent: Option<Fqsen>,
    pub interfaces: Vec<Fqsen>,
    pub traits: Vec<Fqsen>,

    // === Members ===
    /// Method identities in declaration order; the entities live in the code base.
    pub methods: Vec<Fqsen>,
    pub properties: Vec<Property>,
    pub constants: Vec<ClassConstant>,

    pub parent_constructor_called: ParentConstructorCalled,
}

impl Class {
    /// Create a class entry with no members.
    pub fn new(fqsen: Fqsen, name: impl Into<String>, source: Source, flags: ClassFlags) -> Self {
        let name = name.into();
        Self {
            union_type: UnionType::from_name(&name),
            fqsen,
            name,
            source,
            comment: Comment::none(),
            flags,
            is_conditional: false,
            parent: None,
            interfaces: Vec::new(),
            traits: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            constants: Vec::new(),
            parent_constructor_called: ParentConstructorCalled::default(),
        }
    }

    // === Builder Methods ===

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_parent(mut self, parent: Option<Fqsen>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_interfaces(mut self, interfaces: Vec<Fqsen>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn conditional(mut self, is_conditional: bool) -> Self {
        self.is_conditional = is_conditional;
        self
    }

    // === Mutation while the declaration is being walked ===

    /// Add a trait. The trait set holds each FQSEN once.
    pub fn add_trait(&mut self, trait_fqsen: Fqsen) {
        if !self.traits.contains(&trait_fqsen) {
            self.traits.push(trait_fqsen);
        }
    }

    pub fn add_method(&mut self, method_fqsen: Fqsen) {
        self.methods.push(method_fqsen);
    }

    pub fn has_method(&self, method_fqsen: &Fqsen) -> bool {
        self.methods.contains(method_fqsen)
    }

    /// Add a property, or update the one already declared under that name.
    ///
    /// Redeclaring a property replaces its types and flags in place, so a
    /// class never holds two properties with the same name.
    pub fn add_property(&mut self, property: Property) {
        match self.property_mut(&property.name) {
            Some(existing) => {
                existing.union_type = property.union_type;
                existing.declared_type = property.declared_type;
                existing.modifiers = property.modifiers;
                existing.source = property.source;
            }
            None => self.properties.push(property),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.name == name)
    }

    /// Add a class constant, replacing one of the same name.
    pub fn add_constant(&mut self, constant: ClassConstant) {
        match self.constants.iter_mut().find(|c| c.name == constant.name) {
            Some(existing) => *existing = constant,
            None => self.constants.push(constant),
        }
    }

    pub fn constant(&self, name: &str) -> Option<&ClassConstant> {
        self.constants.iter().find(|c| c.name == name)
    }

    /// A constructor was declared; a later pass must prove the parent call.
    ///
    /// A parent call already seen elsewhere in the class is kept.
    pub fn require_parent_constructor_call(&mut self) {
        if self.parent_constructor_called == ParentConstructorCalled::NotRequired {
            self.parent_constructor_called = ParentConstructorCalled::NotCalled;
        }
    }

    pub fn set_parent_constructor_called(&mut self) {
        self.parent_constructor_called = ParentConstructorCalled::Called;
    }

    /// False only when a constructor exists and no parent call was seen.
    pub fn is_parent_constructor_called(&self) -> bool {
        self.parent_constructor_called != ParentConstructorCalled::NotCalled
    }

    /// Instances of this class can be invoked.
    pub fn mark_callable(&mut self) {
        self.union_type.add_type_name(crate::union_type::CALLABLE);
    }

    pub fn is_interface(&self) -> bool {
        self.flags.is_interface()
    }

    pub fn is_trait(&self) -> bool {
        self.flags.is_trait()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LineSpan, Modifiers};

    fn class(name: &str) -> Class {
        Class::new(
            Fqsen::for_class("App\\", name),
            name,
            Source::new("a.php".into(), LineSpan::new(1, Some(10))),
            ClassFlags::empty(),
        )
    }

    #[test]
    fn nominal_type_is_own_name() {
        let c = class("User");
        assert_eq!(c.union_type.to_string(), "User");
        assert!(c.is_parent_constructor_called());
    }

    #[test]
    fn callable_marker() {
        let mut c = class("Handler");
        c.mark_callable();
        assert!(c.union_type.has_type_name("callable"));
        assert!(c.union_type.has_type_name("Handler"));
    }

    #[test]
    fn constructor_tracking() {
        let mut c = class("Child");
        c.require_parent_constructor_call();
        assert!(!c.is_parent_constructor_called());
        c.set_parent_constructor_called();
        assert!(c.is_parent_constructor_called());
    }

    #[test]
    fn earlier_parent_call_survives_constructor() {
        let mut c = class("Child");
        c.set_parent_constructor_called();
        c.require_parent_constructor_call();
        assert_eq!(c.parent_constructor_called, ParentConstructorCalled::Called);
    }

    #[test]
    fn property_redeclaration_updates_in_place() {
        let mut c = class("P");
        let source = Source::new("a.php".into(), LineSpan::line(2));
        c.add_property(Property::new("x", UnionType::from_name("int"), Modifiers::PUBLIC, source.clone()));
        c.add_property(Property::new("x", UnionType::from_name("string"), Modifiers::PRIVATE, source));
        assert_eq!(c.properties.len(), 1);
        let x = c.property("x").unwrap();
        assert_eq!(x.union_type.to_string(), "string");
        assert_eq!(x.modifiers, Modifiers::PRIVATE);
    }

    #[test]
    fn traits_are_a_set() {
        let mut c = class("T");
        let t = Fqsen::for_class("App\\", "Loggable");
        c.add_trait(t.clone());
        c.add_trait(t);
        assert_eq!(c.traits.len(), 1);
    }
}
