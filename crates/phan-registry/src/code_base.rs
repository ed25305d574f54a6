//! CodeBase - the cross-file declaration registry.
//!
//! # Storage Model
//!
//! - **Classes**: classes, interfaces and traits keyed by [`Fqsen`]
//! - **Methods**: class methods and free functions in one map keyed by
//!   [`Fqsen`]. A class keeps the ordered list of its method FQSENs; the
//!   method records themselves live here.
//! - **Counters**: monotonic declaration counts, see [`Counters`]
//!
//! Insertion refuses an FQSEN that is already present, so the registry never
//! holds two entities under one identity. Callers that must register every
//! declaration probe for a free alternate id first.
//!
//! # Thread Safety
//!
//! `CodeBase` is **not thread-safe**. A probe followed by an insert is a
//! read-then-write sequence, so concurrent writers must hold a lock for the
//! whole walk of a source unit (e.g. `Mutex<CodeBase>`).
//!
//! # Example
//!
//! ```
//! use phan_core::{Class, ClassFlags, Fqsen, Source};
//! use phan_registry::CodeBase;
//!
//! let mut code_base = CodeBase::new();
//! let fqsen = Fqsen::for_class("App\\", "User");
//! code_base
//!     .add_class(Class::new(fqsen.clone(), "User", Source::default(), ClassFlags::empty()))
//!     .unwrap();
//!
//! assert!(code_base.has_class(&fqsen));
//! assert!(code_base.add_class(Class::new(fqsen, "User", Source::default(), ClassFlags::empty())).is_err());
//! ```

use rustc_hash::FxHashMap;

use phan_core::{Class, Fqsen, Method, RegistrationError};

use crate::Counters;

/// Registry of every class, method and function declared across a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeBase {
    classes: FxHashMap<Fqsen, Class>,
    methods: FxHashMap<Fqsen, Method>,
    counters: Counters,
}

impl CodeBase {
    /// Create an empty code base.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Classes
    // ==========================================================================

    /// Register a class.
    ///
    /// Returns an error if a class is already registered under its FQSEN.
    pub fn add_class(&mut self, class: Class) -> Result<(), RegistrationError> {
        if self.classes.contains_key(&class.fqsen) {
            return Err(RegistrationError::DuplicateClass(class.fqsen));
        }
        self.classes.insert(class.fqsen.clone(), class);
        Ok(())
    }

    pub fn has_class(&self, fqsen: &Fqsen) -> bool {
        self.classes.contains_key(fqsen)
    }

    pub fn class(&self, fqsen: &Fqsen) -> Option<&Class> {
        self.classes.get(fqsen)
    }

    pub fn class_mut(&mut self, fqsen: &Fqsen) -> Option<&mut Class> {
        self.classes.get_mut(fqsen)
    }

    /// All classes, in FQSEN order.
    pub fn classes(&self) -> Vec<&Class> {
        let mut classes: Vec<_> = self.classes.values().collect();
        classes.sort_by(|a, b| a.fqsen.cmp(&b.fqsen));
        classes
    }

    /// Every registered declaration of a class name: the primary one and its
    /// alternates, in alternate-id order.
    pub fn class_alternates(&self, fqsen: &Fqsen) -> Vec<&Class> {
        let canonical = fqsen.canonical();
        (0..)
            .map(|id| self.classes.get(&canonical.with_alternate_id(id)))
            .take_while(Option::is_some)
            .flatten()
            .collect()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    // ==========================================================================
    // Methods and functions
    // ==========================================================================

    /// Register a method or free function.
    ///
    /// A method is also appended to its owning class's method list, so the
    /// owner must already be registered.
    pub fn add_method(&mut self, method: Method) -> Result<(), RegistrationError> {
        if self.methods.contains_key(&method.fqsen) {
            return Err(RegistrationError::DuplicateMethod(method.fqsen));
        }
        if let Some(class_fqsen) = method.fqsen.class_fqsen() {
            let class = self
                .classes
                .get_mut(&class_fqsen)
                .ok_or(RegistrationError::UnknownClass(class_fqsen))?;
            class.add_method(method.fqsen.clone());
        }
        self.methods.insert(method.fqsen.clone(), method);
        Ok(())
    }

    pub fn has_method(&self, fqsen: &Fqsen) -> bool {
        self.methods.contains_key(fqsen)
    }

    pub fn method(&self, fqsen: &Fqsen) -> Option<&Method> {
        self.methods.get(fqsen)
    }

    pub fn method_mut(&mut self, fqsen: &Fqsen) -> Option<&mut Method> {
        self.methods.get_mut(fqsen)
    }

    /// Methods of a class in declaration order.
    pub fn class_methods(&self, class_fqsen: &Fqsen) -> Vec<&Method> {
        self.classes
            .get(class_fqsen)
            .map(|class| {
                class
                    .methods
                    .iter()
                    .filter_map(|fqsen| self.methods.get(fqsen))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All free functions, in FQSEN order.
    pub fn functions(&self) -> Vec<&Method> {
        let mut functions: Vec<_> = self.methods.values().filter(|m| m.is_function()).collect();
        functions.sort_by(|a, b| a.fqsen.cmp(&b.fqsen));
        functions
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    // ==========================================================================
    // Counters
    // ==========================================================================

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn increment_classes(&mut self) {
        self.counters.classes += 1;
    }

    pub fn increment_methods(&mut self) {
        self.counters.methods += 1;
    }

    pub fn increment_functions(&mut self) {
        self.counters.functions += 1;
    }

    pub fn increment_closures(&mut self) {
        self.counters.closures += 1;
    }

    pub fn increment_traits(&mut self) {
        self.counters.traits += 1;
    }

    pub fn increment_conditionals(&mut self) {
        self.counters.conditionals += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phan_core::{ClassFlags, Source};

    fn class(fqsen: &Fqsen) -> Class {
        Class::new(
            fqsen.clone(),
            fqsen.name().to_string(),
            Source::default(),
            ClassFlags::empty(),
        )
    }

    #[test]
    fn new_code_base_is_empty() {
        let code_base = CodeBase::new();
        assert_eq!(code_base.class_count(), 0);
        assert_eq!(code_base.method_count(), 0);
        assert_eq!(*code_base.counters(), Counters::default());
    }

    #[test]
    fn duplicate_class_rejected() {
        let mut code_base = CodeBase::new();
        let fqsen = Fqsen::for_class("App\\", "A");
        code_base.add_class(class(&fqsen)).unwrap();

        let err = code_base.add_class(class(&fqsen)).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateClass(fqsen.clone()));

        let alternate = fqsen.with_alternate_id(1);
        code_base.add_class(class(&alternate)).unwrap();
        assert_eq!(code_base.class_count(), 2);
        assert_eq!(code_base.class_alternates(&alternate).len(), 2);
    }

    #[test]
    fn method_appends_to_owner() {
        let mut code_base = CodeBase::new();
        let class_fqsen = Fqsen::for_class("", "A");
        code_base.add_class(class(&class_fqsen)).unwrap();

        for name in ["first", "second"] {
            let fqsen = class_fqsen.with_method_name(name);
            code_base
                .add_method(Method::new(fqsen, name, Source::default()))
                .unwrap();
        }

        let names: Vec<_> = code_base
            .class_methods(&class_fqsen)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(code_base.functions().is_empty());
    }

    #[test]
    fn method_without_owner_rejected() {
        let mut code_base = CodeBase::new();
        let fqsen = Fqsen::for_class("", "Missing").with_method_name("run");
        let err = code_base
            .add_method(Method::new(fqsen, "run", Source::default()))
            .unwrap_err();
        assert_eq!(err, RegistrationError::UnknownClass(Fqsen::for_class("", "Missing")));
    }

    #[test]
    fn functions_are_global() {
        let mut code_base = CodeBase::new();
        let fqsen = Fqsen::for_function("App\\", "Helper");
        code_base
            .add_method(Method::new(fqsen.clone(), "Helper", Source::default()))
            .unwrap();
        assert!(code_base.has_method(&Fqsen::for_function("App\\", "helper")));
        assert_eq!(code_base.functions().len(), 1);

        let err = code_base
            .add_method(Method::new(fqsen.clone(), "helper", Source::default()))
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateMethod(fqsen));
    }

    #[test]
    fn counters_are_monotonic() {
        let mut code_base = CodeBase::new();
        code_base.increment_classes();
        code_base.increment_classes();
        code_base.increment_conditionals();
        let counters = code_base.counters();
        assert_eq!(counters.classes, 2);
        assert_eq!(counters.conditionals, 1);
        assert_eq!(counters.total_declarations(), 2);
    }
}
