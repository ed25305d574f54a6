//! Method and function entity.
//!
//! Free functions and class methods share one record; a function's FQSEN
//! simply has no class name.

use crate::{Comment, Fqsen, Modifiers, UnionType};

use super::Source;

/// Optional-parameter count meaning "accepts any number of arguments".
pub const UNLIMITED_PARAMETERS: u32 = u32::MAX;

/// Registry entry for a method or free function.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub fqsen: Fqsen,
    /// Name as written in the declaration.
    pub name: String,
    pub source: Source,
    pub comment: Comment,
    /// Declared return type; `None` until a signature or `@return` supplies one.
    pub return_type: Option<UnionType>,
    pub modifiers: Modifiers,
    pub number_of_required_parameters: u32,
    pub number_of_optional_parameters: u32,
    /// Declared inside a conditional branch.
    pub is_conditional: bool,
}

impl Method {
    /// Create a method with no parameters and no known return type.
    pub fn new(fqsen: Fqsen, name: impl Into<String>, source: Source) -> Self {
        Self {
            fqsen,
            name: name.into(),
            source,
            comment: Comment::none(),
            return_type: None,
            modifiers: Modifiers::empty(),
            number_of_required_parameters: 0,
            number_of_optional_parameters: 0,
            is_conditional: false,
        }
    }

    // === Builder Methods ===

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_return_type(mut self, return_type: Option<UnionType>) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn with_parameter_counts(mut self, required: u32, optional: u32) -> Self {
        self.number_of_required_parameters = required;
        self.number_of_optional_parameters = optional;
        self
    }

    pub fn conditional(mut self, is_conditional: bool) -> Self {
        self.is_conditional = is_conditional;
        self
    }

    /// The body reads its arguments dynamically, so any argument count is valid.
    pub fn accept_unlimited_parameters(&mut self) {
        self.number_of_optional_parameters = UNLIMITED_PARAMETERS;
    }

    pub fn accepts_unlimited_parameters(&self) -> bool {
        self.number_of_optional_parameters == UNLIMITED_PARAMETERS
    }

    /// A free function rather than a class method.
    pub fn is_function(&self) -> bool {
        self.fqsen.class_name().is_none()
    }

    pub fn is_deprecated(&self) -> bool {
        self.comment.is_deprecated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_vs_method() {
        let function = Method::new(Fqsen::for_function("", "strlen"), "strlen", Source::default());
        assert!(function.is_function());

        let class = Fqsen::for_class("", "A");
        let method = Method::new(class.with_method_name("run"), "run", Source::default());
        assert!(!method.is_function());
    }

    #[test]
    fn unlimited_parameters() {
        let mut method = Method::new(Fqsen::for_function("", "f"), "f", Source::default())
            .with_parameter_counts(1, 0);
        assert!(!method.accepts_unlimited_parameters());
        method.accept_unlimited_parameters();
        assert!(method.accepts_unlimited_parameters());
        assert_eq!(method.number_of_required_parameters, 1);
    }
}
