//! Analysis switches read by pass one.

/// Switches that change what pass one reports or records.
///
/// Loading these from a file or command line is left to the caller.
///
/// ```
/// use phan_analysis::Configuration;
///
/// let config = Configuration::new().with_backward_compatibility_checks(true);
/// assert!(config.backward_compatibility_checks);
/// assert!(config.check_property_doc_types);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Re-read source lines to flag expressions whose meaning changed in PHP 7.
    pub backward_compatibility_checks: bool,
    /// Mark classes and functions declared inside a branch as conditional.
    pub record_conditional_declarations: bool,
    /// Compare a property's `@var` type against its default value.
    pub check_property_doc_types: bool,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            backward_compatibility_checks: false,
            record_conditional_declarations: true,
            check_property_doc_types: true,
        }
    }

    pub fn with_backward_compatibility_checks(mut self, enabled: bool) -> Self {
        self.backward_compatibility_checks = enabled;
        self
    }

    pub fn with_record_conditional_declarations(mut self, enabled: bool) -> Self {
        self.record_conditional_declarations = enabled;
        self
    }

    pub fn with_check_property_doc_types(mut self, enabled: bool) -> Self {
        self.check_property_doc_types = enabled;
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
