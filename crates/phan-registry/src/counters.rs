//! Declaration counters.

use std::fmt;

/// Monotonic counts of what pass one has seen across every source unit.
///
/// Counters only ever go up; they count declarations visited, not entities
/// stored, so a redeclared class counts twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub classes: u64,
    pub methods: u64,
    pub functions: u64,
    pub closures: u64,
    pub traits: u64,
    pub conditionals: u64,
}

impl Counters {
    /// Declarations of every kind except conditionals.
    pub fn total_declarations(&self) -> u64 {
        self.classes + self.methods + self.functions + self.closures + self.traits
    }
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classes={} methods={} functions={} closures={} traits={} conditionals={}",
            self.classes, self.methods, self.functions, self.closures, self.traits, self.conditionals
        )
    }
}
