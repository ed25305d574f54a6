//! Cross-file declaration registry.
//!
//! [`CodeBase`] is shared by the pass-one walks of every source unit in a run
//! and is the pass's primary output.

mod code_base;
mod counters;

pub use code_base::CodeBase;
pub use counters::Counters;
