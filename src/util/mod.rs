//! Generic helpers with no domain knowledge.

pub mod timer;

pub use timer::ScopedTimer;
