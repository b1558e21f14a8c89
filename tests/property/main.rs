//! Property-based soundness tests.
//!
//! Run with: `cargo test --test property`

mod risk_props;
mod scheduler_props;
