//! Re-identification risk scanner CLI, dynamic scheduler variant.
//!
//! Assesses per-record re-identification risk for a CSV dataset using an
//! emitter-driven worker pool with adaptive chunking. `nw = 0` runs the
//! sequential baseline instead. See `reid-scan-static` for the fixed
//! partition variant.

use reid_scan::cli::{run, SchedulerKind};
use std::io;

fn main() -> io::Result<()> {
    run(SchedulerKind::Dynamic)
}
