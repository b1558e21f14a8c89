//! Re-identification risk scanner CLI, static partition variant.
//!
//! Same surface as `reid-scan`, but `nw > 0` splits the dataset into fixed
//! equal ranges up front, one per worker, with no rebalancing. Kept for
//! comparison against the dynamic scheduler; `nw = 0` runs sequentially.

use reid_scan::cli::{run, SchedulerKind};
use std::io;

fn main() -> io::Result<()> {
    run(SchedulerKind::Static)
}
