//! Shared command-line driver for the binary variants.
//!
//! Both binaries take the same positional surface and differ only in which
//! parallel mode `nw > 0` selects:
//!
//! ```text
//! usage: <exe> <nw> <h> <input> <output> [eps=0.3] [id_index=0]
//! ```
//!
//! `nw = 0` runs sequentially in every variant; `nw = auto` uses one worker
//! per logical core.
//!
//! # Exit codes
//!
//! - `0`: success
//! - `1`: I/O failure (unreadable input, unwritable output, malformed rows)
//! - `2`: invalid arguments or configuration
//!
//! Configuration errors are reported before any worker is spawned; the
//! output file is created only after the computation finishes, so a failed
//! run never leaves a partial report behind.

use crate::dataset::{read_records, write_risk, ParsePolicy};
use crate::output::{FileSink, OutputSink, StdoutSink};
use crate::risk::RiskParams;
use crate::scheduler::{assess_dataset, RunConfig, RunMode};
use crate::util::ScopedTimer;
use std::cell::Cell;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use std::time::Duration;

/// Scheduling strategy of a binary variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerKind {
    /// Fixed equal partition, no feedback loop.
    Static,
    /// Emitter-driven adaptive chunking.
    Dynamic,
}

fn print_usage(exe: &str) {
    eprintln!(
        "usage: {} <nw> <h> <input> <output> [eps=0.3] [id_index=0]

  nw        worker count; 0 runs sequentially, `auto` uses all cores
  h         background knowledge size (feature columns known to the adversary)
  input     CSV dataset path (header line; one id column, features as floats)
  output    risk report path, or - for stdout (ID,Risk header, one line per record)
  eps       relative matching tolerance (default 0.3)
  id_index  0-based index of the id column (default 0)",
        exe
    );
}

fn parse_or_exit<T: std::str::FromStr>(exe: &str, value: &str, what: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("{}: invalid {} value: {}", exe, what, value);
        process::exit(2);
    })
}

/// Open the report sink: `-` selects stdout, anything else a file.
///
/// The stats line goes to stderr, so piping the report through stdout stays
/// clean.
fn open_sink(path: &str) -> io::Result<Box<dyn OutputSink>> {
    if path == "-" {
        return Ok(Box::new(StdoutSink::new()));
    }
    let sink = FileSink::create(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("unable to open output file {}: {}", path, e),
        )
    })?;
    Ok(Box::new(sink))
}

/// Parse arguments, run the assessment, write the report, print the stats
/// line.
pub fn run(kind: SchedulerKind) -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let exe = args.first().map(String::as_str).unwrap_or("reid-scan");

    if args.len() < 5 || args.len() > 7 {
        print_usage(exe);
        process::exit(2);
    }

    let workers: usize = if args[1] == "auto" {
        num_cpus::get()
    } else {
        parse_or_exit(exe, &args[1], "worker count")
    };
    let h: usize = parse_or_exit(exe, &args[2], "background knowledge size");
    let input = &args[3];
    let output = &args[4];
    let eps: f32 = args
        .get(5)
        .map(|v| parse_or_exit(exe, v, "epsilon"))
        .unwrap_or(0.3);
    let id_index: usize = args
        .get(6)
        .map(|v| parse_or_exit(exe, v, "id column index"))
        .unwrap_or(0);

    let mode = match (workers, kind) {
        (0, _) => RunMode::Sequential,
        (nw, SchedulerKind::Static) => RunMode::Static { workers: nw },
        (nw, SchedulerKind::Dynamic) => RunMode::Dynamic { workers: nw },
    };
    let config = RunConfig {
        mode,
        params: RiskParams { h, eps },
    };

    let file = File::open(input).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("unable to open input file {}: {}", input, e),
        )
    })?;
    let dataset = match read_records(BufReader::new(file), id_index, ParsePolicy::Permissive) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("{}: {}: {}", exe, input, err);
            process::exit(1);
        }
    };

    // An empty dataset constrains nothing; validate h against itself so the
    // remaining checks (epsilon) still run.
    let feature_count = dataset.first().map(|r| r.features.len());
    if let Err(err) = config.validate(feature_count.unwrap_or(h)) {
        eprintln!("{}: {}", exe, err);
        process::exit(2);
    }

    let mut risks = vec![0.0f32; dataset.len()];
    let elapsed = Cell::new(Duration::ZERO);
    let snapshot = {
        let _timer = ScopedTimer::new(|d| elapsed.set(d));
        assess_dataset(&dataset, &config, &mut risks)
    };

    let sink = open_sink(output)?;
    write_risk(&dataset, &risks, sink.as_ref());

    eprintln!(
        "records={} features={} h={} eps={} mode={} workers={} chunks={} elapsed_ms={}",
        dataset.len(),
        feature_count.unwrap_or(0),
        h,
        eps,
        mode.label(),
        snapshot.workers,
        snapshot.chunks,
        elapsed.get().as_millis()
    );

    Ok(())
}
