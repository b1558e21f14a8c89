//! Output sinks for the risk report.
//!
//! # Design
//!
//! The driver formats the whole report into a `Vec<u8>` and then calls
//! `write_all(bytes)`, which takes a lock only for the actual I/O. Batches
//! from different callers are serialized (no byte-level interleaving); batch
//! ordering follows lock acquisition order.
//!
//! # Panic policy
//!
//! Sinks panic on I/O errors (fail-fast), except for `BrokenPipe` on stdout
//! which is silently ignored (standard CLI behavior for `reid-scan | head`).
//! `std::sync::Mutex` is used, so one panic while holding the lock poisons it
//! and subsequent calls panic too; that matches the fail-fast policy.
//!
//! # Flush semantics
//!
//! `flush()` pushes buffered data to the OS at the moment of the call, not to
//! stable storage. Call it only after all writers are done.

use std::io::{self, BufWriter, ErrorKind, Write};
use std::sync::Mutex;

/// Buffer size for stream-backed sinks (64 KiB).
///
/// Large enough that a typical report needs a handful of syscalls; stdout is
/// never the bottleneck for this workload.
const DEFAULT_BUF_CAPACITY: usize = 64 * 1024;

/// Lowest common denominator output sink.
///
/// Implementations must be `Send + Sync`; the report writer batches bytes
/// before calling in, so implementations see few, large writes.
pub trait OutputSink: Send + Sync + 'static {
    /// Write a batch of bytes.
    ///
    /// # Panics
    ///
    /// Panics on I/O error, except `BrokenPipe` which may be silently ignored.
    fn write_all(&self, bytes: &[u8]);

    /// Flush any buffered data to the OS.
    ///
    /// # Panics
    ///
    /// Panics on I/O error, except `BrokenPipe` which may be silently ignored.
    fn flush(&self);
}

impl std::fmt::Debug for dyn OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OutputSink")
    }
}

// ============================================================================
// StdoutSink
// ============================================================================

/// Stdout sink with internal buffering behind a mutex.
pub struct StdoutSink {
    out: Mutex<BufWriter<io::Stdout>>,
}

impl StdoutSink {
    /// Create a stdout sink with the default 64 KiB buffer.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUF_CAPACITY)
    }

    /// Create a stdout sink with a custom buffer size.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            out: Mutex::new(BufWriter::with_capacity(cap, io::stdout())),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for StdoutSink {
    fn write_all(&self, bytes: &[u8]) {
        let mut out = self.out.lock().expect("stdout sink mutex poisoned");
        if let Err(e) = out.write_all(bytes) {
            if e.kind() == ErrorKind::BrokenPipe {
                return;
            }
            panic!("stdout write failed: {}", e);
        }
    }

    fn flush(&self) {
        let mut out = self.out.lock().expect("stdout sink mutex poisoned");
        if let Err(e) = out.flush() {
            if e.kind() == ErrorKind::BrokenPipe {
                return;
            }
            panic!("stdout flush failed: {}", e);
        }
    }
}

// ============================================================================
// FileSink
// ============================================================================

/// File sink: writes the report to a file with buffering.
///
/// Creation is fallible so the caller can fail fast on an unwritable output
/// path before any computation starts or any partial file is left behind.
pub struct FileSink {
    out: Mutex<BufWriter<std::fs::File>>,
}

impl FileSink {
    /// Create a new file sink (creates/truncates the file).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or opened.
    pub fn create(path: impl AsRef<std::path::Path>) -> io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self {
            out: Mutex::new(BufWriter::with_capacity(DEFAULT_BUF_CAPACITY, file)),
        })
    }
}

impl OutputSink for FileSink {
    fn write_all(&self, bytes: &[u8]) {
        let mut out = self.out.lock().expect("file sink mutex poisoned");
        out.write_all(bytes).expect("file write failed");
    }

    fn flush(&self) {
        let mut out = self.out.lock().expect("file sink mutex poisoned");
        out.flush().expect("file flush failed");
    }
}

// ============================================================================
// VecSink (for testing)
// ============================================================================

/// Test sink: captures all bytes in memory.
pub struct VecSink {
    buf: Mutex<Vec<u8>>,
}

impl VecSink {
    /// Create a new empty test sink.
    pub fn new() -> Self {
        Self {
            buf: Mutex::new(Vec::new()),
        }
    }

    /// Extract captured bytes, leaving the internal buffer empty.
    pub fn take(&self) -> Vec<u8> {
        let mut g = self.buf.lock().expect("vec sink mutex poisoned");
        std::mem::take(&mut *g)
    }

    /// Current byte count without extracting.
    pub fn len(&self) -> usize {
        self.buf.lock().expect("vec sink mutex poisoned").len()
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for VecSink {
    fn write_all(&self, bytes: &[u8]) {
        self.buf
            .lock()
            .expect("vec sink mutex poisoned")
            .extend_from_slice(bytes);
    }

    fn flush(&self) {
        // No-op: VecSink has no underlying buffer to flush.
    }
}
