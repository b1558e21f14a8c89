//! Dynamic work distribution: emitter, workers, and the feedback loop.
//!
//! # Protocol
//!
//! The emitter owns one inbound [`BlockingQueue`] per worker plus one shared
//! feedback queue. It eagerly pushes a first chunk to every worker, then
//! blocks on the feedback queue: each worker id that arrives either gets the
//! next chunk or, once the cursor has reached `n`, an end-of-work task. The
//! run ends when all workers have been retired; exactly one end-of-work task
//! is sent per worker.
//!
//! Chunks are half the size of a naive equal split
//! ([`dynamic_chunk_size`]), so a fast worker naturally requests and
//! receives more of them. The emitter runs on the calling thread; only the
//! workers are spawned.
//!
//! # Ownership of the risk vector
//!
//! The single cursor guarantees disjointness, and the type system enforces
//! it: every chunk task carries an exclusive `&mut [f32]` split off the risk
//! vector, so a worker can only ever write the slots it was granted. No lock
//! protects the risk vector because none is needed.
//!
//! # Failure
//!
//! There is no cancellation and no supervision: a hung worker stalls the run
//! indefinitely, and a panicking worker aborts the run when its scoped
//! thread is joined.

use super::chunk::{dynamic_chunk_size, Chunk};
use super::metrics::WorkerMetrics;
use crate::dataset::Record;
use crate::risk::{assess_range, RiskParams};
use crate::stdx::BlockingQueue;
use std::mem;
use std::thread;

/// One message on a worker's inbound queue.
///
/// Shutdown travels in-band as a dedicated variant rather than an optional
/// chunk, so "no more work" is a first-class message.
enum Task<'a> {
    /// A chunk of indices plus the exclusive slice of the risk vector that
    /// covers exactly those indices.
    Chunk { chunk: Chunk, out: &'a mut [f32] },
    /// The worker's single end-of-work signal.
    EndOfWork,
}

/// Assess the whole dataset with `workers` threads under dynamic chunking.
///
/// Blocks until every record has been assessed and every worker has exited.
/// Returns per-worker counters in worker-id order.
///
/// # Panics
///
/// Panics if a worker thread panics, and on `workers == 0` or a risk vector
/// of the wrong length (both are driver bugs; user-facing validation happens
/// at the configuration boundary).
pub fn assess_dynamic(
    dataset: &[Record],
    params: RiskParams,
    workers: usize,
    risks: &mut [f32],
) -> Vec<WorkerMetrics> {
    assert!(workers > 0, "workers must be > 0");
    assert_eq!(dataset.len(), risks.len(), "risk vector length mismatch");

    let chunk_size = dynamic_chunk_size(dataset.len(), workers);
    let queues: Vec<BlockingQueue<Task>> = (0..workers).map(|_| BlockingQueue::new()).collect();
    let feedback: BlockingQueue<usize> = BlockingQueue::new();

    thread::scope(|scope| {
        let handles: Vec<_> = queues
            .iter()
            .enumerate()
            .map(|(id, queue)| {
                let feedback = &feedback;
                scope.spawn(move || worker_loop(id, dataset, params, queue, feedback))
            })
            .collect();

        // The calling thread doubles as the emitter.
        emit(&queues, &feedback, chunk_size, risks);

        handles
            .into_iter()
            .map(|handle| handle.join().expect("risk worker panicked"))
            .collect()
    })
}

/// Hand out chunks on demand until the cursor reaches `n`, then retire each
/// worker as it reports back.
fn emit<'a>(
    queues: &[BlockingQueue<Task<'a>>],
    feedback: &BlockingQueue<usize>,
    chunk_size: usize,
    risks: &'a mut [f32],
) {
    let n = risks.len();
    let mut rest = risks;
    let mut begin = 0usize;
    let mut active = queues.len();

    // Eager first chunk per worker. A worker that gets no chunk here would
    // never send feedback, so it is retired immediately instead; this covers
    // both n == 0 and n < workers.
    for queue in queues {
        if begin < n {
            let take = chunk_size.min(n - begin);
            let (out, tail) = mem::take(&mut rest).split_at_mut(take);
            queue.push(Task::Chunk {
                chunk: Chunk {
                    begin,
                    end: begin + take,
                },
                out,
            });
            rest = tail;
            begin += take;
        } else {
            queue.push(Task::EndOfWork);
            active -= 1;
        }
    }

    while active > 0 {
        let id = feedback.pop();
        if begin == n {
            queues[id].push(Task::EndOfWork);
            active -= 1;
        } else {
            let take = chunk_size.min(n - begin);
            let (out, tail) = mem::take(&mut rest).split_at_mut(take);
            queues[id].push(Task::Chunk {
                chunk: Chunk {
                    begin,
                    end: begin + take,
                },
                out,
            });
            rest = tail;
            begin += take;
        }
    }
}

/// Worker loop: drain the inbound queue, assess each granted chunk, report
/// back for more; exit on the end-of-work task.
fn worker_loop(
    id: usize,
    dataset: &[Record],
    params: RiskParams,
    queue: &BlockingQueue<Task<'_>>,
    feedback: &BlockingQueue<usize>,
) -> WorkerMetrics {
    let mut metrics = WorkerMetrics::default();
    loop {
        match queue.pop() {
            Task::EndOfWork => break,
            Task::Chunk { chunk, out } => {
                assess_range(dataset, chunk.range(), params, out);
                metrics.record_chunk(chunk.len());
                feedback.push(id);
            }
        }
    }
    metrics
}
