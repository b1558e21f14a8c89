//! Small, self-contained data structures used across the project.

pub mod blocking_queue;

pub use blocking_queue::BlockingQueue;
