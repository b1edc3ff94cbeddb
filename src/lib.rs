//! # `turnstile` - Mutex-Guarded FIFO Queue
//!
//! A thread-safe FIFO queue adaptor: every observable operation, including
//! cross-instance comparison, is serialized against concurrent callers by a
//! per-instance mutex, while the external contract stays that of an
//! ordinary single-threaded queue.
//!
//! ## Lock Discipline
//!
//! - **One lock per instance**: the backing sequence is read or written
//!   only while the instance's mutex is held; the RAII guard releases it on
//!   every exit path, including panics in caller-supplied closures.
//! - **Two-lock comparisons**: `==`, `!=`, `<`, `<=`, `>`, `>=` inspect
//!   both operands under both locks, acquired in a fixed global order
//!   (ascending mutex address) so reciprocal comparisons on two threads
//!   cannot circular-wait. Self-comparison takes the single lock once.
//! - **No reference escapes**: accessors copy the element out or run a
//!   caller closure under the lock; no returned value aliases the storage.
//!
//! ## Storage Injection
//!
//! The queue is polymorphic over its backing sequence: any type
//! implementing [`FifoStorage`] (append-at-back, read/remove-at-front,
//! size query) can sit behind the lock. [`VecDeque`] is the default;
//! `LinkedList` is supported out of the box. Comparisons delegate to the
//! storage type's own structural equality and lexicographic ordering.
//!
//! ## What This Is Not
//!
//! Not a lock-free structure, not a channel: an empty queue returns `None`
//! instead of parking the caller, there is no capacity bound, and fairness
//! among contending threads is whatever the platform mutex provides.
//!
//! ## Example
//!
//! ```rust
//! use std::thread;
//! use turnstile::ConcurrentQueue;
//!
//! let queue: ConcurrentQueue<usize> = ConcurrentQueue::new();
//!
//! thread::scope(|s| {
//!     for worker in 0..4 {
//!         let queue = &queue;
//!         s.spawn(move || {
//!             for n in 0..100 {
//!                 queue.push(worker * 100 + n);
//!             }
//!         });
//!     }
//! });
//!
//! assert_eq!(queue.len(), 400);
//! ```
//!
//! [`VecDeque`]: std::collections::VecDeque

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod queue;
pub mod storage;

mod sync;

pub use queue::ConcurrentQueue;
pub use storage::FifoStorage;
