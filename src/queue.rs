//! `ConcurrentQueue`: a mutex-guarded FIFO adaptor.
//!
//! Every operation acquires the instance's own lock for its full duration,
//! so operations on one instance are serialized and behave exactly like the
//! corresponding single-threaded queue operations. Cross-instance
//! comparisons acquire both operands' locks in a fixed global order (see
//! the `PartialEq` and `PartialOrd` impls).
//!
//! Implementation:
//! - Backed by any [`FifoStorage`] sequence, `VecDeque<T>` by default.
//! - The lock word is cache-padded so adjacent instances do not false-share.
//! - No accessor returns a reference into the storage; elements are copied
//!   out (or handed to a caller closure) while the lock is held.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

use crossbeam_utils::CachePadded;

use crate::storage::FifoStorage;
use crate::sync::{lock, Mutex};

/// A thread-safe FIFO queue over an injectable backing sequence.
///
/// This is an adaptor. It holds a backing sequence `S` and provides a
/// serialized wrapper interface to it: push at the back, pop and inspect
/// at the front. `S` defaults to [`VecDeque`] but can be any type
/// implementing [`FifoStorage`].
///
/// Each instance owns its storage and its mutex exclusively; neither is
/// ever shared between instances, and construction always mints a fresh,
/// unlocked mutex (cloning copies contents, never lock state). The type is
/// `Send`/`Sync` whenever `S: Send`, with no unsafe impls.
///
/// An empty queue fails fast: [`front`](Self::front), [`back`](Self::back)
/// and [`pop`](Self::pop) return `None` rather than blocking for a
/// producer. There is no capacity bound and no fairness guarantee beyond
/// the mutex's own.
///
/// # Example
///
/// ```
/// use turnstile::ConcurrentQueue;
///
/// let queue: ConcurrentQueue<i32> = ConcurrentQueue::new();
/// queue.push(1);
/// queue.push(2);
/// assert_eq!(queue.front(), Some(1));
/// assert_eq!(queue.pop(), Some(1));
/// assert_eq!(queue.pop(), Some(2));
/// assert!(queue.is_empty());
/// ```
pub struct ConcurrentQueue<T, S = VecDeque<T>> {
    inner: CachePadded<Mutex<S>>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T, S: FifoStorage<T>> ConcurrentQueue<T, S> {
    /// Creates an empty queue.
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::from_storage(S::default())
    }

    /// Wraps an existing backing sequence, taking ownership of its
    /// elements. The queue starts with a fresh, unlocked mutex.
    pub fn from_storage(storage: S) -> Self {
        Self {
            inner: CachePadded::new(Mutex::new(storage)),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        lock(&self.inner).is_empty()
    }

    /// Returns the number of elements in the queue.
    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    /// Returns a copy of the front element, or `None` if the queue is
    /// empty.
    ///
    /// The copy is made while the lock is held, so the returned value is a
    /// consistent snapshot; by the time the caller looks at it, a
    /// concurrent [`pop`](Self::pop) may already have removed the original.
    /// Callers that need retrieve-and-remove as one atomic step should use
    /// `pop` directly.
    pub fn front(&self) -> Option<T>
    where
        T: Clone,
    {
        lock(&self.inner).front().cloned()
    }

    /// Returns a copy of the back element, or `None` if the queue is empty.
    pub fn back(&self) -> Option<T>
    where
        T: Clone,
    {
        lock(&self.inner).back().cloned()
    }

    /// Runs `f` on the front element under the lock, returning its result,
    /// or `None` if the queue is empty.
    ///
    /// This is the accessor for non-`Clone` element types: the reference
    /// handed to `f` cannot outlive the guarded section.
    pub fn front_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        lock(&self.inner).front().map(f)
    }

    /// Runs `f` on the back element under the lock, returning its result,
    /// or `None` if the queue is empty.
    pub fn back_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        lock(&self.inner).back().map(f)
    }

    /// Appends an element at the back of the queue.
    pub fn push(&self, value: T) {
        let mut storage = lock(&self.inner);
        storage.push_back(value);
        #[cfg(feature = "tracing")]
        tracing::trace!(len = storage.len(), "push");
    }

    /// Constructs an element directly into the queue: `construct` runs
    /// while the lock is already held, so the element never exists as a
    /// temporary outside the guarded section.
    pub fn push_with(&self, construct: impl FnOnce() -> T) {
        let mut storage = lock(&self.inner);
        let value = construct();
        storage.push_back(value);
        #[cfg(feature = "tracing")]
        tracing::trace!(len = storage.len(), "push_with");
    }

    /// Removes and returns the front element, or `None` if the queue is
    /// empty.
    ///
    /// Retrieve-and-remove is a single atomic step; there is no window in
    /// which another thread can take the element between the two halves.
    pub fn pop(&self) -> Option<T> {
        let mut storage = lock(&self.inner);
        #[cfg(feature = "tracing")]
        tracing::trace!(len = storage.len(), "pop");
        storage.pop_front()
    }

    /// Drops all elements under a single lock acquisition.
    pub fn clear(&self) {
        lock(&self.inner).clear();
    }

    /// Consumes the queue and returns the backing sequence.
    ///
    /// Ownership is exclusive here, so no locking is involved.
    #[cfg(not(loom))]
    pub fn into_inner(self) -> S {
        self.inner
            .into_inner()
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Runs `f` with both operands' storages borrowed under their locks.
    ///
    /// Locks are acquired in ascending mutex-address order regardless of
    /// operand order, so two threads comparing the same pair as `(a, b)`
    /// and `(b, a)` acquire in the same order and cannot circular-wait.
    /// Comparing an instance with itself takes the single lock once.
    fn with_both<R>(&self, other: &Self, f: impl FnOnce(&S, &S) -> R) -> R {
        let lhs: *const Mutex<S> = &*self.inner;
        let rhs: *const Mutex<S> = &*other.inner;
        if std::ptr::eq(lhs, rhs) {
            let guard = lock(&self.inner);
            return f(&guard, &guard);
        }
        if lhs < rhs {
            let first = lock(&self.inner);
            let second = lock(&other.inner);
            f(&first, &second)
        } else {
            let first = lock(&other.inner);
            let second = lock(&self.inner);
            f(&second, &first)
        }
    }
}

impl<T> ConcurrentQueue<T, VecDeque<T>> {
    /// Creates an empty queue whose `VecDeque` backing is pre-sized for at
    /// least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(VecDeque::with_capacity(capacity))
    }
}

impl<T, S: FifoStorage<T> + Default> Default for ConcurrentQueue<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: FifoStorage<T>> From<S> for ConcurrentQueue<T, S> {
    /// Equivalent to [`ConcurrentQueue::from_storage`].
    fn from(storage: S) -> Self {
        Self::from_storage(storage)
    }
}

impl<T, S: FifoStorage<T> + Default> FromIterator<T> for ConcurrentQueue<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut storage = S::default();
        for value in iter {
            storage.push_back(value);
        }
        Self::from_storage(storage)
    }
}

impl<T, S: FifoStorage<T>> Extend<T> for ConcurrentQueue<T, S> {
    /// Appends every element of `iter` under a single lock acquisition.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut storage = lock(&self.inner);
        for value in iter {
            storage.push_back(value);
        }
    }
}

impl<T, S: FifoStorage<T> + Clone> Clone for ConcurrentQueue<T, S> {
    /// Deep-copies the contents as they are at the moment the source's
    /// lock is granted. The clone gets independent storage and a fresh
    /// mutex; mutating one never affects the other.
    fn clone(&self) -> Self {
        let storage = lock(&self.inner).clone();
        Self::from_storage(storage)
    }
}

impl<T, S: FifoStorage<T> + fmt::Debug> fmt::Debug for ConcurrentQueue<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = lock(&self.inner);
        f.debug_tuple("ConcurrentQueue").field(&*storage).finish()
    }
}

/// Structural equality of the two backing sequences, both locks held.
///
/// `!=` is the trait's own negation of `eq`, so the identity
/// `(a != b) == !(a == b)` holds by construction.
impl<T, S: FifoStorage<T> + PartialEq> PartialEq for ConcurrentQueue<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.with_both(other, |a, b| a == b)
    }
}

impl<T, S: FifoStorage<T> + Eq> Eq for ConcurrentQueue<T, S> {}

/// Lexicographic order of the two backing sequences, both locks held.
///
/// `<`, `<=`, `>`, `>=` are the trait's default derivations from
/// `partial_cmp`, so the ordering identities (`(a > b) == (b < a)` and the
/// negation forms) hold by construction.
impl<T, S: FifoStorage<T> + PartialOrd> PartialOrd for ConcurrentQueue<T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.with_both(other, |a, b| a.partial_cmp(b))
    }
}

impl<T, S: FifoStorage<T> + Ord> Ord for ConcurrentQueue<T, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.with_both(other, |a, b| a.cmp(b))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::ConcurrentQueue;
    use crate::storage::FifoStorage;
    use crate::sync::lock;

    /// Serializes the backing sequence as-is, under the lock.
    impl<T, S: FifoStorage<T> + Serialize> Serialize for ConcurrentQueue<T, S> {
        fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
            lock(&self.inner).serialize(serializer)
        }
    }

    impl<'de, T, S: FifoStorage<T> + Deserialize<'de>> Deserialize<'de> for ConcurrentQueue<T, S> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            S::deserialize(deserializer).map(ConcurrentQueue::from_storage)
        }
    }
}
