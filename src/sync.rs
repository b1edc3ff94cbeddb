//! Mutex seam for the queue internals.
//!
//! Normal builds use the std mutex. Under `cfg(loom)` the lock comes from
//! `loom` instead, so the acquisition protocol (including the two-lock
//! comparison path) runs under the model checker.

#[cfg(loom)]
pub(crate) use loom::sync::{Mutex, MutexGuard};
#[cfg(not(loom))]
pub(crate) use std::sync::{Mutex, MutexGuard};

use std::sync::PoisonError;

/// Acquires `mutex`, recovering the guard if a previous holder panicked.
///
/// A panic under the lock can only originate in caller code run by a
/// comparison, clone, or `push_with` closure; the storage itself is left
/// structurally valid, so the poison flag carries no information the queue
/// needs to honor.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
