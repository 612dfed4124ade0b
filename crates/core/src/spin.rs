// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Engine spinlocks
//!
//! The lock word lives in engine shared memory and only the engine knows how to
//! test-and-set it, how long to spin and when to give up. A stuck lock is reported by
//! the engine at PANIC.

use std::ptr::NonNull;

use ogview_abi::types::SpinLockWord;
use tracing::debug;

use crate::{Result, Runtime, ViewError, check::checked};

/// Handle over an engine lock word
///
/// The lock is not reentrant and the holder is not tracked; every [`acquire`] must be
/// paired with exactly one [`release`] by the same holder.
///
/// [`acquire`]: SpinLock::acquire
/// [`release`]: SpinLock::release
pub struct SpinLock<'a> {
	rt: &'a Runtime,
	lock: NonNull<SpinLockWord>,
}

impl<'a> SpinLock<'a> {
	/// # Safety
	/// `lock` must point at a lock word that stays valid for `'a`.
	pub unsafe fn from_ptr(rt: &'a Runtime, lock: *mut SpinLockWord) -> Self {
		checked!(unsafe { Self::try_from_ptr(rt, lock) })
	}

	/// # Safety
	/// See [`SpinLock::from_ptr`]; a null pointer is rejected.
	pub unsafe fn try_from_ptr(rt: &'a Runtime, lock: *mut SpinLockWord) -> Result<Self> {
		let lock = NonNull::new(lock).ok_or(ViewError::NullPointer {
			what: "spinlock",
		})?;
		Ok(Self {
			rt,
			lock,
		})
	}

	pub fn as_ptr(&self) -> *mut SpinLockWord {
		self.lock.as_ptr()
	}

	/// Mark the lock free
	pub fn init(&self) {
		unsafe { (self.rt.callbacks().spin.init)(self.as_ptr()) }
	}

	/// Wait until the lock is taken by the caller
	pub fn acquire(&self) {
		unsafe { (self.rt.callbacks().spin.acquire)(self.as_ptr()) };
		if self.rt.config().spin_trace {
			debug!(lock = ?self.lock, "spinlock acquired");
		}
	}

	pub fn release(&self) {
		if self.rt.config().spin_trace {
			debug!(lock = ?self.lock, "spinlock released");
		}
		unsafe { (self.rt.callbacks().spin.release)(self.as_ptr()) }
	}

	/// Whether the lock is free right now; the answer may be stale by the time it is read
	pub fn is_free(&self) -> bool {
		unsafe { (self.rt.callbacks().spin.free)(self.as_ptr()) }
	}

	/// Acquire the lock and release it when the guard is dropped
	pub fn guard(&self) -> SpinLockGuard<'_, 'a> {
		self.acquire();
		SpinLockGuard {
			lock: self,
		}
	}
}

/// Holds a [`SpinLock`] until dropped
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct SpinLockGuard<'l, 'a> {
	lock: &'l SpinLock<'a>,
}

impl Drop for SpinLockGuard<'_, '_> {
	fn drop(&mut self) {
		self.lock.release();
	}
}

#[cfg(test)]
pub mod tests {
	use std::time::Duration;

	use ogview_testing::{SpinLockCell, SpinPolicy, catch_engine_error, engine, set_spin_policy};

	use super::SpinLock;
	use crate::{Runtime, ViewError};

	#[test]
	fn test_init_acquire_release() {
		let rt = Runtime::new(engine());
		let cell = SpinLockCell::new();
		let lock = unsafe { SpinLock::from_ptr(&rt, cell.as_ptr()) };

		lock.init();
		assert!(lock.is_free());
		lock.acquire();
		assert!(!lock.is_free());
		lock.release();
		assert!(lock.is_free());
	}

	#[test]
	fn test_guard_releases_on_drop() {
		let rt = Runtime::builder(engine()).spin_trace(true).build();
		let cell = SpinLockCell::new();
		let lock = unsafe { SpinLock::from_ptr(&rt, cell.as_ptr()) };
		lock.init();
		{
			let _guard = lock.guard();
			assert!(!lock.is_free());
		}
		assert!(lock.is_free());
	}

	#[test]
	fn test_null_lock_is_rejected() {
		let rt = Runtime::new(engine());
		let result = unsafe { SpinLock::try_from_ptr(&rt, std::ptr::null_mut()) };
		assert!(matches!(
			result,
			Err(ViewError::NullPointer {
				what: "spinlock"
			})
		));
	}

	#[test]
	fn test_reacquire_is_reported_stuck() {
		set_spin_policy(SpinPolicy {
			spins_per_delay: 2,
			num_delays: 3,
			min_delay: Duration::from_micros(10),
			max_delay: Duration::from_micros(40),
		});
		let rt = Runtime::new(engine());
		let cell = SpinLockCell::new();
		let lock = unsafe { SpinLock::from_ptr(&rt, cell.as_ptr()) };
		lock.init();
		lock.acquire();

		let err = catch_engine_error(|| lock.acquire()).unwrap_err();
		assert!(err.message.starts_with("stuck spinlock detected"));
	}
}
