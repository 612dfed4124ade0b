// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::types::SpinLockWord;

/// Spinlock primitives (`storage/spin.h`)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SpinCallbacks {
	/// Set the lock word to "free" (`SpinLockInit`)
	pub init: unsafe extern "C-unwind" fn(lock: *mut SpinLockWord),

	/// Busy-wait until the lock is held by the caller (`SpinLockAcquire`)
	///
	/// The engine decides how long to spin and when to give up; a lock that stays
	/// held past its delay budget is reported at PANIC.
	pub acquire: unsafe extern "C-unwind" fn(lock: *mut SpinLockWord),

	/// Release a held lock (`SpinLockRelease`)
	pub release: unsafe extern "C-unwind" fn(lock: *mut SpinLockWord),

	/// Whether the lock is currently free (`SpinLockFree`)
	pub free: unsafe extern "C-unwind" fn(lock: *mut SpinLockWord) -> bool,
}
