// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cell::Cell,
	hint::spin_loop,
	sync::atomic::Ordering::{Acquire, Relaxed, Release},
	thread::sleep,
	time::Duration,
};

use ogview_abi::{constants::PANIC, types::SpinLockWord};

use super::report::raise;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
type AtomicWord = std::sync::atomic::AtomicU8;

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
type AtomicWord = std::sync::atomic::AtomicI32;

/// Back-off policy used while waiting for a held spinlock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinPolicy {
	/// Failed attempts before sleeping
	pub spins_per_delay: u32,
	/// Sleeps before the lock is declared stuck
	pub num_delays: u32,
	pub min_delay: Duration,
	pub max_delay: Duration,
}

impl Default for SpinPolicy {
	fn default() -> Self {
		Self {
			spins_per_delay: 100,
			num_delays: 1000,
			min_delay: Duration::from_millis(1),
			max_delay: Duration::from_secs(1),
		}
	}
}

thread_local! {
	static POLICY: Cell<Option<SpinPolicy>> = const { Cell::new(None) };
}

/// Replace the back-off policy of the current thread
pub fn set_spin_policy(policy: SpinPolicy) {
	POLICY.with(|current| current.set(Some(policy)));
}

fn policy() -> SpinPolicy {
	POLICY.with(|current| current.get()).unwrap_or_default()
}

unsafe fn word<'a>(lock: *mut SpinLockWord) -> &'a AtomicWord {
	unsafe { AtomicWord::from_ptr(lock) }
}

/// Test-and-set; true when the lock was already held
fn tas(word: &AtomicWord) -> bool {
	// test before setting to keep the cache line shared while the lock is held
	word.load(Relaxed) != 0 || word.swap(1, Acquire) != 0
}

pub(super) unsafe extern "C-unwind" fn init(lock: *mut SpinLockWord) {
	unsafe { word(lock) }.store(0, Release);
}

pub(super) unsafe extern "C-unwind" fn acquire(lock: *mut SpinLockWord) {
	let word = unsafe { word(lock) };
	if !tas(word) {
		return;
	}

	let policy = policy();
	let mut spins = 0;
	let mut delays = 0;
	let mut delay = policy.min_delay;

	while tas(word) {
		spins += 1;
		if spins < policy.spins_per_delay {
			spin_loop();
			continue;
		}

		delays += 1;
		if delays > policy.num_delays {
			raise(PANIC, None, format!("stuck spinlock detected at {:p}", lock), None);
		}

		sleep(delay);
		delay = delay.saturating_mul(2);
		if delay > policy.max_delay {
			delay = policy.min_delay;
		}
		spins = 0;
	}
}

pub(super) unsafe extern "C-unwind" fn release(lock: *mut SpinLockWord) {
	unsafe { word(lock) }.store(0, Release);
}

pub(super) unsafe extern "C-unwind" fn free(lock: *mut SpinLockWord) -> bool {
	unsafe { word(lock) }.load(Relaxed) == 0
}

#[cfg(test)]
pub mod tests {
	use std::time::Duration;

	use ogview_abi::{constants::PANIC, types::SpinLockWord};

	use super::{SpinPolicy, acquire, free, init, release, set_spin_policy};
	use crate::engine::report::catch_engine_error;

	#[test]
	fn test_lock_cycle() {
		let mut word: SpinLockWord = 1;
		unsafe {
			init(&mut word);
			assert!(free(&mut word));
			acquire(&mut word);
			assert!(!free(&mut word));
			release(&mut word);
			assert!(free(&mut word));
		}
	}

	#[test]
	fn test_reacquire_is_reported_stuck() {
		set_spin_policy(SpinPolicy {
			spins_per_delay: 2,
			num_delays: 3,
			min_delay: Duration::from_micros(1),
			max_delay: Duration::from_micros(4),
		});

		let mut word: SpinLockWord = 0;
		let err = catch_engine_error(|| unsafe {
			acquire(&mut word);
			acquire(&mut word);
		})
		.unwrap_err();

		assert_eq!(err.level, PANIC);
		assert!(err.message.starts_with("stuck spinlock detected"));
	}
}
