// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{cell::UnsafeCell, thread};

use ogview::prelude::*;
use ogview_testing::SpinLockCell;
use ogview_tests_integration::runtime;

const THREADS: usize = 8;
const ROUNDS: u64 = 2_000;

/// Counter in "shared memory", protected by an engine spinlock
struct Shared {
	lock: SpinLockCell,
	counter: UnsafeCell<u64>,
}

unsafe impl Sync for Shared {}

#[test]
fn test_lock_excludes_contending_threads() {
	let rt = runtime();
	let shared = Shared {
		lock: SpinLockCell::new(),
		counter: UnsafeCell::new(0),
	};
	unsafe { SpinLock::from_ptr(&rt, shared.lock.as_ptr()) }.init();

	thread::scope(|s| {
		for _ in 0..THREADS {
			s.spawn(|| {
				// capture the whole `Shared` (which is Sync), not its fields
				let shared = &shared;
				let lock = unsafe { SpinLock::from_ptr(&rt, shared.lock.as_ptr()) };
				for _ in 0..ROUNDS {
					let _guard = lock.guard();
					unsafe { *shared.counter.get() += 1 };
				}
			});
		}
	});

	assert_eq!(unsafe { *shared.counter.get() }, THREADS as u64 * ROUNDS);
	assert!(unsafe { SpinLock::from_ptr(&rt, shared.lock.as_ptr()) }.is_free());
}

#[test]
fn test_raw_pair_across_threads() {
	let rt = runtime();
	let cell = SpinLockCell::new();
	let lock = unsafe { SpinLock::from_ptr(&rt, cell.as_ptr()) };
	lock.init();
	lock.acquire();

	thread::scope(|s| {
		s.spawn(|| {
			let lock = unsafe { SpinLock::from_ptr(&rt, cell.as_ptr()) };
			assert!(!lock.is_free());
			lock.release();
		});
	});

	assert!(lock.is_free());
}
