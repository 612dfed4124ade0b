// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::cell::UnsafeCell;

use ogview_abi::types::SpinLockWord;

/// A lock word in shared memory
///
/// The word is only ever touched through the engine's spinlock callbacks, which
/// synchronize access, so the cell can be shared between threads.
#[derive(Debug, Default)]
pub struct SpinLockCell {
	word: UnsafeCell<SpinLockWord>,
}

unsafe impl Send for SpinLockCell {}
unsafe impl Sync for SpinLockCell {}

impl SpinLockCell {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn as_ptr(&self) -> *mut SpinLockWord {
		self.word.get()
	}
}
