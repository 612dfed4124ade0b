// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Scalar types shared with the engine

/// Object identifier. `0` is [`INVALID_OID`](crate::constants::INVALID_OID).
pub type Oid = u32;

/// Transaction identifier as stored in a tuple header.
pub type TransactionId = u32;

/// Command identifier as stored in a tuple header.
pub type CommandId = u32;

/// 1-based index into a range table.
pub type Index = u32;

/// One byte of a null bitmap.
pub type Bits8 = u8;

/// The engine's spinlock word (`slock_t`).
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub type SpinLockWord = u8;

/// The engine's spinlock word (`slock_t`).
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
pub type SpinLockWord = i32;

/// Pointer to an engine memory context.
pub type MemoryContext = *mut crate::layout::MemoryContextData;

/// A pointer-sized value that holds either a by-value scalar or a pointer into engine
/// memory, depending on the attribute type it was fetched for.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Datum(pub usize);

impl Datum {
	pub const NULL: Datum = Datum(0);

	pub const fn value(self) -> usize {
		self.0
	}

	pub fn from_ptr<T>(ptr: *const T) -> Self {
		Datum(ptr as usize)
	}

	pub fn as_ptr<T>(self) -> *mut T {
		self.0 as *mut T
	}

	pub const fn as_bool(self) -> bool {
		self.0 != 0
	}

	pub const fn as_i16(self) -> i16 {
		self.0 as i16
	}

	pub const fn as_i32(self) -> i32 {
		self.0 as i32
	}

	pub const fn as_u32(self) -> u32 {
		self.0 as u32
	}

	pub const fn as_i64(self) -> i64 {
		self.0 as i64
	}

	pub const fn as_oid(self) -> Oid {
		self.0 as Oid
	}
}

impl From<usize> for Datum {
	fn from(value: usize) -> Self {
		Datum(value)
	}
}

impl From<Datum> for usize {
	fn from(datum: Datum) -> Self {
		datum.0
	}
}

impl From<i32> for Datum {
	fn from(value: i32) -> Self {
		Datum(value as isize as usize)
	}
}

impl From<i64> for Datum {
	fn from(value: i64) -> Self {
		Datum(value as usize)
	}
}

impl From<bool> for Datum {
	fn from(value: bool) -> Self {
		Datum(value as usize)
	}
}

#[cfg(test)]
pub mod tests {
	use super::Datum;

	#[test]
	fn test_negative_i32_round_trips() {
		let datum = Datum::from(-42i32);
		assert_eq!(datum.as_i32(), -42);
	}

	#[test]
	fn test_pointer_round_trips() {
		let value = 7u64;
		let datum = Datum::from_ptr(&value);
		assert_eq!(datum.as_ptr::<u64>() as *const u64, &value as *const u64);
		assert!(!Datum::NULL.as_bool());
	}
}
