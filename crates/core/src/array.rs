// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::ptr::NonNull;

use ogview_abi::{layout::ArrayType, types::Oid};
use tracing::trace;

use crate::{
	Result, Runtime, ViewError,
	check::{check, checked},
};

/// View over a multi-dimensional engine array
pub struct Array<'a> {
	rt: &'a Runtime,
	ptr: NonNull<ArrayType>,
}

impl<'a> Array<'a> {
	/// # Safety
	/// `ptr` must point at a detoasted array that stays valid for `'a`.
	pub unsafe fn from_ptr(rt: &'a Runtime, ptr: *mut ArrayType) -> Self {
		checked!(unsafe { Self::try_from_ptr(rt, ptr) })
	}

	/// # Safety
	/// See [`Array::from_ptr`]; a null pointer is rejected.
	pub unsafe fn try_from_ptr(rt: &'a Runtime, ptr: *mut ArrayType) -> Result<Self> {
		let ptr = NonNull::new(ptr).ok_or(ViewError::NullPointer {
			what: "array",
		})?;
		trace!(?ptr, "array view");
		Ok(Self {
			rt,
			ptr,
		})
	}

	pub fn as_ptr(&self) -> *mut ArrayType {
		self.ptr.as_ptr()
	}

	pub fn ndim(&self) -> i32 {
		unsafe { (self.rt.callbacks().array.ndim)(self.as_ptr()) }
	}

	/// Length of each dimension
	pub fn dims(&self) -> &'a [i32] {
		let ndim = self.ndim();
		if ndim <= 0 {
			return &[];
		}
		unsafe {
			let dims = (self.rt.callbacks().array.dims)(self.as_ptr());
			std::slice::from_raw_parts(dims, ndim as usize)
		}
	}

	/// Lower bound of each dimension
	pub fn lower_bounds(&self) -> &'a [i32] {
		let ndim = self.ndim();
		if ndim <= 0 {
			return &[];
		}
		unsafe {
			let lbound = (self.rt.callbacks().array.lbound)(self.as_ptr());
			std::slice::from_raw_parts(lbound, ndim as usize)
		}
	}

	pub fn has_null(&self) -> bool {
		unsafe { (self.rt.callbacks().array.has_null)(self.as_ptr()) }
	}

	/// The null bitmap, present exactly when [`has_null`](Self::has_null) is true
	pub fn null_bitmap(&self) -> Option<NonNull<u8>> {
		if !self.has_null() {
			return None;
		}
		NonNull::new(unsafe { (self.rt.callbacks().array.null_bitmap)(self.as_ptr()) })
	}

	/// Number of elements across all dimensions
	///
	/// Negative dimensions and counts beyond the engine's limit are reported by the
	/// engine at ERROR and do not return.
	pub fn element_count(&self) -> i32 {
		unsafe { (self.rt.callbacks().array.nelems)(self.as_ptr()) }
	}

	/// First element; null elements take no space in the data area
	pub fn data_ptr(&self) -> NonNull<u8> {
		let data = unsafe { (self.rt.callbacks().array.data_ptr)(self.as_ptr()) };
		NonNull::new(data as *mut u8).unwrap_or(self.ptr.cast())
	}

	pub fn element_type(&self) -> Oid {
		unsafe { (self.rt.callbacks().array.elemtype)(self.as_ptr()) }
	}

	/// Whether element `index` (0-based, in storage order) is null
	pub fn is_null(&self, index: usize) -> bool {
		check!(self.rt, index < self.len(), ViewError::IndexOutOfBounds {
			index,
			len: self.len(),
		});
		self.bitmap_is_null(index)
	}

	/// [`is_null`](Self::is_null) that always checks `index`
	pub fn try_is_null(&self, index: usize) -> Result<bool> {
		let len = self.len();
		if index >= len {
			return Err(ViewError::IndexOutOfBounds {
				index,
				len,
			});
		}
		Ok(self.bitmap_is_null(index))
	}

	fn len(&self) -> usize {
		self.element_count().max(0) as usize
	}

	/// A set bit means the element is present
	fn bitmap_is_null(&self, index: usize) -> bool {
		match self.null_bitmap() {
			Some(bitmap) => unsafe { *bitmap.as_ptr().add(index / 8) & (1 << (index % 8)) == 0 },
			None => false,
		}
	}
}

#[cfg(test)]
pub mod tests {
	use ogview_abi::constants::ERROR;
	use ogview_testing::{ArrayBuilder, ForeignArena, catch_engine_error, engine};

	use super::Array;
	use crate::{CheckMode, Runtime, ViewError, report::SqlState};

	#[test]
	fn test_two_dimensional() {
		let rt = Runtime::new(engine());
		let arena = ForeignArena::new("test");
		let ptr = ArrayBuilder::int4()
			.int4_elements(&[1, 2, 3, 4, 5, 6].map(Some))
			.dims(&[2, 3])
			.lower_bounds(&[1, 0])
			.build(&arena);
		let arr = unsafe { Array::from_ptr(&rt, ptr) };

		assert_eq!(arr.ndim(), 2);
		assert_eq!(arr.dims(), &[2, 3]);
		assert_eq!(arr.lower_bounds(), &[1, 0]);
		assert_eq!(arr.element_count(), 6);
		assert_eq!(arr.element_type(), 23);
		assert!(!arr.has_null());
		assert!(arr.null_bitmap().is_none());
		assert_eq!(unsafe { *(arr.data_ptr().as_ptr() as *const i32).add(4) }, 5);
	}

	#[test]
	fn test_zero_dimensions() {
		let rt = Runtime::new(engine());
		let arena = ForeignArena::new("test");
		let arr = unsafe { Array::from_ptr(&rt, ArrayBuilder::int4().build(&arena)) };

		assert_eq!(arr.ndim(), 0);
		assert_eq!(arr.element_count(), 0);
		assert!(!arr.has_null());
		assert!(arr.dims().is_empty());
		assert_eq!(arr.try_is_null(0), Err(ViewError::IndexOutOfBounds {
			index: 0,
			len: 0,
		}));
	}

	#[test]
	fn test_null_elements() {
		let rt = Runtime::new(engine());
		let arena = ForeignArena::new("test");
		let ptr = ArrayBuilder::int4().int4_elements(&[Some(7), None, Some(9), None]).build(&arena);
		let arr = unsafe { Array::from_ptr(&rt, ptr) };

		assert!(arr.has_null());
		assert!(arr.null_bitmap().is_some());
		let nulls: Vec<bool> = (0..4).map(|i| arr.is_null(i)).collect();
		assert_eq!(nulls, [false, true, false, true]);
	}

	#[test]
	fn test_bitmap_without_nulls() {
		let rt = Runtime::new(engine());
		let arena = ForeignArena::new("test");
		let ptr = ArrayBuilder::int4().int4_elements(&[Some(1), Some(2)]).with_null_bitmap().build(&arena);
		let arr = unsafe { Array::from_ptr(&rt, ptr) };

		assert!(arr.has_null());
		assert!(!arr.is_null(0));
		assert!(!arr.is_null(1));
	}

	#[test]
	fn test_index_checked() {
		let rt = Runtime::builder(engine()).checks(CheckMode::Always).build();
		let arena = ForeignArena::new("test");
		let arr = unsafe { Array::from_ptr(&rt, ArrayBuilder::int4().int4_elements(&[Some(1)]).build(&arena)) };
		assert!(std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| arr.is_null(1))).is_err());
	}

	#[test]
	fn test_negative_dimension_reported_by_engine() {
		let rt = Runtime::new(engine());
		let arena = ForeignArena::new("test");
		let arr = unsafe { Array::from_ptr(&rt, ArrayBuilder::int4().dims(&[-2]).build(&arena)) };
		let err = catch_engine_error(|| arr.element_count()).unwrap_err();
		assert_eq!(err.level, ERROR);
		assert_eq!(err.code, SqlState::PROGRAM_LIMIT_EXCEEDED.packed());
		assert!(err.message.contains("array size exceeds the maximum allowed"));
	}

	#[test]
	fn test_negative_dimension_caught_in_trap() {
		let rt = Runtime::new(engine());
		let arena = ForeignArena::new("test");
		let arr = unsafe { Array::from_ptr(&rt, ArrayBuilder::int4().dims(&[-2]).build(&arena)) };
		let err = unsafe { rt.try_guard(|| arr.element_count()) }.unwrap_err();
		assert_eq!(err.code, SqlState::PROGRAM_LIMIT_EXCEEDED);
	}
}
