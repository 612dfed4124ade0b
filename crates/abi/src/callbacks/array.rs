// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use libc::{c_char, c_int};

use crate::{
	layout::ArrayType,
	types::{Bits8, Oid},
};

/// Array header accessors (`utils/array.h`)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ArrayCallbacks {
	/// Start of the element data (`ARR_DATA_PTR`)
	pub data_ptr: unsafe extern "C-unwind" fn(arr: *mut ArrayType) -> *mut c_char,

	/// Number of elements (`ArrayGetNItems(ARR_NDIM, ARR_DIMS)`)
	///
	/// Reports an ERROR for negative dimensions or when the product overflows the
	/// engine's array size limit.
	pub nelems: unsafe extern "C-unwind" fn(arr: *mut ArrayType) -> c_int,

	/// Null bitmap, or null when the array has no nulls (`ARR_NULLBITMAP`)
	pub null_bitmap: unsafe extern "C-unwind" fn(arr: *mut ArrayType) -> *mut Bits8,

	/// `ARR_NDIM`
	pub ndim: unsafe extern "C-unwind" fn(arr: *mut ArrayType) -> c_int,

	/// `ARR_HASNULL`
	pub has_null: unsafe extern "C-unwind" fn(arr: *mut ArrayType) -> bool,

	/// Dimension lengths, `ndim` entries (`ARR_DIMS`)
	pub dims: unsafe extern "C-unwind" fn(arr: *mut ArrayType) -> *mut c_int,

	/// Dimension lower bounds, `ndim` entries (`ARR_LBOUND`)
	pub lbound: unsafe extern "C-unwind" fn(arr: *mut ArrayType) -> *mut c_int,

	/// `ARR_ELEMTYPE`
	pub elemtype: unsafe extern "C-unwind" fn(arr: *mut ArrayType) -> Oid,
}
