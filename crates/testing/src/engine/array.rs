// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::mem::size_of;

use libc::{c_char, c_int};
use ogview_abi::{
	constants::{ERROR, MAX_ARRAY_SIZE, MAXIMUM_ALIGNOF},
	layout::ArrayType,
	types::{Bits8, Oid},
};

use super::report::{ERRCODE_PROGRAM_LIMIT_EXCEEDED, raise};

const fn max_align(len: usize) -> usize {
	(len + MAXIMUM_ALIGNOF - 1) & !(MAXIMUM_ALIGNOF - 1)
}

unsafe fn ndim_of(arr: *const ArrayType) -> usize {
	unsafe { (*arr).ndim.max(0) as usize }
}

pub(super) unsafe extern "C-unwind" fn ndim(arr: *mut ArrayType) -> c_int {
	unsafe { (*arr).ndim }
}

pub(super) unsafe extern "C-unwind" fn has_null(arr: *mut ArrayType) -> bool {
	unsafe { (*arr).dataoffset != 0 }
}

pub(super) unsafe extern "C-unwind" fn elemtype(arr: *mut ArrayType) -> Oid {
	unsafe { (*arr).elemtype }
}

pub(super) unsafe extern "C-unwind" fn dims(arr: *mut ArrayType) -> *mut c_int {
	unsafe { (arr as *mut u8).add(size_of::<ArrayType>()) as *mut c_int }
}

pub(super) unsafe extern "C-unwind" fn lbound(arr: *mut ArrayType) -> *mut c_int {
	unsafe { dims(arr).add(ndim_of(arr)) }
}

pub(super) unsafe extern "C-unwind" fn null_bitmap(arr: *mut ArrayType) -> *mut Bits8 {
	unsafe {
		if !has_null(arr) {
			return std::ptr::null_mut();
		}
		dims(arr).add(2 * ndim_of(arr)) as *mut Bits8
	}
}

pub(super) unsafe extern "C-unwind" fn data_ptr(arr: *mut ArrayType) -> *mut c_char {
	unsafe {
		let offset = if has_null(arr) {
			(*arr).dataoffset as usize
		} else {
			max_align(size_of::<ArrayType>() + 2 * size_of::<c_int>() * ndim_of(arr))
		};
		(arr as *mut c_char).add(offset)
	}
}

/// Product of the dimension lengths, raising an error when it cannot be represented
pub(super) unsafe extern "C-unwind" fn nelems(arr: *mut ArrayType) -> c_int {
	let n = unsafe { (*arr).ndim };
	if n <= 0 {
		return 0;
	}

	let lengths = unsafe { std::slice::from_raw_parts(dims(arr), n as usize) };
	let mut total: i64 = 1;
	for &len in lengths {
		if len < 0 {
			too_large();
		}
		total = match total.checked_mul(len as i64) {
			Some(total) if total <= MAX_ARRAY_SIZE as i64 => total,
			_ => too_large(),
		};
	}
	total as c_int
}

fn too_large() -> ! {
	raise(
		ERROR,
		Some(ERRCODE_PROGRAM_LIMIT_EXCEEDED),
		format!("array size exceeds the maximum allowed ({MAX_ARRAY_SIZE})"),
		None,
	);
	unreachable!("ERROR reports unwind")
}
