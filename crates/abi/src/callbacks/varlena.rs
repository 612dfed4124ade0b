// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use libc::{c_char, c_int};

use crate::layout::Varlena;

/// Variable-length header primitives (`varatt.h`)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct VarlenaCallbacks {
	/// Write a 4-byte header describing `size` total bytes (`SET_VARSIZE`)
	pub set_size: unsafe extern "C-unwind" fn(ptr: *mut Varlena, size: c_int),

	/// Write a 1-byte header describing `size` total bytes (`SET_VARSIZE_SHORT`)
	///
	/// `size` must not exceed `VARATT_SHORT_MAX`; larger values are truncated.
	pub set_size_short: unsafe extern "C-unwind" fn(ptr: *mut Varlena, size: c_int),

	/// Total size including the header, whatever the header kind (`VARSIZE_ANY`)
	pub size_any: unsafe extern "C-unwind" fn(ptr: *const Varlena) -> usize,

	/// Payload size excluding the header (`VARSIZE_ANY_EXHDR`)
	pub size_any_exhdr: unsafe extern "C-unwind" fn(ptr: *const Varlena) -> usize,

	/// Start of the payload, past whichever header is present (`VARDATA_ANY`)
	pub data_any: unsafe extern "C-unwind" fn(ptr: *const Varlena) -> *mut c_char,

	/// `VARATT_IS_SHORT`
	pub is_short: unsafe extern "C-unwind" fn(ptr: *const Varlena) -> bool,

	/// `VARATT_IS_EXTERNAL`
	pub is_external: unsafe extern "C-unwind" fn(ptr: *const Varlena) -> bool,

	/// `VARATT_IS_COMPRESSED`
	pub is_compressed: unsafe extern "C-unwind" fn(ptr: *const Varlena) -> bool,
}
