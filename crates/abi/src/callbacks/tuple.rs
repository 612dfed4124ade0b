// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use libc::{c_char, c_int};

use crate::{
	layout::{HeapTupleData, HeapTupleHeaderData, TupleDescData},
	types::{CommandId, Datum, Oid, TransactionId},
};

/// Heap tuple accessors (`access/htup_details.h`)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct TupleCallbacks {
	/// Fetch attribute `attnum` of `tuple` using `tupdesc` (`heap_getattr`)
	///
	/// # Parameters
	/// - `tuple`: Tuple to read from
	/// - `attnum`: 1-based attribute number; non-positive numbers select system attributes
	/// - `tupdesc`: Row type descriptor matching the tuple
	/// - `isnull`: Receives whether the attribute is null
	///
	/// # Returns
	/// - The attribute value; meaningless when `*isnull` is set
	pub getattr: unsafe extern "C-unwind" fn(
		tuple: *mut HeapTupleData,
		attnum: c_int,
		tupdesc: *mut TupleDescData,
		isnull: *mut bool,
	) -> Datum,

	/// `HeapTupleHeaderGetXmin`
	pub header_get_xmin: unsafe extern "C-unwind" fn(header: *mut HeapTupleHeaderData) -> TransactionId,

	/// `HeapTupleHeaderGetRawCommandId`
	pub header_get_raw_command_id: unsafe extern "C-unwind" fn(header: *mut HeapTupleHeaderData) -> CommandId,

	/// `HeapTupleHeaderGetOid`, 0 when the tuple carries no oid
	pub header_get_oid: unsafe extern "C-unwind" fn(header: *mut HeapTupleHeaderData) -> Oid,

	/// Fixed-layout user data following the header (`GETSTRUCT`)
	pub get_struct: unsafe extern "C-unwind" fn(tuple: *mut HeapTupleData) -> *mut c_char,

	/// Number of attributes described by `tupdesc`
	pub desc_natts: unsafe extern "C-unwind" fn(tupdesc: *mut TupleDescData) -> c_int,
}
