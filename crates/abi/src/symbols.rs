// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Symbols exported by `cshim/ogview-cshim.c`
//!
//! The shim is compiled and linked by the extension that embeds ogview, against the
//! headers of the engine it is loaded into.

#![allow(non_snake_case)]

use core::ffi::c_void;

use libc::{c_char, c_int};

use crate::{
	callbacks::{
		ArrayCallbacks, BoundaryCallbacks, ErrorFrameFFI, GuardedFn, ListCallbacks, MemoryCallbacks,
		ReportCallbacks, RuntimeCallbacks, SpinCallbacks, TupleCallbacks, VarlenaCallbacks,
	},
	layout::{
		ArrayType, HeapTupleData, HeapTupleHeaderData, List, ListCell, PlannerInfo, RangeTblEntry, TupleDescData,
		Varlena,
	},
	types::{Bits8, CommandId, Datum, Index, MemoryContext, Oid, SpinLockWord, TransactionId},
};

unsafe extern "C-unwind" {
	pub fn ogx_GetMemoryContextChunk(ptr: *mut c_void) -> MemoryContext;

	pub fn ogx_elog(level: i32, message: *const c_char);
	pub fn ogx_elog_error(message: *const c_char);
	pub fn ogx_ereport(
		level: c_int,
		code: c_int,
		message: *const c_char,
		file: *const c_char,
		lineno: c_int,
		colno: c_int,
	);

	pub fn ogx_SET_VARSIZE(ptr: *mut Varlena, size: c_int);
	pub fn ogx_SET_VARSIZE_SHORT(ptr: *mut Varlena, size: c_int);
	pub fn ogx_VARSIZE_ANY(ptr: *const Varlena) -> usize;
	pub fn ogx_VARSIZE_ANY_EXHDR(ptr: *const Varlena) -> usize;
	pub fn ogx_VARDATA_ANY(ptr: *const Varlena) -> *mut c_char;
	pub fn ogx_VARATT_IS_SHORT(ptr: *const Varlena) -> bool;
	pub fn ogx_VARATT_IS_EXTERNAL(ptr: *const Varlena) -> bool;
	pub fn ogx_VARATT_IS_COMPRESSED(ptr: *const Varlena) -> bool;

	pub fn ogx_heap_getattr(
		tuple: *mut HeapTupleData,
		attnum: c_int,
		tupdesc: *mut TupleDescData,
		isnull: *mut bool,
	) -> Datum;
	pub fn ogx_HeapTupleHeaderGetXmin(header: *mut HeapTupleHeaderData) -> TransactionId;
	pub fn ogx_HeapTupleHeaderGetRawCommandId(header: *mut HeapTupleHeaderData) -> CommandId;
	pub fn ogx_HeapTupleHeaderGetOid(header: *mut HeapTupleHeaderData) -> Oid;
	pub fn ogx_GETSTRUCT(tuple: *mut HeapTupleData) -> *mut c_char;
	pub fn ogx_TupleDescNatts(tupdesc: *mut TupleDescData) -> c_int;

	pub fn ogx_planner_rt_fetch(index: Index, root: *mut PlannerInfo) -> *mut RangeTblEntry;
	pub fn ogx_list_length(list: *mut List) -> c_int;
	pub fn ogx_list_nth(list: *mut List, nth: c_int) -> *mut c_void;
	pub fn ogx_list_nth_int(list: *mut List, nth: c_int) -> c_int;
	pub fn ogx_list_nth_oid(list: *mut List, nth: c_int) -> Oid;
	pub fn ogx_list_nth_cell(list: *mut List, nth: c_int) -> *mut ListCell;

	pub fn ogx_ARR_DATA_PTR(arr: *mut ArrayType) -> *mut c_char;
	pub fn ogx_ARR_NELEMS(arr: *mut ArrayType) -> c_int;
	pub fn ogx_ARR_NULLBITMAP(arr: *mut ArrayType) -> *mut Bits8;
	pub fn ogx_ARR_NDIM(arr: *mut ArrayType) -> c_int;
	pub fn ogx_ARR_HASNULL(arr: *mut ArrayType) -> bool;
	pub fn ogx_ARR_DIMS(arr: *mut ArrayType) -> *mut c_int;
	pub fn ogx_ARR_LBOUND(arr: *mut ArrayType) -> *mut c_int;
	pub fn ogx_ARR_ELEMTYPE(arr: *mut ArrayType) -> Oid;

	pub fn ogx_SpinLockInit(lock: *mut SpinLockWord);
	pub fn ogx_SpinLockAcquire(lock: *mut SpinLockWord);
	pub fn ogx_SpinLockRelease(lock: *mut SpinLockWord);
	pub fn ogx_SpinLockFree(lock: *mut SpinLockWord) -> bool;

	pub fn ogx_try_call(func: GuardedFn, arg: *mut c_void, frame: *mut ErrorFrameFFI) -> c_int;
}

impl RuntimeCallbacks {
	/// Callbacks resolved against the linked C shim
	pub const fn linked() -> Self {
		Self {
			spin: SpinCallbacks {
				init: ogx_SpinLockInit,
				acquire: ogx_SpinLockAcquire,
				release: ogx_SpinLockRelease,
				free: ogx_SpinLockFree,
			},
			varlena: VarlenaCallbacks {
				set_size: ogx_SET_VARSIZE,
				set_size_short: ogx_SET_VARSIZE_SHORT,
				size_any: ogx_VARSIZE_ANY,
				size_any_exhdr: ogx_VARSIZE_ANY_EXHDR,
				data_any: ogx_VARDATA_ANY,
				is_short: ogx_VARATT_IS_SHORT,
				is_external: ogx_VARATT_IS_EXTERNAL,
				is_compressed: ogx_VARATT_IS_COMPRESSED,
			},
			array: ArrayCallbacks {
				data_ptr: ogx_ARR_DATA_PTR,
				nelems: ogx_ARR_NELEMS,
				null_bitmap: ogx_ARR_NULLBITMAP,
				ndim: ogx_ARR_NDIM,
				has_null: ogx_ARR_HASNULL,
				dims: ogx_ARR_DIMS,
				lbound: ogx_ARR_LBOUND,
				elemtype: ogx_ARR_ELEMTYPE,
			},
			tuple: TupleCallbacks {
				getattr: ogx_heap_getattr,
				header_get_xmin: ogx_HeapTupleHeaderGetXmin,
				header_get_raw_command_id: ogx_HeapTupleHeaderGetRawCommandId,
				header_get_oid: ogx_HeapTupleHeaderGetOid,
				get_struct: ogx_GETSTRUCT,
				desc_natts: ogx_TupleDescNatts,
			},
			list: ListCallbacks {
				length: ogx_list_length,
				nth: ogx_list_nth,
				nth_int: ogx_list_nth_int,
				nth_oid: ogx_list_nth_oid,
				nth_cell: ogx_list_nth_cell,
				planner_rt_fetch: ogx_planner_rt_fetch,
			},
			memory: MemoryCallbacks {
				chunk_context: ogx_GetMemoryContextChunk,
			},
			report: ReportCallbacks {
				elog: ogx_elog,
				elog_error: ogx_elog_error,
				ereport: ogx_ereport,
			},
			boundary: BoundaryCallbacks {
				try_call: ogx_try_call,
			},
		}
	}
}
