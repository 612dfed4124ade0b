// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;

use libc::c_int;

use crate::{
	layout::{List, ListCell, PlannerInfo, RangeTblEntry},
	types::{Index, Oid},
};

/// List and range table accessors (`nodes/pg_list.h`, `parser/parsetree.h`)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ListCallbacks {
	/// `list_length`, 0 for the empty list
	pub length: unsafe extern "C-unwind" fn(list: *mut List) -> c_int,

	/// `list_nth`
	pub nth: unsafe extern "C-unwind" fn(list: *mut List, n: c_int) -> *mut c_void,

	/// `list_nth_int`
	pub nth_int: unsafe extern "C-unwind" fn(list: *mut List, n: c_int) -> c_int,

	/// `list_nth_oid`
	pub nth_oid: unsafe extern "C-unwind" fn(list: *mut List, n: c_int) -> Oid,

	/// `list_nth_cell`
	pub nth_cell: unsafe extern "C-unwind" fn(list: *mut List, n: c_int) -> *mut ListCell,

	/// Range table entry `index` (1-based) of the query `root` plans (`planner_rt_fetch`)
	pub planner_rt_fetch: unsafe extern "C-unwind" fn(index: Index, root: *mut PlannerInfo) -> *mut RangeTblEntry,
}
