// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{ffi::c_void, fmt};

use libc::c_int;
use ogview_abi::{
	layout::{List, ListCell, PlannerInfo, RangeTblEntry},
	types::{Index, Oid},
};

use super::report::trap;

/// Node tag of a list of pointers
pub const T_LIST: i32 = 1;
/// Node tag of a list of integers
pub const T_INT_LIST: i32 = 2;
/// Node tag of a list of oids
pub const T_OID_LIST: i32 = 3;

#[repr(C)]
#[derive(Clone, Copy)]
pub union TestListCell {
	pub ptr_value: *mut c_void,
	pub int_value: c_int,
	pub oid_value: Oid,
}

impl fmt::Debug for TestListCell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TestListCell({:p})", unsafe { self.ptr_value })
	}
}

/// List header in the shape the emulated engine reads: a tag, a length and a
/// contiguous cell array
#[repr(C)]
#[derive(Debug)]
pub struct TestList {
	pub type_: i32,
	pub length: c_int,
	pub max_length: c_int,
	pub elements: *mut TestListCell,
}

/// The part of the planner state that range table lookups read
///
/// Slot 0 of `simple_rte_array` is unused; range table indexes start at 1.
#[repr(C)]
#[derive(Debug)]
pub struct TestPlannerInfo {
	pub simple_rte_array: *mut *mut RangeTblEntry,
	pub simple_rel_array_size: c_int,
}

unsafe fn cell(list: *mut List, n: c_int, expected: i32) -> *mut TestListCell {
	if list.is_null() {
		trap("list != NIL");
	}
	let list = list as *mut TestList;
	unsafe {
		if n < 0 || n >= (*list).length {
			trap("n >= 0 && n < list->length");
		}
		if (*list).type_ != expected {
			trap("list->type == expected");
		}
		(*list).elements.add(n as usize)
	}
}

pub(super) unsafe extern "C-unwind" fn length(list: *mut List) -> c_int {
	if list.is_null() {
		return 0;
	}
	unsafe { (*(list as *mut TestList)).length }
}

pub(super) unsafe extern "C-unwind" fn nth(list: *mut List, n: c_int) -> *mut c_void {
	unsafe { (*cell(list, n, T_LIST)).ptr_value }
}

pub(super) unsafe extern "C-unwind" fn nth_int(list: *mut List, n: c_int) -> c_int {
	unsafe { (*cell(list, n, T_INT_LIST)).int_value }
}

pub(super) unsafe extern "C-unwind" fn nth_oid(list: *mut List, n: c_int) -> Oid {
	unsafe { (*cell(list, n, T_OID_LIST)).oid_value }
}

pub(super) unsafe extern "C-unwind" fn nth_cell(list: *mut List, n: c_int) -> *mut ListCell {
	if list.is_null() {
		trap("list != NIL");
	}
	let kind = unsafe { (*(list as *mut TestList)).type_ };
	unsafe { cell(list, n, kind) as *mut ListCell }
}

pub(super) unsafe extern "C-unwind" fn planner_rt_fetch(index: Index, root: *mut PlannerInfo) -> *mut RangeTblEntry {
	let root = root as *mut TestPlannerInfo;
	unsafe {
		if root.is_null() || (*root).simple_rte_array.is_null() {
			trap("root->simple_rte_array");
		}
		if index == 0 || index as c_int >= (*root).simple_rel_array_size {
			trap("rti > 0 && rti < root->simple_rel_array_size");
		}
		*(*root).simple_rte_array.add(index as usize)
	}
}
