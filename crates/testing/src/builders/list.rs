// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;

use ogview_abi::{
	layout::{List, PlannerInfo, RangeTblEntry},
	types::Oid,
};

use crate::{
	ForeignArena,
	engine::{T_INT_LIST, T_LIST, T_OID_LIST, TestList, TestListCell, TestPlannerInfo},
};

/// Lays out a list of pointers, integers or oids
///
/// An empty list builds to a null pointer, which is how the engine spells `NIL`.
#[derive(Debug, Clone)]
pub struct ListBuilder {
	tag: i32,
	cells: Vec<TestListCell>,
}

impl ListBuilder {
	pub fn pointers(values: &[*mut c_void]) -> Self {
		Self {
			tag: T_LIST,
			cells: values
				.iter()
				.map(|&ptr_value| TestListCell {
					ptr_value,
				})
				.collect(),
		}
	}

	pub fn ints(values: &[i32]) -> Self {
		Self {
			tag: T_INT_LIST,
			cells: values
				.iter()
				.map(|&int_value| TestListCell {
					int_value,
				})
				.collect(),
		}
	}

	pub fn oids(values: &[Oid]) -> Self {
		Self {
			tag: T_OID_LIST,
			cells: values
				.iter()
				.map(|&oid_value| TestListCell {
					oid_value,
				})
				.collect(),
		}
	}

	pub fn build(&self, arena: &ForeignArena) -> *mut List {
		if self.cells.is_empty() {
			return std::ptr::null_mut();
		}

		let cells = arena.alloc(size_of::<TestListCell>() * self.cells.len()).as_ptr() as *mut TestListCell;
		let list = arena.alloc_as::<TestList>(0).as_ptr();
		unsafe {
			cells.copy_from_nonoverlapping(self.cells.as_ptr(), self.cells.len());
			list.write(TestList {
				type_: self.tag,
				length: self.cells.len() as i32,
				max_length: self.cells.len() as i32,
				elements: cells,
			});
		}
		list.cast()
	}
}

/// Range table entry as laid out by [`PlannerInfoBuilder`]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestRangeTblEntry {
	pub relid: Oid,
}

impl TestRangeTblEntry {
	/// # Safety
	/// `entry` must come from a [`PlannerInfoBuilder`].
	pub unsafe fn relid_of(entry: *const RangeTblEntry) -> Oid {
		unsafe { (*(entry as *const TestRangeTblEntry)).relid }
	}
}

/// Lays out planner state with a range table of relations
#[derive(Debug, Clone, Default)]
pub struct PlannerInfoBuilder {
	relids: Vec<Oid>,
}

impl PlannerInfoBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a relation; the first one gets range table index 1
	pub fn relation(mut self, relid: Oid) -> Self {
		self.relids.push(relid);
		self
	}

	pub fn build(&self, arena: &ForeignArena) -> *mut PlannerInfo {
		let slots = self.relids.len() + 1;
		let array = arena.alloc(size_of::<*mut RangeTblEntry>() * slots).as_ptr() as *mut *mut RangeTblEntry;
		let root = arena.alloc_as::<TestPlannerInfo>(0).as_ptr();
		unsafe {
			for (i, &relid) in self.relids.iter().enumerate() {
				let entry = arena.alloc_as::<TestRangeTblEntry>(0).as_ptr();
				entry.write(TestRangeTblEntry {
					relid,
				});
				array.add(i + 1).write(entry.cast());
			}
			root.write(TestPlannerInfo {
				simple_rte_array: array,
				simple_rel_array_size: slots as i32,
			});
		}
		root.cast()
	}
}
