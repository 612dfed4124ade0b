// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Engine lists and range table lookups

use core::ffi::c_void;
use std::ptr::NonNull;

use libc::c_int;
use ogview_abi::{
	layout::{self, ListCell, PlannerInfo, RangeTblEntry},
	types::{Index, Oid},
};

use crate::{
	Result, Runtime, ViewError,
	check::{check, checked},
};

/// View over an engine list of pointers, integers or oids
///
/// A null list is the empty list.
pub struct List<'a> {
	rt: &'a Runtime,
	ptr: *mut layout::List,
}

impl<'a> List<'a> {
	/// # Safety
	/// `ptr` must be null or point at a list that stays valid for `'a`.
	pub unsafe fn from_ptr(rt: &'a Runtime, ptr: *mut layout::List) -> Self {
		Self {
			rt,
			ptr,
		}
	}

	pub fn as_ptr(&self) -> *mut layout::List {
		self.ptr
	}

	pub fn len(&self) -> usize {
		let len = unsafe { (self.rt.callbacks().list.length)(self.ptr) };
		len.max(0) as usize
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Pointer element `n` of a pointer list
	pub fn nth(&self, n: usize) -> *mut c_void {
		unsafe { (self.rt.callbacks().list.nth)(self.ptr, self.index(n)) }
	}

	/// Integer element `n` of an integer list
	pub fn nth_int(&self, n: usize) -> i32 {
		unsafe { (self.rt.callbacks().list.nth_int)(self.ptr, self.index(n)) }
	}

	/// Oid element `n` of an oid list
	pub fn nth_oid(&self, n: usize) -> Oid {
		unsafe { (self.rt.callbacks().list.nth_oid)(self.ptr, self.index(n)) }
	}

	/// Cell `n`, of any list kind
	pub fn nth_cell(&self, n: usize) -> NonNull<ListCell> {
		let cell = unsafe { (self.rt.callbacks().list.nth_cell)(self.ptr, self.index(n)) };
		checked!(NonNull::new(cell).ok_or(ViewError::NullPointer {
			what: "list cell",
		}))
	}

	/// [`nth`](Self::nth) that always checks `n`
	pub fn try_nth(&self, n: usize) -> Result<*mut c_void> {
		let n = self.validate_index(n)?;
		Ok(unsafe { (self.rt.callbacks().list.nth)(self.ptr, n) })
	}

	/// [`nth_int`](Self::nth_int) that always checks `n`
	pub fn try_nth_int(&self, n: usize) -> Result<i32> {
		let n = self.validate_index(n)?;
		Ok(unsafe { (self.rt.callbacks().list.nth_int)(self.ptr, n) })
	}

	/// [`nth_oid`](Self::nth_oid) that always checks `n`
	pub fn try_nth_oid(&self, n: usize) -> Result<Oid> {
		let n = self.validate_index(n)?;
		Ok(unsafe { (self.rt.callbacks().list.nth_oid)(self.ptr, n) })
	}

	/// Integer elements in order
	pub fn ints(&self) -> impl Iterator<Item = i32> + '_ {
		(0..self.len()).map(|n| self.nth_int(n))
	}

	/// Oid elements in order
	pub fn oids(&self) -> impl Iterator<Item = Oid> + '_ {
		(0..self.len()).map(|n| self.nth_oid(n))
	}

	/// `n` as the engine's index type
	///
	/// Checked against the length when checks are enabled. Otherwise an index past
	/// `c_int::MAX` saturates rather than wrapping onto a valid cell.
	fn index(&self, n: usize) -> c_int {
		check!(self.rt, n < self.len(), ViewError::IndexOutOfBounds {
			index: n,
			len: self.len(),
		});
		c_int::try_from(n).unwrap_or(c_int::MAX)
	}

	fn validate_index(&self, n: usize) -> Result<c_int> {
		let len = self.len();
		let out_of_bounds = ViewError::IndexOutOfBounds {
			index: n,
			len,
		};
		if n >= len {
			return Err(out_of_bounds);
		}
		c_int::try_from(n).map_err(|_| out_of_bounds)
	}
}

impl Runtime {
	/// Range table entry `index` of the query level planned by `root`; indexes start at 1
	///
	/// # Safety
	/// `root` must point at live planner state whose range table has an entry at `index`.
	pub unsafe fn planner_rt_fetch(&self, index: Index, root: *mut PlannerInfo) -> *mut RangeTblEntry {
		check!(self, index > 0, ViewError::InvalidRangeTableIndex {
			index
		});
		check!(self, !root.is_null(), ViewError::NullPointer {
			what: "planner info"
		});
		unsafe { (self.callbacks().list.planner_rt_fetch)(index, root) }
	}

	/// [`planner_rt_fetch`](Self::planner_rt_fetch) that always checks its arguments
	///
	/// # Safety
	/// See [`Runtime::planner_rt_fetch`].
	pub unsafe fn try_planner_rt_fetch(&self, index: Index, root: *mut PlannerInfo) -> Result<NonNull<RangeTblEntry>> {
		if index == 0 {
			return Err(ViewError::InvalidRangeTableIndex {
				index,
			});
		}
		if root.is_null() {
			return Err(ViewError::NullPointer {
				what: "planner info",
			});
		}
		let entry = unsafe { (self.callbacks().list.planner_rt_fetch)(index, root) };
		NonNull::new(entry).ok_or(ViewError::NullPointer {
			what: "range table entry",
		})
	}
}

#[cfg(test)]
pub mod tests {
	use core::ffi::c_void;

	use ogview_abi::constants::PANIC;
	use ogview_testing::{
		ForeignArena, ListBuilder, PlannerInfoBuilder, TestRangeTblEntry, catch_engine_error, engine,
	};

	use super::List;
	use crate::{CheckMode, Runtime, ViewError};

	#[test]
	fn test_nil_is_empty() {
		let rt = Runtime::new(engine());
		let list = unsafe { List::from_ptr(&rt, std::ptr::null_mut()) };
		assert_eq!(list.len(), 0);
		assert!(list.is_empty());
		assert_eq!(list.try_nth_int(0), Err(ViewError::IndexOutOfBounds {
			index: 0,
			len: 0,
		}));
	}

	#[test]
	fn test_int_and_oid_lists() {
		let rt = Runtime::new(engine());
		let arena = ForeignArena::new("test");
		let ints = unsafe { List::from_ptr(&rt, ListBuilder::ints(&[3, 1, 4]).build(&arena)) };
		assert_eq!(ints.ints().collect::<Vec<_>>(), [3, 1, 4]);
		assert_eq!(ints.try_nth_int(2), Ok(4));

		let oids = unsafe { List::from_ptr(&rt, ListBuilder::oids(&[1259, 2615]).build(&arena)) };
		assert_eq!(oids.nth_oid(0), 1259);
		assert_eq!(oids.oids().last(), Some(2615));
	}

	#[test]
	fn test_pointer_list() {
		let rt = Runtime::new(engine());
		let arena = ForeignArena::new("test");
		let mut a = 1u8;
		let mut b = 2u8;
		let ptrs = [&mut a as *mut u8 as *mut c_void, &mut b as *mut u8 as *mut c_void];
		let list = unsafe { List::from_ptr(&rt, ListBuilder::pointers(&ptrs).build(&arena)) };

		assert_eq!(list.nth(1), ptrs[1]);
		assert_eq!(list.try_nth(0), Ok(ptrs[0]));
		assert_eq!(unsafe { *(list.nth_cell(0).as_ptr() as *const *mut c_void) }, ptrs[0]);
	}

	#[test]
	fn test_index_checked() {
		let rt = Runtime::builder(engine()).checks(CheckMode::Always).build();
		let arena = ForeignArena::new("test");
		let list = unsafe { List::from_ptr(&rt, ListBuilder::ints(&[1]).build(&arena)) };
		assert!(std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| list.nth_int(1))).is_err());
	}

	#[test]
	fn test_unchecked_index_reaches_engine_assertion() {
		let rt = Runtime::builder(engine()).checks(CheckMode::Off).build();
		let arena = ForeignArena::new("test");
		let list = unsafe { List::from_ptr(&rt, ListBuilder::ints(&[1]).build(&arena)) };
		let err = catch_engine_error(|| list.nth_int(5)).unwrap_err();
		assert_eq!(err.level, PANIC);
	}

	#[test]
	#[cfg(target_pointer_width = "64")]
	fn test_unchecked_index_does_not_wrap() {
		let rt = Runtime::builder(engine()).checks(CheckMode::Off).build();
		let arena = ForeignArena::new("test");
		let list = unsafe { List::from_ptr(&rt, ListBuilder::ints(&[7, 8]).build(&arena)) };

		let err = catch_engine_error(|| list.nth_int((1 << 32) + 1)).unwrap_err();
		assert_eq!(err.level, PANIC);
		assert_eq!(list.try_nth_int((1 << 32) + 1), Err(ViewError::IndexOutOfBounds {
			index: (1 << 32) + 1,
			len: 2,
		}));
	}

	#[test]
	fn test_planner_rt_fetch() {
		let rt = Runtime::new(engine());
		let arena = ForeignArena::new("test");
		let root = PlannerInfoBuilder::new().relation(1259).relation(2615).build(&arena);

		let entry = unsafe { rt.planner_rt_fetch(1, root) };
		assert_eq!(unsafe { TestRangeTblEntry::relid_of(entry) }, 1259);
		let entry = unsafe { rt.try_planner_rt_fetch(2, root) }.unwrap();
		assert_eq!(unsafe { TestRangeTblEntry::relid_of(entry.as_ptr()) }, 2615);
		assert_eq!(unsafe { rt.try_planner_rt_fetch(0, root) }, Err(ViewError::InvalidRangeTableIndex {
			index: 0
		}));
	}
}
