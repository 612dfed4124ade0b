// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Heap tuples
//!
//! Attribute offsets depend on alignment, nulls and the storage of every preceding
//! attribute. They are computed by the engine's `heap_getattr`, never here.

use std::ptr::NonNull;

use libc::c_int;
use ogview_abi::{
	constants::{MAX_HEAP_ATTRIBUTE_NUMBER, TABLE_OID_ATTRIBUTE_NUMBER},
	layout::{HeapTupleData, HeapTupleHeaderData, TupleDescData},
	types::{CommandId, Datum, Oid, TransactionId},
};
use tracing::trace;

use crate::{Result, Runtime, ViewError, check::checked};

/// View over a row type descriptor
pub struct TupleDesc<'a> {
	rt: &'a Runtime,
	ptr: NonNull<TupleDescData>,
}

impl<'a> TupleDesc<'a> {
	/// # Safety
	/// `ptr` must point at a descriptor that stays valid for `'a`.
	pub unsafe fn from_ptr(rt: &'a Runtime, ptr: *mut TupleDescData) -> Self {
		checked!(unsafe { Self::try_from_ptr(rt, ptr) })
	}

	/// # Safety
	/// See [`TupleDesc::from_ptr`]; a null pointer is rejected.
	pub unsafe fn try_from_ptr(rt: &'a Runtime, ptr: *mut TupleDescData) -> Result<Self> {
		let ptr = NonNull::new(ptr).ok_or(ViewError::NullPointer {
			what: "tuple descriptor",
		})?;
		Ok(Self {
			rt,
			ptr,
		})
	}

	pub fn as_ptr(&self) -> *mut TupleDescData {
		self.ptr.as_ptr()
	}

	/// Number of attributes, dropped ones included
	pub fn natts(&self) -> i32 {
		unsafe { (self.rt.callbacks().tuple.desc_natts)(self.as_ptr()) }
	}
}

/// View over the header of a heap tuple
pub struct TupleHeader<'a> {
	rt: &'a Runtime,
	ptr: NonNull<HeapTupleHeaderData>,
}

impl<'a> TupleHeader<'a> {
	/// # Safety
	/// `ptr` must point at a tuple header that stays valid for `'a`.
	pub unsafe fn from_ptr(rt: &'a Runtime, ptr: *mut HeapTupleHeaderData) -> Self {
		checked!(
			NonNull::new(ptr)
				.map(|ptr| Self {
					rt,
					ptr,
				})
				.ok_or(ViewError::NullPointer {
					what: "tuple header",
				})
		)
	}

	pub fn as_ptr(&self) -> *mut HeapTupleHeaderData {
		self.ptr.as_ptr()
	}

	/// Inserting transaction; frozen tuples report `FROZEN_TRANSACTION_ID`
	pub fn xmin(&self) -> TransactionId {
		unsafe { (self.rt.callbacks().tuple.header_get_xmin)(self.as_ptr()) }
	}

	/// Command id field as stored, which may hold a combo command id
	pub fn raw_command_id(&self) -> CommandId {
		unsafe { (self.rt.callbacks().tuple.header_get_raw_command_id)(self.as_ptr()) }
	}

	/// Oid stored in the header by tables created `WITH OIDS`, or `INVALID_OID`
	pub fn legacy_oid(&self) -> Oid {
		unsafe { (self.rt.callbacks().tuple.header_get_oid)(self.as_ptr()) }
	}
}

/// View over a heap tuple
pub struct HeapTuple<'a> {
	rt: &'a Runtime,
	ptr: NonNull<HeapTupleData>,
}

impl<'a> HeapTuple<'a> {
	/// # Safety
	/// `ptr` must point at a tuple whose data stays valid for `'a`.
	pub unsafe fn from_ptr(rt: &'a Runtime, ptr: *mut HeapTupleData) -> Self {
		checked!(unsafe { Self::try_from_ptr(rt, ptr) })
	}

	/// # Safety
	/// See [`HeapTuple::from_ptr`]; a null pointer is rejected.
	pub unsafe fn try_from_ptr(rt: &'a Runtime, ptr: *mut HeapTupleData) -> Result<Self> {
		let ptr = NonNull::new(ptr).ok_or(ViewError::NullPointer {
			what: "heap tuple",
		})?;
		trace!(?ptr, "heap tuple view");
		Ok(Self {
			rt,
			ptr,
		})
	}

	pub fn as_ptr(&self) -> *mut HeapTupleData {
		self.ptr.as_ptr()
	}

	pub fn header(&self) -> TupleHeader<'a> {
		unsafe { TupleHeader::from_ptr(self.rt, (*self.as_ptr()).t_data) }
	}

	/// Value of attribute `attnum` and whether it is null
	///
	/// Positive numbers select user attributes, starting at 1; numbers from -1 down to
	/// `TABLE_OID_ATTRIBUTE_NUMBER` select system attributes. Attributes the tuple was
	/// written without read as null. With checks enabled an attribute number outside
	/// `desc` panics.
	pub fn get_field(&self, attnum: i32, desc: &TupleDesc<'_>) -> (Datum, bool) {
		if self.rt.checks_enabled() {
			checked!(validate_attnum(attnum, desc));
		}
		self.fetch(attnum, desc)
	}

	/// [`get_field`](Self::get_field) that always validates `attnum`
	pub fn try_get_field(&self, attnum: i32, desc: &TupleDesc<'_>) -> Result<(Datum, bool)> {
		validate_attnum(attnum, desc)?;
		Ok(self.fetch(attnum, desc))
	}

	/// Value of attribute `attnum`, or `None` when it is null
	pub fn field(&self, attnum: i32, desc: &TupleDesc<'_>) -> Option<Datum> {
		match self.get_field(attnum, desc) {
			(_, true) => None,
			(value, false) => Some(value),
		}
	}

	/// Start of the user data, past the header, null bitmap and legacy oid
	pub fn raw_struct(&self) -> NonNull<u8> {
		let data = unsafe { (self.rt.callbacks().tuple.get_struct)(self.as_ptr()) };
		NonNull::new(data as *mut u8).unwrap_or(self.ptr.cast())
	}

	fn fetch(&self, attnum: i32, desc: &TupleDesc<'_>) -> (Datum, bool) {
		let mut isnull = false;
		let value =
			unsafe { (self.rt.callbacks().tuple.getattr)(self.as_ptr(), attnum as c_int, desc.as_ptr(), &mut isnull) };
		(value, isnull)
	}
}

fn validate_attnum(attnum: i32, desc: &TupleDesc<'_>) -> Result<()> {
	let natts = desc.natts();
	let valid = match attnum {
		1.. => attnum <= natts && attnum <= MAX_HEAP_ATTRIBUTE_NUMBER,
		0 => false,
		_ => attnum >= TABLE_OID_ATTRIBUTE_NUMBER,
	};
	if valid {
		Ok(())
	} else {
		Err(ViewError::AttributeOutOfRange {
			attnum,
			natts,
		})
	}
}
