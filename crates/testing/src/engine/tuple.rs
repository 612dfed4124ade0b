// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{ffi::CStr, mem::size_of};

use libc::{c_char, c_int};
use ogview_abi::{
	constants::{
		ERROR, FROZEN_TRANSACTION_ID, HEAP_HASNULL, HEAP_HASOID_OLD, HEAP_NATTS_MASK, HEAP_XMIN_FROZEN, INVALID_OID,
		MAX_COMMAND_ID_ATTRIBUTE_NUMBER, MAX_TRANSACTION_ID_ATTRIBUTE_NUMBER, MIN_COMMAND_ID_ATTRIBUTE_NUMBER,
		MIN_TRANSACTION_ID_ATTRIBUTE_NUMBER, SELF_ITEM_POINTER_ATTRIBUTE_NUMBER, TABLE_OID_ATTRIBUTE_NUMBER,
	},
	layout::{HeapTupleData, HeapTupleHeaderData, TupleDescData, Varlena},
	types::{CommandId, Datum, Oid, TransactionId},
};

use super::{report::raise, varlena};

/// Per-attribute entry of a [`TestTupleDesc`]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestAttribute {
	pub atttypid: Oid,
	/// fixed length in bytes, `-1` for varlena, `-2` for C strings
	pub attlen: i16,
	pub attbyval: bool,
	/// `b'c'`, `b's'`, `b'i'` or `b'd'`
	pub attalign: u8,
	pub attisdropped: bool,
}

/// Row type descriptor in the shape the emulated engine reads
///
/// `natts` attribute entries follow the header.
#[repr(C)]
#[derive(Debug)]
pub struct TestTupleDesc {
	pub natts: c_int,
	pub tdtypeid: Oid,
	pub tdtypmod: i32,
	pub tdrefcount: i32,
	pub attrs: [TestAttribute; 0],
}

impl TestTupleDesc {
	/// # Safety
	/// `desc` must point at a descriptor followed by its `natts` attributes.
	pub unsafe fn attributes<'a>(desc: *const TupleDescData) -> &'a [TestAttribute] {
		unsafe {
			let desc = desc as *const TestTupleDesc;
			std::slice::from_raw_parts((*desc).attrs.as_ptr(), (*desc).natts.max(0) as usize)
		}
	}
}

fn align_nominal(offset: usize, attalign: u8) -> usize {
	let align = match attalign {
		b'd' => 8,
		b'i' => 4,
		b's' => 2,
		_ => 1,
	};
	(offset + align - 1) & !(align - 1)
}

/// A varlena that does not start with a pad byte is already positioned; only a zero
/// byte can be padding in front of a 4-byte header.
unsafe fn align_pointer(offset: usize, attr: &TestAttribute, ptr: *const u8) -> usize {
	if attr.attlen == -1 && unsafe { *ptr } != 0 {
		offset
	} else {
		align_nominal(offset, attr.attalign)
	}
}

unsafe fn add_length(offset: usize, attr: &TestAttribute, ptr: *const u8) -> usize {
	match attr.attlen {
		len if len > 0 => offset + len as usize,
		-1 => offset + unsafe { varlena::size_any(ptr as *const Varlena) },
		_ => offset + unsafe { CStr::from_ptr(ptr as *const c_char) }.to_bytes_with_nul().len(),
	}
}

unsafe fn fetch(attr: &TestAttribute, ptr: *const u8) -> Datum {
	if !attr.attbyval {
		return Datum::from_ptr(ptr);
	}
	unsafe {
		match attr.attlen {
			1 => Datum(*(ptr as *const i8) as isize as usize),
			2 => Datum((ptr as *const i16).read_unaligned() as isize as usize),
			4 => Datum((ptr as *const i32).read_unaligned() as isize as usize),
			_ => Datum((ptr as *const i64).read_unaligned() as usize),
		}
	}
}

fn is_null(index: usize, bits: *const u8) -> bool {
	unsafe { *bits.add(index >> 3) & (1 << (index & 0x07)) == 0 }
}

unsafe fn user_attribute(
	header: *const HeapTupleHeaderData,
	attnum: usize,
	desc: *const TupleDescData,
	isnull: *mut bool,
) -> Datum {
	unsafe {
		let natts = ((*header).t_infomask2 & HEAP_NATTS_MASK) as usize;
		let has_nulls = (*header).t_infomask & HEAP_HASNULL != 0;
		let bits = (*header).t_bits.as_ptr();

		if attnum > natts || (has_nulls && is_null(attnum - 1, bits)) {
			*isnull = true;
			return Datum::NULL;
		}

		let attrs = TestTupleDesc::attributes(desc);
		let data = (header as *const u8).add((*header).t_hoff as usize);
		let mut offset = 0;
		for (index, attr) in attrs[..attnum - 1].iter().enumerate() {
			if has_nulls && is_null(index, bits) {
				continue;
			}
			offset = align_pointer(offset, attr, data.add(offset));
			offset = add_length(offset, attr, data.add(offset));
		}

		let attr = &attrs[attnum - 1];
		offset = align_pointer(offset, attr, data.add(offset));
		*isnull = false;
		fetch(attr, data.add(offset))
	}
}

unsafe fn system_attribute(tuple: *mut HeapTupleData, attnum: c_int, isnull: *mut bool) -> Datum {
	unsafe {
		let header = (*tuple).t_data;
		let fields = (*header).t_choice.t_heap;
		let value = match attnum {
			SELF_ITEM_POINTER_ATTRIBUTE_NUMBER => Datum::from_ptr(&raw const (*tuple).t_self),
			MIN_TRANSACTION_ID_ATTRIBUTE_NUMBER => Datum(fields.t_xmin as usize),
			MAX_TRANSACTION_ID_ATTRIBUTE_NUMBER => Datum(fields.t_xmax as usize),
			MIN_COMMAND_ID_ATTRIBUTE_NUMBER | MAX_COMMAND_ID_ATTRIBUTE_NUMBER => {
				Datum(fields.t_field3.t_cid as usize)
			}
			TABLE_OID_ATTRIBUTE_NUMBER => Datum((*tuple).t_table_oid as usize),
			_ => {
				raise(ERROR, None, format!("invalid attnum: {attnum}"), None);
				unreachable!("ERROR reports unwind")
			}
		};
		*isnull = false;
		value
	}
}

pub(super) unsafe extern "C-unwind" fn getattr(
	tuple: *mut HeapTupleData,
	attnum: c_int,
	tupdesc: *mut TupleDescData,
	isnull: *mut bool,
) -> Datum {
	unsafe {
		if attnum > 0 {
			user_attribute((*tuple).t_data, attnum as usize, tupdesc, isnull)
		} else {
			system_attribute(tuple, attnum, isnull)
		}
	}
}

pub(super) unsafe extern "C-unwind" fn header_get_xmin(header: *mut HeapTupleHeaderData) -> TransactionId {
	unsafe {
		if (*header).t_infomask & HEAP_XMIN_FROZEN == HEAP_XMIN_FROZEN {
			FROZEN_TRANSACTION_ID
		} else {
			(*header).t_choice.t_heap.t_xmin
		}
	}
}

pub(super) unsafe extern "C-unwind" fn header_get_raw_command_id(header: *mut HeapTupleHeaderData) -> CommandId {
	unsafe { (*header).t_choice.t_heap.t_field3.t_cid }
}

pub(super) unsafe extern "C-unwind" fn header_get_oid(header: *mut HeapTupleHeaderData) -> Oid {
	unsafe {
		if (*header).t_infomask & HEAP_HASOID_OLD == 0 {
			return INVALID_OID;
		}
		let at = (header as *const u8).add((*header).t_hoff as usize - size_of::<Oid>());
		(at as *const Oid).read_unaligned()
	}
}

pub(super) unsafe extern "C-unwind" fn get_struct(tuple: *mut HeapTupleData) -> *mut c_char {
	unsafe {
		let header = (*tuple).t_data;
		(header as *mut c_char).add((*header).t_hoff as usize)
	}
}

pub(super) unsafe extern "C-unwind" fn desc_natts(tupdesc: *mut TupleDescData) -> c_int {
	unsafe { (*(tupdesc as *const TestTupleDesc)).natts }
}

#[cfg(test)]
pub mod tests {
	use super::{TestAttribute, align_nominal, align_pointer};

	fn attr(attlen: i16, attalign: u8) -> TestAttribute {
		TestAttribute {
			atttypid: 0,
			attlen,
			attbyval: attlen > 0,
			attalign,
			attisdropped: false,
		}
	}

	#[test]
	fn test_align_nominal() {
		assert_eq!(align_nominal(1, b'c'), 1);
		assert_eq!(align_nominal(1, b's'), 2);
		assert_eq!(align_nominal(5, b'i'), 8);
		assert_eq!(align_nominal(9, b'd'), 16);
		assert_eq!(align_nominal(16, b'd'), 16);
	}

	#[test]
	fn test_short_varlena_is_not_padded() {
		let short = [0x0Bu8];
		let pad = [0u8];
		let text = attr(-1, b'i');
		assert_eq!(unsafe { align_pointer(5, &text, short.as_ptr()) }, 5);
		assert_eq!(unsafe { align_pointer(5, &text, pad.as_ptr()) }, 8);
	}
}
