// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::types::{CommandId, Oid, TransactionId};

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockIdData {
	pub bi_hi: u16,
	pub bi_lo: u16,
}

/// Physical location of a tuple: block number plus line pointer offset
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemPointerData {
	pub ip_blkid: BlockIdData,
	pub ip_posid: u16,
}

/// In-memory handle to a heap tuple
#[repr(C)]
#[derive(Debug)]
pub struct HeapTupleData {
	/// length of `*t_data`
	pub t_len: u32,
	/// self item pointer
	pub t_self: ItemPointerData,
	/// table the tuple came from
	pub t_table_oid: Oid,
	pub t_data: *mut HeapTupleHeaderData,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union HeapTupleFields3 {
	pub t_cid: CommandId,
	pub t_xvac: TransactionId,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct HeapTupleFields {
	pub t_xmin: TransactionId,
	pub t_xmax: TransactionId,
	pub t_field3: HeapTupleFields3,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DatumTupleFields {
	pub datum_len_: i32,
	pub datum_typmod: i32,
	pub datum_typeid: Oid,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union HeapTupleChoice {
	pub t_heap: HeapTupleFields,
	pub t_datum: DatumTupleFields,
}

/// On-disk header of a heap tuple, followed by the null bitmap and the attributes
#[repr(C)]
pub struct HeapTupleHeaderData {
	pub t_choice: HeapTupleChoice,
	/// current tuple id, or the id of its newer version
	pub t_ctid: ItemPointerData,
	/// number of attributes plus flag bits
	pub t_infomask2: u16,
	/// flag bits
	pub t_infomask: u16,
	/// offset to user data
	pub t_hoff: u8,
	pub t_bits: [u8; 0],
}

#[cfg(test)]
pub mod tests {
	use core::mem::{offset_of, size_of};

	use super::{HeapTupleData, HeapTupleHeaderData, ItemPointerData};
	use crate::constants::SIZEOF_HEAP_TUPLE_HEADER;

	#[test]
	fn test_item_pointer_is_six_bytes() {
		assert_eq!(size_of::<ItemPointerData>(), 6);
	}

	#[test]
	fn test_header_bits_offset() {
		assert_eq!(offset_of!(HeapTupleHeaderData, t_ctid), 12);
		assert_eq!(offset_of!(HeapTupleHeaderData, t_infomask2), 18);
		assert_eq!(offset_of!(HeapTupleHeaderData, t_hoff), 22);
		assert_eq!(offset_of!(HeapTupleHeaderData, t_bits), SIZEOF_HEAP_TUPLE_HEADER);
	}

	#[test]
	fn test_heap_tuple_data_layout() {
		assert_eq!(offset_of!(HeapTupleData, t_self), 4);
		assert_eq!(offset_of!(HeapTupleData, t_table_oid), 12);
		assert_eq!(offset_of!(HeapTupleData, t_data), 16);
	}
}
