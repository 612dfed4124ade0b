// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use ogview_abi::{
	constants::{
		HEAP_HASNULL, HEAP_HASOID_OLD, HEAP_HASVARWIDTH, HEAP_NATTS_MASK, HEAP_XMIN_FROZEN, SIZEOF_HEAP_TUPLE_HEADER,
		VARATT_SHORT_MAX, VARHDRSZ, VARHDRSZ_SHORT,
	},
	layout::{
		HeapTupleChoice, HeapTupleData, HeapTupleFields, HeapTupleFields3, HeapTupleHeaderData, ItemPointerData,
		TupleDescData, Varlena,
	},
	types::{CommandId, Oid, TransactionId},
};

use super::{align_to, max_align};
use crate::{
	ForeignArena, engine,
	engine::{TestAttribute, TestTupleDesc},
};

/// Storage properties of one attribute type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeType {
	pub typid: Oid,
	pub len: i16,
	pub byval: bool,
	pub align: u8,
}

impl AttributeType {
	pub const BOOL: Self = Self::fixed(16, 1, b'c');
	pub const INT2: Self = Self::fixed(21, 2, b's');
	pub const INT4: Self = Self::fixed(23, 4, b'i');
	pub const INT8: Self = Self::fixed(20, 8, b'd');
	pub const OID: Self = Self::fixed(26, 4, b'i');
	pub const FLOAT8: Self = Self::fixed(701, 8, b'd');
	pub const TEXT: Self = Self {
		typid: 25,
		len: -1,
		byval: false,
		align: b'i',
	};
	pub const CSTRING: Self = Self {
		typid: 2275,
		len: -2,
		byval: false,
		align: b'c',
	};

	const fn fixed(typid: Oid, len: i16, align: u8) -> Self {
		Self {
			typid,
			len,
			byval: true,
			align,
		}
	}

	fn alignment(&self) -> usize {
		match self.align {
			b'd' => 8,
			b'i' => 4,
			b's' => 2,
			_ => 1,
		}
	}
}

/// Lays out a row type descriptor
#[derive(Debug, Clone, Default)]
pub struct TupleDescBuilder {
	types: Vec<AttributeType>,
}

impl TupleDescBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_types(types: &[AttributeType]) -> Self {
		Self {
			types: types.to_vec(),
		}
	}

	pub fn attribute(mut self, ty: AttributeType) -> Self {
		self.types.push(ty);
		self
	}

	pub fn build(&self, arena: &ForeignArena) -> *mut TupleDescData {
		let desc = arena.alloc_as::<TestTupleDesc>(size_of::<TestAttribute>() * self.types.len()).as_ptr();
		unsafe {
			(*desc).natts = self.types.len() as i32;
			(*desc).tdtypeid = 2249;
			(*desc).tdtypmod = -1;
			(*desc).tdrefcount = -1;
			let attrs = (*desc).attrs.as_mut_ptr();
			for (i, ty) in self.types.iter().enumerate() {
				attrs.add(i).write(TestAttribute {
					atttypid: ty.typid,
					attlen: ty.len,
					attbyval: ty.byval,
					attalign: ty.align,
					attisdropped: false,
				});
			}
		}
		desc.cast()
	}
}

/// One attribute value of a [`HeapTupleBuilder`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	Int2(i16),
	Int4(i32),
	Int8(i64),
	Oid(Oid),
	Float8(f64),
	Text(Vec<u8>),
	CString(String),
}

impl Value {
	pub fn text(text: impl AsRef<[u8]>) -> Self {
		Value::Text(text.as_ref().to_vec())
	}

	fn fixed_bytes(&self) -> Option<Vec<u8>> {
		Some(match self {
			Value::Bool(v) => vec![*v as u8],
			Value::Int2(v) => v.to_ne_bytes().to_vec(),
			Value::Int4(v) => v.to_ne_bytes().to_vec(),
			Value::Int8(v) => v.to_ne_bytes().to_vec(),
			Value::Oid(v) => v.to_ne_bytes().to_vec(),
			Value::Float8(v) => v.to_ne_bytes().to_vec(),
			_ => return None,
		})
	}
}

/// Lays out a heap tuple in the engine's on-disk format
///
/// Text values short enough for a 1-byte header get one, unaligned, as the engine
/// does when it forms a tuple.
#[derive(Debug, Clone)]
pub struct HeapTupleBuilder {
	types: Vec<AttributeType>,
	values: Vec<Value>,
	natts: Option<u16>,
	xmin: TransactionId,
	xmax: TransactionId,
	cid: CommandId,
	frozen: bool,
	legacy_oid: Option<Oid>,
	table_oid: Oid,
}

impl HeapTupleBuilder {
	pub fn new(types: &[AttributeType]) -> Self {
		Self {
			types: types.to_vec(),
			values: Vec::new(),
			natts: None,
			xmin: 0,
			xmax: 0,
			cid: 0,
			frozen: false,
			legacy_oid: None,
			table_oid: 0,
		}
	}

	pub fn value(mut self, value: Value) -> Self {
		self.values.push(value);
		self
	}

	pub fn null(self) -> Self {
		self.value(Value::Null)
	}

	/// Attribute count stored in the header; defaults to the number of values
	///
	/// A smaller count models a tuple written before columns were added.
	pub fn natts(mut self, natts: u16) -> Self {
		self.natts = Some(natts);
		self
	}

	pub fn xmin(mut self, xmin: TransactionId) -> Self {
		self.xmin = xmin;
		self
	}

	pub fn xmax(mut self, xmax: TransactionId) -> Self {
		self.xmax = xmax;
		self
	}

	pub fn cid(mut self, cid: CommandId) -> Self {
		self.cid = cid;
		self
	}

	pub fn frozen(mut self) -> Self {
		self.frozen = true;
		self
	}

	/// Store an oid in the header, as tables created `WITH OIDS` did
	pub fn legacy_oid(mut self, oid: Oid) -> Self {
		self.legacy_oid = Some(oid);
		self
	}

	pub fn table_oid(mut self, oid: Oid) -> Self {
		self.table_oid = oid;
		self
	}

	fn data(&self) -> (Vec<u8>, bool) {
		let mut data = Vec::new();
		let mut has_varwidth = false;

		for (ty, value) in self.types.iter().zip(&self.values) {
			match value {
				Value::Null => {}
				Value::Text(text) => {
					has_varwidth = true;
					if text.len() + VARHDRSZ_SHORT <= VARATT_SHORT_MAX {
						let start = data.len();
						data.resize(start + VARHDRSZ_SHORT + text.len(), 0);
						let ptr = data[start..].as_mut_ptr() as *mut Varlena;
						unsafe { (engine().varlena.set_size_short)(ptr, (VARHDRSZ_SHORT + text.len()) as i32) };
						data[start + VARHDRSZ_SHORT..].copy_from_slice(text);
					} else {
						let start = align_to(data.len(), ty.alignment());
						data.resize(start + VARHDRSZ + text.len(), 0);
						let ptr = data[start..].as_mut_ptr() as *mut Varlena;
						unsafe { (engine().varlena.set_size)(ptr, (VARHDRSZ + text.len()) as i32) };
						data[start + VARHDRSZ..].copy_from_slice(text);
					}
				}
				Value::CString(text) => {
					has_varwidth = true;
					data.extend_from_slice(text.as_bytes());
					data.push(0);
				}
				fixed => {
					let bytes = fixed.fixed_bytes().unwrap_or_default();
					assert_eq!(bytes.len() as i16, ty.len, "value does not match its attribute type");
					data.resize(align_to(data.len(), ty.alignment()), 0);
					data.extend_from_slice(&bytes);
				}
			}
		}
		(data, has_varwidth)
	}

	pub fn build(&self, arena: &ForeignArena) -> *mut HeapTupleData {
		assert!(self.values.len() <= self.types.len(), "more values than attributes");
		let natts = self.natts.unwrap_or(self.values.len() as u16);
		let has_nulls = self.values.iter().any(|v| matches!(v, Value::Null));

		let bitmap_len = if has_nulls {
			(natts as usize).div_ceil(8)
		} else {
			0
		};
		let oid_len = if self.legacy_oid.is_some() {
			size_of::<Oid>()
		} else {
			0
		};
		let hoff = max_align(SIZEOF_HEAP_TUPLE_HEADER + bitmap_len + oid_len);
		let (data, has_varwidth) = self.data();
		let len = hoff + data.len();

		let mut infomask = 0;
		if has_nulls {
			infomask |= HEAP_HASNULL;
		}
		if has_varwidth {
			infomask |= HEAP_HASVARWIDTH;
		}
		if self.legacy_oid.is_some() {
			infomask |= HEAP_HASOID_OLD;
		}
		if self.frozen {
			infomask |= HEAP_XMIN_FROZEN;
		}

		let base = arena.alloc(len).as_ptr();
		let header = base as *mut HeapTupleHeaderData;
		unsafe {
			header.write(HeapTupleHeaderData {
				t_choice: HeapTupleChoice {
					t_heap: HeapTupleFields {
						t_xmin: self.xmin,
						t_xmax: self.xmax,
						t_field3: HeapTupleFields3 {
							t_cid: self.cid,
						},
					},
				},
				t_ctid: ItemPointerData::default(),
				t_infomask2: natts & HEAP_NATTS_MASK,
				t_infomask: infomask,
				t_hoff: hoff as u8,
				t_bits: [],
			});

			base.add(SIZEOF_HEAP_TUPLE_HEADER).write_bytes(0, hoff - SIZEOF_HEAP_TUPLE_HEADER);
			if has_nulls {
				let bits = base.add(SIZEOF_HEAP_TUPLE_HEADER);
				for (i, value) in self.values.iter().enumerate().take(natts as usize) {
					if !matches!(value, Value::Null) {
						*bits.add(i / 8) |= 1 << (i % 8);
					}
				}
			}
			if let Some(oid) = self.legacy_oid {
				(base.add(hoff - size_of::<Oid>()) as *mut Oid).write_unaligned(oid);
			}
			base.add(hoff).copy_from_nonoverlapping(data.as_ptr(), data.len());

			let tuple = arena.alloc_as::<HeapTupleData>(0).as_ptr();
			tuple.write(HeapTupleData {
				t_len: len as u32,
				t_self: ItemPointerData::default(),
				t_table_oid: self.table_oid,
				t_data: header,
			});
			tuple
		}
	}
}

#[cfg(test)]
pub mod tests {
	use ogview_abi::{constants::FROZEN_TRANSACTION_ID, types::Datum};

	use super::{AttributeType, HeapTupleBuilder, TupleDescBuilder, Value};
	use crate::{ForeignArena, engine};

	const ROW: [AttributeType; 4] = [AttributeType::INT2, AttributeType::TEXT, AttributeType::INT8, AttributeType::TEXT];

	#[test]
	fn test_values_read_back_through_heap_getattr() {
		let arena = ForeignArena::new("test");
		let desc = TupleDescBuilder::from_types(&ROW).build(&arena);
		let tuple = HeapTupleBuilder::new(&ROW)
			.value(Value::Int2(-3))
			.value(Value::text("abc"))
			.value(Value::Int8(1 << 40))
			.value(Value::text("x".repeat(200)))
			.build(&arena);

		let callbacks = engine();
		let mut isnull = true;
		unsafe {
			let v = (callbacks.tuple.getattr)(tuple, 1, desc, &mut isnull);
			assert!(!isnull);
			assert_eq!(v.as_i16(), -3);

			let v = (callbacks.tuple.getattr)(tuple, 3, desc, &mut isnull);
			assert_eq!(v.as_i64(), 1 << 40);

			let v = (callbacks.tuple.getattr)(tuple, 4, desc, &mut isnull);
			assert_eq!((callbacks.varlena.size_any_exhdr)(v.as_ptr()), 200);
		}
	}

	#[test]
	fn test_null_attribute() {
		let arena = ForeignArena::new("test");
		let types = [AttributeType::INT4, AttributeType::INT4];
		let desc = TupleDescBuilder::from_types(&types).build(&arena);
		let tuple = HeapTupleBuilder::new(&types).value(Value::Int4(1)).null().build(&arena);

		let mut isnull = false;
		let value = unsafe { (engine().tuple.getattr)(tuple, 2, desc, &mut isnull) };
		assert!(isnull);
		assert_eq!(value, Datum::NULL);
	}

	#[test]
	fn test_missing_trailing_attribute_is_null() {
		let arena = ForeignArena::new("test");
		let types = [AttributeType::INT4, AttributeType::INT4];
		let desc = TupleDescBuilder::from_types(&types).build(&arena);
		let tuple = HeapTupleBuilder::new(&types).value(Value::Int4(1)).natts(1).build(&arena);

		let mut isnull = false;
		unsafe { (engine().tuple.getattr)(tuple, 2, desc, &mut isnull) };
		assert!(isnull);
	}

	#[test]
	fn test_header_fields() {
		let arena = ForeignArena::new("test");
		let tuple = HeapTupleBuilder::new(&[AttributeType::BOOL])
			.value(Value::Bool(true))
			.xmin(700)
			.cid(4)
			.legacy_oid(16384)
			.build(&arena);
		let callbacks = engine();
		unsafe {
			let header = (*tuple).t_data;
			assert_eq!((callbacks.tuple.header_get_xmin)(header), 700);
			assert_eq!((callbacks.tuple.header_get_raw_command_id)(header), 4);
			assert_eq!((callbacks.tuple.header_get_oid)(header), 16384);
			assert_eq!(*((callbacks.tuple.get_struct)(tuple) as *const u8), 1);
		}

		let frozen = HeapTupleBuilder::new(&[]).xmin(700).frozen().build(&arena);
		assert_eq!(unsafe { (callbacks.tuple.header_get_xmin)((*frozen).t_data) }, FROZEN_TRANSACTION_ID);
	}
}
