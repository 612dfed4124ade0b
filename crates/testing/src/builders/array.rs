// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use ogview_abi::{layout::ArrayType, types::Oid};

use super::{align_to, max_align};
use crate::{ForeignArena, engine};

const INT4OID: Oid = 23;
const INT8OID: Oid = 20;

/// Lays out a multi-dimensional array of fixed-length elements
///
/// Without explicit dimensions the array is one-dimensional with one slot per element.
/// Null elements occupy a slot but no data, as in the engine.
#[derive(Debug, Clone)]
pub struct ArrayBuilder {
	elemtype: Oid,
	elem_len: usize,
	elements: Vec<Option<Vec<u8>>>,
	dims: Option<Vec<i32>>,
	lower_bounds: Option<Vec<i32>>,
	with_bitmap: bool,
}

impl ArrayBuilder {
	pub fn new(elemtype: Oid, elem_len: usize) -> Self {
		Self {
			elemtype,
			elem_len,
			elements: Vec::new(),
			dims: None,
			lower_bounds: None,
			with_bitmap: false,
		}
	}

	pub fn int4() -> Self {
		Self::new(INT4OID, 4)
	}

	pub fn int8() -> Self {
		Self::new(INT8OID, 8)
	}

	/// Dimension lengths, written as given even when they disagree with the elements
	pub fn dims(mut self, dims: &[i32]) -> Self {
		self.dims = Some(dims.to_vec());
		self
	}

	pub fn lower_bounds(mut self, lower_bounds: &[i32]) -> Self {
		self.lower_bounds = Some(lower_bounds.to_vec());
		self
	}

	pub fn int4_elements(mut self, values: &[Option<i32>]) -> Self {
		for value in values {
			self = self.element(value.map(|v| v.to_ne_bytes().to_vec()));
		}
		self
	}

	pub fn int8_elements(mut self, values: &[Option<i64>]) -> Self {
		for value in values {
			self = self.element(value.map(|v| v.to_ne_bytes().to_vec()));
		}
		self
	}

	pub fn element(mut self, bytes: Option<Vec<u8>>) -> Self {
		if let Some(bytes) = &bytes {
			assert_eq!(bytes.len(), self.elem_len, "element length mismatch");
		}
		self.with_bitmap |= bytes.is_none();
		self.elements.push(bytes);
		self
	}

	/// Force a null bitmap even when no element is null
	pub fn with_null_bitmap(mut self) -> Self {
		self.with_bitmap = true;
		self
	}

	pub fn build(&self, arena: &ForeignArena) -> *mut ArrayType {
		let dims = match &self.dims {
			Some(dims) => dims.clone(),
			None if self.elements.is_empty() => Vec::new(),
			None => vec![self.elements.len() as i32],
		};
		let ndim = dims.len();
		let lower_bounds = self.lower_bounds.clone().unwrap_or_else(|| vec![1; ndim]);
		assert_eq!(lower_bounds.len(), ndim, "one lower bound per dimension");

		let bounds_end = size_of::<ArrayType>() + 2 * size_of::<i32>() * ndim;
		let bitmap_len = if self.with_bitmap {
			self.elements.len().div_ceil(8).max(1)
		} else {
			0
		};
		let data_start = max_align(bounds_end + bitmap_len);

		let mut data = Vec::new();
		for bytes in self.elements.iter().flatten() {
			data.resize(align_to(data.len(), self.elem_len), 0);
			data.extend_from_slice(bytes);
		}

		let total = data_start + data.len();
		let base = arena.alloc(total).as_ptr();
		let arr = base as *mut ArrayType;

		unsafe {
			(engine().varlena.set_size)(arr.cast(), total as i32);
			(*arr).ndim = ndim as i32;
			(*arr).dataoffset = if self.with_bitmap {
				data_start as i32
			} else {
				0
			};
			(*arr).elemtype = self.elemtype;

			let bounds = base.add(size_of::<ArrayType>()) as *mut i32;
			for (i, (len, lower)) in dims.iter().zip(&lower_bounds).enumerate() {
				*bounds.add(i) = *len;
				*bounds.add(ndim + i) = *lower;
			}

			if self.with_bitmap {
				let bitmap = base.add(bounds_end);
				for (i, element) in self.elements.iter().enumerate() {
					if element.is_some() {
						*bitmap.add(i / 8) |= 1 << (i % 8);
					}
				}
			}

			base.add(data_start).copy_from_nonoverlapping(data.as_ptr(), data.len());
		}
		arr
	}
}
