// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::types::Oid;

/// Header of a multi-dimensional array
///
/// The header is followed by `ndim` dimension lengths, `ndim` lower bounds, the
/// optional null bitmap and finally the element data, starting at `dataoffset` when
/// the array has nulls and at the aligned end of the bounds otherwise.
#[repr(C)]
#[derive(Debug)]
pub struct ArrayType {
	/// varlena header
	pub vl_len_: i32,
	/// number of dimensions
	pub ndim: i32,
	/// offset to data, or 0 if there is no null bitmap
	pub dataoffset: i32,
	/// element type
	pub elemtype: Oid,
}
