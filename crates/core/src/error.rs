// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use ogview_abi::types::Index;

/// A caller contract violation detected by the check layer
///
/// Without checks the same violations are undefined behaviour, as they are for the
/// engine macros the views delegate to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
	#[error("null pointer passed as {what}")]
	NullPointer {
		what: &'static str,
	},

	#[error("size {size} does not fit a 4-byte varlena header (at most {max} bytes)")]
	SizeOutOfRange {
		size: usize,
		max: usize,
	},

	#[error("size {size} does not fit a 1-byte varlena header (at most {max} bytes)")]
	CompactSizeOutOfRange {
		size: usize,
		max: usize,
	},

	#[error("attribute number {attnum} is out of range for a row with {natts} attributes")]
	AttributeOutOfRange {
		attnum: i32,
		natts: i32,
	},

	#[error("index {index} is out of bounds for length {len}")]
	IndexOutOfBounds {
		index: usize,
		len: usize,
	},

	#[error("range table index {index} is invalid, indexes start at 1")]
	InvalidRangeTableIndex {
		index: Index,
	},
}

pub type Result<T> = std::result::Result<T, ViewError>;
