// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Variable-length values
//!
//! The header encoding depends on the engine build and on how the value is stored, so
//! every header read and write goes through the engine.

use std::ptr::NonNull;

use libc::c_int;
use ogview_abi::{
	constants::{VARATT_SHORT_MAX, VARSIZE_4B_MAX},
	layout,
};
use tracing::trace;

use crate::{
	Result, Runtime, ViewError,
	check::{check, checked},
};

/// View over a variable-length value in engine memory
pub struct Varlena<'a> {
	rt: &'a Runtime,
	ptr: NonNull<layout::Varlena>,
}

impl<'a> Varlena<'a> {
	/// # Safety
	/// `ptr` must point at a varlena value, or at a buffer about to receive one, that
	/// stays valid for `'a`.
	pub unsafe fn from_ptr(rt: &'a Runtime, ptr: *mut layout::Varlena) -> Self {
		checked!(unsafe { Self::try_from_ptr(rt, ptr) })
	}

	/// # Safety
	/// See [`Varlena::from_ptr`]; a null pointer is rejected.
	pub unsafe fn try_from_ptr(rt: &'a Runtime, ptr: *mut layout::Varlena) -> Result<Self> {
		let ptr = NonNull::new(ptr).ok_or(ViewError::NullPointer {
			what: "varlena",
		})?;
		trace!(?ptr, "varlena view");
		Ok(Self {
			rt,
			ptr,
		})
	}

	pub fn as_ptr(&self) -> *mut layout::Varlena {
		self.ptr.as_ptr()
	}

	/// Write a 4-byte header for a value of `size` bytes, header included
	///
	/// `size` must not exceed `VARSIZE_4B_MAX`. With checks enabled a larger size
	/// panics; otherwise the engine masks it.
	pub fn set_size(&self, size: usize) {
		check!(
			self.rt,
			size <= VARSIZE_4B_MAX,
			ViewError::SizeOutOfRange {
				size,
				max: VARSIZE_4B_MAX,
			}
		);
		unsafe { (self.rt.callbacks().varlena.set_size)(self.as_ptr(), c_size(size)) }
	}

	/// [`set_size`](Self::set_size) that always checks `size`
	pub fn try_set_size(&self, size: usize) -> Result<()> {
		if size > VARSIZE_4B_MAX {
			return Err(ViewError::SizeOutOfRange {
				size,
				max: VARSIZE_4B_MAX,
			});
		}
		unsafe { (self.rt.callbacks().varlena.set_size)(self.as_ptr(), c_size(size)) };
		Ok(())
	}

	/// Write a 1-byte header for a value of `size` bytes, header included
	///
	/// `size` must not exceed `VARATT_SHORT_MAX`. With checks enabled a larger size
	/// panics; otherwise the engine truncates it.
	pub fn set_size_compact(&self, size: usize) {
		check!(
			self.rt,
			size <= VARATT_SHORT_MAX,
			ViewError::CompactSizeOutOfRange {
				size,
				max: VARATT_SHORT_MAX,
			}
		);
		unsafe { (self.rt.callbacks().varlena.set_size_short)(self.as_ptr(), c_size(size)) }
	}

	/// [`set_size_compact`](Self::set_size_compact) that always checks `size`
	pub fn try_set_size_compact(&self, size: usize) -> Result<()> {
		if size > VARATT_SHORT_MAX {
			return Err(ViewError::CompactSizeOutOfRange {
				size,
				max: VARATT_SHORT_MAX,
			});
		}
		unsafe { (self.rt.callbacks().varlena.set_size_short)(self.as_ptr(), c_size(size)) };
		Ok(())
	}

	/// Start of the payload, past whichever header the value has
	pub fn payload_ptr(&self) -> NonNull<u8> {
		let data = unsafe { (self.rt.callbacks().varlena.data_any)(self.as_ptr()) };
		NonNull::new(data as *mut u8).unwrap_or(self.ptr.cast())
	}

	/// Total size, header included
	pub fn size_any(&self) -> usize {
		unsafe { (self.rt.callbacks().varlena.size_any)(self.as_ptr()) }
	}

	/// Payload size, header excluded
	pub fn payload_len(&self) -> usize {
		unsafe { (self.rt.callbacks().varlena.size_any_exhdr)(self.as_ptr()) }
	}

	pub fn is_short(&self) -> bool {
		unsafe { (self.rt.callbacks().varlena.is_short)(self.as_ptr()) }
	}

	/// Whether the value is a pointer to data stored elsewhere
	pub fn is_external(&self) -> bool {
		unsafe { (self.rt.callbacks().varlena.is_external)(self.as_ptr()) }
	}

	pub fn is_compressed(&self) -> bool {
		unsafe { (self.rt.callbacks().varlena.is_compressed)(self.as_ptr()) }
	}

	/// The payload bytes, for values stored in-line and uncompressed
	pub fn payload(&self) -> Option<&'a [u8]> {
		if self.is_external() || self.is_compressed() {
			return None;
		}
		let len = self.payload_len();
		Some(unsafe { std::slice::from_raw_parts(self.payload_ptr().as_ptr(), len) })
	}
}

/// Sizes past `c_int::MAX` saturate instead of wrapping to a small size
fn c_size(size: usize) -> c_int {
	c_int::try_from(size).unwrap_or(c_int::MAX)
}
