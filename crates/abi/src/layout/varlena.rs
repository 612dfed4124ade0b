// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// A variable-length value as the engine hands it out
///
/// The first byte (or four bytes) carry a tagged header whose encoding depends on the
/// platform's byte order and on whether the value is short, compressed or stored
/// externally. Only the engine decodes it.
#[repr(C)]
#[derive(Debug)]
pub struct Varlena {
	pub vl_len_: [u8; 4],
	pub vl_dat: [u8; 0],
}

/// Payload of an on-disk toast pointer
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VarattExternal {
	pub va_rawsize: i32,
	/// size as stored, compressed or not
	pub va_extsize: i32,
	pub va_valueid: u32,
	pub va_toastrelid: u32,
}

#[cfg(test)]
pub mod tests {
	use core::mem::{offset_of, size_of};

	use super::VarattExternal;

	#[test]
	fn test_toast_pointer_layout() {
		assert_eq!(size_of::<VarattExternal>(), 16);
		assert_eq!(offset_of!(VarattExternal, va_extsize), 4);
		assert_eq!(offset_of!(VarattExternal, va_valueid), 8);
		assert_eq!(offset_of!(VarattExternal, va_toastrelid), 12);
	}
}
