// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use ogview_abi::{
	constants::{VARATT_SHORT_MAX, VARHDRSZ, VARHDRSZ_EXTERNAL, VARHDRSZ_SHORT, VARTAG_ONDISK},
	layout::{VarattExternal, Varlena},
};

use crate::{ForeignArena, engine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Header {
	Standard,
	Short,
	External,
}

/// Lays out a variable-length value
///
/// ```ignore
/// let text = VarlenaBuilder::new(b"hello").short().build(&arena);
/// ```
#[derive(Debug, Clone)]
pub struct VarlenaBuilder {
	payload: Vec<u8>,
	header: Header,
}

impl VarlenaBuilder {
	/// A value with a 4-byte header
	pub fn new(payload: impl AsRef<[u8]>) -> Self {
		Self {
			payload: payload.as_ref().to_vec(),
			header: Header::Standard,
		}
	}

	/// An on-disk toast pointer to a value of `raw_size` bytes
	pub fn external(raw_size: i32) -> Self {
		let pointer = VarattExternal {
			va_rawsize: raw_size,
			va_extsize: raw_size,
			va_valueid: 1,
			va_toastrelid: 1,
		};
		let mut payload = Vec::with_capacity(size_of::<VarattExternal>());
		payload.extend_from_slice(&pointer.va_rawsize.to_ne_bytes());
		payload.extend_from_slice(&pointer.va_extsize.to_ne_bytes());
		payload.extend_from_slice(&pointer.va_valueid.to_ne_bytes());
		payload.extend_from_slice(&pointer.va_toastrelid.to_ne_bytes());
		Self {
			payload,
			header: Header::External,
		}
	}

	/// Use a 1-byte header; panics at build time if the value does not fit
	pub fn short(mut self) -> Self {
		self.header = Header::Short;
		self
	}

	/// Total size including the header
	pub fn total_size(&self) -> usize {
		self.payload.len()
			+ match self.header {
				Header::Standard => VARHDRSZ,
				Header::Short => VARHDRSZ_SHORT,
				Header::External => VARHDRSZ_EXTERNAL,
			}
	}

	pub fn build(&self, arena: &ForeignArena) -> *mut Varlena {
		let total = self.total_size();
		let ptr = arena.alloc(total).as_ptr();
		let varlena = ptr as *mut Varlena;
		let callbacks = engine();

		let offset = match self.header {
			Header::Standard => {
				unsafe { (callbacks.varlena.set_size)(varlena, total as i32) };
				VARHDRSZ
			}
			Header::Short => {
				assert!(total <= VARATT_SHORT_MAX, "{total} bytes do not fit a 1-byte header");
				unsafe { (callbacks.varlena.set_size_short)(varlena, total as i32) };
				VARHDRSZ_SHORT
			}
			Header::External => {
				unsafe {
					*ptr = if cfg!(target_endian = "little") {
						0x01
					} else {
						0x80
					};
					*ptr.add(1) = VARTAG_ONDISK;
				}
				VARHDRSZ_EXTERNAL
			}
		};

		unsafe { ptr.add(offset).copy_from_nonoverlapping(self.payload.as_ptr(), self.payload.len()) };
		varlena
	}
}

#[cfg(test)]
pub mod tests {
	use ogview_abi::layout::VarattExternal;

	use super::VarlenaBuilder;
	use crate::{ForeignArena, engine};

	#[test]
	fn test_standard_value() {
		let arena = ForeignArena::new("test");
		let ptr = VarlenaBuilder::new(b"hello").build(&arena);
		let callbacks = engine();
		unsafe {
			assert_eq!((callbacks.varlena.size_any)(ptr), 9);
			assert_eq!((callbacks.varlena.size_any_exhdr)(ptr), 5);
			let data = (callbacks.varlena.data_any)(ptr) as *const u8;
			assert_eq!(std::slice::from_raw_parts(data, 5), b"hello");
		}
	}

	#[test]
	fn test_short_value() {
		let arena = ForeignArena::new("test");
		let ptr = VarlenaBuilder::new(b"abc").short().build(&arena);
		let callbacks = engine();
		unsafe {
			assert!((callbacks.varlena.is_short)(ptr));
			assert_eq!((callbacks.varlena.size_any)(ptr), 4);
		}
	}

	#[test]
	fn test_external_value() {
		let arena = ForeignArena::new("test");
		let ptr = VarlenaBuilder::external(10_000).build(&arena);
		let callbacks = engine();
		unsafe {
			assert!((callbacks.varlena.is_external)(ptr));
			assert_eq!((callbacks.varlena.size_any)(ptr), 18);

			let pointer = ((ptr as *const u8).add(2) as *const VarattExternal).read_unaligned();
			assert_eq!(pointer.va_rawsize, 10_000);
			assert_eq!(pointer.va_extsize, 10_000);
		}
	}
}
