// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::mem::size_of;

use libc::{c_char, c_int};
use ogview_abi::{
	constants::{
		VARHDRSZ, VARHDRSZ_EXTERNAL, VARHDRSZ_SHORT, VARTAG_EXPANDED_RO, VARTAG_EXPANDED_RW, VARTAG_INDIRECT,
		VARTAG_ONDISK,
	},
	layout::{VarattExternal, Varlena},
};

// Header bit layouts differ with byte order. On little-endian machines the low bits of
// the first byte carry the flags; on big-endian machines the high bits do.

#[cfg(target_endian = "little")]
mod header {
	pub fn is_1b(first: u8) -> bool {
		first & 0x01 == 0x01
	}

	pub fn is_1b_e(first: u8) -> bool {
		first == 0x01
	}

	pub fn is_4b_c(first: u8) -> bool {
		first & 0x03 == 0x02
	}

	pub fn size_4b(header: u32) -> usize {
		((header >> 2) & 0x3FFF_FFFF) as usize
	}

	pub fn size_1b(first: u8) -> usize {
		((first >> 1) & 0x7F) as usize
	}

	pub fn make_4b(size: u32) -> u32 {
		size << 2
	}

	pub fn make_1b(size: u8) -> u8 {
		size.wrapping_shl(1) | 0x01
	}
}

#[cfg(target_endian = "big")]
mod header {
	pub fn is_1b(first: u8) -> bool {
		first & 0x80 == 0x80
	}

	pub fn is_1b_e(first: u8) -> bool {
		first == 0x80
	}

	pub fn is_4b_c(first: u8) -> bool {
		first & 0xC0 == 0x40
	}

	pub fn size_4b(header: u32) -> usize {
		(header & 0x3FFF_FFFF) as usize
	}

	pub fn size_1b(first: u8) -> usize {
		(first & 0x7F) as usize
	}

	pub fn make_4b(size: u32) -> u32 {
		size & 0x3FFF_FFFF
	}

	pub fn make_1b(size: u8) -> u8 {
		size | 0x80
	}
}

unsafe fn first_byte(ptr: *const Varlena) -> u8 {
	unsafe { *(ptr as *const u8) }
}

unsafe fn header_4b(ptr: *const Varlena) -> u32 {
	unsafe { (ptr as *const u32).read_unaligned() }
}

unsafe fn tag(ptr: *const Varlena) -> u8 {
	unsafe { *(ptr as *const u8).add(1) }
}

fn tag_size(tag: u8) -> usize {
	match tag {
		VARTAG_INDIRECT | VARTAG_EXPANDED_RO | VARTAG_EXPANDED_RW => size_of::<*mut u8>(),
		VARTAG_ONDISK => size_of::<VarattExternal>(),
		_ => 0,
	}
}

pub(super) unsafe extern "C-unwind" fn set_size(ptr: *mut Varlena, size: c_int) {
	unsafe { (ptr as *mut u32).write_unaligned(header::make_4b(size as u32)) }
}

pub(super) unsafe extern "C-unwind" fn set_size_short(ptr: *mut Varlena, size: c_int) {
	unsafe { *(ptr as *mut u8) = header::make_1b(size as u8) }
}

pub(super) unsafe extern "C-unwind" fn size_any(ptr: *const Varlena) -> usize {
	unsafe {
		let first = first_byte(ptr);
		if header::is_1b_e(first) {
			VARHDRSZ_EXTERNAL + tag_size(tag(ptr))
		} else if header::is_1b(first) {
			header::size_1b(first)
		} else {
			header::size_4b(header_4b(ptr))
		}
	}
}

pub(super) unsafe extern "C-unwind" fn size_any_exhdr(ptr: *const Varlena) -> usize {
	unsafe {
		let first = first_byte(ptr);
		if header::is_1b_e(first) {
			tag_size(tag(ptr))
		} else if header::is_1b(first) {
			header::size_1b(first).saturating_sub(VARHDRSZ_SHORT)
		} else {
			header::size_4b(header_4b(ptr)).saturating_sub(VARHDRSZ)
		}
	}
}

pub(super) unsafe extern "C-unwind" fn data_any(ptr: *const Varlena) -> *mut c_char {
	unsafe {
		let offset = if header::is_1b(first_byte(ptr)) {
			VARHDRSZ_SHORT
		} else {
			VARHDRSZ
		};
		(ptr as *mut c_char).add(offset)
	}
}

pub(super) unsafe extern "C-unwind" fn is_short(ptr: *const Varlena) -> bool {
	header::is_1b(unsafe { first_byte(ptr) })
}

pub(super) unsafe extern "C-unwind" fn is_external(ptr: *const Varlena) -> bool {
	header::is_1b_e(unsafe { first_byte(ptr) })
}

pub(super) unsafe extern "C-unwind" fn is_compressed(ptr: *const Varlena) -> bool {
	header::is_4b_c(unsafe { first_byte(ptr) })
}
