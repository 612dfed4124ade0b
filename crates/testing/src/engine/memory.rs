// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;

use ogview_abi::types::MemoryContext;

/// The owning context sits in the pointer-sized slot right before every chunk
pub(super) unsafe extern "C-unwind" fn chunk_context(ptr: *mut c_void) -> MemoryContext {
	unsafe { *(ptr as *const MemoryContext).sub(1) }
}

#[cfg(test)]
pub mod tests {
	use super::chunk_context;
	use crate::ForeignArena;

	#[test]
	fn test_chunks_report_their_arena() {
		let first = ForeignArena::new("first");
		let second = ForeignArena::new("second");
		let a = first.alloc(8);
		let b = second.alloc(8);
		unsafe {
			assert_eq!(chunk_context(a.as_ptr().cast()), first.context());
			assert_eq!(chunk_context(b.as_ptr().cast()), second.context());
		}
	}
}
