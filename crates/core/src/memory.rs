// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;

use ogview_abi::types::MemoryContext;

use crate::{Result, Runtime, ViewError, check::checked};

impl Runtime {
	/// Memory context that owns the chunk at `ptr`
	///
	/// # Safety
	/// `ptr` must be the start of a chunk allocated by the engine and not yet freed.
	pub unsafe fn memory_context_of(&self, ptr: *const c_void) -> MemoryContext {
		checked!(unsafe { self.try_memory_context_of(ptr) })
	}

	/// # Safety
	/// See [`Runtime::memory_context_of`]; a null pointer is rejected.
	pub unsafe fn try_memory_context_of(&self, ptr: *const c_void) -> Result<MemoryContext> {
		if ptr.is_null() {
			return Err(ViewError::NullPointer {
				what: "memory chunk",
			});
		}
		Ok(unsafe { (self.callbacks().memory.chunk_context)(ptr as *mut c_void) })
	}
}

#[cfg(test)]
pub mod tests {
	use core::ffi::c_void;

	use ogview_testing::{ForeignArena, VarlenaBuilder, engine};

	use crate::{Runtime, ViewError};

	#[test]
	fn test_owner_of_chunk() {
		let rt = Runtime::new(engine());
		let tuples = ForeignArena::new("tuples");
		let scratch = ForeignArena::new("scratch");
		let value = VarlenaBuilder::new(b"x").build(&tuples);
		let buffer = scratch.alloc(128);

		let owner = unsafe { rt.memory_context_of(value as *const c_void) };
		assert_eq!(owner, tuples.context());
		assert_eq!(unsafe { ForeignArena::name_of(owner) }, "tuples");
		assert_eq!(unsafe { rt.memory_context_of(buffer.as_ptr() as *const c_void) }, scratch.context());
	}

	#[test]
	fn test_null_chunk() {
		let rt = Runtime::new(engine());
		assert_eq!(unsafe { rt.try_memory_context_of(std::ptr::null()) }, Err(ViewError::NullPointer {
			what: "memory chunk"
		}));
	}
}
