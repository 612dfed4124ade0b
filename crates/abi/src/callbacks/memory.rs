// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;

use crate::types::MemoryContext;

/// Memory context introspection (`utils/memutils.h`)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct MemoryCallbacks {
	/// Context owning the chunk `ptr` points at (`GetMemoryChunkContext`)
	///
	/// `ptr` must be the start of a chunk handed out by the engine allocator.
	pub chunk_context: unsafe extern "C-unwind" fn(ptr: *mut c_void) -> MemoryContext,
}
