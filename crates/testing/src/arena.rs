// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{alloc::Layout, mem::size_of, ptr::NonNull};

use bumpalo::Bump;
use ogview_abi::{layout::MemoryContextData, types::MemoryContext};

/// Alignment of every chunk handed out by the arena
pub const CHUNK_ALIGN: usize = 16;

/// Bytes reserved in front of every chunk; the owning context pointer sits in the last
/// pointer-sized slot, right before the chunk
const CHUNK_HEADER: usize = CHUNK_ALIGN;

struct ArenaInner {
	name: String,
	bump: Bump,
}

/// Bump-allocated memory that plays the part of an engine memory context
///
/// Chunks live until the arena is dropped and are zeroed on allocation. The context
/// pointer stored in front of each chunk is stable for the lifetime of the arena.
pub struct ForeignArena {
	inner: Box<ArenaInner>,
}

impl ForeignArena {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			inner: Box::new(ArenaInner {
				name: name.into(),
				bump: Bump::new(),
			}),
		}
	}

	pub fn name(&self) -> &str {
		&self.inner.name
	}

	/// The pointer the engine would use to identify this context
	pub fn context(&self) -> MemoryContext {
		&*self.inner as *const ArenaInner as *mut MemoryContextData
	}

	/// Allocate `size` zeroed bytes aligned to [`CHUNK_ALIGN`]
	pub fn alloc(&self, size: usize) -> NonNull<u8> {
		let layout = match Layout::from_size_align(CHUNK_HEADER + size.max(1), CHUNK_ALIGN) {
			Ok(layout) => layout,
			Err(_) => panic!("allocation of {size} bytes exceeds the arena limit"),
		};

		let base = self.inner.bump.alloc_layout(layout);
		unsafe {
			base.as_ptr().write_bytes(0, layout.size());
			let chunk = base.as_ptr().add(CHUNK_HEADER);
			(chunk as *mut MemoryContext).sub(1).write(self.context());
			NonNull::new_unchecked(chunk)
		}
	}

	/// Allocate room for a `T` followed by `trailing` bytes
	pub fn alloc_as<T>(&self, trailing: usize) -> NonNull<T> {
		debug_assert!(std::mem::align_of::<T>() <= CHUNK_ALIGN);
		self.alloc(size_of::<T>() + trailing).cast()
	}

	/// Copy `bytes` into a fresh chunk
	pub fn copy_bytes(&self, bytes: &[u8]) -> NonNull<u8> {
		let chunk = self.alloc(bytes.len());
		unsafe { chunk.as_ptr().copy_from_nonoverlapping(bytes.as_ptr(), bytes.len()) };
		chunk
	}

	/// Name of the arena behind `context`
	///
	/// # Safety
	/// `context` must have been returned by [`ForeignArena::context`] of a live arena.
	pub unsafe fn name_of<'a>(context: MemoryContext) -> &'a str {
		unsafe { &(*(context as *const ArenaInner)).name }
	}
}

#[cfg(test)]
pub mod tests {
	use ogview_abi::types::MemoryContext;

	use super::{CHUNK_ALIGN, ForeignArena};

	#[test]
	fn test_chunks_are_aligned_and_zeroed() {
		let arena = ForeignArena::new("test");
		for size in [1, 7, 64, 1000] {
			let chunk = arena.alloc(size);
			assert_eq!(chunk.as_ptr() as usize % CHUNK_ALIGN, 0);
			let bytes = unsafe { std::slice::from_raw_parts(chunk.as_ptr(), size) };
			assert!(bytes.iter().all(|&b| b == 0));
		}
	}

	#[test]
	fn test_chunk_header_names_context() {
		let arena = ForeignArena::new("tuples");
		let chunk = arena.alloc(32);
		let context = unsafe { *(chunk.as_ptr() as *const MemoryContext).sub(1) };
		assert_eq!(context, arena.context());
		assert_eq!(unsafe { ForeignArena::name_of(context) }, "tuples");
	}
}
