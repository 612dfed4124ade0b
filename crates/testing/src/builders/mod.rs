// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Builders that lay out engine structures in a [`ForeignArena`](crate::ForeignArena)
//!
//! Everything a builder returns points into the arena and lives as long as it does.

mod array;
mod list;
mod spin;
mod tuple;
mod varlena;

pub use array::ArrayBuilder;
pub use list::{ListBuilder, PlannerInfoBuilder, TestRangeTblEntry};
pub use spin::SpinLockCell;
pub use tuple::{AttributeType, HeapTupleBuilder, TupleDescBuilder, Value};
pub use varlena::VarlenaBuilder;

pub(crate) const fn max_align(len: usize) -> usize {
	(len + 7) & !7
}

pub(crate) const fn align_to(len: usize, align: usize) -> usize {
	(len + align - 1) & !(align - 1)
}
