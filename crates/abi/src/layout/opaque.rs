// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Engine structures that are only ever handled by pointer

use core::marker::{PhantomData, PhantomPinned};

macro_rules! opaque {
	($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
		$(
			$(#[$meta])*
			#[repr(C)]
			pub struct $name {
				_data: [u8; 0],
				_marker: PhantomData<(*mut u8, PhantomPinned)>,
			}
		)+
	};
}

opaque! {
	/// Row type descriptor
	TupleDescData,
	/// Engine list of pointers, integers or oids
	List,
	/// One cell of a [`List`]
	ListCell,
	/// Memory context header
	MemoryContextData,
	/// Planner state for one query level
	PlannerInfo,
	/// One entry of a query's range table
	RangeTblEntry,
}
