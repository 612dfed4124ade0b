// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Engine entry points, grouped by concern
//!
//! Every entry corresponds to one macro or inline function of the engine, exported by
//! the C shim as an ordinary symbol. All entries use the `"C-unwind"` ABI because the
//! engine may leave any of them abruptly when it reports an error.

mod array;
mod boundary;
mod list;
mod memory;
mod report;
mod spin;
mod tuple;
mod varlena;

pub use array::*;
pub use boundary::*;
pub use list::*;
pub use memory::*;
pub use report::*;
pub use spin::*;
pub use tuple::*;
pub use varlena::*;

/// The full set of engine entry points ogview calls through
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RuntimeCallbacks {
	pub spin: SpinCallbacks,
	pub varlena: VarlenaCallbacks,
	pub array: ArrayCallbacks,
	pub tuple: TupleCallbacks,
	pub list: ListCallbacks,
	pub memory: MemoryCallbacks,
	pub report: ReportCallbacks,
	pub boundary: BoundaryCallbacks,
}
