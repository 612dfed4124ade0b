// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Emulated engine
//!
//! Each submodule reproduces one group of engine macros on the engine's own memory
//! layouts. Errors raised at ERROR or above leave the callback by unwinding with an
//! [`EngineError`] payload, which is how this emulation stands in for the engine's
//! `longjmp` to its top-level handler.
//!
//! Unlike the engine:
//! - reports are captured per thread instead of going to a server log
//! - failed engine assertions are reported at PANIC instead of aborting the process
//! - the spinlock back-off doubles its delay instead of adding a random fraction

mod array;
mod boundary;
mod list;
mod memory;
mod report;
mod spin;
mod tuple;
mod varlena;

use ogview_abi::callbacks::{
	ArrayCallbacks, BoundaryCallbacks, ListCallbacks, MemoryCallbacks, ReportCallbacks, RuntimeCallbacks,
	SpinCallbacks, TupleCallbacks, VarlenaCallbacks,
};
pub use list::{T_INT_LIST, T_LIST, T_OID_LIST, TestList, TestListCell, TestPlannerInfo};
pub use ogview_abi::callbacks::EngineError;
pub use report::{CapturedReport, catch_engine_error, clear_reports, reports};
pub use spin::{SpinPolicy, set_spin_policy};
pub use tuple::{TestAttribute, TestTupleDesc};

/// Callbacks backed by the emulated engine
pub fn engine() -> RuntimeCallbacks {
	RuntimeCallbacks {
		spin: SpinCallbacks {
			init: spin::init,
			acquire: spin::acquire,
			release: spin::release,
			free: spin::free,
		},
		varlena: VarlenaCallbacks {
			set_size: varlena::set_size,
			set_size_short: varlena::set_size_short,
			size_any: varlena::size_any,
			size_any_exhdr: varlena::size_any_exhdr,
			data_any: varlena::data_any,
			is_short: varlena::is_short,
			is_external: varlena::is_external,
			is_compressed: varlena::is_compressed,
		},
		array: ArrayCallbacks {
			data_ptr: array::data_ptr,
			nelems: array::nelems,
			null_bitmap: array::null_bitmap,
			ndim: array::ndim,
			has_null: array::has_null,
			dims: array::dims,
			lbound: array::lbound,
			elemtype: array::elemtype,
		},
		tuple: TupleCallbacks {
			getattr: tuple::getattr,
			header_get_xmin: tuple::header_get_xmin,
			header_get_raw_command_id: tuple::header_get_raw_command_id,
			header_get_oid: tuple::header_get_oid,
			get_struct: tuple::get_struct,
			desc_natts: tuple::desc_natts,
		},
		list: ListCallbacks {
			length: list::length,
			nth: list::nth,
			nth_int: list::nth_int,
			nth_oid: list::nth_oid,
			nth_cell: list::nth_cell,
			planner_rt_fetch: list::planner_rt_fetch,
		},
		memory: MemoryCallbacks {
			chunk_context: memory::chunk_context,
		},
		report: ReportCallbacks {
			elog: report::elog,
			elog_error: report::elog_error,
			ereport: report::ereport,
		},
		boundary: BoundaryCallbacks {
			try_call: boundary::try_call,
		},
	}
}
