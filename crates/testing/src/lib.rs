// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Testing utilities for ogview
//!
//! This crate stands in for the database engine so the view layer can be tested without
//! loading it into a server process. It provides:
//!
//! - [`engine()`]: a [`RuntimeCallbacks`](ogview_abi::callbacks::RuntimeCallbacks) table
//!   whose entries reproduce the engine's macros on the engine's own memory layouts
//! - [`ForeignArena`]: a chunk allocator that tags every chunk with its owning context,
//!   the way engine memory contexts do
//! - builders that lay out varlena values, arrays, tuples, lists and spinlocks in
//!   foreign memory
//! - [`catch_engine_error`] and the captured report log, standing in for the engine's
//!   top-level error handler and its server log
//!
//! # Example
//!
//! ```ignore
//! use ogview_testing::{ArrayBuilder, ForeignArena, engine};
//!
//! let arena = ForeignArena::new("test");
//! let arr = ArrayBuilder::int4().dims(&[2, 3]).build(&arena);
//! let rt = ogview_core::Runtime::new(engine());
//! let view = unsafe { ogview_core::array::Array::from_ptr(&rt, arr) };
//! assert_eq!(view.element_count(), 6);
//! ```

mod arena;
pub mod builders;
pub mod engine;
mod logging;

pub use arena::ForeignArena;
pub use builders::*;
pub use engine::{
	CapturedReport, EngineError, SpinPolicy, catch_engine_error, clear_reports, engine, reports, set_spin_policy,
};
pub use logging::init_tracing;
