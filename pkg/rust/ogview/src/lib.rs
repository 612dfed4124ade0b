// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Safe views over the memory and spinlocks of a PostgreSQL-family engine
//!
//! ```ignore
//! use ogview::prelude::*;
//!
//! let rt = Runtime::linked();
//! let arr = unsafe { Array::from_ptr(&rt, datum.as_ptr()) };
//! for i in 0..arr.element_count() as usize {
//!     if !arr.is_null(i) { /* ... */ }
//! }
//! ```

pub use ogview_abi as abi;
pub use ogview_core as core;
pub use ogview_core::{
	CheckMode, Result, Runtime, RuntimeBuilder, RuntimeConfig, ViewError, array, elog, ereport, guard, list, memory,
	report, spin, tuple, varlena,
};

pub mod prelude {
	pub use ogview_abi::types::{CommandId, Datum, Oid, TransactionId};
	pub use ogview_core::{
		CheckMode, Runtime, RuntimeBuilder, ViewError,
		array::Array,
		elog, ereport,
		list::List,
		report::{Location, ReportedError, Severity, SqlState},
		spin::{SpinLock, SpinLockGuard},
		tuple::{HeapTuple, TupleDesc, TupleHeader},
		varlena::Varlena,
	};
}
