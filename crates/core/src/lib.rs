// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Views over engine-owned memory
//!
//! Values, arrays, tuples and lists handed out by the engine are looked at in place:
//! nothing here allocates, frees or copies engine memory, and every view borrows the
//! [`Runtime`] it was created with. Layout decisions stay with the engine and are
//! reached through the [`RuntimeCallbacks`](ogview_abi::callbacks::RuntimeCallbacks)
//! table the runtime was built from.
//!
//! Caller contract violations are undefined behaviour, as they are for the engine's own
//! macros, unless the runtime's [`CheckMode`] enables checks. The `try_*` variants
//! always check and return a [`ViewError`].
//!
//! Errors reported at ERROR or above go to the engine's own error handling. Code that
//! needs to recover traps them with the [`guard`] functions, which hand them over as a
//! [`ReportedError`](report::ReportedError).

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod array;
mod check;
pub mod error;
pub mod guard;
pub mod list;
pub mod memory;
pub mod report;
mod runtime;
pub mod spin;
pub mod tuple;
pub mod varlena;

pub use error::{Result, ViewError};
pub use runtime::{CheckMode, Runtime, RuntimeBuilder, RuntimeConfig};
