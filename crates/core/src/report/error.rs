// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	fmt,
	panic::{AssertUnwindSafe, catch_unwind, panic_any, resume_unwind},
};

use super::{Severity, SqlState};

/// Source position attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
	pub file: &'static str,
	pub line: u32,
	pub column: u32,
}

impl Location {
	pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
		Self {
			file,
			line,
			column,
		}
	}

	/// Position of the caller, following `#[track_caller]`
	#[track_caller]
	pub fn caller() -> Self {
		let caller = std::panic::Location::caller();
		Self::new(caller.file(), caller.line(), caller.column())
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.file, self.line, self.column)
	}
}

/// An error the engine reported, carried by the panic that leaves the reporting code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{severity}: {message} ({code})")]
pub struct ReportedError {
	pub severity: Severity,
	pub code: SqlState,
	pub message: String,
	pub location: Option<Location>,
}

impl ReportedError {
	/// Leave the current code abruptly with this error as the panic payload
	pub fn raise(self) -> ! {
		panic_any(self)
	}

	/// Recover the error from a caught panic payload
	pub fn from_panic(payload: &(dyn Any + Send)) -> Option<&ReportedError> {
		payload.downcast_ref::<ReportedError>()
	}

	/// Run `f`, turning a raised error into `Err`
	///
	/// Panics that do not carry a [`ReportedError`] keep unwinding.
	pub fn catch<T>(f: impl FnOnce() -> T) -> Result<T, ReportedError> {
		match catch_unwind(AssertUnwindSafe(f)) {
			Ok(value) => Ok(value),
			Err(payload) => match payload.downcast::<ReportedError>() {
				Ok(err) => Err(*err),
				Err(payload) => resume_unwind(payload),
			},
		}
	}
}

#[cfg(test)]
pub mod tests {
	use std::panic::catch_unwind;

	use super::{Location, ReportedError};
	use crate::report::{Severity, SqlState};

	fn sample() -> ReportedError {
		ReportedError {
			severity: Severity::Error,
			code: SqlState::DATA_EXCEPTION,
			message: "bad row".to_string(),
			location: Some(Location::new("x.rs", 3, 9)),
		}
	}

	#[test]
	fn test_display() {
		assert_eq!(sample().to_string(), "ERROR: bad row (22000)");
		assert_eq!(Location::new("x.rs", 3, 9).to_string(), "x.rs:3:9");
	}

	#[test]
	fn test_from_panic() {
		let payload = catch_unwind(|| -> () { sample().raise() }).unwrap_err();
		assert_eq!(ReportedError::from_panic(payload.as_ref()), Some(&sample()));
	}

	#[test]
	fn test_catch_lets_other_panics_pass() {
		let outer = catch_unwind(|| ReportedError::catch(|| -> () { panic!("unrelated") }));
		assert!(outer.is_err());
	}
}
