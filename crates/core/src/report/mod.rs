// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Forwarding of log and error reports to the engine
//!
//! Messages are handed to the engine verbatim; the engine formats, filters and routes
//! them. A report at ERROR or above does not return: the engine's own error handling
//! takes the call over and delivers the error to its top-level handler. An engine that
//! returns anyway is left with a panic carrying a [`ReportedError`].

mod error;
mod macros;
mod severity;

use std::ffi::CString;

pub use error::{Location, ReportedError};
pub use severity::{Severity, SqlState};
use tracing::{debug, error, info, warn};

use crate::Runtime;

/// Message as a C string, cut at the first NUL
///
/// Reports hand the engine a raw pointer and take the string back once the call
/// returns. A report the engine leaves with `longjmp` leaks it instead of skipping
/// its destructor.
fn c_message(message: &str) -> CString {
	let end = message.find('\0').unwrap_or(message.len());
	CString::new(&message[..end]).unwrap_or_default()
}

impl Runtime {
	/// Mirror a report into `tracing` at the matching level
	fn trace_report(&self, level: Severity, code: Option<SqlState>, message: &str, location: &Location) {
		if !self.config().trace_reports {
			return;
		}
		let code = code.map(|code| code.to_string());
		match level {
			Severity::Debug5 | Severity::Debug4 | Severity::Debug3 | Severity::Debug2 | Severity::Debug1 => {
				debug!(severity = %level, ?code, %location, "{message}")
			}
			Severity::Log | Severity::CommError | Severity::Info | Severity::Notice => {
				info!(severity = %level, ?code, %location, "{message}")
			}
			Severity::Warning => warn!(severity = %level, ?code, %location, "{message}"),
			Severity::Error | Severity::Fatal | Severity::Panic => {
				error!(severity = %level, ?code, %location, "{message}")
			}
		}
	}

	/// Send `message` to the engine's log at `level`
	///
	/// # Parameters
	/// - `level`: Severity; ERROR and above do not return
	/// - `message`: Text forwarded verbatim, up to its first NUL
	#[track_caller]
	pub fn elog(&self, level: Severity, message: &str) {
		let location = Location::caller();
		self.trace_report(level, None, message, &location);

		let message = c_message(message).into_raw();
		unsafe { (self.callbacks().report.elog)(level.level(), message) };
		let message = unsafe { CString::from_raw(message) };
		if level.aborts() {
			abort_after_return(level, SqlState::INTERNAL_ERROR, &message, location);
		}
	}

	/// Report `message` at ERROR; never returns
	#[track_caller]
	pub fn elog_error(&self, message: &str) -> ! {
		let location = Location::caller();
		self.trace_report(Severity::Error, None, message, &location);

		let message = c_message(message).into_raw();
		unsafe { (self.callbacks().report.elog_error)(message) };
		let message = unsafe { CString::from_raw(message) };
		abort_after_return(Severity::Error, SqlState::INTERNAL_ERROR, &message, location)
	}

	/// Report `message` with an error code and the source location it came from
	///
	/// # Parameters
	/// - `level`: Severity; ERROR and above do not return
	/// - `code`: SQLSTATE attached to the report
	/// - `message`: Text forwarded verbatim, up to its first NUL
	/// - `location`: Source position, usually captured by [`ereport!`](crate::ereport)
	pub fn ereport(&self, level: Severity, code: SqlState, message: &str, location: Location) {
		self.trace_report(level, Some(code), message, &location);

		let message = c_message(message).into_raw();
		let file = c_message(location.file).into_raw();
		unsafe {
			(self.callbacks().report.ereport)(
				level.level(),
				code.packed(),
				message,
				file,
				location.line as i32,
				location.column as i32,
			)
		};
		let (message, _file) = unsafe { (CString::from_raw(message), CString::from_raw(file)) };
		if level.aborts() {
			abort_after_return(level, code, &message, location);
		}
	}
}

/// Leave the caller after the engine returned from a report that must not return
///
/// The engine's own error handling is normally what ends the call. This panic only
/// covers engines that return anyway.
#[cold]
fn abort_after_return(level: Severity, code: SqlState, message: &CString, location: Location) -> ! {
	error!(severity = %level, %location, "engine returned from an aborting report");
	ReportedError {
		severity: level,
		code,
		message: message.to_string_lossy().into_owned(),
		location: Some(location),
	}
	.raise()
}
