// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use libc::{c_char, c_int};

/// Error reporting (`utils/elog.h`)
///
/// Reports at ERROR or above do not return: the engine unwinds to its own top-level
/// handler.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ReportCallbacks {
	/// Report `message` at `level` (`elog(level, "%s", message)`)
	pub elog: unsafe extern "C-unwind" fn(level: i32, message: *const c_char),

	/// Report `message` at ERROR (`elog(ERROR, "%s", message)`)
	pub elog_error: unsafe extern "C-unwind" fn(message: *const c_char),

	/// Report with an error code and a source location as context
	///
	/// # Parameters
	/// - `level`: Severity
	/// - `code`: SQLSTATE packed with `MAKE_SQLSTATE`
	/// - `message`: NUL-terminated message
	/// - `file`: NUL-terminated source file name
	/// - `lineno`: Source line
	/// - `colno`: Source column
	pub ereport: unsafe extern "C-unwind" fn(
		level: c_int,
		code: c_int,
		message: *const c_char,
		file: *const c_char,
		lineno: c_int,
		colno: c_int,
	),
}
