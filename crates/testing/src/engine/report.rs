// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cell::RefCell,
	ffi::CStr,
	panic::{AssertUnwindSafe, catch_unwind, panic_any, resume_unwind},
};

use libc::{c_char, c_int};
use ogview_abi::{callbacks::EngineError, constants::ERROR};

/// SQLSTATE `XX000`, used when an error is raised without a code
pub(crate) const ERRCODE_INTERNAL_ERROR: i32 = make_sqlstate(b"XX000");

/// SQLSTATE `54000`
pub(crate) const ERRCODE_PROGRAM_LIMIT_EXCEEDED: i32 = make_sqlstate(b"54000");

const fn make_sqlstate(code: &[u8; 5]) -> i32 {
	let mut packed = 0;
	let mut i = 0;
	while i < 5 {
		packed += ((code[i].wrapping_sub(b'0') & 0x3F) as i32) << (6 * i);
		i += 1;
	}
	packed
}

/// One report as the engine would have written it to its log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedReport {
	pub level: i32,
	pub code: Option<i32>,
	pub message: String,
	/// `file:line:column` context attached by `ereport`
	pub context: Option<String>,
}

thread_local! {
	static REPORTS: RefCell<Vec<CapturedReport>> = const { RefCell::new(Vec::new()) };
}

/// Reports captured on the current thread, oldest first
pub fn reports() -> Vec<CapturedReport> {
	REPORTS.with(|reports| reports.borrow().clone())
}

/// Forget the reports captured on the current thread
pub fn clear_reports() {
	REPORTS.with(|reports| reports.borrow_mut().clear());
}

/// Run `f` the way the engine's top-level handler would, turning an engine error into `Err`
///
/// An ERROR arriving here is written to the captured reports. Panics that do not carry
/// an [`EngineError`] keep unwinding.
pub fn catch_engine_error<T>(f: impl FnOnce() -> T) -> Result<T, EngineError> {
	match catch_unwind(AssertUnwindSafe(f)) {
		Ok(value) => Ok(value),
		Err(payload) => match payload.downcast::<EngineError>() {
			Ok(error) => {
				if error.level == ERROR {
					emit_error(&error);
				}
				Err(*error)
			}
			Err(payload) => resume_unwind(payload),
		},
	}
}

fn emit(report: CapturedReport) {
	REPORTS.with(|reports| reports.borrow_mut().push(report));
}

fn emit_error(error: &EngineError) {
	emit(CapturedReport {
		level: error.level,
		code: Some(error.code),
		message: error.message.clone(),
		context: error.context.clone(),
	});
}

/// Write a report, or leave abruptly when `level` is ERROR or above
///
/// An ERROR is written only once it reaches the top-level handler, so an error caught
/// and flushed by a trap never shows up. FATAL and PANIC are written at once.
pub(crate) fn raise(level: i32, code: Option<i32>, message: String, context: Option<String>) {
	if level < ERROR {
		emit(CapturedReport {
			level,
			code,
			message,
			context,
		});
		return;
	}

	let error = EngineError {
		level,
		code: code.unwrap_or(ERRCODE_INTERNAL_ERROR),
		message,
		context,
	};
	if level > ERROR {
		emit_error(&error);
	}
	panic_any(error)
}

/// Report a failed engine assertion
pub(crate) fn trap(condition: &str) -> ! {
	raise(ogview_abi::constants::PANIC, None, format!("TRAP: failed Assert(\"{condition}\")"), None);
	unreachable!("PANIC reports unwind")
}

unsafe fn text(ptr: *const c_char) -> String {
	if ptr.is_null() {
		return String::new();
	}
	unsafe { CStr::from_ptr(ptr).to_string_lossy().into_owned() }
}

pub(super) unsafe extern "C-unwind" fn elog(level: i32, message: *const c_char) {
	let message = unsafe { text(message) };
	raise(level, None, message, None);
}

pub(super) unsafe extern "C-unwind" fn elog_error(message: *const c_char) {
	unsafe { elog(ERROR, message) }
}

pub(super) unsafe extern "C-unwind" fn ereport(
	level: c_int,
	code: c_int,
	message: *const c_char,
	file: *const c_char,
	lineno: c_int,
	colno: c_int,
) {
	let (message, file) = unsafe { (text(message), text(file)) };
	raise(level, Some(code), message, Some(format!("{file}:{lineno}:{colno}")));
}
