// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Running code inside the engine's error trap, and handing errors back to the engine
//!
//! [`Runtime::try_guard`] runs a closure inside the engine's `PG_TRY` equivalent. An
//! ERROR the engine raises there is caught, the engine's error state is flushed, and
//! the error comes back as `Err(ReportedError)`. From then on the engine no longer
//! knows about it: unless the caller recovers, it must be handed back with
//! [`Runtime::rethrow`], usually by [`Runtime::boundary`] at the extension entry point.
//!
//! The engine leaves its trap with `longjmp`. That skips the Rust frames in between
//! without running their destructors, so the guarded closure may only consist of plain
//! old frames while engine code can raise. No value with drop glue may be live across
//! an engine call made inside it. This is why the trap entry points are `unsafe`.

use core::ffi::c_void;
use std::{
	any::Any,
	panic::{AssertUnwindSafe, catch_unwind, resume_unwind},
};

use ogview_abi::{
	callbacks::{EngineError, ErrorFrameFFI},
	constants::FFI_OK,
};
use tracing::{debug, instrument, warn};

use crate::{
	Runtime,
	report::{Location, ReportedError, Severity, SqlState},
};

struct Call<F, T> {
	f: Option<F>,
	result: Option<T>,
	panic: Option<Box<dyn Any + Send>>,
}

/// Runs the closure behind `arg`
///
/// A Rust panic must not cross the engine's trap, so it is parked and resumed once the
/// trap has returned. Only an [`EngineError`] raised by an engine written in Rust keeps
/// unwinding, since the trap is where it belongs.
unsafe extern "C-unwind" fn trampoline<F, T>(arg: *mut c_void)
where
	F: FnOnce() -> T,
{
	let call = unsafe { &mut *(arg as *mut Call<F, T>) };
	let Some(f) = call.f.take() else {
		return;
	};
	match catch_unwind(AssertUnwindSafe(f)) {
		Ok(value) => call.result = Some(value),
		Err(payload) if payload.is::<EngineError>() => resume_unwind(payload),
		Err(payload) => call.panic = Some(payload),
	}
}

fn frame_error(frame: &ErrorFrameFFI) -> ReportedError {
	ReportedError {
		severity: Severity::from_level(frame.level).unwrap_or(Severity::Error),
		code: SqlState::from_packed(frame.code),
		message: frame.message(),
		location: None,
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
	if let Some(message) = payload.downcast_ref::<&str>() {
		message
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message
	} else {
		"Rust panic"
	}
}

impl Runtime {
	/// Run `f` inside the engine's error trap, raising a caught engine error as a
	/// [`ReportedError`] panic
	///
	/// The panic starts outside the trap, so destructors of the frames between this call
	/// and the enclosing [`boundary`](Runtime::boundary) run as usual.
	///
	/// # Safety
	/// See [`Runtime::try_guard`].
	pub unsafe fn guard<T, F>(&self, f: F) -> T
	where
		F: FnOnce() -> T,
	{
		match unsafe { self.try_guard(f) } {
			Ok(value) => value,
			Err(err) => err.raise(),
		}
	}

	/// Run `f` inside the engine's error trap, returning a caught engine error as `Err`
	///
	/// The error has been flushed from the engine. A [`ReportedError`] panic raised by a
	/// nested guard is returned as `Err` as well.
	///
	/// # Safety
	/// The engine may leave `f` with `longjmp`. Until `f` returns, no value with drop
	/// glue may be live in `f` or in anything it calls across a call into the engine,
	/// and `f` must not capture such values by move.
	#[instrument(level = "trace", skip_all)]
	pub unsafe fn try_guard<T, F>(&self, f: F) -> Result<T, ReportedError>
	where
		F: FnOnce() -> T,
	{
		let mut call = Call {
			f: Some(f),
			result: None,
			panic: None,
		};
		let mut frame = ErrorFrameFFI::empty();

		debug!("entering error trap");
		let status = unsafe {
			(self.callbacks().boundary.try_call)(
				trampoline::<F, T>,
				&mut call as *mut Call<F, T> as *mut c_void,
				&mut frame,
			)
		};

		if status != FFI_OK {
			let err = frame_error(&frame);
			debug!(%err, "engine error caught");
			return Err(err);
		}
		if let Some(payload) = call.panic {
			return match payload.downcast::<ReportedError>() {
				Ok(err) => Err(*err),
				Err(payload) => resume_unwind(payload),
			};
		}
		match call.result {
			Some(value) => Ok(value),
			None => unreachable!("error trap returned without running the guarded call"),
		}
	}

	/// Report a caught error to the engine again, at its original severity and code
	///
	/// Severities below ERROR are raised at ERROR. The location is the one the error
	/// was first reported at, or the caller's when it has none.
	#[track_caller]
	pub fn rethrow(&self, err: ReportedError) -> ! {
		let location = match err.location {
			Some(location) => location,
			None => Location::caller(),
		};
		let severity = err.severity.max(Severity::Error);
		self.ereport(severity, err.code, &err.message, location);
		err.raise()
	}

	/// Run `f` at an entry point called by the engine
	///
	/// A [`ReportedError`] panic leaving `f` is handed back to the engine with
	/// [`rethrow`](Runtime::rethrow). Any other Rust panic is reported at ERROR with
	/// its message. Either way the engine's error handling takes over from here.
	#[track_caller]
	pub fn boundary<T, F>(&self, f: F) -> T
	where
		F: FnOnce() -> T,
	{
		let payload = match catch_unwind(AssertUnwindSafe(f)) {
			Ok(value) => return value,
			Err(payload) => payload,
		};
		if payload.is::<EngineError>() {
			resume_unwind(payload);
		}

		match payload.downcast::<ReportedError>() {
			Ok(err) => self.rethrow(*err),
			Err(payload) => {
				let message = panic_message(payload.as_ref());
				warn!(panic = message, "Rust panic at the engine boundary");
				self.ereport(Severity::Error, SqlState::INTERNAL_ERROR, message, Location::caller());
				resume_unwind(payload)
			}
		}
	}
}

#[cfg(test)]
pub mod tests {
	use std::panic::catch_unwind;

	use ogview_abi::constants::{ERROR, PANIC};
	use ogview_testing::{catch_engine_error, clear_reports, engine, reports};

	use crate::{
		Runtime,
		report::{ReportedError, Severity, SqlState},
	};

	#[test]
	fn test_value_passes_through() {
		let rt = Runtime::new(engine());
		assert_eq!(unsafe { rt.guard(|| 40 + 2) }, 42);
	}

	#[test]
	fn test_engine_error_becomes_reported_error() {
		let rt = Runtime::new(engine());
		let message = std::ffi::CString::new("could not open relation").unwrap();
		let result = unsafe { rt.try_guard(|| (rt.callbacks().report.elog_error)(message.as_ptr())) };

		let err = result.unwrap_err();
		assert_eq!(err.severity, Severity::Error);
		assert_eq!(err.code, SqlState::INTERNAL_ERROR);
		assert_eq!(err.message, "could not open relation");
	}

	#[test]
	fn test_trapped_error_is_not_reported() {
		clear_reports();
		let rt = Runtime::new(engine());
		let err = unsafe { rt.try_guard(|| -> () { rt.elog_error("relation missing") }) }.unwrap_err();
		assert_eq!(err.message, "relation missing");
		assert!(reports().is_empty());
	}

	#[test]
	fn test_rethrow_reaches_engine_handler() {
		clear_reports();
		let rt = Runtime::new(engine());
		let err = unsafe {
			rt.try_guard(|| crate::ereport!(rt, Severity::Error, SqlState::DIVISION_BY_ZERO, "division by zero"))
		}
		.unwrap_err();

		let engine_error = catch_engine_error(|| -> () { rt.rethrow(err) }).unwrap_err();
		assert_eq!(engine_error.level, ERROR);
		assert_eq!(engine_error.code, SqlState::DIVISION_BY_ZERO.packed());
		assert_eq!(engine_error.message, "division by zero");

		let captured = reports();
		assert_eq!(captured.len(), 1);
		assert_eq!(captured[0].message, "division by zero");
	}

	#[test]
	fn test_guard_raises_outside_trap_and_runs_destructors() {
		struct Flag<'a>(&'a std::cell::Cell<bool>);
		impl Drop for Flag<'_> {
			fn drop(&mut self) {
				self.0.set(true);
			}
		}

		let rt = Runtime::new(engine());
		let dropped = std::cell::Cell::new(false);
		let err = ReportedError::catch(|| {
			let _flag = Flag(&dropped);
			unsafe { rt.guard(|| rt.elog(Severity::Error, "boom")) };
		})
		.unwrap_err();

		assert_eq!(err.message, "boom");
		assert!(dropped.get());
	}

	#[test]
	fn test_boundary_hands_guarded_error_back() {
		clear_reports();
		let rt = Runtime::new(engine());
		let err = catch_engine_error(|| {
			rt.boundary(|| {
				let _owned = String::from("dropped before the engine takes over");
				unsafe { rt.guard(|| -> () { rt.elog_error("relation missing") }) }
			})
		})
		.unwrap_err();

		assert_eq!(err.level, ERROR);
		assert_eq!(err.message, "relation missing");
		assert_eq!(reports().len(), 1);
	}

	#[test]
	fn test_boundary_reports_rust_panic() {
		clear_reports();
		let rt = Runtime::new(engine());
		let err = catch_engine_error(|| rt.boundary(|| -> () { panic!("index out of range") })).unwrap_err();
		assert_eq!(err.level, ERROR);
		assert_eq!(err.code, SqlState::INTERNAL_ERROR.packed());
		assert_eq!(err.message, "index out of range");
	}

	#[test]
	fn test_boundary_passes_value() {
		let rt = Runtime::new(engine());
		assert_eq!(rt.boundary(|| "ok"), "ok");
	}

	#[test]
	fn test_rust_panic_is_resumed() {
		let rt = Runtime::new(engine());
		let payload = catch_unwind(|| unsafe { rt.guard(|| -> () { panic!("plain panic") }) }).unwrap_err();
		assert_eq!(payload.downcast_ref::<&str>(), Some(&"plain panic"));
	}

	#[test]
	fn test_nested_guards() {
		let rt = Runtime::new(engine());
		let err =
			unsafe { rt.try_guard(|| rt.guard(|| -> () { rt.elog_error("inner") })) }.unwrap_err();
		assert_eq!(err.message, "inner");
	}

	#[test]
	fn test_panic_severity_is_not_trapped() {
		let rt = Runtime::new(engine());
		let err =
			catch_engine_error(|| unsafe { rt.try_guard(|| rt.elog(Severity::Panic, "stuck spinlock")) }).unwrap_err();
		assert_eq!(err.level, PANIC);
	}
}
