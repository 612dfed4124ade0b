// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

use libc::c_int;
use ogview_abi::{
	callbacks::{EngineError, ErrorFrameFFI, GuardedFn},
	constants::{ERROR, FFI_CAUGHT_ERROR, FFI_OK},
};

/// Run `func(arg)` inside an error trap
///
/// Only ERROR is caught. It is flushed without being written to the captured reports.
/// FATAL and PANIC end the backend in the engine, so they keep unwinding here, as does
/// any unwind that is not an engine error.
pub(super) unsafe extern "C-unwind" fn try_call(func: GuardedFn, arg: *mut c_void, frame: *mut ErrorFrameFFI) -> c_int {
	let payload = match catch_unwind(AssertUnwindSafe(|| unsafe { func(arg) })) {
		Ok(()) => return FFI_OK,
		Err(payload) => payload,
	};

	let error = match payload.downcast::<EngineError>() {
		Ok(error) if error.level == ERROR => error,
		Ok(error) => resume_unwind(error),
		Err(payload) => resume_unwind(payload),
	};

	let mut caught = ErrorFrameFFI {
		level: error.level,
		code: error.code,
		..ErrorFrameFFI::empty()
	};
	caught.set_message(error.message.as_bytes());
	unsafe { frame.write(caught) };
	FFI_CAUGHT_ERROR
}
