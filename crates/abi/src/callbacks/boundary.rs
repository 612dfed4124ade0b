// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{ffi::c_void, fmt};

use libc::{c_char, c_int};

use crate::constants::ERROR_FRAME_MESSAGE_LEN;

/// Function run inside the engine's error trap
pub type GuardedFn = unsafe extern "C-unwind" fn(arg: *mut c_void);

/// Error caught by the engine's error trap
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ErrorFrameFFI {
	/// Severity the error was raised at
	pub level: c_int,
	/// SQLSTATE packed with `MAKE_SQLSTATE`
	pub code: c_int,
	/// NUL-terminated copy of the message, cut to fit
	pub message: [c_char; ERROR_FRAME_MESSAGE_LEN],
}

impl ErrorFrameFFI {
	pub const fn empty() -> Self {
		Self {
			level: 0,
			code: 0,
			message: [0; ERROR_FRAME_MESSAGE_LEN],
		}
	}

	/// The message up to its first NUL
	pub fn message(&self) -> String {
		let bytes: Vec<u8> = self.message.iter().take_while(|&&c| c != 0).map(|&c| c as u8).collect();
		String::from_utf8_lossy(&bytes).into_owned()
	}

	/// Copy `message` into the frame, cut to leave room for the terminating NUL
	pub fn set_message(&mut self, message: &[u8]) {
		let len = message.len().min(ERROR_FRAME_MESSAGE_LEN - 1);
		for (slot, &byte) in self.message.iter_mut().zip(&message[..len]) {
			*slot = byte as c_char;
		}
		self.message[len] = 0;
	}
}

/// Error trap (`PG_TRY` / `PG_CATCH`)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct BoundaryCallbacks {
	/// Run `func(arg)` with the engine's exception stack pointed at a local trap
	///
	/// # Parameters
	/// - `func`: Function to run
	/// - `arg`: Argument passed to `func` unchanged
	/// - `frame`: Receives the caught error
	///
	/// # Returns
	/// - `FFI_OK` when `func` returned normally
	/// - `FFI_CAUGHT_ERROR` when the engine raised an error; the engine's error state
	///   has been flushed and freed, and `frame` holds a copy of the error
	pub try_call: unsafe extern "C-unwind" fn(func: GuardedFn, arg: *mut c_void, frame: *mut ErrorFrameFFI) -> c_int,
}

impl Default for ErrorFrameFFI {
	fn default() -> Self {
		Self::empty()
	}
}

/// Unwind payload of an engine implemented in Rust
///
/// Such an engine raises its errors by unwinding with this payload where a C engine
/// would `longjmp`. Guarded Rust code lets the payload pass so that it reaches the
/// engine's own error trap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
	pub level: c_int,
	pub code: c_int,
	pub message: String,
	/// Error context, such as the `file:line:column` attached by `ereport`
	pub context: Option<String>,
}

impl fmt::Display for EngineError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "engine error (level {}): {}", self.level, self.message)
	}
}

impl std::error::Error for EngineError {}
