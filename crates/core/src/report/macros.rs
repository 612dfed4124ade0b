// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Reporting macros that format the message and capture the call site

/// Send a formatted message to the engine's log
///
/// ```ignore
/// elog!(rt, Severity::Notice, "skipped {} rows", skipped);
/// ```
#[macro_export]
macro_rules! elog {
	($rt:expr, $level:expr, $($arg:tt)+) => {
		$rt.elog($level, &format!($($arg)+))
	};
}

/// Report a formatted message with an error code and the current source location
///
/// ```ignore
/// ereport!(rt, Severity::Error, SqlState::DIVISION_BY_ZERO, "division by zero");
/// ```
#[macro_export]
macro_rules! ereport {
	($rt:expr, $level:expr, $code:expr, $($arg:tt)+) => {
		$rt.ereport(
			$level,
			$code,
			&format!($($arg)+),
			$crate::report::Location::new(file!(), line!(), column!()),
		)
	};
}
