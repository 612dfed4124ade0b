// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use tracing::error;

use crate::ViewError;

/// Fail with `$err` when checks are enabled on `$rt` and `$cond` does not hold
macro_rules! check {
	($rt:expr, $cond:expr, $err:expr) => {
		if $rt.checks_enabled() && !$cond {
			$crate::check::violation($err);
		}
	};
}

pub(crate) use check;

/// Turn a `Result` of a checked operation into its value, panicking on violations
macro_rules! checked {
	($result:expr) => {
		match $result {
			Ok(value) => value,
			Err(err) => $crate::check::violation(err),
		}
	};
}

pub(crate) use checked;

#[cold]
#[track_caller]
pub(crate) fn violation(err: ViewError) -> ! {
	error!(%err, "caller contract violated");
	panic!("{err}")
}
