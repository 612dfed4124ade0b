// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Shared setup for the integration tests

use ogview::prelude::*;
use ogview_testing::{clear_reports, engine, init_tracing};

/// A runtime over the emulated engine with every check enabled
pub fn runtime() -> Runtime {
	init_tracing();
	clear_reports();
	Runtime::builder(engine()).checks(CheckMode::Always).build()
}
