// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Install a fmt subscriber for test output
///
/// The filter is read from `OGVIEW_LOG` and defaults to `warn`. Calling this more than
/// once is harmless.
pub fn init_tracing() {
	INIT.call_once(|| {
		let filter = EnvFilter::try_from_env("OGVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
		let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
	});
}
