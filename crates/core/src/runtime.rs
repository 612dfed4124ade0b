// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt;

use ogview_abi::callbacks::RuntimeCallbacks;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// When caller contracts are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
	/// Never; violations are undefined behaviour
	Off,
	/// In builds with `debug_assertions`
	#[default]
	Debug,
	/// Always
	Always,
}

impl CheckMode {
	pub const fn enabled(self) -> bool {
		match self {
			CheckMode::Off => false,
			CheckMode::Debug => cfg!(debug_assertions),
			CheckMode::Always => true,
		}
	}
}

/// Options of a [`Runtime`], loadable from an embedder's configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
	pub checks: CheckMode,
	/// Mirror every forwarded report into `tracing`
	pub trace_reports: bool,
	/// Emit a `debug!` event per spinlock acquire and release
	pub spin_trace: bool,
}

impl Default for RuntimeConfig {
	fn default() -> Self {
		Self {
			checks: CheckMode::Debug,
			trace_reports: true,
			spin_trace: false,
		}
	}
}

/// Handle to the engine ogview runs inside
///
/// Every view borrows the runtime it was created with and reaches the engine only
/// through its callbacks.
pub struct Runtime {
	callbacks: RuntimeCallbacks,
	config: RuntimeConfig,
}

impl Runtime {
	/// A runtime with the default configuration
	pub fn new(callbacks: RuntimeCallbacks) -> Self {
		RuntimeBuilder::new(callbacks).build()
	}

	pub fn builder(callbacks: RuntimeCallbacks) -> RuntimeBuilder {
		RuntimeBuilder::new(callbacks)
	}

	/// A runtime calling the symbols of the linked C shim
	#[cfg(feature = "cshim")]
	pub fn linked() -> Self {
		Self::new(RuntimeCallbacks::linked())
	}

	pub fn callbacks(&self) -> &RuntimeCallbacks {
		&self.callbacks
	}

	pub fn config(&self) -> &RuntimeConfig {
		&self.config
	}

	#[inline]
	pub fn checks_enabled(&self) -> bool {
		self.config.checks.enabled()
	}
}

impl fmt::Debug for Runtime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Runtime").field("config", &self.config).finish_non_exhaustive()
	}
}

/// Builder for configuring a [`Runtime`]
pub struct RuntimeBuilder {
	callbacks: RuntimeCallbacks,
	config: RuntimeConfig,
}

impl RuntimeBuilder {
	pub fn new(callbacks: RuntimeCallbacks) -> Self {
		Self {
			callbacks,
			config: RuntimeConfig::default(),
		}
	}

	/// Replace every option at once
	pub fn with_config(mut self, config: RuntimeConfig) -> Self {
		self.config = config;
		self
	}

	pub fn checks(mut self, mode: CheckMode) -> Self {
		self.config.checks = mode;
		self
	}

	pub fn trace_reports(mut self, enabled: bool) -> Self {
		self.config.trace_reports = enabled;
		self
	}

	pub fn spin_trace(mut self, enabled: bool) -> Self {
		self.config.spin_trace = enabled;
		self
	}

	pub fn build(self) -> Runtime {
		debug!(config = ?self.config, "runtime configured");
		Runtime {
			callbacks: self.callbacks,
			config: self.config,
		}
	}
}
