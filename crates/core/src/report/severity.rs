// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt;

use ogview_abi::constants;

/// Report severity with the engine's numeric values
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
	Debug5 = constants::DEBUG5,
	Debug4 = constants::DEBUG4,
	Debug3 = constants::DEBUG3,
	Debug2 = constants::DEBUG2,
	Debug1 = constants::DEBUG1,
	Log = constants::LOG,
	CommError = constants::COMMERROR,
	Info = constants::INFO,
	Notice = constants::NOTICE,
	Warning = constants::WARNING,
	Error = constants::ERROR,
	Fatal = constants::FATAL,
	Panic = constants::PANIC,
}

impl Severity {
	pub const fn level(self) -> i32 {
		self as i32
	}

	pub const fn from_level(level: i32) -> Option<Self> {
		Some(match level {
			constants::DEBUG5 => Severity::Debug5,
			constants::DEBUG4 => Severity::Debug4,
			constants::DEBUG3 => Severity::Debug3,
			constants::DEBUG2 => Severity::Debug2,
			constants::DEBUG1 => Severity::Debug1,
			constants::LOG => Severity::Log,
			constants::COMMERROR => Severity::CommError,
			constants::INFO => Severity::Info,
			constants::NOTICE => Severity::Notice,
			constants::WARNING => Severity::Warning,
			constants::ERROR => Severity::Error,
			constants::FATAL => Severity::Fatal,
			constants::PANIC => Severity::Panic,
			_ => return None,
		})
	}

	/// Whether a report at this severity leaves the reporting code abruptly
	pub const fn aborts(self) -> bool {
		self.level() >= constants::ERROR
	}

	pub const fn name(self) -> &'static str {
		match self {
			Severity::Debug5 => "DEBUG5",
			Severity::Debug4 => "DEBUG4",
			Severity::Debug3 => "DEBUG3",
			Severity::Debug2 => "DEBUG2",
			Severity::Debug1 => "DEBUG1",
			Severity::Log => "LOG",
			Severity::CommError => "COMMERROR",
			Severity::Info => "INFO",
			Severity::Notice => "NOTICE",
			Severity::Warning => "WARNING",
			Severity::Error => "ERROR",
			Severity::Fatal => "FATAL",
			Severity::Panic => "PANIC",
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A five-character SQLSTATE packed six bits per character, as `MAKE_SQLSTATE` does
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SqlState(i32);

impl SqlState {
	pub const SUCCESSFUL_COMPLETION: Self = Self::new(b"00000");
	pub const WARNING: Self = Self::new(b"01000");
	pub const DATA_EXCEPTION: Self = Self::new(b"22000");
	pub const DIVISION_BY_ZERO: Self = Self::new(b"22012");
	pub const INVALID_PARAMETER_VALUE: Self = Self::new(b"22023");
	pub const FEATURE_NOT_SUPPORTED: Self = Self::new(b"0A000");
	pub const PROGRAM_LIMIT_EXCEEDED: Self = Self::new(b"54000");
	pub const INTERNAL_ERROR: Self = Self::new(b"XX000");

	pub const fn new(code: &[u8; 5]) -> Self {
		let mut packed = 0;
		let mut i = 0;
		while i < 5 {
			packed |= ((code[i].wrapping_sub(b'0') & 0x3F) as i32) << (6 * i);
			i += 1;
		}
		Self(packed)
	}

	/// Parse a five-character code of digits and upper-case letters
	pub fn parse(code: &str) -> Option<Self> {
		let bytes: &[u8; 5] = code.as_bytes().try_into().ok()?;
		bytes.iter().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()).then(|| Self::new(bytes))
	}

	pub const fn from_packed(packed: i32) -> Self {
		Self(packed)
	}

	pub const fn packed(self) -> i32 {
		self.0
	}

	/// The five characters of the code
	pub fn code(self) -> String {
		(0..5).map(|i| (((self.0 >> (6 * i)) & 0x3F) as u8 + b'0') as char).collect()
	}
}

impl fmt::Display for SqlState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.code())
	}
}

impl fmt::Debug for SqlState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SqlState({})", self.code())
	}
}

#[cfg(test)]
pub mod tests {
	use super::{Severity, SqlState};

	#[test]
	fn test_severity_levels() {
		assert_eq!(Severity::Error.level(), 20);
		assert_eq!(Severity::from_level(19), Some(Severity::Warning));
		assert_eq!(Severity::from_level(99), None);
		assert!(Severity::Fatal.aborts());
		assert!(!Severity::Warning.aborts());
		assert!(Severity::Notice < Severity::Error);
	}

	#[test]
	fn test_sqlstate_round_trip() {
		let state = SqlState::parse("22012").unwrap();
		assert_eq!(state, SqlState::DIVISION_BY_ZERO);
		assert_eq!(state.code(), "22012");
		assert_eq!(SqlState::INTERNAL_ERROR.to_string(), "XX000");
		assert_eq!(SqlState::SUCCESSFUL_COMPLETION.packed(), 0);
	}

	#[test]
	fn test_sqlstate_rejects_malformed_codes() {
		assert_eq!(SqlState::parse("2201"), None);
		assert_eq!(SqlState::parse("2201z"), None);
	}
}
