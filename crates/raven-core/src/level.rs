// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event levels and the mapping from runtime severity codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RavenError;

/// Severity level of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
	Debug,
	Info,
	Warning,
	#[default]
	Error,
	Fatal,
}

impl Level {
	pub const ALL: [Level; 5] = [
		Level::Debug,
		Level::Info,
		Level::Warning,
		Level::Error,
		Level::Fatal,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Debug => "debug",
			Self::Info => "info",
			Self::Warning => "warning",
			Self::Error => "error",
			Self::Fatal => "fatal",
		}
	}

	/// Map a runtime error-severity code to a level.
	///
	/// Codes that are not recognized map to [`Level::Error`].
	pub fn from_severity(code: u32) -> Self {
		Severity::from_code(code)
			.map(Severity::level)
			.unwrap_or(Level::Error)
	}
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Level {
	type Err = RavenError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"debug" => Ok(Self::Debug),
			"info" => Ok(Self::Info),
			"warning" => Ok(Self::Warning),
			"error" => Ok(Self::Error),
			"fatal" => Ok(Self::Fatal),
			_ => Err(RavenError::InvalidEnumValue {
				field: "level",
				value: s.to_string(),
			}),
		}
	}
}

/// Error categories reported by the runtime, as bit-flag codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Severity {
	Error = 1,
	Warning = 2,
	Parse = 4,
	Notice = 8,
	CoreError = 16,
	CoreWarning = 32,
	CompileError = 64,
	CompileWarning = 128,
	UserError = 256,
	UserWarning = 512,
	UserNotice = 1024,
	Strict = 2048,
	RecoverableError = 4096,
	Deprecated = 8192,
	UserDeprecated = 16384,
}

impl Severity {
	pub fn from_code(code: u32) -> Option<Self> {
		let severity = match code {
			1 => Self::Error,
			2 => Self::Warning,
			4 => Self::Parse,
			8 => Self::Notice,
			16 => Self::CoreError,
			32 => Self::CoreWarning,
			64 => Self::CompileError,
			128 => Self::CompileWarning,
			256 => Self::UserError,
			512 => Self::UserWarning,
			1024 => Self::UserNotice,
			2048 => Self::Strict,
			4096 => Self::RecoverableError,
			8192 => Self::Deprecated,
			16384 => Self::UserDeprecated,
			_ => return None,
		};
		Some(severity)
	}

	pub fn code(self) -> u32 {
		self as u32
	}

	pub fn level(self) -> Level {
		match self {
			Self::Error
			| Self::Parse
			| Self::CoreError
			| Self::CompileError
			| Self::UserError
			| Self::RecoverableError => Level::Error,
			Self::Warning
			| Self::CoreWarning
			| Self::CompileWarning
			| Self::UserWarning
			| Self::Deprecated
			| Self::UserDeprecated => Level::Warning,
			Self::Notice | Self::UserNotice | Self::Strict => Level::Info,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn default_level_is_error() {
		assert_eq!(Level::default(), Level::Error);
	}

	#[test]
	fn unknown_level_is_rejected() {
		let err = "bogus".parse::<Level>().unwrap_err();
		assert!(matches!(
			err,
			RavenError::InvalidEnumValue { field: "level", ref value } if value == "bogus"
		));
	}

	#[test]
	fn severity_mapping() {
		assert_eq!(Level::from_severity(Severity::Error.code()), Level::Error);
		assert_eq!(Level::from_severity(Severity::Warning.code()), Level::Warning);
		assert_eq!(Level::from_severity(Severity::Notice.code()), Level::Info);
		assert_eq!(Level::from_severity(Severity::Strict.code()), Level::Info);
		assert_eq!(
			Level::from_severity(Severity::UserDeprecated.code()),
			Level::Warning
		);
		assert_eq!(
			Level::from_severity(Severity::RecoverableError.code()),
			Level::Error
		);
	}

	#[test]
	fn unknown_severity_maps_to_error() {
		assert_eq!(Level::from_severity(0), Level::Error);
		assert_eq!(Level::from_severity(3), Level::Error);
		assert_eq!(Level::from_severity(32767), Level::Error);
	}

	proptest! {
		#[test]
		fn level_roundtrip(level in prop::sample::select(Level::ALL.to_vec())) {
			let s = level.to_string();
			let parsed: Level = s.parse().unwrap();
			prop_assert_eq!(level, parsed);
		}

		#[test]
		fn severity_code_roundtrip(shift in 0u32..15) {
			let code = 1u32 << shift;
			let severity = Severity::from_code(code).unwrap();
			prop_assert_eq!(severity.code(), code);
		}

		#[test]
		fn any_code_maps_to_a_level(code in any::<u32>()) {
			let level = Level::from_severity(code);
			prop_assert!(Level::ALL.contains(&level));
		}
	}
}
