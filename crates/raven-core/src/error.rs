// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for event construction and validation.

use thiserror::Error;

/// Errors raised while building or validating report values.
#[derive(Debug, Error)]
pub enum RavenError {
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("cause chain of {kind} refers back to an exception already visited")]
	CyclicCauseChain { kind: String },

	#[error("line {line} is outside {file} ({line_count} lines)")]
	IndexOutOfRange {
		file: String,
		line: u32,
		line_count: usize,
	},

	#[error("required field missing: {0}")]
	RequiredFieldMissing(&'static str),

	#[error("invalid value for {field}: {value}")]
	InvalidEnumValue { field: &'static str, value: String },

	#[error("field {field} must be {expected}")]
	InvalidFieldType {
		field: &'static str,
		expected: &'static str,
	},

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Result type for report value operations.
pub type Result<T> = std::result::Result<T, RavenError>;
