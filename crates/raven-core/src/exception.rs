// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Exception records and cause chains.

use serde::{Deserialize, Serialize};

use crate::error::{RavenError, Result};
use crate::frame::StackTrace;

/// One exception out of a cause chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleException {
	#[serde(rename = "value")]
	pub message: String,
	/// Qualified type name of the exception.
	#[serde(rename = "type")]
	pub kind: String,
	/// `file:line` where the exception was raised.
	pub module: String,
	pub stacktrace: StackTrace,
}

impl SingleException {
	pub fn new(
		message: impl Into<String>,
		kind: impl Into<String>,
		file: &str,
		line: u32,
		stacktrace: StackTrace,
	) -> Self {
		Self {
			message: message.into(),
			kind: kind.into(),
			module: format!("{}:{}", file, line),
			stacktrace,
		}
	}
}

/// Exceptions ordered from the deepest cause to the most recently raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SingleException>")]
pub struct ExceptionChain(Vec<SingleException>);

impl ExceptionChain {
	/// Wraps an already ordered, non-empty list of exceptions.
	pub fn new(exceptions: Vec<SingleException>) -> Result<Self> {
		if exceptions.is_empty() {
			return Err(RavenError::InvalidArgument(
				"exception chain must contain at least one exception".to_string(),
			));
		}
		Ok(Self(exceptions))
	}

	pub fn exceptions(&self) -> &[SingleException] {
		&self.0
	}

	/// The most recently raised exception.
	pub fn latest(&self) -> &SingleException {
		// Non-empty by construction.
		&self.0[self.0.len() - 1]
	}

	/// The deepest cause.
	pub fn root_cause(&self) -> &SingleException {
		&self.0[0]
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl TryFrom<Vec<SingleException>> for ExceptionChain {
	type Error = RavenError;

	fn try_from(exceptions: Vec<SingleException>) -> Result<Self> {
		Self::new(exceptions)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn exception(kind: &str) -> SingleException {
		SingleException::new("boom", kind, "src/main.rs", 12, StackTrace::default())
	}

	#[test]
	fn module_is_file_and_line() {
		assert_eq!(exception("io::Error").module, "src/main.rs:12");
	}

	#[test]
	fn empty_chain_is_rejected() {
		assert!(matches!(
			ExceptionChain::new(Vec::new()),
			Err(RavenError::InvalidArgument(_))
		));
	}

	#[test]
	fn latest_and_root_cause() {
		let chain = ExceptionChain::new(vec![exception("Inner"), exception("Outer")]).unwrap();
		assert_eq!(chain.root_cause().kind, "Inner");
		assert_eq!(chain.latest().kind, "Outer");
	}

	#[test]
	fn wire_format() {
		let chain = ExceptionChain::new(vec![exception("Outer")]).unwrap();
		let value = serde_json::to_value(&chain).unwrap();
		assert_eq!(
			value,
			json!([{
				"value": "boom",
				"type": "Outer",
				"module": "src/main.rs:12",
				"stacktrace": {"frames": []},
			}])
		);
	}
}
