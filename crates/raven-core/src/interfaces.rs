// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Structured interface payloads attached to events.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::exception::ExceptionChain;
use crate::frame::StackTrace;

pub const MESSAGE_KEY: &str = "sentry.interfaces.Message";
pub const EXCEPTION_KEY: &str = "sentry.interfaces.Exception";
pub const STACKTRACE_KEY: &str = "sentry.interfaces.StackTrace";
pub const HTTP_KEY: &str = "sentry.interfaces.Http";
pub const QUERY_KEY: &str = "sentry.interfaces.Query";
pub const USER_KEY: &str = "sentry.interfaces.User";

/// A formatted message with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageInterface {
	pub message: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub params: Vec<String>,
}

/// The HTTP request being served when the event happened.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HttpInterface {
	pub url: String,
	pub method: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<serde_json::Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query_string: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cookies: Option<String>,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub headers: BTreeMap<String, String>,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub env: BTreeMap<String, String>,
}

/// A database query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryInterface {
	pub query: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub engine: Option<String>,
}

/// The user affected by the event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserInterface {
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Sensitive; only sent when set explicitly.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ip_address: Option<String>,
}

/// The fixed set of interface slots. Absent slots are omitted from the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Interfaces {
	#[serde(
		rename = "sentry.interfaces.Message",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub message: Option<MessageInterface>,
	#[serde(
		rename = "sentry.interfaces.Exception",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub exception: Option<ExceptionChain>,
	#[serde(
		rename = "sentry.interfaces.StackTrace",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub stacktrace: Option<StackTrace>,
	#[serde(
		rename = "sentry.interfaces.Http",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub http: Option<HttpInterface>,
	#[serde(
		rename = "sentry.interfaces.Query",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub query: Option<QueryInterface>,
	#[serde(
		rename = "sentry.interfaces.User",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub user: Option<UserInterface>,
}

impl Interfaces {
	pub fn is_empty(&self) -> bool {
		self.message.is_none()
			&& self.exception.is_none()
			&& self.stacktrace.is_none()
			&& self.http.is_none()
			&& self.query.is_none()
			&& self.user.is_none()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn absent_slots_are_omitted() {
		let value = serde_json::to_value(Interfaces::default()).unwrap();
		assert_eq!(value, json!({}));
	}

	#[test]
	fn slots_use_fixed_keys() {
		let interfaces = Interfaces {
			query: Some(QueryInterface {
				query: "SELECT 1".to_string(),
				engine: Some("sqlite".to_string()),
			}),
			user: Some(UserInterface {
				id: Some("42".to_string()),
				..Default::default()
			}),
			..Default::default()
		};

		let value = serde_json::to_value(&interfaces).unwrap();
		assert_eq!(value[QUERY_KEY]["query"], "SELECT 1");
		assert_eq!(value[USER_KEY]["id"], "42");
		assert!(value.get(HTTP_KEY).is_none());
		assert!(!interfaces.is_empty());
	}
}
