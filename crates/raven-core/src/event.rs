// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial and finalized events.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RavenError, Result};
use crate::exception::ExceptionChain;
use crate::frame::StackTrace;
use crate::interfaces::{
	HttpInterface, Interfaces, MessageInterface, QueryInterface, UserInterface,
};
use crate::level::Level;

/// Wire format for timestamps: UTC, second precision, numeric offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Default logger name.
pub const DEFAULT_LOGGER: &str = "root";

/// When an event happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
	/// Sent exactly as given.
	Formatted(String),
	At(DateTime<Utc>),
}

impl Timestamp {
	pub fn now() -> Self {
		Self::At(Utc::now())
	}

	pub fn render(&self) -> String {
		match self {
			Self::Formatted(s) => s.clone(),
			Self::At(at) => at.format(TIMESTAMP_FORMAT).to_string(),
		}
	}
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
	fn from(at: DateTime<Tz>) -> Self {
		Self::At(at.with_timezone(&Utc))
	}
}

impl From<String> for Timestamp {
	fn from(s: String) -> Self {
		Self::Formatted(s)
	}
}

impl From<&str> for Timestamp {
	fn from(s: &str) -> Self {
		Self::Formatted(s.to_string())
	}
}

/// An event as assembled by the application, before defaults and validation.
///
/// `tags`, `modules` and `extra` are loosely typed so that events built from
/// arbitrary JSON can be checked when they are finalized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialEvent {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub event_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<Timestamp>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub level: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logger: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub platform: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub culprit: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub server_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub modules: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extra: Option<Value>,
	#[serde(flatten)]
	pub interfaces: Interfaces,
}

impl PartialEvent {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads a partial event from a JSON mapping.
	pub fn from_value(value: Value) -> Result<Self> {
		if !value.is_object() {
			return Err(RavenError::InvalidArgument(
				"partial event must be a JSON object".to_string(),
			));
		}
		Ok(serde_json::from_value(value)?)
	}

	pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
		self.event_id = Some(event_id.into());
		self
	}

	pub fn with_timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
		self.timestamp = Some(timestamp.into());
		self
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn with_level(mut self, level: Level) -> Self {
		self.level = Some(level.to_string());
		self
	}

	pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
		self.logger = Some(logger.into());
		self
	}

	pub fn with_culprit(mut self, culprit: impl Into<String>) -> Self {
		self.culprit = Some(culprit.into());
		self
	}

	pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
		self.server_name = Some(server_name.into());
		self
	}

	pub fn with_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags = Some(string_array(tags));
		self
	}

	pub fn with_modules<I, S>(mut self, modules: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.modules = Some(string_array(modules));
		self
	}

	/// Adds one `extra` entry. Replaces a non-mapping `extra`.
	pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		let extra = self
			.extra
			.get_or_insert_with(|| Value::Object(Map::new()));
		if !extra.is_object() {
			*extra = Value::Object(Map::new());
		}
		if let Value::Object(map) = extra {
			map.insert(key.into(), value.into());
		}
		self
	}

	pub fn with_message_interface(mut self, message: MessageInterface) -> Self {
		self.interfaces.message = Some(message);
		self
	}

	pub fn with_exception(mut self, exception: ExceptionChain) -> Self {
		self.interfaces.exception = Some(exception);
		self
	}

	pub fn with_stacktrace(mut self, stacktrace: StackTrace) -> Self {
		self.interfaces.stacktrace = Some(stacktrace);
		self
	}

	pub fn with_http(mut self, http: HttpInterface) -> Self {
		self.interfaces.http = Some(http);
		self
	}

	pub fn with_query(mut self, query: QueryInterface) -> Self {
		self.interfaces.query = Some(query);
		self
	}

	pub fn with_user(mut self, user: UserInterface) -> Self {
		self.interfaces.user = Some(user);
		self
	}
}

fn string_array<I, S>(items: I) -> Value
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	Value::Array(items.into_iter().map(|s| Value::String(s.into())).collect())
}

/// A finalized event, ready to be sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
	pub event_id: String,
	pub timestamp: String,
	pub message: String,
	pub level: Level,
	pub logger: String,
	pub platform: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub culprit: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub server_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub modules: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extra: Option<Map<String, Value>>,
	#[serde(flatten)]
	pub interfaces: Interfaces,
}

impl Event {
	/// The event as a JSON mapping.
	pub fn to_value(&self) -> Result<Value> {
		Ok(serde_json::to_value(self)?)
	}
}
