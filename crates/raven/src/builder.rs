// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Finalization of partial events into wire-ready events.

use raven_core::{Event, Level, PartialEvent, RavenError, Result, Timestamp, DEFAULT_LOGGER};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Platform identifier sent with every event.
pub const PLATFORM: &str = "rust";

/// Fills defaults and validates a [`PartialEvent`].
#[derive(Debug, Clone, Default)]
pub struct EventBuilder;

impl EventBuilder {
	pub fn new() -> Self {
		Self
	}

	/// Produce the final event.
	///
	/// Supplies a v4 `event_id`, the current `timestamp`, and the default
	/// `level`, `logger` and `platform` where they are missing, then checks
	/// required fields and field types. Interfaces are carried over as given.
	pub fn finalize(&self, partial: PartialEvent) -> Result<Event> {
		let PartialEvent {
			event_id,
			timestamp,
			message,
			level,
			logger,
			platform,
			culprit,
			server_name,
			tags,
			modules,
			extra,
			interfaces,
		} = partial;

		let event_id = event_id.unwrap_or_else(|| Uuid::new_v4().to_string());
		let timestamp = timestamp.unwrap_or_else(Timestamp::now).render();
		let level = level.unwrap_or_else(|| Level::default().to_string());
		let logger = logger.unwrap_or_else(|| DEFAULT_LOGGER.to_string());
		let platform = platform.unwrap_or_else(|| PLATFORM.to_string());

		let message = message.ok_or(RavenError::RequiredFieldMissing("message"))?;
		let level: Level = level.parse()?;

		Ok(Event {
			event_id,
			timestamp,
			message,
			level,
			logger,
			platform,
			culprit,
			tags: tags.map(|v| string_list("tags", v)).transpose()?,
			server_name,
			modules: modules.map(|v| string_list("modules", v)).transpose()?,
			extra: extra.map(scalar_map).transpose()?,
			interfaces,
		})
	}
}

fn string_list(field: &'static str, value: Value) -> Result<Vec<String>> {
	let invalid = || RavenError::InvalidFieldType {
		field,
		expected: "a sequence of strings",
	};

	match value {
		Value::Array(items) => items
			.into_iter()
			.map(|item| match item {
				Value::String(s) => Ok(s),
				_ => Err(invalid()),
			})
			.collect(),
		_ => Err(invalid()),
	}
}

fn scalar_map(value: Value) -> Result<Map<String, Value>> {
	let invalid = || RavenError::InvalidFieldType {
		field: "extra",
		expected: "a mapping of string to scalar",
	};

	match value {
		Value::Object(map) => {
			let all_scalar = map
				.values()
				.all(|v| matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_)));
			if all_scalar {
				Ok(map)
			} else {
				Err(invalid())
			}
		}
		_ => Err(invalid()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{TimeZone, Utc};
	use raven_core::{QueryInterface, TIMESTAMP_FORMAT};
	use serde_json::json;

	fn finalize(partial: PartialEvent) -> Result<Event> {
		EventBuilder::new().finalize(partial)
	}

	#[test]
	fn fills_defaults() {
		let event = finalize(PartialEvent::new().with_message("x")).unwrap();

		assert_eq!(event.message, "x");
		assert_eq!(event.level, Level::Error);
		assert_eq!(event.logger, "root");
		assert_eq!(event.platform, PLATFORM);
		assert!(Uuid::parse_str(&event.event_id).is_ok());
		assert_eq!(
			Uuid::parse_str(&event.event_id).unwrap().get_version_num(),
			4
		);
		assert!(chrono::DateTime::parse_from_str(&event.timestamp, TIMESTAMP_FORMAT).is_ok());
	}

	#[test]
	fn keeps_supplied_values() {
		let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
		let event = finalize(
			PartialEvent::new()
				.with_message("x")
				.with_event_id("abc")
				.with_timestamp(at)
				.with_level(Level::Warning)
				.with_logger("http"),
		)
		.unwrap();

		assert_eq!(event.event_id, "abc");
		assert_eq!(event.timestamp, "2024-05-06T07:08:09+0000");
		assert_eq!(event.level, Level::Warning);
		assert_eq!(event.logger, "http");
	}

	#[test]
	fn string_timestamp_is_not_reformatted() {
		let event = finalize(
			PartialEvent::new()
				.with_message("x")
				.with_timestamp("2024-05-06 07:08:09"),
		)
		.unwrap();
		assert_eq!(event.timestamp, "2024-05-06 07:08:09");
	}

	#[test]
	fn missing_message_is_rejected() {
		let err = finalize(PartialEvent::new()).unwrap_err();
		assert!(matches!(err, RavenError::RequiredFieldMissing("message")));
	}

	#[test]
	fn bogus_level_is_rejected() {
		let mut partial = PartialEvent::new().with_message("x");
		partial.level = Some("bogus".to_string());

		let err = finalize(partial).unwrap_err();
		assert!(matches!(err, RavenError::InvalidEnumValue { field: "level", .. }));
	}

	#[test]
	fn tags_and_modules_must_be_string_sequences() {
		let event = finalize(
			PartialEvent::new()
				.with_message("x")
				.with_tags(["a", "b"])
				.with_modules(["serde 1.0"]),
		)
		.unwrap();
		assert_eq!(event.tags, Some(vec!["a".to_string(), "b".to_string()]));
		assert_eq!(event.modules, Some(vec!["serde 1.0".to_string()]));

		let mut partial = PartialEvent::new().with_message("x");
		partial.tags = Some(json!(["a", 1]));
		assert!(matches!(
			finalize(partial).unwrap_err(),
			RavenError::InvalidFieldType { field: "tags", .. }
		));

		let mut partial = PartialEvent::new().with_message("x");
		partial.modules = Some(json!("serde"));
		assert!(matches!(
			finalize(partial).unwrap_err(),
			RavenError::InvalidFieldType { field: "modules", .. }
		));
	}

	#[test]
	fn extra_must_map_to_scalars() {
		let event = finalize(
			PartialEvent::new()
				.with_message("x")
				.with_extra("attempt", 2)
				.with_extra("cached", false),
		)
		.unwrap();
		let extra = event.extra.unwrap();
		assert_eq!(extra["attempt"], json!(2));
		assert_eq!(extra["cached"], json!(false));

		let partial = PartialEvent::new()
			.with_message("x")
			.with_extra("nested", json!({"a": 1}));
		assert!(matches!(
			finalize(partial).unwrap_err(),
			RavenError::InvalidFieldType { field: "extra", .. }
		));

		let mut partial = PartialEvent::new().with_message("x");
		partial.extra = Some(json!([1, 2]));
		assert!(matches!(
			finalize(partial).unwrap_err(),
			RavenError::InvalidFieldType { field: "extra", .. }
		));
	}

	#[test]
	fn interfaces_are_attached_only_when_present() {
		let event = finalize(PartialEvent::new().with_message("x").with_query(QueryInterface {
			query: "SELECT 1".to_string(),
			engine: None,
		}))
		.unwrap();

		let value = event.to_value().unwrap();
		assert_eq!(value["sentry.interfaces.Query"]["query"], "SELECT 1");
		assert!(value.get("sentry.interfaces.Exception").is_none());
		assert!(value.get("sentry.interfaces.User").is_none());
	}

	#[test]
	fn finalizing_twice_differs_only_in_id_and_timestamp() {
		let partial = PartialEvent::new()
			.with_message("x")
			.with_tags(["a"])
			.with_extra("k", "v");

		let mut first = finalize(partial.clone()).unwrap();
		let mut second = finalize(partial).unwrap();
		assert_ne!(first.event_id, second.event_id);

		first.event_id.clear();
		second.event_id.clear();
		first.timestamp.clear();
		second.timestamp.clear();
		assert_eq!(first, second);
	}

	#[test]
	fn partial_event_from_json_is_validated() {
		let partial = PartialEvent::from_value(json!({
			"message": "x",
			"level": "fatal",
			"extra": {"user_count": 3},
		}))
		.unwrap();
		let event = finalize(partial).unwrap();
		assert_eq!(event.level, Level::Fatal);

		let partial = PartialEvent::from_value(json!({"message": "x", "level": "bogus"})).unwrap();
		assert!(matches!(
			finalize(partial).unwrap_err(),
			RavenError::InvalidEnumValue { .. }
		));
	}
}
