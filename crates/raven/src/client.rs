// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for capturing errors and reporting them to a collector.

use raven_core::{Event, Level, MessageInterface, PartialEvent, StackFrame};
use tracing::{error, info};

use crate::builder::EventBuilder;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::exception::ExceptionChainTranslator;
use crate::throwable::{RecordedException, Throwable};
use crate::transport::{HttpTransport, Transport, STORE_RESOURCE};

/// Captures events and hands them to a [`Transport`].
///
/// Every capture runs to completion on the calling thread: the exception is
/// translated, the event finalized and sent, and the finalized event returned.
/// A capture that fails anywhere sends nothing.
///
/// # Example
///
/// ```ignore
/// use raven::{Client, ClientConfig};
///
/// let config = ClientConfig::builder()
///     .public_key("public")
///     .secret_key("secret")
///     .project_id("42")
///     .build()?;
/// let client = Client::http(config)?;
///
/// if let Err(e) = do_something() {
///     client.capture_error(&e)?;
/// }
/// ```
#[derive(Debug)]
pub struct Client<T> {
	config: ClientConfig,
	transport: T,
	exceptions: ExceptionChainTranslator,
	events: EventBuilder,
}

impl Client<HttpTransport> {
	/// Creates a client sending over HTTP with default transport settings.
	pub fn http(config: ClientConfig) -> Result<Self> {
		let transport = HttpTransport::new(&config)?;
		Ok(Self::new(config, transport))
	}
}

impl<T: Transport> Client<T> {
	pub fn new(config: ClientConfig, transport: T) -> Self {
		info!(endpoint = %config.endpoint(), "Raven client initialized");
		Self {
			config,
			transport,
			exceptions: ExceptionChainTranslator::default(),
			events: EventBuilder::new(),
		}
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Finalizes an application-assembled event and sends it.
	pub fn capture(&self, partial: PartialEvent) -> Result<Event> {
		let event = self.events.finalize(partial)?;

		if let Err(e) = self.transport.send(&event, STORE_RESOURCE) {
			error!(event_id = %event.event_id, error = %e, "Failed to send event");
			return Err(e);
		}

		info!(event_id = %event.event_id, level = %event.level, "Event captured");
		Ok(event)
	}

	/// Captures an exception and its causes.
	///
	/// `extra` supplies any other event fields. The message and exception
	/// interface always come from the exception. The level is taken from the
	/// exception's severity code when it has one.
	pub fn capture_exception(&self, exception: &dyn Throwable, extra: PartialEvent) -> Result<Event> {
		let chain = self.exceptions.translate(exception)?;

		let culprit = chain
			.latest()
			.stacktrace
			.frames()
			.first()
			.and_then(StackFrame::as_code)
			.map(|frame| frame.function.clone());

		let mut partial = extra
			.with_message(exception.message())
			.with_exception(chain);

		if let Some(code) = exception.severity() {
			partial = partial.with_level(Level::from_severity(code));
		}
		if partial.culprit.is_none() {
			partial.culprit = culprit;
		}

		self.capture(partial)
	}

	/// Captures a Rust error and its `source()` chain.
	#[track_caller]
	pub fn capture_error<E>(&self, error: &E) -> Result<Event>
	where
		E: std::error::Error + 'static,
	{
		let recorded = RecordedException::from_error(error)?;
		self.capture_exception(&recorded, PartialEvent::new())
	}

	/// Captures a plain message.
	pub fn capture_message(&self, message: &str, level: Level) -> Result<Event> {
		let partial = PartialEvent::new()
			.with_message(message)
			.with_level(level)
			.with_message_interface(MessageInterface {
				message: message.to_string(),
				params: Vec::new(),
			});
		self.capture(partial)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::RavenSdkError;
	use crate::throwable::TraceEntry;
	use raven_core::{RavenError, Severity};
	use std::cell::RefCell;

	#[derive(Default)]
	struct RecordingTransport {
		sent: RefCell<Vec<(Event, String)>>,
	}

	impl Transport for RecordingTransport {
		fn send(&self, event: &Event, resource: &str) -> Result<()> {
			self.sent
				.borrow_mut()
				.push((event.clone(), resource.to_string()));
			Ok(())
		}
	}

	struct RejectingTransport;

	impl Transport for RejectingTransport {
		fn send(&self, _event: &Event, _resource: &str) -> Result<()> {
			Err(RavenSdkError::ServerError {
				status: 403,
				message: "forbidden".to_string(),
			})
		}
	}

	fn config() -> ClientConfig {
		ClientConfig::builder()
			.public_key("public")
			.secret_key("secret")
			.project_id("42")
			.build()
			.unwrap()
	}

	fn client() -> Client<RecordingTransport> {
		Client::new(config(), RecordingTransport::default())
	}

	#[test]
	fn test_capture_sends_to_store() {
		let client = client();
		let event = client.capture(PartialEvent::new().with_message("x")).unwrap();

		let sent = client.transport().sent.borrow();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].0, event);
		assert_eq!(sent[0].1, STORE_RESOURCE);
	}

	#[test]
	fn test_invalid_event_is_not_sent() {
		let client = client();
		let result = client.capture(PartialEvent::new());

		assert!(matches!(
			result,
			Err(RavenSdkError::Core(RavenError::RequiredFieldMissing("message")))
		));
		assert!(client.transport().sent.borrow().is_empty());
	}

	#[test]
	fn test_transport_failure_is_returned() {
		let client = Client::new(config(), RejectingTransport);
		let result = client.capture_message("x", Level::Info);
		assert!(matches!(
			result,
			Err(RavenSdkError::ServerError { status: 403, .. })
		));
	}

	#[test]
	fn test_capture_exception_sets_message_and_culprit() {
		let client = client();
		let exception = RecordedException::new("app::Boom", "boom")
			.at("src/main.rs", 3)
			.with_trace(vec![TraceEntry::new("/nonexistent/main.rs", 3, "main")]);

		let event = client
			.capture_exception(&exception, PartialEvent::new().with_logger("jobs"))
			.unwrap();

		assert_eq!(event.message, "boom");
		assert_eq!(event.level, Level::Error);
		assert_eq!(event.logger, "jobs");
		assert_eq!(event.culprit.as_deref(), Some("main"));
		assert_eq!(event.interfaces.exception.unwrap().len(), 1);
	}

	#[test]
	fn test_supplied_culprit_is_kept() {
		let client = client();
		let exception = RecordedException::new("app::Boom", "boom")
			.with_trace(vec![TraceEntry::new("/nonexistent/main.rs", 3, "main")]);

		let event = client
			.capture_exception(&exception, PartialEvent::new().with_culprit("worker"))
			.unwrap();
		assert_eq!(event.culprit.as_deref(), Some("worker"));
	}

	#[test]
	fn test_severity_sets_level() {
		let client = client();
		let exception =
			RecordedException::new("RuntimeError", "deprecated call").with_severity(Severity::Deprecated.code());

		let event = client
			.capture_exception(&exception, PartialEvent::new().with_level(Level::Fatal))
			.unwrap();
		assert_eq!(event.level, Level::Warning);
	}

	#[test]
	fn test_without_severity_level_is_left_alone() {
		let client = client();
		let exception = RecordedException::new("app::Boom", "boom");

		let event = client
			.capture_exception(&exception, PartialEvent::new().with_level(Level::Fatal))
			.unwrap();
		assert_eq!(event.level, Level::Fatal);
	}

	#[test]
	fn test_unknown_severity_is_error() {
		let client = client();
		let exception = RecordedException::new("RuntimeError", "odd").with_severity(3);

		let event = client
			.capture_exception(&exception, PartialEvent::new())
			.unwrap();
		assert_eq!(event.level, Level::Error);
	}

	#[test]
	fn test_capture_message_attaches_message_interface() {
		let client = client();
		let event = client.capture_message("disk almost full", Level::Warning).unwrap();

		assert_eq!(event.level, Level::Warning);
		assert_eq!(
			event.interfaces.message.map(|m| m.message),
			Some("disk almost full".to_string())
		);
		assert!(event.interfaces.exception.is_none());
	}

	#[test]
	fn test_capture_error_uses_display_message() {
		let client = client();
		let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");

		let event = client.capture_error(&err).unwrap();
		assert_eq!(event.message, "missing.toml");
		let chain = event.interfaces.exception.unwrap();
		assert!(chain.latest().kind.ends_with("io::error::Error"));
		assert!(chain.latest().module.starts_with(file!()));
	}
}
