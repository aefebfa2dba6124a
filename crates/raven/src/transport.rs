// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Delivery of finalized events to the collector.

use std::time::Duration;

use raven_core::Event;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::{RavenSdkError, Result};

/// SDK version for identification.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
/// SDK name for identification.
pub const SDK_NAME: &str = "raven-rust";

/// Resource path events are stored under, relative to the project endpoint.
pub const STORE_RESOURCE: &str = "store/";

/// Sends one event to one resource. Authentication, connection handling and
/// any retry policy belong to the implementation.
pub trait Transport {
	fn send(&self, event: &Event, resource: &str) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &T {
	fn send(&self, event: &Event, resource: &str) -> Result<()> {
		(**self).send(event, resource)
	}
}

impl<T: Transport + ?Sized> Transport for Box<T> {
	fn send(&self, event: &Event, resource: &str) -> Result<()> {
		(**self).send(event, resource)
	}
}

/// The `User-Agent` sent with every request.
pub fn user_agent() -> String {
	format!("{}/{}", SDK_NAME, SDK_VERSION)
}

/// Blocking HTTP transport posting JSON to the project endpoint.
///
/// Sends each event exactly once. Request signing is not done here; pass
/// already-computed headers through [`HttpTransport::with_headers`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
	endpoint: String,
	client: Client,
}

impl HttpTransport {
	/// Default request timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

	pub fn new(config: &ClientConfig) -> Result<Self> {
		Self::with_headers(config, HeaderMap::new(), Self::DEFAULT_TIMEOUT)
	}

	pub fn with_headers(config: &ClientConfig, headers: HeaderMap, timeout: Duration) -> Result<Self> {
		let client = Client::builder()
			.user_agent(user_agent())
			.default_headers(headers)
			.timeout(timeout)
			.build()
			.map_err(RavenSdkError::RequestFailed)?;

		Ok(Self {
			endpoint: config.endpoint(),
			client,
		})
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	fn url(&self, resource: &str) -> String {
		format!("{}{}", self.endpoint, resource.trim_start_matches('/'))
	}
}

impl Transport for HttpTransport {
	fn send(&self, event: &Event, resource: &str) -> Result<()> {
		let url = self.url(resource);
		let body = serde_json::to_vec(event)?;

		debug!(url = %url, event_id = %event.event_id, "Sending event");

		let response = self
			.client
			.post(&url)
			.header(CONTENT_TYPE, "application/json")
			.body(body)
			.send()?;

		if response.status().is_success() {
			return Ok(());
		}

		let status = response.status().as_u16();
		let message = response.text().unwrap_or_default();
		error!(status, message = %message, event_id = %event.event_id, "Collector rejected event");
		Err(RavenSdkError::ServerError { status, message })
	}
}
