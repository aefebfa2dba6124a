// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connection parameters for the collector.

use std::fmt;
use std::str::FromStr;

use crate::error::{RavenSdkError, Result};

/// Default collector host.
pub const DEFAULT_HOST: &str = "app.getsentry.com";

const REDACTED: &str = "[REDACTED]";

/// Scheme used to reach the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
	Http,
	#[default]
	Https,
}

impl fmt::Display for Protocol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Http => write!(f, "http"),
			Self::Https => write!(f, "https"),
		}
	}
}

impl FromStr for Protocol {
	type Err = RavenSdkError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"http" => Ok(Self::Http),
			"https" => Ok(Self::Https),
			_ => Err(RavenSdkError::InvalidConfig(format!(
				"protocol must be http or https, got {}",
				s
			))),
		}
	}
}

/// Immutable client configuration.
///
/// Built once through [`ClientConfig::builder`] and handed to the components
/// that issue requests.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
	public_key: String,
	secret_key: String,
	project_id: String,
	protocol: Protocol,
	host: String,
	path: String,
	port: Option<u16>,
}

impl ClientConfig {
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::new()
	}

	pub fn public_key(&self) -> &str {
		&self.public_key
	}

	pub fn secret_key(&self) -> &str {
		&self.secret_key
	}

	pub fn project_id(&self) -> &str {
		&self.project_id
	}

	pub fn protocol(&self) -> Protocol {
		self.protocol
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn port(&self) -> Option<u16> {
		self.port
	}

	/// Base URL of the project API, ending in `/`.
	///
	/// Example: `https://app.getsentry.com/api/42/`
	pub fn endpoint(&self) -> String {
		let port = self.port.map(|p| format!(":{}", p)).unwrap_or_default();
		format!(
			"{}://{}{}{}api/{}/",
			self.protocol, self.host, port, self.path, self.project_id
		)
	}
}

impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfig")
			.field("public_key", &self.public_key)
			.field("secret_key", &REDACTED)
			.field("project_id", &self.project_id)
			.field("protocol", &self.protocol)
			.field("host", &self.host)
			.field("path", &self.path)
			.field("port", &self.port)
			.finish()
	}
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	public_key: Option<String>,
	secret_key: Option<String>,
	project_id: Option<String>,
	protocol: Protocol,
	host: Option<String>,
	path: Option<String>,
	port: Option<u16>,
}

impl ClientConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn public_key(mut self, key: impl Into<String>) -> Self {
		self.public_key = Some(key.into());
		self
	}

	pub fn secret_key(mut self, key: impl Into<String>) -> Self {
		self.secret_key = Some(key.into());
		self
	}

	pub fn project_id(mut self, id: impl Into<String>) -> Self {
		self.project_id = Some(id.into());
		self
	}

	pub fn protocol(mut self, protocol: Protocol) -> Self {
		self.protocol = protocol;
		self
	}

	/// Defaults to [`DEFAULT_HOST`].
	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.host = Some(host.into());
		self
	}

	/// Path prefix in front of `api/`. Defaults to `/`.
	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn port(mut self, port: u16) -> Self {
		self.port = Some(port);
		self
	}

	pub fn build(self) -> Result<ClientConfig> {
		let public_key = required("public_key", self.public_key)?;
		let secret_key = required("secret_key", self.secret_key)?;
		let project_id = required("project_id", self.project_id)?;
		let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
		if host.is_empty() {
			return Err(RavenSdkError::InvalidConfig(
				"host cannot be empty".to_string(),
			));
		}

		Ok(ClientConfig {
			public_key,
			secret_key,
			project_id,
			protocol: self.protocol,
			host,
			path: normalize_path(self.path.as_deref().unwrap_or("/")),
			port: self.port,
		})
	}
}

fn required(name: &str, value: Option<String>) -> Result<String> {
	match value {
		Some(v) if !v.is_empty() => Ok(v),
		_ => Err(RavenSdkError::InvalidConfig(format!("{} is required", name))),
	}
}

/// Ensure the path starts and ends with a single `/`.
fn normalize_path(path: &str) -> String {
	let trimmed = path.trim_matches('/');
	if trimmed.is_empty() {
		"/".to_string()
	} else {
		format!("/{}/", trimmed)
	}
}
