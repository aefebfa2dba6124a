// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Raven SDK.

use raven_core::RavenError;
use thiserror::Error;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, RavenSdkError>;

/// Errors that can occur while capturing or sending an event.
#[derive(Debug, Error)]
pub enum RavenSdkError {
	/// Translation or validation of the event failed.
	#[error(transparent)]
	Core(#[from] RavenError),

	/// Client configuration is incomplete or invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Collector returned an error.
	#[error("server error (status {status}): {message}")]
	ServerError {
		/// HTTP status code.
		status: u16,
		/// Response body.
		message: String,
	},

	/// Failed to serialize event.
	#[error("serialization error: {0}")]
	SerializationError(#[from] serde_json::Error),
}
