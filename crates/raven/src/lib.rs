// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Raven error reporting SDK.
//!
//! Translates an exception and its cause chain into an error-report event
//! and sends it to a collector:
//!
//! - [`ExceptionChainTranslator`] walks the causes of a [`Throwable`],
//!   deepest cause first
//! - [`StackTraceTranslator`] and [`FrameTranslator`] turn each trace snapshot
//!   into frames, with source lines read by [`SourceContextReader`]
//! - [`EventBuilder`] fills defaults and validates the event
//! - [`Client`] ties these together and hands the event to a [`Transport`]
//!
//! Rust errors are bridged through [`RecordedException::from_error`], which
//! records the `source()` chain together with the current backtrace.
//!
//! # Example
//!
//! ```no_run
//! use raven::{Client, ClientConfig, Level};
//!
//! # fn main() -> raven::Result<()> {
//! let config = ClientConfig::builder()
//!     .public_key("public")
//!     .secret_key("secret")
//!     .project_id("42")
//!     .build()?;
//! let client = Client::http(config)?;
//!
//! client.capture_message("cache warmed", Level::Info)?;
//!
//! if let Err(e) = std::fs::read_to_string("settings.toml") {
//!     client.capture_error(&e)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod backtrace;
pub mod builder;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod exception;
pub mod frame;
pub mod stacktrace;
pub mod throwable;
pub mod transport;

pub use builder::{EventBuilder, PLATFORM};
pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder, Protocol};
pub use context::{SourceContextReader, CONTEXT_LINES};
pub use error::{RavenSdkError, Result};
pub use exception::ExceptionChainTranslator;
pub use frame::FrameTranslator;
pub use stacktrace::StackTraceTranslator;
pub use throwable::{ArgSnapshot, RecordedException, Throwable, TraceEntry};
pub use transport::{HttpTransport, Transport, STORE_RESOURCE};

// Re-export core types for convenience
pub use raven_core::{
	Event, ExceptionChain, Frame, FrameVar, HttpInterface, Interfaces, Level, MessageInterface,
	PartialEvent, QueryInterface, RavenError, Severity, SingleException, StackFrame, StackTrace,
	TemplateFrame, Timestamp, UserInterface,
};
