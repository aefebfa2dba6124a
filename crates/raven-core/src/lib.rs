// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Raven error reporting client.
//!
//! This crate holds the values that make up an error report: the finalized
//! [`Event`] and the [`PartialEvent`] an application assembles, the
//! [`ExceptionChain`] of [`SingleException`]s with their [`StackTrace`]s, and
//! the structured interface payloads attached to an event. The `raven` crate
//! builds these from live exceptions and sends them to a collector.
//!
//! Every value here is built fresh for one capture and is not mutated after
//! it leaves the component that built it.

pub mod error;
pub mod event;
pub mod exception;
pub mod frame;
pub mod interfaces;
pub mod level;

pub use error::{RavenError, Result};
pub use event::{Event, PartialEvent, Timestamp, DEFAULT_LOGGER, TIMESTAMP_FORMAT};
pub use exception::{ExceptionChain, SingleException};
pub use frame::{Frame, FrameVar, StackFrame, StackTrace, TemplateFrame};
pub use interfaces::{
	HttpInterface, Interfaces, MessageInterface, QueryInterface, UserInterface,
};
pub use level::{Level, Severity};
