// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The exception abstraction read by the translators.

use std::panic::Location;

use raven_core::RavenError;

use crate::backtrace::capture_trace;
use crate::error::Result;

/// A captured call argument, snapshotted when the trace was taken.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgSnapshot {
	Null,
	Bool(bool),
	Integer(i64),
	Float(f64),
	String(String),
	Array(Vec<ArgSnapshot>),
	Object { class: String },
	Resource { kind: String },
}

/// One flattened call-stack entry, owned and detached from the exception.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraceEntry {
	pub file: String,
	/// 1-based.
	pub line: u32,
	pub function: String,
	pub class: Option<String>,
	pub args: Vec<ArgSnapshot>,
}

impl TraceEntry {
	pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
		Self {
			file: file.into(),
			line,
			function: function.into(),
			..Default::default()
		}
	}

	pub fn with_class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	pub fn with_args(mut self, args: Vec<ArgSnapshot>) -> Self {
		self.args = args;
		self
	}
}

/// An exception as seen by the reporting pipeline.
///
/// Identity for cycle detection is the address of the value, so
/// implementations must hand out `cause()` references to the same object on
/// every call.
pub trait Throwable {
	fn message(&self) -> &str;

	/// Qualified type name.
	fn kind(&self) -> &str;

	/// File the exception was raised in.
	fn file(&self) -> &str;

	/// Line the exception was raised at, 1-based.
	fn line(&self) -> u32;

	/// Snapshot of the call stack at the point the exception was raised.
	fn trace(&self) -> Vec<TraceEntry>;

	fn cause(&self) -> Option<&dyn Throwable>;

	/// Runtime error-severity code, set only for exceptions raised from a
	/// recoverable runtime error condition.
	fn severity(&self) -> Option<u32> {
		None
	}
}

/// An owned exception with an owned cause chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedException {
	pub message: String,
	pub kind: String,
	pub file: String,
	pub line: u32,
	pub trace: Vec<TraceEntry>,
	pub cause: Option<Box<RecordedException>>,
	pub severity: Option<u32>,
}

impl RecordedException {
	pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			kind: kind.into(),
			..Default::default()
		}
	}

	pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
		self.file = file.into();
		self.line = line;
		self
	}

	pub fn with_trace(mut self, trace: Vec<TraceEntry>) -> Self {
		self.trace = trace;
		self
	}

	pub fn caused_by(mut self, cause: RecordedException) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}

	pub fn with_severity(mut self, code: u32) -> Self {
		self.severity = Some(code);
		self
	}

	/// Records a Rust error and its `source()` chain.
	///
	/// The outermost link carries the caller's location and the current
	/// backtrace. Sources share the location and carry no trace of their own.
	#[track_caller]
	pub fn from_error<E>(error: &E) -> Result<Self>
	where
		E: std::error::Error + 'static,
	{
		let location = Location::caller();
		let mut links = Vec::new();
		// Compared as wide pointers: a source stored inline in its parent can
		// share the parent's address but not its vtable.
		let mut visited: Vec<*const (dyn std::error::Error + 'static)> = Vec::new();
		let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);

		while let Some(err) = current {
			let this = std::ptr::from_ref(err);
			if visited.iter().any(|&seen| std::ptr::eq(seen, this)) {
				return Err(RavenError::CyclicCauseChain {
					kind: error_kind(err),
				}
				.into());
			}
			let kind = if links.is_empty() {
				std::any::type_name::<E>().to_string()
			} else {
				error_kind(err)
			};
			links.push(
				RecordedException::new(kind, err.to_string()).at(location.file(), location.line()),
			);
			visited.push(this);
			current = err.source();
		}

		let mut chain: Option<RecordedException> = None;
		for mut link in links.into_iter().rev() {
			link.cause = chain.map(Box::new);
			chain = Some(link);
		}

		// At least the outermost error was recorded.
		let mut recorded = chain.unwrap_or_default();
		recorded.trace = capture_trace();
		Ok(recorded)
	}
}

/// Best-effort type name for a source error.
///
/// Source errors are only reachable as `dyn Error`, so apart from the std
/// error types recognized here the name is read from the leading identifier of
/// the `Debug` rendering. That matches derived `Debug` impls; hand-written ones
/// may report something else.
fn error_kind(err: &(dyn std::error::Error + 'static)) -> String {
	if err.is::<std::io::Error>() {
		return "std::io::Error".to_string();
	}
	if err.is::<std::fmt::Error>() {
		return "std::fmt::Error".to_string();
	}

	let debug = format!("{:?}", err);
	let name: String = debug
		.chars()
		.take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
		.collect();
	if name.is_empty() {
		"Error".to_string()
	} else {
		name
	}
}

impl Throwable for RecordedException {
	fn message(&self) -> &str {
		&self.message
	}

	fn kind(&self) -> &str {
		&self.kind
	}

	fn file(&self) -> &str {
		&self.file
	}

	fn line(&self) -> u32 {
		self.line
	}

	fn trace(&self) -> Vec<TraceEntry> {
		self.trace.clone()
	}

	fn cause(&self) -> Option<&dyn Throwable> {
		self.cause.as_deref().map(|c| c as &dyn Throwable)
	}

	fn severity(&self) -> Option<u32> {
		self.severity
	}
}
