// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation of an exception's call stack.

use raven_core::{StackFrame, StackTrace};

use crate::frame::FrameTranslator;
use crate::throwable::Throwable;

/// Builds a [`StackTrace`] from an exception's trace snapshot, keeping the
/// runtime's frame order.
#[derive(Debug, Clone, Default)]
pub struct StackTraceTranslator {
	frames: FrameTranslator,
}

impl StackTraceTranslator {
	pub fn new(frames: FrameTranslator) -> Self {
		Self { frames }
	}

	pub fn translate(&self, exception: &dyn Throwable) -> StackTrace {
		let entries = exception.trace();
		StackTrace::new(
			entries
				.iter()
				.map(|entry| StackFrame::Code(self.frames.translate(entry))),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::throwable::{RecordedException, TraceEntry};

	#[test]
	fn preserves_entry_order_and_count() {
		let exception = RecordedException::new("Error", "boom").with_trace(vec![
			TraceEntry::new("/nonexistent/a.rs", 3, "inner"),
			TraceEntry::new("/nonexistent/b.rs", 8, "middle").with_class("Service"),
			TraceEntry::new("/nonexistent/c.rs", 1, "main"),
		]);

		let trace = StackTraceTranslator::default().translate(&exception);
		let functions: Vec<_> = trace
			.frames()
			.iter()
			.filter_map(StackFrame::as_code)
			.map(|f| f.function.as_str())
			.collect();

		assert_eq!(functions, vec!["inner", "Service::middle", "main"]);
	}

	#[test]
	fn empty_trace_gives_empty_stacktrace() {
		let exception = RecordedException::new("Error", "boom");
		assert!(StackTraceTranslator::default().translate(&exception).is_empty());
	}
}
