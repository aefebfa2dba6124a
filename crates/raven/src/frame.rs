// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation of trace entries into frames.

use raven_core::{Frame, FrameVar};
use serde_json::{Number, Value};
use tracing::warn;

use crate::context::SourceContextReader;
use crate::throwable::{ArgSnapshot, TraceEntry};

/// Converts one trace entry into a [`Frame`], with source context when the
/// file can be read.
#[derive(Debug, Clone, Default)]
pub struct FrameTranslator {
	context: SourceContextReader,
}

impl FrameTranslator {
	pub fn new(context: SourceContextReader) -> Self {
		Self { context }
	}

	pub fn translate(&self, entry: &TraceEntry) -> Frame {
		let class = entry.class.clone().unwrap_or_default();
		let mut frame = Frame::new(entry.file.clone(), &entry.function, class, entry.line);
		frame.vars = entry.args.iter().map(frame_var).collect();

		match self.context.attach_context(frame.clone()) {
			Ok(with_context) => with_context,
			Err(e) => {
				warn!(file = %frame.file, line = frame.line, error = %e, "Frame has no usable source context");
				frame
			}
		}
	}
}

/// Scalars are kept; composites and opaque values become a descriptor.
fn frame_var(arg: &ArgSnapshot) -> FrameVar {
	match arg {
		ArgSnapshot::Null => FrameVar::Scalar(Value::Null),
		ArgSnapshot::Bool(b) => FrameVar::Scalar(Value::Bool(*b)),
		ArgSnapshot::Integer(i) => FrameVar::Scalar(Value::from(*i)),
		ArgSnapshot::Float(f) => {
			FrameVar::Scalar(Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null))
		}
		ArgSnapshot::String(s) => FrameVar::Scalar(Value::String(s.clone())),
		ArgSnapshot::Array(_) => FrameVar::descriptor("array"),
		ArgSnapshot::Object { class } => FrameVar::descriptor(class.clone()),
		ArgSnapshot::Resource { kind } => FrameVar::descriptor(kind.clone()),
	}
}
