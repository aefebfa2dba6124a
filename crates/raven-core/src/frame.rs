// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack frames and stacktraces.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{RavenError, Result};

/// A captured call argument.
///
/// Scalars are kept as values. Composite or opaque arguments are replaced by a
/// short descriptor at capture time so the frame never has to serialize them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FrameVar {
	Scalar(Value),
	Descriptor(String),
}

impl FrameVar {
	pub fn descriptor(kind: impl Into<String>) -> Self {
		Self::Descriptor(kind.into())
	}
}

impl TryFrom<Value> for FrameVar {
	type Error = String;

	fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
		match value {
			Value::Array(_) | Value::Object(_) => {
				Err("frame vars must be scalars or descriptors".to_string())
			}
			scalar => Ok(Self::Scalar(scalar)),
		}
	}
}

impl<'de> Deserialize<'de> for FrameVar {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let value = Value::deserialize(deserializer)?;
		Self::try_from(value).map_err(serde::de::Error::custom)
	}
}

/// A single code frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
	#[serde(rename = "filename")]
	pub file: String,
	/// `Class::method` when the frame has a type context, else the bare function.
	pub function: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub class: String,
	/// 1-based.
	#[serde(rename = "lineno")]
	pub line: u32,
	#[serde(default)]
	pub vars: Vec<FrameVar>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context_line: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pre_context: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub post_context: Option<Vec<String>>,
}

impl Frame {
	/// Builds a frame without source context. The function label is derived
	/// from `class` and `function`.
	pub fn new(
		file: impl Into<String>,
		function: impl AsRef<str>,
		class: impl Into<String>,
		line: u32,
	) -> Self {
		let class = class.into();
		let function = if class.is_empty() {
			function.as_ref().to_string()
		} else {
			format!("{}::{}", class, function.as_ref())
		};
		Self {
			file: file.into(),
			function,
			class,
			line,
			..Default::default()
		}
	}

	pub fn has_context(&self) -> bool {
		self.context_line.is_some()
	}
}

/// A frame inside a rendered template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFrame {
	pub filename: String,
	pub abs_path: String,
	pub lineno: u32,
	pub context_line: String,
	#[serde(default)]
	pub pre_context: Vec<String>,
	#[serde(default)]
	pub post_context: Vec<String>,
}

/// Anything that can be rendered as a stack frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StackFrame {
	Code(Frame),
	Template(TemplateFrame),
}

impl StackFrame {
	pub fn as_code(&self) -> Option<&Frame> {
		match self {
			Self::Code(frame) => Some(frame),
			Self::Template(_) => None,
		}
	}
}

impl From<Frame> for StackFrame {
	fn from(frame: Frame) -> Self {
		Self::Code(frame)
	}
}

impl From<TemplateFrame> for StackFrame {
	fn from(frame: TemplateFrame) -> Self {
		Self::Template(frame)
	}
}

/// Ordered frames, in the order the runtime produced them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawStackTrace")]
pub struct StackTrace {
	frames: Vec<StackFrame>,
}

#[derive(Deserialize)]
struct RawStackTrace {
	frames: Vec<Value>,
}

impl TryFrom<RawStackTrace> for StackTrace {
	type Error = RavenError;

	fn try_from(raw: RawStackTrace) -> Result<Self> {
		Self::from_values(raw.frames)
	}
}

impl StackTrace {
	pub fn new(frames: impl IntoIterator<Item = StackFrame>) -> Self {
		Self {
			frames: frames.into_iter().collect(),
		}
	}

	/// Builds a stacktrace from loosely typed elements.
	///
	/// Fails on the first element that is neither a code frame nor a template
	/// frame.
	pub fn from_values(values: Vec<Value>) -> Result<Self> {
		let frames = values
			.into_iter()
			.enumerate()
			.map(|(index, value)| {
				serde_json::from_value::<StackFrame>(value).map_err(|_| {
					RavenError::InvalidArgument(format!(
						"stacktrace element {} is not a renderable frame",
						index
					))
				})
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(Self { frames })
	}

	pub fn frames(&self) -> &[StackFrame] {
		&self.frames
	}

	pub fn len(&self) -> usize {
		self.frames.len()
	}

	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}
