// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source context for frames.

use std::fs;

use raven_core::{Frame, RavenError};
use tracing::debug;

/// Lines of context collected on each side of the frame line.
pub const CONTEXT_LINES: usize = 5;

/// Reads the source lines around a frame's line from disk.
///
/// Files are re-read for every frame; sources may change between captures
/// during development.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceContextReader;

impl SourceContextReader {
	pub fn new() -> Self {
		Self
	}

	/// Attach `context_line`, `pre_context` and `post_context` to a frame.
	///
	/// A file that cannot be read leaves the frame unchanged. A line outside
	/// the file is an error.
	pub fn attach_context(&self, mut frame: Frame) -> Result<Frame, RavenError> {
		let bytes = match fs::read(&frame.file) {
			Ok(bytes) => bytes,
			Err(e) => {
				debug!(file = %frame.file, error = %e, "Source not readable, skipping context");
				return Ok(frame);
			}
		};
		let source = String::from_utf8_lossy(&bytes);
		let (pre_context, context_line, post_context) =
			extract_context(&source, &frame.file, frame.line)?;

		frame.context_line = Some(context_line);
		frame.pre_context = Some(pre_context);
		frame.post_context = Some(post_context);
		Ok(frame)
	}
}

/// Slice the lines around a 1-based `line`.
///
/// Returns (pre_context, context_line, post_context).
pub fn extract_context(
	source: &str,
	file: &str,
	line: u32,
) -> Result<(Vec<String>, String, Vec<String>), RavenError> {
	let lines: Vec<&str> = source.lines().collect();
	let out_of_range = || RavenError::IndexOutOfRange {
		file: file.to_string(),
		line,
		line_count: lines.len(),
	};

	let idx = (line as usize).checked_sub(1).ok_or_else(out_of_range)?;
	if idx >= lines.len() {
		return Err(out_of_range());
	}

	let context_line = lines[idx].to_string();

	let pre_start = idx.saturating_sub(CONTEXT_LINES);
	let pre_context = lines[pre_start..idx].iter().map(|s| s.to_string()).collect();

	let post_end = (idx + 1 + CONTEXT_LINES).min(lines.len());
	let post_context = lines[idx + 1..post_end]
		.iter()
		.map(|s| s.to_string())
		.collect();

	Ok((pre_context, context_line, post_context))
}
