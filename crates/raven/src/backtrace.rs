// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Native backtrace snapshots for Rust errors.

use rustc_demangle::demangle;
use std::backtrace::Backtrace;

use crate::throwable::TraceEntry;

/// Capture the current backtrace as trace entries.
///
/// Leading frames from the runtime's unwinder and from this SDK's own capture
/// path are dropped, so the first entry is the code that reported the error.
pub fn capture_trace() -> Vec<TraceEntry> {
	let backtrace = Backtrace::force_capture();
	trim_capture_frames(parse_backtrace(&backtrace))
}

/// Flatten a backtrace into trace entries, innermost call first.
pub fn parse_backtrace(backtrace: &Backtrace) -> Vec<TraceEntry> {
	let bt_string = format!("{:#}", backtrace);
	parse_backtrace_string(&bt_string)
}

/// Drop the leading frames that belong to backtrace capture itself.
fn trim_capture_frames(entries: Vec<TraceEntry>) -> Vec<TraceEntry> {
	entries
		.into_iter()
		.skip_while(|entry| is_capture_frame(&entry.function))
		.collect()
}

/// Whether a frame is part of the runtime or of the SDK's capture path.
fn is_capture_frame(function: &str) -> bool {
	const CAPTURE_PREFIXES: &[&str] = &[
		"raven::backtrace::",
		"raven::throwable::",
		"raven::client::Client<",
		"<raven::",
	];

	!is_in_app_frame(function) || CAPTURE_PREFIXES.iter().any(|p| function.starts_with(p))
}

/// Determine if a frame is from application code rather than the standard
/// library or runtime.
fn is_in_app_frame(function: &str) -> bool {
	const SYSTEM_PREFIXES: &[&str] = &[
		"std::",
		"core::",
		"alloc::",
		"<std::",
		"<core::",
		"<alloc::",
		"backtrace::",
		"<backtrace::",
		"rust_begin_unwind",
		"__rust_",
		"_rust_",
	];

	const SYSTEM_CONTAINS: &[&str] = &["::backtrace_rs::", "::sys_common::", "::rt::"];

	!SYSTEM_PREFIXES.iter().any(|p| function.starts_with(p))
		&& !SYSTEM_CONTAINS.iter().any(|c| function.contains(c))
}

/// Parse rendered backtrace output.
///
/// Each frame is a `N: function` line optionally followed by an
/// `at file:line:column` line. Frames without a location are skipped.
fn parse_backtrace_string(bt_string: &str) -> Vec<TraceEntry> {
	let mut entries = Vec::new();
	let mut pending: Option<String> = None;

	for line in bt_string.lines() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		if let Some(location) = line.strip_prefix("at ") {
			// Inlined frames repeat the location line; only the first one counts.
			if let Some(function) = pending.take() {
				if let Some((file, lineno)) = parse_location(location) {
					entries.push(TraceEntry::new(file, lineno, function));
				}
			}
			continue;
		}

		if let Some(function) = parse_function_line(line) {
			pending = Some(function);
		}
	}

	entries
}

/// Parse a `N: function` line into a demangled function path.
fn parse_function_line(line: &str) -> Option<String> {
	let (prefix, rest) = line.split_once(':')?;
	prefix.trim().parse::<u32>().ok()?;

	let function = rest.trim();
	if function.is_empty() {
		return None;
	}

	Some(strip_hash(&format!("{:#}", demangle(function))).to_string())
}

/// Parse `file:line:column` (or `file:line`) into file and line.
fn parse_location(location: &str) -> Option<(String, u32)> {
	let mut parts = location.trim().rsplitn(3, ':');
	let last = parts.next()?;
	let middle = parts.next()?;

	match parts.next() {
		Some(file) => {
			let line = middle.parse().ok()?;
			Some((file.to_string(), line))
		}
		None => {
			let line = last.parse().ok()?;
			Some((middle.to_string(), line))
		}
	}
}

/// Drop a trailing `::h0123456789abcdef` symbol hash.
fn strip_hash(function: &str) -> &str {
	match function.rsplit_once("::h") {
		Some((path, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
			path
		}
		_ => function,
	}
}
