// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation of an exception and its causes into an [`ExceptionChain`].

use raven_core::{ExceptionChain, RavenError, Result, SingleException};
use tracing::debug;

use crate::stacktrace::StackTraceTranslator;
use crate::throwable::Throwable;

/// Walks the cause chain of an exception.
#[derive(Debug, Clone, Default)]
pub struct ExceptionChainTranslator {
	stacktraces: StackTraceTranslator,
}

impl ExceptionChainTranslator {
	pub fn new(stacktraces: StackTraceTranslator) -> Self {
		Self { stacktraces }
	}

	/// Returns the chain ordered deepest cause first, the given exception last.
	///
	/// Fails with [`RavenError::CyclicCauseChain`] if a cause refers back to an
	/// exception already in the chain.
	pub fn translate(&self, exception: &dyn Throwable) -> Result<ExceptionChain> {
		let mut exceptions = Vec::new();
		// Compared as wide pointers: a cause stored inline in its parent can
		// share the parent's address but not its vtable.
		let mut visited: Vec<*const (dyn Throwable + '_)> = Vec::new();
		let mut current = Some(exception);

		while let Some(e) = current {
			let this = std::ptr::from_ref(e);
			if visited.iter().any(|&seen| std::ptr::eq(seen, this)) {
				return Err(RavenError::CyclicCauseChain {
					kind: e.kind().to_string(),
				});
			}

			exceptions.push(SingleException::new(
				e.message(),
				e.kind(),
				e.file(),
				e.line(),
				self.stacktraces.translate(e),
			));
			visited.push(this);
			current = e.cause();
		}

		exceptions.reverse();
		debug!(links = exceptions.len(), "Translated exception chain");
		ExceptionChain::new(exceptions)
	}
}
