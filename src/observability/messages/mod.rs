// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `generation` - orchestrator phases, emitted files, run outcomes
//! * `interchange` - XML import and export events
//! * `validation` - graph diagnostics found by the validator

use tracing::Span;

pub mod generation;
pub mod interchange;
pub mod validation;

/// A message that knows how to log itself with structured fields.
pub trait StructuredLog {
    /// Emit the message at its designated level.
    fn log(&self);

    /// Create a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
