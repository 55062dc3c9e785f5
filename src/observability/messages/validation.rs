// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for process graph validation.
//!
//! This module contains message types for logging events related to:
//! * Individual validation issues (errors and warnings)
//! * Validation summaries
//! * Complexity analysis

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A validation error was found.
///
/// # Log Level
/// `error!` - Blocks generation
///
/// # Example
/// ```
/// use process_forge::observability::messages::validation::ValidationErrorFound;
///
/// let msg = ValidationErrorFound {
///     process_id: "order-processing",
///     code: "DEADLOCK_DETECTED",
///     element_id: Some("ship_order"),
///     message: "Activity 'Ship Order' has no outgoing flow",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ValidationErrorFound<'a> {
    pub process_id: &'a str,
    pub code: &'a str,
    pub element_id: Option<&'a str>,
    pub message: &'a str,
}

impl Display for ValidationErrorFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl StructuredLog for ValidationErrorFound<'_> {
    fn log(&self) {
        tracing::error!(
            process_id = self.process_id,
            code = self.code,
            element_id = self.element_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "validation_error",
            name = name,
            process_id = self.process_id,
            code = self.code,
        )
    }
}

/// A validation warning was found.
///
/// # Log Level
/// `warn!` - Non-fatal, shown to the user
pub struct ValidationWarningFound<'a> {
    pub process_id: &'a str,
    pub code: &'a str,
    pub element_id: Option<&'a str>,
    pub message: &'a str,
}

impl Display for ValidationWarningFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl StructuredLog for ValidationWarningFound<'_> {
    fn log(&self) {
        tracing::warn!(
            process_id = self.process_id,
            code = self.code,
            element_id = self.element_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "validation_warning",
            name = name,
            process_id = self.process_id,
            code = self.code,
        )
    }
}

/// Validation of a process finished.
///
/// # Log Level
/// `debug!` - Summary of a pre-flight check
pub struct ProcessValidated<'a> {
    pub process_id: &'a str,
    pub error_count: usize,
    pub warning_count: usize,
}

impl Display for ProcessValidated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validated process '{}': {} errors, {} warnings",
            self.process_id, self.error_count, self.warning_count
        )
    }
}

impl StructuredLog for ProcessValidated<'_> {
    fn log(&self) {
        tracing::debug!(
            process_id = self.process_id,
            error_count = self.error_count,
            warning_count = self.warning_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("process_validated", span_name = name, process_id = self.process_id)
    }
}

/// Complexity metrics computed.
///
/// # Log Level
/// `debug!` - Informational metric
pub struct ComplexityAnalyzed<'a> {
    pub process_id: &'a str,
    pub cyclomatic_complexity: i64,
    pub level: &'a str,
}

impl Display for ComplexityAnalyzed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Process '{}' cyclomatic complexity {} ({})",
            self.process_id, self.cyclomatic_complexity, self.level
        )
    }
}

impl StructuredLog for ComplexityAnalyzed<'_> {
    fn log(&self) {
        tracing::debug!(
            process_id = self.process_id,
            cyclomatic_complexity = self.cyclomatic_complexity,
            level = self.level,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("complexity", span_name = name, process_id = self.process_id)
    }
}
