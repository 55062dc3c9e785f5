// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for generation runs.
//!
//! This module contains message types for logging events related to:
//! * Run lifecycle (start, completion, failure, cancellation)
//! * Phase checkpoints
//! * Individual emitted files
//! * Persisting a generated project

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Generation run started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct GenerationStarted<'a> {
    pub process_id: &'a str,
    pub project_name: &'a str,
}

impl Display for GenerationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting generation of project '{}' from process '{}'",
            self.project_name, self.process_id
        )
    }
}

impl StructuredLog for GenerationStarted<'_> {
    fn log(&self) {
        tracing::info!(
            process_id = self.process_id,
            project_name = self.project_name,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "generation",
            span_name = name,
            process_id = self.process_id,
            project_name = self.project_name,
        )
    }
}

/// A generation phase is about to run.
///
/// # Log Level
/// `debug!` - Detailed progress
///
/// # Example
/// ```
/// use process_forge::observability::messages::generation::PhaseStarted;
///
/// let msg = PhaseStarted {
///     process_id: "order-processing",
///     phase: "emit_models",
///     percentage: 75,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct PhaseStarted<'a> {
    pub process_id: &'a str,
    pub phase: &'a str,
    pub percentage: u8,
}

impl Display for PhaseStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{:>3}%] {} ({})", self.percentage, self.phase, self.process_id)
    }
}

impl StructuredLog for PhaseStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            process_id = self.process_id,
            phase = self.phase,
            percentage = self.percentage,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "generation_phase",
            span_name = name,
            process_id = self.process_id,
            phase = self.phase,
        )
    }
}

/// One artifact was rendered.
///
/// # Log Level
/// `debug!` - Detailed progress
pub struct FileEmitted<'a> {
    pub path: &'a str,
    pub line_count: usize,
}

impl Display for FileEmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Emitted '{}' ({} lines)", self.path, self.line_count)
    }
}

impl StructuredLog for FileEmitted<'_> {
    fn log(&self) {
        tracing::debug!(path = self.path, line_count = self.line_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("file_emitted", span_name = name, path = self.path)
    }
}

/// Generation run completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
pub struct GenerationCompleted<'a> {
    pub process_id: &'a str,
    pub file_count: usize,
    pub total_lines: usize,
    pub duration: Duration,
}

impl Display for GenerationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Generated {} files ({} lines) from process '{}' in {:?}",
            self.file_count, self.total_lines, self.process_id, self.duration
        )
    }
}

impl StructuredLog for GenerationCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            process_id = self.process_id,
            file_count = self.file_count,
            total_lines = self.total_lines,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "generation_completed",
            span_name = name,
            process_id = self.process_id,
            file_count = self.file_count,
            duration = ?self.duration,
        )
    }
}

/// Generation run stopped with an error.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct GenerationFailed<'a> {
    pub process_id: &'a str,
    pub status: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for GenerationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Generation from process '{}' failed ({}): {}",
            self.process_id, self.status, self.error
        )
    }
}

impl StructuredLog for GenerationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            process_id = self.process_id,
            status = self.status,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "generation_failed",
            span_name = name,
            process_id = self.process_id,
            status = self.status,
        )
    }
}

/// Generation run was cancelled between phases.
///
/// # Log Level
/// `warn!` - Caller-initiated stop
pub struct GenerationCancelled<'a> {
    pub process_id: &'a str,
    pub phase: &'a str,
}

impl Display for GenerationCancelled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Generation from process '{}' cancelled before phase '{}'",
            self.process_id, self.phase
        )
    }
}

impl StructuredLog for GenerationCancelled<'_> {
    fn log(&self) {
        tracing::warn!(process_id = self.process_id, phase = self.phase, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "generation_cancelled",
            span_name = name,
            process_id = self.process_id,
            phase = self.phase,
        )
    }
}

/// Generated files were written to disk.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ProjectWritten<'a> {
    pub project_path: &'a str,
    pub file_count: usize,
}

impl Display for ProjectWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Wrote {} files to '{}'", self.file_count, self.project_path)
    }
}

impl StructuredLog for ProjectWritten<'_> {
    fn log(&self) {
        tracing::info!(
            project_path = self.project_path,
            file_count = self.file_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "project_written",
            span_name = name,
            project_path = self.project_path,
        )
    }
}

/// A progress checkpoint was reported to a logging progress sink.
///
/// # Log Level
/// `info!` - User-facing progress
pub struct ProgressReported<'a> {
    pub percentage: u8,
    pub message: &'a str,
    pub current_file: Option<&'a str>,
}

impl Display for ProgressReported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.current_file {
            Some(file) => write!(f, "[{:>3}%] {} ({})", self.percentage, self.message, file),
            None => write!(f, "[{:>3}%] {}", self.percentage, self.message),
        }
    }
}

impl StructuredLog for ProgressReported<'_> {
    fn log(&self) {
        tracing::info!(
            percentage = self.percentage,
            current_file = self.current_file,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("progress", span_name = name, percentage = self.percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_started_display() {
        let msg = PhaseStarted {
            process_id: "p1",
            phase: "validate",
            percentage: 5,
        };
        assert_eq!(msg.to_string(), "[  5%] validate (p1)");
    }

    #[test]
    fn test_generation_failed_display() {
        let error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let msg = GenerationFailed {
            process_id: "p1",
            status: "failed",
            error: &error,
        };
        assert_eq!(msg.to_string(), "Generation from process 'p1' failed (failed): boom");
    }

    #[test]
    fn test_progress_reported_display() {
        let msg = ProgressReported {
            percentage: 55,
            message: "Emitting activities",
            current_file: Some("Activities/ShipOrderActivity.cs"),
        };
        assert_eq!(
            msg.to_string(),
            "[ 55%] Emitting activities (Activities/ShipOrderActivity.cs)"
        );
    }
}
