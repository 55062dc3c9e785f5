// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{EmissionError, RepositoryError, SinkError};
use crate::validation::ValidationIssue;

/// Everything that can stop a generation run.
///
/// The orchestrator never returns this to callers directly; it is folded into a
/// [`crate::engine::GenerationResult`] whose `status` is derived via [`GenerationError::status`].
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The request is missing a project name, namespace or process id.
    #[error("Invalid generation request: {0}")]
    Configuration(String),

    #[error("process not found: '{process_id}'")]
    ProcessNotFound { process_id: String },

    #[error("template not found: '{template_id}'")]
    TemplateNotFound { template_id: String },

    /// The process graph has validation errors.
    #[error("Process validation failed: {}", join_issues(.errors))]
    ValidationFailed { errors: Vec<ValidationIssue> },

    #[error("Generation cancelled")]
    Cancelled,

    /// Artifact construction failed after emission started.
    #[error(transparent)]
    Emission(#[from] EmissionError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Writing the finished project failed.
    #[error("Failed to write project: {0}")]
    Sink(#[from] SinkError),
}

impl GenerationError {
    pub fn status(&self) -> GenerationStatus {
        match self {
            GenerationError::Configuration(_) => GenerationStatus::InvalidConfiguration,
            GenerationError::ProcessNotFound { .. } | GenerationError::TemplateNotFound { .. } => {
                GenerationStatus::NotFound
            }
            GenerationError::ValidationFailed { .. } => GenerationStatus::ValidationFailed,
            GenerationError::Cancelled => GenerationStatus::Cancelled,
            GenerationError::Emission(_)
            | GenerationError::Repository(_)
            | GenerationError::Sink(_) => GenerationStatus::Failed,
        }
    }
}

/// Outcome class of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Succeeded,
    InvalidConfiguration,
    NotFound,
    ValidationFailed,
    Cancelled,
    Failed,
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GenerationError::Configuration("x".into()).status(),
            GenerationStatus::InvalidConfiguration
        );
        assert_eq!(
            GenerationError::ProcessNotFound { process_id: "p".into() }.status(),
            GenerationStatus::NotFound
        );
        assert_eq!(GenerationError::Cancelled.status(), GenerationStatus::Cancelled);
        assert_eq!(
            GenerationError::Repository(RepositoryError::NotFound { id: "p".into() }).status(),
            GenerationStatus::Failed
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = GenerationError::ProcessNotFound { process_id: "missing".into() };
        assert!(err.to_string().starts_with("process not found"));
    }

    #[test]
    fn test_validation_failed_lists_codes() {
        let err = GenerationError::ValidationFailed {
            errors: vec![
                ValidationIssue::new(ValidationCode::NoStartEvent, "no start", None),
                ValidationIssue::new(
                    ValidationCode::DeadlockDetected,
                    "dead end",
                    Some("task_1".to_string()),
                ),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("NO_START_EVENT"));
        assert!(message.contains("DEADLOCK_DETECTED"));
        assert!(message.contains("task_1"));
    }
}
