// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of a process graph.
//!
//! Validation is a pure function from a [`Process`] to a [`ValidationReport`]. It
//! never halts anything by itself: callers decide whether errors block them (the
//! generation orchestrator does; a pre-flight check in an editor does not).
//!
//! # Rules
//!
//! Rules run in a fixed order and all of them are evaluated on every call:
//!
//! 1. **Start event**: no `StartEvent` is an error, more than one is a warning.
//! 2. **End event**: no `EndEvent` is an error.
//! 3. **Connectivity**: every activity other than start and end events should have at
//!    least one incoming and one outgoing flow; a missing side is a warning.
//! 4. **Dead end**: every activity other than an end event must have an outgoing
//!    flow; a missing one is an error.
//!
//! Rules 3 and 4 overlap on purpose: an intermediate activity without an outgoing
//! flow yields both a `NO_OUTGOING_FLOW` warning and a `DEADLOCK_DETECTED` error
//! carrying the same activity id.
//!
//! The checks are local to each activity. No transitive reachability from the start
//! event to the end event is computed, so a disconnected island whose every node has
//! an incoming and an outgoing flow passes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::model::Process;
use crate::observability::messages::validation::{
    ProcessValidated, ValidationErrorFound, ValidationWarningFound,
};
use crate::observability::messages::StructuredLog;

/// Machine-readable validation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    NoStartEvent,
    MultipleStartEvents,
    NoEndEvent,
    NoIncomingFlow,
    NoOutgoingFlow,
    DeadlockDetected,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::NoStartEvent => "NO_START_EVENT",
            ValidationCode::MultipleStartEvents => "MULTIPLE_START_EVENTS",
            ValidationCode::NoEndEvent => "NO_END_EVENT",
            ValidationCode::NoIncomingFlow => "NO_INCOMING_FLOW",
            ValidationCode::NoOutgoingFlow => "NO_OUTGOING_FLOW",
            ValidationCode::DeadlockDetected => "DEADLOCK_DETECTED",
        }
    }
}

impl Display for ValidationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding of the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub code: ValidationCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

impl ValidationIssue {
    pub fn new(code: ValidationCode, message: impl Into<String>, element_id: Option<String>) -> Self {
        Self {
            code,
            message: message.into(),
            element_id,
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.element_id {
            Some(id) => write!(f, "{} ({}): {}", self.code, id, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Result of validating one process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Errors and warnings carrying a given element id.
    pub fn issues_for<'a>(&'a self, element_id: &'a str) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(move |issue| issue.element_id.as_deref() == Some(element_id))
    }

    fn error(&mut self, code: ValidationCode, message: String, element_id: Option<String>) {
        self.errors.push(ValidationIssue::new(code, message, element_id));
    }

    fn warning(&mut self, code: ValidationCode, message: String, element_id: Option<String>) {
        self.warnings.push(ValidationIssue::new(code, message, element_id));
    }
}

/// Validate a process graph and report every error and warning found.
///
/// # Examples
///
/// ```rust
/// use process_forge::model::{Process, SequenceFlow};
/// use process_forge::validation::validate_process;
///
/// let mut process = Process::create("Minimal", "");
/// process.add_sequence_flow(SequenceFlow::new("f1", "start", "end"));
///
/// let report = validate_process(&process);
/// assert!(report.is_valid);
/// assert!(report.errors.is_empty());
/// ```
pub fn validate_process(process: &Process) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_start_events(process, &mut report);
    check_end_events(process, &mut report);
    check_connectivity(process, &mut report);
    check_dead_ends(process, &mut report);

    report.is_valid = report.errors.is_empty();
    log_report(process.id(), &report);
    report
}

fn check_start_events(process: &Process, report: &mut ValidationReport) {
    let count = process
        .activities()
        .iter()
        .filter(|a| a.is_start_event())
        .count();

    if count == 0 {
        report.error(
            ValidationCode::NoStartEvent,
            "Process has no start event".to_string(),
            None,
        );
    } else if count > 1 {
        report.warning(
            ValidationCode::MultipleStartEvents,
            format!("Process has {} start events", count),
            None,
        );
    }
}

fn check_end_events(process: &Process, report: &mut ValidationReport) {
    if !process.activities().iter().any(|a| a.is_end_event()) {
        report.error(
            ValidationCode::NoEndEvent,
            "Process has no end event".to_string(),
            None,
        );
    }
}

fn check_connectivity(process: &Process, report: &mut ValidationReport) {
    let (sources, targets) = flow_endpoints(process);

    for activity in process.activities() {
        if activity.is_start_event() || activity.is_end_event() {
            continue;
        }
        if !targets.contains(activity.id.as_str()) {
            report.warning(
                ValidationCode::NoIncomingFlow,
                format!("Activity '{}' has no incoming flow", activity.name),
                Some(activity.id.clone()),
            );
        }
        if !sources.contains(activity.id.as_str()) {
            report.warning(
                ValidationCode::NoOutgoingFlow,
                format!("Activity '{}' has no outgoing flow", activity.name),
                Some(activity.id.clone()),
            );
        }
    }
}

fn check_dead_ends(process: &Process, report: &mut ValidationReport) {
    let (sources, _) = flow_endpoints(process);

    for activity in process.activities() {
        if activity.is_end_event() {
            continue;
        }
        if !sources.contains(activity.id.as_str()) {
            report.error(
                ValidationCode::DeadlockDetected,
                format!(
                    "Activity '{}' is a dead end: execution cannot continue past it",
                    activity.name
                ),
                Some(activity.id.clone()),
            );
        }
    }
}

/// Ids used as flow sources and as flow targets.
fn flow_endpoints(process: &Process) -> (HashSet<&str>, HashSet<&str>) {
    let sources = process
        .sequence_flows()
        .iter()
        .map(|f| f.source_ref.as_str())
        .collect();
    let targets = process
        .sequence_flows()
        .iter()
        .map(|f| f.target_ref.as_str())
        .collect();
    (sources, targets)
}

fn log_report(process_id: &str, report: &ValidationReport) {
    for issue in &report.errors {
        ValidationErrorFound {
            process_id,
            code: issue.code.as_str(),
            element_id: issue.element_id.as_deref(),
            message: &issue.message,
        }
        .log();
    }
    for issue in &report.warnings {
        ValidationWarningFound {
            process_id,
            code: issue.code.as_str(),
            element_id: issue.element_id.as_deref(),
            message: &issue.message,
        }
        .log();
    }
    ProcessValidated {
        process_id,
        error_count: report.errors.len(),
        warning_count: report.warnings.len(),
    }
    .log();
}
