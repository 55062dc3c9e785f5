// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Generation request validation.
//!
//! A request is checked before any repository is touched. The checks follow a
//! two-stage pipeline and every problem found is reported, not just the first:
//!
//! 1. **Required fields**: `process_id`, `project.project_name` and
//!    `project.namespace` must be non-blank
//! 2. **Shape**: the project name is used verbatim as a directory and file name, so
//!    it must not contain path separators, be `.`/`..`, or carry surrounding
//!    whitespace; the namespace must be a dotted list of identifiers
//!
//! # Examples
//!
//! ```rust
//! use process_forge::config::{validate_request, GenerationRequest};
//!
//! let request = GenerationRequest::new("order-processing", "Orders", "Orders.Gen");
//! assert!(validate_request(&request).is_ok());
//!
//! let request = GenerationRequest::new("order-processing", "../Orders", "");
//! let problems = validate_request(&request).unwrap_err();
//! assert_eq!(problems.len(), 2);
//! ```

use crate::config::request::GenerationRequest;
use crate::errors::GenerationError;

/// Check a request, returning every problem found.
pub fn validate_request(request: &GenerationRequest) -> Result<(), Vec<String>> {
    let mut problems = required_fields(request);
    problems.extend(shape(request));

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

/// [`validate_request`] folded into a [`GenerationError::Configuration`].
pub fn check_request(request: &GenerationRequest) -> Result<(), GenerationError> {
    validate_request(request).map_err(|problems| GenerationError::Configuration(problems.join("; ")))
}

fn required_fields(request: &GenerationRequest) -> Vec<String> {
    let mut problems = Vec::new();
    if request.process_id.trim().is_empty() {
        problems.push("processId is required".to_string());
    }
    if request.project.project_name.trim().is_empty() {
        problems.push("project.projectName is required".to_string());
    }
    if request.project.namespace.trim().is_empty() {
        problems.push("project.namespace is required".to_string());
    }
    problems
}

fn shape(request: &GenerationRequest) -> Vec<String> {
    let mut problems = Vec::new();

    let name = request.project.project_name.as_str();
    if !name.trim().is_empty() && name.trim() != name {
        problems.push(format!(
            "project.projectName '{}' must not have leading or trailing whitespace",
            name
        ));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        problems.push(format!(
            "project.projectName '{}' must not contain path separators",
            request.project.project_name
        ));
    }

    let namespace = request.project.namespace.as_str();
    if !namespace.trim().is_empty() && !namespace.split('.').all(is_identifier) {
        problems.push(format!(
            "project.namespace '{}' is not a dotted list of identifiers",
            request.project.namespace
        ));
    }

    problems
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
