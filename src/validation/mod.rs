// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Graph validation and complexity analysis.

mod complexity;
mod rules;

pub use complexity::{analyze_complexity, ComplexityLevel, ComplexityReport};
pub use rules::{validate_process, ValidationCode, ValidationIssue, ValidationReport};
