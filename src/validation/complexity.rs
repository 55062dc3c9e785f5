// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Complexity metrics for a process graph.
//!
//! `cyclomatic_complexity` follows McCabe: `M = E - N + 2P`, with `E` the number of
//! sequence flows, `N` activities plus gateways and `P` (connected components) fixed
//! at 1. `path_count` assumes every gateway is a binary exclusive split, so it is
//! `2^gateways` regardless of gateway type.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::model::Process;
use crate::observability::messages::validation::ComplexityAnalyzed;
use crate::observability::messages::StructuredLog;

/// Connected components assumed by the metric.
const COMPONENTS: i64 = 1;
const LOW_THRESHOLD: i64 = 10;
const MEDIUM_THRESHOLD: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

impl ComplexityLevel {
    pub fn from_cyclomatic(value: i64) -> Self {
        if value <= LOW_THRESHOLD {
            ComplexityLevel::Low
        } else if value <= MEDIUM_THRESHOLD {
            ComplexityLevel::Medium
        } else {
            ComplexityLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "Low",
            ComplexityLevel::Medium => "Medium",
            ComplexityLevel::High => "High",
        }
    }
}

impl Display for ComplexityLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    pub activity_count: usize,
    pub gateway_count: usize,
    pub flow_count: usize,
    /// `2^gateway_count`, saturating at `u64::MAX`.
    pub path_count: u64,
    /// Signed: a sparse graph can come out negative.
    pub cyclomatic_complexity: i64,
    pub level: ComplexityLevel,
}

/// Compute the complexity metrics of a process.
pub fn analyze_complexity(process: &Process) -> ComplexityReport {
    let activity_count = process.activities().len();
    let gateway_count = process.gateways().len();
    let flow_count = process.sequence_flows().len();

    let cyclomatic_complexity =
        cyclomatic(flow_count, activity_count + gateway_count, COMPONENTS);
    let level = ComplexityLevel::from_cyclomatic(cyclomatic_complexity);

    ComplexityAnalyzed {
        process_id: process.id(),
        cyclomatic_complexity,
        level: level.as_str(),
    }
    .log();

    ComplexityReport {
        activity_count,
        gateway_count,
        flow_count,
        path_count: path_count(gateway_count),
        cyclomatic_complexity,
        level,
    }
}

fn cyclomatic(edges: usize, nodes: usize, components: i64) -> i64 {
    edges as i64 - nodes as i64 + 2 * components
}

fn path_count(gateways: usize) -> u64 {
    u32::try_from(gateways)
        .ok()
        .and_then(|shift| 1u64.checked_shl(shift))
        .unwrap_or(u64::MAX)
}
