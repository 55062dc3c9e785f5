// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the interchange XML codec.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A process was exported to XML.
///
/// # Log Level
/// `debug!`
pub struct ProcessExported<'a> {
    pub process_id: &'a str,
    pub size: usize,
}

impl Display for ProcessExported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Exported process '{}' ({} bytes)", self.process_id, self.size)
    }
}

impl StructuredLog for ProcessExported<'_> {
    fn log(&self) {
        tracing::debug!(process_id = self.process_id, size = self.size, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("process_export", span_name = name, process_id = self.process_id)
    }
}

/// A process was imported from XML.
///
/// # Log Level
/// `info!`
pub struct ProcessImported<'a> {
    pub process_id: &'a str,
    pub activity_count: usize,
    pub gateway_count: usize,
    pub flow_count: usize,
}

impl Display for ProcessImported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Imported process '{}': {} activities, {} gateways, {} flows",
            self.process_id, self.activity_count, self.gateway_count, self.flow_count
        )
    }
}

impl StructuredLog for ProcessImported<'_> {
    fn log(&self) {
        tracing::info!(
            process_id = self.process_id,
            activity_count = self.activity_count,
            gateway_count = self.gateway_count,
            flow_count = self.flow_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("process_import", span_name = name, process_id = self.process_id)
    }
}

/// An element inside `<process>` was skipped because its name maps to nothing.
///
/// # Log Level
/// `trace!`
pub struct ElementSkipped<'a> {
    pub local_name: &'a str,
}

impl Display for ElementSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping unsupported element <{}>", self.local_name)
    }
}

impl StructuredLog for ElementSkipped<'_> {
    fn log(&self) {
        tracing::trace!(local_name = self.local_name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("element_skipped", span_name = name, local_name = self.local_name)
    }
}
