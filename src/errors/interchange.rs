// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::config::consts::BPMN_MODEL_NAMESPACE;

/// Errors raised by the interchange XML codec.
#[derive(Error, Debug)]
pub enum InterchangeError {
    /// The document is not well-formed XML; wraps the parser message.
    #[error("Failed to parse process XML: {0}")]
    Parse(String),

    /// The document has no `<process>` element in the model namespace.
    #[error("No <process> element found in namespace '{}'", BPMN_MODEL_NAMESPACE)]
    MissingProcess,

    /// The XML writer rejected an event.
    #[error("Failed to write process XML: {0}")]
    Write(String),

    /// Reading or writing an interchange file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
