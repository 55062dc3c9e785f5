// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! # Interchange Codec
//!
//! Reads and writes processes in a BPMN-flavoured XML dialect. The codec is a
//! standalone collaborator: the generation pipeline never calls it, but the CLI and
//! the settings loader use it to move processes in and out of repositories.
//!
//! ## Dialect
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL" ...>
//!   <process id="order-processing" name="Order Processing" version="1.0.0" isExecutable="true">
//!     <startevent id="start" name="开始"/>
//!     <usertask id="validate_order" name="Validate Order"/>
//!     <exclusiveGateway id="payment_ok" name="Payment OK?"/>
//!     <sequenceFlow id="flow_1" sourceRef="start" targetRef="validate_order"/>
//!   </process>
//! </definitions>
//! ```
//!
//! Exporting then importing preserves activity, gateway and flow counts, ids,
//! names, types and condition expressions. Timestamps are not part of the dialect.

mod export;
mod import;

pub use export::{activity_element_name, export_process, gateway_element_name};
pub use import::import_process;

use std::path::Path;

use crate::errors::InterchangeError;
use crate::model::Process;

/// Export `process` and write the XML to `path`.
pub async fn export_to_file(process: &Process, path: impl AsRef<Path>) -> Result<(), InterchangeError> {
    let xml = export_process(process)?;
    tokio::fs::write(path, xml).await?;
    Ok(())
}

/// Read `path` and import the process it contains.
pub async fn import_from_file(path: impl AsRef<Path>) -> Result<Process, InterchangeError> {
    let xml = tokio::fs::read_to_string(path).await?;
    import_process(&xml)
}
