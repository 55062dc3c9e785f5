// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;     // repositories, sinks, progress
pub mod codegen;      // template-driven .NET emitter
pub mod config;       // requests + settings
pub mod engine;       // generation orchestrator
pub mod errors;       // error handling
pub mod interchange;  // BPMN-style XML codec
pub mod model;        // process graph
pub mod observability;
pub mod traits;       // collaborator seams
pub mod validation;   // structural rules + complexity
