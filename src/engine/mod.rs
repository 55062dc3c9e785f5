// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! # Generation Engine
//!
//! [`GenerationOrchestrator`] turns a [`crate::config::GenerationRequest`] into a
//! [`GenerationResult`]: it checks the request, loads and validates the process,
//! optionally merges a named project template, and drives the
//! [`crate::codegen::CodeEmitter`] phase by phase while reporting progress and
//! honoring cancellation.
//!
//! ```text
//! request ─▶ validate ─▶ load_graph ─▶ [load_template] ─▶ emit phases ─▶ finalize ─▶ result
//!               5%          10%             15%             20%..98%        100%
//! ```

pub mod orchestrator;
pub mod result;

pub use orchestrator::GenerationOrchestrator;
pub use result::GenerationResult;
