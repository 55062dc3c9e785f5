// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Seams between the generation pipeline and its collaborators.
//!
//! The orchestrator only ever sees these traits; concrete adapters live in
//! [`crate::backends`].

pub mod repository;
pub mod sink;

pub use repository::{ProcessRepository, TemplateRepository};
pub use sink::{GenerationProgress, ProgressSink, ProjectFileSink};
