// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! # Code Emitter
//!
//! Turns a validated process plus a generation request into the files of a .NET
//! console project:
//!
//! ```text
//! <ProjectName>.csproj
//! Program.cs
//! Workflows/<ProcessName>Workflow.cs
//! Activities/<Name>Activity.cs        (one per activity)
//! Models/WorkflowContext.cs
//! Models/WorkflowResult.cs
//! appsettings.json
//! appsettings.Development.json
//! README.md                           (optional)
//! ```
//!
//! Templates live in `templates/*.j2` and are embedded at compile time. Each
//! emission phase is its own method on [`CodeEmitter`] so the orchestrator can report
//! progress and honor cancellation between phases; [`CodeEmitter::emit_all`] runs
//! them back to back.
//!
//! Output is a pure function of `(Process, GenerationRequest)`: no timestamps, no
//! random ids and no hash-map iteration order leak into the artifacts. The README,
//! when requested, is the one exception and carries its generation time.

mod emitter;
mod generated;
pub mod naming;
mod templates;

pub use emitter::{compose_source, CodeEmitter, ProjectModel};
pub use generated::GeneratedFile;
