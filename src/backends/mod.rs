// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Adapters for the collaborator traits in [`crate::traits`].
//!
//! # Available Backends
//!
//! ## In-memory repositories
//! - **InMemoryProcessRepository**: `HashMap` behind a tokio `RwLock`; optionally
//!   seeded with the order processing sample
//! - **InMemoryTemplateRepository**: the built-in `console` template plus templates
//!   declared in settings
//!
//! ## File system sink
//! - **FileSystemSink**: writes a generated project below a root directory, refusing
//!   absolute paths and `..` segments
//!
//! ## Progress sinks
//! - **NoopProgress**: discards checkpoints
//! - **ChannelProgress**: forwards checkpoints over an unbounded tokio channel
//! - **TracingProgress**: logs checkpoints
//!
//! ## Stub Backend (Test-Only)
//! - **FailingRepository**: every lookup fails
//! - **CancelAtProgress**: cancels a token once a checkpoint is reached
//!
//! # Examples
//!
//! ```rust
//! use process_forge::backends::{InMemoryProcessRepository, InMemoryTemplateRepository};
//! use process_forge::engine::GenerationOrchestrator;
//! use std::sync::Arc;
//!
//! let orchestrator = GenerationOrchestrator::new(
//!     Arc::new(InMemoryProcessRepository::with_samples()),
//!     Arc::new(InMemoryTemplateRepository::new()),
//! );
//! # let _ = orchestrator;
//! ```

pub mod filesystem;
pub mod memory;
pub mod progress;

#[cfg(test)]
pub mod stub;

pub use filesystem::FileSystemSink;
pub use memory::{InMemoryProcessRepository, InMemoryTemplateRepository};
pub use progress::{ChannelProgress, NoopProgress, TracingProgress};
