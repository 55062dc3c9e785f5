// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic and operational log lines go through message types in
//! [`messages`]. Each message is a small struct with a `Display` implementation for
//! the human-readable line and a [`messages::StructuredLog`] implementation that
//! attaches the same data as `tracing` fields.
//!
//! # Usage
//!
//! ```rust
//! use process_forge::observability::messages::generation::PhaseStarted;
//! use process_forge::observability::messages::StructuredLog;
//!
//! let msg = PhaseStarted {
//!     process_id: "order-processing",
//!     phase: "emit_workflow",
//!     percentage: 40,
//! };
//!
//! msg.log();
//! ```

pub mod messages;
