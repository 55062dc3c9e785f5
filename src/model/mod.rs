// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Process graph model: activities, sequence flows and gateways owned by a `Process`.

mod elements;
mod process;
pub mod samples;

pub use elements::{activity_types, gateway_types, Activity, Gateway, SequenceFlow};
pub use process::Process;
