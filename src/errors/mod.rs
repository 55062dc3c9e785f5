// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod emission;
mod generation;
mod interchange;
mod repository;
mod sink;

pub use config::ConfigError;
pub use emission::EmissionError;
pub use generation::{GenerationError, GenerationStatus};
pub use interchange::InterchangeError;
pub use repository::RepositoryError;
pub use sink::SinkError;
