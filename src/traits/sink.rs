// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::codegen::GeneratedFile;
use crate::errors::SinkError;

/// Destination for the files of a generated project.
#[async_trait]
pub trait ProjectFileSink: Send + Sync {
    /// Persist `files` under `project_path` and return where they ended up.
    async fn write_project(&self, project_path: &Path, files: &[GeneratedFile]) -> Result<PathBuf, SinkError>;
}

/// One progress checkpoint of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationProgress {
    /// 0..=100, non-decreasing within a run.
    pub percentage: u8,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_file: Option<String>,
}

impl GenerationProgress {
    pub fn new(percentage: u8, message: impl Into<String>) -> Self {
        Self {
            percentage,
            message: message.into(),
            current_file: None,
        }
    }

    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.current_file = Some(path.into());
        self
    }
}

/// Receiver of progress checkpoints.
///
/// Reporting is fire-and-forget: a sink must not block the run and has no way to
/// fail it.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: GenerationProgress);
}
