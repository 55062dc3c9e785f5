// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::config::request::ProjectTemplate;
use crate::errors::RepositoryError;
use crate::model::Process;
use crate::traits::{GenerationProgress, ProcessRepository, ProgressSink, TemplateRepository};

/// A repository whose every call fails, for error-path tests.
pub struct FailingRepository;

#[async_trait]
impl ProcessRepository for FailingRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Process>, RepositoryError> {
        Err(RepositoryError::NotFound { id: id.to_string() })
    }

    async fn get_all(&self) -> Result<Vec<Process>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn add(&self, process: Process) -> Result<(), RepositoryError> {
        Err(RepositoryError::AlreadyExists {
            id: process.id().to_string(),
        })
    }

    async fn update(&self, process: Process) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound {
            id: process.id().to_string(),
        })
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound { id: id.to_string() })
    }
}

#[async_trait]
impl TemplateRepository for FailingRepository {
    async fn get_template(&self, id: &str) -> Result<Option<ProjectTemplate>, RepositoryError> {
        Err(RepositoryError::NotFound { id: id.to_string() })
    }

    async fn list_templates(&self) -> Result<Vec<ProjectTemplate>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Records every checkpoint and cancels a token once a threshold is reached.
pub struct CancelAtProgress {
    threshold: u8,
    token: CancellationToken,
    seen: Mutex<Vec<u8>>,
}

impl CancelAtProgress {
    pub fn new(threshold: u8, token: CancellationToken) -> Self {
        Self {
            threshold,
            token,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<u8> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

impl ProgressSink for CancelAtProgress {
    fn report(&self, progress: GenerationProgress) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(progress.percentage);
        }
        if progress.percentage >= self.threshold {
            self.token.cancel();
        }
    }
}
