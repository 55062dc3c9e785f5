// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::request::ProjectTemplate;
use crate::errors::RepositoryError;
use crate::model::Process;

/// Storage for process graphs.
///
/// `get_by_id` returns `Ok(None)` for an unknown id; only `update` and `delete`
/// treat a missing process as an error.
#[async_trait]
pub trait ProcessRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<Process>, RepositoryError>;

    /// Every stored process, oldest first.
    async fn get_all(&self) -> Result<Vec<Process>, RepositoryError>;

    async fn add(&self, process: Process) -> Result<(), RepositoryError>;

    async fn update(&self, process: Process) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// Read-only catalogue of named project templates.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn get_template(&self, id: &str) -> Result<Option<ProjectTemplate>, RepositoryError>;

    /// Every template, ordered by id.
    async fn list_templates(&self) -> Result<Vec<ProjectTemplate>, RepositoryError>;
}
