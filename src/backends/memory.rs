// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory repository adapters.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::config::consts::{
    BUILTIN_TEMPLATE_ID, CONSOLE_LOGGING_PACKAGE, DEPENDENCY_INJECTION_PACKAGE,
    EXTENSIONS_PACKAGE_VERSION,
};
use crate::config::request::{PackageDependency, ProjectTemplate};
use crate::errors::RepositoryError;
use crate::model::{samples, Process};
use crate::traits::{ProcessRepository, TemplateRepository};

/// Process storage backed by a `HashMap` behind an async `RwLock`.
///
/// # Examples
///
/// ```rust
/// use process_forge::backends::InMemoryProcessRepository;
/// use process_forge::traits::ProcessRepository;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// runtime.block_on(async {
///     let repository = InMemoryProcessRepository::with_samples();
///     let process = repository.get_by_id("order-processing").await.unwrap();
///     assert!(process.is_some());
/// });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryProcessRepository {
    processes: RwLock<HashMap<String, Process>>,
}

impl InMemoryProcessRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository holding the order processing sample.
    pub fn with_samples() -> Self {
        Self::from_processes(vec![samples::order_processing()])
    }

    /// A repository holding `processes`; a later process replaces an earlier one
    /// with the same id.
    pub fn from_processes(processes: impl IntoIterator<Item = Process>) -> Self {
        let map = processes
            .into_iter()
            .map(|process| (process.id().to_string(), process))
            .collect();
        Self {
            processes: RwLock::new(map),
        }
    }
}

#[async_trait]
impl ProcessRepository for InMemoryProcessRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Process>, RepositoryError> {
        Ok(self.processes.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Process>, RepositoryError> {
        let mut all: Vec<Process> = self.processes.read().await.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(all)
    }

    async fn add(&self, process: Process) -> Result<(), RepositoryError> {
        let mut processes = self.processes.write().await;
        if processes.contains_key(process.id()) {
            return Err(RepositoryError::AlreadyExists {
                id: process.id().to_string(),
            });
        }
        processes.insert(process.id().to_string(), process);
        Ok(())
    }

    async fn update(&self, process: Process) -> Result<(), RepositoryError> {
        let mut processes = self.processes.write().await;
        match processes.get_mut(process.id()) {
            Some(existing) => {
                *existing = process;
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                id: process.id().to_string(),
            }),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.processes
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })
    }
}

/// Template catalogue holding the built-in `console` template plus any extras.
#[derive(Debug)]
pub struct InMemoryTemplateRepository {
    templates: RwLock<HashMap<String, ProjectTemplate>>,
}

impl InMemoryTemplateRepository {
    /// Built-in templates only.
    pub fn new() -> Self {
        Self::with_templates(Vec::new())
    }

    /// Built-in templates plus `extra`; an extra template with a built-in id
    /// replaces the built-in one.
    pub fn with_templates(extra: impl IntoIterator<Item = ProjectTemplate>) -> Self {
        let mut templates: HashMap<String, ProjectTemplate> = builtin_templates()
            .into_iter()
            .map(|template| (template.id.clone(), template))
            .collect();
        for template in extra {
            templates.insert(template.id.clone(), template);
        }
        Self {
            templates: RwLock::new(templates),
        }
    }
}

impl Default for InMemoryTemplateRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn get_template(&self, id: &str) -> Result<Option<ProjectTemplate>, RepositoryError> {
        Ok(self.templates.read().await.get(id).cloned())
    }

    async fn list_templates(&self) -> Result<Vec<ProjectTemplate>, RepositoryError> {
        let mut all: Vec<ProjectTemplate> = self.templates.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}

fn builtin_templates() -> Vec<ProjectTemplate> {
    vec![ProjectTemplate {
        id: BUILTIN_TEMPLATE_ID.to_string(),
        name: "Console Application".to_string(),
        description: "Console host with dependency injection, console logging and JSON configuration"
            .to_string(),
        dependencies: vec![
            PackageDependency::new(DEPENDENCY_INJECTION_PACKAGE, EXTENSIONS_PACKAGE_VERSION),
            PackageDependency::new(CONSOLE_LOGGING_PACKAGE, EXTENSIONS_PACKAGE_VERSION),
            PackageDependency::new(
                "Microsoft.Extensions.Configuration.Json",
                EXTENSIONS_PACKAGE_VERSION,
            ),
        ],
    }]
}
