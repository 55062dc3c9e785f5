// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::codegen::{CodeEmitter, GeneratedFile, ProjectModel};
use crate::config::request::{GenerationRequest, ProjectTemplate};
use crate::config::check_request;
use crate::engine::result::GenerationResult;
use crate::errors::GenerationError;
use crate::model::Process;
use crate::observability::messages::generation::{
    FileEmitted, GenerationCancelled, GenerationCompleted, GenerationFailed, GenerationStarted,
    PhaseStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{GenerationProgress, ProcessRepository, ProgressSink, ProjectFileSink, TemplateRepository};
use crate::validation::{validate_process, ValidationIssue};

/// Drives one generation run from request to files.
///
/// The orchestrator holds no per-request state; concurrent calls to
/// [`generate`](Self::generate) are independent.
///
/// # Phases
///
/// | Phase              | Progress    | Work                                          |
/// |--------------------|-------------|-----------------------------------------------|
/// | validate           | 5           | request configuration check                   |
/// | load_graph         | 10          | repository lookup and graph validation        |
/// | load_template      | 15          | named template lookup (only with a template)  |
/// | project_descriptor | 20          | `<ProjectName>.csproj`                        |
/// | program            | 30          | `Program.cs`                                  |
/// | workflow           | 40          | `Workflows/<ProcessName>Workflow.cs`          |
/// | activities         | 55 to <70   | one checkpoint per activity                   |
/// | models             | 75, 85      | `WorkflowContext.cs`, `WorkflowResult.cs`     |
/// | configuration      | 90, 95      | `appsettings.json`, `appsettings.Development.json` |
/// | readme             | 98          | `README.md` (only when enabled)               |
/// | finalize           | 100         | hand files to the sink, if one is attached    |
///
/// Each checkpoint is reported before its work starts, and cancellation is checked
/// just before each report.
///
/// # Examples
///
/// ```rust
/// use process_forge::backends::{InMemoryProcessRepository, InMemoryTemplateRepository, NoopProgress};
/// use process_forge::config::GenerationRequest;
/// use process_forge::engine::GenerationOrchestrator;
/// use process_forge::errors::GenerationStatus;
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main]
/// # async fn main() {
/// let orchestrator = GenerationOrchestrator::new(
///     Arc::new(InMemoryProcessRepository::with_samples()),
///     Arc::new(InMemoryTemplateRepository::new()),
/// );
/// let request = GenerationRequest::new("order-processing", "Orders", "Orders.Gen");
///
/// let result = orchestrator
///     .generate(&request, &NoopProgress, &CancellationToken::new())
///     .await;
///
/// assert_eq!(result.status, GenerationStatus::Succeeded);
/// assert!(result.file("Orders.csproj").is_some());
/// # }
/// ```
pub struct GenerationOrchestrator {
    processes: Arc<dyn ProcessRepository>,
    templates: Arc<dyn TemplateRepository>,
    sink: Option<Arc<dyn ProjectFileSink>>,
    emitter: CodeEmitter,
}

impl GenerationOrchestrator {
    pub fn new(processes: Arc<dyn ProcessRepository>, templates: Arc<dyn TemplateRepository>) -> Self {
        Self {
            processes,
            templates,
            sink: None,
            emitter: CodeEmitter::new(),
        }
    }

    /// Write every successful run's files through `sink` during the finalize phase.
    pub fn with_sink(mut self, sink: Arc<dyn ProjectFileSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run the whole pipeline for `request`.
    ///
    /// Never returns an error: every failure is folded into the result's `status`
    /// and `error`, with files emitted before the failure kept in `files`.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> GenerationResult {
        let started = Instant::now();
        GenerationStarted {
            process_id: &request.process_id,
            project_name: &request.project.project_name,
        }
        .log();

        let checkpoints = Checkpoints {
            process_id: &request.process_id,
            progress,
            cancel,
        };
        let mut run = RunState::default();
        let outcome = self.run(request, &checkpoints, &mut run).await;
        let duration = started.elapsed();

        match outcome {
            Ok(project_path) => {
                let result = GenerationResult::succeeded(run.files, duration, project_path, run.warnings);
                GenerationCompleted {
                    process_id: &request.process_id,
                    file_count: result.files.len(),
                    total_lines: result.total_lines,
                    duration,
                }
                .log();
                result
            }
            Err(error) => {
                if !matches!(error, GenerationError::Cancelled) {
                    let status = format!("{:?}", error.status());
                    GenerationFailed {
                        process_id: &request.process_id,
                        status: &status,
                        error: &error,
                    }
                    .log();
                }
                GenerationResult::failed(&error, run.files, duration, run.warnings)
            }
        }
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        checkpoints: &Checkpoints<'_>,
        run: &mut RunState,
    ) -> Result<String, GenerationError> {
        checkpoints.reach("validate", 5, "Validating generation request", None)?;
        check_request(request)?;

        checkpoints.reach("load_graph", 10, "Loading process graph", None)?;
        let process = self.load_process(&request.process_id, run).await?;

        let template = match &request.template_id {
            Some(template_id) => {
                checkpoints.reach("load_template", 15, "Loading project template", None)?;
                Some(self.load_template(template_id).await?)
            }
            None => None,
        };

        let model = ProjectModel::new(&process, request, template.as_ref());
        let emitter = &self.emitter;

        let descriptor_path = format!("{}.csproj", model.project.project_name);
        checkpoints.reach("project_descriptor", 20, "Generating project file", Some(&descriptor_path))?;
        run.push(emitter.emit_project_descriptor(&model)?);

        checkpoints.reach("program", 30, "Generating Program.cs", Some("Program.cs"))?;
        run.push(emitter.emit_program(&model)?);

        let workflow_path = format!("Workflows/{}.cs", model.workflow_class);
        checkpoints.reach("workflow", 40, "Generating workflow", Some(&workflow_path))?;
        run.push(emitter.emit_workflow(&model)?);

        let count = model.activity_classes.len();
        for (index, class_name) in model.activity_classes.iter().enumerate() {
            let activity_path = format!("Activities/{}.cs", class_name);
            checkpoints.reach(
                "activities",
                activity_percentage(index, count),
                &format!("Generating activity {}/{}", index + 1, count),
                Some(&activity_path),
            )?;
            run.push(emitter.emit_activity(&model, index)?);
        }

        checkpoints.reach("models", 75, "Generating workflow context", Some("Models/WorkflowContext.cs"))?;
        run.push(emitter.emit_workflow_context(&model)?);
        checkpoints.reach("models", 85, "Generating workflow result", Some("Models/WorkflowResult.cs"))?;
        run.push(emitter.emit_workflow_result(&model)?);

        checkpoints.reach("configuration", 90, "Generating appsettings.json", Some("appsettings.json"))?;
        run.push(emitter.emit_app_settings()?);
        checkpoints.reach(
            "configuration",
            95,
            "Generating appsettings.Development.json",
            Some("appsettings.Development.json"),
        )?;
        run.push(emitter.emit_development_settings()?);

        if model.options.generate_readme {
            checkpoints.reach("readme", 98, "Generating README.md", Some("README.md"))?;
            run.push(emitter.emit_readme(&model, chrono::Utc::now())?);
        }

        checkpoints.reach("finalize", 100, "Generation complete", None)?;
        self.finalize(&model.project.project_name, &run.files).await
    }

    /// Fetch and validate the process; warnings are kept, errors stop the run.
    async fn load_process(&self, process_id: &str, run: &mut RunState) -> Result<Process, GenerationError> {
        let process = self
            .processes
            .get_by_id(process_id)
            .await?
            .ok_or_else(|| GenerationError::ProcessNotFound {
                process_id: process_id.to_string(),
            })?;

        let report = validate_process(&process);
        run.warnings = report.warnings;
        if !report.is_valid {
            return Err(GenerationError::ValidationFailed {
                errors: report.errors,
            });
        }
        Ok(process)
    }

    async fn load_template(&self, template_id: &str) -> Result<ProjectTemplate, GenerationError> {
        self.templates
            .get_template(template_id)
            .await?
            .ok_or_else(|| GenerationError::TemplateNotFound {
                template_id: template_id.to_string(),
            })
    }

    async fn finalize(&self, project_name: &str, files: &[GeneratedFile]) -> Result<String, GenerationError> {
        match &self.sink {
            Some(sink) => {
                let written = sink.write_project(Path::new(project_name), files).await?;
                Ok(written.display().to_string())
            }
            None => Ok(project_name.to_string()),
        }
    }
}

/// 55 for the first activity, approaching but never reaching 70.
fn activity_percentage(index: usize, count: usize) -> u8 {
    if count == 0 {
        return 55;
    }
    (55 + 15 * index / count) as u8
}

#[derive(Default)]
struct RunState {
    files: Vec<GeneratedFile>,
    warnings: Vec<ValidationIssue>,
}

impl RunState {
    fn push(&mut self, file: GeneratedFile) {
        FileEmitted {
            path: &file.path,
            line_count: file.line_count(),
        }
        .log();
        self.files.push(file);
    }
}

struct Checkpoints<'a> {
    process_id: &'a str,
    progress: &'a dyn ProgressSink,
    cancel: &'a CancellationToken,
}

impl Checkpoints<'_> {
    /// Stop if cancelled, otherwise report the checkpoint.
    fn reach(&self, phase: &str, percentage: u8, message: &str, current_file: Option<&str>) -> Result<(), GenerationError> {
        if self.cancel.is_cancelled() {
            GenerationCancelled {
                process_id: self.process_id,
                phase,
            }
            .log();
            return Err(GenerationError::Cancelled);
        }

        PhaseStarted {
            process_id: self.process_id,
            phase,
            percentage,
        }
        .log();

        let mut checkpoint = GenerationProgress::new(percentage, message);
        checkpoint.current_file = current_file.map(str::to_string);
        self.progress.report(checkpoint);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_percentage_stays_below_seventy() {
        assert_eq!(activity_percentage(0, 7), 55);
        assert_eq!(activity_percentage(6, 7), 67);
        assert_eq!(activity_percentage(0, 1), 55);
        assert_eq!(activity_percentage(0, 0), 55);
        for count in 1..50 {
            for index in 0..count {
                let value = activity_percentage(index, count);
                assert!((55..70).contains(&value));
            }
        }
    }

    #[test]
    fn test_activity_percentage_is_non_decreasing() {
        let values: Vec<u8> = (0..20).map(|i| activity_percentage(i, 20)).collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
