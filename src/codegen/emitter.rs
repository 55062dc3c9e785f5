// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use minijinja::{Environment, Value};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::codegen::generated::GeneratedFile;
use crate::codegen::naming::{
    activity_class_name, camel_case, comment_text, disambiguate, doc_comment_text, field_assignment,
    field_name, string_literal, workflow_class_name,
};
use crate::codegen::templates::{self, environment, render};
use crate::config::consts::{
    ACTIVITY_DELAY_MS, CONSOLE_LOGGING_PACKAGE, DEPENDENCY_INJECTION_PACKAGE,
    EXTENSIONS_PACKAGE_VERSION,
};
use crate::config::request::{
    CodeGenerationOptions, GenerationRequest, PackageDependency, ProjectConfig, ProjectTemplate,
};
use crate::errors::EmissionError;
use crate::model::{Activity, Process};

const LOGGER_PARAMETER: &str = "logger";
const INDENT: &str = "    ";

/// Everything the emitter needs about one project, with names resolved once.
///
/// Class names are computed up front so every artifact that mentions an activity
/// (its own file, the workflow, the service registrations) agrees on the same name.
#[derive(Debug, Clone)]
pub struct ProjectModel<'a> {
    pub process: &'a Process,
    pub project: &'a ProjectConfig,
    pub options: &'a CodeGenerationOptions,
    /// Package references in emission order.
    pub dependencies: Vec<PackageDependency>,
    pub workflow_class: String,
    /// One class name per activity, parallel to `process.activities()`.
    pub activity_classes: Vec<String>,
}

impl<'a> ProjectModel<'a> {
    /// Resolve names and dependencies for `process` under `request`.
    ///
    /// Dependencies are the packages the generated code itself needs, then the
    /// template's, then the request's. A later entry replaces an earlier one with the
    /// same package id.
    pub fn new(process: &'a Process, request: &'a GenerationRequest, template: Option<&ProjectTemplate>) -> Self {
        let requested = match template {
            Some(template) => template.merge_dependencies(&request.dependencies),
            None => request.dependencies.clone(),
        };

        let mut required = vec![PackageDependency::new(
            DEPENDENCY_INJECTION_PACKAGE,
            EXTENSIONS_PACKAGE_VERSION,
        )];
        if request.options.enable_logging {
            required.push(PackageDependency::new(
                CONSOLE_LOGGING_PACKAGE,
                EXTENSIONS_PACKAGE_VERSION,
            ));
        }
        let baseline = ProjectTemplate {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            dependencies: required,
        };

        let activity_classes = disambiguate(
            process
                .activities()
                .iter()
                .map(|activity| activity_class_name(&activity.name))
                .collect(),
        );

        Self {
            process,
            project: &request.project,
            options: &request.options,
            dependencies: baseline.merge_dependencies(&requested),
            workflow_class: workflow_class_name(process.name()),
            activity_classes,
        }
    }

    fn namespace(&self, area: &str) -> String {
        format!("{}.{}", self.project.namespace, area)
    }

    fn pad(&self) -> &'static str {
        if self.options.enable_exception_handling {
            INDENT
        } else {
            ""
        }
    }

    fn method_name(&self) -> &'static str {
        if self.options.generate_async_methods {
            "ExecuteAsync"
        } else {
            "Execute"
        }
    }

    fn object_type(&self) -> &'static str {
        if self.project.nullable {
            "object?"
        } else {
            "object"
        }
    }

    fn logger_field(&self) -> String {
        field_name(LOGGER_PARAMETER, self.options.naming_style)
    }

    /// `using` directives for a class that runs as part of the workflow.
    fn execution_usings(&self, extra: &[String]) -> Vec<String> {
        let mut usings = Vec::new();
        if !self.project.implicit_usings {
            if self.options.enable_exception_handling {
                usings.push("System".to_string());
            }
            if self.options.generate_async_methods {
                usings.push("System.Threading.Tasks".to_string());
            }
        }
        if self.options.enable_logging {
            usings.push("Microsoft.Extensions.Logging".to_string());
        }
        usings.extend(extra.iter().cloned());
        usings
    }
}

/// Renders the artifacts of a generated project.
///
/// The emitter is immutable after construction and can be shared across
/// concurrent generation runs.
///
/// # Examples
///
/// ```rust
/// use process_forge::codegen::{CodeEmitter, ProjectModel};
/// use process_forge::config::GenerationRequest;
/// use process_forge::model::samples::order_processing;
///
/// let process = order_processing();
/// let request = GenerationRequest::new("order-processing", "Orders", "Orders.Gen");
/// let model = ProjectModel::new(&process, &request, None);
///
/// let files = CodeEmitter::new().emit_all(&model).unwrap();
/// assert_eq!(files[0].path, "Orders.csproj");
/// assert!(files.iter().any(|f| f.path == "Workflows/OrderProcessingWorkflow.cs"));
/// ```
pub struct CodeEmitter {
    env: Environment<'static>,
}

impl CodeEmitter {
    pub fn new() -> Self {
        Self { env: environment() }
    }

    /// `<ProjectName>.csproj`
    pub fn emit_project_descriptor(&self, model: &ProjectModel) -> Result<GeneratedFile, EmissionError> {
        let project = model.project;
        let options = model.options;
        let view = DescriptorView {
            project_name: &project.project_name,
            namespace: &project.namespace,
            version: &project.version,
            target_framework: &project.target_framework,
            author: project.author.as_deref(),
            company: project.company.as_deref(),
            description: project.description.as_deref(),
            nullable: project.nullable,
            implicit_usings: project.implicit_usings,
            enable_aot: options.enable_aot,
            enable_trimming: options.enable_trimming,
            generate_documentation_file: options.generate_documentation_file,
            treat_warnings_as_errors: options.treat_warnings_as_errors,
            invariant_globalization: options.invariant_globalization,
            dependencies: model
                .dependencies
                .iter()
                .map(|dependency| DependencyView {
                    package_id: &dependency.package_id,
                    version: &dependency.version,
                })
                .collect(),
        };
        let content = render(&self.env, templates::PROJECT_DESCRIPTOR, Value::from_serialize(&view))?;
        Ok(GeneratedFile::new(
            format!("{}.csproj", model.project.project_name),
            content,
        ))
    }

    /// `Program.cs`: top-level statements wiring the container and running the workflow once.
    pub fn emit_program(&self, model: &ProjectModel) -> Result<GeneratedFile, EmissionError> {
        let view = ProgramView {
            logging: model.options.enable_logging,
            comments: model.options.generate_comments,
            r#async: model.options.generate_async_methods,
            workflow_class: &model.workflow_class,
            process_name_comment: comment_text(model.process.name()),
            process_name_literal: string_literal(model.process.name()),
            activities: model
                .activity_classes
                .iter()
                .map(|class_name| ClassRef { class_name })
                .collect(),
        };
        let body = render(&self.env, templates::PROGRAM, Value::from_serialize(&view))?;

        let mut usings = Vec::new();
        if !model.project.implicit_usings {
            usings.push("System".to_string());
        }
        usings.push("Microsoft.Extensions.DependencyInjection".to_string());
        if model.options.enable_logging {
            usings.push("Microsoft.Extensions.Logging".to_string());
        }
        usings.push(model.namespace("Activities"));
        usings.push(model.namespace("Models"));
        usings.push(model.namespace("Workflows"));

        Ok(GeneratedFile::new(
            "Program.cs",
            compose_source(&usings, None, &body, model.options.file_scoped_namespaces),
        ))
    }

    /// `Workflows/<ProcessName>Workflow.cs`
    pub fn emit_workflow(&self, model: &ProjectModel) -> Result<GeneratedFile, EmissionError> {
        let style = model.options.naming_style;
        let mut fields = Vec::new();
        let mut parameters = Vec::new();
        let mut assignments = Vec::new();

        if model.options.enable_logging {
            let logger_type = format!("ILogger<{}>", model.workflow_class);
            fields.push(FieldView {
                type_name: logger_type.clone(),
                name: model.logger_field(),
            });
            parameters.push(format!("{} {}", logger_type, LOGGER_PARAMETER));
            assignments.push(field_assignment(LOGGER_PARAMETER, style));
        }

        let mut activities = Vec::with_capacity(model.activity_classes.len());
        for (activity, class_name) in model.process.activities().iter().zip(&model.activity_classes) {
            let parameter = camel_case(class_name);
            fields.push(FieldView {
                type_name: class_name.clone(),
                name: field_name(&parameter, style),
            });
            parameters.push(format!("{} {}", class_name, parameter));
            assignments.push(field_assignment(&parameter, style));
            activities.push(WorkflowStepView {
                field_name: field_name(&parameter, style),
                result_var: format!("{}Result", parameter),
                name_literal: string_literal(&activity.name),
                name_comment: comment_text(&activity.name),
            });
        }

        let view = WorkflowView {
            workflow_class: &model.workflow_class,
            comments: model.options.generate_comments,
            logging: model.options.enable_logging,
            exception_handling: model.options.enable_exception_handling,
            r#async: model.options.generate_async_methods,
            method_name: model.method_name(),
            pad: model.pad(),
            logger_field: model.logger_field(),
            process_name_doc: doc_comment_text(model.process.name()),
            process_name_literal: string_literal(model.process.name()),
            parameter_list: parameter_list(&parameters),
            fields,
            assignments,
            activities,
        };
        let body = render(&self.env, templates::WORKFLOW, Value::from_serialize(&view))?;

        let usings = model.execution_usings(&[model.namespace("Activities"), model.namespace("Models")]);
        Ok(GeneratedFile::new(
            format!("Workflows/{}.cs", model.workflow_class),
            compose_source(
                &usings,
                Some(&model.namespace("Workflows")),
                &body,
                model.options.file_scoped_namespaces,
            ),
        ))
    }

    /// One `Activities/<Name>Activity.cs` per activity, in declaration order.
    pub fn emit_activities(&self, model: &ProjectModel) -> Result<Vec<GeneratedFile>, EmissionError> {
        (0..model.activity_classes.len())
            .map(|index| self.emit_activity(model, index))
            .collect()
    }

    /// The class for the activity at `index` in `process.activities()`.
    pub fn emit_activity(&self, model: &ProjectModel, index: usize) -> Result<GeneratedFile, EmissionError> {
        let (activity, class_name) = match (
            model.process.activities().get(index),
            model.activity_classes.get(index),
        ) {
            (Some(activity), Some(class_name)) => (activity, class_name),
            _ => {
                return Err(EmissionError::Template {
                    template: templates::ACTIVITY,
                    source: minijinja::Error::new(
                        minijinja::ErrorKind::InvalidOperation,
                        format!("no activity at index {}", index),
                    ),
                })
            }
        };

        let view = ActivityView {
            class_name,
            comments: model.options.generate_comments,
            logging: model.options.enable_logging,
            exception_handling: model.options.enable_exception_handling,
            r#async: model.options.generate_async_methods,
            pad: model.pad(),
            delay_ms: ACTIVITY_DELAY_MS,
            logger_field: model.logger_field(),
            logger_assignment: field_assignment(LOGGER_PARAMETER, model.options.naming_style),
            name_doc: doc_comment_text(&activity.name),
            activity_type_doc: doc_comment_text(&activity.activity_type),
            id_doc: doc_comment_text(&activity.id),
            name_comment: comment_text(&activity.name),
            name_literal: string_literal(&activity.name),
            id_literal: string_literal(&activity.id),
            properties: sorted_properties(activity),
        };
        let body = render(&self.env, templates::ACTIVITY, Value::from_serialize(&view))?;

        let usings = model.execution_usings(&[model.namespace("Models")]);
        Ok(GeneratedFile::new(
            format!("Activities/{}.cs", class_name),
            compose_source(
                &usings,
                Some(&model.namespace("Activities")),
                &body,
                model.options.file_scoped_namespaces,
            ),
        ))
    }

    /// `Models/WorkflowContext.cs` then `Models/WorkflowResult.cs`.
    pub fn emit_models(&self, model: &ProjectModel) -> Result<Vec<GeneratedFile>, EmissionError> {
        Ok(vec![
            self.emit_workflow_context(model)?,
            self.emit_workflow_result(model)?,
        ])
    }

    pub fn emit_workflow_context(&self, model: &ProjectModel) -> Result<GeneratedFile, EmissionError> {
        let body = render(&self.env, templates::WORKFLOW_CONTEXT, self.model_view(model))?;
        Ok(GeneratedFile::new(
            "Models/WorkflowContext.cs",
            compose_source(
                &model_usings(model),
                Some(&model.namespace("Models")),
                &body,
                model.options.file_scoped_namespaces,
            ),
        ))
    }

    pub fn emit_workflow_result(&self, model: &ProjectModel) -> Result<GeneratedFile, EmissionError> {
        let body = render(&self.env, templates::WORKFLOW_RESULT, self.model_view(model))?;
        Ok(GeneratedFile::new(
            "Models/WorkflowResult.cs",
            compose_source(
                &model_usings(model),
                Some(&model.namespace("Models")),
                &body,
                model.options.file_scoped_namespaces,
            ),
        ))
    }

    /// `appsettings.json` then `appsettings.Development.json`.
    pub fn emit_configuration(&self) -> Result<Vec<GeneratedFile>, EmissionError> {
        Ok(vec![self.emit_app_settings()?, self.emit_development_settings()?])
    }

    pub fn emit_app_settings(&self) -> Result<GeneratedFile, EmissionError> {
        let content = render(&self.env, templates::APP_SETTINGS, Value::UNDEFINED)?;
        Ok(GeneratedFile::new("appsettings.json", content))
    }

    pub fn emit_development_settings(&self) -> Result<GeneratedFile, EmissionError> {
        let content = render(&self.env, templates::APP_SETTINGS_DEVELOPMENT, Value::UNDEFINED)?;
        Ok(GeneratedFile::new("appsettings.Development.json", content))
    }

    /// `README.md`, stamped with `generated_at`.
    pub fn emit_readme(&self, model: &ProjectModel, generated_at: DateTime<Utc>) -> Result<GeneratedFile, EmissionError> {
        let view = ReadmeView {
            project_name: &model.project.project_name,
            target_framework: &model.project.target_framework,
            process_id: model.process.id(),
            process_name: model.process.name(),
            process_version: model.process.version(),
            description: model.process.description(),
            generated_at: generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            workflow_class: &model.workflow_class,
            activities: model
                .process
                .activities()
                .iter()
                .zip(&model.activity_classes)
                .map(|(activity, class_name)| ReadmeActivityView {
                    class_name,
                    name: &activity.name,
                    activity_type: &activity.activity_type,
                })
                .collect(),
        };
        let content = render(&self.env, templates::README, Value::from_serialize(&view))?;
        Ok(GeneratedFile::new("README.md", content))
    }

    /// Every artifact, in phase order. The README is included only when enabled.
    pub fn emit_all(&self, model: &ProjectModel) -> Result<Vec<GeneratedFile>, EmissionError> {
        let mut files = vec![
            self.emit_project_descriptor(model)?,
            self.emit_program(model)?,
            self.emit_workflow(model)?,
        ];
        files.extend(self.emit_activities(model)?);
        files.extend(self.emit_models(model)?);
        files.extend(self.emit_configuration()?);
        if model.options.generate_readme {
            files.push(self.emit_readme(model, Utc::now())?);
        }
        Ok(files)
    }

    fn model_view(&self, model: &ProjectModel) -> Value {
        Value::from_serialize(&ModelView {
            comments: model.options.generate_comments,
            expression_bodied: model.options.use_expression_bodied_members,
            object_type: model.object_type(),
            generic_result: if model.project.nullable { "T?" } else { "T" },
            data_parameter: if model.project.nullable {
                "Dictionary<string, object?>?"
            } else {
                "Dictionary<string, object>"
            },
            values_field: field_name("values", model.options.naming_style),
            log_field: field_name("executionLog", model.options.naming_style),
        })
    }
}

impl Default for CodeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a rendered class body in `using` directives and a namespace.
///
/// With `namespace` set, the body goes under a file-scoped declaration or, when
/// `file_scoped` is false, inside a block with every non-empty line indented by
/// four spaces. Without a namespace the body follows the usings unchanged.
///
/// ```rust
/// use process_forge::codegen::compose_source;
///
/// let usings = vec!["System".to_string()];
/// let source = compose_source(&usings, Some("Acme"), "class A\n{\n}\n", false);
/// assert_eq!(source, "using System;\n\nnamespace Acme\n{\n    class A\n    {\n    }\n}\n");
/// ```
pub fn compose_source(usings: &[String], namespace: Option<&str>, body: &str, file_scoped: bool) -> String {
    let mut source = String::new();
    for using in usings {
        source.push_str(&format!("using {};\n", using));
    }
    if !usings.is_empty() {
        source.push('\n');
    }

    match namespace {
        None => source.push_str(body),
        Some(namespace) if file_scoped => {
            source.push_str(&format!("namespace {};\n\n", namespace));
            source.push_str(body);
        }
        Some(namespace) => {
            source.push_str(&format!("namespace {}\n{{\n", namespace));
            for line in body.lines() {
                if !line.is_empty() {
                    source.push_str(INDENT);
                    source.push_str(line);
                }
                source.push('\n');
            }
            source.push_str("}\n");
        }
    }

    if !source.ends_with('\n') {
        source.push('\n');
    }
    source
}

/// `using` directives for the model classes; empty under implicit usings.
fn model_usings(model: &ProjectModel) -> Vec<String> {
    if model.project.implicit_usings {
        Vec::new()
    } else {
        vec!["System".to_string(), "System.Collections.Generic".to_string()]
    }
}

/// Constructor parameter list: empty, or one parameter per indented line.
fn parameter_list(parameters: &[String]) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let separator = format!(",\n{}{}", INDENT, INDENT);
    format!("\n{}{}{}", INDENT, INDENT, parameters.join(&separator))
}

fn sorted_properties(activity: &Activity) -> Vec<PropertyView> {
    activity
        .properties
        .iter()
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .map(|(key, value)| PropertyView {
            key: comment_text(key),
            value: comment_text(value),
        })
        .collect()
}

#[derive(Serialize)]
struct DependencyView<'a> {
    package_id: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
struct DescriptorView<'a> {
    project_name: &'a str,
    namespace: &'a str,
    version: &'a str,
    target_framework: &'a str,
    author: Option<&'a str>,
    company: Option<&'a str>,
    description: Option<&'a str>,
    nullable: bool,
    implicit_usings: bool,
    enable_aot: bool,
    enable_trimming: bool,
    generate_documentation_file: bool,
    treat_warnings_as_errors: bool,
    invariant_globalization: bool,
    dependencies: Vec<DependencyView<'a>>,
}

#[derive(Serialize)]
struct ClassRef<'a> {
    class_name: &'a str,
}

#[derive(Serialize)]
struct ProgramView<'a> {
    logging: bool,
    comments: bool,
    r#async: bool,
    workflow_class: &'a str,
    process_name_comment: String,
    process_name_literal: String,
    activities: Vec<ClassRef<'a>>,
}

#[derive(Serialize)]
struct FieldView {
    type_name: String,
    name: String,
}

#[derive(Serialize)]
struct WorkflowStepView {
    field_name: String,
    result_var: String,
    name_literal: String,
    name_comment: String,
}

#[derive(Serialize)]
struct WorkflowView<'a> {
    workflow_class: &'a str,
    comments: bool,
    logging: bool,
    exception_handling: bool,
    r#async: bool,
    method_name: &'static str,
    pad: &'static str,
    logger_field: String,
    process_name_doc: String,
    process_name_literal: String,
    parameter_list: String,
    fields: Vec<FieldView>,
    assignments: Vec<String>,
    activities: Vec<WorkflowStepView>,
}

#[derive(Serialize)]
struct PropertyView {
    key: String,
    value: String,
}

#[derive(Serialize)]
struct ActivityView<'a> {
    class_name: &'a str,
    comments: bool,
    logging: bool,
    exception_handling: bool,
    r#async: bool,
    pad: &'static str,
    delay_ms: u64,
    logger_field: String,
    logger_assignment: String,
    name_doc: String,
    activity_type_doc: String,
    id_doc: String,
    name_comment: String,
    name_literal: String,
    id_literal: String,
    properties: Vec<PropertyView>,
}

#[derive(Serialize)]
struct ModelView {
    comments: bool,
    expression_bodied: bool,
    object_type: &'static str,
    generic_result: &'static str,
    data_parameter: &'static str,
    values_field: String,
    log_field: String,
}

#[derive(Serialize)]
struct ReadmeActivityView<'a> {
    class_name: &'a str,
    name: &'a str,
    activity_type: &'a str,
}

#[derive(Serialize)]
struct ReadmeView<'a> {
    project_name: &'a str,
    target_framework: &'a str,
    process_id: &'a str,
    process_name: &'a str,
    process_version: &'a str,
    description: &'a str,
    generated_at: String,
    workflow_class: &'a str,
    activities: Vec<ReadmeActivityView<'a>>,
}
