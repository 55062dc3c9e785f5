// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::config::consts::{DEFAULT_PROJECT_VERSION, DEFAULT_TARGET_FRAMEWORK};

/// A request to scaffold a project from a stored process.
///
/// This is the generation wire contract: it is deserialized from YAML by
/// [`crate::config::load_request`] and is equally usable from JSON at a transport
/// boundary.
///
/// # Example
/// ```yaml
/// processId: order-processing
/// project:
///   projectName: Orders
///   namespace: Orders.Gen
/// options:
///   generateAsyncMethods: false
/// dependencies:
///   - packageId: Microsoft.Extensions.DependencyInjection
///     version: 8.0.0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub process_id: String,
    /// Named project template to merge in before emission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub project: ProjectConfig,
    #[serde(default)]
    pub options: CodeGenerationOptions,
    #[serde(default)]
    pub dependencies: Vec<PackageDependency>,
}

impl GenerationRequest {
    /// Request with default options and no dependencies.
    pub fn new(
        process_id: impl Into<String>,
        project_name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            process_id: process_id.into(),
            template_id: None,
            project: ProjectConfig::new(project_name, namespace),
            options: CodeGenerationOptions::default(),
            dependencies: Vec::new(),
        }
    }
}

/// Project-level metadata written into the project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub project_name: String,
    pub namespace: String,
    #[serde(default = "default_project_version")]
    pub version: String,
    #[serde(default = "default_target_framework")]
    pub target_framework: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "enabled")]
    pub nullable: bool,
    #[serde(default = "enabled")]
    pub implicit_usings: bool,
}

impl ProjectConfig {
    pub fn new(project_name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            namespace: namespace.into(),
            version: default_project_version(),
            target_framework: default_target_framework(),
            author: None,
            company: None,
            description: None,
            nullable: true,
            implicit_usings: true,
        }
    }
}

/// How private fields of generated classes are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
    /// `_orderActivity`
    #[default]
    UnderscoreCamelCase,
    /// `orderActivity`, assigned through `this.`
    CamelCase,
}

/// Independent code-shape toggles.
///
/// Every toggle is orthogonal to every other one; any combination yields a
/// self-consistent project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeGenerationOptions {
    pub naming_style: NamingStyle,
    pub file_scoped_namespaces: bool,
    pub generate_async_methods: bool,
    pub enable_logging: bool,
    pub enable_exception_handling: bool,
    pub use_expression_bodied_members: bool,
    pub generate_comments: bool,
    pub enable_aot: bool,
    pub enable_trimming: bool,
    pub generate_documentation_file: bool,
    pub treat_warnings_as_errors: bool,
    pub invariant_globalization: bool,
    pub generate_readme: bool,
}

impl Default for CodeGenerationOptions {
    fn default() -> Self {
        Self {
            naming_style: NamingStyle::default(),
            file_scoped_namespaces: true,
            generate_async_methods: true,
            enable_logging: true,
            enable_exception_handling: true,
            use_expression_bodied_members: true,
            generate_comments: true,
            enable_aot: false,
            enable_trimming: false,
            generate_documentation_file: false,
            treat_warnings_as_errors: false,
            invariant_globalization: false,
            generate_readme: false,
        }
    }
}

/// A package reference emitted into the project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDependency {
    pub package_id: String,
    pub version: String,
}

impl PackageDependency {
    pub fn new(package_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            version: version.into(),
        }
    }
}

/// A named, reusable bundle of dependencies merged into a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dependencies: Vec<PackageDependency>,
}

impl ProjectTemplate {
    /// Template dependencies first, then the request's; the request wins on a
    /// duplicate package id (compared case-insensitively, as NuGet ids are).
    pub fn merge_dependencies(&self, requested: &[PackageDependency]) -> Vec<PackageDependency> {
        let mut merged: Vec<PackageDependency> = self
            .dependencies
            .iter()
            .filter(|dep| {
                !requested
                    .iter()
                    .any(|r| r.package_id.eq_ignore_ascii_case(&dep.package_id))
            })
            .cloned()
            .collect();
        merged.extend(requested.iter().cloned());
        merged
    }
}

fn default_project_version() -> String {
    DEFAULT_PROJECT_VERSION.to_string()
}

fn default_target_framework() -> String {
    DEFAULT_TARGET_FRAMEWORK.to_string()
}

fn enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_request() {
        let yaml = r#"
processId: order-processing
project:
  projectName: Orders
  namespace: Orders.Gen
"#;
        let request: GenerationRequest = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(request.process_id, "order-processing");
        assert_eq!(request.project.version, "1.0.0");
        assert_eq!(request.project.target_framework, "net8.0");
        assert!(request.project.nullable);
        assert!(request.project.implicit_usings);
        assert_eq!(request.options, CodeGenerationOptions::default());
        assert!(request.dependencies.is_empty());
        assert!(request.template_id.is_none());
    }

    #[test]
    fn parse_partial_options_keep_other_defaults() {
        let yaml = r#"
processId: p
project:
  projectName: Orders
  namespace: Orders.Gen
options:
  generateAsyncMethods: false
  namingStyle: camel_case
  enableAot: true
"#;
        let request: GenerationRequest = serde_yaml::from_str(yaml).unwrap();

        assert!(!request.options.generate_async_methods);
        assert!(request.options.enable_aot);
        assert_eq!(request.options.naming_style, NamingStyle::CamelCase);
        assert!(request.options.enable_logging);
        assert!(request.options.file_scoped_namespaces);
    }

    #[test]
    fn test_template_merge_prefers_request_versions() {
        let template = ProjectTemplate {
            id: "console".to_string(),
            name: "Console".to_string(),
            description: String::new(),
            dependencies: vec![
                PackageDependency::new("Microsoft.Extensions.DependencyInjection", "8.0.0"),
                PackageDependency::new("Microsoft.Extensions.Logging.Console", "8.0.0"),
            ],
        };
        let requested = vec![
            PackageDependency::new("microsoft.extensions.logging.console", "9.0.0"),
            PackageDependency::new("Polly", "8.4.0"),
        ];

        let merged = template.merge_dependencies(&requested);
        let ids: Vec<&str> = merged.iter().map(|d| d.package_id.as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "Microsoft.Extensions.DependencyInjection",
                "microsoft.extensions.logging.console",
                "Polly"
            ]
        );
        assert_eq!(merged[1].version, "9.0.0");
    }
}
