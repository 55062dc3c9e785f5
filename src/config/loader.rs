// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::DEFAULT_OUTPUT_ROOT;
use crate::config::request::{GenerationRequest, ProjectTemplate};
use crate::config::validation::validate_request;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for the command-line generator.
///
/// Loaded from YAML. Every field is optional.
///
/// # Fields
/// * `output_root` - Directory generated projects are written under (defaults to `generated`)
/// * `write_files` - Whether finished projects are written to disk at all
/// * `templates` - Project templates offered in addition to the built-in `console` template
/// * `process_files` - Interchange documents imported into the repository at startup
///
/// # Example
/// ```yaml
/// outputRoot: out
/// writeFiles: true
/// templates:
///   - id: resilient
///     name: Resilient console
///     dependencies:
///       - packageId: Polly
///         version: 8.2.0
/// processFiles:
///   - processes/approval.bpmn
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    #[serde(default = "enabled")]
    pub write_files: bool,
    #[serde(default)]
    pub templates: Vec<ProjectTemplate>,
    #[serde(default)]
    pub process_files: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            write_files: true,
            templates: Vec::new(),
            process_files: Vec::new(),
        }
    }
}

impl Settings {
    /// Resolve `process_files` relative to the directory holding the settings file.
    pub fn resolve_process_files(&self, settings_path: &Path) -> Vec<PathBuf> {
        let base = settings_path.parent().unwrap_or_else(|| Path::new(""));
        self.process_files
            .iter()
            .map(|file| if file.is_absolute() { file.clone() } else { base.join(file) })
            .collect()
    }
}

fn default_output_root() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_ROOT)
}

fn enabled() -> bool {
    true
}

/// Load generator settings from a YAML file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(&content)?;

    for template in &settings.templates {
        if template.id.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "template '{}' has no id",
                template.name
            )));
        }
    }

    Ok(settings)
}

/// Load a generation request from a YAML file
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<GenerationRequest, ConfigError> {
    let content = fs::read_to_string(path)?;
    let request: GenerationRequest = serde_yaml::from_str(&content)?;
    Ok(request)
}

/// Load a generation request and check it before any process is looked up.
pub fn load_and_validate_request<P: AsRef<Path>>(path: P) -> Result<GenerationRequest, ConfigError> {
    let request = load_request(path)?;

    if let Err(problems) = validate_request(&request) {
        return Err(ConfigError::Invalid(format!(
            "Request validation failed:\n{}",
            problems.join("\n")
        )));
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings: Settings = serde_yaml::from_str("writeFiles: false").unwrap();

        assert_eq!(settings.output_root, PathBuf::from("generated"));
        assert!(!settings.write_files);
        assert!(settings.templates.is_empty());
    }

    #[test]
    fn test_resolve_process_files() {
        let settings = Settings {
            process_files: vec![PathBuf::from("a.bpmn"), PathBuf::from("/abs/b.bpmn")],
            ..Settings::default()
        };

        let resolved = settings.resolve_process_files(Path::new("configs/settings.yaml"));

        assert_eq!(resolved[0], PathBuf::from("configs/a.bpmn"));
        assert_eq!(resolved[1], PathBuf::from("/abs/b.bpmn"));
    }
}
