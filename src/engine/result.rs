// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

use crate::codegen::GeneratedFile;
use crate::errors::{GenerationError, GenerationStatus};
use crate::validation::ValidationIssue;

/// Outcome of one generation run, created fresh per request.
///
/// A failed run still carries whatever files were emitted before the failure, and
/// validation warnings are attached whether or not the run succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub status: GenerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub files: Vec<GeneratedFile>,
    pub total_lines: usize,
    #[serde(
        rename = "durationMs",
        serialize_with = "serialize_millis",
        deserialize_with = "deserialize_millis"
    )]
    pub duration: Duration,
    /// Where the project was (or would be) written, relative to the sink root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
    #[serde(default)]
    pub warnings: Vec<ValidationIssue>,
}

impl GenerationResult {
    pub(crate) fn succeeded(
        files: Vec<GeneratedFile>,
        duration: Duration,
        project_path: String,
        warnings: Vec<ValidationIssue>,
    ) -> Self {
        Self {
            success: true,
            status: GenerationStatus::Succeeded,
            error: None,
            total_lines: total_lines(&files),
            files,
            duration,
            project_path: Some(project_path),
            warnings,
        }
    }

    pub(crate) fn failed(
        error: &GenerationError,
        files: Vec<GeneratedFile>,
        duration: Duration,
        warnings: Vec<ValidationIssue>,
    ) -> Self {
        Self {
            success: false,
            status: error.status(),
            error: Some(error.to_string()),
            total_lines: total_lines(&files),
            files,
            duration,
            project_path: None,
            warnings,
        }
    }

    /// The emitted file at `path`, if any.
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }
}

fn total_lines(files: &[GeneratedFile]) -> usize {
    files.iter().map(GeneratedFile::line_count).sum()
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

fn deserialize_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_lines_is_sum_of_files() {
        let files = vec![
            GeneratedFile::new("a.cs", "one\ntwo\n"),
            GeneratedFile::new("b.cs", "three\n"),
        ];
        let result = GenerationResult::succeeded(files, Duration::from_millis(3), "Orders".into(), Vec::new());

        assert!(result.success);
        assert_eq!(result.total_lines, 3);
        assert_eq!(result.file("b.cs").map(|f| f.line_count()), Some(1));
    }

    #[test]
    fn test_failed_result_keeps_partial_files() {
        let error = GenerationError::Cancelled;
        let files = vec![GeneratedFile::new("Orders.csproj", "<Project />\n")];
        let result = GenerationResult::failed(&error, files, Duration::ZERO, Vec::new());

        assert!(!result.success);
        assert_eq!(result.status, GenerationStatus::Cancelled);
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.error.as_deref(), Some("Generation cancelled"));
    }

    #[test]
    fn test_serializes_duration_as_millis() {
        let result = GenerationResult::succeeded(Vec::new(), Duration::from_millis(1500), "X".into(), Vec::new());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["durationMs"], 1500);
        assert_eq!(json["status"], "succeeded");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_reads_back_from_json() {
        let json = r#"{
            "success": false,
            "status": "validation_failed",
            "error": "Process validation failed",
            "files": [{ "path": "Orders.csproj", "content": "<Project />\n" }],
            "totalLines": 1,
            "durationMs": 250,
            "warnings": [{ "code": "NO_INCOMING_FLOW", "message": "orphan", "elementId": "t1" }]
        }"#;

        let result: GenerationResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.status, GenerationStatus::ValidationFailed);
        assert_eq!(result.duration, Duration::from_millis(250));
        assert_eq!(result.file("Orders.csproj").map(|f| f.line_count()), Some(1));
        assert!(result.project_path.is_none());
        assert_eq!(result.warnings[0].element_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_json_round_trip_keeps_result() {
        let files = vec![GeneratedFile::new("Program.cs", "a\nb\n")];
        let result = GenerationResult::succeeded(files, Duration::from_millis(42), "Orders".into(), Vec::new());

        let json = serde_json::to_string(&result).unwrap();
        let restored: GenerationResult = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, result);
    }
}
