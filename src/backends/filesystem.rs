// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use crate::codegen::GeneratedFile;
use crate::errors::SinkError;
use crate::observability::messages::generation::ProjectWritten;
use crate::observability::messages::StructuredLog;
use crate::traits::ProjectFileSink;

/// Writes generated projects to disk under a root directory.
///
/// Every file path is split on `/` and joined onto the project directory, creating
/// folders as needed. Paths that are absolute or contain `..` are rejected before
/// anything is written.
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    root: PathBuf,
}

impl FileSystemSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ProjectFileSink for FileSystemSink {
    async fn write_project(&self, project_path: &Path, files: &[GeneratedFile]) -> Result<PathBuf, SinkError> {
        let project_dir = self.root.join(relative_path(&project_path.to_string_lossy())?);

        // Check everything first so a bad path leaves nothing half-written.
        let targets = files
            .iter()
            .map(|file| Ok((project_dir.join(relative_path(&file.path)?), file)))
            .collect::<Result<Vec<_>, SinkError>>()?;

        for (target, file) in targets {
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| io_error(parent, source))?;
            }
            tokio::fs::write(&target, &file.content)
                .await
                .map_err(|source| io_error(&target, source))?;
        }

        ProjectWritten {
            project_path: &project_dir.to_string_lossy(),
            file_count: files.len(),
        }
        .log();

        Ok(project_dir)
    }
}

/// Turn a `/`-separated relative path into a platform path, refusing anything that
/// could land outside the base directory.
fn relative_path(path: &str) -> Result<PathBuf, SinkError> {
    if path.is_empty() || path.starts_with('/') || path.starts_with('\\') {
        return Err(SinkError::UnsafePath(path.to_string()));
    }

    let mut relative = PathBuf::new();
    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => relative.push(part),
            (Some(Component::CurDir), None) => {}
            _ => return Err(SinkError::UnsafePath(path.to_string())),
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(SinkError::UnsafePath(path.to_string()));
    }
    Ok(relative)
}

fn io_error(path: &Path, source: std::io::Error) -> SinkError {
    SinkError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_accepts_nested_segments() {
        let path = relative_path("Activities/ShipOrderActivity.cs").unwrap();
        assert_eq!(path, Path::new("Activities").join("ShipOrderActivity.cs"));
        assert_eq!(relative_path("./Program.cs").unwrap(), PathBuf::from("Program.cs"));
    }

    #[test]
    fn test_relative_path_rejects_escapes() {
        for unsafe_path in ["/etc/passwd", "../outside.cs", "Models/../../x.cs", "", "\\server\\share"] {
            assert!(
                matches!(relative_path(unsafe_path), Err(SinkError::UnsafePath(_))),
                "{} should be rejected",
                unsafe_path
            );
        }
    }

    #[tokio::test]
    async fn test_write_project_creates_folders() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSystemSink::new(dir.path());
        let files = vec![
            GeneratedFile::new("Orders.csproj", "<Project />\n"),
            GeneratedFile::new("Activities/ShipOrderActivity.cs", "class ShipOrderActivity {}\n"),
        ];

        let written = sink.write_project(Path::new("Orders"), &files).await.unwrap();

        assert_eq!(written, dir.path().join("Orders"));
        let activity = tokio::fs::read_to_string(written.join("Activities").join("ShipOrderActivity.cs"))
            .await
            .unwrap();
        assert_eq!(activity, "class ShipOrderActivity {}\n");
        assert!(written.join("Orders.csproj").exists());
    }

    #[tokio::test]
    async fn test_unsafe_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSystemSink::new(dir.path());
        let files = vec![
            GeneratedFile::new("Program.cs", "x\n"),
            GeneratedFile::new("../escape.cs", "y\n"),
        ];

        let result = sink.write_project(Path::new("Orders"), &files).await;

        assert!(matches!(result, Err(SinkError::UnsafePath(_))));
        assert!(!dir.path().join("Orders").join("Program.cs").exists());
    }
}
