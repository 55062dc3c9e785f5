// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// One emitted artifact.
///
/// `path` is relative to the project root and always uses `/` as the separator,
/// e.g. `Activities/ShipOrderActivity.cs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Number of lines in `content`; a trailing newline does not start a new line.
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Size of `content` in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
