// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while persisting generated files.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error writing '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file path would escape the project directory.
    #[error("Refusing to write unsafe path '{0}'")]
    UnsafePath(String),
}
