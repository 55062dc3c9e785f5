// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised by repository collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("'{id}' already exists")]
    AlreadyExists { id: String },

    #[error("'{id}' does not exist")]
    NotFound { id: String },
}
