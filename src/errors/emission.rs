// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while turning a process into source artifacts.
#[derive(Error, Debug)]
pub enum EmissionError {
    /// A source template failed to parse or render.
    #[error("Template '{template}' failed: {source}")]
    Template {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },
}
