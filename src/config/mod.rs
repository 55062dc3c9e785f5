// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
pub mod request;
mod validation;

#[cfg(test)]
mod integration_tests;
pub mod consts;

pub use loader::{load_and_validate_request, load_request, load_settings, Settings};
pub use request::{
    CodeGenerationOptions, GenerationRequest, NamingStyle, PackageDependency, ProjectConfig,
    ProjectTemplate,
};
pub use validation::{check_request, validate_request};
