// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Embedded source templates and the environment that renders them.

use minijinja::{AutoEscape, Environment, Value};

use crate::errors::EmissionError;

pub const PROJECT_DESCRIPTOR: &str = "project.csproj";
pub const PROGRAM: &str = "program.cs";
pub const WORKFLOW: &str = "workflow.cs";
pub const ACTIVITY: &str = "activity.cs";
pub const WORKFLOW_CONTEXT: &str = "workflow_context.cs";
pub const WORKFLOW_RESULT: &str = "workflow_result.cs";
pub const APP_SETTINGS: &str = "appsettings.json";
pub const APP_SETTINGS_DEVELOPMENT: &str = "appsettings.Development.json";
pub const README: &str = "readme.md";

const SOURCES: &[(&str, &str)] = &[
    (PROJECT_DESCRIPTOR, include_str!("../../templates/project.csproj.j2")),
    (PROGRAM, include_str!("../../templates/program.cs.j2")),
    (WORKFLOW, include_str!("../../templates/workflow.cs.j2")),
    (ACTIVITY, include_str!("../../templates/activity.cs.j2")),
    (WORKFLOW_CONTEXT, include_str!("../../templates/workflow_context.cs.j2")),
    (WORKFLOW_RESULT, include_str!("../../templates/workflow_result.cs.j2")),
    (APP_SETTINGS, include_str!("../../templates/appsettings.json.j2")),
    (
        APP_SETTINGS_DEVELOPMENT,
        include_str!("../../templates/appsettings.Development.json.j2"),
    ),
    (README, include_str!("../../templates/readme.md.j2")),
];

/// Build the rendering environment.
///
/// Block tags swallow their own line, trailing newlines survive, and only the
/// project descriptor (XML) is auto-escaped.
pub fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".csproj") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    env
}

/// Render the embedded template `name` with `context`.
pub fn render(env: &Environment<'static>, name: &'static str, context: Value) -> Result<String, EmissionError> {
    let source = SOURCES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, source)| *source)
        .ok_or_else(|| EmissionError::Template {
            template: name,
            source: minijinja::Error::new(minijinja::ErrorKind::TemplateNotFound, name),
        })?;

    let template = env
        .template_from_named_str(name, source)
        .map_err(|source| EmissionError::Template { template: name, source })?;

    template
        .render(context)
        .map_err(|source| EmissionError::Template { template: name, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_every_embedded_template_parses() {
        let env = environment();
        for (name, source) in SOURCES {
            assert!(
                env.template_from_named_str(name, source).is_ok(),
                "template {} does not parse",
                name
            );
        }
    }

    #[test]
    fn test_only_descriptor_is_escaped() {
        let env = environment();
        let escaped = env
            .template_from_named_str("x.csproj", "{{ value }}")
            .unwrap()
            .render(context! { value => "A & B" })
            .unwrap();
        let plain = env
            .template_from_named_str("x.cs", "{{ value }}")
            .unwrap()
            .render(context! { value => "A & B" })
            .unwrap();

        assert_eq!(escaped, "A &amp; B");
        assert_eq!(plain, "A & B");
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let result = render(&environment(), "missing.cs", Value::UNDEFINED);
        assert!(matches!(result, Err(EmissionError::Template { template: "missing.cs", .. })));
    }
}
