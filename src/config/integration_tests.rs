// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    use crate::backends::{InMemoryProcessRepository, InMemoryTemplateRepository, NoopProgress};
    use crate::config::{
        load_and_validate_request, load_request, load_settings, NamingStyle, PackageDependency,
    };
    use crate::engine::GenerationOrchestrator;
    use crate::errors::ConfigError;
    use crate::interchange::import_from_file;
    use crate::model::samples::order_processing;
    use crate::validation::validate_process;

    /// Settings file is parsed with templates and process files
    #[test]
    fn test_settings_yaml_loading() {
        let settings = load_settings("configs/settings.yaml").unwrap();

        assert_eq!(settings.output_root, PathBuf::from("generated"));
        assert!(settings.write_files);
        assert_eq!(settings.templates.len(), 1);
        assert_eq!(settings.templates[0].id, "resilient");
        assert_eq!(
            settings.templates[0].dependencies[0],
            PackageDependency::new("Polly", "8.2.0")
        );
        assert_eq!(
            settings.resolve_process_files(Path::new("configs/settings.yaml")),
            vec![PathBuf::from("configs/processes/expense-approval.bpmn")]
        );
    }

    #[test]
    fn test_request_yaml_loading() {
        let request = load_and_validate_request("configs/orders-request.yaml").unwrap();

        assert_eq!(request.process_id, "order-processing");
        assert_eq!(request.template_id.as_deref(), Some("resilient"));
        assert_eq!(request.project.project_name, "Orders");
        assert_eq!(request.project.author.as_deref(), Some("Platform Team"));
        assert_eq!(request.project.target_framework, "net8.0");
        assert_eq!(request.options.naming_style, NamingStyle::UnderscoreCamelCase);
        assert!(request.options.generate_readme);
        assert!(request.options.generate_async_methods);
    }

    #[test]
    fn test_invalid_request_reports_every_problem() {
        // Parsing alone succeeds; only validation rejects it.
        assert!(load_request("configs/invalid-request.yaml").is_ok());

        match load_and_validate_request("configs/invalid-request.yaml") {
            Err(ConfigError::Invalid(message)) => {
                assert!(message.contains("project.namespace is required"));
                assert!(message.contains("path separators"));
            }
            other => panic!("expected invalid configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_settings("configs/does-not-exist.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_yaml_is_yaml_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"processId: [unterminated").unwrap();

        let result = load_request(file.path());
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[tokio::test]
    async fn test_settings_process_files_import_and_validate() {
        let settings = load_settings("configs/settings.yaml").unwrap();

        for path in settings.resolve_process_files(Path::new("configs/settings.yaml")) {
            let process = import_from_file(&path).await.unwrap();
            let report = validate_process(&process);

            assert_eq!(process.id(), "expense-approval");
            assert!(report.is_valid, "{:?}", report.errors);
            assert_eq!(process.gateways().len(), 1);
        }
    }

    /// Settings, request and process file together drive a full generation run
    #[tokio::test]
    async fn test_generate_from_yaml_configuration() {
        let settings = load_settings("configs/settings.yaml").unwrap();
        let request = load_and_validate_request("configs/expense-request.yaml").unwrap();

        let mut processes = vec![order_processing()];
        for path in settings.resolve_process_files(Path::new("configs/settings.yaml")) {
            processes.push(import_from_file(&path).await.unwrap());
        }
        let orchestrator = GenerationOrchestrator::new(
            Arc::new(InMemoryProcessRepository::from_processes(processes)),
            Arc::new(InMemoryTemplateRepository::with_templates(settings.templates)),
        );

        let result = orchestrator
            .generate(&request, &NoopProgress, &CancellationToken::new())
            .await;

        assert!(result.success, "{:?}", result.error);
        assert!(result.file("Expenses.csproj").is_some());
        let workflow = &result
            .file("Workflows/ExpenseApprovalWorkflow.cs")
            .unwrap()
            .content;
        assert!(workflow.contains("namespace Expenses.Approval"));
        assert!(workflow.contains("this.reviewClaimActivity = reviewClaimActivity;"));
        assert!(!workflow.contains("async Task"));
    }

    #[tokio::test]
    async fn test_template_from_settings_reaches_descriptor() {
        let settings = load_settings("configs/settings.yaml").unwrap();
        let request = load_and_validate_request("configs/orders-request.yaml").unwrap();
        let orchestrator = GenerationOrchestrator::new(
            Arc::new(InMemoryProcessRepository::with_samples()),
            Arc::new(InMemoryTemplateRepository::with_templates(settings.templates)),
        );

        let result = orchestrator
            .generate(&request, &NoopProgress, &CancellationToken::new())
            .await;

        assert!(result.success, "{:?}", result.error);
        let csproj = &result.file("Orders.csproj").unwrap().content;
        assert!(csproj.contains(r#"<PackageReference Include="Polly" Version="8.4.0" />"#));
        assert!(!csproj.contains(r#"Version="8.2.0""#));
        assert!(csproj.contains("Microsoft.Extensions.Configuration.Json"));
        assert!(result.file("README.md").is_some());
    }
}
