// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context};
use serde_json::json;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use process_forge::backends::{
    FileSystemSink, InMemoryProcessRepository, InMemoryTemplateRepository, TracingProgress,
};
use process_forge::config::{load_and_validate_request, load_settings};
use process_forge::engine::GenerationOrchestrator;
use process_forge::interchange::{export_to_file, import_from_file};
use process_forge::model::samples::order_processing;
use process_forge::traits::ProcessRepository;
use process_forge::validation::{analyze_complexity, validate_process};

fn usage(program: &str) {
    eprintln!("Usage: {} generate <settings.yaml> <request.yaml>", program);
    eprintln!("       {} validate <process.bpmn>", program);
    eprintln!("       {} export-sample <out.bpmn>", program);
    eprintln!("Example: {} generate configs/settings.yaml configs/orders-request.yaml", program);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("process-forge");

    match args.get(1).map(String::as_str) {
        Some("generate") if args.len() == 4 => generate(&args[2], &args[3]).await,
        Some("validate") if args.len() == 3 => validate(&args[2]).await,
        Some("export-sample") if args.len() == 3 => export_sample(&args[2]).await,
        _ => {
            usage(program);
            std::process::exit(1);
        }
    }
}

async fn generate(settings_file: &str, request_file: &str) -> anyhow::Result<()> {
    let settings = load_settings(settings_file)
        .with_context(|| format!("loading settings from {}", settings_file))?;
    let request = load_and_validate_request(request_file)
        .with_context(|| format!("loading request from {}", request_file))?;

    let processes = InMemoryProcessRepository::with_samples();
    for path in settings.resolve_process_files(Path::new(settings_file)) {
        let process = import_from_file(&path)
            .await
            .with_context(|| format!("importing {}", path.display()))?;
        processes.add(process).await?;
    }

    let mut orchestrator = GenerationOrchestrator::new(
        Arc::new(processes),
        Arc::new(InMemoryTemplateRepository::with_templates(settings.templates)),
    );
    if settings.write_files {
        orchestrator = orchestrator.with_sink(Arc::new(FileSystemSink::new(&settings.output_root)));
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let result = orchestrator.generate(&request, &TracingProgress, &cancel).await;

    let files: Vec<_> = result
        .files
        .iter()
        .map(|file| json!({ "path": file.path, "lines": file.line_count(), "bytes": file.size() }))
        .collect();
    let summary = json!({
        "success": result.success,
        "status": result.status,
        "error": result.error,
        "projectPath": result.project_path,
        "totalLines": result.total_lines,
        "durationMs": result.duration.as_millis() as u64,
        "warnings": result.warnings,
        "files": files,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !result.success {
        bail!(
            "generation {:?}: {}",
            result.status,
            result.error.unwrap_or_default()
        );
    }
    Ok(())
}

async fn validate(process_file: &str) -> anyhow::Result<()> {
    let process = import_from_file(process_file)
        .await
        .with_context(|| format!("importing {}", process_file))?;

    let report = validate_process(&process);
    let complexity = analyze_complexity(&process);

    let summary = json!({
        "processId": process.id(),
        "name": process.name(),
        "validation": report,
        "complexity": complexity,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !report.is_valid {
        bail!("{} has {} validation error(s)", process_file, report.errors.len());
    }
    Ok(())
}

async fn export_sample(out_file: &str) -> anyhow::Result<()> {
    let process = order_processing();
    export_to_file(&process, out_file)
        .await
        .with_context(|| format!("writing {}", out_file))?;
    println!("Exported '{}' to {}", process.name(), out_file);
    Ok(())
}
