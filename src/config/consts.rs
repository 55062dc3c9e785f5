// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Version assigned to newly created processes
pub const DEFAULT_PROCESS_VERSION: &str = "1.0.0";
/// Id of the StartEvent seeded into every new process
pub const START_EVENT_ID: &str = "start";
/// Name of the seeded StartEvent
pub const START_EVENT_NAME: &str = "开始";
/// Id of the EndEvent seeded into every new process
pub const END_EVENT_ID: &str = "end";
/// Name of the seeded EndEvent
pub const END_EVENT_NAME: &str = "结束";

/// Model namespace of the interchange XML dialect
pub const BPMN_MODEL_NAMESPACE: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
/// Target namespace written on exported `<definitions>`
pub const BPMN_TARGET_NAMESPACE: &str = "http://bpmn.io/schema/bpmn";

/// Target framework used when a request does not name one
pub const DEFAULT_TARGET_FRAMEWORK: &str = "net8.0";
/// Project version used when a request does not name one
pub const DEFAULT_PROJECT_VERSION: &str = "1.0.0";
/// Directory generated projects are written under
pub const DEFAULT_OUTPUT_ROOT: &str = "generated";
/// Id of the built-in project template
pub const BUILTIN_TEMPLATE_ID: &str = "console";
/// Simulated work delay emitted into async activities (milliseconds)
pub const ACTIVITY_DELAY_MS: u64 = 100;

/// Package every generated project needs for its service container
pub const DEPENDENCY_INJECTION_PACKAGE: &str = "Microsoft.Extensions.DependencyInjection";
/// Package generated projects need when logging is enabled
pub const CONSOLE_LOGGING_PACKAGE: &str = "Microsoft.Extensions.Logging.Console";
/// Version pinned for the Microsoft.Extensions packages above
pub const EXTENSIONS_PACKAGE_VERSION: &str = "8.0.0";
