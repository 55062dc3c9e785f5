// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Identifier derivation for generated sources.
//!
//! Activity and process names are free text (often non-ASCII); everything that lands
//! in an identifier position goes through [`sanitize_identifier`] first, and
//! everything that lands inside a string literal or comment goes through
//! [`string_literal`] or [`comment_text`].

use std::collections::HashSet;

use crate::config::request::NamingStyle;

/// Fallback identifier for activities whose names contain nothing usable.
pub const ACTIVITY_FALLBACK: &str = "Activity";

/// Fallback identifier for processes whose names contain nothing usable.
pub const PROCESS_FALLBACK: &str = "Process";

const ACTIVITY_SUFFIX: &str = "Activity";
const WORKFLOW_SUFFIX: &str = "Workflow";

/// Reduce `name` to a valid identifier.
///
/// Keeps ASCII letters, digits and `_`. An empty result becomes `fallback`; a result
/// that does not start with a letter is prefixed with `{fallback}_`.
///
/// # Examples
///
/// ```rust
/// use process_forge::codegen::naming::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("Validate Order", "Activity"), "ValidateOrder");
/// assert_eq!(sanitize_identifier("开始", "Activity"), "Activity");
/// assert_eq!(sanitize_identifier("3-D Print", "Activity"), "Activity_3DPrint");
/// ```
pub fn sanitize_identifier(name: &str, fallback: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    match kept.chars().next() {
        None => fallback.to_string(),
        Some(first) if first.is_ascii_alphabetic() => kept,
        Some(_) => format!("{}_{}", fallback, kept),
    }
}

/// Class name for an activity: sanitized, first letter upper-cased, `Activity` suffix.
pub fn activity_class_name(activity_name: &str) -> String {
    let base = upper_first(&sanitize_identifier(activity_name, ACTIVITY_FALLBACK));
    if base.ends_with(ACTIVITY_SUFFIX) {
        base
    } else {
        format!("{}{}", base, ACTIVITY_SUFFIX)
    }
}

/// Class name for the workflow of a process: sanitized, first letter upper-cased,
/// `Workflow` suffix.
pub fn workflow_class_name(process_name: &str) -> String {
    let base = upper_first(&sanitize_identifier(process_name, PROCESS_FALLBACK));
    format!("{}{}", base, WORKFLOW_SUFFIX)
}

/// Make every name unique by appending `2`, `3`, ... to repeats, in order.
///
/// The first occurrence keeps its name. A generated candidate that collides with a
/// name appearing later is skipped, so the output never contains duplicates.
///
/// ```rust
/// use process_forge::codegen::naming::disambiguate;
///
/// let names = vec!["Activity".to_string(), "Activity".to_string(), "Ship".to_string()];
/// assert_eq!(disambiguate(names), vec!["Activity", "Activity2", "Ship"]);
/// ```
pub fn disambiguate(names: Vec<String>) -> Vec<String> {
    let reserved: HashSet<String> = names.iter().cloned().collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(names.len());

    for name in names {
        if taken.insert(name.clone()) {
            result.push(name);
            continue;
        }
        let mut counter = 2;
        let unique = loop {
            let candidate = format!("{}{}", name, counter);
            if !reserved.contains(&candidate) && !taken.contains(&candidate) {
                break candidate;
            }
            counter += 1;
        };
        taken.insert(unique.clone());
        result.push(unique);
    }
    result
}

/// Lower-case the first character: `ValidateOrderActivity` -> `validateOrderActivity`.
pub fn camel_case(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Private field name for a constructor parameter under the chosen style.
pub fn field_name(parameter: &str, style: NamingStyle) -> String {
    match style {
        NamingStyle::UnderscoreCamelCase => format!("_{}", parameter),
        NamingStyle::CamelCase => parameter.to_string(),
    }
}

/// Constructor statement assigning `parameter` to its field.
pub fn field_assignment(parameter: &str, style: NamingStyle) -> String {
    match style {
        NamingStyle::UnderscoreCamelCase => format!("_{} = {};", parameter, parameter),
        NamingStyle::CamelCase => format!("this.{} = {};", parameter, parameter),
    }
}

/// Escape text for use between double quotes in a regular string literal.
pub fn string_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Flatten text onto one line so it can follow `//`.
pub fn comment_text(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flatten text onto one line and escape it for an XML documentation comment.
pub fn doc_comment_text(text: &str) -> String {
    comment_text(text)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn upper_first(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_ascii_alphanumerics_and_underscore() {
        assert_eq!(sanitize_identifier("Ship Order!", ACTIVITY_FALLBACK), "ShipOrder");
        assert_eq!(sanitize_identifier("ship_order", ACTIVITY_FALLBACK), "ship_order");
        assert_eq!(sanitize_identifier("Café au lait", ACTIVITY_FALLBACK), "Cafaulait");
    }

    #[test]
    fn test_sanitize_non_ascii_name_uses_fallback() {
        assert_eq!(sanitize_identifier("开始", ACTIVITY_FALLBACK), "Activity");
        assert_eq!(sanitize_identifier("结束", PROCESS_FALLBACK), "Process");
        assert_eq!(sanitize_identifier("", ACTIVITY_FALLBACK), "Activity");
    }

    #[test]
    fn test_sanitize_prefixes_non_letter_start() {
        assert_eq!(sanitize_identifier("2nd pass", ACTIVITY_FALLBACK), "Activity_2ndpass");
        assert_eq!(sanitize_identifier("_hidden", PROCESS_FALLBACK), "Process__hidden");
    }

    #[test]
    fn test_activity_class_name_suffix() {
        assert_eq!(activity_class_name("Validate Order"), "ValidateOrderActivity");
        assert_eq!(activity_class_name("Review Activity"), "ReviewActivity");
        assert_eq!(activity_class_name("开始"), "Activity");
        assert_eq!(activity_class_name("notify"), "NotifyActivity");
    }

    #[test]
    fn test_workflow_class_name() {
        assert_eq!(workflow_class_name("Order Processing"), "OrderProcessingWorkflow");
        assert_eq!(workflow_class_name("流程"), "ProcessWorkflow");
    }

    #[test]
    fn test_disambiguate_in_declaration_order() {
        let names = ["Activity", "Activity", "Ship", "Activity"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(disambiguate(names), vec!["Activity", "Activity2", "Ship", "Activity3"]);
    }

    #[test]
    fn test_disambiguate_skips_names_taken_later() {
        let names = ["A", "A", "A2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(disambiguate(names), vec!["A", "A3", "A2"]);
    }

    #[test]
    fn test_field_naming_styles() {
        assert_eq!(camel_case("ShipOrderActivity"), "shipOrderActivity");
        assert_eq!(field_name("logger", NamingStyle::UnderscoreCamelCase), "_logger");
        assert_eq!(field_name("logger", NamingStyle::CamelCase), "logger");
        assert_eq!(
            field_assignment("logger", NamingStyle::UnderscoreCamelCase),
            "_logger = logger;"
        );
        assert_eq!(field_assignment("logger", NamingStyle::CamelCase), "this.logger = logger;");
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(string_literal(r#"Say "hi"\now"#), r#"Say \"hi\"\\now"#);
        assert_eq!(string_literal("two\nlines"), "two\\nlines");
    }

    #[test]
    fn test_comment_text_is_single_line() {
        assert_eq!(comment_text("first\r\nsecond\nthird"), "first second third");
        assert_eq!(doc_comment_text("a < b & c"), "a &lt; b &amp; c");
    }
}
