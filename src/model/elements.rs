// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known activity type strings.
///
/// `Activity::activity_type` is an open string; these constants cover the types the
/// validator, codec and emitter treat specially or know how to spell canonically.
pub mod activity_types {
    pub const START_EVENT: &str = "StartEvent";
    pub const END_EVENT: &str = "EndEvent";
    pub const INTERMEDIATE_EVENT: &str = "IntermediateEvent";
    pub const TASK: &str = "Task";
    pub const USER_TASK: &str = "UserTask";
    pub const SERVICE_TASK: &str = "ServiceTask";
    pub const SEND_TASK: &str = "SendTask";
    pub const RECEIVE_TASK: &str = "ReceiveTask";
    pub const SCRIPT_TASK: &str = "ScriptTask";
    pub const MANUAL_TASK: &str = "ManualTask";
    pub const BUSINESS_RULE_TASK: &str = "BusinessRuleTask";

    /// Every well-known type, used to restore canonical casing on import.
    pub const ALL: &[&str] = &[
        START_EVENT,
        END_EVENT,
        INTERMEDIATE_EVENT,
        TASK,
        USER_TASK,
        SERVICE_TASK,
        SEND_TASK,
        RECEIVE_TASK,
        SCRIPT_TASK,
        MANUAL_TASK,
        BUSINESS_RULE_TASK,
    ];
}

/// Well-known gateway type strings.
pub mod gateway_types {
    pub const EXCLUSIVE: &str = "Exclusive";
    pub const PARALLEL: &str = "Parallel";
    pub const INCLUSIVE: &str = "Inclusive";
}

/// A graph node representing a unit of work or a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    /// Free text, may be non-ASCII.
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl Activity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        activity_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            activity_type: activity_type.into(),
            properties: HashMap::new(),
        }
    }

    /// Builder-style helper for attaching a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn is_start_event(&self) -> bool {
        self.activity_type == activity_types::START_EVENT
    }

    pub fn is_end_event(&self) -> bool {
        self.activity_type == activity_types::END_EVENT
    }
}

/// A directed, optionally condition-guarded edge between two nodes.
///
/// `source_ref` and `target_ref` hold node ids by value; nothing enforces that they
/// resolve to an activity or gateway of the owning process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceFlow {
    pub id: String,
    pub source_ref: String,
    pub target_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
}

impl SequenceFlow {
    pub fn new(
        id: impl Into<String>,
        source_ref: impl Into<String>,
        target_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_ref: source_ref.into(),
            target_ref: target_ref.into(),
            condition_expression: None,
        }
    }

    pub fn with_condition(mut self, expression: impl Into<String>) -> Self {
        self.condition_expression = Some(expression.into());
        self
    }
}

/// A branching or merging node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gateway {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub gateway_type: String,
}

impl Gateway {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        gateway_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gateway_type: gateway_type.into(),
        }
    }
}
