// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The process aggregate root.
//!
//! A `Process` owns three ordered element lists (activities, sequence flows and
//! gateways). The construction API is append-only: elements can be added but never
//! removed, so the element lists double as an audit trail of how the graph was built.
//! No structural checks run here; see [`crate::validation`] for that.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::consts::{DEFAULT_PROCESS_VERSION, END_EVENT_ID, END_EVENT_NAME, START_EVENT_ID, START_EVENT_NAME};
use crate::model::elements::{activity_types, Activity, Gateway, SequenceFlow};

/// A workflow graph: activities and gateways connected by sequence flows.
///
/// # Examples
///
/// ```rust
/// use process_forge::model::{Activity, Process, SequenceFlow};
///
/// let mut process = Process::create("Onboarding", "New hire onboarding");
/// assert_eq!(process.activities()[0].activity_type, "StartEvent");
/// assert_eq!(process.activities()[1].activity_type, "EndEvent");
///
/// process.add_activity(Activity::new("review", "Review", "UserTask"));
/// process.add_sequence_flow(SequenceFlow::new("f1", "start", "review"));
/// assert_eq!(process.activities().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    id: String,
    name: String,
    description: String,
    version: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    activities: Vec<Activity>,
    sequence_flows: Vec<SequenceFlow>,
    gateways: Vec<Gateway>,
}

impl Process {
    /// Create a process with a generated id, seeded with a start and an end event.
    pub fn create(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::create_with_id(Uuid::new_v4().to_string(), name, description)
    }

    /// Create a process with a caller-chosen id, seeded with a start and an end event.
    ///
    /// The seeded activities are always the first two entries of `activities()`:
    /// the StartEvent at index 0 and the EndEvent at index 1.
    pub fn create_with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut process = Self::restore(id, name, description, DEFAULT_PROCESS_VERSION);
        process.activities.push(Activity::new(
            START_EVENT_ID,
            START_EVENT_NAME,
            activity_types::START_EVENT,
        ));
        process.activities.push(Activity::new(
            END_EVENT_ID,
            END_EVENT_NAME,
            activity_types::END_EVENT,
        ));
        process
    }

    /// Rebuild an empty process from serialized form, without seeding any activity.
    ///
    /// Only the interchange importer needs this: it reproduces a graph exactly as it
    /// was exported, start and end events included.
    pub(crate) fn restore(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            version: version.into(),
            created_at: now,
            updated_at: now,
            activities: Vec::new(),
            sequence_flows: Vec::new(),
            gateways: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn sequence_flows(&self) -> &[SequenceFlow] {
        &self.sequence_flows
    }

    pub fn gateways(&self) -> &[Gateway] {
        &self.gateways
    }

    /// Append an activity.
    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
        self.touch();
    }

    /// Append a sequence flow. The referenced ids are not checked.
    pub fn add_sequence_flow(&mut self, flow: SequenceFlow) {
        self.sequence_flows.push(flow);
        self.touch();
    }

    /// Append a gateway.
    pub fn add_gateway(&mut self, gateway: Gateway) {
        self.gateways.push(gateway);
        self.touch();
    }

    /// Partial update: only the provided fields are replaced.
    pub fn update(&mut self, name: Option<&str>, description: Option<&str>) {
        if let Some(name) = name {
            self.name = name.to_string();
        }
        if let Some(description) = description {
            self.description = description.to_string();
        }
        self.touch();
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn gateway(&self, id: &str) -> Option<&Gateway> {
        self.gateways.iter().find(|g| g.id == id)
    }

    pub fn incoming_flows<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a SequenceFlow> + 'a {
        self.sequence_flows
            .iter()
            .filter(move |f| f.target_ref == node_id)
    }

    pub fn outgoing_flows<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a SequenceFlow> + 'a {
        self.sequence_flows
            .iter()
            .filter(move |f| f.source_ref == node_id)
    }

    /// Activities plus gateways.
    pub fn node_count(&self) -> usize {
        self.activities.len() + self.gateways.len()
    }

    fn touch(&mut self) {
        // Utc::now() can repeat within clock resolution; never move backwards.
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_seeds_start_and_end_events() {
        let process = Process::create("Claims", "Insurance claims");

        assert_eq!(process.activities().len(), 2);
        assert_eq!(process.activities()[0].activity_type, "StartEvent");
        assert_eq!(process.activities()[0].id, "start");
        assert_eq!(process.activities()[0].name, "开始");
        assert_eq!(process.activities()[1].activity_type, "EndEvent");
        assert_eq!(process.activities()[1].id, "end");
        assert_eq!(process.activities()[1].name, "结束");
        assert!(process.sequence_flows().is_empty());
        assert!(process.gateways().is_empty());
        assert_eq!(process.version(), "1.0.0");
    }

    #[test]
    fn test_create_generates_unique_ids() {
        let a = Process::create("A", "");
        let b = Process::create("A", "");
        assert_ne!(a.id(), b.id());
        assert!(Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn test_add_operations_append_in_order() {
        let mut process = Process::create_with_id("p1", "Orders", "");
        process.add_activity(Activity::new("a", "A", "UserTask"));
        process.add_activity(Activity::new("b", "B", "ServiceTask"));
        process.add_gateway(Gateway::new("g", "Split", "Exclusive"));
        process.add_sequence_flow(SequenceFlow::new("f1", "start", "a"));
        process.add_sequence_flow(SequenceFlow::new("f2", "a", "b"));

        let ids: Vec<&str> = process.activities().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["start", "end", "a", "b"]);
        assert_eq!(process.gateways().len(), 1);
        assert_eq!(process.sequence_flows()[1].id, "f2");
        assert_eq!(process.node_count(), 5);
    }

    #[test]
    fn test_add_refreshes_updated_at() {
        let mut process = Process::create("Orders", "");
        let before = process.updated_at();
        process.add_activity(Activity::new("a", "A", "UserTask"));
        assert!(process.updated_at() >= before);
        assert_eq!(process.created_at(), before);
    }

    #[test]
    fn test_update_is_partial() {
        let mut process = Process::create("Orders", "Original");
        process.update(Some("Renamed"), None);
        assert_eq!(process.name(), "Renamed");
        assert_eq!(process.description(), "Original");

        process.update(None, Some("New description"));
        assert_eq!(process.name(), "Renamed");
        assert_eq!(process.description(), "New description");
    }

    #[test]
    fn test_flow_lookups_use_string_equality() {
        let mut process = Process::create("Orders", "");
        process.add_sequence_flow(SequenceFlow::new("f1", "start", "end"));
        process.add_sequence_flow(SequenceFlow::new("f2", "start", "ghost"));

        assert_eq!(process.outgoing_flows("start").count(), 2);
        assert_eq!(process.incoming_flows("end").count(), 1);
        assert_eq!(process.incoming_flows("ghost").count(), 1);
        assert!(process.activity("ghost").is_none());
    }

    #[test]
    fn test_restore_does_not_seed() {
        let process = Process::restore("p", "Imported", "", "2.0.0");
        assert!(process.activities().is_empty());
        assert_eq!(process.version(), "2.0.0");
    }
}
