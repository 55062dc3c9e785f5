// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::consts::{BPMN_MODEL_NAMESPACE, DEFAULT_PROCESS_VERSION};
use crate::errors::InterchangeError;
use crate::model::{activity_types, Activity, Gateway, Process, SequenceFlow};
use crate::observability::messages::interchange::{ElementSkipped, ProcessImported};
use crate::observability::messages::StructuredLog;

/// Parse the interchange XML dialect back into a process.
///
/// The first `<process>` element bound to the BPMN model namespace is read; a
/// document without one fails with [`InterchangeError::MissingProcess`]. Direct
/// children of the process are mapped by local name:
///
/// * names containing `Gateway` become gateways, typed by the name minus that suffix
/// * otherwise names containing `Task` or `Event` become activities
/// * `sequenceFlow` becomes a flow, with an optional nested `conditionExpression`
///
/// Name matching ignores ASCII case so the lowercased element names written by
/// [`super::export_process`] read back. Missing `id` attributes get a fresh UUID,
/// missing `name` attributes an empty string.
///
/// # Examples
///
/// ```rust
/// use process_forge::interchange::import_process;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL">
///   <process id="p1" name="Tiny">
///     <startEvent id="s"/>
///     <userTask id="t" name="Review"/>
///     <endEvent id="e"/>
///     <sequenceFlow id="f1" sourceRef="s" targetRef="t"/>
///     <sequenceFlow id="f2" sourceRef="t" targetRef="e"/>
///   </process>
/// </definitions>"#;
///
/// let process = import_process(xml).unwrap();
/// assert_eq!(process.activities().len(), 3);
/// assert_eq!(process.activities()[1].activity_type, "UserTask");
/// assert_eq!(process.sequence_flows().len(), 2);
/// ```
pub fn import_process(xml: &str) -> Result<Process, InterchangeError> {
    let mut reader = NsReader::from_str(xml);
    let mut state = ImportState::default();

    loop {
        let (namespace, event) = reader.read_resolved_event().map_err(parse_error)?;
        let in_model_namespace = matches!(
            namespace,
            ResolveResult::Bound(Namespace(ns)) if ns == BPMN_MODEL_NAMESPACE.as_bytes()
        );

        match event {
            Event::Start(e) => state.open(&e, in_model_namespace, false)?,
            Event::Empty(e) => state.open(&e, in_model_namespace, true)?,
            Event::End(_) => state.close(),
            Event::Text(text) => {
                let text = text.unescape().map_err(parse_error)?;
                state.text(&text);
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                state.text(&String::from_utf8_lossy(&bytes));
            }
            Event::Eof => break,
            _ => {}
        }

        if state.finished {
            break;
        }
    }

    let process = state.into_process()?;
    ProcessImported {
        process_id: process.id(),
        activity_count: process.activities().len(),
        gateway_count: process.gateways().len(),
        flow_count: process.sequence_flows().len(),
    }
    .log();
    Ok(process)
}

/// What a currently open element inside `<process>` is.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Activity(usize),
    Flow(usize),
    Documentation,
    Condition(usize),
    Other,
}

#[derive(Debug)]
enum ElementKind {
    Activity(String),
    Gateway(String),
    Flow,
    Other,
}

#[derive(Debug, Default)]
struct ProcessHeader {
    id: String,
    name: String,
    version: String,
}

#[derive(Debug, Default)]
struct ImportState {
    header: Option<ProcessHeader>,
    finished: bool,
    /// Open elements below `<process>`.
    frames: Vec<Frame>,
    description: String,
    activities: Vec<Activity>,
    gateways: Vec<Gateway>,
    flows: Vec<SequenceFlow>,
}

impl ImportState {
    fn open(&mut self, e: &BytesStart, in_model_namespace: bool, empty: bool) -> Result<(), InterchangeError> {
        let local = local_name(e)?;

        if self.header.is_none() {
            if in_model_namespace && local == "process" {
                let mut attrs = attributes(e)?;
                self.header = Some(ProcessHeader {
                    id: attrs.remove("id").unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: attrs.remove("name").unwrap_or_default(),
                    version: attrs
                        .remove("version")
                        .unwrap_or_else(|| DEFAULT_PROCESS_VERSION.to_string()),
                });
                self.finished = empty;
            }
            return Ok(());
        }

        let frame = if self.frames.is_empty() {
            self.open_process_child(e, &local)?
        } else {
            self.open_nested(e, &local)?
        };

        if !empty {
            self.frames.push(frame);
        }
        Ok(())
    }

    fn open_process_child(&mut self, e: &BytesStart, local: &str) -> Result<Frame, InterchangeError> {
        if local == "documentation" {
            return Ok(Frame::Documentation);
        }

        let frame = match classify(local) {
            ElementKind::Activity(activity_type) => {
                let mut attrs = attributes(e)?;
                self.activities.push(Activity::new(
                    attrs.remove("id").unwrap_or_else(|| Uuid::new_v4().to_string()),
                    attrs.remove("name").unwrap_or_default(),
                    activity_type,
                ));
                Frame::Activity(self.activities.len() - 1)
            }
            ElementKind::Gateway(gateway_type) => {
                let mut attrs = attributes(e)?;
                self.gateways.push(Gateway::new(
                    attrs.remove("id").unwrap_or_else(|| Uuid::new_v4().to_string()),
                    attrs.remove("name").unwrap_or_default(),
                    gateway_type,
                ));
                Frame::Other
            }
            ElementKind::Flow => {
                let mut attrs = attributes(e)?;
                self.flows.push(SequenceFlow::new(
                    attrs.remove("id").unwrap_or_else(|| Uuid::new_v4().to_string()),
                    attrs.remove("sourceRef").unwrap_or_default(),
                    attrs.remove("targetRef").unwrap_or_default(),
                ));
                Frame::Flow(self.flows.len() - 1)
            }
            ElementKind::Other => {
                ElementSkipped { local_name: local }.log();
                Frame::Other
            }
        };
        Ok(frame)
    }

    fn open_nested(&mut self, e: &BytesStart, local: &str) -> Result<Frame, InterchangeError> {
        let parent = self.frames.last().copied().unwrap_or(Frame::Other);
        let frame = match parent {
            Frame::Activity(index) if local == "property" => {
                let mut attrs = attributes(e)?;
                if let Some(key) = attrs.remove("name") {
                    let value = attrs.remove("value").unwrap_or_default();
                    self.activities[index].properties.insert(key, value);
                }
                Frame::Other
            }
            Frame::Flow(index) if local == "conditionExpression" => {
                self.flows[index].condition_expression = Some(String::new());
                Frame::Condition(index)
            }
            _ => Frame::Other,
        };
        Ok(frame)
    }

    fn close(&mut self) {
        if self.header.is_none() || self.finished {
            return;
        }
        match self.frames.pop() {
            Some(Frame::Documentation) => {
                self.description = self.description.trim().to_string();
            }
            Some(Frame::Condition(index)) => {
                if let Some(expression) = self.flows[index].condition_expression.as_mut() {
                    *expression = expression.trim().to_string();
                }
            }
            Some(_) => {}
            // Closing the process element itself
            None => self.finished = true,
        }
    }

    fn text(&mut self, text: &str) {
        match self.frames.last() {
            Some(Frame::Documentation) if self.frames.len() == 1 => self.description.push_str(text),
            Some(Frame::Condition(index)) => {
                if let Some(expression) = self.flows[*index].condition_expression.as_mut() {
                    expression.push_str(text);
                }
            }
            _ => {}
        }
    }

    fn into_process(self) -> Result<Process, InterchangeError> {
        let header = self.header.ok_or(InterchangeError::MissingProcess)?;
        let mut process = Process::restore(header.id, header.name, self.description, header.version);
        for activity in self.activities {
            process.add_activity(activity);
        }
        for gateway in self.gateways {
            process.add_gateway(gateway);
        }
        for flow in self.flows {
            process.add_sequence_flow(flow);
        }
        Ok(process)
    }
}

fn classify(local: &str) -> ElementKind {
    let lower = local.to_ascii_lowercase();

    if lower == "sequenceflow" {
        return ElementKind::Flow;
    }
    if let Some(position) = lower.rfind("gateway") {
        return ElementKind::Gateway(capitalize(&local[..position]));
    }
    if lower.contains("task") || lower.contains("event") {
        return ElementKind::Activity(canonical_activity_type(local));
    }
    ElementKind::Other
}

/// Restore the canonical spelling of well-known types; keep anything else verbatim.
fn canonical_activity_type(local: &str) -> String {
    activity_types::ALL
        .iter()
        .find(|known| known.eq_ignore_ascii_case(local))
        .map(|known| known.to_string())
        .unwrap_or_else(|| local.to_string())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn local_name(e: &BytesStart) -> Result<String, InterchangeError> {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref())
        .map(|s| s.to_string())
        .map_err(parse_error)
}

fn attributes(e: &BytesStart) -> Result<HashMap<String, String>, InterchangeError> {
    let mut map = HashMap::new();
    for attribute in e.attributes() {
        let attribute = attribute.map_err(parse_error)?;
        let key = std::str::from_utf8(attribute.key.local_name().as_ref())
            .map_err(parse_error)?
            .to_string();
        let value = attribute.unescape_value().map_err(parse_error)?.into_owned();
        map.insert(key, value);
    }
    Ok(map)
}

fn parse_error(error: impl std::fmt::Display) -> InterchangeError {
    InterchangeError::Parse(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";

    #[test]
    fn test_missing_process_element() {
        let xml = format!(r#"<definitions xmlns="{}"><collaboration id="c"/></definitions>"#, NS);
        assert!(matches!(import_process(&xml), Err(InterchangeError::MissingProcess)));
    }

    #[test]
    fn test_process_in_wrong_namespace_is_missing() {
        let xml = r#"<definitions xmlns="urn:other"><process id="p"/></definitions>"#;
        assert!(matches!(import_process(xml), Err(InterchangeError::MissingProcess)));
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let xml = format!(r#"<definitions xmlns="{}"><process id="p"></definitions>"#, NS);
        match import_process(&xml) {
            Err(InterchangeError::Parse(message)) => assert!(!message.is_empty()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_prefixed_namespace_is_accepted() {
        let xml = format!(
            r#"<bpmn:definitions xmlns:bpmn="{}">
  <bpmn:process id="p" name="Prefixed">
    <bpmn:startEvent id="s"/>
    <bpmn:exclusiveGateway id="g" name="Choose"/>
  </bpmn:process>
</bpmn:definitions>"#,
            NS
        );
        let process = import_process(&xml).unwrap();

        assert_eq!(process.name(), "Prefixed");
        assert_eq!(process.activities()[0].activity_type, "StartEvent");
        assert_eq!(process.gateways()[0].gateway_type, "Exclusive");
        assert_eq!(process.gateways()[0].name, "Choose");
    }

    #[test]
    fn test_missing_id_and_name_get_defaults() {
        let xml = format!(
            r#"<definitions xmlns="{}"><process><userTask/><sequenceFlow sourceRef="a" targetRef="b"/></process></definitions>"#,
            NS
        );
        let process = import_process(&xml).unwrap();

        assert!(Uuid::parse_str(process.id()).is_ok());
        assert_eq!(process.name(), "");
        let activity = &process.activities()[0];
        assert!(Uuid::parse_str(&activity.id).is_ok());
        assert_eq!(activity.name, "");
        assert!(Uuid::parse_str(&process.sequence_flows()[0].id).is_ok());
    }

    #[test]
    fn test_condition_expression_and_properties() {
        let xml = format!(
            r#"<definitions xmlns="{}">
  <process id="p" name="Guarded">
    <documentation>  Handles orders  </documentation>
    <servicetask id="t" name="Charge">
      <property name="endpoint" value="payments/charge"/>
    </servicetask>
    <sequenceFlow id="f" sourceRef="t" targetRef="e">
      <conditionExpression>amount &gt; 100</conditionExpression>
    </sequenceFlow>
  </process>
</definitions>"#,
            NS
        );
        let process = import_process(&xml).unwrap();

        assert_eq!(process.description(), "Handles orders");
        assert_eq!(process.activities()[0].activity_type, "ServiceTask");
        assert_eq!(
            process.activities()[0].properties.get("endpoint").map(String::as_str),
            Some("payments/charge")
        );
        assert_eq!(
            process.sequence_flows()[0].condition_expression.as_deref(),
            Some("amount > 100")
        );
    }

    #[test]
    fn test_unknown_types_are_kept_verbatim() {
        let xml = format!(
            r#"<definitions xmlns="{}"><process id="p"><intermediateThrowEvent id="i"/><laneSet id="l"/></process></definitions>"#,
            NS
        );
        let process = import_process(&xml).unwrap();

        assert_eq!(process.activities().len(), 1);
        assert_eq!(process.activities()[0].activity_type, "intermediateThrowEvent");
    }

    #[test]
    fn test_nested_event_definitions_are_not_activities() {
        let xml = format!(
            r#"<definitions xmlns="{}"><process id="p"><intermediateCatchEvent id="i"><timerEventDefinition id="t"/></intermediateCatchEvent></process></definitions>"#,
            NS
        );
        let process = import_process(&xml).unwrap();
        assert_eq!(process.activities().len(), 1);
    }

    #[test]
    fn test_classify() {
        assert!(matches!(classify("exclusiveGateway"), ElementKind::Gateway(t) if t == "Exclusive"));
        assert!(matches!(classify("eventBasedGateway"), ElementKind::Gateway(t) if t == "EventBased"));
        assert!(matches!(classify("usertask"), ElementKind::Activity(t) if t == "UserTask"));
        assert!(matches!(classify("sequenceFlow"), ElementKind::Flow));
        assert!(matches!(classify("laneSet"), ElementKind::Other));
    }
}
