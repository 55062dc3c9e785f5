// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::BTreeMap;

use crate::config::consts::{BPMN_MODEL_NAMESPACE, BPMN_TARGET_NAMESPACE};
use crate::errors::InterchangeError;
use crate::model::{Activity, Gateway, Process, SequenceFlow};
use crate::observability::messages::interchange::ProcessExported;
use crate::observability::messages::StructuredLog;

/// Serialize a process to the interchange XML dialect.
///
/// Element names are derived mechanically from type strings: an activity becomes
/// an element named after its lowercased type (`UserTask` -> `<usertask>`), a
/// gateway becomes its lowercased type plus `Gateway` (`Exclusive` ->
/// `<exclusiveGateway>`). Activities, gateways and flows are written in that order,
/// each list in declaration order, so the output is deterministic.
///
/// # Examples
///
/// ```rust
/// use process_forge::interchange::export_process;
/// use process_forge::model::{Process, SequenceFlow};
///
/// let mut process = Process::create_with_id("p1", "Minimal", "");
/// process.add_sequence_flow(SequenceFlow::new("f1", "start", "end"));
///
/// let xml = export_process(&process).unwrap();
/// assert!(xml.contains(r#"<startevent id="start""#));
/// assert!(xml.contains(r#"<sequenceFlow id="f1" sourceRef="start" targetRef="end"/>"#));
/// ```
pub fn export_process(process: &Process) -> Result<String, InterchangeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let definitions_id = format!("Definitions_{}", process.id());
    let definitions = BytesStart::new("definitions").with_attributes([
        ("xmlns", BPMN_MODEL_NAMESPACE),
        ("id", definitions_id.as_str()),
        ("targetNamespace", BPMN_TARGET_NAMESPACE),
    ]);
    write(&mut writer, Event::Start(definitions))?;

    let process_start = BytesStart::new("process").with_attributes([
        ("id", process.id()),
        ("name", process.name()),
        ("version", process.version()),
        ("isExecutable", "true"),
    ]);
    write(&mut writer, Event::Start(process_start))?;

    if !process.description().is_empty() {
        write_text_element(&mut writer, "documentation", process.description())?;
    }

    for activity in process.activities() {
        write_activity(&mut writer, activity)?;
    }
    for gateway in process.gateways() {
        write_gateway(&mut writer, gateway)?;
    }
    for flow in process.sequence_flows() {
        write_flow(&mut writer, flow)?;
    }

    write(&mut writer, Event::End(BytesEnd::new("process")))?;
    write(&mut writer, Event::End(BytesEnd::new("definitions")))?;

    let xml = String::from_utf8(writer.into_inner())
        .map_err(|e| InterchangeError::Write(e.to_string()))?;

    ProcessExported {
        process_id: process.id(),
        size: xml.len(),
    }
    .log();

    Ok(xml)
}

/// Element name for an activity: the type string, lowercased verbatim.
pub fn activity_element_name(activity_type: &str) -> String {
    activity_type.to_lowercase()
}

/// Element name for a gateway: the lowercased type string plus `Gateway`.
pub fn gateway_element_name(gateway_type: &str) -> String {
    format!("{}Gateway", gateway_type.to_lowercase())
}

/// Reject type strings that would not survive as an element name.
///
/// Only letters, digits, `_`, `-` and `.` are kept by the reader as one name, and
/// the first character must be a letter or `_`.
fn checked_element_name(name: String, element_id: &str, element_type: &str) -> Result<String, InterchangeError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        _ => false,
    };

    if valid {
        Ok(name)
    } else {
        Err(InterchangeError::Write(format!(
            "element '{}' has type '{}', which is not a valid XML element name",
            element_id, element_type
        )))
    }
}

fn write_activity(writer: &mut Writer<Vec<u8>>, activity: &Activity) -> Result<(), InterchangeError> {
    let name = checked_element_name(
        activity_element_name(&activity.activity_type),
        &activity.id,
        &activity.activity_type,
    )?;
    let start = BytesStart::new(name.as_str()).with_attributes([
        ("id", activity.id.as_str()),
        ("name", activity.name.as_str()),
    ]);

    if activity.properties.is_empty() {
        return write(writer, Event::Empty(start));
    }

    write(writer, Event::Start(start))?;
    // Properties are unordered; sort them so exports are reproducible.
    let sorted: BTreeMap<&String, &String> = activity.properties.iter().collect();
    for (key, value) in sorted {
        let property = BytesStart::new("property")
            .with_attributes([("name", key.as_str()), ("value", value.as_str())]);
        write(writer, Event::Empty(property))?;
    }
    write(writer, Event::End(BytesEnd::new(name.as_str())))
}

fn write_gateway(writer: &mut Writer<Vec<u8>>, gateway: &Gateway) -> Result<(), InterchangeError> {
    let name = checked_element_name(
        gateway_element_name(&gateway.gateway_type),
        &gateway.id,
        &gateway.gateway_type,
    )?;
    let start = BytesStart::new(name.as_str()).with_attributes([
        ("id", gateway.id.as_str()),
        ("name", gateway.name.as_str()),
    ]);
    write(writer, Event::Empty(start))
}

fn write_flow(writer: &mut Writer<Vec<u8>>, flow: &SequenceFlow) -> Result<(), InterchangeError> {
    let start = BytesStart::new("sequenceFlow").with_attributes([
        ("id", flow.id.as_str()),
        ("sourceRef", flow.source_ref.as_str()),
        ("targetRef", flow.target_ref.as_str()),
    ]);

    match &flow.condition_expression {
        None => write(writer, Event::Empty(start)),
        Some(expression) => {
            write(writer, Event::Start(start))?;
            write_text_element(writer, "conditionExpression", expression)?;
            write(writer, Event::End(BytesEnd::new("sequenceFlow")))
        }
    }
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), InterchangeError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), InterchangeError> {
    writer
        .write_event(event)
        .map_err(|e| InterchangeError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{activity_types, SequenceFlow};

    #[test]
    fn test_element_names_lowercase_types_verbatim() {
        assert_eq!(activity_element_name("StartEvent"), "startevent");
        assert_eq!(activity_element_name("BusinessRuleTask"), "businessruletask");
        assert_eq!(gateway_element_name("Exclusive"), "exclusiveGateway");
        assert_eq!(gateway_element_name("Parallel"), "parallelGateway");
    }

    #[test]
    fn test_export_orders_activities_gateways_flows() {
        let mut process = Process::create_with_id("p1", "Orders", "Handles orders");
        process.add_activity(Activity::new("pay", "Pay", activity_types::SERVICE_TASK));
        process.add_gateway(Gateway::new("g1", "Split", "Exclusive"));
        process.add_sequence_flow(SequenceFlow::new("f1", "start", "pay"));

        let xml = export_process(&process).unwrap();

        let start = xml.find("<startevent").unwrap();
        let end = xml.find("<endevent").unwrap();
        let task = xml.find("<servicetask").unwrap();
        let gateway = xml.find("<exclusiveGateway").unwrap();
        let flow = xml.find("<sequenceFlow").unwrap();
        assert!(start < end && end < task && task < gateway && gateway < flow);
        assert!(xml.contains("<documentation>Handles orders</documentation>"));
        assert!(xml.contains(BPMN_MODEL_NAMESPACE));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }

    #[test]
    fn test_conditional_flow_has_nested_expression() {
        let mut process = Process::create_with_id("p1", "Orders", "");
        process.add_sequence_flow(SequenceFlow::new("f1", "start", "end").with_condition("x > 1 && y"));

        let xml = export_process(&process).unwrap();

        assert!(xml.contains("<conditionExpression>x &gt; 1 &amp;&amp; y</conditionExpression>"));
        assert!(xml.contains("</sequenceFlow>"));
    }

    #[test]
    fn test_properties_are_sorted() {
        let mut process = Process::create_with_id("p1", "Orders", "");
        process.add_activity(
            Activity::new("t", "T", activity_types::USER_TASK)
                .with_property("zeta", "1")
                .with_property("alpha", "2"),
        );

        let xml = export_process(&process).unwrap();

        let alpha = xml.find(r#"name="alpha""#).unwrap();
        let zeta = xml.find(r#"name="zeta""#).unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn test_spaced_activity_type_is_rejected() {
        let mut process = Process::create_with_id("p1", "Orders", "");
        process.add_activity(Activity::new("a", "A", "User Task"));

        match export_process(&process) {
            Err(InterchangeError::Write(message)) => {
                assert!(message.contains("'a'"));
                assert!(message.contains("User Task"));
            }
            other => panic!("expected write error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_activity_type_is_rejected() {
        let mut process = Process::create_with_id("p1", "Orders", "");
        process.add_activity(Activity::new("a", "A", ""));

        assert!(matches!(export_process(&process), Err(InterchangeError::Write(_))));
    }

    #[test]
    fn test_markup_in_gateway_type_is_rejected() {
        for gateway_type in ["Event Based", "a<b", "x/y", "k=\"v\""] {
            let mut process = Process::create_with_id("p1", "Orders", "");
            process.add_gateway(Gateway::new("g1", "Split", gateway_type));

            assert!(
                matches!(export_process(&process), Err(InterchangeError::Write(_))),
                "{}",
                gateway_type
            );
        }
    }

    #[test]
    fn test_custom_hyphenated_type_round_trips() {
        let mut process = Process::create_with_id("p1", "Orders", "");
        process.add_activity(Activity::new("a", "A", "Approval-Task"));
        process.add_sequence_flow(SequenceFlow::new("f1", "start", "a"));
        process.add_sequence_flow(SequenceFlow::new("f2", "a", "end"));

        let xml = export_process(&process).unwrap();
        let restored = crate::interchange::import_process(&xml).unwrap();

        assert_eq!(restored.activities().len(), process.activities().len());
        assert_eq!(restored.activity("a").unwrap().activity_type, "approval-task");
    }

    #[test]
    fn test_export_is_deterministic() {
        let process = crate::model::samples::order_processing();
        assert_eq!(export_process(&process).unwrap(), export_process(&process).unwrap());
    }
}
