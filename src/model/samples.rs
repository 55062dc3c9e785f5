// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sample process graphs used by the in-memory repository and the CLI.

use crate::model::elements::{activity_types, gateway_types, Activity, Gateway, SequenceFlow};
use crate::model::Process;

/// Fixed id of the order processing sample.
pub const ORDER_PROCESSING_ID: &str = "order-processing";

/// The "order processing" sample.
///
/// ```text
/// start -> Validate Order -> Process Payment -> <Payment OK?> -+-> Ship Order ---+-> Notify Customer -> end
///                                                              +-> Cancel Order -+
/// ```
pub fn order_processing() -> Process {
    let mut process = Process::create_with_id(
        ORDER_PROCESSING_ID,
        "Order Processing",
        "Validates, charges and fulfils a customer order",
    );

    process.add_activity(
        Activity::new("validate_order", "Validate Order", activity_types::USER_TASK)
            .with_property("assignee", "sales"),
    );
    process.add_activity(
        Activity::new("process_payment", "Process Payment", activity_types::SERVICE_TASK)
            .with_property("endpoint", "payments/charge")
            .with_property("retries", "3"),
    );
    process.add_activity(Activity::new(
        "ship_order",
        "Ship Order",
        activity_types::SERVICE_TASK,
    ));
    process.add_activity(Activity::new(
        "cancel_order",
        "Cancel Order",
        activity_types::SERVICE_TASK,
    ));
    process.add_activity(Activity::new(
        "notify_customer",
        "Notify Customer",
        activity_types::SEND_TASK,
    ));

    process.add_gateway(Gateway::new(
        "payment_ok",
        "Payment OK?",
        gateway_types::EXCLUSIVE,
    ));

    process.add_sequence_flow(SequenceFlow::new("flow_1", "start", "validate_order"));
    process.add_sequence_flow(SequenceFlow::new("flow_2", "validate_order", "process_payment"));
    process.add_sequence_flow(SequenceFlow::new("flow_3", "process_payment", "payment_ok"));
    process.add_sequence_flow(
        SequenceFlow::new("flow_4", "payment_ok", "ship_order").with_condition("${paymentApproved}"),
    );
    process.add_sequence_flow(
        SequenceFlow::new("flow_5", "payment_ok", "cancel_order")
            .with_condition("${!paymentApproved}"),
    );
    process.add_sequence_flow(SequenceFlow::new("flow_6", "ship_order", "notify_customer"));
    process.add_sequence_flow(SequenceFlow::new("flow_7", "cancel_order", "notify_customer"));
    process.add_sequence_flow(SequenceFlow::new("flow_8", "notify_customer", "end"));

    process
}
