// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Progress sink adapters.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::observability::messages::generation::ProgressReported;
use crate::observability::messages::StructuredLog;
use crate::traits::{GenerationProgress, ProgressSink};

/// Discards every checkpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _progress: GenerationProgress) {}
}

/// Forwards checkpoints over an unbounded channel.
///
/// A dropped receiver is not an error; later checkpoints are silently discarded.
///
/// ```rust
/// use process_forge::backends::ChannelProgress;
/// use process_forge::traits::{GenerationProgress, ProgressSink};
///
/// let (sink, mut receiver) = ChannelProgress::new();
/// sink.report(GenerationProgress::new(5, "Validating request"));
/// assert_eq!(receiver.try_recv().unwrap().percentage, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    sender: UnboundedSender<GenerationProgress>,
}

impl ChannelProgress {
    pub fn new() -> (Self, UnboundedReceiver<GenerationProgress>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&self, progress: GenerationProgress) {
        let _ = self.sender.send(progress);
    }
}

/// Logs each checkpoint through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&self, progress: GenerationProgress) {
        ProgressReported {
            percentage: progress.percentage,
            message: &progress.message,
            current_file: progress.current_file.as_deref(),
        }
        .log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_progress_preserves_order() {
        let (sink, mut receiver) = ChannelProgress::new();
        sink.report(GenerationProgress::new(5, "first"));
        sink.report(GenerationProgress::new(10, "second").with_file("Program.cs"));

        let first = receiver.try_recv().unwrap();
        let second = receiver.try_recv().unwrap();
        assert_eq!(first.message, "first");
        assert_eq!(second.current_file.as_deref(), Some("Program.cs"));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_channel_progress_ignores_closed_receiver() {
        let (sink, receiver) = ChannelProgress::new();
        drop(receiver);
        sink.report(GenerationProgress::new(100, "done"));
    }

    #[test]
    fn test_noop_and_tracing_accept_reports() {
        NoopProgress.report(GenerationProgress::new(1, "ignored"));
        TracingProgress.report(GenerationProgress::new(2, "logged"));
    }
}
