//! EventSink implementations.

use std::sync::Mutex;

use tracing::{info, warn};

use crate::domain::RunEvent;
use crate::ports::EventSink;

/// Writes every event as one structured log line (`event` = JSON body).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &RunEvent) {
        match serde_json::to_string(event) {
            Ok(body) => info!(target: "batchbox_core::events", run_id = %event.run_id(), event = %body),
            Err(err) => warn!(target: "batchbox_core::events", "failed to encode {} event: {err}", event.name()),
        }
    }
}

/// Keeps emitted events in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<RunEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RunEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, event: &RunEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RunId;
    use ulid::Ulid;

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemoryEventSink::new();
        let run_id = RunId::from(Ulid::new());

        sink.emit(&RunEvent::TaskStarted {
            run_id,
            task: "a".to_string(),
        });
        sink.emit(&RunEvent::TaskStarted {
            run_id,
            task: "b".to_string(),
        });

        let tasks: Vec<_> = sink
            .events()
            .into_iter()
            .map(|e| match e {
                RunEvent::TaskStarted { task, .. } => task,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(tasks, vec!["a", "b"]);
    }

    #[test]
    fn tracing_sink_does_not_panic_without_subscriber() {
        TracingEventSink.emit(&RunEvent::TaskStarted {
            run_id: RunId::from(Ulid::new()),
            task: "noop".to_string(),
        });
    }
}
