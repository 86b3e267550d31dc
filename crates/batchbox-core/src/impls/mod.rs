//! Impls - concrete implementations of the ports.
//!
//! - **CommandTask**: external program as the task
//! - **TracingEventSink**: events as structured log lines
//! - **MemoryEventSink**: events kept in memory (tests, embedding)

pub mod command;
pub mod event_sinks;

pub use self::command::CommandTask;
pub use self::event_sinks::{MemoryEventSink, TracingEventSink};
