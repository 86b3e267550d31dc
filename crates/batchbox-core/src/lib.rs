//! batchbox-core
//!
//! A run-to-completion batch-job harness: make the output directory ready,
//! run one task, hand its exit status to the process boundary.
//!
//! # Modules
//! - **domain**: run id, exit status, run state machine, run record, events
//! - **ports**: `Task`, `Clock`, `IdGenerator`, `EventSink`
//! - **app**: `JobRunner`, output directory preparation, execution environment
//! - **impls**: `CommandTask`, event sinks
//! - **config**: `HarnessConfig` (TOML + environment overrides)
//! - **error**: `HarnessError` and its parts

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;

pub use app::{ExecutionEnvironment, JobRunner, RunResult};
pub use config::HarnessConfig;
pub use domain::{ExitStatus, RunState};
pub use error::{HarnessError, TaskError};
pub use ports::{Task, TaskContext};
