//! Lifecycle events - runner が emit するイベント
//!
//! JSON では `event` フィールドでタグ付けされる（`{"event":"task_started",...}`）。

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ids::RunId;
use super::outcome::ExitStatus;

/// Something that happened during a run, in emission order:
/// `Prepared` (or `SetupFailed`), then `TaskStarted`, then `TaskFinished`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    Prepared {
        run_id: RunId,
        output_dir: PathBuf,
        /// `false` when the directory was already present.
        created: bool,
    },
    SetupFailed {
        run_id: RunId,
        reason: String,
        exit_status: ExitStatus,
    },
    TaskStarted {
        run_id: RunId,
        task: String,
    },
    TaskFinished {
        run_id: RunId,
        task: String,
        exit_status: ExitStatus,
        elapsed_ms: u64,
    },
}

impl RunEvent {
    pub fn run_id(&self) -> RunId {
        match self {
            RunEvent::Prepared { run_id, .. }
            | RunEvent::SetupFailed { run_id, .. }
            | RunEvent::TaskStarted { run_id, .. }
            | RunEvent::TaskFinished { run_id, .. } => *run_id,
        }
    }

    /// `event` タグと同じ名前
    pub fn name(&self) -> &'static str {
        match self {
            RunEvent::Prepared { .. } => "prepared",
            RunEvent::SetupFailed { .. } => "setup_failed",
            RunEvent::TaskStarted { .. } => "task_started",
            RunEvent::TaskFinished { .. } => "task_finished",
        }
    }
}
