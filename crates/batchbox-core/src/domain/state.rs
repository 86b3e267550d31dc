//! Run state machine - 1 回の起動のライフサイクル
//!
//! 状態は `RunRecord` が保持し、遷移は必ず `can_transition_to` で検査される。

use serde::{Deserialize, Serialize};

/// RunState は `JobRunner` が持つ唯一の run の状態
///
/// # 状態遷移
/// - Start -> Preparing -> Running -> Succeeded
/// - Start -> Preparing -> Running -> Failed
/// - Start -> Preparing -> Failed（セットアップ失敗、タスクは実行されない）
///
/// リトライの辺はない。終端状態はプロセスが終わるまで変わらない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Runner constructed, nothing touched on disk yet.
    Start,

    /// Output directory and environment are being (or have been) prepared.
    Preparing,

    /// The task has been invoked.
    Running,

    /// The task exited with status 0.
    Succeeded,

    /// Setup failed, or the task exited nonzero.
    Failed,
}

impl RunState {
    /// 終端状態か（これ以上遷移しない）
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed)
    }

    /// `self` から `next` への遷移が許されているか
    pub fn can_transition_to(self, next: RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Start, RunState::Preparing)
                | (RunState::Preparing, RunState::Running)
                | (RunState::Preparing, RunState::Failed)
                | (RunState::Running, RunState::Succeeded)
                | (RunState::Running, RunState::Failed)
        )
    }
}
