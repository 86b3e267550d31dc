//! Run record - 1 回の起動のライフサイクルを記録する唯一の場所
//!
//! # 学習ポイント
//! - 状態を直接書き換えず、`transition` / `finish` 経由でのみ変更する
//! - 時刻は引数で受け取る（`Clock` への依存は runner 側に置く）
//! - `finish` が終了コードから終端状態（Succeeded / Failed）を決める

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RunId;
use super::outcome::ExitStatus;
use super::state::RunState;
use crate::error::HarnessError;

/// RunRecord は `JobRunner` が持つ run の状態を追跡する
///
/// 不正な遷移は黙って適用されず、`HarnessError::InvalidTransition` になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: RunId,
    pub state: RunState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Set once the run reaches a terminal state.
    pub exit_status: Option<ExitStatus>,
}

impl RunRecord {
    pub fn new(run_id: RunId, now: DateTime<Utc>) -> Self {
        Self {
            run_id,
            state: RunState::Start,
            created_at: now,
            updated_at: now,
            exit_status: None,
        }
    }

    /// 状態を `next` に進める
    ///
    /// # Errors
    /// - 遷移表にない辺なら `HarnessError::InvalidTransition`（状態は変わらない）
    pub fn transition(&mut self, next: RunState, now: DateTime<Utc>) -> Result<(), HarnessError> {
        if !self.state.can_transition_to(next) {
            return Err(HarnessError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        self.updated_at = now;
        Ok(())
    }

    /// `status` に対応する終端状態へ進め、終了コードを記録する
    ///
    /// - `0` → `Succeeded`
    /// - それ以外 → `Failed`
    pub fn finish(&mut self, status: ExitStatus, now: DateTime<Utc>) -> Result<(), HarnessError> {
        let next = if status.is_success() {
            RunState::Succeeded
        } else {
            RunState::Failed
        };
        self.transition(next, now)?;
        self.exit_status = Some(status);
        Ok(())
    }

    /// 作成から最後の更新までの経過時間（ミリ秒）
    pub fn elapsed_ms(&self) -> u64 {
        (self.updated_at - self.created_at)
            .num_milliseconds()
            .max(0) as u64
    }
}
