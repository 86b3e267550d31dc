//! Exit status - ハーネス自身が解釈する唯一の結果
//!
//! タスクが内部で何をしても、runner に見えるのは `ExitStatus` だけ。
//! `0` が成功、それ以外は失敗で、値はそのままプロセス境界へ渡る。
//!
//! # ハーネスが選ぶコード
//! | code | 意味 |
//! |---|---|
//! | 1 | タスクがコードを決められずにエラー終了 |
//! | 2 | 出力ディレクトリを用意できない |
//! | 3 | 実行環境を適用できない |
//! | 70 | 内部エラー（sysexits `EX_SOFTWARE`） |
//! | 78 | 設定エラー（sysexits `EX_CONFIG`） |
//! | 126 / 127 | プログラムを実行できない / 見つからない |
//! | 128 + n | 子プロセスがシグナル n で終了 |

use serde::{Deserialize, Serialize};
use std::fmt;

/// タスクが報告した終了コード（セットアップ失敗時はハーネスが選ぶ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExitStatus(i32);

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Generic task failure (a task that errored without choosing a code).
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// The output directory could not be prepared.
    pub const SETUP_FAILURE: ExitStatus = ExitStatus(2);

    /// The execution environment could not be applied.
    pub const ENVIRONMENT_FAILURE: ExitStatus = ExitStatus(3);

    /// Internal misuse of the run state machine (sysexits `EX_SOFTWARE`).
    pub const INTERNAL_FAILURE: ExitStatus = ExitStatus(70);

    /// Configuration could not be loaded (sysexits `EX_CONFIG`).
    pub const CONFIG_FAILURE: ExitStatus = ExitStatus(78);

    /// The task program exists but could not be executed.
    pub const NOT_EXECUTABLE: ExitStatus = ExitStatus(126);

    /// The task program was not found.
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);

    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    pub const fn code(self) -> i32 {
        self.0
    }

    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// Child processes terminated by a signal map to `128 + signal`, like a shell does.
impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self(128 + signal);
            }
        }

        Self::FAILURE
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
