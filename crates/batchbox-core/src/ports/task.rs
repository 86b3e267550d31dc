//! Task port - 不透明な作業単位
//!
//! runner はタスクの中身を一切見ない。`TaskContext` を渡し、結果を 1 回だけ
//! await して、終了コードをそのままプロセス境界へ渡す。
//!
//! # 実装
//! - **SitemapTask**（batchbox-sitemap）: サイトを巡回して `sitemap.xml` を書く
//! - **CommandTask**（`impls::command`）: 外部プログラムを子プロセスとして実行する
//!
//! # 契約
//! - `run` は 1 プロセスにつき高々 1 回しか呼ばれない
//! - 呼ばれた時点で出力ディレクトリは存在し、書き込み可能
//! - 出力ディレクトリに残したものがそのまま成果物になる（後片付けはされない）

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::app::environment::AppliedEnvironment;
use crate::domain::{ExitStatus, RunId};
use crate::error::TaskError;
use crate::ports::Clock;

/// Task はハーネスが 1 回だけ実行する作業単位
///
/// # Thread Safety
/// - `Send + Sync` を要求（tokio ランタイム上で `&dyn Task` として渡される）
///
/// # Example
/// ```ignore
/// struct Hello;
///
/// #[async_trait]
/// impl Task for Hello {
///     fn name(&self) -> &str {
///         "hello"
///     }
///
///     async fn run(&self, ctx: &TaskContext) -> Result<ExitStatus, TaskError> {
///         std::fs::write(ctx.output_dir().join("hello.txt"), "hi").map_err(TaskError::other)?;
///         Ok(ExitStatus::SUCCESS)
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync {
    /// ログとイベントに使う短い名前
    fn name(&self) -> &str;

    /// タスクを実行する
    ///
    /// # Returns
    /// - `Ok(status)`: その終了コードをそのまま使う（非 0 も失敗扱いで素通し）
    /// - `Err(e)`: 終了コードを決められなかった。runner は `TaskError::exit_status` を使う
    async fn run(&self, ctx: &TaskContext) -> Result<ExitStatus, TaskError>;
}

/// TaskContext はタスクが頼ってよいもの一式
///
/// `prepare()` が成功した後に runner が組み立てるので、
/// `output_dir` は存在し書き込み可能であることが保証されている。
///
/// # 内容
/// - **run_id**: この起動の `RunId`（ログの相関に使う）
/// - **output_dir**: 成果物の書き出し先
/// - **environment**: 適用済みの実行環境（子プロセスへ渡す変数）
/// - **clock**: runner と同じ `Clock`
#[derive(Clone)]
pub struct TaskContext {
    run_id: RunId,
    output_dir: PathBuf,
    environment: AppliedEnvironment,
    clock: Arc<dyn Clock>,
}

impl TaskContext {
    pub fn new(
        run_id: RunId,
        output_dir: PathBuf,
        environment: AppliedEnvironment,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            run_id,
            output_dir,
            environment,
            clock,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn environment(&self) -> &AppliedEnvironment {
        &self.environment
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
