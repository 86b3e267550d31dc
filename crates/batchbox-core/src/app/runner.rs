//! JobRunner - 出力ディレクトリを用意し、タスクを 1 回実行し、終了コードを返す
//!
//! ```text
//! START -> PREPARING -> RUNNING -> { SUCCEEDED, FAILED } -> EXIT
//!              \-> FAILED (setup error, task never invoked)
//! ```
//!
//! # 主要コンポーネント
//! - **prepare**: 出力ディレクトリの作成・書き込み確認と実行環境の適用
//! - **run**: タスクを `task` span の中で 1 回だけ実行する
//! - **finalize**: 終了コードをプロセス境界へ渡す（後片付けはしない）
//! - **execute**: 上の 3 つを順に呼ぶ
//!
//! `run` は runner を消費するので、タスクは runner ごと、
//! つまりプロセスごとに高々 1 回しか呼ばれない。

use std::sync::Arc;
use std::time::Instant;

use tracing::{Instrument, error, info, info_span, warn};

use crate::app::environment::AppliedEnvironment;
use crate::app::workspace::{PreparedOutput, ensure_output_dir};
use crate::config::HarnessConfig;
use crate::domain::{ExitStatus, RunEvent, RunId, RunRecord, RunState};
use crate::error::HarnessError;
use crate::ports::{Clock, EventSink, IdGenerator, Task, TaskContext};

struct Prepared {
    output: PreparedOutput,
    environment: AppliedEnvironment,
}

/// JobRunner は 1 回の起動を最初から最後まで管理する
///
/// # 依存（注入される port）
/// - `Clock`: `RunRecord` の時刻
/// - `IdGenerator`: 生成時に `RunId` を 1 つだけ取る
/// - `EventSink`: ライフサイクルイベントの出力先
pub struct JobRunner {
    config: HarnessConfig,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
    record: RunRecord,
    prepared: Option<Prepared>,
}

/// What `run` hands back: the final record plus either the task's exit
/// status or the error that stopped the run.
#[derive(Debug)]
pub struct RunResult {
    pub record: RunRecord,
    pub outcome: Result<ExitStatus, HarnessError>,
}

impl RunResult {
    /// Process exit status for this result. A task status is passed through unchanged.
    pub fn exit_status(&self) -> ExitStatus {
        match &self.outcome {
            Ok(status) => *status,
            Err(err) => err.exit_status(),
        }
    }
}

impl JobRunner {
    pub fn new(
        config: HarnessConfig,
        clock: Arc<dyn Clock>,
        ids: &dyn IdGenerator,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let record = RunRecord::new(ids.generate_run_id(), clock.now());
        Self {
            config,
            clock,
            events,
            record,
            prepared: None,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.record.run_id
    }

    pub fn state(&self) -> RunState {
        self.record.state
    }

    pub fn record(&self) -> &RunRecord {
        &self.record
    }

    /// Ensure the output directory exists and is writable, then apply the
    /// execution environment.
    ///
    /// Calling it again while still preparing re-checks both and changes nothing.
    /// On failure the run moves to `Failed` and cannot be prepared again.
    pub fn prepare(&mut self) -> Result<&PreparedOutput, HarnessError> {
        match self.record.state {
            RunState::Start => self
                .record
                .transition(RunState::Preparing, self.clock.now())?,
            RunState::Preparing => {}
            other => {
                return Err(HarnessError::InvalidTransition {
                    from: other,
                    to: RunState::Preparing,
                });
            }
        }

        match self.prepare_inner() {
            Ok(prepared) => {
                info!(
                    run_id = %self.record.run_id,
                    output_dir = %prepared.output.path().display(),
                    created = prepared.output.created(),
                    unbuffered_output = prepared.environment.unbuffered_output(),
                    no_bytecode_cache = prepared.environment.no_bytecode_cache(),
                    env_vars = prepared.environment.var_count(),
                    "workspace prepared"
                );
                self.events.emit(&RunEvent::Prepared {
                    run_id: self.record.run_id,
                    output_dir: prepared.output.path().to_path_buf(),
                    created: prepared.output.created(),
                });
                Ok(&self.prepared.insert(prepared).output)
            }
            Err(err) => {
                let status = err.exit_status();
                error!(run_id = %self.record.run_id, exit_status = %status, "setup failed: {err}");
                self.record.finish(status, self.clock.now())?;
                self.events.emit(&RunEvent::SetupFailed {
                    run_id: self.record.run_id,
                    reason: err.to_string(),
                    exit_status: status,
                });
                Err(err)
            }
        }
    }

    fn prepare_inner(&self) -> Result<Prepared, HarnessError> {
        let output = ensure_output_dir(&self.config.output_dir)?;
        let environment = self.config.environment.apply()?;
        Ok(Prepared {
            output,
            environment,
        })
    }

    /// タスクを 1 回だけ実行する
    ///
    /// # フロー
    /// 1. `prepare` がまだなら先に呼ぶ（失敗したらタスクは実行しない）
    /// 2. `Running` へ遷移し `TaskStarted` を emit
    /// 3. `task.run` を `task` span の中で await
    /// 4. 終了コードで `Succeeded` / `Failed` へ遷移し `TaskFinished` を emit
    pub async fn run(mut self, task: &dyn Task) -> RunResult {
        let outcome = self.run_inner(task).await;
        if self.record.state.is_terminal() {
            info!(
                run_id = %self.record.run_id,
                state = ?self.record.state,
                elapsed_ms = self.record.elapsed_ms(),
                "run finished"
            );
        }
        RunResult {
            record: self.record,
            outcome,
        }
    }

    async fn run_inner(&mut self, task: &dyn Task) -> Result<ExitStatus, HarnessError> {
        if self.prepared.is_none() {
            self.prepare()?;
        }
        let Some(Prepared {
            output,
            environment,
        }) = self.prepared.take()
        else {
            return Err(HarnessError::InvalidTransition {
                from: self.record.state,
                to: RunState::Running,
            });
        };

        let run_id = self.record.run_id;
        self.record.transition(RunState::Running, self.clock.now())?;

        let ctx = TaskContext::new(
            run_id,
            output.path().to_path_buf(),
            environment,
            Arc::clone(&self.clock),
        );

        info!(run_id = %run_id, task = task.name(), "task started");
        self.events.emit(&RunEvent::TaskStarted {
            run_id,
            task: task.name().to_string(),
        });

        let started = Instant::now();
        let span = info_span!("task", run_id = %run_id, task = task.name());
        let result = task.run(&ctx).instrument(span).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let (status, outcome) = match result {
            Ok(status) => (status, Ok(status)),
            Err(err) => {
                error!(run_id = %run_id, task = task.name(), "task error: {err}");
                (err.exit_status(), Err(HarnessError::Task(err)))
            }
        };

        self.record.finish(status, self.clock.now())?;
        if status.is_success() {
            info!(run_id = %run_id, task = task.name(), elapsed_ms, "task succeeded");
        } else {
            warn!(run_id = %run_id, task = task.name(), exit_status = %status, elapsed_ms, "task failed");
        }
        self.events.emit(&RunEvent::TaskFinished {
            run_id,
            task: task.name().to_string(),
            exit_status: status,
            elapsed_ms,
        });

        outcome
    }

    /// Exit status to hand to the process boundary. No cleanup happens here:
    /// whatever the task left in the output directory is the deliverable.
    pub fn finalize(result: &RunResult) -> ExitStatus {
        result.exit_status()
    }

    /// `prepare` -> `run` -> `finalize` をまとめて行う
    ///
    /// # Example
    /// ```no_run
    /// use std::sync::Arc;
    /// use batchbox_core::impls::{CommandTask, TracingEventSink};
    /// use batchbox_core::ports::{SystemClock, UlidGenerator};
    /// use batchbox_core::{HarnessConfig, JobRunner};
    ///
    /// # async fn demo() {
    /// let runner = JobRunner::new(
    ///     HarnessConfig::default(),
    ///     Arc::new(SystemClock),
    ///     &UlidGenerator::new(SystemClock),
    ///     Arc::new(TracingEventSink),
    /// );
    /// let task = CommandTask::new("true", Vec::<String>::new());
    /// let status = runner.execute(&task).await;
    /// std::process::exit(status.code());
    /// # }
    /// ```
    pub async fn execute(self, task: &dyn Task) -> ExitStatus {
        let result = self.run(task).await;
        Self::finalize(&result)
    }
}
