//! CommandTask - run an external program as the task.
//!
//! The child inherits stdin/stdout/stderr, so its log stream reaches the
//! container log sink directly. It gets the applied execution environment
//! plus `BATCHBOX_OUTPUT_DIR`, and its exit status is returned verbatim.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::OUTPUT_DIR_ENV;
use crate::domain::ExitStatus;
use crate::error::TaskError;
use crate::ports::{Task, TaskContext};

pub struct CommandTask {
    program: String,
    args: Vec<String>,
}

impl CommandTask {
    pub fn new(program: impl Into<String>, args: Vec<impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn full_command(&self) -> String {
        if self.args.is_empty() {
            return self.program.clone();
        }
        format!("{} {}", self.program, self.args.join(" "))
    }
}

#[async_trait]
impl Task for CommandTask {
    fn name(&self) -> &str {
        &self.program
    }

    async fn run(&self, ctx: &TaskContext) -> Result<ExitStatus, TaskError> {
        debug!(command = %self.full_command(), "spawning task process");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .envs(ctx.environment().iter())
            .env(OUTPUT_DIR_ENV, ctx.output_dir())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| TaskError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let status = child.wait().await.map_err(|source| TaskError::Wait {
            program: self.program.clone(),
            source,
        })?;

        Ok(ExitStatus::from(status))
    }
}
