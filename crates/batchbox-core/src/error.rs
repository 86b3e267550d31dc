use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{ExitStatus, RunState};

/// The output directory could not be made ready.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("output path {0} exists and is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to create output directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to inspect output path {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("output directory {path} is not writable: {source}")]
    NotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An execution environment entry could not be applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("invalid environment variable name {0:?}")]
    InvalidName(String),

    #[error("environment variable {0} has a value containing a NUL byte")]
    InvalidValue(String),

    #[error("environment variable {name}={value:?} conflicts with the {flag} flag (expects {expected:?})")]
    Conflict {
        name: String,
        value: String,
        flag: &'static str,
        expected: &'static str,
    },
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Deserialization(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// A task failed before it could report an exit status of its own.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TaskError {
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        TaskError::Other(err.into())
    }

    /// Exit status used when the task never produced one itself.
    ///
    /// Spawn failures follow the shell convention (127 not found, 126 not executable).
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            TaskError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ExitStatus::NOT_FOUND
            }
            TaskError::Spawn { .. } => ExitStatus::NOT_EXECUTABLE,
            TaskError::Wait { .. } | TaskError::Other(_) => ExitStatus::FAILURE,
        }
    }
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("task failed: {0}")]
    Task(#[from] TaskError),

    #[error("invalid run state transition {from:?} -> {to:?}")]
    InvalidTransition { from: RunState, to: RunState },
}

impl HarnessError {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            HarnessError::Setup(_) => ExitStatus::SETUP_FAILURE,
            HarnessError::Environment(_) => ExitStatus::ENVIRONMENT_FAILURE,
            HarnessError::Config(_) => ExitStatus::CONFIG_FAILURE,
            HarnessError::Task(e) => e.exit_status(),
            HarnessError::InvalidTransition { .. } => ExitStatus::INTERNAL_FAILURE,
        }
    }
}
