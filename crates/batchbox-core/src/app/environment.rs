//! Execution environment - タスク開始前に確定させる設定
//!
//! ハーネスは自分のプロセス環境を書き換えない。設定は `prepare()` で
//! 1 回だけ検証され、変更不可の `AppliedEnvironment` に変換される。
//! タスクはそれを読み、`CommandTask` は子プロセスへそのまま渡す。
//!
//! # フラグと変数
//! - **unbuffered_output** → `PYTHONUNBUFFERED=1`
//! - **no_bytecode_cache** → `PYTHONDONTWRITEBYTECODE=1`
//!
//! # 検証
//! 1. 変数名が空、または `=` / NUL を含む → `EnvironmentError::InvalidName`
//! 2. 値が NUL を含む → `EnvironmentError::InvalidValue`
//! 3. 有効なフラグの変数を空文字で上書き → `EnvironmentError::Conflict`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EnvironmentError;

/// Variable a child interpreter reads to disable stdout/stderr buffering.
pub const UNBUFFERED_VAR: &str = "PYTHONUNBUFFERED";

/// Variable a child interpreter reads to skip writing bytecode caches.
pub const NO_BYTECODE_CACHE_VAR: &str = "PYTHONDONTWRITEBYTECODE";

/// Requested execution environment, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionEnvironment {
    /// Flush every stdout/stderr write immediately.
    pub unbuffered_output: bool,

    /// Do not persist compiled-artifact caches next to the workspace code.
    pub no_bytecode_cache: bool,

    /// Extra variables passed to the task as-is.
    pub vars: BTreeMap<String, String>,
}

impl Default for ExecutionEnvironment {
    fn default() -> Self {
        Self {
            unbuffered_output: true,
            no_bytecode_cache: true,
            vars: BTreeMap::new(),
        }
    }
}

impl ExecutionEnvironment {
    /// すべての変数を検証し、フラグを変数に展開する
    ///
    /// ユーザー指定の空でない値はフラグの既定値 `1` より優先される。
    pub fn apply(&self) -> Result<AppliedEnvironment, EnvironmentError> {
        let mut vars = BTreeMap::new();
        for (name, value) in &self.vars {
            validate_name(name)?;
            if value.contains('\0') {
                return Err(EnvironmentError::InvalidValue(name.clone()));
            }
            vars.insert(name.clone(), value.clone());
        }

        if self.unbuffered_output {
            enable_flag(&mut vars, UNBUFFERED_VAR, "unbuffered_output")?;
        }
        if self.no_bytecode_cache {
            enable_flag(&mut vars, NO_BYTECODE_CACHE_VAR, "no_bytecode_cache")?;
        }

        Ok(AppliedEnvironment {
            unbuffered_output: self.unbuffered_output,
            no_bytecode_cache: self.no_bytecode_cache,
            vars,
        })
    }
}

fn validate_name(name: &str) -> Result<(), EnvironmentError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(EnvironmentError::InvalidName(name.to_string()));
    }
    Ok(())
}

// The interpreter treats any non-empty value as "on"; an explicit empty value
// would silently switch the flag off again.
fn enable_flag(
    vars: &mut BTreeMap<String, String>,
    name: &str,
    flag: &'static str,
) -> Result<(), EnvironmentError> {
    match vars.get(name) {
        Some(value) if value.is_empty() => Err(EnvironmentError::Conflict {
            name: name.to_string(),
            value: value.clone(),
            flag,
            expected: "a non-empty value",
        }),
        Some(_) => Ok(()),
        None => {
            vars.insert(name.to_string(), "1".to_string());
            Ok(())
        }
    }
}

/// AppliedEnvironment は 1 回の run のための検証済み・変更不可の環境
///
/// # Thread Safety
/// - 不変な値なので `TaskContext` ごと clone して共有できる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEnvironment {
    unbuffered_output: bool,
    no_bytecode_cache: bool,
    vars: BTreeMap<String, String>,
}

impl AppliedEnvironment {
    pub fn unbuffered_output(&self) -> bool {
        self.unbuffered_output
    }

    pub fn no_bytecode_cache(&self) -> bool {
        self.no_bytecode_cache
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of rendered variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }
}
