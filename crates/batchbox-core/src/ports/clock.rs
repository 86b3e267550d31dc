//! Clock port - 時刻の抽象化
//!
//! ハーネスが「今」を知る唯一の経路。`RunRecord` の開始・終了時刻と、
//! タスク側の日付依存の値（sitemap の `lastmod` など）はすべてここを通る。
//!
//! # 実装
//! - **SystemClock**: 本番用（`Utc::now()`）
//! - **FixedClock**: テスト用（常に同じ時刻を返す）
//!
//! # テスト容易性
//! `FixedClock` を注入すると経過時間は常に 0 になり、
//! 生成される `RunId` のタイムスタンプ部分も固定される。

use chrono::{DateTime, Utc};

/// Clock は現在時刻を返す port
///
/// # Thread Safety
/// - `Send + Sync` を要求（`Arc<dyn Clock>` として runner とタスクで共有する）
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 実時刻を返す Clock（本番用）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 常に同じ時刻を返す Clock（テスト用）
///
/// # Example
/// ```
/// use batchbox_core::ports::{Clock, FixedClock};
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 17, 0, 0, 0).unwrap();
/// let clock = FixedClock::new(at);
/// assert_eq!(clock.now(), clock.now());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
