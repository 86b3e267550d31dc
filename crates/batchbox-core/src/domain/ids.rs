//! Run identifiers - 起動ごとの ID
//!
//! 1 回のプロセス起動につき `RunId` はちょうど 1 つ。run の tracing span と
//! すべての `RunEvent` に付くので、外部のログ基盤でハーネスとタスクの
//! ログ行を突き合わせられる。
//!
//! ## 表示形式
//! - `run-<ULID>`（例: `run-01HXYZ...`）
//! - 中身は ULID なので生成時刻順にソートできる

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// RunId は 1 回のハーネス起動を識別する
///
/// # 設計原則
/// - `#[repr(transparent)]`: メモリ上は `Ulid` と同じ大きさ
/// - `Copy`: ログやイベントに気軽に渡せる
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(Ulid);

impl RunId {
    const PREFIX: &'static str = "run-";

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for RunId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_run_prefix() {
        let ulid = Ulid::new();
        let id = RunId::from_ulid(ulid);
        assert_eq!(id.to_string(), format!("run-{ulid}"));
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn run_ids_sort_by_creation_time() {
        let id1 = RunId::from(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RunId::from(Ulid::new());

        assert!(id1 < id2);
    }

    #[test]
    fn run_id_is_as_small_as_a_ulid() {
        assert_eq!(std::mem::size_of::<RunId>(), std::mem::size_of::<Ulid>());
    }
}
