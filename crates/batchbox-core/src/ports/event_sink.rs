//! EventSink port - ライフサイクルイベントの出力先
//!
//! `JobRunner` は状態が変わるたびに `RunEvent` を 1 つ emit する。
//! イベントをどこへ流すかは runner の関心事ではないので、この port で切り離す。
//!
//! # 実装（`impls::event_sinks`）
//! - **TracingEventSink**: イベントごとに構造化ログを 1 行出す（本番用）
//! - **MemoryEventSink**: イベントを保持してテストで検証する
//!
//! # 発行順序
//! 1. `Prepared`（失敗時は `SetupFailed` で終わり）
//! 2. `TaskStarted`
//! 3. `TaskFinished`

use crate::domain::RunEvent;

/// EventSink はイベントを受け取る port
///
/// # 設計原則
/// - `emit` は失敗しない（出力先の障害でタスクの終了コードを変えない）
/// - 呼び出し側はイベントを借用で渡す（sink 側で必要なら clone する）
///
/// # Thread Safety
/// - `Send + Sync` を要求（`Arc<dyn EventSink>` として保持される）
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &RunEvent);
}
