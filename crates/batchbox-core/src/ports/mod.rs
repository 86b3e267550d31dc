//! Ports - ハーネスの継ぎ目
//!
//! runner が直接依存してはいけないものを trait の裏に隠す。
//!
//! # 主要コンポーネント
//! - **Task**: 作業そのもの
//! - **Clock**: 時刻
//! - **IdGenerator**: `RunId` の生成
//! - **EventSink**: ライフサイクルイベントの出力先
//!
//! # テスト容易性
//! テストでは `FixedClock` と `MemoryEventSink` を注入し、
//! 時刻とイベント列を決定的に検証する。

pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod task;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::task::{Task, TaskContext};
