//! Domain model - ハーネスのドメイン型
//!
//! I/O を持たない値型だけを置く。
//!
//! - **ids**: `RunId`（ULID）
//! - **outcome**: `ExitStatus`
//! - **state**: `RunState` 状態機械
//! - **record**: `RunRecord`（状態と時刻の記録）
//! - **events**: `RunEvent`

pub mod events;
pub mod ids;
pub mod outcome;
pub mod record;
pub mod state;

pub use events::RunEvent;
pub use ids::RunId;
pub use outcome::ExitStatus;
pub use record::RunRecord;
pub use state::RunState;
