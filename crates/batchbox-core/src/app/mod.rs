//! App - ハーネス本体
//!
//! # 主要コンポーネント
//! - **environment**: 実行環境の検証と変数への展開
//! - **workspace**: 出力ディレクトリの準備
//! - **runner**: `JobRunner`（prepare -> run -> finalize）

pub mod environment;
pub mod runner;
pub mod workspace;

pub use self::environment::{AppliedEnvironment, ExecutionEnvironment};
pub use self::runner::{JobRunner, RunResult};
pub use self::workspace::{DEFAULT_OUTPUT_DIR, PreparedOutput, ensure_output_dir};
