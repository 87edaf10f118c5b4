//! # Fault Taxonomy / 故障分类
//!
//! A failed run is data, recorded as [`RunResult::Failed`](crate::core::models::RunResult)
//! inside the cell. Anything that prevents the harness from observing a run at all
//! is a [`SchedulingFault`], which stops the matrix and aborts the harness.
//!
//! 失败的运行是数据，作为 `RunResult::Failed` 记录在单元格中。
//! 任何导致无法观察运行的情况都是 `SchedulingFault`，它会停止矩阵并中止整个运行。

use std::path::PathBuf;
use thiserror::Error;

/// Fatal, harness-global errors raised while scheduling the matrix.
/// 调度矩阵时产生的致命全局错误。
#[derive(Debug, Error)]
pub enum SchedulingFault {
    /// The benchmark's working directory does not exist or is not a directory.
    /// 基准测试的工作目录不存在或不是目录。
    #[error("working directory '{}' is not accessible: {source}", path.display())]
    MissingWorkingDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build tool could not be launched.
    /// 无法启动构建工具。
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool was launched but its termination could not be observed.
    /// 工具已启动，但无法观察到其终止。
    #[error("failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The harness was interrupted (e.g. Ctrl-C) while a run was in flight.
    /// 运行进行中时整个工具被中断（例如 Ctrl-C）。
    #[error("interrupted while running `{command}`")]
    Interrupted { command: String },
}
