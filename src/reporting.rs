//! # Reporting Module / 报告模块
//!
//! This module renders the aggregated matrix: the tab-separated table written
//! to both the console and the result file, progress and summary lines on the
//! console, and an optional JSON export of the raw samples.
//!
//! 此模块负责渲染聚合后的矩阵：同时写入控制台和结果文件的制表符分隔表格、
//! 控制台上的进度和摘要信息，以及可选的原始样本 JSON 导出。

pub mod console;
pub mod json;
pub mod table;

use anyhow::Result;

use crate::core::models::ReportTable;

/// Destination of the final report. The controller publishes exactly once per run.
/// 最终报告的目标。控制器每次运行只发布一次。
pub trait ReportSink {
    fn publish(&mut self, table: &ReportTable) -> Result<()>;
}

// Re-export common reporting functions
pub use console::print_summary;
pub use json::write_json_report;
pub use table::{TsvReporter, render_table};
