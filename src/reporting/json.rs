//! # JSON Reporting Module / JSON 报告模块
//!
//! Optional machine-readable export of a harness run: every cell's raw samples,
//! its aggregate statistic, the final state and the run's timestamps.
//!
//! 可选的机器可读导出：每个单元格的原始样本、聚合统计、最终状态和运行时间戳。

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

use crate::core::controller::{HarnessRun, HarnessState};
use crate::core::models::{AggregateStat, RunResult};
use crate::infra::fs;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    state: HarnessState,
    fault: Option<String>,
    started_at: DateTime<Local>,
    finished_at: DateTime<Local>,
    benchmarks: Vec<&'a str>,
    configs: Vec<&'a str>,
    cells: Vec<JsonCell<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonCell<'a> {
    benchmark: &'a str,
    config: &'a str,
    runs: Vec<JsonRun>,
    aggregate: AggregateStat,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum JsonRun {
    Succeeded { seconds: f64 },
    Failed { exit_code: Option<i32> },
}

impl From<&RunResult> for JsonRun {
    fn from(result: &RunResult) -> Self {
        match result {
            RunResult::Succeeded { elapsed } => JsonRun::Succeeded {
                seconds: elapsed.as_secs_f64(),
            },
            RunResult::Failed { exit_code, .. } => JsonRun::Failed {
                exit_code: *exit_code,
            },
        }
    }
}

/// Serializes `run` to pretty-printed JSON.
/// 将 `run` 序列化为格式化的 JSON。
pub fn render_json_report(run: &HarnessRun) -> Result<String> {
    let report = JsonReport {
        state: run.state,
        fault: run.fault.as_ref().map(|f| f.to_string()),
        started_at: run.started_at,
        finished_at: run.finished_at,
        benchmarks: run.table.benchmarks().iter().map(|b| b.as_str()).collect(),
        configs: run.table.configs().iter().map(|c| c.as_str()).collect(),
        cells: run
            .records
            .iter()
            .map(|record| JsonCell {
                benchmark: record.cell.benchmark().as_str(),
                config: record.cell.config().as_str(),
                runs: record.results.runs().iter().map(JsonRun::from).collect(),
                aggregate: record.stat,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")
}

/// Writes the JSON export of `run` to `path`.
/// 将 `run` 的 JSON 导出写入 `path`。
pub fn write_json_report(run: &HarnessRun, path: &Path) -> Result<()> {
    let json = render_json_report(run)?;
    fs::write_result_file(path, &json)
}
