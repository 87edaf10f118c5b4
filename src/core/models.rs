//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the harness:
//! the two matrix axes, cells, per-run outcomes, the per-cell sample sequence,
//! aggregate statistics and the report grid.
//!
//! 此模块定义了整个基准测试工具中使用的核心数据结构：
//! 矩阵的两个轴、单元格、单次运行结果、单元格样本序列、聚合统计和报告网格。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The literal token rendered for a cell without a numeric statistic.
/// 没有数值统计的单元格所渲染的固定文本。
pub const NOT_COMPLETED: &str = "not completed";

/// Opaque name of one benchmark (one row of the matrix).
/// 单个基准测试的名称（矩阵的一行）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkId(String);

/// Opaque name of one run configuration (one column of the matrix).
/// 单个运行配置的名称（矩阵的一列）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigId(String);

macro_rules! impl_axis_id {
    ($ty:ident) => {
        impl $ty {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(name: String) -> Self {
                Self(name)
            }
        }
    };
}

impl_axis_id!(BenchmarkId);
impl_axis_id!(ConfigId);

/// One (benchmark, configuration) intersection of the matrix. Immutable once created.
/// 矩阵中的一个（基准测试，配置）交点。创建后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    benchmark: BenchmarkId,
    config: ConfigId,
}

impl Cell {
    pub fn new(benchmark: BenchmarkId, config: ConfigId) -> Self {
        Self { benchmark, config }
    }

    pub fn benchmark(&self) -> &BenchmarkId {
        &self.benchmark
    }

    pub fn config(&self) -> &ConfigId {
        &self.config
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.benchmark, self.config)
    }
}

/// Outcome of one invocation of the external tool for a cell.
/// 单元格一次外部工具调用的结果。
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    /// The tool exited with status zero after `elapsed` wall-clock time.
    /// 工具以状态码零退出，耗时 `elapsed`。
    Succeeded { elapsed: Duration },
    /// The tool exited non-zero or was terminated abnormally.
    /// 工具以非零状态退出或异常终止。
    Failed {
        /// `None` when the process was killed by a signal.
        /// 进程被信号终止时为 `None`。
        exit_code: Option<i32>,
        /// Combined stdout and stderr of the failed run.
        /// 失败运行的 stdout 与 stderr 合并输出。
        output: String,
    },
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RunResult::Succeeded { .. })
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            RunResult::Succeeded { elapsed } => Some(*elapsed),
            RunResult::Failed { .. } => None,
        }
    }
}

/// Ordered, append-only sequence of run outcomes for one cell.
/// Closing it freezes the sequence; later appends are rejected.
///
/// 单个单元格的有序、仅追加的运行结果序列。
/// 关闭后序列被冻结，之后的追加会被拒绝。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellResults {
    runs: Vec<RunResult>,
    closed: bool,
}

impl CellResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one run in invocation order. Returns `false` if the sequence is closed.
    /// 按调用顺序追加一次运行。如果序列已关闭则返回 `false`。
    pub fn push(&mut self, result: RunResult) -> bool {
        if self.closed {
            return false;
        }
        self.runs.push(result);
        true
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn runs(&self) -> &[RunResult] {
        &self.runs
    }

    pub fn failures(&self) -> usize {
        self.runs.iter().filter(|r| !r.is_success()).count()
    }

    /// Durations of every successful run, in seconds, in invocation order.
    /// 所有成功运行的耗时（秒），按调用顺序排列。
    pub fn durations_secs(&self) -> Vec<f64> {
        self.runs
            .iter()
            .filter_map(RunResult::elapsed)
            .map(|d| d.as_secs_f64())
            .collect()
    }
}

impl FromIterator<RunResult> for CellResults {
    fn from_iter<I: IntoIterator<Item = RunResult>>(iter: I) -> Self {
        Self {
            runs: iter.into_iter().collect(),
            closed: true,
        }
    }
}

/// The per-cell summary: a trimmed mean in seconds, or the "not completed" marker.
/// 每个单元格的摘要：以秒为单位的截尾均值，或"未完成"标记。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "seconds", rename_all = "snake_case")]
pub enum AggregateStat {
    Value(f64),
    NotCompleted,
}

impl AggregateStat {
    pub fn value(&self) -> Option<f64> {
        match self {
            AggregateStat::Value(v) => Some(*v),
            AggregateStat::NotCompleted => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AggregateStat::Value(_))
    }
}

impl fmt::Display for AggregateStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateStat::Value(v) => write!(f, "{}", v),
            AggregateStat::NotCompleted => f.write_str(NOT_COMPLETED),
        }
    }
}

/// The benchmark x configuration grid of aggregate statistics.
///
/// Rows and columns keep the order supplied at construction. Every slot starts
/// as [`AggregateStat::NotCompleted`] and is set at most once.
///
/// 基准测试 x 配置的聚合统计网格。
/// 行和列保持构造时提供的顺序。每个位置初始为 `NotCompleted`，最多设置一次。
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    benchmarks: Vec<BenchmarkId>,
    configs: Vec<ConfigId>,
    stats: Vec<Option<AggregateStat>>,
}

impl ReportTable {
    pub fn new(benchmarks: Vec<BenchmarkId>, configs: Vec<ConfigId>) -> Self {
        let slots = benchmarks.len() * configs.len();
        Self {
            benchmarks,
            configs,
            stats: vec![None; slots],
        }
    }

    pub fn benchmarks(&self) -> &[BenchmarkId] {
        &self.benchmarks
    }

    pub fn configs(&self) -> &[ConfigId] {
        &self.configs
    }

    fn index_of(&self, cell: &Cell) -> Option<usize> {
        let row = self.benchmarks.iter().position(|b| b == cell.benchmark())?;
        let col = self.configs.iter().position(|c| c == cell.config())?;
        Some(row * self.configs.len() + col)
    }

    /// Records the statistic for `cell`. Returns `false` if the cell is not part
    /// of the grid or already has a statistic.
    ///
    /// 记录 `cell` 的统计值。如果单元格不在网格中或已有统计值，则返回 `false`。
    pub fn record(&mut self, cell: &Cell, stat: AggregateStat) -> bool {
        match self.index_of(cell) {
            Some(idx) if self.stats[idx].is_none() => {
                self.stats[idx] = Some(stat);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, cell: &Cell) -> AggregateStat {
        self.index_of(cell)
            .and_then(|idx| self.stats[idx])
            .unwrap_or(AggregateStat::NotCompleted)
    }

    /// Iterates rows in benchmark order, each with its statistics in configuration order.
    /// 按基准测试顺序遍历各行，每行的统计值按配置顺序排列。
    pub fn rows(&self) -> impl Iterator<Item = (&BenchmarkId, Vec<AggregateStat>)> + '_ {
        let width = self.configs.len();
        self.benchmarks.iter().enumerate().map(move |(row, bench)| {
            let stats = (0..width)
                .map(|col| self.stats[row * width + col].unwrap_or(AggregateStat::NotCompleted))
                .collect();
            (bench, stats)
        })
    }

    pub fn completed_cells(&self) -> usize {
        self.stats
            .iter()
            .filter(|s| matches!(s, Some(AggregateStat::Value(_))))
            .count()
    }

    pub fn total_cells(&self) -> usize {
        self.stats.len()
    }
}
