//! # Configuration Module / 配置模块
//!
//! Defines the `BenchMatrix.toml` file format: the two ordered axes, the run
//! count and how the external build tool is invoked for each cell.
//!
//! 定义 `BenchMatrix.toml` 文件格式：两个有序轴、运行次数，
//! 以及如何为每个单元格调用外部构建工具。

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::infra::t;

/// Default name of the configuration file.
/// 配置文件的默认名称。
pub const DEFAULT_CONFIG_FILE: &str = "BenchMatrix.toml";

/// What the scheduler does with the rest of a cell after one of its runs fails.
/// 单元格中某次运行失败后，调度器如何处理该单元格的剩余运行。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunFailurePolicy {
    /// Keep repeating the cell; the aggregation gap marks it incomplete.
    /// 继续重复该单元格；聚合缺口会将其标记为未完成。
    #[default]
    Continue,
    /// Stop the cell's remaining repetitions and move on to the next cell.
    /// 停止该单元格的剩余重复，转到下一个单元格。
    AbandonCell,
}

/// The whole harness configuration, loaded from a TOML file.
/// 从 TOML 文件加载的完整配置。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatrixConfig {
    /// The language for console messages (e.g., "en", "zh-CN").
    /// 控制台消息的语言（例如 "en", "zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,

    /// How many times every cell is run.
    /// 每个单元格运行的次数。
    #[serde(default = "default_runs")]
    pub runs: usize,

    /// Core count handed to the build tool. Defaults to the number of logical CPUs.
    /// 传给构建工具的核心数。默认为逻辑 CPU 数量。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<usize>,

    /// The build tool command line, e.g. `make` or `make -s`.
    /// 构建工具命令行，例如 `make` 或 `make -s`。
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Argument templates. `{benchmark}`, `{config}` and `{cores}` are substituted.
    /// 参数模板。会替换 `{benchmark}`、`{config}` 和 `{cores}`。
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Directory holding one sub-directory per benchmark.
    /// 每个基准测试对应一个子目录的父目录。
    #[serde(default = "default_benchmarks_dir")]
    pub benchmarks_dir: String,

    /// Explicit, ordered benchmark list. When empty, `benchmarks_dir` is listed.
    /// 显式的有序基准测试列表。为空时列出 `benchmarks_dir`。
    #[serde(default)]
    pub benchmarks: Vec<String>,

    /// Entries of `benchmarks_dir` that are not benchmarks.
    /// `benchmarks_dir` 中不是基准测试的条目。
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Ordered configuration axis.
    /// 有序的配置轴。
    pub configs: Vec<String>,

    /// Tab-separated result file, relative to the project directory.
    /// 制表符分隔的结果文件，相对于项目目录。
    #[serde(default = "default_result_file")]
    pub result_file: String,

    #[serde(default)]
    pub on_run_failure: RunFailurePolicy,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_runs() -> usize {
    4
}

fn default_tool() -> String {
    "make".to_string()
}

fn default_args() -> Vec<String> {
    vec!["eval-{config}".to_string(), "NCORES={cores}".to_string()]
}

fn default_benchmarks_dir() -> String {
    "tests".to_string()
}

fn default_exclude() -> Vec<String> {
    ["Makefile", "defines.mk", "README", "README.md"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_result_file() -> String {
    "results.tsv".to_string()
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            runs: default_runs(),
            cores: None,
            tool: default_tool(),
            args: default_args(),
            benchmarks_dir: default_benchmarks_dir(),
            benchmarks: vec![],
            exclude: default_exclude(),
            configs: vec!["pthread".to_string()],
            result_file: default_result_file(),
            on_run_failure: RunFailurePolicy::default(),
        }
    }
}

impl MatrixConfig {
    /// The effective core count.
    /// 实际使用的核心数。
    pub fn cores(&self) -> usize {
        self.cores.unwrap_or_else(num_cpus::get)
    }

    /// Checks the constraints serde cannot express.
    /// 检查 serde 无法表达的约束。
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            bail!("{}", t!("config.runs_zero"));
        }
        if self.configs.is_empty() {
            bail!("{}", t!("config.no_configs"));
        }
        if self.tool.trim().is_empty() {
            bail!("{}", t!("config.empty_tool"));
        }
        if let Some(dup) = first_duplicate(&self.configs) {
            bail!("{}", t!("config.duplicate_config", name = dup));
        }
        if let Some(dup) = first_duplicate(&self.benchmarks) {
            bail!("{}", t!("config.duplicate_benchmark", name = dup));
        }
        Ok(())
    }
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
}

/// Reads, parses and validates a configuration file.
/// 读取、解析并验证配置文件。
pub fn load_matrix_config(path: &Path) -> Result<MatrixConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| t!("config.read_failed", path = path.display()).to_string())?;
    parse_matrix_config(&content)
}

/// Parses and validates configuration text.
/// 解析并验证配置文本。
pub fn parse_matrix_config(content: &str) -> Result<MatrixConfig> {
    let config: MatrixConfig =
        toml::from_str(content).with_context(|| t!("config.parse_failed").to_string())?;
    config.validate()?;
    Ok(config)
}
