//! # Matrix Planning Module / 矩阵计划模块
//!
//! This module turns a [`MatrixConfig`] into a [`MatrixPlan`]: the resolved,
//! ordered benchmark and configuration axes, the run count, and the command
//! template used to invoke the build tool for each cell.
//!
//! 此模块将 `MatrixConfig` 转换为 `MatrixPlan`：已解析的有序基准测试轴和配置轴、
//! 运行次数，以及为每个单元格调用构建工具的命令模板。

use anyhow::{Context, Result, anyhow, bail};
use std::path::{Path, PathBuf};

use crate::core::config::{MatrixConfig, RunFailurePolicy};
use crate::core::models::{BenchmarkId, Cell, ConfigId};
use crate::infra::command::CommandSpec;
use crate::infra::{fs, t};

/// Restricts the axes to a subset, keeping the configured order.
/// 将轴限制为子集，并保持配置中的顺序。
#[derive(Debug, Clone, Default)]
pub struct AxisFilter {
    pub benchmarks: Option<Vec<String>>,
    pub configs: Option<Vec<String>>,
}

/// Builds the external command for a cell.
/// 为单元格构建外部命令。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    fixed_args: Vec<String>,
    arg_templates: Vec<String>,
    benchmarks_root: PathBuf,
    cores: usize,
}

impl CommandTemplate {
    pub fn new(
        tool: &str,
        arg_templates: Vec<String>,
        benchmarks_root: PathBuf,
        cores: usize,
    ) -> Result<Self> {
        let expanded = shellexpand::full(tool)
            .with_context(|| format!("Failed to expand command: {tool}"))?
            .to_string();
        let mut parts = shlex::split(&expanded)
            .ok_or_else(|| anyhow!("Failed to parse command: {}", expanded))?;
        if parts.is_empty() {
            bail!("{}", t!("config.empty_tool"));
        }
        let program = parts.remove(0);

        Ok(Self {
            program,
            fixed_args: parts,
            arg_templates,
            benchmarks_root,
            cores,
        })
    }

    pub fn cores(&self) -> usize {
        self.cores
    }

    /// The command for one run of `cell`, executed in `<benchmarks_root>/<benchmark>`.
    /// `cell` 单次运行的命令，在 `<benchmarks_root>/<benchmark>` 中执行。
    pub fn for_cell(&self, cell: &Cell) -> CommandSpec {
        let cores = self.cores.to_string();
        let args = self
            .fixed_args
            .iter()
            .cloned()
            .chain(self.arg_templates.iter().map(|template| {
                template
                    .replace("{benchmark}", cell.benchmark().as_str())
                    .replace("{config}", cell.config().as_str())
                    .replace("{cores}", &cores)
            }))
            .collect();

        CommandSpec {
            program: self.program.clone(),
            args,
            working_dir: self.benchmarks_root.join(cell.benchmark().as_str()),
        }
    }
}

/// The fully resolved matrix for one harness run.
/// 一次运行的完整解析矩阵。
#[derive(Debug, Clone)]
pub struct MatrixPlan {
    pub benchmarks: Vec<BenchmarkId>,
    pub configs: Vec<ConfigId>,
    pub runs: usize,
    pub policy: RunFailurePolicy,
    pub command: CommandTemplate,
}

impl MatrixPlan {
    /// Enumerates every cell in row-major order: benchmarks outer, configurations inner.
    /// 按行优先顺序枚举每个单元格：外层为基准测试，内层为配置。
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.benchmarks.iter().flat_map(move |bench| {
            self.configs
                .iter()
                .map(move |config| Cell::new(bench.clone(), config.clone()))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.benchmarks.len() * self.configs.len()
    }
}

/// Resolves the benchmark axis: the explicit list if one is configured,
/// otherwise the filtered listing of the benchmark directory.
///
/// 解析基准测试轴：如果配置了显式列表则使用它，否则使用过滤后的基准测试目录列表。
pub fn resolve_benchmarks(config: &MatrixConfig, benchmarks_root: &Path) -> Result<Vec<String>> {
    if !config.benchmarks.is_empty() {
        return Ok(config.benchmarks.clone());
    }
    let names = fs::list_benchmarks(benchmarks_root, &config.exclude)?;
    if names.is_empty() {
        bail!(
            "{}",
            t!("plan.no_benchmarks_found", path = benchmarks_root.display())
        );
    }
    Ok(names)
}

fn apply_filter(axis: Vec<String>, only: Option<&Vec<String>>, kind: &str) -> Result<Vec<String>> {
    let Some(only) = only else {
        return Ok(axis);
    };
    if let Some(unknown) = only.iter().find(|name| !axis.contains(name)) {
        bail!("{}", t!("plan.unknown_axis_entry", kind = kind, name = unknown));
    }
    Ok(axis.into_iter().filter(|name| only.contains(name)).collect())
}

/// Creates the execution plan for a configuration.
///
/// # Arguments
/// * `config` - The validated matrix configuration
/// * `project_root` - Directory that relative paths in the configuration resolve against
/// * `filter` - Optional subsets of either axis
///
/// # Returns
/// A `MatrixPlan` whose axes keep the configured order
pub fn plan_matrix(
    config: &MatrixConfig,
    project_root: &Path,
    filter: &AxisFilter,
) -> Result<MatrixPlan> {
    let benchmarks_root = fs::expand_path(&config.benchmarks_dir, project_root)?;

    let benchmarks = apply_filter(
        resolve_benchmarks(config, &benchmarks_root)?,
        filter.benchmarks.as_ref(),
        "benchmark",
    )?;
    let configs = apply_filter(config.configs.clone(), filter.configs.as_ref(), "config")?;

    let command = CommandTemplate::new(
        &config.tool,
        config.args.clone(),
        benchmarks_root,
        config.cores(),
    )?;

    Ok(MatrixPlan {
        benchmarks: benchmarks.into_iter().map(BenchmarkId::from).collect(),
        configs: configs.into_iter().map(ConfigId::from).collect(),
        runs: config.runs,
        policy: config.on_run_failure,
        command,
    })
}
