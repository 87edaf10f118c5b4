//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, which loads the matrix
//! configuration, runs every cell through the harness controller and
//! writes the report.
//!
//! 此模块实现 `run` 命令：加载矩阵配置，通过运行控制器运行每个单元格，并写入报告。

use anyhow::{Context, Result, bail};
use colored::*;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{self, MatrixConfig},
        controller::HarnessController,
        planner::{self, AxisFilter},
    },
    infra::{command::ProcessRunner, fs, t},
    reporting::{TsvReporter, print_summary, write_json_report},
};

/// Arguments of the `run` command.
/// `run` 命令的参数。
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: PathBuf,
    pub project_dir: PathBuf,
    pub runs: Option<usize>,
    pub cores: Option<usize>,
    pub output: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub only_benchmarks: Option<Vec<String>>,
    pub only_configs: Option<Vec<String>>,
    pub verbose: bool,
    /// Language given on the command line; overrides the configuration file.
    /// 命令行指定的语言；覆盖配置文件中的设置。
    pub lang: Option<String>,
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// `Ok(())` when the harness completed, an error when the configuration is
/// invalid or the harness aborted
pub async fn execute(options: RunOptions) -> Result<()> {
    let (matrix_config, config_path) = setup_and_parse_config(&options)?;

    let locale = crate::resolve_locale(
        options
            .lang
            .as_deref()
            .unwrap_or(matrix_config.language.as_str()),
    );
    rust_i18n::set_locale(&locale);

    let project_root = fs::absolute_path(&options.project_dir).with_context(|| {
        t!("project_dir_not_found", path = options.project_dir.display()).to_string()
    })?;

    println!(
        "{}",
        t!("project_root_detected", path = project_root.display())
    );
    println!(
        "{}",
        t!("loading_matrix_config", path = config_path.display())
    );

    let filter = AxisFilter {
        benchmarks: options.only_benchmarks.clone(),
        configs: options.only_configs.clone(),
    };
    let plan = planner::plan_matrix(&matrix_config, &project_root, &filter)?;

    if plan.cell_count() == 0 {
        println!("{}", t!("no_cells_to_run").green());
        return Ok(());
    }

    let result_file = match &options.output {
        Some(path) => fs::expand_path(&path.to_string_lossy(), &project_root)?,
        None => fs::expand_path(&matrix_config.result_file, &project_root)?,
    };
    let json_path = options
        .json
        .as_ref()
        .map(|path| fs::expand_path(&path.to_string_lossy(), &project_root))
        .transpose()?;

    let stop_token = setup_signal_handler();
    let runner = ProcessRunner::new(stop_token).echo_output(options.verbose);
    let mut reporter = TsvReporter::stdout(result_file);

    let mut controller = HarnessController::new(plan, &runner);
    let run = controller.execute(&mut reporter).await?;

    print_summary(&run);

    if let Some(json_path) = &json_path {
        println!("\n{}", t!("json_report_generating", path = json_path.display()));
        if let Err(e) = write_json_report(&run, json_path) {
            eprintln!("{} {}", t!("json_report_failed").red(), e);
        }
    }

    if run.is_aborted() {
        bail!("{}", t!("harness.aborted_error"));
    }

    if run.table.completed_cells() == run.table.total_cells() {
        println!("\n{}", t!("all_cells_completed").green().bold());
    } else {
        println!(
            "\n{}",
            t!(
                "some_cells_incomplete",
                count = run.table.total_cells() - run.table.completed_cells()
            )
            .yellow()
            .bold()
        );
    }
    Ok(())
}

/// Loads the configuration file and applies the command-line overrides.
fn setup_and_parse_config(options: &RunOptions) -> Result<(MatrixConfig, PathBuf)> {
    let config_path = fs::absolute_path(&options.config)
        .with_context(|| t!("config.read_failed", path = options.config.display()).to_string())?;

    let mut matrix_config = config::load_matrix_config(&config_path)?;

    if let Some(runs) = options.runs {
        matrix_config.runs = runs;
    }
    if let Some(cores) = options.cores {
        matrix_config.cores = Some(cores);
    }
    matrix_config.validate()?;

    Ok((matrix_config, config_path))
}

/// Sets up a signal handler for graceful shutdown.
fn setup_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                println!("\n{}", t!("shutdown_signal").yellow());
                token_clone.cancel();
            }
            Err(e) => eprintln!("{}", t!("signal_handler_failed", error = e).yellow()),
        }
    });

    token
}
