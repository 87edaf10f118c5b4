//! # Console Reporting Module / 控制台报告模块
//!
//! Progress, abort and summary lines printed while the matrix runs,
//! colored and localized.
//!
//! 矩阵运行期间打印的进度、中止和摘要信息，带颜色并支持国际化。

use colored::*;

use crate::core::controller::HarnessRun;
use crate::core::error::SchedulingFault;
use crate::core::models::{Cell, RunResult};
use crate::core::planner::MatrixPlan;
use crate::infra::command::output_tail;
use crate::infra::t;

/// How many trailing output lines of a failed run are shown.
/// 显示失败运行输出的末尾行数。
const FAILURE_TAIL_LINES: usize = 20;

pub fn print_harness_started(plan: &MatrixPlan) {
    println!(
        "{}",
        t!(
            "run.matrix_header",
            benchmarks = plan.benchmarks.len(),
            configs = plan.configs.len(),
            runs = plan.runs,
            cores = plan.command.cores()
        )
        .bold()
    );
}

/// Prints the progress line emitted once per attempted run.
/// 打印每次尝试运行时输出的进度行。
pub fn print_run_started(cell: &Cell) {
    println!(
        "{}",
        t!(
            "run.running",
            benchmark = cell.benchmark(),
            config = cell.config()
        )
        .blue()
    );
}

pub fn print_run_finished(cell: &Cell, attempt: usize, runs: usize, result: &RunResult) {
    match result {
        RunResult::Succeeded { elapsed } => println!(
            "{}",
            t!(
                "run.run_succeeded",
                attempt = attempt,
                runs = runs,
                cell = cell,
                duration = format!("{:.3}", elapsed.as_secs_f64())
            )
            .green()
        ),
        RunResult::Failed { exit_code, output } => {
            let code = exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| t!("run.signal").to_string());
            println!(
                "{}",
                t!(
                    "run.run_failed",
                    attempt = attempt,
                    runs = runs,
                    cell = cell,
                    code = code
                )
                .red()
            );
            let tail = output_tail(output, FAILURE_TAIL_LINES);
            if !tail.trim().is_empty() {
                println!("{}", tail.dimmed());
            }
        }
    }
}

pub fn print_cell_abandoned(cell: &Cell) {
    println!("{}", t!("run.cell_abandoned", cell = cell).yellow());
}

/// Prints the fixed abort notice followed by the fault that caused it.
/// 打印固定的中止提示以及导致中止的故障。
pub fn print_aborted(fault: &SchedulingFault) {
    println!("{}", "Aborted!".red().bold());
    eprintln!("{}", t!("harness.abort_reason", reason = fault).red());
}

/// Prints the closing summary of a harness run.
///
/// # Output Format / 输出格式
/// ```text
/// --- Summary ---
///   State:     Completed
///   Cells:     3/4 completed
///   Started:   2026-01-01 10:00:00
///   Finished:  2026-01-01 10:05:12 (312.4s)
/// ```
pub fn print_summary(run: &HarnessRun) {
    println!("\n{}", t!("summary.banner").bold());

    let state = format!("{:?}", run.state);
    let state = if run.is_aborted() {
        state.red()
    } else {
        state.green()
    };
    println!("  {:<10} {}", t!("summary.state"), state);
    println!(
        "  {:<10} {}",
        t!("summary.cells"),
        t!(
            "summary.cells_value",
            completed = run.table.completed_cells(),
            total = run.table.total_cells()
        )
    );

    let failed_runs: usize = run.records.iter().map(|r| r.results.failures()).sum();
    if failed_runs > 0 {
        println!(
            "  {:<10} {}",
            t!("summary.failed_runs"),
            failed_runs.to_string().yellow()
        );
    }

    let elapsed = (run.finished_at - run.started_at).num_milliseconds() as f64 / 1000.0;
    println!(
        "  {:<10} {}",
        t!("summary.started"),
        run.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  {:<10} {} ({:.1}s)",
        t!("summary.finished"),
        run.finished_at.format("%Y-%m-%d %H:%M:%S"),
        elapsed
    );
}
