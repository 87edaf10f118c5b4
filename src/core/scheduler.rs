//! # Matrix Scheduler Module / 矩阵调度模块
//!
//! Walks the benchmark x configuration grid in row-major order and runs each
//! cell the configured number of times, strictly one run after another.
//!
//! 按行优先顺序遍历基准测试 x 配置网格，并严格依次将每个单元格运行配置的次数。

use crate::core::config::RunFailurePolicy;
use crate::core::error::SchedulingFault;
use crate::core::models::{Cell, CellResults};
use crate::core::planner::MatrixPlan;
use crate::infra::command::CommandRunner;
use crate::reporting::console;

/// Drives a [`CommandRunner`] over every cell of a [`MatrixPlan`].
/// 在 `MatrixPlan` 的每个单元格上驱动 `CommandRunner`。
pub struct MatrixScheduler<'a, R> {
    plan: &'a MatrixPlan,
    runner: &'a R,
}

impl<'a, R: CommandRunner> MatrixScheduler<'a, R> {
    pub fn new(plan: &'a MatrixPlan, runner: &'a R) -> Self {
        Self { plan, runner }
    }

    /// Runs the whole matrix.
    ///
    /// Each cell's results are closed and handed to `on_cell` before the next
    /// cell starts. A failed run stays inside its cell; a [`SchedulingFault`]
    /// stops the enumeration, after the partial results of the interrupted cell
    /// have been handed over.
    ///
    /// 运行整个矩阵。每个单元格的结果在下一个单元格开始前关闭并交给 `on_cell`。
    /// 失败的运行只影响其所在单元格；`SchedulingFault` 会停止枚举，
    /// 但会先交出被中断单元格的部分结果。
    pub async fn run<F>(&self, mut on_cell: F) -> Result<(), SchedulingFault>
    where
        F: FnMut(Cell, CellResults),
    {
        for cell in self.plan.cells() {
            let mut results = CellResults::new();
            let outcome = self.run_cell(&cell, &mut results).await;
            results.close();
            on_cell(cell, results);
            outcome?;
        }
        Ok(())
    }

    async fn run_cell(&self, cell: &Cell, results: &mut CellResults) -> Result<(), SchedulingFault> {
        let spec = self.plan.command.for_cell(cell);

        for attempt in 1..=self.plan.runs {
            console::print_run_started(cell);
            let result = self.runner.run(&spec).await?;
            console::print_run_finished(cell, attempt, self.plan.runs, &result);

            let failed = !result.is_success();
            results.push(result);

            if failed && self.plan.policy == RunFailurePolicy::AbandonCell {
                console::print_cell_abandoned(cell);
                break;
            }
        }
        Ok(())
    }
}
