//! # Harness Controller Module / 运行控制模块
//!
//! Top-level driver: owns the [`ReportTable`], runs the scheduler, aggregates
//! each cell as soon as it closes, and publishes the report exactly once.
//!
//! State machine: `Idle -> Running -> {Completed, Aborted}`. Terminal states
//! are final; a controller cannot be executed twice.
//!
//! 顶层驱动：持有 `ReportTable`，运行调度器，在每个单元格关闭后立即聚合，
//! 并且只发布一次报告。状态机：`Idle -> Running -> {Completed, Aborted}`。
//! 终止状态是最终状态；控制器不能执行两次。

use anyhow::{Result, bail};
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::aggregate::aggregate;
use crate::core::error::SchedulingFault;
use crate::core::models::{AggregateStat, Cell, CellResults, ReportTable};
use crate::core::planner::MatrixPlan;
use crate::core::scheduler::MatrixScheduler;
use crate::infra::command::CommandRunner;
use crate::infra::t;
use crate::reporting::ReportSink;
use crate::reporting::console;

/// Lifecycle of one harness invocation.
/// 一次运行的生命周期。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HarnessState {
    Idle,
    Running,
    Completed,
    Aborted,
}

impl HarnessState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, HarnessState::Completed | HarnessState::Aborted)
    }
}

/// One closed cell with its raw runs and the statistic derived from them.
/// 一个已关闭的单元格，包含其原始运行结果及由此得出的统计值。
#[derive(Debug, Clone)]
pub struct CellRecord {
    pub cell: Cell,
    pub results: CellResults,
    pub stat: AggregateStat,
}

/// Everything a finished harness invocation produced.
/// 一次已结束运行产生的全部内容。
#[derive(Debug)]
pub struct HarnessRun {
    pub state: HarnessState,
    pub table: ReportTable,
    pub records: Vec<CellRecord>,
    pub fault: Option<SchedulingFault>,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl HarnessRun {
    pub fn is_aborted(&self) -> bool {
        self.state == HarnessState::Aborted
    }
}

pub struct HarnessController<'a, R> {
    plan: MatrixPlan,
    runner: &'a R,
    state: HarnessState,
}

impl<'a, R: CommandRunner> HarnessController<'a, R> {
    pub fn new(plan: MatrixPlan, runner: &'a R) -> Self {
        Self {
            plan,
            runner,
            state: HarnessState::Idle,
        }
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    pub fn plan(&self) -> &MatrixPlan {
        &self.plan
    }

    /// Runs the matrix and publishes the report to `sink`.
    ///
    /// A [`SchedulingFault`] does not make this return `Err`: it moves the
    /// controller to `Aborted`, prints the abort notice, and the partial table
    /// is still published. `Err` means the controller was not `Idle` or the
    /// report could not be written.
    ///
    /// 运行矩阵并将报告发布到 `sink`。`SchedulingFault` 不会使此函数返回 `Err`：
    /// 它将控制器切换到 `Aborted`，打印中止提示，并仍然发布部分表格。
    /// 返回 `Err` 表示控制器不处于 `Idle` 状态或报告无法写入。
    pub async fn execute<S: ReportSink + ?Sized>(&mut self, sink: &mut S) -> Result<HarnessRun> {
        if self.state != HarnessState::Idle {
            bail!("{}", t!("harness.already_executed", state = format!("{:?}", self.state)));
        }
        self.state = HarnessState::Running;
        let started_at = Local::now();
        console::print_harness_started(&self.plan);

        let mut table = ReportTable::new(self.plan.benchmarks.clone(), self.plan.configs.clone());
        let mut records = Vec::with_capacity(self.plan.cell_count());
        let runs = self.plan.runs;

        let outcome = MatrixScheduler::new(&self.plan, self.runner)
            .run(|cell, results| {
                let stat = aggregate(&results, runs);
                table.record(&cell, stat);
                records.push(CellRecord { cell, results, stat });
            })
            .await;

        let fault = match outcome {
            Ok(()) => {
                self.state = HarnessState::Completed;
                None
            }
            Err(fault) => {
                self.state = HarnessState::Aborted;
                console::print_aborted(&fault);
                Some(fault)
            }
        };

        sink.publish(&table)?;

        Ok(HarnessRun {
            state: self.state,
            table,
            records,
            fault,
            started_at,
            finished_at: Local::now(),
        })
    }
}
