//! # Scheduler Unit Tests / 调度器单元测试
//!
//! Tests for run ordering, failure policies and fault propagation.
//!
//! 运行顺序、失败策略和故障传播的测试。

mod common;

use bench_matrix::config::RunFailurePolicy;
use bench_matrix::core::error::SchedulingFault;
use bench_matrix::core::scheduler::MatrixScheduler;
use bench_matrix::models::CellResults;
use common::{ScriptedRunner, Step, plan, plan_with_policy};

async fn run_all(
    plan: &bench_matrix::core::planner::MatrixPlan,
    runner: &ScriptedRunner,
) -> (Vec<(String, CellResults)>, Result<(), SchedulingFault>) {
    let mut cells = Vec::new();
    let outcome = MatrixScheduler::new(plan, runner)
        .run(|cell, results| cells.push((cell.to_string(), results)))
        .await;
    (cells, outcome)
}

#[tokio::test]
async fn test_runs_each_cell_n_times_in_row_major_order() {
    let plan = plan(&["a", "b"], &["x", "y"], 2);
    let runner = ScriptedRunner::default();

    let (cells, outcome) = run_all(&plan, &runner).await;

    assert!(outcome.is_ok());
    assert_eq!(
        runner.call_labels(),
        vec![
            "a/eval-x", "a/eval-x", "a/eval-y", "a/eval-y", "b/eval-x", "b/eval-x", "b/eval-y",
            "b/eval-y",
        ]
    );
    let names: Vec<&str> = cells.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["a.x", "a.y", "b.x", "b.y"]);
    assert!(cells.iter().all(|(_, r)| r.len() == 2 && r.is_closed()));
}

#[tokio::test]
async fn test_results_keep_invocation_order() {
    let plan = plan(&["a"], &["x"], 3);
    let runner = ScriptedRunner::new([Step::Secs(3.0), Step::Secs(1.0), Step::Secs(2.0)]);

    let (cells, _) = run_all(&plan, &runner).await;

    assert_eq!(cells[0].1.durations_secs(), vec![3.0, 1.0, 2.0]);
}

#[tokio::test]
async fn test_failed_run_continues_the_cell_by_default() {
    let plan = plan(&["a", "b"], &["x"], 3);
    let runner = ScriptedRunner::new([Step::Secs(1.0), Step::Fail(2), Step::Secs(1.0)]);

    let (cells, outcome) = run_all(&plan, &runner).await;

    assert!(outcome.is_ok());
    assert_eq!(runner.calls().len(), 6);
    assert_eq!(cells[0].1.len(), 3);
    assert_eq!(cells[0].1.failures(), 1);
    assert_eq!(cells[1].1.failures(), 0);
}

#[tokio::test]
async fn test_abandon_cell_policy_stops_after_first_failure() {
    let plan = plan_with_policy(&["a", "b"], &["x"], 4, RunFailurePolicy::AbandonCell);
    let runner = ScriptedRunner::new([Step::Secs(1.0), Step::Fail(1)]);

    let (cells, outcome) = run_all(&plan, &runner).await;

    assert!(outcome.is_ok());
    assert_eq!(cells[0].1.len(), 2);
    assert_eq!(cells[1].1.len(), 4);
    assert_eq!(runner.calls().len(), 6);
}

#[tokio::test]
async fn test_fault_stops_the_matrix() {
    let plan = plan(&["a", "b", "c"], &["x"], 2);
    let runner = ScriptedRunner::new([
        Step::Secs(1.0),
        Step::Secs(1.0),
        Step::Secs(1.0),
        Step::Fault,
    ]);

    let (cells, outcome) = run_all(&plan, &runner).await;

    assert!(matches!(
        outcome,
        Err(SchedulingFault::MissingWorkingDir { .. })
    ));
    // "a" closed normally, "b" handed over with its partial results, "c" never started.
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[0].0, "a.x");
    assert_eq!(cells[0].1.len(), 2);
    assert_eq!(cells[1].0, "b.x");
    assert_eq!(cells[1].1.len(), 1);
    assert!(cells[1].1.is_closed());
    assert_eq!(runner.calls().len(), 4);
}
