// Shared test helpers for integration tests
#![allow(dead_code)]

use bench_matrix::config::RunFailurePolicy;
use bench_matrix::core::error::SchedulingFault;
use bench_matrix::core::planner::{CommandTemplate, MatrixPlan};
use bench_matrix::infra::command::{CommandRunner, CommandSpec};
use bench_matrix::models::{BenchmarkId, CellResults, ConfigId, ReportTable, RunResult};
use bench_matrix::reporting::ReportSink;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::{TempDir, tempdir};

/// One scripted outcome, consumed in invocation order.
#[derive(Debug, Clone)]
pub enum Step {
    Secs(f64),
    Fail(i32),
    Fault,
}

/// A `CommandRunner` that replays a script instead of launching processes.
/// Once the script is exhausted every run succeeds in one second.
#[derive(Default)]
pub struct ScriptedRunner {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// The `<benchmark>/<first arg>` of every call, e.g. `a/eval-x`.
    pub fn call_labels(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|spec| {
                let bench = spec
                    .working_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("{}/{}", bench, spec.args.first().cloned().unwrap_or_default())
            })
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<RunResult, SchedulingFault> {
        self.calls.lock().unwrap().push(spec.clone());
        let step = self.steps.lock().unwrap().pop_front().unwrap_or(Step::Secs(1.0));
        match step {
            Step::Secs(secs) => Ok(RunResult::Succeeded {
                elapsed: Duration::from_secs_f64(secs),
            }),
            Step::Fail(code) => Ok(RunResult::Failed {
                exit_code: Some(code),
                output: format!("scripted failure {code}\n"),
            }),
            Step::Fault => Err(SchedulingFault::MissingWorkingDir {
                path: spec.working_dir.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted fault"),
            }),
        }
    }
}

/// A `ReportSink` that keeps every published table.
#[derive(Default)]
pub struct RecordingSink {
    pub published: Vec<ReportTable>,
}

impl ReportSink for RecordingSink {
    fn publish(&mut self, table: &ReportTable) -> anyhow::Result<()> {
        self.published.push(table.clone());
        Ok(())
    }
}

pub fn plan(benchmarks: &[&str], configs: &[&str], runs: usize) -> MatrixPlan {
    plan_with_policy(benchmarks, configs, runs, RunFailurePolicy::Continue)
}

pub fn plan_with_policy(
    benchmarks: &[&str],
    configs: &[&str],
    runs: usize,
    policy: RunFailurePolicy,
) -> MatrixPlan {
    MatrixPlan {
        benchmarks: benchmarks.iter().map(|b| BenchmarkId::from(*b)).collect(),
        configs: configs.iter().map(|c| ConfigId::from(*c)).collect(),
        runs,
        policy,
        command: CommandTemplate::new(
            "make",
            vec!["eval-{config}".to_string(), "NCORES={cores}".to_string()],
            PathBuf::from("/bench"),
            8,
        )
        .expect("valid command template"),
    }
}

pub fn succeeded(secs: &[f64]) -> CellResults {
    secs.iter()
        .map(|s| RunResult::Succeeded {
            elapsed: Duration::from_secs_f64(*s),
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Creates `<tmp>/tests/<name>` for every benchmark plus the usual non-benchmark
/// entries (`Makefile`, `defines.mk`, `README`).
pub fn setup_benchmark_tree(benchmarks: &[&str]) -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let tests_dir = temp_dir.path().join("tests");
    fs::create_dir_all(&tests_dir).expect("Failed to create tests directory");
    for bench in benchmarks {
        fs::create_dir_all(tests_dir.join(bench)).expect("Failed to create benchmark directory");
    }
    fs::write(tests_dir.join("Makefile"), "all:\n").expect("Failed to write Makefile");
    fs::write(tests_dir.join("defines.mk"), "").expect("Failed to write defines.mk");
    fs::write(tests_dir.join("README"), "benchmarks\n").expect("Failed to write README");
    temp_dir
}

/// Writes a configuration that uses `sh -c` as the build tool; any configuration
/// named `bad` exits non-zero.
pub fn write_sh_config(dir: &Path, extra: &str) -> PathBuf {
    let config_path = dir.join("BenchMatrix.toml");
    let content = format!(
        r#"
language = "en"
runs = 2
tool = "sh"
args = ["-c", "test {{config}} != bad"]
configs = ["good", "bad"]
{extra}
"#
    );
    fs::write(&config_path, content).expect("Failed to write BenchMatrix.toml");
    config_path
}
