//! # Command Execution Module / 命令执行模块
//!
//! Runs one external command to completion and turns its exit status into a
//! [`RunResult`]. The working directory is part of the [`CommandSpec`] and is
//! applied to the child only, so the harness process never changes directory.
//!
//! 运行一个外部命令直至完成，并将其退出状态转换为 `RunResult`。
//! 工作目录是 `CommandSpec` 的一部分，仅应用于子进程，因此本进程从不切换目录。

use colored::*;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::error::SchedulingFault;
use crate::core::models::RunResult;
use crate::infra::t;

/// Everything needed to launch one run: program, arguments and working directory.
/// 启动一次运行所需的全部信息：程序、参数和工作目录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes a single command and reports its outcome.
///
/// Implementations must not retry. A non-zero exit is `Ok(RunResult::Failed)`;
/// only conditions that stop the harness from observing the run are `Err`.
///
/// 执行单个命令并报告其结果。实现不得重试。
/// 非零退出为 `Ok(RunResult::Failed)`；只有无法观察运行的情况才返回 `Err`。
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<RunResult, SchedulingFault>;
}

/// Runs commands as real child processes with `tokio::process`.
/// 使用 `tokio::process` 以真实子进程运行命令。
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    stop: CancellationToken,
    echo_output: bool,
}

impl ProcessRunner {
    pub fn new(stop: CancellationToken) -> Self {
        Self {
            stop,
            echo_output: false,
        }
    }

    /// Prints the captured output of every run, not only of failed ones.
    /// 打印每次运行的输出，而不仅仅是失败的运行。
    pub fn echo_output(mut self, echo: bool) -> Self {
        self.echo_output = echo;
        self
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<RunResult, SchedulingFault> {
        match tokio::fs::metadata(&spec.working_dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(SchedulingFault::MissingWorkingDir {
                    path: spec.working_dir.clone(),
                    source: std::io::Error::other("not a directory"),
                });
            }
            Err(source) => {
                return Err(SchedulingFault::MissingWorkingDir {
                    path: spec.working_dir.clone(),
                    source,
                });
            }
        }

        let mut cmd = tokio::process::Command::new(&spec.program);
        cmd.args(&spec.args)
            .current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|source| SchedulingFault::Spawn {
            program: spec.program.clone(),
            source,
        })?;
        let output_handle = capture_output(&mut child);

        // Dropping the child on interruption kills it (kill_on_drop).
        let status = tokio::select! {
            biased;
            _ = self.stop.cancelled() => {
                output_handle.abort();
                return Err(SchedulingFault::Interrupted {
                    command: spec.to_string(),
                });
            }
            status = child.wait() => status.map_err(|source| SchedulingFault::Wait {
                program: spec.program.clone(),
                source,
            })?,
        };
        let elapsed = start.elapsed();

        let output = match output_handle.await {
            Ok(output) => output,
            Err(e) => {
                eprintln!("{}", t!("run.capture_join_failed", error = e).yellow());
                String::new()
            }
        };

        if self.echo_output && !output.trim().is_empty() {
            println!("{}", output.trim_end());
        }

        if status.success() {
            Ok(RunResult::Succeeded { elapsed })
        } else {
            Ok(RunResult::Failed {
                exit_code: status.code(),
                output,
            })
        }
    }
}

/// Takes the child's stdout and stderr and reads both concurrently into one string.
/// The returned handle resolves once both streams hit EOF.
///
/// 获取子进程的 stdout 和 stderr 并并发读取到一个字符串中。
/// 两个流都到达 EOF 后，返回的句柄完成。
pub fn capture_output(child: &mut Child) -> JoinHandle<String> {
    let output = Arc::new(tokio::sync::Mutex::new(String::new()));

    let stdout_handle = child
        .stdout
        .take()
        .map(|stdout| tokio::spawn(pump_lines(stdout, Arc::clone(&output))));
    let stderr_handle = child
        .stderr
        .take()
        .map(|stderr| tokio::spawn(pump_lines(stderr, Arc::clone(&output))));

    tokio::spawn(async move {
        for handle in [stdout_handle, stderr_handle].into_iter().flatten() {
            if let Err(e) = handle.await {
                eprintln!("Failed to join output reader: {}", e);
            }
        }
        output.lock().await.clone()
    })
}

async fn pump_lines<R>(stream: R, sink: Arc<tokio::sync::Mutex<String>>)
where
    R: AsyncRead + Unpin,
{
    // Read until EOF even when the bytes are not UTF-8.
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let mut sink = sink.lock().await;
                sink.push_str(line.trim_end_matches(['\n', '\r']));
                sink.push('\n');
            }
        }
    }
}

/// Returns the last `max_lines` lines of a run's output, for failure messages.
/// 返回运行输出的最后 `max_lines` 行，用于失败消息。
pub fn output_tail(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let skip = lines.len().saturating_sub(max_lines);
    lines[skip..].join("\n")
}
