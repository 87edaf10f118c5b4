//! # Table Reporting Module / 表格报告模块
//!
//! Renders a [`ReportTable`] as tab-separated text and writes the identical
//! text to an interactive stream and to the result file.
//!
//! 将 `ReportTable` 渲染为制表符分隔文本，并将相同的文本写入交互式输出流和结果文件。

use anyhow::{Context, Result};
use colored::*;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::models::ReportTable;
use crate::infra::{fs, t};
use crate::reporting::ReportSink;

/// Label of the first header column.
/// 第一列表头的标签。
pub const HEADER_LABEL: &str = "benchmark";

/// Renders the table: a header row with the configuration names, then one row
/// per benchmark. Rows and columns keep the table's order; every line ends in `\n`.
///
/// 渲染表格：一行包含配置名称的表头，然后每个基准测试一行。
/// 行和列保持表格的顺序；每行以 `\n` 结尾。
///
/// # Output Format / 输出格式
/// ```text
/// benchmark	pthread	doubletake
/// blackscholes	11.5	12.25
/// bodytrack	3.5	not completed
/// ```
pub fn render_table(table: &ReportTable) -> String {
    let mut out = String::new();

    out.push_str(HEADER_LABEL);
    for config in table.configs() {
        out.push('\t');
        out.push_str(config.as_str());
    }
    out.push('\n');

    for (bench, stats) in table.rows() {
        out.push_str(bench.as_str());
        for stat in stats {
            out.push('\t');
            out.push_str(&stat.to_string());
        }
        out.push('\n');
    }
    out
}

/// Publishes the table to a console stream and a tab-separated file.
/// 将表格发布到控制台输出流和制表符分隔文件。
pub struct TsvReporter<W> {
    console: W,
    result_file: PathBuf,
}

impl TsvReporter<std::io::Stdout> {
    pub fn stdout(result_file: PathBuf) -> Self {
        Self::new(std::io::stdout(), result_file)
    }
}

impl<W: Write> TsvReporter<W> {
    pub fn new(console: W, result_file: PathBuf) -> Self {
        Self {
            console,
            result_file,
        }
    }

    pub fn result_file(&self) -> &Path {
        &self.result_file
    }

    pub fn into_console(self) -> W {
        self.console
    }
}

impl<W: Write> ReportSink for TsvReporter<W> {
    fn publish(&mut self, table: &ReportTable) -> Result<()> {
        let content = render_table(table);

        writeln!(self.console, "\n{}", t!("report.banner").bold())
            .and_then(|_| self.console.write_all(content.as_bytes()))
            .and_then(|_| self.console.flush())
            .context("Failed to write report to console")?;

        fs::write_result_file(&self.result_file, &content)?;

        writeln!(
            self.console,
            "{}",
            t!("report.written", path = self.result_file.display()).cyan()
        )
        .context("Failed to write report to console")?;
        Ok(())
    }
}
