//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which creates a starter
//! `BenchMatrix.toml`, either from defaults or through an interactive wizard.
//!
//! 此模块实现 `init` 命令，通过默认值或交互式向导创建初始的 `BenchMatrix.toml`。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, MultiSelect, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::MatrixConfig;
use crate::infra::{fs as infra_fs, t};

pub fn run_init_wizard(
    config_path: &Path,
    language: &str,
    non_interactive: bool,
    force: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    if config_path.exists() && !force {
        if non_interactive {
            println!(
                "{}",
                t!("init_file_exists", locale = language, path = config_path.display()).red()
            );
            println!("{}", t!("init_use_force", locale = language).yellow());
            return Ok(());
        }
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init_overwrite_prompt", locale = language, path = config_path.display()))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let mut matrix = MatrixConfig {
        language: language.to_string(),
        ..MatrixConfig::default()
    };

    if non_interactive {
        return write_config(config_path, &matrix, language);
    }

    println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
    println!("{}", t!("init_wizard_description", locale = language));

    matrix.benchmarks_dir = Input::with_theme(&theme)
        .with_prompt(t!("init_benchmarks_dir_prompt", locale = language))
        .default(matrix.benchmarks_dir.clone())
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let discovered = infra_fs::list_benchmarks(Path::new(&matrix.benchmarks_dir), &matrix.exclude)
        .unwrap_or_default();

    if discovered.is_empty() {
        println!(
            "{}",
            t!("init_no_benchmarks_found", locale = language, path = &matrix.benchmarks_dir).yellow()
        );
    } else {
        let defaults = vec![true; discovered.len()];
        let selections = MultiSelect::with_theme(&theme)
            .with_prompt(t!("init_benchmark_selection_prompt", locale = language))
            .items(&discovered)
            .defaults(&defaults)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

        // Keeping every benchmark leaves the list empty so new directories are picked up.
        if selections.len() != discovered.len() {
            matrix.benchmarks = selections.into_iter().map(|i| discovered[i].clone()).collect();
        }
    }

    let configs: String = Input::with_theme(&theme)
        .with_prompt(t!("init_configs_prompt", locale = language))
        .default(matrix.configs.join(","))
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
    let configs: Vec<String> = configs
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if !configs.is_empty() {
        matrix.configs = configs;
    }

    matrix.runs = Input::with_theme(&theme)
        .with_prompt(t!("init_runs_prompt", locale = language))
        .default(matrix.runs)
        .validate_with(|runs: &usize| {
            if *runs == 0 {
                Err(t!("config.runs_zero", locale = language).to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    matrix.tool = Input::with_theme(&theme)
        .with_prompt(t!("init_tool_prompt", locale = language))
        .default(matrix.tool.clone())
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    write_config(config_path, &matrix, language)
}

fn write_config(path: &Path, matrix: &MatrixConfig, language: &str) -> Result<()> {
    matrix.validate()?;
    let toml_string = toml::to_string_pretty(matrix)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!("init_create_parent_dir_failed", locale = language, path = parent.display())
                    .to_string()
            })?;
        }
    }

    fs::write(path, toml_string)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
