// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::DEFAULT_CONFIG_FILE;
use crate::infra::t;

pub mod commands;

use commands::run::RunOptions;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).cloned()
}

fn run_args(locale: &str) -> Vec<Arg> {
    vec![
        Arg::new("config")
            .short('c')
            .long("config")
            .help(t!("arg_config", locale = locale).to_string())
            .value_name("CONFIG")
            .default_value(DEFAULT_CONFIG_FILE)
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
        Arg::new("project-dir")
            .long("project-dir")
            .help(t!("arg_project_dir", locale = locale).to_string())
            .value_name("PROJECT_DIR")
            .default_value(".")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
        Arg::new("runs")
            .short('n')
            .long("runs")
            .help(t!("arg_runs", locale = locale).to_string())
            .value_name("RUNS")
            .value_parser(clap::value_parser!(usize))
            .action(ArgAction::Set),
        Arg::new("cores")
            .long("cores")
            .help(t!("arg_cores", locale = locale).to_string())
            .value_name("CORES")
            .value_parser(clap::value_parser!(usize))
            .action(ArgAction::Set),
        Arg::new("output")
            .short('o')
            .long("output")
            .help(t!("arg_output", locale = locale).to_string())
            .value_name("OUTPUT")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
        Arg::new("json")
            .long("json")
            .help(t!("arg_json", locale = locale).to_string())
            .value_name("JSON")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
        Arg::new("only-benchmarks")
            .long("only-benchmarks")
            .help(t!("arg_only_benchmarks", locale = locale).to_string())
            .value_name("NAMES")
            .value_delimiter(',')
            .action(ArgAction::Append),
        Arg::new("only-configs")
            .long("only-configs")
            .help(t!("arg_only_configs", locale = locale).to_string())
            .value_name("NAMES")
            .value_delimiter(',')
            .action(ArgAction::Append),
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help(t!("arg_verbose", locale = locale).to_string())
            .action(ArgAction::SetTrue),
    ]
}

fn build_cli(locale: &str) -> Command {
    Command::new("bench-matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .args(run_args(locale))
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .args(run_args(locale)),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_init_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
}

fn run_options(matches: &ArgMatches, lang: Option<String>) -> RunOptions {
    let strings = |id: &str| {
        matches
            .get_many::<String>(id)
            .map(|values| values.cloned().collect::<Vec<_>>())
    };

    RunOptions {
        config: matches
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        project_dir: matches
            .get_one::<PathBuf>("project-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        runs: matches.get_one::<usize>("runs").copied(),
        cores: matches.get_one::<usize>("cores").copied(),
        output: matches.get_one::<PathBuf>("output").cloned(),
        json: matches.get_one::<PathBuf>("json").cloned(),
        only_benchmarks: strings("only-benchmarks"),
        only_configs: strings("only-configs"),
        verbose: matches.get_flag("verbose"),
        lang,
    }
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let explicit_lang = pre_parse_language().map(|lang| crate::resolve_locale(&lang));
    match &explicit_lang {
        Some(lang) => rust_i18n::set_locale(lang),
        None => crate::init(),
    }
    let language = (*rust_i18n::locale()).to_string();

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            commands::run::execute(run_options(run_matches, explicit_lang)).await?;
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");
            let force = init_matches.get_flag("force");
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            commands::init::run_init_wizard(&output, &language, non_interactive, force)?;
        }
        _ => {
            // No subcommand: behave like `run` with the top-level arguments.
            commands::run::execute(run_options(&matches, explicit_lang)).await?;
        }
    }
    Ok(())
}
