//! Datadoc metadata editor CLI.

use clap::{ColorChoice, Parser};
use datadoc_cli::document::load_catalog;
use datadoc_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_check, run_global, run_global_reset, run_open, run_pseudo, run_pseudo_set,
    run_set_dataset, run_set_variable, run_show,
};
use crate::summary::print_fields;

fn main() {
    // A missing .env file is fine; variables may come from the shell.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let catalog = load_catalog(cli.code_list_dir.as_deref())?;
    match &cli.command {
        Command::Open(args) => run_open(args, &catalog)?,
        Command::Show(args) => run_show(args, &catalog)?,
        Command::Fields => print_fields(&catalog),
        Command::Global(args) => run_global(args, &catalog)?,
        Command::GlobalReset(args) => run_global_reset(args)?,
        Command::Pseudo(args) => run_pseudo(args)?,
        Command::PseudoSet(args) => run_pseudo_set(args)?,
        Command::SetVariable(args) => run_set_variable(args)?,
        Command::SetDataset(args) => run_set_dataset(args)?,
        Command::Check(args) => {
            let report = run_check(args)?;
            return Ok(if report.has_issues() { 1 } else { 0 });
        }
    }
    Ok(0)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
