//! datecut - extract one day of a date-sorted log file.
//!
//! Writes every line starting with the given `YYYY-MM-DD` date to
//! `<output-dir>/output_<date>.txt`.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use datecut::config::is_default_input;
use datecut::{ExtractConfig, ExtractOutcome, Extractor, TargetDate};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

fn build_command() -> Command {
    let command = Command::new("datecut")
        .version(datecut::VERSION)
        .about("Extract all lines of one date from a large date-sorted log file")
        .long_about(
            "datecut memory-maps a log file whose lines start with a YYYY-MM-DD date \
             and are sorted by it, binary-searches for the first line of the requested \
             date and writes that day's lines to output_<date>.txt.",
        )
        .arg(
            Arg::new("date")
                .help("Date to extract, formatted YYYY-MM-DD")
                .required(true)
                .value_parser(|s: &str| s.parse::<TargetDate>().map_err(|e| e.to_string()))
                .index(1),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("Sorted log file to search [default: test_logs.log]")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .help("Directory for the output file [default: output]")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("chunk-size")
                .long("chunk-size")
                .help("Bytes skipped past a probe that is earlier than the date [default: 4096]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("verify-sorted")
                .long("verify-sorted")
                .help("Fail if the log is not sorted by date before searching")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .short('c')
            .long("config")
            .help("TOML configuration file")
            .value_parser(value_parser!(PathBuf)),
    );

    command
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

#[cfg(feature = "config")]
fn base_config(matches: &clap::ArgMatches) -> Result<ExtractConfig> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ExtractConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ExtractConfig::load_default().context("Failed to load default configuration")?,
    };
    Ok(config)
}

#[cfg(not(feature = "config"))]
fn base_config(_matches: &clap::ArgMatches) -> Result<ExtractConfig> {
    Ok(ExtractConfig::default())
}

fn main() -> Result<()> {
    let started = Instant::now();
    let matches = build_command().get_matches();

    init_logging(matches.get_count("verbose"));

    let target = *matches
        .get_one::<TargetDate>("date")
        .context("date argument is required")?;

    let mut config = base_config(&matches)?;
    if let Some(input) = matches.get_one::<PathBuf>("input") {
        config = config.with_input(input);
    }
    if let Some(output_dir) = matches.get_one::<PathBuf>("output-dir") {
        config = config.with_output_dir(output_dir);
    }
    if let Some(chunk_size) = matches.get_one::<usize>("chunk-size") {
        config = config.with_chunk_size(*chunk_size);
    }
    if matches.get_flag("verify-sorted") {
        config = config.with_verify_sorted(true);
    }

    if is_default_input(&config.input) {
        info!("No input given, reading {}", config.input.display());
    }

    let extractor = Extractor::new(config)?;
    let outcome = extractor
        .run(&target)
        .with_context(|| format!("Failed to extract logs for {target}"))?;

    match &outcome {
        ExtractOutcome::Found { output_path, .. } => {
            println!("Logs extracted to {}", output_path.display());
        }
        ExtractOutcome::NotFound { .. } => {
            println!("No logs found for date {target}");
        }
    }
    println!(
        "Total execution time: {:.6} seconds",
        started.elapsed().as_secs_f64()
    );

    Ok(())
}
