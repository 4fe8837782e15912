// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::cli::commands::run::RunOptions;
use crate::infra::fs::DEFAULT_ROOT;
use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang=").map(str::to_string))
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("partition-matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("tests")
                        .short('f')
                        .long("tests")
                        .help(t!("arg_tests", locale = locale).to_string())
                        .value_name("JSON")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("root")
                        .long("root")
                        .help(t!("arg_root", locale = locale).to_string())
                        .value_name("DIR")
                        .default_value(DEFAULT_ROOT)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("variants")
                        .long("variants")
                        .help(t!("arg_variants", locale = locale).to_string())
                        .value_name("TOML")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .help(t!("arg_threads", locale = locale).to_string())
                        .value_name("THREADS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("timeout-secs")
                        .long("timeout-secs")
                        .help(t!("arg_timeout_secs", locale = locale).to_string())
                        .value_name("SECONDS")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help(t!("arg_dry_run", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_init_output", locale = locale).to_string())
                        .value_name("JSON")
                        .default_value("integration_tests.json")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn run_options(matches: &ArgMatches) -> RunOptions {
    RunOptions {
        tests: matches.get_one::<String>("tests").cloned(),
        root: matches
            .get_one::<String>("root")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ROOT.to_string()),
        variants: matches.get_one::<String>("variants").cloned(),
        threads: matches.get_one::<usize>("threads").copied(),
        timeout_secs: matches.get_one::<u64>("timeout-secs").copied(),
        dry_run: matches.get_flag("dry-run"),
    }
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let requested = pre_parse_language();
    let language = crate::resolve_locale(requested.as_deref());
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            commands::run::execute(run_options(run_matches), &language).await?;
        }
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("integration_tests.json"));
            let non_interactive = init_matches.get_flag("non-interactive");

            // Show language detection message if it was auto-detected
            if requested.is_none() && !non_interactive {
                println!(
                    "{}",
                    t!("system_language_detected", locale = &language, lang = &language)
                );
            }
            commands::init::run_init_wizard(&output, &language, non_interactive)?;
        }
        _ => {
            // `subcommand_required` makes clap print help and exit before this point.
        }
    }
    Ok(())
}
