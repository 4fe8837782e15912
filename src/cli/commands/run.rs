//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, which loads a descriptor and a
//! variant table and walks the whole test matrix, stopping at the first failure.
//!
//! 此模块实现了 `run` 命令：加载描述文件和变体表，
//! 遍历整个测试矩阵，并在第一次失败时停止。

use anyhow::{Context, Result};
use colored::*;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config,
        execution::{MatrixRunner, RunSettings},
        registry::VariantRegistry,
    },
    infra::{
        fs::{Layout, expand_path},
        process::CommandRunner,
        t,
    },
    reporting::ConsoleReporter,
};

/// Arguments of the `run` subcommand.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Descriptor path; defaults to the one inside the root.
    pub tests: Option<String>,
    /// Partitioner checkout root, before `~` expansion.
    pub root: String,
    /// Variant table replacing the built-in one.
    pub variants: Option<String>,
    /// Thread count handed to the partitioners; defaults to the CPU count.
    pub threads: Option<usize>,
    /// Per-run timeout; no limit when absent.
    pub timeout_secs: Option<u64>,
    pub dry_run: bool,
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// `Ok(())` once every combination passed; otherwise the first error, which
/// has already been reported on the console.
pub async fn execute(options: RunOptions, locale: &str) -> Result<()> {
    let layout = Layout::from_raw(&options.root)?;

    let descriptor_path = match &options.tests {
        Some(raw) => expand_path(raw)?,
        None => layout.default_descriptor(),
    };
    println!(
        "{}",
        t!("loading_test_matrix", locale = locale, path = descriptor_path.display())
    );
    let matrix = config::load_test_matrix(&descriptor_path)
        .with_context(|| {
            t!("config_parse_failed", locale = locale, path = descriptor_path.display()).to_string()
        })?
        .resolve_configs(&layout);

    let registry = match &options.variants {
        Some(raw) => {
            let path = expand_path(raw)?;
            println!(
                "{}",
                t!("using_variant_table", locale = locale, path = path.display())
            );
            VariantRegistry::from_toml_file(&path, &layout)?
        }
        None => {
            println!(
                "{}",
                t!("using_builtin_variants", locale = locale, root = layout.root.display())
            );
            VariantRegistry::mt_kahypar(&layout)
        }
    };

    println!(
        "{}",
        t!(
            "matrix_overview",
            locale = locale,
            instances = matrix.instances.len(),
            ks = matrix.k.len(),
            tests = matrix.tests.len(),
            total = matrix.len()
        )
        .cyan()
    );
    println!();

    let settings = RunSettings {
        threads: options.threads.unwrap_or_else(num_cpus::get),
        dry_run: options.dry_run,
        layout,
    };
    let runner = CommandRunner::new(options.timeout_secs.map(Duration::from_secs));
    let mut reporter = ConsoleReporter::new(locale);
    let stop_token = setup_signal_handler(locale);

    let mut matrix_runner = MatrixRunner::new(&matrix, &registry, &runner, &mut reporter, settings)
        .with_cancellation(stop_token);
    matrix_runner.run().await?;
    Ok(())
}

/// Sets up a signal handler so Ctrl-C kills the running partitioner and stops the matrix.
fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
                token_clone.cancel();
            }
            Err(e) => tracing::warn!("failed to listen for Ctrl-C: {e}"),
        }
    });

    token
}
