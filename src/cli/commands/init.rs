//! # Descriptor Initialization Module / 描述文件初始化模块
//!
//! This module provides functionality for creating a new test matrix descriptor
//! through an interactive command-line wizard, or from a default template.
//!
//! 此模块通过交互式命令行向导或默认模板创建新的测试矩阵描述文件。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Prompts for epsilon, instances, block counts and partitioners
//! - **Template Fallback**: A ready-to-edit default descriptor with `--non-interactive`
//! - **Overwrite Protection**: Confirmation prompt before overwriting an existing descriptor
//!
//! - **交互式向导**: 提示输入 epsilon、实例、块数和划分器
//! - **模板回退**: 使用 `--non-interactive` 生成可直接编辑的默认描述文件
//! - **覆盖保护**: 覆盖现有描述文件前的确认提示

use anyhow::{Context, Result, bail};
use colored::*;
use dialoguer::{Confirm, Input, MultiSelect, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::{TestCase, TestMatrix};
use crate::core::registry::VariantRegistry;
use crate::infra::fs::Layout;
use crate::infra::t;

/// Runs the interactive wizard to generate a descriptor at `output`.
///
/// 运行交互式向导以在 `output` 处生成描述文件。
pub fn run_init_wizard(output: &Path, language: &str, non_interactive: bool) -> Result<()> {
    if non_interactive {
        return write_descriptor(output, &default_matrix(), language);
    }

    let theme = ColorfulTheme::default();
    println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
    println!("{}", t!("init_wizard_description", locale = language));

    if output.exists() {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!(
                "init_overwrite_prompt",
                locale = language,
                path = output.display()
            ))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let epsilon: f64 = Input::with_theme(&theme)
        .with_prompt(t!("init_epsilon_prompt", locale = language))
        .default(0.03)
        .interact_text()?;

    let instances: String = Input::with_theme(&theme)
        .with_prompt(t!("init_instances_prompt", locale = language))
        .default("tests/instances/ibm01.hgr".to_string())
        .interact_text()?;

    let ks: String = Input::with_theme(&theme)
        .with_prompt(t!("init_k_prompt", locale = language))
        .default("2, 8".to_string())
        .interact_text()?;

    let registry = VariantRegistry::mt_kahypar(&Layout::default());
    let names = registry.names();
    let selections = MultiSelect::with_theme(&theme)
        .with_prompt(t!("init_partitioner_prompt", locale = language))
        .items(&names)
        .interact()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    if selections.is_empty() {
        println!("{}", t!("init_no_partitioner_selected", locale = language).yellow());
        return write_descriptor(output, &default_matrix(), language);
    }

    let matrix = TestMatrix {
        epsilon,
        instances: split_list(&instances),
        k: parse_block_counts(&ks, language)?,
        tests: selections
            .into_iter()
            .map(|i| TestCase::new(names[i]))
            .collect(),
    };
    matrix.validate()?;

    write_descriptor(output, &matrix, language)
}

/// The descriptor written by `init --non-interactive`.
pub fn default_matrix() -> TestMatrix {
    let mut deterministic = TestCase::new("Mt-KaHyPar-Det");
    deterministic.parameters = vec!["--seed=0".to_string()];

    TestMatrix {
        epsilon: 0.03,
        instances: vec!["tests/instances/ibm01.hgr".to_string()],
        k: vec![2, 8],
        tests: vec![
            TestCase::new("Mt-KaHyPar-D"),
            TestCase::new("Mt-KaHyPar-Q"),
            deterministic,
        ],
    }
}

/// Splits a comma-separated answer, dropping blank items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a comma-separated list of positive block counts.
pub fn parse_block_counts(raw: &str, language: &str) -> Result<Vec<u32>> {
    split_list(raw)
        .iter()
        .map(|k| match k.parse::<u32>() {
            Ok(k) if k > 0 => Ok(k),
            _ => bail!(t!("init_invalid_k", locale = language, value = k).to_string()),
        })
        .collect()
}

fn write_descriptor(path: &Path, matrix: &TestMatrix, language: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(matrix)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write(path, json + "\n")
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language, path = path.display()));

    Ok(())
}
