//! # Partition Matrix Library / Partition Matrix 库
//!
//! This library drives regression runs of external hypergraph partitioners:
//! it expands a descriptor into every instance × k × test case combination,
//! runs each partitioner, reads the metrics from its `RESULT` line and stops
//! at the first failure.
//!
//! 此库驱动外部超图划分器的回归运行：
//! 它将描述文件展开为每个 实例 × k × 测试用例 组合，
//! 运行每个划分器，从其 `RESULT` 行读取指标，并在第一次失败时停止。
//!
//! ## Modules / 模块
//!
//! - `core` - Descriptor models, command construction, result extraction and the traversal engine
//! - `infra` - Process execution and checkout layout
//! - `reporting` - Console reporting
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 描述文件模型、命令构建、结果提取和遍历引擎
//! - `infra` - 进程执行和检出目录布局
//! - `reporting` - 控制台报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::execution;
pub use core::models;

/// Picks the UI language: an explicit choice if given, otherwise the system
/// locale, matched first in full (e.g. "zh-CN"), then by language code
/// (e.g. "en" from "en-US"), finally falling back to "en".
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split('-')
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
