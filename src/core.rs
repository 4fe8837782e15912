//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the partition matrix,
//! including the descriptor and variant models, command construction,
//! result extraction and the fail-fast traversal engine.
//!
//! 此模块包含划分矩阵的核心功能，
//! 包括描述文件和变体模型、命令构建、结果提取以及快速失败的遍历引擎。

pub mod command;
pub mod config;
pub mod error;
pub mod execution;
pub mod extract;
pub mod models;
pub mod registry;

// Re-exports
pub use config::{TestCase, TestMatrix};
pub use error::HarnessError;
pub use execution::{MatrixRunner, RunSettings};
pub use registry::VariantRegistry;
