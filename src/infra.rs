//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the partition matrix,
//! including process execution, checkout layout and i18n support.
//!
//! 此模块为划分矩阵提供基础设施服务，
//! 包括进程执行、检出目录布局和国际化支持。

pub mod fs;
pub mod process;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
