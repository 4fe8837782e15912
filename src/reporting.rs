//! # Reporting Module / 报告模块
//!
//! This module defines the `Reporter` capability the matrix runner writes to,
//! and its colorful, localized console implementation. Reporters only present
//! what the runner already decided; they never influence control flow.
//!
//! 此模块定义矩阵运行器写入的 `Reporter` 能力，及其彩色、本地化的控制台实现。
//! 报告器只展示运行器已经做出的决定，从不影响控制流。

pub mod console;

use std::time::Duration;

use crate::core::error::HarnessError;
use crate::core::models::{Invocation, Metrics, RunSummary};

pub use console::ConsoleReporter;

/// Receives progress events from a matrix traversal.
/// 接收矩阵遍历的进度事件。
pub trait Reporter {
    /// A new (instance, k) pair starts.
    fn header(&mut self, instance: &str, k: u32, epsilon: f64);

    /// An invocation is about to run (or, in a dry run, is only listed).
    fn command(&mut self, invocation: &Invocation);

    /// An invocation exited with code zero and yielded metrics.
    fn success(&mut self, metrics: &Metrics, duration: Duration);

    /// The traversal stops because of `error`.
    fn failure(&mut self, error: &HarnessError);

    /// The whole matrix finished without a failure.
    fn summary(&mut self, summary: &RunSummary, dry_run: bool);
}
