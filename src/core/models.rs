//! # Data Models Module / 数据模型模块
//!
//! This module defines the per-iteration data structures used throughout the matrix
//! runner: the resolved variant, the built invocation, the captured run outcome and
//! the metrics extracted from it.
//!
//! 此模块定义了整个矩阵运行器中使用的单次迭代数据结构：
//! 已解析的变体、构建好的调用、捕获的运行结果以及从中提取的指标。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A named partitioner configuration: which binary to run and which preset it
/// uses unless a test case overrides it.
///
/// 一个命名的划分器配置：要运行哪个二进制文件，以及在测试用例未覆盖时使用的预设。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Path to the partitioner executable / 划分器可执行文件的路径
    pub executable: PathBuf,
    /// Default preset passed via `-p` / 通过 `-p` 传递的默认预设
    pub config: PathBuf,
}

/// The fully resolved command for one (test case, instance, k) triple.
///
/// 某个 (测试用例, 实例, k) 三元组的完整解析命令。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The executable to start / 要启动的可执行文件
    pub program: PathBuf,
    /// Arguments in the exact order they are passed / 按传递顺序排列的参数
    pub args: Vec<String>,
}

impl Invocation {
    /// Program followed by its arguments, as strings.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Renders the invocation as a single shell-quoted line for display and error messages.
    /// 将调用渲染为单行 shell 引用字符串，用于显示和错误消息。
    pub fn command_line(&self) -> String {
        let argv = self.argv();
        shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| argv.join(" "))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// What a finished partitioner process left behind.
///
/// 已结束的划分器进程留下的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code, or `None` if the process was terminated by a signal.
    /// 退出码；如果进程被信号终止则为 `None`。
    pub exit_code: Option<i32>,
    /// Captured standard output; the only stream searched for metrics.
    /// 捕获的标准输出；只在其中查找指标。
    pub stdout: String,
    /// Captured standard error, shown with stdout when a run fails.
    /// 捕获的标准错误，在运行失败时与 stdout 一起显示。
    pub stderr: String,
    /// Wall-clock time between spawn and exit / 从启动到退出的墙钟时间
    pub duration: Duration,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr, for failure reports.
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len());
        combined.push_str(&self.stdout);
        combined.push_str(&self.stderr);
        combined
    }
}

/// Quality and timing figures reported on the `RESULT` line.
///
/// `RESULT` 行上报告的质量和时间指标。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// `totalPartitionTime` in seconds
    pub total_time: f64,
    pub imbalance: f64,
    /// Connectivity metric (λ − 1)
    pub km1: i64,
    pub cut: i64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Time = {} Imbalance = {} km1 = {} cut = {}",
            self.total_time, self.imbalance, self.km1, self.cut
        )
    }
}

/// Totals over a completed traversal.
/// 完整遍历的汇总信息。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of invocations executed (or planned, in a dry run).
    pub runs: usize,
    /// Sum of the partitioner wall-clock durations.
    pub total_duration: Duration,
}
