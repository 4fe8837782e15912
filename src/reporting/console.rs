//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the progress of a matrix traversal to the console: a bold
//! header per (instance, k) pair, the command line of every run, a green
//! `[SUCCESS]` line with the extracted metrics, or a red `[ERROR]` line followed
//! by the partitioner's raw output.
//!
//! 此模块将矩阵遍历的进度打印到控制台：每个 (实例, k) 对的粗体标题、
//! 每次运行的命令行、带有提取指标的绿色 `[SUCCESS]` 行，
//! 或红色 `[ERROR]` 行及划分器的原始输出。
//!
//! # Output Format / 输出格式
//! ```text
//! Instance = tests/instances/ibm01.hgr, k = 2, Epsilon = 0.03
//! /mt/build/mt-kahypar/application/MtKaHyParFast -h/mt/tests/instances/ibm01.hgr ...
//! [SUCCESS] Total Time = 1.5 Imbalance = 0.02 km1 = 10 cut = 20 (1.52s)
//! ```

use colored::*;
use std::io::{self, Write};
use std::time::Duration;

use crate::core::error::HarnessError;
use crate::core::models::{Invocation, Metrics, RunSummary};
use crate::infra::t;
use crate::reporting::Reporter;

/// Writes localized, colored progress lines.
/// 写入本地化的彩色进度行。
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    locale: String,
    pairs_seen: usize,
}

impl ConsoleReporter<io::Stdout> {
    /// A reporter writing to standard output in `locale`.
    pub fn new(locale: &str) -> Self {
        Self::with_writer(io::stdout(), locale)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W, locale: &str) -> Self {
        Self {
            out,
            locale: locale.to_string(),
            pairs_seen: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!("failed to write report line: {e}");
        }
    }

    fn failure_message(&self, error: &HarnessError) -> String {
        let locale = self.locale.as_str();
        match error {
            HarnessError::ProcessFailure {
                exit_code: Some(code),
                ..
            } => t!("report.process_failure", locale = locale, code = code).to_string(),
            HarnessError::ProcessFailure { exit_code: None, .. } => {
                t!("report.process_killed", locale = locale).to_string()
            }
            HarnessError::ResultParse { problem, .. } => {
                t!("report.parse_failure", locale = locale, problem = problem).to_string()
            }
            HarnessError::Spawn { program, source } => t!(
                "report.spawn_failure",
                locale = locale,
                program = program.display(),
                error = source
            )
            .to_string(),
            HarnessError::Timeout { limit, .. } => {
                t!("report.timeout", locale = locale, secs = limit.as_secs()).to_string()
            }
            HarnessError::Interrupted { .. } => {
                t!("report.interrupted", locale = locale).to_string()
            }
            HarnessError::UnknownVariant { name, known } => t!(
                "report.unknown_variant",
                locale = locale,
                name = name,
                known = known
            )
            .to_string(),
            HarnessError::Config(msg) => msg.clone(),
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn header(&mut self, instance: &str, k: u32, epsilon: f64) {
        if self.pairs_seen > 0 {
            self.emit("");
        }
        self.pairs_seen += 1;
        let line = t!(
            "report.header",
            locale = &self.locale,
            instance = instance,
            k = k,
            epsilon = epsilon
        );
        self.emit(line.bold());
    }

    fn command(&mut self, invocation: &Invocation) {
        self.emit(invocation.command_line());
    }

    fn success(&mut self, metrics: &Metrics, duration: Duration) {
        let message = t!(
            "report.success",
            locale = &self.locale,
            time = metrics.total_time,
            imbalance = metrics.imbalance,
            km1 = metrics.km1,
            cut = metrics.cut
        );
        self.emit(format!(
            "{} {} {}",
            t!("report.success_tag", locale = &self.locale).bright_green().bold(),
            message.bold(),
            format!("({:.2}s)", duration.as_secs_f64()).dimmed()
        ));
    }

    fn failure(&mut self, error: &HarnessError) {
        let message = self.failure_message(error);
        self.emit(format!(
            "{} {}",
            t!("report.error_tag", locale = &self.locale).bright_red().bold(),
            message.bold()
        ));
        if let Some(output) = error.raw_output() {
            let banner = t!("report.output_banner", locale = &self.locale);
            self.emit(format!("--- {} ---", banner.yellow()));
            self.emit(output.trim_end());
            self.emit("-".repeat(80));
        }
    }

    fn summary(&mut self, summary: &RunSummary, dry_run: bool) {
        self.emit("");
        let line = if dry_run {
            t!("report.dry_run_summary", locale = &self.locale, runs = summary.runs)
        } else {
            t!(
                "report.summary",
                locale = &self.locale,
                runs = summary.runs,
                secs = format!("{:.2}", summary.total_duration.as_secs_f64())
            )
        };
        self.emit(line.green().bold());
    }
}
