//! # Matrix Execution Engine Module / 矩阵执行引擎模块
//!
//! This module walks the matrix of instances × block counts × test cases in
//! descriptor order, runs one partitioner at a time, and stops the whole
//! traversal at the first failure.
//!
//! 此模块按描述文件顺序遍历 实例 × 块数 × 测试用例 的矩阵，
//! 每次运行一个划分器，并在第一次失败时停止整个遍历。

use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::core::command::build_invocation;
use crate::core::config::{TestCase, TestMatrix};
use crate::core::error::HarnessError;
use crate::core::extract::extract_metrics;
use crate::core::models::{Invocation, Metrics, RunSummary};
use crate::core::registry::VariantRegistry;
use crate::infra::fs::Layout;
use crate::infra::process::ProcessRunner;
use crate::reporting::Reporter;

/// Knobs of a traversal that do not come from the descriptor.
/// 不来自描述文件的遍历参数。
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Value passed to every partitioner via `-t`.
    pub threads: usize,
    /// Build and report invocations without executing them.
    pub dry_run: bool,
    /// Where relative instance paths are anchored.
    pub layout: Layout,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            dry_run: false,
            layout: Layout::default(),
        }
    }
}

/// Drives a full matrix traversal.
///
/// The descriptor and registry are borrowed read-only for the whole run; the
/// process runner and reporter are injected so the traversal can be exercised
/// without spawning processes or printing.
///
/// 驱动完整的矩阵遍历。
/// 描述文件和注册表在整个运行期间以只读方式借用；
/// 进程运行器和报告器通过注入提供，因此无需启动进程或打印即可测试遍历。
pub struct MatrixRunner<'a, R, P> {
    matrix: &'a TestMatrix,
    registry: &'a VariantRegistry,
    runner: &'a R,
    reporter: &'a mut P,
    settings: RunSettings,
    cancel: CancellationToken,
}

impl<'a, R, P> MatrixRunner<'a, R, P>
where
    R: ProcessRunner,
    P: Reporter,
{
    pub fn new(
        matrix: &'a TestMatrix,
        registry: &'a VariantRegistry,
        runner: &'a R,
        reporter: &'a mut P,
        settings: RunSettings,
    ) -> Self {
        Self {
            matrix,
            registry,
            runner,
            reporter,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops the traversal with [`HarnessError::Interrupted`] once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Runs every (instance, k, test case) combination in order.
    ///
    /// Returns at the first error after reporting it: an unknown partitioner
    /// (before anything runs), a process that cannot start, a non-zero exit, a
    /// timeout, an interruption, or output without usable metrics.
    ///
    /// 按顺序运行每个 (实例, k, 测试用例) 组合。
    /// 在报告第一个错误后立即返回。
    pub async fn run(&mut self) -> Result<RunSummary, HarnessError> {
        let matrix = self.matrix;
        let registry = self.registry;

        if let Err(e) = self.check_variants() {
            self.reporter.failure(&e);
            return Err(e);
        }

        let mut summary = RunSummary::default();
        for instance in &matrix.instances {
            let instance_path = self.settings.layout.instance_path(instance);
            for &k in &matrix.k {
                tracing::info!(instance = %instance, k, "starting instance/k pair");
                self.reporter.header(instance, k, matrix.epsilon);

                for case in &matrix.tests {
                    let variant = match registry.resolve(&case.partitioner) {
                        Ok(variant) => variant,
                        Err(e) => return Err(self.stop(e, case, instance, k)),
                    };
                    let invocation = build_invocation(
                        case,
                        variant,
                        &instance_path,
                        k,
                        matrix.epsilon,
                        self.settings.threads,
                    );
                    self.reporter.command(&invocation);
                    summary.runs += 1;

                    if self.settings.dry_run {
                        continue;
                    }

                    match self.execute(&invocation).await {
                        Ok((metrics, duration)) => {
                            summary.total_duration += duration;
                            self.reporter.success(&metrics, duration);
                        }
                        Err(e) => return Err(self.stop(e, case, instance, k)),
                    }
                }
            }
        }

        self.reporter.summary(&summary, self.settings.dry_run);
        Ok(summary)
    }

    /// Reports the error that ends the traversal and hands it back.
    fn stop(
        &mut self,
        error: HarnessError,
        case: &TestCase,
        instance: &str,
        k: u32,
    ) -> HarnessError {
        tracing::warn!(
            partitioner = %case.partitioner,
            instance = %instance,
            k,
            "stopping matrix: {error}"
        );
        self.reporter.failure(&error);
        error
    }

    /// Every test case must name a registered partitioner before anything runs.
    fn check_variants(&self) -> Result<(), HarnessError> {
        self.matrix
            .tests
            .iter()
            .try_for_each(|case| self.registry.resolve(&case.partitioner).map(|_| ()))
    }

    /// Runs one invocation and turns its outcome into metrics.
    async fn execute(&self, invocation: &Invocation) -> Result<(Metrics, Duration), HarnessError> {
        let command = invocation.command_line();
        tracing::debug!(command = %command, "running partitioner");

        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return Err(HarnessError::Interrupted { command });
            }
            outcome = self.runner.run(invocation) => outcome?,
        };

        if !outcome.success() {
            // Ctrl-C reaches the child too; it may exit before the token is observed.
            if self.cancel.is_cancelled() {
                return Err(HarnessError::Interrupted { command });
            }
            return Err(HarnessError::ProcessFailure {
                output: outcome.combined_output(),
                command,
                exit_code: outcome.exit_code,
            });
        }

        let metrics = extract_metrics(&outcome.stdout)
            .map_err(|e| e.with_command(&command).with_output(outcome.combined_output()))?;
        Ok((metrics, outcome.duration))
    }
}
