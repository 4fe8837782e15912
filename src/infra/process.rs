//! # Process Execution Module / 进程执行模块
//!
//! Spawns a partitioner, captures everything it prints on stdout and stderr,
//! and waits for it to exit. A non-zero exit code is data for the caller, not
//! an error here; the only errors are a process that cannot be started and an
//! exceeded timeout.
//!
//! 启动划分器，分别捕获其 stdout 和 stderr 的全部输出并等待其退出。
//! 非零退出码是交给调用方的数据，而不是此处的错误；
//! 唯一的错误是进程无法启动以及超时。

use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::core::error::HarnessError;
use crate::core::models::{Invocation, RunOutcome};

/// Executes one invocation to completion.
/// 将一次调用执行到结束。
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<RunOutcome, HarnessError>;
}

/// Runs invocations as real child processes on the tokio runtime.
/// 在 tokio 运行时上以真实子进程方式运行调用。
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    /// Kill the child and fail when it runs longer than this.
    /// 子进程运行时间超过此值时将其终止并报告失败。
    pub timeout: Option<Duration>,
}

impl CommandRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl ProcessRunner for CommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<RunOutcome, HarnessError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).kill_on_drop(true);

        let start = Instant::now();
        let captured = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, spawn_and_capture(cmd))
                .await
                .map_err(|_| HarnessError::Timeout {
                    command: invocation.command_line(),
                    limit,
                })?,
            None => spawn_and_capture(cmd).await,
        };
        let duration = start.elapsed();

        let (status, stdout, stderr) = captured.map_err(|source| HarnessError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        tracing::debug!(
            program = %invocation.program.display(),
            exit_code = ?status.code(),
            elapsed_ms = duration.as_millis() as u64,
            "partitioner exited"
        );

        Ok(RunOutcome {
            exit_code: status.code(),
            stdout,
            stderr,
            duration,
        })
    }
}

/// Spawns a command and captures its stdout and stderr.
/// Both streams are drained concurrently to the end and kept apart.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// The `ExitStatus` of the process with its stdout and stderr, or the I/O
/// error that prevented the process from starting or being awaited. Bytes
/// that are not valid UTF-8 are replaced with U+FFFD.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 两个输出流被并发读取到结束，并分别保存。
pub async fn spawn_and_capture(
    mut cmd: Command,
) -> std::io::Result<(ExitStatus, String, String)> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stderr"))?;

    let stdout_handle = tokio::spawn(drain(stdout, "stdout"));
    let stderr_handle = tokio::spawn(drain(stderr, "stderr"));

    let status = child.wait().await?;

    // Wait for the readers so that no trailing output is lost.
    // 等待读取任务完成，以确保不丢失末尾输出。
    let stdout = join_reader(stdout_handle, "stdout").await;
    let stderr = join_reader(stderr_handle, "stderr").await;

    Ok((status, stdout, stderr))
}

/// Reads `stream` until EOF. A read error is logged and the rest of the stream
/// is still consumed, so the child never blocks on a full pipe or gets SIGPIPE.
async fn drain<R>(mut stream: R, name: &'static str) -> String
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    if let Err(e) = stream.read_to_end(&mut bytes).await {
        tracing::warn!(stream = name, "failed to read partitioner output: {e}");
        if let Err(e) = tokio::io::copy(&mut stream, &mut tokio::io::sink()).await {
            tracing::warn!(stream = name, "failed to drain partitioner output: {e}");
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

async fn join_reader(handle: JoinHandle<String>, name: &'static str) -> String {
    handle.await.unwrap_or_else(|e| {
        tracing::warn!(stream = name, "failed to join output reader: {e}");
        String::new()
    })
}
