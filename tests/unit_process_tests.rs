//! # Process Module Unit Tests / Process 模块单元测试
//!
//! Tests for `CommandRunner` and `spawn_and_capture`: exit codes, stream
//! capture, undecodable output, missing binaries and timeouts.
//!
//! `CommandRunner` 和 `spawn_and_capture` 的测试：退出码、输出流捕获、
//! 无法解码的输出、缺失的二进制文件以及超时。

#![cfg(unix)]

use partition_matrix::core::error::HarnessError;
use partition_matrix::core::extract::extract_metrics;
use partition_matrix::core::models::Invocation;
use partition_matrix::infra::process::{CommandRunner, ProcessRunner, spawn_and_capture};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::process::Command;

fn sh(script: &str) -> Invocation {
    Invocation {
        program: PathBuf::from("sh"),
        args: vec!["-c".into(), script.into()],
    }
}

#[cfg(test)]
mod capture_tests {
    use super::*;

    #[tokio::test]
    async fn test_streams_and_exit_code_are_captured_separately() {
        let outcome = CommandRunner::default()
            .run(&sh("echo hello; echo oops >&2; exit 3"))
            .await
            .unwrap();
        assert_eq!(outcome.exit_code, Some(3));
        assert_eq!(outcome.stdout, "hello\n");
        assert_eq!(outcome.stderr, "oops\n");
        assert_eq!(outcome.combined_output(), "hello\noops\n");
    }

    #[tokio::test]
    async fn test_invalid_utf8_does_not_drop_the_result_line() {
        let outcome = CommandRunner::default()
            .run(&sh(
                "printf 'level \\377 done\\nRESULT km1=1 cut=2 totalPartitionTime=1 imbalance=0\\n'",
            ))
            .await
            .unwrap();

        assert_eq!(outcome.exit_code, Some(0));
        assert!(outcome.stdout.starts_with("level \u{FFFD} done\n"));
        let metrics = extract_metrics(&outcome.stdout).unwrap();
        assert_eq!(metrics.km1, 1);
        assert_eq!(metrics.cut, 2);
    }

    #[tokio::test]
    async fn test_output_after_invalid_utf8_is_read_to_the_end() {
        // Stopping early would close the pipe and kill the writer with SIGPIPE.
        let outcome = CommandRunner::default()
            .run(&sh(
                "printf '\\377\\n'; head -c 1000000 /dev/zero | tr '\\000' 'a'; echo; echo done",
            ))
            .await
            .unwrap();

        assert_eq!(outcome.exit_code, Some(0));
        assert!(outcome.stdout.len() > 1_000_000);
        assert!(outcome.stdout.ends_with("done\n"));
    }

    #[tokio::test]
    async fn test_spawn_and_capture_returns_status_and_both_streams() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo out; echo err >&2");
        let (status, stdout, stderr) = spawn_and_capture(cmd).await.unwrap();
        assert!(status.success());
        assert_eq!(stdout, "out\n");
        assert_eq!(stderr, "err\n");
    }
}

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_error() {
        let invocation = Invocation {
            program: PathBuf::from("/definitely/not/a/partitioner_12345"),
            args: vec![],
        };
        let err = CommandRunner::default().run(&invocation).await.unwrap_err();
        assert!(matches!(err, HarnessError::Spawn { .. }));
        assert_eq!(err.exit_code(), 127);
    }

    #[tokio::test]
    async fn test_timeout_kills_hung_process() {
        let runner = CommandRunner::new(Some(Duration::from_millis(200)));
        let start = Instant::now();
        let err = runner.run(&sh("exec sleep 30")).await.unwrap_err();
        assert!(matches!(err, HarnessError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
