//! # Error Taxonomy Module / 错误分类模块
//!
//! Every failure the harness can hit is terminal for the whole run. This module
//! enumerates them and maps each to the process exit code reported by `main`.
//!
//! 测试框架可能遇到的每一种失败都会终止整个运行。
//! 此模块枚举这些失败，并将其映射为 `main` 报告的进程退出码。

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Exit code for a failed or unparsable partitioner run.
pub const EXIT_RUN_FAILURE: u8 = 1;
/// Exit code for descriptor, variant table and command-line problems.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code when a partitioner executable cannot be started.
pub const EXIT_SPAWN: u8 = 127;
/// Exit code after a Ctrl-C interrupted the traversal.
pub const EXIT_INTERRUPTED: u8 = 130;

/// The reason a marker line could not be turned into metrics.
/// 标记行无法转换为指标的原因。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseProblem {
    /// No line of the output contains the `RESULT` token.
    NoMarkerLine,
    /// The winning marker line lacks the named key.
    MissingKey(&'static str),
    /// The value of the named key is not a valid number.
    InvalidValue { key: &'static str, value: String },
}

impl std::fmt::Display for ParseProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseProblem::NoMarkerLine => write!(f, "no line contains the RESULT marker"),
            ParseProblem::MissingKey(key) => write!(f, "RESULT line has no `{key}=` field"),
            ParseProblem::InvalidValue { key, value } => {
                write!(f, "`{key}={value}` is not a valid number")
            }
        }
    }
}

/// Errors raised by the matrix traversal and its collaborators.
/// 矩阵遍历及其协作组件引发的错误。
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The descriptor or variant table is missing, malformed or violates an invariant.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A test case names a partitioner that is not in the registry.
    #[error("unknown partitioner `{name}` (known: {known})")]
    UnknownVariant { name: String, known: String },

    /// The executable could not be started at all.
    #[error("failed to start `{}`: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The partitioner exited with a non-zero code or was killed by a signal.
    #[error("`{command}` terminated with {}", describe_exit(.exit_code))]
    ProcessFailure {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// The partitioner exited with code zero but its output carried no usable metrics.
    #[error("could not extract metrics from `{command}`: {problem}")]
    ResultParse {
        command: String,
        problem: ParseProblem,
        output: String,
    },

    /// The partitioner exceeded the configured per-run timeout and was killed.
    #[error("`{command}` did not finish within {}s", .limit.as_secs())]
    Timeout { command: String, limit: Duration },

    /// The traversal was cancelled by the user.
    #[error("interrupted while running `{command}`")]
    Interrupted { command: String },
}

impl HarnessError {
    /// The process exit code the harness terminates with for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            HarnessError::Config(_) | HarnessError::UnknownVariant { .. } => EXIT_CONFIG,
            HarnessError::Spawn { .. } => EXIT_SPAWN,
            HarnessError::ProcessFailure { .. }
            | HarnessError::ResultParse { .. }
            | HarnessError::Timeout { .. } => EXIT_RUN_FAILURE,
            HarnessError::Interrupted { .. } => EXIT_INTERRUPTED,
        }
    }

    /// Captured partitioner output carried by the error, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            HarnessError::ProcessFailure { output, .. }
            | HarnessError::ResultParse { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Attaches the rendered command line to a parse failure produced by the extractor.
    pub fn with_command(self, command_line: &str) -> Self {
        match self {
            HarnessError::ResultParse { problem, output, .. } => HarnessError::ResultParse {
                command: command_line.to_string(),
                problem,
                output,
            },
            other => other,
        }
    }

    /// Replaces the output carried by a parse failure, e.g. with stdout and stderr combined.
    pub fn with_output(self, output: String) -> Self {
        match self {
            HarnessError::ResultParse { command, problem, .. } => HarnessError::ResultParse {
                command,
                problem,
                output,
            },
            other => other,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}
