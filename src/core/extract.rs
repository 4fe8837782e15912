//! # Result Extraction Module / 结果提取模块
//!
//! Finds the `RESULT` marker line in a partitioner's output and reads the
//! quality metrics from its `key=value` fields.
//!
//! 在划分器输出中查找 `RESULT` 标记行，并从其 `key=value` 字段中读取质量指标。

use std::str::FromStr;

use crate::core::error::{HarnessError, ParseProblem};
use crate::core::models::Metrics;

/// Token identifying the machine-readable summary line.
pub const RESULT_MARKER: &str = "RESULT";

/// Extracts metrics from the last `RESULT` line of `output`.
///
/// Earlier marker lines are ignored even if the last one is incomplete. Missing
/// marker lines, missing keys and unparsable values are reported as
/// [`HarnessError::ResultParse`]; the command field is left empty for the
/// caller to fill in with [`HarnessError::with_command`].
///
/// 从 `output` 的最后一个 `RESULT` 行中提取指标。
/// 即使最后一行不完整，也会忽略之前的标记行。
pub fn extract_metrics(output: &str) -> Result<Metrics, HarnessError> {
    parse_result_line(output).map_err(|problem| HarnessError::ResultParse {
        command: String::new(),
        problem,
        output: output.to_string(),
    })
}

fn parse_result_line(output: &str) -> Result<Metrics, ParseProblem> {
    let line = output
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.contains(RESULT_MARKER))
        .ok_or(ParseProblem::NoMarkerLine)?;

    Ok(Metrics {
        km1: field(line, "km1")?,
        cut: field(line, "cut")?,
        total_time: field(line, "totalPartitionTime")?,
        imbalance: field(line, "imbalance")?,
    })
}

/// Reads the whitespace-delimited `key=value` token named `key`.
fn field<T: FromStr>(line: &str, key: &'static str) -> Result<T, ParseProblem> {
    let value = line
        .split_whitespace()
        .find_map(|token| {
            token
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .ok_or(ParseProblem::MissingKey(key))?;

    value.parse().map_err(|_| ParseProblem::InvalidValue {
        key,
        value: value.to_string(),
    })
}
