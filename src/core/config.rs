//! # Test Matrix Descriptor Module / 测试矩阵描述文件模块
//!
//! Parsing and validation of the JSON descriptor that lists the instances,
//! block counts and test cases of a matrix run.
//!
//! 解析并验证 JSON 描述文件，该文件列出矩阵运行的实例、块数和测试用例。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::HarnessError;
use crate::infra::fs::Layout;

/// Represents a single test case defined in the descriptor.
/// Each `TestCase` runs one partitioner against every instance/k combination.
/// 代表描述文件中定义的单个测试用例。
/// 每个 `TestCase` 会针对每个实例/k 组合运行一个划分器。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestCase {
    /// Name of the partitioner variant; must be registered.
    /// 划分器变体名称；必须已注册。
    pub partitioner: String,
    /// Optional preset overriding the variant's default.
    /// 可选的预设，覆盖变体的默认预设。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,
    /// Extra arguments appended verbatim after the fixed flags.
    /// 在固定标志之后原样追加的额外参数。
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

impl TestCase {
    pub fn new(partitioner: impl Into<String>) -> Self {
        Self {
            partitioner: partitioner.into(),
            config: None,
            parameters: Vec::new(),
        }
    }
}

/// Represents the entire test matrix descriptor, loaded from a JSON file.
/// 代表从 JSON 文件加载的整个测试矩阵描述。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TestMatrix {
    /// Allowed imbalance passed via `-e` / 通过 `-e` 传递的允许不平衡度
    pub epsilon: f64,
    /// Instance paths, relative to the harness root unless absolute.
    pub instances: Vec<String>,
    /// Block counts passed via `-k` / 通过 `-k` 传递的块数
    pub k: Vec<u32>,
    pub tests: Vec<TestCase>,
}

impl TestMatrix {
    /// Checks the invariants serde cannot express.
    /// 检查 serde 无法表达的不变量。
    pub fn validate(&self) -> Result<(), HarnessError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(HarnessError::Config(format!(
                "`epsilon` must be a non-negative number, got {}",
                self.epsilon
            )));
        }
        if self.instances.is_empty() {
            return Err(HarnessError::Config("`instances` must not be empty".into()));
        }
        if self.k.is_empty() {
            return Err(HarnessError::Config("`k` must not be empty".into()));
        }
        if let Some(k) = self.k.iter().find(|&&k| k == 0) {
            return Err(HarnessError::Config(format!(
                "`k` values must be positive, got {k}"
            )));
        }
        if self.tests.is_empty() {
            return Err(HarnessError::Config("`tests` must not be empty".into()));
        }
        Ok(())
    }

    /// Anchors every relative preset override at the layout's config directory.
    pub fn resolve_configs(mut self, layout: &Layout) -> Self {
        for case in &mut self.tests {
            if let Some(config) = case.config.take() {
                case.config = Some(layout.config_path(&config));
            }
        }
        self
    }

    /// Number of invocations a full traversal performs.
    pub fn len(&self) -> usize {
        self.instances.len() * self.k.len() * self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses and validates a descriptor from its JSON text.
pub fn parse_test_matrix(content: &str) -> Result<TestMatrix, HarnessError> {
    let matrix: TestMatrix = serde_json::from_str(content)
        .map_err(|e| HarnessError::Config(format!("malformed descriptor: {e}")))?;
    matrix.validate()?;
    Ok(matrix)
}

/// Reads, parses and validates the descriptor at `path`.
/// 读取、解析并验证位于 `path` 的描述文件。
pub fn load_test_matrix(path: &Path) -> Result<TestMatrix, HarnessError> {
    let content = fs::read_to_string(path).map_err(|e| {
        HarnessError::Config(format!("cannot read descriptor {}: {e}", path.display()))
    })?;
    parse_test_matrix(&content)
}
