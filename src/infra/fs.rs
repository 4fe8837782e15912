//! # File System Layout Module / 文件系统布局模块
//!
//! This module knows where things live inside a partitioner checkout: the
//! application binaries, the preset directory, the default descriptor, and how
//! relative paths from a descriptor are anchored.
//!
//! 此模块了解划分器检出目录中的各项内容位于何处：
//! 应用程序二进制文件、预设目录、默认描述文件，以及描述文件中的相对路径如何定位。

use std::path::{Path, PathBuf};

use crate::core::error::HarnessError;

/// Default harness root, expanded with `shellexpand`.
pub const DEFAULT_ROOT: &str = "~/mt-kahypar";

/// Directory layout of a partitioner checkout.
/// 划分器检出目录的布局。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// The checkout root; instances resolve against it.
    /// 检出根目录；实例路径相对于它解析。
    pub root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Builds a layout from a user-supplied root, expanding `~` and environment variables.
    pub fn from_raw(raw_root: &str) -> Result<Self, HarnessError> {
        expand_path(raw_root).map(Self::new)
    }

    /// Directory holding the preset `.ini` files.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Directory holding the built partitioner binaries.
    pub fn application_dir(&self) -> PathBuf {
        self.root.join("build").join("mt-kahypar").join("application")
    }

    /// Descriptor used when `--tests` is not given.
    pub fn default_descriptor(&self) -> PathBuf {
        self.root
            .join("tests")
            .join("end_to_end")
            .join("integration_tests.json")
    }

    /// Anchors an instance path from the descriptor at the root.
    pub fn instance_path(&self, instance: &str) -> PathBuf {
        anchor(&self.root, Path::new(instance))
    }

    /// Anchors a preset path from the descriptor or a variant table at the config directory.
    pub fn config_path(&self, config: &Path) -> PathBuf {
        anchor(&self.config_dir(), config)
    }

    /// Anchors an executable path from a variant table at the root.
    pub fn executable_path(&self, executable: &Path) -> PathBuf {
        anchor(&self.root, executable)
    }
}

/// Joins `path` onto `base` unless it is already absolute.
pub fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Expands `~` and `$VAR` references in a path given on the command line.
/// 展开命令行中给出的路径里的 `~` 和 `$VAR` 引用。
pub fn expand_path(raw: &str) -> Result<PathBuf, HarnessError> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .map_err(|e| HarnessError::Config(format!("cannot expand path `{raw}`: {e}")))
}
