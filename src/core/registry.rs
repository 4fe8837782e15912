//! # Variant Registry Module / 变体注册表模块
//!
//! Maps partitioner names used in descriptors to the executable and default
//! preset they stand for. The registry is built once and handed to the matrix
//! runner; nothing mutates it afterwards.
//!
//! 将描述文件中使用的划分器名称映射到对应的可执行文件和默认预设。
//! 注册表只构建一次并交给矩阵运行器，之后不会被修改。

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::HarnessError;
use crate::core::models::Variant;
use crate::infra::fs::Layout;

/// Built-in variants: name, binary under the application directory, default preset.
const MT_KAHYPAR_VARIANTS: [(&str, &str, &str); 4] = [
    ("Mt-KaHyPar-D", "MtKaHyParFast", "default_preset.ini"),
    ("Mt-KaHyPar-Q", "MtKaHyParStrong", "quality_preset.ini"),
    ("Mt-KaHyPar-Graph", "MtKaHyParGraph", "default_preset.ini"),
    ("Mt-KaHyPar-Det", "MtKaHyParFast", "speed_deterministic_preset.ini"),
];

/// A fixed table of partitioner variants keyed by name.
/// 按名称索引的划分器变体固定表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantRegistry {
    variants: BTreeMap<String, Variant>,
}

/// On-disk shape of a variant table.
///
/// ```toml
/// [variants.Mt-KaHyPar-D]
/// executable = "build/mt-kahypar/application/MtKaHyParFast"
/// config = "default_preset.ini"
/// ```
#[derive(Debug, Deserialize)]
struct VariantTable {
    variants: BTreeMap<String, VariantEntry>,
}

#[derive(Debug, Deserialize)]
struct VariantEntry {
    executable: PathBuf,
    config: PathBuf,
}

impl VariantRegistry {
    /// Builds a registry from explicit `(name, variant)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (String, Variant)>) -> Self {
        Self {
            variants: entries.into_iter().collect(),
        }
    }

    /// The Mt-KaHyPar application binaries and presets found under `layout`.
    /// `layout` 下的 Mt-KaHyPar 应用程序二进制文件和预设。
    pub fn mt_kahypar(layout: &Layout) -> Self {
        let application_dir = layout.application_dir();
        let config_dir = layout.config_dir();
        Self::new(MT_KAHYPAR_VARIANTS.iter().map(|(name, binary, preset)| {
            (
                name.to_string(),
                Variant {
                    executable: application_dir.join(binary),
                    config: config_dir.join(preset),
                },
            )
        }))
    }

    /// Parses a TOML variant table. Relative executables resolve against the
    /// root, relative presets against the config directory.
    pub fn from_toml_str(content: &str, layout: &Layout) -> Result<Self, HarnessError> {
        let table: VariantTable = toml::from_str(content)
            .map_err(|e| HarnessError::Config(format!("malformed variant table: {e}")))?;
        if table.variants.is_empty() {
            return Err(HarnessError::Config(
                "variant table defines no variants".into(),
            ));
        }
        Ok(Self::new(table.variants.into_iter().map(|(name, entry)| {
            (
                name,
                Variant {
                    executable: layout.executable_path(&entry.executable),
                    config: layout.config_path(&entry.config),
                },
            )
        })))
    }

    /// Reads a TOML variant table from disk.
    pub fn from_toml_file(path: &Path, layout: &Layout) -> Result<Self, HarnessError> {
        let content = fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!("cannot read variant table {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content, layout)
    }

    /// Looks up a variant by name.
    /// 按名称查找变体。
    pub fn resolve(&self, name: &str) -> Result<&Variant, HarnessError> {
        self.variants
            .get(name)
            .ok_or_else(|| HarnessError::UnknownVariant {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.variants.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
