//! # Command Builder Module / 命令构建模块
//!
//! Turns one point of the matrix into the exact argument list handed to a
//! partitioner. The function is pure: it never touches the file system, so the
//! same inputs always give the same invocation.
//!
//! 将矩阵中的一个点转换为传递给划分器的精确参数列表。
//! 该函数是纯函数：从不访问文件系统，因此相同输入总是得到相同的调用。

use std::path::Path;

use crate::core::config::TestCase;
use crate::core::models::{Invocation, Variant};

/// Flags every run receives after the per-point arguments.
pub const FIXED_FLAGS: [&str; 4] = [
    "-okm1",
    "-mdirect",
    "--show-detailed-timings=true",
    "--sp-process=true",
];

/// Builds the invocation for `case` on `instance` with `k` blocks.
///
/// Argument order: `-h<instance> -p<config> -k<k> -e<epsilon> -t<threads>`, the
/// fixed flags, then the case's extra parameters as given. The case's preset
/// override wins over the variant default.
///
/// 为 `case` 在 `instance` 上以 `k` 个块构建调用。
/// 用例的预设覆盖优先于变体默认值。
pub fn build_invocation(
    case: &TestCase,
    variant: &Variant,
    instance: &Path,
    k: u32,
    epsilon: f64,
    threads: usize,
) -> Invocation {
    let config = case.config.as_deref().unwrap_or(&variant.config);

    let mut args = Vec::with_capacity(5 + FIXED_FLAGS.len() + case.parameters.len());
    args.push(format!("-h{}", instance.display()));
    args.push(format!("-p{}", config.display()));
    args.push(format!("-k{k}"));
    args.push(format!("-e{epsilon}"));
    args.push(format!("-t{threads}"));
    args.extend(FIXED_FLAGS.iter().map(|flag| flag.to_string()));
    args.extend(case.parameters.iter().cloned());

    Invocation {
        program: variant.executable.clone(),
        args,
    }
}
