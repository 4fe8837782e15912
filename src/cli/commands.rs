//! # Commands Module / 命令模块
//!
//! - `run` - Executes a test matrix descriptor against the partitioner binaries
//! - `init` - Writes a new descriptor template
//!
//! - `run` - 针对划分器二进制文件执行测试矩阵描述文件
//! - `init` - 写入新的描述文件模板

pub mod init;
pub mod run;
