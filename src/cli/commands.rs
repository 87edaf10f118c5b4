//! # Commands Module / 命令模块
//!
//! - `run` - Runs the benchmark matrix and writes the report
//! - `init` - Creates a starter `BenchMatrix.toml`
//!
//! - `run` - 运行基准测试矩阵并写入报告
//! - `init` - 创建初始的 `BenchMatrix.toml`

pub mod init;
pub mod run;
