//! # Bench Matrix Library / Bench Matrix 库
//!
//! This library provides the core functionality for the `bench-matrix` tool,
//! a configuration-driven harness that times an external build tool across a
//! benchmark x configuration matrix and reports trimmed means.
//!
//! 此库为 `bench-matrix` 工具提供核心功能，
//! 这是一个配置驱动的基准测试工具，它在基准测试 x 配置矩阵上为外部构建工具计时，
//! 并报告截尾均值。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, configuration, scheduling, aggregation and the harness controller
//! - `infra` - Infrastructure services like command execution and file system operations
//! - `reporting` - Table, console and JSON reporting
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、配置、调度、聚合和运行控制器
//! - `infra` - 基础设施服务，如命令执行和文件系统操作
//! - `reporting` - 表格、控制台和 JSON 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::aggregate;
pub use core::config;
pub use core::models;

/// Maps a requested locale onto one the application ships.
///
/// It attempts to match the full locale (e.g., "zh-CN"), then just the
/// language code (e.g., "en"), and finally falls back to "en".
pub fn resolve_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.iter().any(|available| *available == requested) {
        return requested.to_string();
    }
    requested
        .split(['-', '_'])
        .next()
        .and_then(|lang_code| {
            available_locales
                .iter()
                .find(|available| available.split('-').next() == Some(lang_code))
        })
        .map(|lang| lang.to_string())
        .unwrap_or_else(|| "en".to_string())
}

/// Initializes the application's internationalization (i18n) based on the system locale.
pub fn init() {
    // Fallback to "en" if detection fails.
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    rust_i18n::set_locale(&resolve_locale(&locale));
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
