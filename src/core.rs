//! # Core Module / 核心模块
//!
//! This module contains the harness core: data models, configuration,
//! matrix planning, scheduling, aggregation and the top-level controller.
//!
//! 此模块包含核心功能：数据模型、配置、矩阵计划、调度、聚合和顶层控制器。

pub mod aggregate;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod planner;
pub mod scheduler;

// Re-exports
pub use config::MatrixConfig;
pub use controller::{HarnessController, HarnessState};
pub use error::SchedulingFault;
pub use models::{AggregateStat, ReportTable};
