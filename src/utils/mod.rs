//! 工具模块
//!
//! 包含错误类型、导航 ID 生成和日志系统等通用工具。

pub mod error;
pub mod id;
pub mod logger;

// 重导出常用类型
pub use error::{error_code, NavError, Result};
pub use id::{generate_id, is_valid_id, parse_id};
pub use logger::{LogGuard, Logger, LoggerConfig, LoggerConfigBuilder, RotationStrategy};
