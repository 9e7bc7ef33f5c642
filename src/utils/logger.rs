//! 日志系统模块
//!
//! 本模块基于 tracing 生态实现内核的日志系统，包括：
//!
//! - 多级别日志支持（TRACE, DEBUG, INFO, WARN, ERROR）
//! - 结构化日志（JSON 格式输出）
//! - 文件日志输出（异步非阻塞）
//! - 日志轮转（按时间轮转：每天、每小时）
//!
//! # 示例
//!
//! ```rust,no_run
//! use nav_core::utils::logger::{Logger, LoggerConfig, RotationStrategy};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 基础初始化（仅控制台输出）
//!     let _guard = Logger::init(LoggerConfig::default())?;
//!
//!     tracing::info!(
//!         navigation_id = "a1B2c3D4e5",
//!         path = "/xaffman",
//!         "Navigation completed"
//!     );
//!
//!     Ok(())
//! }
//! ```

use crate::utils::{NavError, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// 日志轮转策略
// ============================================================================

/// 日志轮转策略
///
/// 定义日志文件的轮转方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationStrategy {
    /// 不轮转（单个日志文件）
    Never,
    /// 每小时轮转
    Hourly,
    /// 每天轮转（默认）
    #[default]
    Daily,
}

impl RotationStrategy {
    /// 转换为 tracing-appender 的 Rotation 类型
    fn to_rotation(self) -> Rotation {
        match self {
            RotationStrategy::Never => Rotation::NEVER,
            RotationStrategy::Hourly => Rotation::HOURLY,
            RotationStrategy::Daily => Rotation::DAILY,
        }
    }

    /// 从字符串解析轮转策略
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "never" | "none" => RotationStrategy::Never,
            "hourly" | "hour" => RotationStrategy::Hourly,
            _ => RotationStrategy::Daily,
        }
    }
}

impl std::fmt::Display for RotationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationStrategy::Never => write!(f, "never"),
            RotationStrategy::Hourly => write!(f, "hourly"),
            RotationStrategy::Daily => write!(f, "daily"),
        }
    }
}

// ============================================================================
// 日志配置
// ============================================================================

/// 日志系统配置
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// 默认日志级别（例如 "trace", "debug", "info", "warn", "error"）
    pub level: String,

    /// 是否输出 JSON 格式
    pub json_format: bool,

    /// 日志文件目录（为 None 时仅控制台输出）
    pub log_dir: Option<PathBuf>,

    /// 日志文件名前缀
    pub file_prefix: String,

    /// 日志轮转策略
    pub rotation: RotationStrategy,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            log_dir: None,
            file_prefix: "nav-core".to_string(),
            rotation: RotationStrategy::Daily,
        }
    }
}

impl LoggerConfig {
    /// 创建配置构建器
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::default()
    }
}

/// 日志配置构建器
#[derive(Debug, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// 设置日志级别
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    /// 启用 JSON 格式输出
    pub fn json_format(mut self, enabled: bool) -> Self {
        self.config.json_format = enabled;
        self
    }

    /// 启用文件输出
    pub fn file_output(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = Some(dir.into());
        self
    }

    /// 设置日志文件名前缀
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.file_prefix = prefix.into();
        self
    }

    /// 设置轮转策略
    pub fn rotation(mut self, rotation: RotationStrategy) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// 构建配置
    pub fn build(self) -> LoggerConfig {
        self.config
    }
}

// ============================================================================
// 日志系统
// ============================================================================

/// 日志守卫
///
/// 持有文件日志的后台写入线程句柄。在程序退出前必须保持存活，
/// 否则缓冲中的日志会丢失。
pub struct LogGuard {
    _worker_guard: Option<WorkerGuard>,
}

/// 日志系统入口
pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// 返回 `LogGuard`，调用方需持有它直到程序结束。
    /// 重复初始化会返回 `NavError::InitFailed`。
    pub fn init(config: LoggerConfig) -> Result<LogGuard> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("nav_core={}", config.level)));

        let (file_layer, worker_guard) = match config.log_dir {
            Some(ref dir) => {
                let appender = RollingFileAppender::new(
                    config.rotation.to_rotation(),
                    dir,
                    &config.file_prefix,
                );
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        let registry = tracing_subscriber::registry().with(filter).with(file_layer);

        let init_result = if config.json_format {
            registry.with(fmt::layer().json()).try_init()
        } else {
            registry.with(fmt::layer()).try_init()
        };

        init_result.map_err(|e| NavError::InitFailed(format!("日志系统初始化失败: {}", e)))?;

        Ok(LogGuard {
            _worker_guard: worker_guard,
        })
    }
}

/// 常用结构化日志字段名
pub mod fields {
    /// 导航 ID
    pub const NAVIGATION_ID: &str = "navigation_id";
    /// 目标路径
    pub const PATH: &str = "path";
    /// 路由名称
    pub const ROUTE_NAME: &str = "route_name";
    /// 导航类型
    pub const KIND: &str = "kind";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_parse() {
        assert_eq!(RotationStrategy::parse("never"), RotationStrategy::Never);
        assert_eq!(RotationStrategy::parse("hourly"), RotationStrategy::Hourly);
        assert_eq!(RotationStrategy::parse("daily"), RotationStrategy::Daily);
        assert_eq!(RotationStrategy::parse("unknown"), RotationStrategy::Daily);
    }

    #[test]
    fn test_rotation_display() {
        assert_eq!(RotationStrategy::Daily.to_string(), "daily");
        assert_eq!(RotationStrategy::Never.to_string(), "never");
    }

    #[test]
    fn test_logger_config_builder() {
        let config = LoggerConfig::builder()
            .level("debug")
            .json_format(true)
            .file_output("/tmp/logs")
            .rotation(RotationStrategy::Hourly)
            .build();

        assert_eq!(config.level, "debug");
        assert!(config.json_format);
        assert!(config.log_dir.is_some());
        assert_eq!(config.rotation, RotationStrategy::Hourly);
    }

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.log_dir.is_none());
    }
}
