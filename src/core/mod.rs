//! 核心模块
//!
//! 包含内核配置结构和加载逻辑。

pub mod config;

pub use config::{AppConfig, AppConfigBuilder, LogConfig, RouterConfig};
