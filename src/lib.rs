//! # Nav Core - 页面导航内核
//!
//! 页面导航内核为单页应用提供声明式路由能力，核心功能：
//!
//! - **声明式路由表**: 构建期校验、按声明顺序首个匹配解析
//! - **干净 URL 历史**: 无哈希前缀的条目栈，支持前进/后退遍历
//! - **导航事件**: 每次路径切换产生结构化事件，可订阅
//! - **配置管理**: 统一的配置加载与合并
//! - **日志系统**: 结构化日志记录
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use nav_core::{AppConfig, AppShell, RouteDef, StaticPage};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 创建外壳实例
//!     let mut shell = AppShell::new(AppConfig::default());
//!
//!     // 安装路由表
//!     shell.install_routes(vec![
//!         RouteDef::with_page("/", "ShennonFano", StaticPage::new("ShenonFano", "主页")),
//!         RouteDef::with_page("/xaffman", "Xaffman", StaticPage::new("Xaffman", "副页")),
//!     ])?;
//!
//!     // 启动外壳并导航
//!     shell.start()?;
//!     shell.router()?.push("/xaffman")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## 模块结构
//!
//! - `router` - 路由表、历史策略、路由器主体
//! - `utils` - 工具函数和错误类型
//! - `core` - 核心配置
//! - `api` - 公共 API 接口

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod core;
pub mod router;
pub mod utils;

// 重导出常用类型，方便使用
pub use router::{
    HistoryStrategy, MemoryHistory, NavigationEvent, NavigationKind, NavigationStatsSnapshot,
    PageComponent, RouteDef, RouteKind, RouteLocation, RouteRecord, RouteTable,
    RouteTableBuilder, RouteValidator, Router, StaticPage,
};

pub use utils::{error_code, generate_id, NavError, Result};
pub use utils::logger::{fields, LogGuard, Logger, LoggerConfig, LoggerConfigBuilder, RotationStrategy};

pub use crate::core::config::{AppConfig, AppConfigBuilder, LogConfig, RouterConfig};
pub use api::sdk::{AppShell, ShellState};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
