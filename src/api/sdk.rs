//! AppShell SDK
//!
//! 导航内核的主要对外接口。应用引导代码通过它安装路由器、
//! 启动外壳并访问当前激活的页面。路由器实例由外壳持有，
//! 作为应用生命周期内的单例：启动时创建一次，之后只读引用。
//!
//! # 示例
//!
//! ```rust,no_run
//! use nav_core::{AppConfig, AppShell, RouteDef, StaticPage};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::builder().log_level("info").build();
//!     let mut shell = AppShell::new(config);
//!
//!     shell.install_routes(vec![
//!         RouteDef::with_page("/", "ShennonFano", StaticPage::new("ShenonFano", "...")),
//!         RouteDef::with_page("/xaffman", "Xaffman", StaticPage::new("Xaffman", "...")),
//!     ])?;
//!     shell.start()?;
//!
//!     shell.router()?.push("/xaffman")?;
//!     shell.shutdown()?;
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::core::config::AppConfig;
use crate::router::{
    NavigationEvent, PageComponent, RouteDef, RouteTable, RouteTableStats, Router,
};
use crate::utils::{NavError, Result};

// ============================================================================
// 外壳状态
// ============================================================================

/// 外壳状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    /// 未初始化（路由器尚未安装）
    Uninitialized,
    /// 已安装路由器
    Installed,
    /// 运行中
    Running,
    /// 已关闭
    Shutdown,
}

impl ShellState {
    /// 检查是否可以启动
    pub fn can_start(&self) -> bool {
        matches!(self, ShellState::Installed)
    }

    /// 检查是否可以关闭
    pub fn can_shutdown(&self) -> bool {
        matches!(self, ShellState::Running)
    }

    /// 检查是否正在运行
    pub fn is_running(&self) -> bool {
        matches!(self, ShellState::Running)
    }
}

impl std::fmt::Display for ShellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellState::Uninitialized => write!(f, "uninitialized"),
            ShellState::Installed => write!(f, "installed"),
            ShellState::Running => write!(f, "running"),
            ShellState::Shutdown => write!(f, "shutdown"),
        }
    }
}

// ============================================================================
// AppShell 主结构体
// ============================================================================

/// 应用外壳
///
/// 这是导航内核的入口点，负责组装配置、路由表和路由器，
/// 并管理三者的生命周期。
///
/// # 生命周期
///
/// 1. `new()` - 创建外壳
/// 2. `install()` / `install_routes()` - 安装路由器
/// 3. `start()` - 启动外壳
/// 4. `shutdown()` - 关闭外壳
pub struct AppShell {
    /// 内核配置
    config: AppConfig,

    /// 外壳状态
    state: ShellState,

    /// 路由器单例
    router: Option<Arc<Router>>,

    /// 启动时间
    started_at: Option<Instant>,
}

impl AppShell {
    /// 创建新的外壳实例
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: ShellState::Uninitialized,
            router: None,
            started_at: None,
        }
    }

    /// 使用默认配置创建外壳
    pub fn with_defaults() -> Self {
        Self::new(AppConfig::default())
    }

    /// 安装路由器
    ///
    /// 只允许在未初始化状态下安装一次。
    pub fn install(&mut self, router: Router) -> Result<()> {
        if self.state != ShellState::Uninitialized {
            return Err(NavError::InvalidShellState {
                expected: ShellState::Uninitialized.to_string(),
                actual: self.state.to_string(),
            });
        }

        let routes = router.table().len();
        self.router = Some(Arc::new(router));
        self.state = ShellState::Installed;

        info!(routes, "安装路由器");
        Ok(())
    }

    /// 由路由声明构建路由器并安装
    ///
    /// 路由表配置和历史策略取自外壳配置。
    pub fn install_routes(&mut self, defs: impl IntoIterator<Item = RouteDef>) -> Result<()> {
        let table = RouteTable::builder()
            .routes(defs)
            .config(self.config.router.to_table_config())
            .build()?;

        let history = self.config.router.build_history();
        self.install(Router::new(table, Box::new(history)))
    }

    /// 启动外壳
    pub fn start(&mut self) -> Result<()> {
        if !self.state.can_start() {
            return Err(NavError::InvalidShellState {
                expected: ShellState::Installed.to_string(),
                actual: self.state.to_string(),
            });
        }

        self.state = ShellState::Running;
        self.started_at = Some(Instant::now());

        let router = self.router()?;
        let current = router.current();
        info!(
            initial_path = %current.path,
            initial_route = current.name.as_deref().unwrap_or("-"),
            dev_mode = self.config.dev_mode,
            "外壳已启动"
        );

        Ok(())
    }

    /// 关闭外壳
    ///
    /// 重复关闭是无害的空操作。
    pub fn shutdown(&mut self) -> Result<()> {
        if self.state == ShellState::Shutdown {
            return Ok(());
        }

        if !self.state.can_shutdown() {
            return Err(NavError::InvalidShellState {
                expected: ShellState::Running.to_string(),
                actual: self.state.to_string(),
            });
        }

        if let Some(ref router) = self.router {
            let stats = router.stats();
            info!(
                navigations = stats.total,
                unmatched = stats.unmatched,
                "外壳关闭，导航统计归档"
            );
        }

        self.state = ShellState::Shutdown;
        Ok(())
    }

    /// 获取路由器单例
    pub fn router(&self) -> Result<Arc<Router>> {
        self.router
            .as_ref()
            .map(Arc::clone)
            .ok_or(NavError::RouterNotInstalled)
    }

    /// 导航到指定路径（便捷方法）
    pub fn navigate(&self, path: &str) -> Result<NavigationEvent> {
        if !self.state.is_running() {
            return Err(NavError::InvalidShellState {
                expected: ShellState::Running.to_string(),
                actual: self.state.to_string(),
            });
        }
        self.router()?.push(path)
    }

    /// 当前激活的页面组件
    pub fn active_page(&self) -> Option<Arc<dyn PageComponent>> {
        self.router.as_ref().and_then(|r| r.active_component())
    }

    /// 路由表统计信息
    pub fn table_stats(&self) -> Result<RouteTableStats> {
        Ok(self.router()?.table().stats())
    }

    /// 外壳状态
    pub fn state(&self) -> ShellState {
        self.state
    }

    /// 运行时长
    pub fn uptime(&self) -> Option<Duration> {
        self.started_at.map(|t| t.elapsed())
    }

    /// 获取配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
